use crate::config::BuildOptions;
use crate::container::EssDocument;
use crate::error::{HedError, Result};
use crate::parsers::{is_script_input, is_supported_input};
use crate::utils::io::{export_hierarchy_to_json, read_text};
use log::{debug, error, info, trace, warn};
use rayon::prelude::*;
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const OUTPUT_SUFFIX: &str = "_hedcount.json";

#[derive(Debug, Default)]
pub struct BatchSummary {
    pub written: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, HedError)>,
    /// `.js` files that turned out not to be container documents.
    pub skipped: Vec<PathBuf>,
}

impl BatchSummary {
    pub fn processed_count(&self) -> usize {
        self.written.len() + self.failed.len()
    }
}

/// Builds one tag hierarchy per container found under `root_path` and writes
/// each to `output_dir`. A failing container is reported in the summary and
/// does not stop the others.
pub fn process_containers_parallel(
    root_path: &Path,
    output_dir: &Path,
    options: &BuildOptions,
    num_threads: usize,
) -> Result<BatchSummary> {
    info!(
        "Starting parallel container processing with {} threads",
        num_threads
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build()
        .map_err(|e| HedError::Io(io::Error::other(e)))?;

    fs::create_dir_all(output_dir)?;

    info!("Scanning directory for container documents...");
    let files_to_process = collect_files_to_process(root_path, output_dir)?;
    info!("Found {} files to process", files_to_process.len());

    let mut summary = BatchSummary::default();
    let mut claimed_outputs = HashSet::new();
    let mut jobs = Vec::with_capacity(files_to_process.len());
    for path in files_to_process {
        let output_path = output_path_for(root_path, &path, output_dir);
        if claimed_outputs.insert(output_path.clone()) {
            jobs.push((path, output_path));
        } else {
            error!(
                "Output {:?} for {:?} collides with an earlier container",
                output_path, path
            );
            summary
                .failed
                .push((path, HedError::DuplicateOutput(output_path)));
        }
    }

    let outcomes: Vec<(PathBuf, Result<Option<PathBuf>>)> = pool.install(|| {
        jobs.par_iter()
            .map(|(path, output_path)| {
                debug!("Processing container: {:?}", path);
                let outcome = process_container(path, output_path, options)
                    .map(|written| written.then(|| output_path.clone()));
                (path.clone(), outcome)
            })
            .collect()
    });

    for (path, outcome) in outcomes {
        match outcome {
            Ok(Some(output_path)) => summary.written.push(output_path),
            Ok(None) => summary.skipped.push(path),
            Err(e) => {
                error!("Error processing container {:?}: {}", path, e);
                summary.failed.push((path, e));
            }
        }
    }

    info!(
        "Container processing complete: {} written, {} failed, {} skipped",
        summary.written.len(),
        summary.failed.len(),
        summary.skipped.len()
    );

    Ok(summary)
}

/// Returns `false` when the input is a script that holds no container.
fn process_container(input_path: &Path, output_path: &Path, options: &BuildOptions) -> Result<bool> {
    let text = read_text(input_path)?;
    if is_script_input(input_path) && !EssDocument::is_wrapped_container(&text) {
        debug!("Skipping script without a container wrapper: {:?}", input_path);
        return Ok(false);
    }

    let document = EssDocument::parse(&text)?;
    let tree = crate::build_tag_hierarchy(document.event_codes(), options)?;
    export_hierarchy_to_json(&tree, output_path)?;
    Ok(true)
}

fn collect_files_to_process(root_path: &Path, output_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files_to_process = Vec::new();
    let mut visited_files = HashSet::new();
    let output_dir = fs::canonicalize(output_dir).ok();

    for entry in WalkDir::new(root_path)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if path.is_dir() {
            continue;
        }

        if !is_supported_input(path) {
            trace!("Skipping unsupported file: {:?}", path);
            continue;
        }

        let canonical_path = match fs::canonicalize(path) {
            Ok(p) => p,
            Err(e) => {
                warn!("Failed to canonicalize path {:?}: {}", path, e);
                continue;
            }
        };

        if output_dir
            .as_ref()
            .is_some_and(|dir| canonical_path.starts_with(dir))
        {
            trace!("Skipping file in output directory: {:?}", path);
            continue;
        }

        if !visited_files.insert(canonical_path) {
            trace!("Skipping already visited file: {:?}", path);
            continue;
        }

        files_to_process.push(path.to_path_buf());
    }

    Ok(files_to_process)
}

/// `studies/rsvp/manifest.js` under `studies` becomes
/// `rsvp_manifest.js_hedcount.json`. The extension stays in the name so
/// `study.json` and `study.js` get separate outputs.
pub fn output_path_for(root_path: &Path, input_path: &Path, output_dir: &Path) -> PathBuf {
    let relative = input_path.strip_prefix(root_path).unwrap_or(input_path);
    let flattened: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();

    output_dir.join(format!("{}{}", flattened.join("_"), OUTPUT_SUFFIX))
}
