use hed_hierarchy::aggregation::process_containers_parallel;
use hed_hierarchy::{BuildOptions, analyze_container, version};
use log::{error, info, warn};
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

fn main() -> ExitCode {
    // Initialize logger
    if std::env::var_os("RUST_LOG").is_none() {
        unsafe {
            std::env::set_var("RUST_LOG", "info");
        }
    }
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        error!("Not enough arguments provided");
        eprintln!(
            "Usage: {} <input_path> [output_path] [num_threads] [auto|log|linear]",
            args[0]
        );
        eprintln!("Version: {}", version());
        return ExitCode::FAILURE;
    }

    let input_path = Path::new(&args[1]);
    let batch_mode = input_path.is_dir();
    let output_path = if args.len() >= 3 {
        Path::new(&args[2])
    } else if batch_mode {
        Path::new("hedcount")
    } else {
        Path::new("hedcount.json")
    };

    let num_threads = if args.len() >= 4 {
        args[3].parse().unwrap_or_else(|_| {
            let cpu_count = num_cpus::get();
            warn!(
                "Invalid thread count provided, defaulting to {} CPUs",
                cpu_count
            );
            cpu_count
        })
    } else {
        num_cpus::get()
    };

    let scale = if args.len() >= 5 { args[4].as_str() } else { "auto" };
    let use_log_count = BuildOptions::parse_scale(scale).unwrap_or_else(|| {
        warn!("Unsupported scale: {}. Using auto instead.", scale);
        None
    });
    let options = BuildOptions::default().with_use_log_count(use_log_count);

    info!("HED hierarchy builder v{}", version());
    info!("Input: {:?}", input_path);
    info!("Scale: {}", scale);

    let start_time = Instant::now();

    let succeeded = if batch_mode {
        info!("Using {} threads", num_threads);
        match process_containers_parallel(input_path, output_path, &options, num_threads) {
            Ok(summary) => {
                info!(
                    "Processed {} containers, {} failed, {} scripts skipped",
                    summary.processed_count(),
                    summary.failed.len(),
                    summary.skipped.len()
                );
                summary.failed.is_empty()
            }
            Err(e) => {
                error!("Batch processing failed: {}", e);
                false
            }
        }
    } else {
        match analyze_container(input_path, output_path, &options) {
            Ok(_) => true,
            Err(e) => {
                error!("Failed to build tag hierarchy: {}", e);
                false
            }
        }
    };

    let elapsed = start_time.elapsed();
    info!("Completed in {:.2?}", elapsed);

    if succeeded {
        info!("Output saved to: {:?}", output_path);
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
