use crate::container::EssDocument;
use crate::error::Result;
use crate::tag_tree::HierarchyNode;
use log::{error, info};
use std::fs;
use std::path::Path;

pub fn read_document(input_path: &Path) -> Result<EssDocument> {
    let text = read_text(input_path)?;
    EssDocument::parse(&text)
}

pub fn read_text(input_path: &Path) -> Result<String> {
    info!("Reading container document: {:?}", input_path);

    match fs::read_to_string(input_path) {
        Ok(text) => Ok(text),
        Err(e) => {
            error!("Failed to read {:?}: {}", input_path, e);
            Err(e.into())
        }
    }
}

pub fn export_hierarchy_to_json(tree: &HierarchyNode, output_path: &Path) -> Result<()> {
    info!(
        "Exporting hierarchy with {} tag nodes to JSON: {:?}",
        tree.descendant_count(),
        output_path
    );

    let json = match serde_json::to_string_pretty(tree) {
        Ok(json) => json,
        Err(e) => {
            error!("Failed to serialize hierarchy to JSON: {}", e);
            return Err(e.into());
        }
    };

    match fs::write(output_path, &json) {
        Ok(_) => {
            info!(
                "Successfully wrote {} bytes to {:?}",
                json.len(),
                output_path
            );
            Ok(())
        }
        Err(e) => {
            error!("Failed to write JSON to file {:?}: {}", output_path, e);
            Err(e.into())
        }
    }
}
