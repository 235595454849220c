use std::path::Path;

/// Container documents come either as plain JSON or as the `manifest.js`
/// JSONP wrapper the ESS report pages load.
pub fn get_supported_extensions() -> Vec<&'static str> {
    vec!["json", "js"]
}

pub fn is_supported_input(file_path: &Path) -> bool {
    file_path
        .extension()
        .and_then(|e| e.to_str())
        .map(|ext| get_supported_extensions().contains(&ext))
        .unwrap_or(false)
}

/// `.js` inputs may be unrelated scripts that happen to sit next to a
/// container.
pub fn is_script_input(file_path: &Path) -> bool {
    file_path.extension().and_then(|e| e.to_str()) == Some("js")
}
