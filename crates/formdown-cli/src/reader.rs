use std::fs;
use std::path::{Path, PathBuf};

/// A document with its path and content.
pub struct FormFile {
    pub path: String,
    pub content: String,
}

/// Read form documents from a path (file or directory).
pub fn read_form_files(input_path: &Path) -> Result<Vec<FormFile>, String> {
    if !input_path.exists() {
        return Err(format!("Path does not exist: {}", input_path.display()));
    }

    if input_path.is_file() {
        let content = fs::read_to_string(input_path)
            .map_err(|e| format!("Failed to read {}: {}", input_path.display(), e))?;
        return Ok(vec![FormFile {
            path: input_path.to_string_lossy().to_string(),
            content,
        }]);
    }

    if input_path.is_dir() {
        return scan_directory(input_path);
    }

    Err(format!(
        "Path is neither a file nor a directory: {}",
        input_path.display()
    ))
}

fn scan_directory(dir_path: &Path) -> Result<Vec<FormFile>, String> {
    let pattern = dir_path.join("**/*.md");
    let pattern_str = pattern.to_string_lossy().replace('\\', "/");

    let mut paths: Vec<PathBuf> = Vec::new();
    let entries = glob::glob(&pattern_str).map_err(|e| format!("Invalid glob pattern: {}", e))?;
    for entry in entries {
        match entry {
            Ok(path) => paths.push(path),
            Err(e) => return Err(format!("Glob error: {}", e)),
        }
    }
    paths.sort();

    let mut files = Vec::new();
    for path in paths {
        let content = fs::read_to_string(&path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        files.push(FormFile {
            path: path.to_string_lossy().to_string(),
            content,
        });
    }

    Ok(files)
}
