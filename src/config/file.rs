//
//  campus-client
//  config/file.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Configuration file I/O.
//!
//! Thin wrappers that add the file path to I/O errors and create parent
//! directories on write. Used by [`Config`](super::Config).

use std::path::Path;

use anyhow::{Context, Result};

/// Reads the whole file.
pub fn read_config_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Writes `content`, creating missing parent directories.
pub fn write_config_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}

pub fn config_exists(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a").join("b").join("config.toml");

        assert!(!config_exists(&path));
        write_config_file(&path, "x = 1\n").unwrap();
        assert!(config_exists(&path));
        assert_eq!(read_config_file(&path).unwrap(), "x = 1\n");
    }

    #[test]
    fn test_read_error_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        let message = read_config_file(&path).unwrap_err().to_string();
        assert!(message.contains("missing.toml"));
    }
}
