use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use engine_logging::engine_info;
use tempfile::NamedTempFile;
use thiserror::Error;

pub const PREVIEW_FILENAME: &str = "preview.html";
pub const COMPONENT_STYLESHEET: &str = "/static/css/components.css";

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Wraps a component fragment in a standalone page, centered in a
/// `component-container` and styled with the service's component sheet.
pub fn build_preview_document(fragment_html: &str, stylesheet_href: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Component Preview</title>
    <link rel="stylesheet" href="{stylesheet_href}">
    <style>
        body {{
            display: flex;
            justify-content: center;
            align-items: center;
            min-height: 100vh;
            margin: 0;
            padding: 20px;
            background-color: #f5f7fa;
        }}
        .component-container {{
            width: 100%;
            max-width: 600px;
        }}
    </style>
</head>
<body>
    <div class="component-container">
{fragment_html}
    </div>
</body>
</html>
"#
    )
}

/// Ensure output directory exists; create if missing.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(PersistError::OutputDir("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
    }
    Ok(())
}

/// Writes standalone preview pages to `{dir}/preview.html`, replacing the
/// previous one atomically.
#[derive(Debug, Clone)]
pub struct PreviewWriter {
    dir: PathBuf,
    stylesheet_href: String,
}

impl PreviewWriter {
    pub fn new(dir: PathBuf, stylesheet_href: impl Into<String>) -> Self {
        Self {
            dir,
            stylesheet_href: stylesheet_href.into(),
        }
    }

    pub fn write(&self, fragment_html: &str) -> Result<PathBuf, PersistError> {
        ensure_output_dir(&self.dir)?;

        let document = build_preview_document(fragment_html, &self.stylesheet_href);
        let target = self.dir.join(PREVIEW_FILENAME);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(document.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;

        if target.exists() {
            fs::remove_file(&target)?;
        }
        tmp.persist(&target).map_err(|e| PersistError::Io(e.error))?;
        engine_info!("Preview written to {}", target.display());
        Ok(target)
    }
}
