//! Loading emitter documents and art descriptors.
//!
//! Documents are plain JSON. Files with a `.json5` extension are parsed as
//! JSON5, which adds comments, trailing commas, and unquoted keys for
//! hand-edited configs.

use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::Art;

/// Error type for loading failures.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    /// The file could not be read
    #[error("cannot read file: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The content is not valid JSON
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The content is not valid JSON5
    #[error("invalid JSON5: {0}")]
    Json5(#[from] json5::Error),
    /// An art list with no entries
    #[error("art list is empty")]
    EmptyArt,
}

/// Syntax of a document on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentFormat {
    #[default]
    Json,
    Json5,
}

impl DocumentFormat {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json5") => DocumentFormat::Json5,
            _ => DocumentFormat::Json,
        }
    }
}

/// Check if a path has an extension this tool reads (.json or .json5).
///
/// Extensions match case-insensitively, like [`DocumentFormat::from_path`].
pub fn is_document_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json") || ext.eq_ignore_ascii_case("json5"))
}

/// Parse a document from a string.
pub fn parse_document(content: &str, format: DocumentFormat) -> Result<Value, LoadError> {
    match format {
        DocumentFormat::Json => Ok(serde_json::from_str(content)?),
        DocumentFormat::Json5 => Ok(json5::from_str(content)?),
    }
}

/// Read and parse a document, choosing the syntax from the file extension.
pub fn load_document(path: &Path) -> Result<Value, LoadError> {
    let content = read(path)?;
    parse_document(&content, DocumentFormat::from_path(path))
}

/// Parse an art descriptor given on the command line.
///
/// Anything that looks like a JSON array or object is parsed as JSON;
/// everything else is taken as a single texture name.
///
/// # Examples
///
/// ```
/// use particle_upgrade::models::Art;
/// use particle_upgrade::parser::parse_art;
///
/// assert_eq!(parse_art("spark.png").unwrap(), Art::from("spark.png"));
/// assert!(matches!(parse_art(r#"["a.png", "b.png"]"#).unwrap(), Art::Textures(_)));
/// ```
pub fn parse_art(arg: &str) -> Result<Art, LoadError> {
    let trimmed = arg.trim();
    if trimmed.starts_with('[') || trimmed.starts_with('{') || trimmed.starts_with('"') {
        non_empty(serde_json::from_str(trimmed)?)
    } else {
        Ok(Art::Texture(arg.to_string()))
    }
}

/// Read an art descriptor from a JSON (or JSON5) file.
pub fn load_art(path: &Path) -> Result<Art, LoadError> {
    let content = read(path)?;
    let art = match DocumentFormat::from_path(path) {
        DocumentFormat::Json => serde_json::from_str(&content)?,
        DocumentFormat::Json5 => json5::from_str(&content)?,
    };
    non_empty(art)
}

fn non_empty(art: Art) -> Result<Art, LoadError> {
    if art.is_empty() {
        return Err(LoadError::EmptyArt);
    }
    Ok(art)
}

fn read(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Io { path: path.to_path_buf(), source })
}
