use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse manifest: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("manifest body is not valid UTF-8")]
    InvalidUtf8,
    #[error("manifest is neither a media tree nor a path list")]
    UnrecognizedShape,
}

/// A node in the media manifest tree, discriminated by the `type` field.
///
/// Unrecognized `type` values deserialize to `Unknown` and flatten to
/// nothing; a `folder` without a `children` field is an empty folder.
/// Malformed subtrees are skipped, not fatal.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ManifestNode {
    Folder {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(default)]
        children: Vec<ManifestNode>,
    },
    Img(MediaEntry),
    #[serde(other)]
    Unknown,
}

/// The `img`-variant payload: one media file. Immutable once produced.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct MediaEntry {
    pub name: String,
    pub filename: String,
    /// Original asset location.
    pub url: String,
    pub thumburl: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
    /// Size in bytes, when the manifest provides it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

impl MediaEntry {
    /// Human-readable size, or "-" when the manifest carries none.
    pub fn human_size(&self) -> String {
        match self.size {
            None => "-".to_owned(),
            Some(b) if b < 1024 => format!("{b} B"),
            Some(b) if b < 1024 * 1024 => format!("{:.1} KB", b as f64 / 1024.0),
            Some(b) if b < 1024 * 1024 * 1024 => format!("{:.1} MB", b as f64 / (1024.0 * 1024.0)),
            Some(b) => format!("{:.1} GB", b as f64 / (1024.0 * 1024.0 * 1024.0)),
        }
    }
}

/// A parsed manifest document, in either supported wire shape.
///
/// The canonical shape is a JSON object `{ "tree": <node> }` (a bare
/// top-level node object is also accepted as the root). The legacy shape is
/// a flat JSON array of relative path strings, materialized against a
/// configured image base URL. The two are detected structurally and never
/// mixed.
#[derive(Debug, Clone, PartialEq)]
pub enum ManifestDocument {
    Tree(ManifestNode),
    Legacy(Vec<String>),
}

impl ManifestDocument {
    /// Flatten the document into its ordered media entries.
    ///
    /// `image_base` is only consulted for legacy path-array documents; a
    /// legacy document with no base keeps its relative paths as-is.
    pub fn entries(&self, image_base: Option<&str>) -> Vec<MediaEntry> {
        match self {
            ManifestDocument::Tree(root) => crate::flatten(root),
            ManifestDocument::Legacy(paths) => paths
                .iter()
                .map(|path| legacy_entry(path, image_base))
                .collect(),
        }
    }
}

fn legacy_entry(path: &str, image_base: Option<&str>) -> MediaEntry {
    let url = match image_base {
        Some(base) => format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/')),
        None => path.to_owned(),
    };
    let filename = path.rsplit('/').next().unwrap_or(path).to_owned();
    MediaEntry {
        name: filename.clone(),
        filename,
        thumburl: url.clone(),
        url,
        resolution: None,
        size: None,
    }
}

pub fn parse_manifest_str(input: &str) -> Result<ManifestDocument, ManifestError> {
    let value: serde_json::Value = serde_json::from_str(input)?;
    match value {
        serde_json::Value::Array(_) => {
            let paths: Vec<String> =
                serde_json::from_value(value).map_err(|_| ManifestError::UnrecognizedShape)?;
            Ok(ManifestDocument::Legacy(paths))
        }
        serde_json::Value::Object(ref map) => {
            let node_value = match map.get("tree") {
                Some(tree) => tree.clone(),
                None => value,
            };
            let root: ManifestNode = serde_json::from_value(node_value)
                .map_err(|_| ManifestError::UnrecognizedShape)?;
            Ok(ManifestDocument::Tree(root))
        }
        _ => Err(ManifestError::UnrecognizedShape),
    }
}

pub fn parse_manifest_bytes(input: &[u8]) -> Result<ManifestDocument, ManifestError> {
    let text = std::str::from_utf8(input).map_err(|_| ManifestError::InvalidUtf8)?;
    parse_manifest_str(text)
}

pub fn parse_manifest_file(path: impl AsRef<Path>) -> Result<ManifestDocument, ManifestError> {
    let content = fs::read_to_string(path)?;
    parse_manifest_str(&content)
}
