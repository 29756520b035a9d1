//! Manifest parsing and tree flattening for mediawall.
//!
//! This crate defines the schema layer: the tagged media tree
//! (`ManifestNode`), the flat entry payload (`MediaEntry`), lenient JSON
//! document parsing for both the canonical nested-tree shape and the legacy
//! path-array shape (`ManifestDocument`), and the pre-order flatten that
//! turns a tree into an ordered entry list.

pub mod flatten;
pub mod manifest;

pub use flatten::flatten;
pub use manifest::{
    parse_manifest_bytes, parse_manifest_file, parse_manifest_str, ManifestDocument,
    ManifestError, ManifestNode, MediaEntry,
};
