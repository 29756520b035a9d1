use crate::manifest::{ManifestNode, MediaEntry};

/// Flatten a manifest tree into its media entries, depth-first pre-order.
///
/// Result order equals manifest declaration order exactly: no sorting, no
/// deduplication. The root is treated uniformly whether it is itself an
/// `img` or a `folder`; unknown nodes contribute nothing.
pub fn flatten(root: &ManifestNode) -> Vec<MediaEntry> {
    let mut entries = Vec::new();
    collect(root, &mut entries);
    entries
}

fn collect(node: &ManifestNode, entries: &mut Vec<MediaEntry>) {
    match node {
        ManifestNode::Img(entry) => entries.push(entry.clone()),
        ManifestNode::Folder { children, .. } => {
            for child in children {
                collect(child, entries);
            }
        }
        ManifestNode::Unknown => {}
    }
}
