use crate::render::{AttachmentSurface, GalleryRenderer};
use mediawall_remote::{FetchError, ManifestFetcher};
use serde::Serialize;

/// Result of one fetch → flatten → render cycle.
#[derive(Debug, Clone, Serialize)]
pub struct LoadOutcome {
    /// Number of media items attached to the surface.
    pub rendered: usize,
    /// The contained failure, when the surface shows an error notice
    /// instead of items.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LoadOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Run one load cycle with an injected fetch step.
///
/// Any fetch or parse failure is converted into a single error notice on
/// the surface — no partial rendering, nothing propagates. The caller reads
/// the outcome for its own reporting.
pub fn load<F>(
    fetch: F,
    renderer: &GalleryRenderer,
    surface: &mut dyn AttachmentSurface,
) -> LoadOutcome
where
    F: FnOnce() -> Result<Vec<mediawall_schema::MediaEntry>, FetchError>,
{
    match fetch() {
        Ok(entries) => {
            renderer.render(&entries, surface);
            LoadOutcome {
                rendered: entries.len(),
                error: None,
            }
        }
        Err(e) => {
            tracing::warn!("manifest load failed: {e}");
            renderer.render_failure(surface, &format!("failed to load media: {e}"));
            LoadOutcome {
                rendered: 0,
                error: Some(e.to_string()),
            }
        }
    }
}

/// Fetch the configured manifest and render it onto the surface.
pub fn load_gallery(
    fetcher: &ManifestFetcher,
    renderer: &GalleryRenderer,
    surface: &mut dyn AttachmentSurface,
) -> LoadOutcome {
    load(|| fetcher.fetch_entries(), renderer, surface)
}
