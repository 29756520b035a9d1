//! Gallery core for mediawall.
//!
//! This crate ties manifest fetching and flattening to a display surface:
//! the `GalleryRenderer` turns flattened entries into attached items, the
//! `AttachmentSurface` implementations produce HTML documents or plain-text
//! dumps, the `ClipboardNotifier` copies asset URLs with a single-slot
//! transient desktop notification, and `load_gallery` runs the whole
//! fetch → flatten → render cycle with error containment.

pub mod lifecycle;
pub mod notify;
pub mod render;
pub mod surface;

pub use lifecycle::{load, load_gallery, LoadOutcome};
pub use notify::{
    desktop_notifier, ClipboardNotifier, ClipboardWriter, DesktopNotifications,
    NotificationBackend, SystemClipboard,
};
pub use render::{AttachmentSurface, GalleryItem, GalleryRenderer, Layout, NoticeKind, RenderOptions};
pub use surface::{DocumentSurface, TextSurface};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GalleryError {
    #[error("target element '#{0}' not found in document")]
    TargetMissing(String),
    #[error("fetch error: {0}")]
    Fetch(#[from] mediawall_remote::FetchError),
    #[error("clipboard error: {0}")]
    Clipboard(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
