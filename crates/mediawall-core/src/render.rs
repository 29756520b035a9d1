use mediawall_schema::MediaEntry;

/// An informational element on the surface, observably distinct per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Manifest loaded but holds no media entries.
    Empty,
    /// Fetch or parse failed; nothing was rendered.
    Error,
}

/// One renderable gallery item, representation-neutral.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryItem {
    /// Thumbnail reference.
    pub thumb: String,
    /// Accessible label (the entry's filename).
    pub label: String,
    /// Original asset location; the copy-on-select target.
    pub url: String,
    /// Defer loading until the item scrolls into view.
    pub lazy: bool,
}

/// Where rendered items land. Surfaces are external collaborators; the
/// renderer only drives them through this seam.
pub trait AttachmentSurface {
    /// Drop any previously attached content. Called once per render.
    fn clear(&mut self);
    fn attach(&mut self, item: &GalleryItem);
    fn notice(&mut self, kind: NoticeKind, message: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    #[default]
    Flat,
    Grid,
}

impl std::str::FromStr for Layout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "flat" => Ok(Layout::Flat),
            "grid" => Ok(Layout::Grid),
            other => Err(format!("unknown layout '{other}' (expected flat or grid)")),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub layout: Layout,
    pub lazy_load: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            layout: Layout::Flat,
            lazy_load: true,
        }
    }
}

/// Turns a flattened entry list into surface items.
///
/// Each render clears the surface first, so repeated calls are idempotent.
/// An empty entry list yields exactly one placeholder notice rather than a
/// blank surface, keeping the boundary state distinguishable from "not yet
/// loaded".
#[derive(Debug, Default)]
pub struct GalleryRenderer {
    options: RenderOptions,
}

impl GalleryRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn render(&self, entries: &[MediaEntry], surface: &mut dyn AttachmentSurface) {
        surface.clear();
        if entries.is_empty() {
            surface.notice(NoticeKind::Empty, "no media entries in manifest");
            return;
        }
        for entry in entries {
            surface.attach(&GalleryItem {
                thumb: entry.thumburl.clone(),
                label: entry.filename.clone(),
                url: entry.url.clone(),
                lazy: self.options.lazy_load,
            });
        }
    }

    /// Replace all surface content with a single error notice.
    pub fn render_failure(&self, surface: &mut dyn AttachmentSurface, message: &str) {
        surface.clear();
        surface.notice(NoticeKind::Error, message);
    }
}
