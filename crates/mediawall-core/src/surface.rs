use crate::render::{AttachmentSurface, GalleryItem, Layout, NoticeKind};
use crate::GalleryError;

/// HTML attachment surface.
///
/// Either emits a complete standalone page, or splices rendered content
/// into an existing shell document at the element with a configured id.
/// Binding fails with `TargetMissing` when the element is absent, before
/// any fetch or rendering happens.
pub struct DocumentSurface {
    prefix: String,
    suffix: String,
    layout: Layout,
    items: Vec<String>,
    notice: Option<String>,
}

impl DocumentSurface {
    /// A self-contained page with its own container element and styles.
    pub fn standalone(layout: Layout) -> Self {
        let prefix = format!(
            "<!doctype html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>mediawall</title>\n<style>{STYLES}</style>\n</head>\n<body>\n<div id=\"mediawall\">\n"
        );
        Self {
            prefix,
            suffix: "</div>\n</body>\n</html>\n".to_owned(),
            layout,
            items: Vec::new(),
            notice: None,
        }
    }

    /// Bind into `document` at the element carrying `id="element_id"`.
    ///
    /// The element's existing children are discarded; everything outside it
    /// is preserved byte for byte.
    pub fn bind(document: &str, element_id: &str, layout: Layout) -> Result<Self, GalleryError> {
        let Some((content_start, content_end)) = find_element_span(document, element_id) else {
            tracing::error!("target element '#{element_id}' not found in document");
            return Err(GalleryError::TargetMissing(element_id.to_owned()));
        };
        Ok(Self {
            prefix: document[..content_start].to_owned(),
            suffix: document[content_end..].to_owned(),
            layout,
            items: Vec::new(),
            notice: None,
        })
    }

    /// Assemble the final document.
    pub fn finish(&self) -> String {
        let body = match &self.notice {
            Some(notice) => notice.clone(),
            None => {
                let joined = self.items.join("\n");
                match self.layout {
                    Layout::Grid => format!("<div class=\"media-grid\">\n{joined}\n</div>"),
                    Layout::Flat => joined,
                }
            }
        };
        format!("{}{body}{}", self.prefix, self.suffix)
    }
}

impl AttachmentSurface for DocumentSurface {
    fn clear(&mut self) {
        self.items.clear();
        self.notice = None;
    }

    fn attach(&mut self, item: &GalleryItem) {
        let loading = if item.lazy { " loading=\"lazy\"" } else { "" };
        self.items.push(format!(
            "<div class=\"media-item\"><img src=\"{}\" alt=\"{}\"{loading} data-url=\"{}\"></div>",
            escape(&item.thumb),
            escape(&item.label),
            escape(&item.url),
        ));
    }

    fn notice(&mut self, kind: NoticeKind, message: &str) {
        let class = match kind {
            NoticeKind::Empty => "gallery-notice",
            NoticeKind::Error => "error-message",
        };
        self.notice = Some(format!("<p class=\"{class}\">{}</p>", escape(message)));
    }
}

/// Plain-text attachment surface: one line per entry. The debug rendering
/// variant, selected with `--text`.
#[derive(Debug, Default)]
pub struct TextSurface {
    lines: Vec<String>,
}

impl TextSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finish(&self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }
}

impl AttachmentSurface for TextSurface {
    fn clear(&mut self) {
        self.lines.clear();
    }

    fn attach(&mut self, item: &GalleryItem) {
        self.lines.push(format!("{}\t{}", item.label, item.url));
    }

    fn notice(&mut self, kind: NoticeKind, message: &str) {
        match kind {
            NoticeKind::Empty => self.lines.push(message.to_owned()),
            NoticeKind::Error => self.lines.push(format!("error: {message}")),
        }
    }
}

const STYLES: &str = "body{margin:0;font-family:sans-serif}#mediawall{padding:8px}.media-grid{display:grid;grid-template-columns:repeat(auto-fill,minmax(160px,1fr));gap:8px}.media-item img{max-width:100%;display:block;cursor:pointer}.gallery-notice{color:#666}.error-message{color:#b00}";

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
    out
}

/// Locate the inner content span of the element with the given id.
///
/// Returns `(content_start, content_end)` — the byte range between the
/// element's opening and closing tags — or `None` when the id is absent,
/// the element is self-closing, or its closing tag never appears. Matching
/// tracks nesting of the same tag name, so a `<div id="g">` containing
/// other divs closes at the right place.
fn find_element_span(document: &str, element_id: &str) -> Option<(usize, usize)> {
    let id_pos = ["\"", "'"]
        .iter()
        .find_map(|q| document.find(&format!("id={q}{element_id}{q}")))?;

    let tag_start = document[..id_pos].rfind('<')?;
    let tag_name: String = document[tag_start + 1..]
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect();
    if tag_name.is_empty() {
        return None;
    }

    let open_end = id_pos + document[id_pos..].find('>')?;
    if document[..open_end].ends_with('/') {
        // Self-closing element has no content to attach into.
        return None;
    }
    let content_start = open_end + 1;

    let open_token = format!("<{tag_name}");
    let close_token = format!("</{tag_name}");
    let mut depth = 1usize;
    let mut cursor = content_start;
    loop {
        let close_rel = document[cursor..].find(&close_token)?;
        let open_rel = document[cursor..].find(&open_token).filter(|&rel| {
            document[cursor + rel + open_token.len()..]
                .chars()
                .next()
                .is_some_and(|c| c.is_whitespace() || c == '>' || c == '/')
        });
        match open_rel {
            Some(rel) if rel < close_rel => {
                depth += 1;
                cursor += rel + open_token.len();
            }
            _ => {
                depth -= 1;
                if depth == 0 {
                    return Some((content_start, cursor + close_rel));
                }
                cursor += close_rel + close_token.len();
            }
        }
    }
}
