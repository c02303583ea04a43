//! Album content: the `content.md` sidecar.
//!
//! The markdown is converted with `pulldown-cmark` and then passed through an
//! `ammonia` allowlist before it is inlined into the album page. Raw HTML in
//! the markdown survives only if every tag and attribute is allowed; script
//! elements and `javascript:` links never do.
//!
//! When the sidecar is missing an empty one is created so the operator has a
//! file to fill in; the album then renders without content.

use pulldown_cmark::{Options, Parser, html as md_html};
use std::fs;
use std::path::Path;
use tracing::{error, info};

pub const CONTENT_FILE: &str = "content.md";

const DEFAULT_BODY: &str = "";

/// Rendered album content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlbumContent {
    /// Sanitized HTML, safe to inline.
    pub html: String,
    /// The markdown as written, used for glyph collection.
    pub raw_markdown: String,
}

/// Convert markdown to (unsanitized) HTML.
pub fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH);
    let mut html = String::new();
    md_html::push_html(&mut html, parser);
    html
}

/// Strip everything outside the allowlist from rendered HTML.
pub fn sanitize_html(html: &str) -> String {
    ammonia::Builder::default()
        .add_tags(&["img", "h1", "h2", "h3", "h4", "h5", "h6", "span"])
        .add_tag_attributes("img", &["src", "alt", "title", "width", "height", "class"])
        .add_generic_attributes(&["class", "style"])
        .clean(html)
        .to_string()
}

/// Markdown in, safe HTML out.
pub fn render_markdown(markdown: &str) -> String {
    sanitize_html(&markdown_to_html(markdown))
}

/// Load (or create) the content sidecar of the album in `album_dir`.
pub fn resolve_content(album_dir: &Path) -> AlbumContent {
    let content_path = album_dir.join(CONTENT_FILE);

    if !content_path.exists() {
        info!(path = %content_path.display(), "{CONTENT_FILE} not found, creating empty");
        if let Err(e) = fs::write(&content_path, DEFAULT_BODY) {
            error!(path = %content_path.display(), "failed to create {CONTENT_FILE}: {e}");
        }
        return AlbumContent::default();
    }

    match fs::read_to_string(&content_path) {
        Ok(markdown) => AlbumContent {
            html: render_markdown(&markdown),
            raw_markdown: markdown,
        },
        Err(e) => {
            error!(path = %content_path.display(), "failed to read {CONTENT_FILE}: {e}");
            AlbumContent::default()
        }
    }
}
