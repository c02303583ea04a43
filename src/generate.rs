//! HTML page rendering.
//!
//! Two kinds of page are produced, both at the web root:
//!
//! - **Album pages** (`<id>.html`): hero header, sanitized markdown content,
//!   a thumbnail grid linking to the large renditions, and the album data
//!   inlined as JSON for the client gallery script (`js/gallery.js`), which
//!   also receives the path of `data/<id>.json`.
//! - **Redirect page** (`index.html`): forwards visitors to the first album
//!   in the navigation manifest.
//!
//! Element ids (`navbar`, `mobile-menu`, `gallery-grid`, ...) are the hooks
//! the gallery script looks up, so they must stay stable.
//!
//! ## CSS
//!
//! `static/style.css` is embedded at compile time; the `@font-face` rule for
//! the subset font is prepended at render time.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Every interpolation is escaped except the sanitized content HTML and the
//! inlined JSON, which are inserted with `PreEscaped`.

use crate::config::SiteSection;
use crate::types::AlbumData;
use maud::{DOCTYPE, Markup, PreEscaped, html};

const CSS_STATIC: &str = include_str!("../static/style.css");

/// Site-wide values shared by every page of a run.
#[derive(Debug, Clone)]
pub struct PageContext<'a> {
    pub site: &'a SiteSection,
    /// Copyright year shown in the footer.
    pub year: i32,
    /// `@font-face` rules for the subset font.
    pub font_css: String,
}

impl PageContext<'_> {
    fn css(&self) -> String {
        format!("{}\n\n{}", self.font_css, CSS_STATIC)
    }
}

/// Serialize album data for a `<script type="application/json">` block.
///
/// `</` is escaped so a title containing `</script>` cannot end the block.
pub fn inline_json(album: &AlbumData) -> Result<String, serde_json::Error> {
    Ok(serde_json::to_string(album)?.replace("</", "<\\/"))
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, css: &str, head_extra: Markup, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="zh-CN" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                (head_extra)
                style { (PreEscaped(css)) }
            }
            body {
                (content)
            }
        }
    }
}

/// Renders the top bar and the slide-in menu the gallery script fills from
/// `config/nav.json`.
fn site_header(site: &SiteSection) -> Markup {
    html! {
        nav #navbar {
            a.brand href="index.html" {
                img src=(site.logo) alt="";
                span { (site.nav_brand) }
            }
            button #mobile-menu-btn type="button" aria-label="Menu" { "☰" }
        }
        div #mobile-menu .hidden {
            div #menu-backdrop {}
            div #menu-panel {
                button #close-menu-btn type="button" aria-label="Close" { "×" }
                div #mobile-nav-links {}
            }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders an album page.
///
/// `content_html` must already be sanitized.
pub fn render_album_page(
    album: &AlbumData,
    content_html: &str,
    ctx: &PageContext,
) -> Result<Markup, serde_json::Error> {
    let album_json = inline_json(album)?;
    let data_path = format!("data/{}.json", album.id);
    let init_script = format!(
        "initGallery({});",
        serde_json::to_string(&data_path)?.replace("</", "<\\/")
    );
    let hero_style = (!album.cover.is_empty())
        .then(|| format!("background-image: url('{}')", album.cover.replace('\'', "%27")));

    let content = html! {
        (site_header(ctx.site))
        header.hero {
            div #hero-bg style=[hero_style] {}
            div.hero-text {
                h1 #album-title { (album.title) }
                p.album-author { (album.author) }
                div #album-desc {
                    @for paragraph in album.description.paragraphs() {
                        p { (paragraph) }
                    }
                }
            }
        }
        @if !content_html.trim().is_empty() {
            article.album-content {
                (PreEscaped(content_html))
            }
        }
        main #gallery-grid {
            @for image in &album.images {
                a href=(image.src) data-pswp-width=(image.width) data-pswp-height=(image.height) {
                    img src=(image.thumbnail) alt=(image.alt) loading="lazy";
                }
            }
        }
        footer #footer {
            "© " (ctx.year) " " (album.author)
        }
        script #album-data type="application/json" { (PreEscaped(album_json)) }
        script src="js/gallery.js" {}
        script { (PreEscaped(init_script)) }
    };

    let title = format!("{} | {}", album.title, ctx.site.url);
    Ok(base_document(&title, &ctx.css(), html! {}, content))
}

/// Renders the landing page that forwards to `target`.
///
/// With an empty target there is nowhere to go: the page renders the brand
/// only, without a refresh.
pub fn render_redirect_page(target: &str, ctx: &PageContext) -> Markup {
    let head_extra = html! {
        @if !target.is_empty() {
            meta http-equiv="refresh" content={ "0; url=" (target) };
        }
    };

    let content = html! {
        main.redirect {
            @if target.is_empty() {
                p { (ctx.site.nav_brand) }
            } @else {
                p {
                    a #redirect-link href=(target) { (ctx.site.nav_brand) }
                }
                script { (PreEscaped("location.replace(document.getElementById('redirect-link').href);")) }
            }
        }
    };

    base_document(&ctx.site.url, &ctx.css(), head_extra, content)
}
