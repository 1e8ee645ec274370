//! MIME type detection based on file extensions.

use std::path::Path;

/// Which content root a path is served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentRoot {
    /// Stylesheets, scripts, images and fonts.
    Static,
    /// Everything else, served as HTML.
    Templates,
}

pub const DEFAULT_CONTENT_TYPE: &str = "text/html";

/// Picks the content root and `Content-Type` for a request path.
///
/// The extension is matched case-sensitively; unknown or missing
/// extensions fall back to HTML templates.
///
/// ```
/// # use webcore::http::mime::{content_type_for, ContentRoot};
/// assert_eq!(content_type_for("/css/styles.css"), (ContentRoot::Static, "text/css"));
/// assert_eq!(content_type_for("/index.html"), (ContentRoot::Templates, "text/html"));
/// ```
pub fn content_type_for(path: &str) -> (ContentRoot, &'static str) {
    let extension = Path::new(path).extension().and_then(|ext| ext.to_str());

    let static_type = match extension {
        Some("css") => Some("text/css"),
        Some("js") => Some("application/js"),
        Some("png") => Some("image/png"),
        Some("eot") => Some("application/vnd.ms-fontobject"),
        Some("svg") => Some("image/svg+xml"),
        Some("ttf") => Some("application/octet-stream"),
        Some("woff") | Some("woff2") => Some("application/font-woff"),
        _ => None,
    };

    match static_type {
        Some(content_type) => (ContentRoot::Static, content_type),
        None => (ContentRoot::Templates, DEFAULT_CONTENT_TYPE),
    }
}
