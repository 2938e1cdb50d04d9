// src/resource/classify.rs
// =============================================================================
// Maps a Content-Type header onto the three kinds of resource we care about.
//
// Only the part before the first ';' matters, so
// "text/html; charset=utf-8" is plain "text/html". A missing header is
// treated as "text/plain", which lands in Other.
// =============================================================================

// Media type assumed when the server doesn't send one
const DEFAULT_MEDIA_TYPE: &str = "text/plain";

const HTML_MEDIA_TYPES: &[&str] = &["text/html"];
const IMAGE_MEDIA_TYPES: &[&str] = &["image/png", "image/jpeg", "image/gif", "image/bmp"];

/// What the dispatcher does with a fetched resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// Parse it and follow its links.
    Html,
    /// Save it under the output root.
    Image,
    /// Drain the body and move on.
    Other,
}

/// Extracts the bare media type from a Content-Type header value.
pub fn media_type(header: Option<&str>) -> String {
    header
        .and_then(|value| value.split(';').next())
        .map(str::trim)
        .filter(|essence| !essence.is_empty())
        .map(str::to_ascii_lowercase)
        .unwrap_or_else(|| DEFAULT_MEDIA_TYPE.to_string())
}

pub fn classify(header: Option<&str>) -> ContentKind {
    let essence = media_type(header);

    if HTML_MEDIA_TYPES.contains(&essence.as_str()) {
        ContentKind::Html
    } else if IMAGE_MEDIA_TYPES.contains(&essence.as_str()) {
        ContentKind::Image
    } else {
        ContentKind::Other
    }
}
