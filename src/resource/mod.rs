// src/resource/mod.rs
// =============================================================================
// Everything about a single remote resource.
//
// Submodules:
// - resolve: turns href/src values into absolute URLs
// - classify: decides HTML / image / other from the Content-Type
// - http: fetches a URL and hands back an unread response
// - html: pulls links out of a page
// =============================================================================

mod classify;
mod html;
mod http;
mod resolve;

pub use classify::{classify, media_type, ContentKind};
pub use html::extract_links;
pub use http::{Fetched, Fetcher};
pub use resolve::resolve;
