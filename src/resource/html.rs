// src/resource/html.rs
// =============================================================================
// This module extracts links from HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever, which recovers from broken markup the way a
//   browser does, so malformed pages never fail to parse
//
// Any element with an href or src attribute counts, whatever its tag:
// anchors, images, scripts, stylesheets, frames. The crawler decides what
// to do with the target once it sees the Content-Type.
// =============================================================================

use std::collections::HashSet;
use std::sync::OnceLock;

use scraper::{Html, Selector};
use url::Url;

use super::resolve::resolve;

fn link_selector() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    // Constant selector, known to be valid
    SELECTOR.get_or_init(|| Selector::parse("[href], [src]").unwrap())
}

// Extracts every URL referenced by an `href` or `src` attribute.
//
// Parameters:
//   html: the page content
//   base: the page's URL, for resolving relative references
//
// Returns a set, so a page linking the same target twice yields it once.
// References that can't be resolved are dropped.
pub fn extract_links(html: &str, base: &Url) -> HashSet<Url> {
    let document = Html::parse_document(html);

    document
        .select(link_selector())
        .filter_map(|element| {
            let element = element.value();
            // href wins; an empty href falls back to src
            element
                .attr("href")
                .filter(|href| !href.is_empty())
                .or_else(|| element.attr("src"))
        })
        .filter_map(|reference| resolve(base, reference.trim()))
        .collect()
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does "[href], [src]" select?
//    - Any element carrying an href attribute, or a src attribute
//    - That covers <a>, <link>, <img>, <script>, <iframe> and friends
//    - The tag name doesn't matter, only the attribute
//
// 2. What is OnceLock?
//    - A cell that is written exactly once, then only read
//    - The selector is parsed on first use and reused afterwards
//    - Safe to share between threads without a lock on every read
//
// 3. Why HashSet<Url> instead of Vec?
//    - A page often links the same target many times (nav bars, footers)
//    - The set drops duplicates for free
//    - Order doesn't matter: everything found here lands in the same level
//
// 4. Does scraper fail on broken HTML?
//    - No, it parses like a browser and repairs what it can
//    - Unclosed tags and stray text still give a usable tree
// -----------------------------------------------------------------------------
