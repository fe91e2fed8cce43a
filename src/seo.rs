//! SEO tags for the page `<head>`.

use crate::content::{ContentNode, ContentRepository, text_or_empty};
use crate::markup::{self, VoidTag, is_blank};
use maud::Markup;

pub const NOINDEX_PROPERTY: &str = "seoNoindex";
pub const NOFOLLOW_PROPERTY: &str = "seoNofollow";
pub const CANONICAL_PROPERTY: &str = "seoCanonical";

/// `noindex`, `nofollow`, `noindex,nofollow`, or `None` when the page may be
/// indexed and followed. Unset or unreadable flags count as false.
pub fn robots_directives(node: &dyn ContentNode) -> Option<&'static str> {
    let noindex = node.flag(NOINDEX_PROPERTY).unwrap_or(false);
    let nofollow = node.flag(NOFOLLOW_PROPERTY).unwrap_or(false);
    match (noindex, nofollow) {
        (true, true) => Some("noindex,nofollow"),
        (true, false) => Some("noindex"),
        (false, true) => Some("nofollow"),
        (false, false) => None,
    }
}

/// `<meta name="robots" content="..." />`, or nothing.
pub fn robots_tag(node: &dyn ContentNode) -> Markup {
    match robots_directives(node) {
        Some(content) => VoidTag::new("meta")
            .attr("name", "robots")
            .attr("content", content)
            .finish(),
        None => markup::empty(),
    }
}

/// The canonical URL of `node`.
///
/// The page named by `seoCanonical` wins; without one the node's own id is
/// resolved. When the id does not resolve the node's own URL is used.
/// Relative URLs are joined onto `base_url` when one is given.
pub fn canonical_url(
    repo: &dyn ContentRepository,
    node: &dyn ContentNode,
    base_url: Option<&str>,
) -> String {
    let picked = text_or_empty(node, CANONICAL_PROPERTY);
    let id = if is_blank(&picked) {
        node.id()
    } else {
        picked.trim()
    };
    let url = match repo.content(id) {
        Some(target) => target.url(),
        None => {
            tracing::debug!(node = node.id(), canonical = id, "canonical page did not resolve");
            node.url()
        }
    };
    match base_url {
        Some(base) => absolute_url(base, url),
        None => url.to_string(),
    }
}

/// `<link rel="canonical" href="..." />`.
pub fn canonical_tag(
    repo: &dyn ContentRepository,
    node: &dyn ContentNode,
    base_url: Option<&str>,
) -> Markup {
    VoidTag::new("link")
        .attr("rel", "canonical")
        .attr("href", &canonical_url(repo, node, base_url))
        .finish()
}

fn absolute_url(base: &str, url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") || url.starts_with("//") {
        return url.to_string();
    }
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        url.trim_start_matches('/')
    )
}
