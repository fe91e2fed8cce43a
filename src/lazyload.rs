//! Lazy-loaded responsive images.
//!
//! The page script swaps `data-src-small` (narrow viewports) or `data-src`
//! into `src` once the image scrolls into view; until then the tag shows a
//! 1x1 transparent placeholder. A `<noscript>` copy keeps the image visible
//! without JavaScript.

use crate::content::{ContentNode, ContentRepository, MediaRef};
use crate::markup::{self, VoidTag, is_blank};
use maud::{Markup, html};

/// 1x1 transparent GIF.
pub const BLANK_GIF: &str =
    "data:image/gif;base64,R0lGODlhAQABAAAAACH5BAEKAAEALAAAAAABAAEAAAICTAEAOw==";

/// What to render for one lazy image.
#[derive(Debug, Clone, Copy, Default)]
pub struct LazyImage<'a> {
    /// Crop alias for wide viewports.
    pub crop: &'a str,
    /// Crop alias for narrow viewports.
    pub mobile_crop: &'a str,
    /// Used as the alt text.
    pub title: &'a str,
    pub css_class: &'a str,
    /// When set, the markup is wrapped in `<div class="{div_class}">`.
    pub div_class: Option<&'a str>,
}

/// Lazy-loading markup for a media reference, or nothing when it does not
/// resolve.
pub fn lazy_load(
    repo: &dyn ContentRepository,
    media: MediaRef<'_>,
    image: &LazyImage<'_>,
    placeholder: &str,
) -> Markup {
    match media.resolve(repo) {
        Some(node) => lazy_node(node, image, placeholder),
        None => markup::empty(),
    }
}

pub fn lazy_node(node: &dyn ContentNode, image: &LazyImage<'_>, placeholder: &str) -> Markup {
    let large = crop_or_original(node, image.crop);
    let small = crop_or_original(node, image.mobile_crop);
    let lazy_class = class_list("b-lazy img-responsive", image.css_class);
    let plain_class = class_list("img-responsive", image.css_class);

    let lazy = VoidTag::new("img")
        .attr("class", &lazy_class)
        .attr("src", placeholder)
        .attr("data-src-small", &small)
        .attr("data-src", &large)
        .attr("alt", image.title)
        .finish();
    let fallback = VoidTag::new("img")
        .attr("src", &large)
        .attr("class", &plain_class)
        .attr("alt", image.title)
        .finish();

    let body = html! {
        (lazy)
        noscript { (fallback) }
    };
    match image.div_class {
        Some(div_class) => html! {
            div class=(div_class) { (body) }
        },
        None => body,
    }
}

fn crop_or_original(node: &dyn ContentNode, alias: &str) -> String {
    node.crop_url(alias).unwrap_or_else(|| {
        tracing::debug!(node = node.id(), crop = alias, "crop not defined, using original");
        node.url().to_string()
    })
}

fn class_list(base: &str, extra: &str) -> String {
    if is_blank(extra) {
        base.to_string()
    } else {
        format!("{base} {}", extra.trim())
    }
}
