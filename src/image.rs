//! Media image markup.
//!
//! [`media_img`] turns a media reference into a single `<img>` tag. It is the
//! most branched helper in the crate, so the flow is spelled out here:
//!
//! ```text
//! MediaRef ──resolve──▶ node? ──no──▶ fallback url? ──yes──▶ <img src="{fallback}" alt="no image available" />
//!                         │                          └─no──▶ (empty)
//!                         └─yes─▶ src = url + transform query
//!                                 alt/title from altText/titleText
//!                                 width/height (explicit or umbracoWidth/umbracoHeight)
//!                                 ──▶ <img src alt [title] [width] [height] />
//! ```
//!
//! Every property read is isolated: a node lacking `altText` still renders,
//! with an empty `alt`. The function never fails.

use crate::config::ImagesConfig;
use crate::content::{ContentNode, ContentRepository, MediaRef, text_or_empty};
use crate::markup::{self, VoidTag, is_blank};
use crate::transform::{Anchor, ImageTransform, ResizeMode};
use maud::Markup;

pub const ALT_TEXT_PROPERTY: &str = "altText";
pub const TITLE_TEXT_PROPERTY: &str = "titleText";
pub const WIDTH_PROPERTY: &str = "umbracoWidth";
pub const HEIGHT_PROPERTY: &str = "umbracoHeight";

/// Alt text of the fallback image.
pub const FALLBACK_ALT: &str = "no image available";

/// Display options for [`media_img`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaImage<'a> {
    /// Emit `width`/`height` attributes.
    pub render_dimensions: bool,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub bgcolor: Option<&'a str>,
    /// Resize mode; `None` means the site default.
    pub mode: Option<ResizeMode>,
    /// Crop anchor; `None` means the site default.
    pub anchor: Option<Anchor>,
    /// Image shown when the reference does not resolve. `None` means the
    /// site default.
    pub fallback_url: Option<&'a str>,
}

impl<'a> MediaImage<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    pub fn size(self, width: u32, height: u32) -> Self {
        self.width(width).height(height)
    }

    pub fn with_dimensions(mut self) -> Self {
        self.render_dimensions = true;
        self
    }

    pub fn bgcolor(mut self, bgcolor: &'a str) -> Self {
        self.bgcolor = Some(bgcolor);
        self
    }

    pub fn mode(mut self, mode: ResizeMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = Some(anchor);
        self
    }

    pub fn fallback(mut self, url: &'a str) -> Self {
        self.fallback_url = Some(url);
        self
    }

    /// Fill every option left unset from the site's `[images]` defaults.
    pub fn or_defaults(self, images: &'a ImagesConfig) -> Self {
        Self {
            mode: self.mode.or(Some(images.mode)),
            anchor: self.anchor.or(Some(images.anchor)),
            fallback_url: self.fallback_url.or(images.fallback_url.as_deref()),
            ..self
        }
    }

    pub fn transform(&self) -> ImageTransform<'a> {
        ImageTransform {
            width: self.width,
            height: self.height,
            mode: self.mode.unwrap_or_default(),
            anchor: self.anchor.unwrap_or_default(),
            bgcolor: self.bgcolor,
        }
    }
}

/// Render a media reference as an `<img>` tag.
pub fn media_img(
    repo: &dyn ContentRepository,
    media: MediaRef<'_>,
    options: &MediaImage<'_>,
) -> Markup {
    match media.resolve(repo) {
        Some(node) => node_img(node, options),
        None => fallback_img(options.fallback_url),
    }
}

/// `<img>` tag for a resolved media node.
pub fn node_img(node: &dyn ContentNode, options: &MediaImage<'_>) -> Markup {
    let src = options.transform().apply(node.url());
    let alt = text_or_empty(node, ALT_TEXT_PROPERTY);
    let title = text_or_empty(node, TITLE_TEXT_PROPERTY);

    let (width, height) = if !options.render_dimensions {
        (None, None)
    } else if options.width.is_some() || options.height.is_some() {
        (
            options.width.map(|w| w.to_string()),
            options.height.map(|h| h.to_string()),
        )
    } else {
        (
            stored_dimension(node, WIDTH_PROPERTY),
            stored_dimension(node, HEIGHT_PROPERTY),
        )
    };

    VoidTag::new("img")
        .attr("src", &src)
        .attr("alt", &alt)
        .attr_opt("title", (!is_blank(&title)).then_some(title.as_str()))
        .attr_opt("width", width.as_deref())
        .attr_opt("height", height.as_deref())
        .finish()
}

/// The "no image" tag, or nothing when no fallback is configured.
pub fn fallback_img(fallback_url: Option<&str>) -> Markup {
    match fallback_url.filter(|url| !is_blank(url)) {
        Some(url) => VoidTag::new("img")
            .attr("src", url)
            .attr("alt", FALLBACK_ALT)
            .finish(),
        None => markup::empty(),
    }
}

fn stored_dimension(node: &dyn ContentNode, alias: &str) -> Option<String> {
    node.text(alias).ok().filter(|v| !is_blank(v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{ContentStore, StoredNode};
    use crate::test_helpers::*;

    fn render(media: MediaRef<'_>, options: &MediaImage<'_>) -> String {
        let store = sample_store();
        media_img(&store, media, options).into_string()
    }

    // =========================================================================
    // Unresolved references
    // =========================================================================

    #[test]
    fn unresolved_without_fallback_is_empty() {
        for media in [MediaRef::Missing, MediaRef::Key(""), MediaRef::Key("nope"), MediaRef::Id(42)] {
            assert_eq!(render(media, &MediaImage::new()), "", "{media:?}");
        }
    }

    #[test]
    fn unresolved_with_fallback_renders_fallback_verbatim() {
        let options = MediaImage::new().fallback("/img/no-image.png");
        assert_eq!(
            render(MediaRef::Id(42), &options),
            r#"<img src="/img/no-image.png" alt="no image available" />"#
        );
    }

    #[test]
    fn blank_fallback_counts_as_absent() {
        let options = MediaImage::new().fallback("  ");
        assert_eq!(render(MediaRef::Missing, &options), "");
    }

    #[test]
    fn fallback_ignores_transform_options() {
        let options = MediaImage::new()
            .size(100, 100)
            .with_dimensions()
            .fallback("/img/none.png");
        assert_eq!(
            render(MediaRef::Missing, &options),
            r#"<img src="/img/none.png" alt="no image available" />"#
        );
    }

    // =========================================================================
    // Resolved references
    // =========================================================================

    #[test]
    fn plain_image_uses_node_url_and_alt_title() {
        assert_eq!(
            render(MediaRef::Id(1101), &MediaImage::new()),
            r#"<img src="/media/1101/harbour.jpg" alt="Harbour at dawn" title="Fishing boats" />"#
        );
    }

    #[test]
    fn string_id_and_node_ref_render_identically() {
        let store = sample_store();
        let node = store.media("1101").unwrap();
        let options = MediaImage::new().width(300);
        let by_id = media_img(&store, MediaRef::Id(1101), &options).into_string();
        let by_key = media_img(&store, MediaRef::Key("1101"), &options).into_string();
        let by_node = media_img(&store, MediaRef::Node(node), &options).into_string();
        assert_eq!(by_id, by_key);
        assert_eq!(by_id, by_node);
    }

    #[test]
    fn resize_query_is_appended_and_escaped() {
        let html = render(MediaRef::Id(1101), &MediaImage::new().size(300, 200));
        assert!(html.starts_with(
            r#"<img src="/media/1101/harbour.jpg?w=300&amp;h=200&amp;mode=crop&amp;anchor=middlecenter&amp;scale=canvas&amp;quality=100""#
        ));
    }

    #[test]
    fn mode_anchor_and_bgcolor_flow_into_query() {
        let options = MediaImage::new()
            .width(300)
            .mode(ResizeMode::Pad)
            .anchor(Anchor::TopRight)
            .bgcolor("fff");
        let html = render(MediaRef::Id(1101), &options);
        assert!(html.contains("mode=pad&amp;anchor=topright"));
        assert!(html.ends_with(r#"bgcolor=fff" alt="Harbour at dawn" title="Fishing boats" />"#));
    }

    #[test]
    fn missing_alt_and_title_degrade_to_empty_alt_no_title() {
        assert_eq!(
            render(MediaRef::Id(1102), &MediaImage::new()),
            r#"<img src="/media/1102/pattern.png" alt="" />"#
        );
    }

    #[test]
    fn blank_title_is_omitted() {
        let mut store = ContentStore::new();
        store
            .insert_media(
                StoredNode::new(7, "/media/7/x.jpg")
                    .with_property("altText", "X")
                    .with_property("titleText", "   "),
            )
            .unwrap();
        let html = media_img(&store, MediaRef::Id(7), &MediaImage::new()).into_string();
        assert_eq!(html, r#"<img src="/media/7/x.jpg" alt="X" />"#);
    }

    // =========================================================================
    // Dimension attributes
    // =========================================================================

    #[test]
    fn dimensions_not_rendered_unless_requested() {
        let html = render(MediaRef::Id(1101), &MediaImage::new().size(300, 200));
        assert!(!html.contains("width=\""));
        assert!(!html.contains("height=\""));
    }

    #[test]
    fn explicit_dimensions_win_over_stored() {
        let html = render(MediaRef::Id(1101), &MediaImage::new().width(300).with_dimensions());
        assert!(html.ends_with(r#" width="300" />"#));
        assert!(!html.contains("height=\""));
    }

    #[test]
    fn stored_dimensions_used_when_no_size_requested() {
        let html = render(MediaRef::Id(1101), &MediaImage::new().with_dimensions());
        assert!(html.ends_with(r#" width="2400" height="1600" />"#));
        assert!(!html.contains('?'));
    }

    #[test]
    fn absent_stored_dimensions_are_omitted() {
        let html = render(MediaRef::Id(1102), &MediaImage::new().with_dimensions());
        assert_eq!(html, r#"<img src="/media/1102/pattern.png" alt="" />"#);
    }

    // =========================================================================
    // Determinism
    // =========================================================================

    #[test]
    fn rendering_is_idempotent() {
        let options = MediaImage::new()
            .size(640, 480)
            .bgcolor("000")
            .with_dimensions()
            .fallback("/img/none.png");
        let first = render(MediaRef::Id(1101), &options);
        let second = render(MediaRef::Id(1101), &options);
        assert_eq!(first, second);
    }
}
