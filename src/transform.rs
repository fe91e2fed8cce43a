//! Resize/crop directives for the image processing endpoint.
//!
//! An [`ImageTransform`] describes *what* the image service should do with a
//! media file. It renders to a query string with a fixed key order so the same
//! request always produces the same URL (and hits the same server-side cache
//! entry):
//!
//! ```text
//! w, h, mode, anchor, scale, quality, bgcolor
//! ```
//!
//! `mode`, `anchor`, `scale=canvas` and `quality=100` are only sent when a
//! width or height is requested. `bgcolor` is sent whenever it is supplied.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Characters left unescaped in query keys and values: ASCII alphanumerics
/// plus `-_.!*()`.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'*')
    .remove(b'(')
    .remove(b')');

/// How the image is fitted into the requested box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeMode {
    #[default]
    Crop,
    Pad,
    BoxPad,
    Max,
    Min,
    Stretch,
}

impl ResizeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ResizeMode::Crop => "crop",
            ResizeMode::Pad => "pad",
            ResizeMode::BoxPad => "boxpad",
            ResizeMode::Max => "max",
            ResizeMode::Min => "min",
            ResizeMode::Stretch => "stretch",
        }
    }
}

impl fmt::Display for ResizeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Point of the image kept in view when cropping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    TopLeft,
    TopCenter,
    TopRight,
    MiddleLeft,
    #[default]
    MiddleCenter,
    MiddleRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl Anchor {
    pub fn as_str(self) -> &'static str {
        match self {
            Anchor::TopLeft => "topleft",
            Anchor::TopCenter => "topcenter",
            Anchor::TopRight => "topright",
            Anchor::MiddleLeft => "middleleft",
            Anchor::MiddleCenter => "middlecenter",
            Anchor::MiddleRight => "middleright",
            Anchor::BottomLeft => "bottomleft",
            Anchor::BottomCenter => "bottomcenter",
            Anchor::BottomRight => "bottomright",
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transform directives for one image request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageTransform<'a> {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub mode: ResizeMode,
    pub anchor: Anchor,
    /// Canvas color, hex without or with `#`.
    pub bgcolor: Option<&'a str>,
}

impl ImageTransform<'_> {
    /// Whether a target width or height was requested.
    pub fn is_resized(&self) -> bool {
        self.width.is_some() || self.height.is_some()
    }

    /// Key/value pairs in wire order, unencoded.
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(7);
        if let Some(w) = self.width {
            pairs.push(("w", w.to_string()));
        }
        if let Some(h) = self.height {
            pairs.push(("h", h.to_string()));
        }
        if self.is_resized() {
            pairs.push(("mode", self.mode.as_str().to_string()));
            pairs.push(("anchor", self.anchor.as_str().to_string()));
            pairs.push(("scale", "canvas".to_string()));
            pairs.push(("quality", "100".to_string()));
        }
        if let Some(bg) = self.bgcolor {
            pairs.push(("bgcolor", bg.to_string()));
        }
        pairs
    }

    /// Percent-encoded query string without the leading `?`. Empty when no
    /// directive applies.
    pub fn query_string(&self) -> String {
        self.pairs()
            .iter()
            .map(|(key, value)| format!("{}={}", encode_component(key), encode_component(value)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// `url` with the query string appended, or `url` unchanged when there is
    /// nothing to append.
    pub fn apply(&self, url: &str) -> String {
        append_query(url, &self.query_string())
    }
}

pub(crate) fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, QUERY_COMPONENT).to_string()
}

/// Append an already-encoded query to a URL, using `&` if the URL already
/// carries a query.
pub fn append_query(url: &str, query: &str) -> String {
    if query.is_empty() {
        return url.to_string();
    }
    let sep = if url.contains('?') { '&' } else { '?' };
    format!("{url}{sep}{query}")
}
