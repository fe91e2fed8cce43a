//! Named crops stored on media items.
//!
//! An editor defines crops per media item under an alias (`"hero"`,
//! `"mobile"`). A crop has a target size and, when the editor dragged a
//! selection, fractional coordinates of that selection. Without coordinates
//! the crop centers on the media item's focal point, or on the image center
//! when no focal point is set.

use crate::transform::append_query;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Crop {
    /// Target width in pixels. Zero leaves the width to the image service.
    #[serde(default)]
    pub width: u32,
    /// Target height in pixels. Zero leaves the height to the image service.
    #[serde(default)]
    pub height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<CropCoordinates>,
}

/// Selection edges as fractions (0..1) inset from each side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CropCoordinates {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// Fractional position (0..1) of the subject of the image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FocalPoint {
    pub left: f64,
    pub top: f64,
}

impl Crop {
    pub fn sized(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            coordinates: None,
        }
    }

    /// Query string selecting this crop from the original image.
    pub fn query_string(&self, focal_point: Option<&FocalPoint>) -> String {
        let mut parts = Vec::with_capacity(4);
        match (&self.coordinates, focal_point) {
            (Some(c), _) => {
                parts.push(format!("crop={},{},{},{}", c.x1, c.y1, c.x2, c.y2));
                parts.push("cropmode=percentage".to_string());
            }
            (None, Some(fp)) => {
                parts.push(format!("center={},{}", fp.top, fp.left));
                parts.push("mode=crop".to_string());
            }
            (None, None) => {
                parts.push("anchor=center".to_string());
                parts.push("mode=crop".to_string());
            }
        }
        if self.width > 0 {
            parts.push(format!("width={}", self.width));
        }
        if self.height > 0 {
            parts.push(format!("height={}", self.height));
        }
        parts.join("&")
    }
}

/// URL of `crop` applied to the media file at `base_url`.
pub fn crop_url(base_url: &str, crop: &Crop, focal_point: Option<&FocalPoint>) -> String {
    append_query(base_url, &crop.query_string(focal_point))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_take_precedence_over_focal_point() {
        let crop = Crop {
            width: 800,
            height: 400,
            coordinates: Some(CropCoordinates {
                x1: 0.1,
                y1: 0.2,
                x2: 0.05,
                y2: 0.25,
            }),
        };
        let fp = FocalPoint { left: 0.3, top: 0.6 };
        assert_eq!(
            crop_url("/media/1/a.jpg", &crop, Some(&fp)),
            "/media/1/a.jpg?crop=0.1,0.2,0.05,0.25&cropmode=percentage&width=800&height=400"
        );
    }

    #[test]
    fn focal_point_centers_crop_top_first() {
        let fp = FocalPoint { left: 0.3, top: 0.6 };
        assert_eq!(
            crop_url("/media/1/a.jpg", &Crop::sized(320, 240), Some(&fp)),
            "/media/1/a.jpg?center=0.6,0.3&mode=crop&width=320&height=240"
        );
    }

    #[test]
    fn no_focal_point_anchors_center() {
        assert_eq!(
            crop_url("/media/1/a.jpg", &Crop::sized(320, 240), None),
            "/media/1/a.jpg?anchor=center&mode=crop&width=320&height=240"
        );
    }

    #[test]
    fn zero_dimension_is_omitted() {
        assert_eq!(
            Crop::sized(0, 240).query_string(None),
            "anchor=center&mode=crop&height=240"
        );
    }

    #[test]
    fn crop_parses_from_json() {
        let crop: Crop =
            serde_json::from_str(r#"{"width": 10, "height": 20, "coordinates": {"x1": 0, "y1": 0, "x2": 0.5, "y2": 0.5}}"#)
                .unwrap();
        assert_eq!(crop.width, 10);
        assert_eq!(crop.coordinates.unwrap().x2, 0.5);
    }
}
