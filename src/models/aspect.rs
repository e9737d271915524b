//! Aspect-ratio presets and image size resolution.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::constants::DEFAULT_IMAGE_DIMENSION;
use crate::models::transformation::TransformationKind;

/// Output aspect ratio offered for generative fill.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Display,
    EnumString, EnumIter,
)]
pub enum AspectRatio {
    #[serde(rename = "1:1")]
    #[strum(serialize = "1:1")]
    Square,
    #[serde(rename = "3:4")]
    #[strum(serialize = "3:4")]
    StandardPortrait,
    #[serde(rename = "9:16")]
    #[strum(serialize = "9:16")]
    PhonePortrait,
}

impl AspectRatio {
    /// Human-readable label shown next to the ratio.
    pub fn label(self) -> &'static str {
        match self {
            AspectRatio::Square => "Square (1:1)",
            AspectRatio::StandardPortrait => "Standard Portrait (3:4)",
            AspectRatio::PhonePortrait => "Phone Portrait (9:16)",
        }
    }

    pub fn width(self) -> u32 {
        1000
    }

    pub fn height(self) -> u32 {
        match self {
            AspectRatio::Square => 1000,
            AspectRatio::StandardPortrait => 1334,
            AspectRatio::PhonePortrait => 1778,
        }
    }

    pub fn size(self, dimension: Dimension) -> u32 {
        match dimension {
            Dimension::Width => self.width(),
            Dimension::Height => self.height(),
        }
    }
}

/// Which side of an image to measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Width,
    Height,
}

/// Known facts about an uploaded image. Any of them may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageDimensions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<String>,
}

/// Resolve the rendered size of `image` along `dimension`.
///
/// Fill transformations are sized by their aspect-ratio preset; everything
/// else keeps the image's own size. Unknown, unparseable or zero sizes fall
/// back to [`DEFAULT_IMAGE_DIMENSION`].
pub fn image_size(kind: TransformationKind, image: &ImageDimensions, dimension: Dimension) -> u32 {
    let size = if kind == TransformationKind::Fill {
        image
            .aspect_ratio
            .as_deref()
            .and_then(|ratio| ratio.parse::<AspectRatio>().ok())
            .map(|ratio| ratio.size(dimension))
    } else {
        match dimension {
            Dimension::Width => image.width,
            Dimension::Height => image.height,
        }
    };
    size.filter(|&s| s > 0).unwrap_or(DEFAULT_IMAGE_DIMENSION)
}
