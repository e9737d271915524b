//! Transformation kinds and request building.
//!
//! A request pairs a kind with validated form values. Its configuration is
//! the deep merge of what the user entered (base) with the kind's default
//! configuration (override): user values win, defaults fill the gaps.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;
use strum::{Display, EnumIter, EnumString};

use crate::constants::CREDIT_FEE;
use crate::merge::merge;
use crate::models::aspect::{image_size, Dimension, ImageDimensions};
use crate::models::form::{FormError, TransformationForm};
use crate::value::{Mapping, Value};

/// Supported image transformations.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Display,
    EnumString, EnumIter, clap::ValueEnum,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
pub enum TransformationKind {
    Restore,
    RemoveBackground,
    Fill,
    Remove,
    Recolor,
}

impl TransformationKind {
    pub fn title(self) -> &'static str {
        match self {
            TransformationKind::Restore => "Restore Image",
            TransformationKind::RemoveBackground => "Background Remove",
            TransformationKind::Fill => "Generative Fill",
            TransformationKind::Remove => "Object Remove",
            TransformationKind::Recolor => "Object Recolor",
        }
    }

    pub fn subtitle(self) -> &'static str {
        match self {
            TransformationKind::Restore => "Refine images by removing noise and imperfections",
            TransformationKind::RemoveBackground => "Removes the background of the image using AI",
            TransformationKind::Fill => "Enhance an image's dimensions using AI outpainting",
            TransformationKind::Remove => "Identify and eliminate objects from images",
            TransformationKind::Recolor => "Identify and recolor objects from the image",
        }
    }

    /// Whether the form asks for an aspect ratio.
    pub fn uses_aspect_ratio(self) -> bool {
        self == TransformationKind::Fill
    }

    /// Whether the form asks for a prompt naming the target object.
    pub fn uses_prompt(self) -> bool {
        matches!(self, TransformationKind::Remove | TransformationKind::Recolor)
    }

    /// Whether the form asks for a replacement color.
    pub fn uses_color(self) -> bool {
        self == TransformationKind::Recolor
    }

    /// Label of the prompt field, when the kind has one.
    pub fn prompt_label(self) -> Option<&'static str> {
        match self {
            TransformationKind::Remove => Some("Object to remove"),
            TransformationKind::Recolor => Some("Object to recolor"),
            _ => None,
        }
    }

    /// Credits charged per run.
    pub fn fee(self) -> u32 {
        CREDIT_FEE
    }

    /// Configuration sent for this kind when the user supplies nothing.
    pub fn default_config(self) -> Value {
        let config = match self {
            TransformationKind::Restore => json!({ "restore": true }),
            TransformationKind::RemoveBackground => json!({ "removeBackground": true }),
            TransformationKind::Fill => json!({ "fillBackground": true }),
            TransformationKind::Remove => json!({
                "remove": { "prompt": "", "removeShadow": true, "multiple": true }
            }),
            TransformationKind::Recolor => json!({
                "recolor": { "prompt": "", "to": "", "multiple": true }
            }),
        };
        Value::from(config)
    }
}

/// A validated transformation ready to be planned.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformationRequest {
    kind: TransformationKind,
    form: TransformationForm,
}

impl TransformationRequest {
    /// Validate `form` for `kind` and build the request.
    pub fn new(kind: TransformationKind, form: TransformationForm) -> Result<Self, FormError> {
        form.validate(kind)?;
        Ok(Self { kind, form })
    }

    pub fn kind(&self) -> TransformationKind {
        self.kind
    }

    pub fn form(&self) -> &TransformationForm {
        &self.form
    }

    /// The configuration fragment derived from what the user typed.
    pub fn user_config(&self) -> Value {
        let mut config = Mapping::new();
        let prompt = || Value::from(self.form.prompt().unwrap_or_default());

        match self.kind {
            TransformationKind::Remove => {
                config.insert(
                    "remove".to_string(),
                    [("prompt", prompt())].into_iter().collect(),
                );
            }
            TransformationKind::Recolor => {
                let to = Value::from(self.form.color().unwrap_or_default());
                config.insert(
                    "recolor".to_string(),
                    [("prompt", prompt()), ("to", to)].into_iter().collect(),
                );
            }
            _ => {}
        }
        Value::Mapping(config)
    }

    /// The full configuration: user values layered over the kind defaults.
    pub fn config(&self) -> Value {
        let user = self.user_config();
        let defaults = self.kind.default_config();
        merge(&user, Some(&defaults)).into_owned()
    }

    /// Rendered `(width, height)` of the result.
    pub fn dimensions(&self) -> (u32, u32) {
        let image = ImageDimensions {
            aspect_ratio: self.form.aspect_ratio.clone(),
            ..Default::default()
        };
        (
            image_size(self.kind, &image, Dimension::Width),
            image_size(self.kind, &image, Dimension::Height),
        )
    }

    /// Everything a caller needs to submit the transformation.
    pub fn plan(&self) -> TransformationPlan {
        let (width, height) = self.dimensions();
        TransformationPlan {
            kind: self.kind,
            title: self.form.title.clone(),
            public_id: self.form.public_id.clone(),
            config: self.config(),
            width,
            height,
            fee: self.kind.fee(),
        }
    }
}

/// Serializable summary of a transformation request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformationPlan {
    pub kind: TransformationKind,
    pub title: String,
    pub public_id: String,
    pub config: Value,
    pub width: u32,
    pub height: u32,
    pub fee: u32,
}
