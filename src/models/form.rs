//! Transformation form values and their validation.

use schemars::{JsonSchema, Schema};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::aspect::AspectRatio;
use crate::models::transformation::TransformationKind;

/// Errors from validating a [`TransformationForm`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("`{field}` is required for {kind} transformations")]
    MissingField {
        field: &'static str,
        kind: TransformationKind,
    },

    #[error("unknown aspect ratio `{0}`; expected one of 1:1, 3:4, 9:16")]
    InvalidAspectRatio(String),
}

/// Whether the form creates a new image or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    Add,
    Update,
}

/// Values collected by the transformation form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransformationForm {
    /// Title shown in the image gallery.
    pub title: String,
    /// Aspect ratio key such as `3:4`; only used by fill.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<String>,
    /// Identifier of the uploaded source image.
    pub public_id: String,
    /// Replacement color; only used by recolor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Object to act on; used by remove and recolor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
}

impl TransformationForm {
    /// Blank values shown for a new transformation.
    pub fn defaults() -> Self {
        Self {
            title: String::new(),
            aspect_ratio: Some(String::new()),
            public_id: String::new(),
            color: Some(String::new()),
            prompt: Some(String::new()),
        }
    }

    /// Values the form starts with.
    ///
    /// Editing an existing image starts from its saved values; everything
    /// else starts blank.
    pub fn initial(action: FormAction, existing: Option<&TransformationForm>) -> Self {
        match (action, existing) {
            (FormAction::Update, Some(saved)) => saved.clone(),
            _ => Self::defaults(),
        }
    }

    pub fn prompt(&self) -> Option<&str> {
        non_blank(self.prompt.as_deref())
    }

    pub fn color(&self) -> Option<&str> {
        non_blank(self.color.as_deref())
    }

    /// The parsed aspect ratio, if one was chosen.
    pub fn aspect_ratio(&self) -> Result<Option<AspectRatio>, FormError> {
        non_blank(self.aspect_ratio.as_deref())
            .map(|raw| {
                raw.parse::<AspectRatio>()
                    .map_err(|_| FormError::InvalidAspectRatio(raw.to_string()))
            })
            .transpose()
    }

    /// Check that every field `kind` needs is filled in.
    pub fn validate(&self, kind: TransformationKind) -> Result<(), FormError> {
        let missing = |field| FormError::MissingField { field, kind };

        if non_blank(Some(self.title.as_str())).is_none() {
            return Err(missing("title"));
        }
        if non_blank(Some(self.public_id.as_str())).is_none() {
            return Err(missing("publicId"));
        }
        if kind.uses_aspect_ratio() && self.aspect_ratio()?.is_none() {
            return Err(missing("aspectRatio"));
        }
        if kind.uses_prompt() && self.prompt().is_none() {
            return Err(missing("prompt"));
        }
        if kind.uses_color() && self.color().is_none() {
            return Err(missing("color"));
        }
        Ok(())
    }
}

/// JSON schema describing [`TransformationForm`].
pub fn form_schema() -> Schema {
    schemars::schema_for!(TransformationForm)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> TransformationForm {
        TransformationForm {
            title: "Portrait".to_string(),
            aspect_ratio: Some("3:4".to_string()),
            public_id: "img_123".to_string(),
            color: Some("teal".to_string()),
            prompt: Some("hat".to_string()),
        }
    }

    #[test]
    fn defaults_are_blank() {
        let form = TransformationForm::defaults();
        assert!(form.title.is_empty());
        assert_eq!(form.prompt(), None);
        assert_eq!(form.aspect_ratio().unwrap(), None);
    }

    #[test]
    fn initial_values_for_update_use_saved_data() {
        let saved = filled();
        assert_eq!(TransformationForm::initial(FormAction::Update, Some(&saved)), saved);
        assert_eq!(
            TransformationForm::initial(FormAction::Add, Some(&saved)),
            TransformationForm::defaults()
        );
        assert_eq!(
            TransformationForm::initial(FormAction::Update, None),
            TransformationForm::defaults()
        );
    }

    #[test]
    fn filled_form_is_valid_for_every_kind() {
        use strum::IntoEnumIterator;
        for kind in TransformationKind::iter() {
            assert!(filled().validate(kind).is_ok(), "{kind}");
        }
    }

    #[test]
    fn title_and_public_id_are_required() {
        let mut form = filled();
        form.title = "  ".to_string();
        assert_eq!(
            form.validate(TransformationKind::Restore),
            Err(FormError::MissingField {
                field: "title",
                kind: TransformationKind::Restore
            })
        );

        let mut form = filled();
        form.public_id.clear();
        let err = form.validate(TransformationKind::Restore).unwrap_err();
        assert!(err.to_string().contains("`publicId` is required for restore"));
    }

    #[test]
    fn fill_requires_known_aspect_ratio() {
        let mut form = filled();
        form.aspect_ratio = None;
        assert!(matches!(
            form.validate(TransformationKind::Fill),
            Err(FormError::MissingField { field: "aspectRatio", .. })
        ));

        form.aspect_ratio = Some("4:3".to_string());
        assert_eq!(
            form.validate(TransformationKind::Fill),
            Err(FormError::InvalidAspectRatio("4:3".to_string()))
        );
    }

    #[test]
    fn recolor_requires_prompt_and_color() {
        let mut form = filled();
        form.color = Some(String::new());
        assert!(matches!(
            form.validate(TransformationKind::Recolor),
            Err(FormError::MissingField { field: "color", .. })
        ));
        assert!(form.validate(TransformationKind::Remove).is_ok());
    }

    #[test]
    fn deserializes_camel_case_with_optional_fields() {
        let form: TransformationForm =
            serde_json::from_str(r#"{"title": "A", "publicId": "p"}"#).unwrap();
        assert_eq!(form.public_id, "p");
        assert!(form.prompt.is_none());
    }

    #[test]
    fn schema_lists_required_fields() {
        let schema = serde_json::to_value(form_schema()).unwrap();
        let required = schema["required"].as_array().unwrap();
        assert!(required.contains(&serde_json::json!("title")));
        assert!(required.contains(&serde_json::json!("publicId")));
        assert!(schema["properties"]["aspectRatio"].is_object());
    }
}
