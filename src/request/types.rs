use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};
use thiserror::Error;

/// Languages the result can be translated into.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Language {
    #[default]
    English,
    Spanish,
    French,
    German,
    Chinese,
    Japanese,
    Hindi,
    Arabic,
    Urdu,
}

/// Raw form fields as submitted by the user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicineForm {
    #[serde(default)]
    pub medicine_name: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub language: Language,
    /// Base64 image, optionally as a `data:` URL.
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub image_mime_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

/// A validated request, consumed once by the advisor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MedicineRequest {
    pub medicine_name: Option<String>,
    pub age: u8,
    pub language: Language,
    pub image: Option<ImagePayload>,
}

impl MedicineRequest {
    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("patient age is required")]
    MissingAge,

    #[error("patient age must be between 0 and {max}, got {age}", max = super::builder::MAX_AGE)]
    AgeOutOfRange { age: u32 },

    #[error("a medicine name or an image is required")]
    MissingMedicine,

    #[error("image payload is invalid: {0}")]
    InvalidImage(String),
}
