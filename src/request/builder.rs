use super::types::{ImagePayload, MedicineForm, MedicineRequest, ValidationError};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

pub const MAX_AGE: u32 = 120;
pub const DEFAULT_IMAGE_MIME_TYPE: &str = "image/jpeg";

impl MedicineRequest {
    /// Validates raw form input. Age is mandatory, and at least one of a
    /// medicine name or an image must be present.
    pub fn build(form: MedicineForm) -> Result<Self, ValidationError> {
        let age = form.age.ok_or(ValidationError::MissingAge)?;
        if age > MAX_AGE {
            return Err(ValidationError::AgeOutOfRange { age });
        }

        let medicine_name = form
            .medicine_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());

        let image = match form.image.as_deref().map(str::trim) {
            Some(encoded) if !encoded.is_empty() => Some(ImagePayload::from_encoded(
                encoded,
                form.image_mime_type.as_deref(),
            )?),
            _ => None,
        };

        if medicine_name.is_none() && image.is_none() {
            return Err(ValidationError::MissingMedicine);
        }

        Ok(Self {
            medicine_name,
            age: age as u8,
            language: form.language,
            image,
        })
    }
}

impl ImagePayload {
    /// Decodes a base64 image, stripping a `data:<mime>;base64,` prefix if present.
    ///
    /// The media type is taken from `declared_mime`, then from the data URL,
    /// and falls back to [`DEFAULT_IMAGE_MIME_TYPE`].
    pub fn from_encoded(encoded: &str, declared_mime: Option<&str>) -> Result<Self, ValidationError> {
        let (url_mime, data) = split_data_url(encoded)?;

        if data.is_empty() {
            return Err(ValidationError::InvalidImage("empty image data".to_string()));
        }

        let bytes = STANDARD
            .decode(data)
            .map_err(|e| ValidationError::InvalidImage(e.to_string()))?;

        let mime_type = declared_mime
            .map(str::trim)
            .filter(|mime| !mime.is_empty())
            .or(url_mime)
            .unwrap_or(DEFAULT_IMAGE_MIME_TYPE)
            .to_string();

        Ok(Self { bytes, mime_type })
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }
}

fn split_data_url(encoded: &str) -> Result<(Option<&str>, &str), ValidationError> {
    let Some(rest) = encoded.strip_prefix("data:") else {
        return Ok((None, encoded));
    };

    let (header, data) = rest
        .split_once(',')
        .ok_or_else(|| ValidationError::InvalidImage("malformed data URL".to_string()))?;

    let mime = header.split(';').next().filter(|mime| !mime.is_empty());
    Ok((mime, data.trim()))
}
