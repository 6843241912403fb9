//! Image attachment payload.

use serde::Deserialize;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Raster formats accepted for upload. Stored files are served from the API's
/// own origin, so scriptable formats such as SVG stay out.
pub const ALLOWED_IMAGE_TYPES: &[&str] = &[
    "image/png",
    "image/jpeg",
    "image/jpg",
    "image/gif",
    "image/webp",
];

/// An image sent by a client, base64 encoded.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ImageUpload {
    /// MIME type, e.g. `image/png`
    #[validate(custom(function = "validate_image_type"))]
    #[schema(example = "image/png")]
    pub content_type: String,
    /// Base64 encoded image bytes
    #[validate(length(min = 1, message = "Image data is required"))]
    pub data: String,
}

impl ImageUpload {
    /// File extension derived from the MIME subtype.
    pub fn extension(&self) -> &str {
        match self.content_type.split('/').nth(1) {
            Some("jpeg") | Some("jpg") => "jpg",
            Some(sub) if !sub.is_empty() => sub,
            _ => "bin",
        }
    }
}

fn validate_image_type(value: &str) -> Result<(), ValidationError> {
    if ALLOWED_IMAGE_TYPES.contains(&value.to_ascii_lowercase().as_str()) {
        Ok(())
    } else {
        let mut err = ValidationError::new("image_type");
        err.message = Some("Only PNG, JPEG, GIF or WebP images are accepted".into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(content_type: &str) -> ImageUpload {
        ImageUpload {
            content_type: content_type.to_string(),
            data: "aGVsbG8=".to_string(),
        }
    }

    #[test]
    fn test_extension() {
        assert_eq!(upload("image/png").extension(), "png");
        assert_eq!(upload("image/jpeg").extension(), "jpg");
        assert_eq!(upload("image/webp").extension(), "webp");
    }

    #[test]
    fn test_rejects_non_images() {
        assert!(upload("image/webp").validate().is_ok());
        assert!(upload("application/pdf").validate().is_err());
        assert!(upload("image/").validate().is_err());
    }

    #[test]
    fn test_rejects_scriptable_images() {
        assert!(upload("image/svg+xml").validate().is_err());
        assert!(upload("image/svg").validate().is_err());
        assert!(upload("text/html").validate().is_err());
        assert!(upload("IMAGE/PNG").validate().is_ok());
    }
}
