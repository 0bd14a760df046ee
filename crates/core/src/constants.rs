//! Shared constants.

use crate::types::ImageObject;

/// Placeholder shown when a vendor product has no images.
pub const DEFAULT_IMAGE_URL: &str = "https://ozksgdmyrqcxcwhnbepg.supabase.co/storage/v1/object/public/assets/1818/ff6bb37e-0eab-40e1-a454-86856efc278e";

/// Alternate text of the placeholder image.
pub const DEFAULT_IMAGE_ALT: &str = "Default Image Placeholder";

/// The placeholder as an [`ImageObject`].
#[must_use]
pub fn default_image() -> ImageObject {
    ImageObject {
        url: DEFAULT_IMAGE_URL.to_string(),
        alternate_name: Some(DEFAULT_IMAGE_ALT.to_string()),
    }
}
