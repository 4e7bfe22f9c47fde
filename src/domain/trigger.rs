// ============================================================
// Layer 3 — Trigger Domain Type
// ============================================================
// Recorded by the crawler each time a downloaded image is
// predicted positive. Serialised with camelCase keys:
//
//   { "imageSrc": "...", "foundOn": "...", "savedTo": "..." }

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trigger {
    /// Absolute URL of the matched image
    pub image_src: String,

    /// Page the image was found on
    pub found_on: String,

    /// Local path the image bytes were written to
    pub saved_to: String,
}

impl Trigger {
    pub fn new(
        image_src: impl Into<String>,
        found_on:  impl Into<String>,
        saved_to:  impl Into<String>,
    ) -> Self {
        Self {
            image_src: image_src.into(),
            found_on:  found_on.into(),
            saved_to:  saved_to.into(),
        }
    }
}
