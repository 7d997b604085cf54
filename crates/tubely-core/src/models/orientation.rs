use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use utoipa::ToSchema;

/// Screen orientation of a published video. Doubles as the object key prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OrientationClass {
    Landscape,
    Portrait,
    Other,
}

impl OrientationClass {
    /// Classify a display aspect ratio as reported by the prober.
    ///
    /// Matching is exact: `"16:9"` and `"9:16"` are the only recognised shapes and
    /// equivalent ratios (`"32:18"`) are not normalised.
    pub fn from_aspect_ratio(aspect_ratio: &str) -> Self {
        match aspect_ratio {
            "16:9" => OrientationClass::Landscape,
            "9:16" => OrientationClass::Portrait,
            _ => OrientationClass::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrientationClass::Landscape => "landscape",
            OrientationClass::Portrait => "portrait",
            OrientationClass::Other => "other",
        }
    }
}

impl Display for OrientationClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}
