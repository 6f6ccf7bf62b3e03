//! Creative direction for a generation attempt.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use adforge_common::error::AdforgeError;

/// How a person appears in the shot, if at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Wearer {
    /// Product only.
    #[default]
    None,
    Wearing,
    Held,
}

impl FromStr for Wearer {
    type Err = AdforgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "none" => Ok(Wearer::None),
            "wearing" | "worn" => Ok(Wearer::Wearing),
            "held" | "holding" => Ok(Wearer::Held),
            other => Err(AdforgeError::config(format!(
                "unknown wearer {other:?} (expected none, wearing, held)"
            ))),
        }
    }
}

/// Output aspect ratios the image model accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AspectRatio {
    #[default]
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "3:4")]
    Portrait3x4,
    #[serde(rename = "4:3")]
    Landscape4x3,
    #[serde(rename = "9:16")]
    Portrait9x16,
    #[serde(rename = "16:9")]
    Landscape16x9,
}

impl AspectRatio {
    pub const ALL: [AspectRatio; 5] = [
        AspectRatio::Square,
        AspectRatio::Portrait3x4,
        AspectRatio::Landscape4x3,
        AspectRatio::Portrait9x16,
        AspectRatio::Landscape16x9,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Portrait3x4 => "3:4",
            AspectRatio::Landscape4x3 => "4:3",
            AspectRatio::Portrait9x16 => "9:16",
            AspectRatio::Landscape16x9 => "16:9",
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AspectRatio {
    type Err = AdforgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|ratio| ratio.as_str() == s)
            .ok_or_else(|| {
                AdforgeError::config(format!(
                    "unsupported aspect ratio {s:?} (expected 1:1, 3:4, 4:3, 9:16, 16:9)"
                ))
            })
    }
}

/// User-supplied creative direction. Blank strings count as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdOptions {
    pub background: Option<String>,
    pub environment: Option<String>,
    pub mood: Option<String>,
    pub composition: Option<String>,
    pub wearer: Wearer,
    pub angle: Option<String>,
    pub custom_instructions: Option<String>,
    pub aspect_ratio: AspectRatio,
}

impl AdOptions {
    /// Trim every text field and drop the blank ones.
    pub fn normalized(self) -> Self {
        Self {
            background: non_blank(self.background),
            environment: non_blank(self.environment),
            mood: non_blank(self.mood),
            composition: non_blank(self.composition),
            wearer: self.wearer,
            angle: non_blank(self.angle),
            custom_instructions: non_blank(self.custom_instructions),
            aspect_ratio: self.aspect_ratio,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
