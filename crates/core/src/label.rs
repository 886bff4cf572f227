//! Labels and the fixed colour palette they draw from.

use serde::{Deserialize, Serialize};
use crate::error::ValidationError;
use crate::id::LabelId;

/// A named, coloured tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    /// Unique identifier
    pub id: LabelId,

    /// Display name, never blank
    pub name: String,

    /// Palette colour
    pub color: LabelColor,
}

impl Label {
    /// Build a label, trimming and validating the name.
    pub fn new(id: LabelId, name: &str, color: LabelColor) -> Result<Self, ValidationError> {
        Ok(Self {
            id,
            name: normalize_label_name(name)?,
            color,
        })
    }
}

/// Trim a label name, rejecting blank input.
pub fn normalize_label_name(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::BlankLabelName);
    }
    Ok(trimmed.to_string())
}

/// The label palette. Serialized as its hex code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum LabelColor {
    #[default]
    /// `#f44336`
    Red,
    /// `#e91e63`
    Pink,
    /// `#9c27b0`
    Purple,
    /// `#673ab7`
    DeepPurple,
    /// `#3f51b5`
    Indigo,
    /// `#2196f3`
    Blue,
    /// `#03a9f4`
    LightBlue,
    /// `#00bcd4`
    Cyan,
    /// `#009688`
    Teal,
    /// `#4caf50`
    Green,
    /// `#8bc34a`
    LightGreen,
    /// `#cddc39`
    Lime,
    /// `#ffeb3b`
    Yellow,
    /// `#ffc107`
    Amber,
    /// `#ff9800`
    Orange,
    /// `#ff5722`
    DeepOrange,
    /// `#795548`
    Brown,
    /// `#607d8b`
    BlueGrey,
}

impl LabelColor {
    /// Palette order.
    pub const ALL: [LabelColor; 18] = [
        LabelColor::Red,
        LabelColor::Pink,
        LabelColor::Purple,
        LabelColor::DeepPurple,
        LabelColor::Indigo,
        LabelColor::Blue,
        LabelColor::LightBlue,
        LabelColor::Cyan,
        LabelColor::Teal,
        LabelColor::Green,
        LabelColor::LightGreen,
        LabelColor::Lime,
        LabelColor::Yellow,
        LabelColor::Amber,
        LabelColor::Orange,
        LabelColor::DeepOrange,
        LabelColor::Brown,
        LabelColor::BlueGrey,
    ];

    /// Lowercase `#rrggbb` code.
    pub fn hex(&self) -> &'static str {
        match self {
            Self::Red => "#f44336",
            Self::Pink => "#e91e63",
            Self::Purple => "#9c27b0",
            Self::DeepPurple => "#673ab7",
            Self::Indigo => "#3f51b5",
            Self::Blue => "#2196f3",
            Self::LightBlue => "#03a9f4",
            Self::Cyan => "#00bcd4",
            Self::Teal => "#009688",
            Self::Green => "#4caf50",
            Self::LightGreen => "#8bc34a",
            Self::Lime => "#cddc39",
            Self::Yellow => "#ffeb3b",
            Self::Amber => "#ffc107",
            Self::Orange => "#ff9800",
            Self::DeepOrange => "#ff5722",
            Self::Brown => "#795548",
            Self::BlueGrey => "#607d8b",
        }
    }

    /// Human name, e.g. `deep orange`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Pink => "pink",
            Self::Purple => "purple",
            Self::DeepPurple => "deep purple",
            Self::Indigo => "indigo",
            Self::Blue => "blue",
            Self::LightBlue => "light blue",
            Self::Cyan => "cyan",
            Self::Teal => "teal",
            Self::Green => "green",
            Self::LightGreen => "light green",
            Self::Lime => "lime",
            Self::Yellow => "yellow",
            Self::Amber => "amber",
            Self::Orange => "orange",
            Self::DeepOrange => "deep orange",
            Self::Brown => "brown",
            Self::BlueGrey => "blue grey",
        }
    }
}

impl std::fmt::Display for LabelColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for LabelColor {
    type Err = ValidationError;

    /// Accepts a hex code or a name (`deep orange`, `deep_orange`, `deep-orange`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace(['_', '-'], " ");
        Self::ALL
            .into_iter()
            .find(|c| c.hex() == wanted || c.name() == wanted)
            .ok_or_else(|| ValidationError::UnknownColor(s.to_string()))
    }
}

impl From<LabelColor> for String {
    fn from(color: LabelColor) -> Self {
        color.hex().to_string()
    }
}

impl TryFrom<String> for LabelColor {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
