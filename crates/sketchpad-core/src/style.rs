//! Shared style attributes applied to every shape variant.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorStyle {
    White,
    LightGray,
    Gray,
    #[default]
    Black,
    Green,
    Cyan,
    Blue,
    Indigo,
    Violet,
    Red,
    Orange,
    Yellow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SizeStyle {
    Small,
    #[default]
    Medium,
    Large,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DashStyle {
    #[default]
    Draw,
    Solid,
    Dashed,
    Dotted,
}

/// The style record shared by all shapes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeStyle {
    pub color: ColorStyle,
    pub size: SizeStyle,
    pub dash: DashStyle,
    pub is_filled: bool,
    /// Uniform scale factor, used by text shapes when resized.
    pub scale: f64,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            color: ColorStyle::default(),
            size: SizeStyle::default(),
            dash: DashStyle::default(),
            is_filled: false,
            scale: 1.0,
        }
    }
}
