//! Colors shared by the showcase widgets

use neat_core::Color;
use serde::{Deserialize, Serialize};

/// Showcase palette
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// Status button background while idle or loading
    pub primary: Color,
    pub error: Color,
    pub success: Color,
    /// Icon and label color on the status button
    pub on_primary: Color,
    /// Card background of the PIN and artwork buttons
    pub card: Color,
    /// Input cells and empty thumbnails
    pub surface: Color,
    /// Focus ring, spinner and success mark
    pub accent: Color,
    pub text: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: Color::from_hex(0x000000),
            error: Color::from_hex(0xe5484d),
            success: Color::from_hex(0x30a46c),
            on_primary: Color::from_hex(0xcccccc),
            card: Color::WHITE,
            surface: Color::from_hex(0xf0f0f0),
            accent: Color::from_hex(0x0090ff),
            text: Color::from_hex(0x111111),
        }
    }
}
