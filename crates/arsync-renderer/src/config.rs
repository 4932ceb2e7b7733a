//! Renderer configuration

use serde::{Deserialize, Serialize};

use crate::camera::{DEFAULT_FAR, DEFAULT_NEAR};
use crate::light::{AmbientLight, Color, HemisphereLight};

/// Renderer settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RendererConfig {
    /// Near clip plane
    pub near: f32,
    /// Far clip plane
    pub far: f32,
    /// Clear color behind the background
    pub clear_color: Color,
    /// Clear alpha; 0 lets the page behind the canvas show through
    pub clear_alpha: f32,
    pub ambient: AmbientLight,
    pub hemisphere: HemisphereLight,
    /// Add debug axes at the target origin
    pub show_axes: bool,
    /// Length of the debug axes
    pub axes_size: f32,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            near: DEFAULT_NEAR,
            far: DEFAULT_FAR,
            clear_color: Color::BLACK,
            clear_alpha: 0.0,
            ambient: AmbientLight::default(),
            hemisphere: HemisphereLight::default(),
            show_axes: false,
            axes_size: 5.0,
        }
    }
}
