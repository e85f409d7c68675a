use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::camera::{DragBindings, RotationMode};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Input", inline)]
#[serde(default)]
/// Mouse behavior of the camera.
pub struct InputOptions {
    /// Wheel zoom multiplier; negative inverts the wheel.
    #[schemars(title = "Wheel Scale", extend("step" = 0.1))]
    pub wheel_scale: f64,
    /// Whether a double click animates back to the starting pose.
    #[schemars(title = "Reset on Double Click")]
    pub reset_on_double_click: bool,
    /// Which rotation axes a rotate drag may drive.
    #[schemars(title = "Rotation Mode")]
    pub rotation_mode: RotationMode,
    /// Gesture performed by each mouse button.
    #[schemars(skip)]
    pub drag_bindings: DragBindings,
}

impl InputOptions {
    pub(super) fn sanitize(&mut self) {
        if !self.wheel_scale.is_finite() {
            log::warn!("wheel_scale {} not finite, using 1", self.wheel_scale);
            self.wheel_scale = 1.0;
        }
    }
}

impl Default for InputOptions {
    fn default() -> Self {
        Self {
            wheel_scale: 1.0,
            reset_on_double_click: true,
            rotation_mode: RotationMode::Free,
            drag_bindings: DragBindings::default(),
        }
    }
}
