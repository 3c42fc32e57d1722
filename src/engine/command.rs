//! Camera input the engine accepts outside the per-frame snapshot.
//!
//! Input layers translate key and mouse events into a `CameraCommand` and
//! pass it to [`GlobeCameraEngine::execute`](super::GlobeCameraEngine::execute).

use glam::Vec2;

use super::GlobeCameraEngine;
use crate::framing::EntityRegistry;

/// A discrete camera control event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraCommand {
    /// Orbit modifier pressed or released.
    PivotModifier {
        /// Whether the modifier is now held.
        held: bool,
    },
    /// Rotate the camera around the current pivot by a drag delta.
    Orbit {
        /// Drag delta (x yaws, y pitches).
        delta: Vec2,
    },
}

impl GlobeCameraEngine {
    /// Apply a camera command.
    ///
    /// `registry` resolves the selected aircraft when the pivot modifier is
    /// pressed. Orbiting places the camera directly and cancels any running
    /// transition; it is ignored while the camera is unplaced.
    pub fn execute(
        &mut self,
        command: CameraCommand,
        registry: &dyn EntityRegistry,
    ) {
        match command {
            CameraCommand::PivotModifier { held: true } => {
                let selected = self.selected_aircraft_position(registry);
                let _ = self.orbit.modifier_down(&self.session.current(), selected);
            }
            CameraCommand::PivotModifier { held: false } => {
                self.orbit.modifier_up();
            }
            CameraCommand::Orbit { delta } => {
                if !self.session.is_placed() || !delta.is_finite() {
                    return;
                }
                let pose = self.orbit.rotate_pose(
                    &self.session.current(),
                    delta,
                    self.options.camera.rotate_speed,
                );
                self.session.snap_to(pose);
            }
        }
    }
}
