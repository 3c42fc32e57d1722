//! Options methods for GlobeCameraEngine

use super::GlobeCameraEngine;
use crate::options::Options;

impl GlobeCameraEngine {
    /// Replace options and apply all changes to subsystems.
    ///
    /// Startup lookup settings only take effect for a lookup started
    /// afterwards.
    pub fn set_options(&mut self, new: Options) {
        self.options = new;
        self.apply_options();
    }

    /// Push current option values to the session and framing policy.
    pub fn apply_options(&mut self) {
        self.session.set_options(&self.options.camera);
        self.policy.set_options(&self.options);
    }
}
