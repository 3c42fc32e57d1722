//! Deciding where the camera should go.
//!
//! The framing layer turns a per-frame [`FrameSnapshot`] of external state
//! (selection, location focus, restore requests) into camera actions. It
//! never reads a clock and never owns the camera; it only compares the
//! snapshot with the previous one and hands a [`FramingAction`] to the
//! [`CameraSession`](crate::camera::CameraSession).

/// Edge-detecting framing state machine.
pub mod policy;
/// Entity lookup seam.
pub mod registry;
/// External state snapshot types.
pub mod snapshot;
/// Target pose geometry.
pub mod targets;

pub use policy::{FramingAction, FramingPolicy};
pub use registry::{EntityRegistry, EntityState, EntityTable};
pub use snapshot::{
    AircraftId, AirportId, FocusRequest, FrameSnapshot, RestoreToken,
    SelectionRef,
};
pub use targets::{overview_pose, Framer};
