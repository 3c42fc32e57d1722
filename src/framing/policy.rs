//! Edge-detecting framing state machine.
//!
//! [`FramingPolicy::observe`] compares the frame's [`FrameSnapshot`] with
//! what it saw last frame and decides at most one camera action. Within a
//! single observation the rules are evaluated in fixed priority order:
//!
//! 1. selection of a new aircraft or airport
//! 2. deselection (including the selected entity disappearing)
//! 3. restore token change
//! 4. new location focus
//!
//! While an entity is selected, restore and focus edges are consumed but
//! have no effect, so a stale search never pulls the camera off a track.

use super::registry::{EntityRegistry, EntityState};
use super::snapshot::{FrameSnapshot, RestoreToken, SelectionRef};
use super::targets::Framer;
use crate::camera::{CameraSession, Pose};
use crate::geo::GeoPoint;
use crate::options::Options;

/// What the camera should do after an observation.
#[derive(Debug, Clone, PartialEq)]
pub enum FramingAction {
    /// Nothing changed that moves the camera.
    Hold,
    /// Animate to a new framing, saving the current pose first if asked.
    Frame {
        /// Pose to animate to.
        target: Pose,
        /// Whether to save the current pose before leaving it.
        save_first: bool,
    },
    /// Animate back to the saved pose, or to `fallback` when nothing is
    /// saved. With no saved pose and no fallback the camera holds.
    Return {
        /// Pose to use when the saved slot is empty.
        fallback: Option<Pose>,
    },
}

impl FramingAction {
    /// Carry the action out on `session`. Returns whether a transition
    /// started.
    pub fn apply(self, session: &mut CameraSession) -> bool {
        match self {
            Self::Hold => false,
            Self::Frame { target, save_first } => {
                if save_first && !session.save() {
                    log::debug!("saved view already held, keeping the first");
                }
                session.begin_animation(target, false)
            }
            Self::Return { fallback } => {
                match session.consume_saved().or(fallback) {
                    Some(target) => session.begin_animation(target, true),
                    None => false,
                }
            }
        }
    }
}

/// Framing decisions with all "previously seen" bookkeeping held as
/// fields.
#[derive(Debug, Clone)]
pub struct FramingPolicy {
    framer: Framer,
    prev_selection: SelectionRef,
    prev_focus: Option<GeoPoint>,
    prev_restore: RestoreToken,
    saved_for_focus: bool,
}

impl FramingPolicy {
    /// Create a policy that has seen nothing yet (no selection, no focus,
    /// restore token zero).
    #[must_use]
    pub fn new(options: &Options) -> Self {
        Self {
            framer: Framer::new(options),
            prev_selection: SelectionRef::None,
            prev_focus: None,
            prev_restore: RestoreToken::default(),
            saved_for_focus: false,
        }
    }

    /// Swap in new framing geometry. Edge-detection history is kept, so
    /// nothing re-fires.
    pub fn set_options(&mut self, options: &Options) {
        self.framer = Framer::new(options);
    }

    /// Target-pose geometry used by this policy.
    #[must_use]
    pub fn framer(&self) -> &Framer {
        &self.framer
    }

    /// Selection as of the last observation, after registry resolution.
    #[must_use]
    pub fn tracked(&self) -> &SelectionRef {
        &self.prev_selection
    }

    /// Observe one frame of external state and decide the camera action.
    ///
    /// `current` is the camera pose this frame; it feeds the
    /// distance-preserving focus and the pull-back fallback.
    pub fn observe(
        &mut self,
        snapshot: &FrameSnapshot,
        registry: &dyn EntityRegistry,
        current: &Pose,
    ) -> FramingAction {
        let (selection, entity) = resolve_selection(&snapshot.selection, registry);
        // A selection whose state is unusable is not recorded, so the edge
        // fires once its coordinates become valid.
        let prev_selection = if selection.is_some() && entity.is_none() {
            self.prev_selection.clone()
        } else {
            std::mem::replace(&mut self.prev_selection, selection.clone())
        };
        let selection_changed = selection != prev_selection;

        let restore_changed = snapshot.restore != self.prev_restore;
        self.prev_restore = snapshot.restore;
        if restore_changed {
            self.saved_for_focus = false;
        }

        let focus = self.observe_focus(snapshot);

        if selection_changed && selection.is_some() {
            return self.frame_selection(&selection, entity, prev_selection.is_some());
        }

        if selection_changed {
            log::debug!("selection cleared, returning to saved view");
            self.saved_for_focus = false;
            return FramingAction::Return {
                fallback: Some(self.framer.pull_back_pose(current)),
            };
        }

        if selection.is_some() {
            if restore_changed || focus.is_some() {
                log::debug!("ignoring restore/focus while {selection:?} is selected");
            }
            return FramingAction::Hold;
        }

        if restore_changed {
            log::debug!("restore requested ({:?})", snapshot.restore);
            return FramingAction::Return { fallback: None };
        }

        if let Some(point) = focus {
            let save_first = !self.saved_for_focus;
            self.saved_for_focus = true;
            log::debug!("focusing ({:.4}, {:.4})", point.lat, point.lon);
            return FramingAction::Frame {
                target: self.framer.focus_pose(current, &point),
                save_first,
            };
        }

        FramingAction::Hold
    }

    fn frame_selection(
        &self,
        selection: &SelectionRef,
        entity: Option<EntityState>,
        was_tracking: bool,
    ) -> FramingAction {
        let Some(state) = entity else {
            log::warn!("selected {selection:?} has invalid coordinates, holding view");
            return FramingAction::Hold;
        };
        let target = match selection {
            SelectionRef::Airport(_) => self.framer.airport_pose(&state),
            _ => self.framer.aircraft_pose(&state),
        };
        log::debug!("framing {selection:?}");
        FramingAction::Frame {
            target,
            save_first: !was_tracking,
        }
    }

    /// Record the focus request and return it if it is new.
    ///
    /// Cleared focus resets the duplicate check. Invalid coordinates are
    /// ignored without touching the record.
    fn observe_focus(&mut self, snapshot: &FrameSnapshot) -> Option<GeoPoint> {
        let Some(request) = &snapshot.focus else {
            self.prev_focus = None;
            return None;
        };
        let Some(point) = request.point().sanitize() else {
            log::warn!("ignoring focus request {:?} with invalid coordinates", request.key);
            return None;
        };
        let epsilon = self.framer.focus_epsilon();
        if self
            .prev_focus
            .is_some_and(|prev| prev.approx_eq(&point, epsilon))
        {
            return None;
        }
        self.prev_focus = Some(point);
        Some(point)
    }
}

/// Resolve the selection against the registry.
///
/// A selected entity that is gone resolves to [`SelectionRef::None`]. One
/// that is present with unusable coordinates keeps its selection but has no
/// state.
fn resolve_selection(
    selection: &SelectionRef,
    registry: &dyn EntityRegistry,
) -> (SelectionRef, Option<EntityState>) {
    if !selection.is_some() {
        return (SelectionRef::None, None);
    }
    match registry.lookup(selection) {
        Some(state) => (selection.clone(), state.sanitize()),
        None => {
            log::debug!("selected {selection:?} not found, treating as deselection");
            (SelectionRef::None, None)
        }
    }
}
