//! Platform abstraction layer
//!
//! Host-side collaborators the simulation talks to but does not own.
//! Rendering and input live entirely on the host.

use crate::sim::EntityId;

/// What the camera should follow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    Ship(EntityId),
    Station,
}

/// Camera that can be pointed at an entity
pub trait CameraFocus {
    fn set_target(&mut self, target: FocusTarget);
}

/// Camera that just remembers its target (headless hosts, tests)
#[derive(Debug, Clone, Default)]
pub struct FollowCamera {
    pub target: Option<FocusTarget>,
}

impl CameraFocus for FollowCamera {
    fn set_target(&mut self, target: FocusTarget) {
        log::debug!("Camera focus -> {:?}", target);
        self.target = Some(target);
    }
}
