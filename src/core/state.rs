//! UI-facing application state.
//!
//! This is what the instruction line and the decoration bar are rendered
//! from. It mirrors the scene lifecycle plus the two inputs the scene itself
//! doesn't track: whether the camera is running and the latest fist signal.

use crate::core::scene::SceneEvent;

pub const MSG_CAMERA: &str = "Please allow camera access to start the magic.";
pub const MSG_FIST: &str = "Clench your hand into a FIST to summon the tree!";
pub const MSG_WAKING: &str = "The ice is crystallizing...";
pub const MSG_DECORATE: &str = "Select a decoration and click the tree!";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AppState {
    pub camera_active: bool,
    pub is_waking_up: bool,
    pub is_formed: bool,
    pub is_fist: bool,
}

impl AppState {
    pub fn instruction(&self) -> &'static str {
        if !self.camera_active {
            MSG_CAMERA
        } else if !self.is_formed && !self.is_waking_up {
            MSG_FIST
        } else if self.is_waking_up {
            MSG_WAKING
        } else {
            MSG_DECORATE
        }
    }

    /// The decoration bar is only offered once the tree can take decorations.
    pub fn decorations_enabled(&self) -> bool {
        self.is_formed
    }

    pub fn apply(&mut self, event: SceneEvent) {
        match event {
            SceneEvent::FormationStarted => self.is_waking_up = true,
            SceneEvent::FormationCompleted => {
                self.is_waking_up = false;
                self.is_formed = true;
            }
        }
    }
}
