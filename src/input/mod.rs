use egui::Pos2;

mod gestures;
mod router;

pub use gestures::TwoFingerTracker;
pub use router::{route_event, route_frame};

/// Canvas-space input, already separated from the host's windowing events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown { pos: Pos2 },
    PointerMove { pos: Pos2 },
    PointerUp { pos: Pos2 },
    /// The host lost the pointer (focus change, touch cancel)
    Cancel,
    Tap { pos: Pos2 },
    /// `center` is the midpoint between the two fingers
    TwoFingerBegin { center: Pos2 },
    /// Cumulative since `TwoFingerBegin`
    TwoFingerUpdate { rotation_radians: f32, zoom: f32 },
    TwoFingerEnd,
}

impl InputEvent {
    pub fn name(&self) -> &'static str {
        match self {
            InputEvent::PointerDown { .. } => "pointer_down",
            InputEvent::PointerMove { .. } => "pointer_move",
            InputEvent::PointerUp { .. } => "pointer_up",
            InputEvent::Cancel => "cancel",
            InputEvent::Tap { .. } => "tap",
            InputEvent::TwoFingerBegin { .. } => "two_finger_begin",
            InputEvent::TwoFingerUpdate { .. } => "two_finger_update",
            InputEvent::TwoFingerEnd => "two_finger_end",
        }
    }
}
