use log::{debug, trace};

use super::InputEvent;
use crate::command::Command;
use crate::state::EditorModel;
use crate::tools::TransformController;

/// Routes one host frame's worth of input, in order. Returns every command committed.
pub fn route_frame(
    controller: &mut TransformController,
    model: &mut EditorModel,
    events: impl IntoIterator<Item = InputEvent>,
) -> Vec<Command> {
    controller.begin_frame();
    events
        .into_iter()
        .filter_map(|event| route_event(controller, model, event))
        .collect()
}

/// Routes one input event to the transform controller. Returns the command committed by
/// this event, if any.
pub fn route_event(
    controller: &mut TransformController,
    model: &mut EditorModel,
    event: InputEvent,
) -> Option<Command> {
    trace!("route {}", event.name());
    match event {
        InputEvent::PointerDown { pos } => {
            controller.pointer_down(model, pos);
            None
        }
        InputEvent::PointerMove { pos } => {
            controller.pointer_move(pos);
            None
        }
        InputEvent::PointerUp { pos } => {
            controller.pointer_move(pos);
            controller.pointer_up(model)
        }
        InputEvent::Cancel => {
            controller.cancel(model);
            None
        }
        InputEvent::Tap { pos } => {
            controller.tap(model, pos);
            None
        }
        InputEvent::TwoFingerBegin { center } => {
            // An active gesture pins the target; otherwise prefer what is under the fingers
            let target = controller
                .target()
                .cloned()
                .or_else(|| model.element_at(center).map(|element| element.id.clone()))
                .or_else(|| model.selected_id().cloned());
            match target {
                Some(id) => {
                    controller.two_finger_begin(model, &id);
                }
                None => debug!("Two-finger gesture with nothing to rotate"),
            }
            None
        }
        InputEvent::TwoFingerUpdate {
            rotation_radians,
            zoom,
        } => {
            controller.two_finger_update(rotation_radians, zoom);
            None
        }
        InputEvent::TwoFingerEnd => controller.two_finger_end(model),
    }
}
