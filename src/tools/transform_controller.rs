use egui::{Pos2, Vec2};
use log::{debug, trace};

use super::rotation::{angle_around, wrap_radians, RotationTrack};
use crate::command::Command;
use crate::config::EditorConfig;
use crate::element::{normalize_degrees, rotate_about, ElementPatch, Geometry};
use crate::event::{EditorEvent, TransformEvent, TransformPhase};
use crate::id_generator::ElementId;
use crate::state::EditorModel;

/// Bottom-right corner of the rotated, scaled box
pub fn resize_handle_position(geometry: &Geometry) -> Pos2 {
    geometry.corners()[2]
}

/// Point `offset` above the top edge's midpoint, rotated with the element
pub fn rotate_handle_position(geometry: &Geometry, offset: f32) -> Pos2 {
    let rect = geometry.scaled_rect();
    let center = rect.center();
    let local = Pos2::new(center.x, rect.min.y - offset);
    rotate_about(local, center, geometry.rotation_degrees.to_radians())
}

fn is_finite_pos(pos: Pos2) -> bool {
    pos.x.is_finite() && pos.y.is_finite()
}

#[derive(Debug, Clone, Copy)]
struct PanTrack {
    start: Pos2,
    origin: Pos2,
    moved: bool,
}

#[derive(Debug, Clone, Copy)]
enum RotationSource {
    TwoFinger { zoom: f32 },
    Handle { center: Pos2, start_angle: f32 },
}

#[derive(Debug, Clone, Copy)]
struct RotationGesture {
    source: RotationSource,
    track: RotationTrack,
}

/// Pan and rotate running on one element. Ends when both recognizers have ended.
#[derive(Debug, Clone)]
struct Manipulation {
    target: ElementId,
    baseline: Geometry,
    live: Geometry,
    pan: Option<PanTrack>,
    rotation: Option<RotationGesture>,
    dragged: bool,
}

impl Manipulation {
    fn new(target: ElementId, baseline: Geometry) -> Self {
        Self {
            target,
            baseline,
            live: baseline,
            pan: None,
            rotation: None,
            dragged: false,
        }
    }

    fn is_finished(&self) -> bool {
        self.pan.is_none() && self.rotation.is_none()
    }
}

#[derive(Debug, Clone)]
struct Resize {
    target: ElementId,
    baseline: Geometry,
    live: Geometry,
    start: Pos2,
}

#[derive(Debug, Clone, Default)]
enum TransformState {
    #[default]
    Idle,
    Manipulating(Manipulation),
    Resizing(Resize),
}

/// Turns pointer and gesture input into live geometry for one element, and commits the
/// result as a single `Command::UpdateElement` when the gesture ends.
///
/// Nothing is written to the model until commit, so cancelling is free.
#[derive(Debug, Clone)]
pub struct TransformController {
    state: TransformState,
    suppress_next_tap: bool,
    snap_increment: f32,
    smoothing: f32,
    min_size: f32,
    min_scale: f32,
    resize_handle_radius: f32,
    rotate_handle_offset: f32,
}

impl Default for TransformController {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl TransformController {
    /// Creates an idle controller using the config's snapping and handle sizes
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            state: TransformState::Idle,
            suppress_next_tap: false,
            snap_increment: config.snap_increment_degrees,
            smoothing: config.rotation_smoothing,
            min_size: config.min_element_size,
            min_scale: config.min_scale,
            resize_handle_radius: config.resize_handle_radius,
            rotate_handle_offset: config.rotate_handle_offset,
        }
    }

    /// Current gesture phase
    pub fn phase(&self) -> TransformPhase {
        match &self.state {
            TransformState::Idle => TransformPhase::Idle,
            TransformState::Resizing(_) => TransformPhase::Resizing,
            TransformState::Manipulating(m) if m.rotation.is_some() => TransformPhase::Rotating,
            TransformState::Manipulating(_) => TransformPhase::Dragging,
        }
    }

    /// Returns true while a gesture is in progress
    pub fn is_active(&self) -> bool {
        !matches!(self.state, TransformState::Idle)
    }

    /// The element under manipulation
    pub fn target(&self) -> Option<&ElementId> {
        match &self.state {
            TransformState::Idle => None,
            TransformState::Manipulating(m) => Some(&m.target),
            TransformState::Resizing(r) => Some(&r.target),
        }
    }

    /// Uncommitted geometry of the element under manipulation
    pub fn live_geometry(&self) -> Option<(&ElementId, Geometry)> {
        match &self.state {
            TransformState::Idle => None,
            TransformState::Manipulating(m) => Some((&m.target, m.live)),
            TransformState::Resizing(r) => Some((&r.target, r.live)),
        }
    }

    /// Uncommitted geometry for `id`, if it is the current target
    pub fn live_geometry_for(&self, id: &ElementId) -> Option<Geometry> {
        self.live_geometry()
            .filter(|(target, _)| *target == id)
            .map(|(_, geometry)| geometry)
    }

    pub fn handle_radius(&self) -> f32 {
        self.resize_handle_radius
    }

    pub fn rotate_handle_offset(&self) -> f32 {
        self.rotate_handle_offset
    }

    /// Starts a drag, resize or handle rotation depending on what is under `pos`.
    /// Returns false when the press was ignored.
    pub fn pointer_down(&mut self, model: &mut EditorModel, pos: Pos2) -> bool {
        if !is_finite_pos(pos) {
            return false;
        }
        self.suppress_next_tap = false;

        match &mut self.state {
            TransformState::Resizing(_) => {
                debug!("Ignoring pointer down while resizing");
                false
            }
            TransformState::Manipulating(manipulation) => {
                if manipulation.pan.is_some() {
                    debug!("Ignoring second pointer during drag of {}", manipulation.target);
                    return false;
                }
                let hit = model.element_at(pos).map(|element| element.id.clone());
                if hit.as_ref() != Some(&manipulation.target) {
                    debug!("Ignoring pointer down away from {}", manipulation.target);
                    return false;
                }
                manipulation.pan = Some(PanTrack {
                    start: pos,
                    origin: manipulation.live.position,
                    moved: false,
                });
                true
            }
            TransformState::Idle => self.begin_from_idle(model, pos),
        }
    }

    fn begin_from_idle(&mut self, model: &mut EditorModel, pos: Pos2) -> bool {
        if let Some(selected) = model.selected_element() {
            let geometry = selected.geometry;
            let id = selected.id.clone();
            if resize_handle_position(&geometry).distance(pos) <= self.resize_handle_radius {
                return self.begin_resize(model, &id, pos);
            }
            let handle = rotate_handle_position(&geometry, self.rotate_handle_offset);
            if handle.distance(pos) <= self.resize_handle_radius {
                return self.rotate_handle_begin(model, &id, pos);
            }
        }

        let Some(element) = model.element_at(pos) else {
            return false;
        };
        let id = element.id.clone();
        let mut manipulation = Manipulation::new(id.clone(), element.geometry);
        manipulation.pan = Some(PanTrack {
            start: pos,
            origin: element.geometry.position,
            moved: false,
        });

        model.select(&id);
        self.state = TransformState::Manipulating(manipulation);
        self.emit_started(model, id, TransformPhase::Dragging);
        true
    }

    /// Starts a resize on `id` regardless of where the pointer is
    pub fn begin_resize(&mut self, model: &mut EditorModel, id: &ElementId, pos: Pos2) -> bool {
        if self.is_active() {
            debug!("Ignoring resize of {id}, a gesture is already active");
            return false;
        }
        let Some(element) = model.find_element_by_id(id) else {
            debug!("Resize target {id} not found");
            return false;
        };
        let baseline = element.geometry;
        model.select(id);
        self.state = TransformState::Resizing(Resize {
            target: id.clone(),
            baseline,
            live: baseline,
            start: pos,
        });
        self.emit_started(model, id.clone(), TransformPhase::Resizing);
        true
    }

    /// Updates the live geometry. Non-finite positions are ignored
    pub fn pointer_move(&mut self, pos: Pos2) {
        if !is_finite_pos(pos) {
            trace!("Dropping non-finite pointer position");
            return;
        }
        match &mut self.state {
            TransformState::Idle => {}
            TransformState::Resizing(resize) => {
                let delta = pos - resize.start;
                resize.live.width = (resize.baseline.width + delta.x).max(self.min_size);
                resize.live.height = (resize.baseline.height + delta.y).max(self.min_size);
                trace!("resize {} -> {}x{}", resize.target, resize.live.width, resize.live.height);
            }
            TransformState::Manipulating(manipulation) => {
                if let Some(pan) = &mut manipulation.pan {
                    let delta: Vec2 = pos - pan.start;
                    manipulation.live.position = pan.origin + delta;
                    if delta != Vec2::ZERO {
                        pan.moved = true;
                    }
                    trace!("drag {} -> {:?}", manipulation.target, manipulation.live.position);
                } else if let Some(RotationGesture {
                    source: RotationSource::Handle { center, start_angle },
                    track,
                }) = &mut manipulation.rotation
                {
                    let delta = wrap_radians(angle_around(*center, pos) - *start_angle);
                    manipulation.live.rotation_degrees = track.update(delta);
                    trace!("handle rotate {} -> {}", manipulation.target, manipulation.live.rotation_degrees);
                }
            }
        }
    }

    /// Ends the pointer part of the gesture. Commits if nothing else is still running and
    /// returns the command that was executed.
    pub fn pointer_up(&mut self, model: &mut EditorModel) -> Option<Command> {
        match &mut self.state {
            TransformState::Idle => None,
            TransformState::Resizing(_) => self.finish(model),
            TransformState::Manipulating(manipulation) => {
                if let Some(pan) = manipulation.pan.take() {
                    manipulation.dragged |= pan.moved;
                } else if matches!(
                    manipulation.rotation,
                    Some(RotationGesture {
                        source: RotationSource::Handle { .. },
                        ..
                    })
                ) {
                    manipulation.rotation = None;
                }
                if manipulation.is_finished() {
                    self.finish(model)
                } else {
                    None
                }
            }
        }
    }

    /// Two-finger rotate/pinch on `id`. May join a drag already running on the same element.
    pub fn two_finger_begin(&mut self, model: &mut EditorModel, id: &ElementId) -> bool {
        let (snap, smoothing) = (self.snap_increment, self.smoothing);
        match &mut self.state {
            TransformState::Resizing(_) => {
                debug!("Ignoring rotation of {id} while resizing");
                false
            }
            TransformState::Manipulating(manipulation) => {
                if &manipulation.target != id || manipulation.rotation.is_some() {
                    debug!("Ignoring rotation of {id}, {} is being manipulated", manipulation.target);
                    return false;
                }
                manipulation.rotation = Some(RotationGesture {
                    source: RotationSource::TwoFinger { zoom: 1.0 },
                    track: RotationTrack::new(manipulation.live.rotation_degrees, snap, smoothing),
                });
                true
            }
            TransformState::Idle => {
                let Some(element) = model.find_element_by_id(id) else {
                    debug!("Rotation target {id} not found");
                    return false;
                };
                let mut manipulation = Manipulation::new(id.clone(), element.geometry);
                manipulation.rotation = Some(RotationGesture {
                    source: RotationSource::TwoFinger { zoom: 1.0 },
                    track: RotationTrack::new(element.geometry.rotation_degrees, snap, smoothing),
                });
                model.select(id);
                self.state = TransformState::Manipulating(manipulation);
                self.emit_started(model, id.clone(), TransformPhase::Rotating);
                true
            }
        }
    }

    /// Cumulative rotation in radians and zoom factor since the two-finger gesture began
    pub fn two_finger_update(&mut self, rotation_radians: f32, zoom: f32) {
        let min_scale = self.min_scale;
        let TransformState::Manipulating(manipulation) = &mut self.state else {
            return;
        };
        let Some(RotationGesture {
            source: RotationSource::TwoFinger { zoom: last_zoom },
            track,
        }) = &mut manipulation.rotation
        else {
            return;
        };

        manipulation.live.rotation_degrees = track.update(rotation_radians);
        if zoom.is_finite() && zoom > 0.0 {
            *last_zoom = zoom;
        }
        manipulation.live.scale = (manipulation.baseline.scale * *last_zoom).max(min_scale);
        trace!(
            "two-finger {} -> {} deg, x{}",
            manipulation.target, manipulation.live.rotation_degrees, manipulation.live.scale
        );
    }

    /// Ends the two-finger gesture, committing if nothing else is active
    pub fn two_finger_end(&mut self, model: &mut EditorModel) -> Option<Command> {
        let TransformState::Manipulating(manipulation) = &mut self.state else {
            return None;
        };
        if !matches!(
            manipulation.rotation,
            Some(RotationGesture {
                source: RotationSource::TwoFinger { .. },
                ..
            })
        ) {
            return None;
        }
        manipulation.rotation = None;
        if manipulation.is_finished() {
            self.finish(model)
        } else {
            None
        }
    }

    /// Rotation driven by dragging the handle above the element
    pub fn rotate_handle_begin(&mut self, model: &mut EditorModel, id: &ElementId, pos: Pos2) -> bool {
        if self.is_active() {
            debug!("Ignoring rotate handle on {id}, a gesture is already active");
            return false;
        }
        let Some(element) = model.find_element_by_id(id) else {
            debug!("Rotation target {id} not found");
            return false;
        };
        let baseline = element.geometry;
        let center = baseline.center();
        let mut manipulation = Manipulation::new(id.clone(), baseline);
        manipulation.rotation = Some(RotationGesture {
            source: RotationSource::Handle {
                center,
                start_angle: angle_around(center, pos),
            },
            track: RotationTrack::new(baseline.rotation_degrees, self.snap_increment, self.smoothing),
        });
        model.select(id);
        self.state = TransformState::Manipulating(manipulation);
        self.emit_started(model, id.clone(), TransformPhase::Rotating);
        true
    }

    /// Discards the live state. The model is left exactly as it was.
    pub fn cancel(&mut self, model: &mut EditorModel) {
        let Some(target) = self.target().cloned() else {
            return;
        };
        self.state = TransformState::Idle;
        debug!("Gesture on {target} cancelled");
        model
            .event_bus()
            .emit(EditorEvent::Transform(TransformEvent::Cancelled { element_id: target }));
    }

    /// Marks the start of a new input batch. A drag-end tap arrives in the same batch as its
    /// release, so suppression never outlives the batch.
    pub fn begin_frame(&mut self) {
        if std::mem::take(&mut self.suppress_next_tap) {
            trace!("No drag-end tap arrived, clearing suppression");
        }
    }

    /// A tap selects the topmost element under `pos`, or clears the selection when it hits
    /// nothing. The tap that closes a drag, in the same batch as the release, is swallowed.
    pub fn tap(&mut self, model: &mut EditorModel, pos: Pos2) {
        if std::mem::take(&mut self.suppress_next_tap) {
            trace!("Swallowing drag-end tap");
            return;
        }
        if !is_finite_pos(pos) {
            return;
        }
        let hit = model.element_at(pos).map(|element| element.id.clone());
        match hit {
            Some(id) if !self.is_active() => {
                model.select(&id);
            }
            Some(_) => {}
            None => {
                model.tap_background(self.is_active());
            }
        }
    }

    fn finish(&mut self, model: &mut EditorModel) -> Option<Command> {
        let (target, baseline, live, dragged) = match std::mem::take(&mut self.state) {
            TransformState::Idle => return None,
            TransformState::Manipulating(m) => (m.target, m.baseline, m.live, m.dragged),
            TransformState::Resizing(r) => (r.target, r.baseline, r.live, false),
        };
        self.suppress_next_tap = dragged;

        let patch = changed_fields(&baseline, &live);
        if patch.is_empty() {
            debug!("Gesture on {target} ended without change");
            self.emit_completed(model, target, false);
            return None;
        }

        let command = Command::UpdateElement {
            element_id: target.clone(),
            patch,
        };
        let changed = model.execute(command.clone()).is_changed();
        debug!("Committed gesture on {target}");
        self.emit_completed(model, target, changed);
        Some(command)
    }

    fn emit_started(&self, model: &EditorModel, element_id: ElementId, phase: TransformPhase) {
        debug!("Gesture started on {element_id}: {phase:?}");
        model
            .event_bus()
            .emit(EditorEvent::Transform(TransformEvent::Started { element_id, phase }));
    }

    fn emit_completed(&self, model: &EditorModel, element_id: ElementId, changed: bool) {
        model
            .event_bus()
            .emit(EditorEvent::Transform(TransformEvent::Completed { element_id, changed }));
    }
}

/// Patch holding only the fields that differ between `baseline` and `live`
fn changed_fields(baseline: &Geometry, live: &Geometry) -> ElementPatch {
    let mut patch = ElementPatch::new();
    if live.position != baseline.position {
        patch.position = Some(live.position);
    }
    if live.width != baseline.width {
        patch.width = Some(live.width);
    }
    if live.height != baseline.height {
        patch.height = Some(live.height);
    }
    let rotation = normalize_degrees(live.rotation_degrees);
    if rotation != normalize_degrees(baseline.rotation_degrees) {
        patch.rotation_degrees = Some(rotation);
    }
    if live.scale != baseline.scale {
        patch.scale = Some(live.scale);
    }
    patch
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn changed_fields_skips_identical_values() {
        let baseline = Geometry::new(Pos2::new(10.0, 10.0), 100.0, 50.0);
        let mut live = baseline;
        assert!(changed_fields(&baseline, &live).is_empty());

        live.position = Pos2::new(20.0, 10.0);
        live.rotation_degrees = 360.0;
        let patch = changed_fields(&baseline, &live);
        assert_eq!(patch.position, Some(Pos2::new(20.0, 10.0)));
        assert_eq!(patch.rotation_degrees, None);
        assert_eq!(patch.width, None);
    }

    #[test]
    fn handles_follow_rotation() {
        let mut geometry = Geometry::new(Pos2::new(0.0, 0.0), 100.0, 100.0);
        assert_eq!(resize_handle_position(&geometry), Pos2::new(100.0, 100.0));
        assert_eq!(rotate_handle_position(&geometry, 30.0), Pos2::new(50.0, -30.0));

        geometry.rotation_degrees = 90.0;
        let handle = rotate_handle_position(&geometry, 30.0);
        assert!((handle.x - 130.0).abs() < 0.001);
        assert!((handle.y - 50.0).abs() < 0.001);
    }
}
