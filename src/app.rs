use egui::{Key, Pos2, Sense};
use log::{info, warn};

use crate::config::EditorConfig;
use crate::element::{factory, ShapeKind};
use crate::event::{EditorEvent, EventLog};
use crate::input::{route_frame, InputEvent, TwoFingerTracker};
use crate::renderer::Renderer;
use crate::state::EditorModel;
use crate::template::{self, TemplateMeta};
use crate::tools::TransformController;

/// Storage key for the encoded composition
const COMPOSITION_KEY: &str = "thumbnail_canvas.composition";
/// Environment variable naming an optional JSON config file
pub const CONFIG_ENV_VAR: &str = "THUMBNAIL_CANVAS_CONFIG";

/// Demo host: draws the canvas, feeds pointer and touch input to the router, and keeps
/// the composition in eframe storage between runs.
pub struct ThumbnailApp {
    model: EditorModel,
    controller: TransformController,
    renderer: Renderer,
    meta: TemplateMeta,
    events: EventLog,
    two_finger: Option<TwoFingerTracker>,
    last_pointer: Option<Pos2>,
}

impl ThumbnailApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut app = Self::with_config(load_config());

        let restored = cc
            .storage
            .and_then(|storage| eframe::get_value::<String>(storage, COMPOSITION_KEY));
        match restored.map(|json| template::decode_str(&json)) {
            Some(Ok(template)) => app.meta = template.open_in(&mut app.model),
            Some(Err(err)) => {
                warn!("Discarding stored composition: {err}");
                app.model.reset_to_default();
            }
            None => app.model.reset_to_default(),
        }
        app
    }

    /// Creates an empty app without touching storage
    pub fn with_config(config: EditorConfig) -> Self {
        let controller = TransformController::new(&config);
        let meta = TemplateMeta {
            canvas_size: config.canvas_size,
            ..TemplateMeta::new("Untitled", "thumbnail")
        };
        let model = EditorModel::with_config(config);
        let events = EventLog::new();
        model.subscribe(events.clone());

        Self {
            model,
            controller,
            renderer: Renderer::new(),
            meta,
            events,
            two_finger: None,
            last_pointer: None,
        }
    }

    fn toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.add_enabled(self.model.can_undo(), egui::Button::new("Undo")).clicked() {
                self.model.undo();
            }
            if ui.add_enabled(self.model.can_redo(), egui::Button::new("Redo")).clicked() {
                self.model.redo();
            }
            if ui.button("Reset").clicked() {
                self.controller.cancel(&mut self.model);
                self.model.reset_to_default();
            }

            ui.separator();

            let position = factory::DEFAULT_INSERT_POSITION;
            if ui.button("Text").clicked() {
                self.model.add_element(factory::create_text("New text", position));
            }
            for (label, kind) in [
                ("Rectangle", ShapeKind::Rectangle),
                ("Circle", ShapeKind::Circle),
                ("Triangle", ShapeKind::Triangle),
            ] {
                if ui.button(label).clicked() {
                    self.model.add_element(factory::create_shape(kind, position));
                }
            }

            ui.separator();

            let selected = self.model.selected_id().cloned();
            let enabled = selected.is_some() && !self.controller.is_active();
            let to_front = ui.add_enabled(enabled, egui::Button::new("Bring to front")).clicked();
            let to_back = ui.add_enabled(enabled, egui::Button::new("Send to back")).clicked();
            let delete = ui.add_enabled(enabled, egui::Button::new("Delete")).clicked();
            if let Some(id) = selected {
                if to_front {
                    self.model.bring_to_front(&id);
                } else if to_back {
                    self.model.send_to_back(&id);
                } else if delete {
                    self.model.remove_element(&id);
                }
            }
        });
    }

    fn status_bar(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(format!("{} element(s)", self.model.document().len()));
            ui.separator();
            ui.label(format!("{:?}", self.controller.phase()));
            ui.separator();
            let last = self
                .events
                .last()
                .map(|event| describe(&event))
                .unwrap_or_default();
            ui.label(last);
        });
    }

    /// Translates this frame's egui input into canvas events
    fn collect_input(&mut self, ctx: &egui::Context, response: &egui::Response) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let to_canvas = |pos: Pos2| self.renderer.to_canvas(pos);

        let touch = ctx.multi_touch();
        match (touch, &mut self.two_finger) {
            (Some(touch), tracker @ None) => {
                let mut started = TwoFingerTracker::default();
                started.accumulate(touch.rotation_delta, touch.zoom_delta);
                *tracker = Some(started);
                events.push(InputEvent::TwoFingerBegin {
                    center: to_canvas(touch.center_pos),
                });
            }
            (Some(touch), Some(tracker)) => {
                let (rotation_radians, zoom) =
                    tracker.accumulate(touch.rotation_delta, touch.zoom_delta);
                events.push(InputEvent::TwoFingerUpdate {
                    rotation_radians,
                    zoom,
                });
            }
            (None, tracker @ Some(_)) => {
                *tracker = None;
                events.push(InputEvent::TwoFingerEnd);
            }
            (None, None) => {}
        }

        let pointer = response.interact_pointer_pos().map(to_canvas);
        if response.drag_started() {
            // The drag starts past egui's threshold; hit test where the press landed
            let press = ctx.input(|i| i.pointer.press_origin()).map(to_canvas);
            if let Some(pos) = press.or(pointer) {
                events.push(InputEvent::PointerDown { pos });
            }
        } else if response.dragged() {
            if let Some(pos) = pointer {
                events.push(InputEvent::PointerMove { pos });
            }
        }
        if response.drag_stopped() {
            if let Some(pos) = pointer.or(self.last_pointer) {
                events.push(InputEvent::PointerUp { pos });
            }
        }
        if response.clicked() {
            if let Some(pos) = pointer {
                events.push(InputEvent::Tap { pos });
            }
        }
        if ctx.input(|i| i.key_pressed(Key::Escape)) {
            events.push(InputEvent::Cancel);
        }

        if pointer.is_some() {
            self.last_pointer = pointer;
        }
        events
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        let (undo, redo) = ctx.input(|i| {
            let command = i.modifiers.command;
            (
                command && !i.modifiers.shift && i.key_pressed(Key::Z),
                command && (i.key_pressed(Key::Y) || (i.modifiers.shift && i.key_pressed(Key::Z))),
            )
        });
        if self.controller.is_active() {
            return;
        }
        if undo {
            self.model.undo();
        } else if redo {
            self.model.redo();
        }
    }
}

impl eframe::App for ThumbnailApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        match template::encode_string(&self.meta, self.model.document()) {
            Ok(json) => {
                eframe::set_value(storage, COMPOSITION_KEY, &json);
                info!("Stored composition with {} element(s)", self.model.document().len());
            }
            Err(err) => warn!("Composition not stored: {err}"),
        }
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| self.toolbar(ui));
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| self.status_bar(ui));
        self.handle_shortcuts(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            let (response, painter) =
                ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
            self.renderer
                .fit(response.rect, self.model.config().canvas_size);

            let events = self.collect_input(ctx, &response);
            route_frame(&mut self.controller, &mut self.model, events);

            self.renderer.render(&painter, &self.model, &self.controller);
        });
    }
}

fn load_config() -> EditorConfig {
    let Ok(path) = std::env::var(CONFIG_ENV_VAR) else {
        return EditorConfig::default();
    };
    EditorConfig::load(&path).unwrap_or_else(|err| {
        warn!("Using default config, {path} could not be loaded: {err}");
        EditorConfig::default()
    })
}

fn describe(event: &EditorEvent) -> String {
    match event {
        EditorEvent::Document(event) => format!("document: {event:?}"),
        EditorEvent::Selection(event) => format!("selection: {event:?}"),
        EditorEvent::Transform(event) => format!("transform: {event:?}"),
        EditorEvent::History { can_undo, can_redo } => {
            format!("history: undo={can_undo} redo={can_redo}")
        }
    }
}
