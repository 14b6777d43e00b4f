#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod command;
pub mod config;
pub mod document;
pub mod element;
pub mod event;
pub mod id_generator;
pub mod input;
pub mod renderer;
pub mod selection;
pub mod services;
pub mod state;
pub mod template;
pub mod tools;

pub use app::ThumbnailApp;
pub use command::{Command, History};
pub use config::{CanvasSize, EditorConfig};
pub use document::Document;
pub use element::{Element, ElementPatch, ElementType, NewElement};
pub use id_generator::ElementId;
pub use input::{route_event, route_frame, InputEvent};
pub use renderer::Renderer;
pub use state::{CommandOutcome, EditorModel};
pub use tools::TransformController;
