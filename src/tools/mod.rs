pub mod rotation;
mod transform_controller;

pub use rotation::RotationTrack;
pub use transform_controller::{resize_handle_position, rotate_handle_position, TransformController};
