use egui::Pos2;
use thumbnail_canvas::config::CanvasSize;
use thumbnail_canvas::element::{factory, ElementType, FontWeight, ShapeKind};
use thumbnail_canvas::state::{EditorModel, DEFAULT_TITLE, PLACEHOLDER_BACKGROUND};

#[test]
fn test_text_factory_defaults() {
    let text = factory::create_text("Title", Pos2::new(5.0, 5.0));
    assert_eq!(text.geometry.width, 300.0);
    assert_eq!(text.geometry.height, 100.0);
    assert_eq!(text.geometry.scale, 1.0);
    assert_eq!(text.opacity, 1.0);
    assert!(matches!(text.kind, ElementType::Text(ref t) if t.content == "Title"));
}

#[test]
fn test_shape_factory() {
    let shape = factory::create_shape(ShapeKind::Triangle, Pos2::new(1.0, 2.0));
    assert_eq!(shape.geometry.position, Pos2::new(1.0, 2.0));
    assert_eq!(shape.geometry.width, 100.0);
    let ElementType::Shape(shape) = shape.kind else {
        panic!("expected a shape");
    };
    assert_eq!(shape.shape_kind, ShapeKind::Triangle);
    assert_eq!(shape.border_color_hex, "transparent");
    assert!(shape.shadow.is_none());
}

#[test]
fn test_sticker_is_centered() {
    let sticker = factory::sticker("https://cdn.example/sticker.png", CanvasSize::default());
    assert_eq!(sticker.geometry.position, Pos2::new(565.0, 285.0));
    assert_eq!(sticker.geometry.width, 150.0);
    assert_eq!(sticker.geometry.height, 150.0);
    assert_eq!(sticker.geometry.center(), Pos2::new(640.0, 360.0));
}

#[test]
fn test_picked_image_is_clamped() {
    let canvas = CanvasSize::default();

    // Large source: a third of the canvas width at 16:9
    let large = factory::image_from_asset("file:///big.jpg", 4000.0, 3000.0, canvas);
    assert!((large.geometry.width - 1280.0 / 3.0).abs() < 0.001);
    assert!((large.geometry.height - 1280.0 / 3.0 * 9.0 / 16.0).abs() < 0.001);
    assert_eq!(large.geometry.position, Pos2::ZERO);

    // Small source keeps its own size
    let small = factory::image_from_asset("file:///small.jpg", 120.0, 80.0, canvas);
    assert_eq!(small.geometry.width, 120.0);
    assert_eq!(small.geometry.height, 80.0);
    let ElementType::Image(image) = small.kind else {
        panic!("expected an image");
    };
    assert_eq!(image.original_width, 120.0);
}

#[test]
fn test_reset_to_default_composition() {
    let mut model = EditorModel::new();
    model.add_element(factory::create_shape(ShapeKind::Circle, Pos2::ZERO));
    let history_before = model.history().past_len();

    model.reset_to_default();

    assert_eq!(model.elements().len(), 1);
    let title = model.elements()[0].as_text().unwrap();
    assert_eq!(title.content, DEFAULT_TITLE);
    assert_eq!(title.font_weight, FontWeight::Bold);
    assert!((title.font_size_pt - 32.0).abs() < 0.001);
    assert_eq!(model.elements()[0].position(), Pos2::new(50.0, 50.0));
    assert_eq!(model.background_image(), Some(PLACEHOLDER_BACKGROUND));
    // Bulk replace does not touch history
    assert_eq!(model.history().past_len(), history_before);
}
