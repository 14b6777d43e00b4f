use egui::{Pos2, Vec2};
use thumbnail_canvas::element::{factory, Element, ElementPatch, ShapeKind};
use thumbnail_canvas::id_generator::ElementId;

fn create_test_text() -> Element {
    Element::from_new(
        ElementId::new("text-1"),
        0,
        factory::create_text("Hello", Pos2::new(10.0, 20.0)),
    )
}

fn create_test_shape() -> Element {
    Element::from_new(
        ElementId::new("shape-1"),
        1,
        factory::create_shape(ShapeKind::Rectangle, Pos2::new(0.0, 0.0)),
    )
}

#[test]
fn test_element_type_names() {
    assert_eq!(create_test_text().element_type(), "text");
    assert_eq!(create_test_shape().element_type(), "shape");

    let image = Element::from_new(
        ElementId::new("image-1"),
        2,
        factory::create_image("file:///tmp/a.png", Pos2::ZERO, 40.0, 30.0),
    );
    assert_eq!(image.element_type(), "image");
}

#[test]
fn test_element_rect() {
    let text = create_test_text();
    let rect = text.rect();
    assert_eq!(rect.min, Pos2::new(10.0, 20.0));
    assert_eq!(rect.size(), Vec2::new(300.0, 100.0));
}

#[test]
fn test_rotated_rect_grows() {
    let mut shape = create_test_shape();
    shape.geometry.rotation_degrees = 45.0;
    let rect = shape.rect();
    let diagonal = 100.0 * std::f32::consts::SQRT_2;
    assert!((rect.width() - diagonal).abs() < 0.01);
    assert!((rect.height() - diagonal).abs() < 0.01);
    assert!((rect.center().x - 50.0).abs() < 0.001);
}

#[test]
fn test_scaled_hit_test_about_center() {
    let mut shape = create_test_shape();
    shape.geometry.scale = 0.5;
    // Scaled box is 25..75 on both axes
    assert!(shape.hit_test(Pos2::new(50.0, 50.0)));
    assert!(shape.hit_test(Pos2::new(74.0, 26.0)));
    assert!(!shape.hit_test(Pos2::new(10.0, 10.0)));
}

#[test]
fn test_patch_merges_and_reports_change() {
    let mut text = create_test_text();
    let patch = ElementPatch::new()
        .position(Pos2::new(70.0, 40.0))
        .content("Updated")
        .rotation(-90.0);
    assert!(patch.apply_to(&mut text));

    assert_eq!(text.position(), Pos2::new(70.0, 40.0));
    assert!((text.rotation_degrees() - 270.0).abs() < 0.001);
    assert_eq!(text.as_text().unwrap().content, "Updated");

    // Applying the same patch again changes nothing
    assert!(!patch.apply_to(&mut text));
}

#[test]
fn test_patch_ignores_fields_for_other_variants() {
    let mut shape = create_test_shape();
    let before = shape.clone();
    let patch = ElementPatch::new().content("not a text").source_uri("file:///nope.png");
    assert!(!patch.apply_to(&mut shape));
    assert_eq!(shape, before);
}

#[test]
fn test_patch_clamps_opacity() {
    let mut shape = create_test_shape();
    assert!(ElementPatch::new().opacity(0.5).apply_to(&mut shape));
    assert!(ElementPatch::new().opacity(3.0).apply_to(&mut shape));
    assert!((shape.opacity - 1.0).abs() < 0.001);
    // Already at 1.0, so clamping to 1.0 again is not a change
    assert!(!ElementPatch::new().opacity(1.5).apply_to(&mut shape));
}
