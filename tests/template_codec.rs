use egui::Pos2;
use serde_json::json;
use thumbnail_canvas::config::CanvasSize;
use thumbnail_canvas::document::Document;
use thumbnail_canvas::element::{
    factory, Element, ElementType, FontStyle, FontWeight, Shadow, ShapeKind, TextAlign,
    TextDecoration,
};
use thumbnail_canvas::id_generator::ElementId;
use thumbnail_canvas::state::EditorModel;
use thumbnail_canvas::template::{self, DecodeError, EncodeError, TemplateMeta};

fn create_test_document() -> Document {
    let mut title = Element::from_new(
        ElementId::new("title"),
        2,
        factory::create_text("Episode 12", Pos2::new(40.0, 30.0)).rotated(15.0),
    );
    if let ElementType::Text(text) = &mut title.kind {
        text.font_weight = FontWeight::Bold;
        text.font_style = FontStyle::Italic;
        text.text_align = TextAlign::Center;
        text.text_decoration = TextDecoration::Both;
        text.color_hex = "#ffcc00".to_owned();
    }

    let photo = Element::from_new(
        ElementId::new("photo"),
        0,
        factory::create_image("https://cdn.example/photo.jpg", Pos2::new(0.0, 0.0), 640.0, 360.0)
            .scaled(1.25),
    );

    let mut badge = Element::from_new(
        ElementId::new("badge"),
        1,
        factory::create_shape(ShapeKind::Rectangle, Pos2::new(900.0, 500.0)),
    );
    badge.opacity = 0.8;
    if let ElementType::Shape(shape) = &mut badge.kind {
        shape.corner_radius = 12.0;
        shape.border_width = 2.0;
        shape.border_color_hex = "#ffffff".to_owned();
        shape.shadow = Some(Shadow::default());
    }

    Document::with_elements(
        vec![title, photo, badge],
        Some("https://cdn.example/background.png".to_owned()),
    )
}

#[test]
fn test_round_trip() {
    let document = create_test_document();
    let meta = TemplateMeta {
        thumbnail: Some("https://cdn.example/thumb.png".to_owned()),
        is_public: false,
        ..TemplateMeta::new("Gaming", "youtube")
    };

    let encoded = template::encode(&meta, &document).unwrap();
    let decoded = template::decode(&encoded).unwrap();
    assert_eq!(decoded.document, document);
    assert_eq!(decoded.meta, meta);

    let text = template::encode_string(&meta, &document).unwrap();
    assert_eq!(template::decode_str(&text).unwrap().document, document);
}

#[test]
fn test_encoded_wire_keys() {
    let encoded = template::encode(&TemplateMeta::new("n", "c"), &create_test_document()).unwrap();
    let title = &encoded["elements"][0];
    assert_eq!(title["type"], "text");
    assert_eq!(title["fontStyle"], "bold-italic");
    assert_eq!(title["textDecorationLine"], "underline line-through");
    assert_eq!(title["alignment"], "center");
    assert_eq!(title["zIndex"], 2);

    let badge = &encoded["elements"][2];
    assert_eq!(badge["shapeType"], "rectangle");
    assert_eq!(badge["borderRadius"], 12.0);
    assert_eq!(badge["shadow"]["color"], "rgba(0, 0, 0, 0.5)");

    assert_eq!(encoded["backgroundImage"], "https://cdn.example/background.png");
    assert_eq!(encoded["canvasSize"]["width"], 1280.0);
}

#[test]
fn test_image_size_fallback() {
    let value = json!({
        "name": "t",
        "category": "c",
        "elements": [
            { "type": "image", "uri": "https://cdn.example/a.png", "position": { "x": 5, "y": 6 }, "size": 120 }
        ]
    });
    let decoded = template::decode(&value).unwrap();
    let image = &decoded.document.elements()[0];
    assert_eq!(image.geometry.width, 120.0);
    assert_eq!(image.geometry.height, 120.0);
    assert_eq!(image.rotation_degrees(), 0.0);
    let ElementType::Image(data) = &image.kind else {
        panic!("expected an image");
    };
    assert_eq!(data.original_width, 120.0);
}

#[test]
fn test_shape_without_size_defaults_to_100() {
    let value = json!({
        "elements": [
            { "type": "shape", "shapeType": "circle", "position": { "x": 0, "y": 0 } }
        ]
    });
    let decoded = template::decode(&value).unwrap();
    let circle = &decoded.document.elements()[0];
    assert_eq!(circle.geometry.width, 100.0);
    assert_eq!(circle.geometry.height, 100.0);
    let shape = circle.as_shape().unwrap();
    assert_eq!(shape.fill_color_hex, "#000000");
    assert_eq!(shape.border_color_hex, "transparent");
}

#[test]
fn test_text_defaults_and_ignored_keys() {
    let value = json!({
        "_id": "65f0c1",
        "createdAt": "2024-03-01T10:00:00Z",
        "elements": [
            { "type": "text", "position": { "x": 1, "y": 2 }, "_id": "abc" },
            { "type": "text", "position": { "x": 3, "y": 4 }, "fontStyle": "italic", "fontWeight": 700 }
        ]
    });
    let decoded = template::decode(&value).unwrap();
    let [plain, styled] = decoded.document.elements() else {
        panic!("expected two elements");
    };

    let text = plain.as_text().unwrap();
    assert_eq!(text.content, "");
    assert_eq!(text.font_family, "serif");
    assert!((text.font_size_pt - 24.0).abs() < 0.001);
    assert_eq!(text.color_hex, "#000000");
    assert_eq!(text.text_align, TextAlign::Left);
    assert_eq!(plain.geometry.width, 300.0);
    assert_eq!(plain.geometry.height, 100.0);
    assert_eq!(plain.z_index, 0);
    assert!(!plain.id.as_str().is_empty());

    let text = styled.as_text().unwrap();
    assert_eq!(text.font_weight, FontWeight::Bold);
    assert_eq!(text.font_style, FontStyle::Italic);
    assert_eq!(styled.z_index, 1);

    assert_eq!(decoded.meta.canvas_size, CanvasSize::default());
    assert!(decoded.meta.is_public);
    assert_eq!(decoded.document.background_image(), None);
}

#[test]
fn test_partial_shadow_gets_defaults() {
    let value = json!({
        "elements": [{
            "type": "shape", "shapeType": "triangle", "position": { "x": 0, "y": 0 },
            "shadow": { "dx": 2 }
        }]
    });
    let decoded = template::decode(&value).unwrap();
    let shadow = decoded.document.elements()[0].as_shape().unwrap().shadow.clone().unwrap();
    assert_eq!(shadow.dx, 2.0);
    assert_eq!(shadow.dy, 5.0);
    assert_eq!(shadow.blur, 10.0);
    assert_eq!(shadow.color_hex, "rgba(0, 0, 0, 0.5)");
}

#[test]
fn test_decode_errors() {
    assert!(matches!(template::decode(&json!([1, 2])), Err(DecodeError::NotAnObject)));
    assert!(matches!(
        template::decode(&json!({ "elements": { "type": "text" } })),
        Err(DecodeError::ElementsNotAList)
    ));
    assert!(matches!(
        template::decode(&json!({ "elements": [{ "position": { "x": 0, "y": 0 } }] })),
        Err(DecodeError::MissingField { index: 0, field: "type" })
    ));
    assert!(matches!(
        template::decode(&json!({ "elements": [{ "type": "image", "position": { "x": 0, "y": 0 } }] })),
        Err(DecodeError::MissingField { index: 0, field: "uri" })
    ));
    assert!(matches!(
        template::decode(&json!({ "elements": [
            { "type": "text", "position": { "x": 0, "y": 0 } },
            { "type": "shape", "shapeType": "hexagon", "position": { "x": 0, "y": 0 } }
        ] })),
        Err(DecodeError::InvalidValue { index: 1, field: "shapeType", .. })
    ));
    assert!(matches!(
        template::decode(&json!({ "elements": [{ "type": "video", "position": { "x": 0, "y": 0 } }] })),
        Err(DecodeError::InvalidValue { field: "type", .. })
    ));
    assert!(matches!(
        template::decode(&json!({ "elements": [{ "type": "text", "position": "top-left" }] })),
        Err(DecodeError::InvalidElement { index: 0, .. })
    ));
    assert!(matches!(template::decode_str("{ not json"), Err(DecodeError::Json(_))));
}

#[test]
fn test_encode_rejects_image_without_source() {
    let blank = Element::from_new(
        ElementId::new("blank"),
        0,
        factory::create_image("  ", Pos2::ZERO, 10.0, 10.0),
    );
    let document = Document::with_elements(vec![blank], None);
    let result = template::encode(&TemplateMeta::default(), &document);
    assert!(matches!(
        result,
        Err(EncodeError::MissingImageSource { id }) if id.as_str() == "blank"
    ));
}

#[test]
fn test_open_template_replaces_session() {
    let mut model = EditorModel::new();
    model.add_element(factory::create_text("scratch", Pos2::ZERO));
    assert!(model.can_undo());

    let encoded = template::encode(&TemplateMeta::new("n", "c"), &create_test_document()).unwrap();
    let meta = template::decode(&encoded).unwrap().open_in(&mut model);

    assert_eq!(meta.name, "n");
    assert_eq!(model.elements().len(), 3);
    assert_eq!(model.background_image(), Some("https://cdn.example/background.png"));
    assert!(!model.can_undo());
    assert!(!model.can_redo());
}
