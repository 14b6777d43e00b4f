use std::path::PathBuf;

use egui::Pos2;
use futures::executor::block_on;
use futures::future::BoxFuture;
use parking_lot::Mutex;
use serde_json::{json, Value};
use thumbnail_canvas::element::{factory, ElementType, ShapeKind};
use thumbnail_canvas::services::{
    self, BackgroundRemover, ImageResolver, LocalImageProbe, ResolvedImage, ServiceError,
    TemplateStore,
};
use thumbnail_canvas::state::EditorModel;
use thumbnail_canvas::template::TemplateMeta;

struct FakeRemover {
    result: Result<String, String>,
}

impl BackgroundRemover for FakeRemover {
    fn remove_background<'a>(&'a self, _uri: &'a str) -> BoxFuture<'a, Result<String, ServiceError>> {
        let result = self.result.clone().map_err(ServiceError::Transport);
        Box::pin(async move { result })
    }
}

#[derive(Default)]
struct MemoryStore {
    templates: Mutex<Vec<(String, Value)>>,
    saved: Mutex<Vec<Value>>,
}

impl MemoryStore {
    fn with_template(id: &str, template: Value) -> Self {
        let store = Self::default();
        store.templates.lock().push((id.to_owned(), template));
        store
    }
}

impl TemplateStore for MemoryStore {
    fn load_template<'a>(&'a self, template_id: &'a str) -> BoxFuture<'a, Result<Value, ServiceError>> {
        Box::pin(async move {
            self.templates
                .lock()
                .iter()
                .find(|(id, _)| id == template_id)
                .map(|(_, value)| value.clone())
                .ok_or_else(|| ServiceError::NotFound(template_id.to_owned()))
        })
    }

    fn save_template(&self, template: Value) -> BoxFuture<'_, Result<Value, ServiceError>> {
        Box::pin(async move {
            self.saved.lock().push(template.clone());
            Ok(template)
        })
    }
}

struct FixedResolver {
    width: u32,
    height: u32,
}

impl ImageResolver for FixedResolver {
    fn resolve<'a>(&'a self, uri: &'a str) -> BoxFuture<'a, Result<ResolvedImage, ServiceError>> {
        Box::pin(async move {
            Ok(ResolvedImage {
                uri: uri.to_owned(),
                width: self.width,
                height: self.height,
            })
        })
    }
}

fn model_with_image() -> (EditorModel, thumbnail_canvas::ElementId) {
    let mut model = EditorModel::new();
    let id = model.add_element(factory::create_image(
        "https://cdn.example/portrait.jpg",
        Pos2::new(10.0, 10.0),
        200.0,
        300.0,
    ));
    (model, id)
}

fn temp_png(width: u32, height: u32) -> PathBuf {
    let path = std::env::temp_dir().join(format!("thumbnail-canvas-{}.png", uuid::Uuid::new_v4()));
    image::RgbImage::new(width, height).save(&path).unwrap();
    path
}

#[test]
fn test_background_removal_replaces_source() {
    let (mut model, id) = model_with_image();
    let remover = FakeRemover {
        result: Ok("https://cdn.example/portrait-cutout.png".to_owned()),
    };

    let changed = block_on(services::apply_background_removal(&mut model, &id, &remover)).unwrap();
    assert!(changed);

    let element = model.find_element_by_id(&id).unwrap();
    let ElementType::Image(image) = &element.kind else {
        panic!("expected an image");
    };
    assert_eq!(image.source_uri, "https://cdn.example/portrait-cutout.png");
    assert!(model.undo());
}

#[test]
fn test_background_removal_failure_leaves_element() {
    let (mut model, id) = model_with_image();
    let before = model.elements().to_vec();
    let past = model.history().past_len();
    let remover = FakeRemover {
        result: Err("service unavailable".to_owned()),
    };

    let result = block_on(services::apply_background_removal(&mut model, &id, &remover));
    assert!(matches!(result, Err(ServiceError::Transport(_))));
    assert_eq!(model.elements(), before.as_slice());
    assert_eq!(model.history().past_len(), past);
}

#[test]
fn test_background_removal_rejects_non_images() {
    let mut model = EditorModel::new();
    let shape = model.add_element(factory::create_shape(ShapeKind::Circle, Pos2::ZERO));
    let remover = FakeRemover {
        result: Ok("unused".to_owned()),
    };

    let result = block_on(services::apply_background_removal(&mut model, &shape, &remover));
    assert!(matches!(result, Err(ServiceError::Rejected(_))));

    let missing = thumbnail_canvas::ElementId::new("gone");
    let result = block_on(services::apply_background_removal(&mut model, &missing, &remover));
    assert!(matches!(result, Err(ServiceError::NotFound(_))));
}

#[test]
fn test_add_picked_image_is_clamped() {
    let mut model = EditorModel::new();
    let resolver = FixedResolver {
        width: 3000,
        height: 2000,
    };

    let id = block_on(services::add_picked_image(&mut model, "file:///photo.jpg", &resolver)).unwrap();
    let element = model.find_element_by_id(&id).unwrap();
    assert!((element.geometry.width - 1280.0 / 3.0).abs() < 0.001);
    assert!((element.geometry.height - 240.0).abs() < 0.001);
    assert_eq!(element.position(), Pos2::ZERO);
}

#[test]
fn test_add_sticker_is_centered() {
    let mut model = EditorModel::new();
    let id = services::add_sticker(&mut model, "https://cdn.example/star.png");
    let sticker = model.find_element_by_id(&id).unwrap();
    assert_eq!(sticker.geometry.center(), Pos2::new(640.0, 360.0));
}

#[test]
fn test_open_template_from_store() {
    let store = MemoryStore::with_template(
        "t-1",
        json!({
            "name": "Podcast",
            "category": "podcast",
            "backgroundImage": "https://cdn.example/studio.jpg",
            "elements": [
                { "type": "text", "content": "Ep. 4", "position": { "x": 40, "y": 40 } },
                { "type": "shape", "shapeType": "circle", "position": { "x": 900, "y": 400 } }
            ]
        }),
    );
    let (mut model, _) = model_with_image();

    let meta = block_on(services::open_template(&mut model, &store, "t-1")).unwrap();
    assert_eq!(meta.name, "Podcast");
    assert_eq!(model.elements().len(), 2);
    assert_eq!(model.background_image(), Some("https://cdn.example/studio.jpg"));
    assert!(!model.can_undo());

    let missing = block_on(services::open_template(&mut model, &store, "t-2"));
    assert!(matches!(missing, Err(ServiceError::NotFound(_))));
}

#[test]
fn test_open_invalid_template_keeps_session() {
    let store = MemoryStore::with_template("bad", json!({ "elements": "oops" }));
    let (mut model, _) = model_with_image();
    let before = model.elements().to_vec();

    let result = block_on(services::open_template(&mut model, &store, "bad"));
    assert!(matches!(result, Err(ServiceError::InvalidTemplate(_))));
    assert_eq!(model.elements(), before.as_slice());
}

#[test]
fn test_save_session_encodes_before_storing() {
    let store = MemoryStore::default();
    let (model, _) = model_with_image();

    let saved = block_on(services::save_session(&model, &TemplateMeta::new("Mine", "custom"), &store)).unwrap();
    assert_eq!(saved["name"], "Mine");
    assert_eq!(saved["elements"][0]["type"], "image");
    assert_eq!(store.saved.lock().len(), 1);

    let mut blank = EditorModel::new();
    blank.add_element(factory::create_image("", Pos2::ZERO, 10.0, 10.0));
    let result = block_on(services::save_session(&blank, &TemplateMeta::default(), &store));
    assert!(matches!(result, Err(ServiceError::Encode(_))));
    assert_eq!(store.saved.lock().len(), 1);
}

#[test]
fn test_local_probe_reads_dimensions() {
    let path = temp_png(64, 32);
    let uri = format!("file://{}", path.display());

    let resolved = block_on(LocalImageProbe::new().resolve(&uri)).unwrap();
    assert_eq!((resolved.width, resolved.height), (64, 32));
    assert_eq!(resolved.uri, uri);

    let limited = LocalImageProbe::with_max_dimension(48).probe(&uri);
    assert!(matches!(
        limited,
        Err(ServiceError::TooLarge { width: 64, height: 32, limit: 48 })
    ));

    std::fs::remove_file(path).unwrap();
}

#[test]
fn test_local_probe_missing_file() {
    let result = LocalImageProbe::new().probe("/definitely/not/here.png");
    assert!(matches!(result, Err(ServiceError::NotFound(_))));
}
