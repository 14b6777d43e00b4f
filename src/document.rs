use egui::Pos2;

use crate::element::Element;
use crate::id_generator::ElementId;

/// The elements and background of one editing session.
///
/// List order is insertion order; paint order is `z_index` ascending.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    elements: Vec<Element>,
    background_image: Option<String>,
}

impl Document {
    /// Creates an empty document with no background
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a document from existing elements
    pub fn with_elements(elements: Vec<Element>, background_image: Option<String>) -> Self {
        Self {
            elements,
            background_image,
        }
    }

    /// Elements in insertion order, not paint order
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub(crate) fn elements_mut(&mut self) -> &mut Vec<Element> {
        &mut self.elements
    }

    /// Swaps in a new element list and hands back the old one
    pub(crate) fn replace_elements(&mut self, elements: Vec<Element>) -> Vec<Element> {
        std::mem::replace(&mut self.elements, elements)
    }

    /// Background image reference, if any
    pub fn background_image(&self) -> Option<&str> {
        self.background_image.as_deref()
    }

    pub(crate) fn set_background_image(&mut self, background_image: Option<String>) {
        self.background_image = background_image;
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Checks whether an element with this id exists
    pub fn contains(&self, id: &ElementId) -> bool {
        self.index_of(id).is_some()
    }

    /// Position of the element in the list
    pub fn index_of(&self, id: &ElementId) -> Option<usize> {
        self.elements.iter().position(|element| &element.id == id)
    }

    /// Finds an element by id
    pub fn find_element_by_id(&self, id: &ElementId) -> Option<&Element> {
        self.elements.iter().find(|element| &element.id == id)
    }

    pub(crate) fn find_element_by_id_mut(&mut self, id: &ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|element| &element.id == id)
    }

    /// Elements sorted for painting. Ties keep list order.
    pub fn paint_order(&self) -> Vec<&Element> {
        let mut ordered: Vec<&Element> = self.elements.iter().collect();
        ordered.sort_by_key(|element| element.z_index);
        ordered
    }

    /// Topmost element whose rotated, scaled box contains `pos`
    pub fn element_at_position(&self, pos: Pos2) -> Option<&Element> {
        self.paint_order()
            .into_iter()
            .rev()
            .find(|element| element.hit_test(pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{factory, ShapeKind};

    fn element(id: &str, z_index: i32, x: f32) -> Element {
        Element::from_new(
            ElementId::new(id),
            z_index,
            factory::create_shape(ShapeKind::Rectangle, Pos2::new(x, 0.0)),
        )
    }

    #[test]
    fn paint_order_is_by_z_index_not_list_order() {
        let document = Document::with_elements(
            vec![element("a", 2, 0.0), element("b", 0, 0.0), element("c", 1, 0.0)],
            None,
        );
        let ids: Vec<&str> = document.paint_order().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["b", "c", "a"]);
    }

    #[test]
    fn hit_test_prefers_topmost() {
        let document = Document::with_elements(
            vec![element("top", 5, 0.0), element("bottom", 1, 50.0)],
            None,
        );
        let hit = document.element_at_position(Pos2::new(75.0, 50.0));
        assert_eq!(hit.map(|e| e.id.as_str()), Some("top"));

        let hit = document.element_at_position(Pos2::new(140.0, 50.0));
        assert_eq!(hit.map(|e| e.id.as_str()), Some("bottom"));

        assert!(document.element_at_position(Pos2::new(500.0, 500.0)).is_none());
    }
}
