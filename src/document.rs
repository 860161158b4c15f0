use std::collections::HashMap;

use crate::surface::{Rgba, Surface2d};

/// Fixed swatch ids consulted for the current drawing colors.
pub const STROKE_SWATCH_ID: &str = "strokeColorDiv";
pub const FILL_SWATCH_ID: &str = "fillColorDiv";

/// Id of the drawing surface the app shell registers.
pub const CANVAS_ID: &str = "canvas";

/// An element that can be looked up by id: a palette shape source with
/// a declared size, or a color swatch with a background color.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub id: String,
    pub size: [f32; 2],
    pub background: Option<Rgba>,
}

impl Element {
    pub fn source(id: impl Into<String>, size: [f32; 2]) -> Self {
        Self {
            id: id.into(),
            size,
            background: None,
        }
    }

    pub fn swatch(id: impl Into<String>, color: Rgba) -> Self {
        Self {
            id: id.into(),
            size: [0.0, 0.0],
            background: Some(color),
        }
    }
}

/// Lookup-by-id registry standing in for the platform document
/// boundary: elements plus drawing surfaces with their 2D contexts.
pub struct Document<S> {
    elements: HashMap<String, Element>,
    surfaces: HashMap<String, S>,
}

impl<S: Surface2d> Document<S> {
    pub fn new() -> Self {
        Self {
            elements: HashMap::new(),
            surfaces: HashMap::new(),
        }
    }

    pub fn insert_element(&mut self, element: Element) {
        self.elements.insert(element.id.clone(), element);
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn insert_surface(&mut self, id: impl Into<String>, surface: S) {
        self.surfaces.insert(id.into(), surface);
    }

    pub fn contains_surface(&self, id: &str) -> bool {
        self.surfaces.contains_key(id)
    }

    pub fn surface(&self, id: &str) -> Option<&S> {
        self.surfaces.get(id)
    }

    /// The mutable 2D context of a registered drawing surface.
    pub fn context_2d(&mut self, id: &str) -> Option<&mut S> {
        self.surfaces.get_mut(id)
    }

    pub fn set_background(&mut self, id: &str, color: Rgba) -> bool {
        match self.elements.get_mut(id) {
            Some(element) => {
                element.background = Some(color);
                true
            }
            None => false,
        }
    }

    pub fn swatch_color(&self, id: &str) -> Option<Rgba> {
        self.element(id)?.background
    }
}

impl<S: Surface2d> Default for Document<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::MeshSurface;

    #[test]
    fn looks_up_elements_and_surfaces_by_id() {
        let mut doc: Document<MeshSurface> = Document::new();
        doc.insert_element(Element::source("stroke_rect", [40.0, 40.0]));
        doc.insert_surface(CANVAS_ID, MeshSurface::new());

        assert_eq!(doc.element("stroke_rect").unwrap().size, [40.0, 40.0]);
        assert!(doc.element("fill_rect").is_none());
        assert!(doc.contains_surface(CANVAS_ID));
        assert!(doc.context_2d(CANVAS_ID).is_some());
        assert!(doc.context_2d("offscreen").is_none());
    }

    #[test]
    fn swatch_background_is_readable_and_updatable() {
        let mut doc: Document<MeshSurface> = Document::new();
        doc.insert_element(Element::swatch(STROKE_SWATCH_ID, [0.0, 0.0, 0.0, 1.0]));

        assert_eq!(doc.swatch_color(STROKE_SWATCH_ID), Some([0.0, 0.0, 0.0, 1.0]));
        assert!(doc.set_background(STROKE_SWATCH_ID, [1.0, 0.0, 0.0, 1.0]));
        assert_eq!(doc.swatch_color(STROKE_SWATCH_ID), Some([1.0, 0.0, 0.0, 1.0]));
        assert!(!doc.set_background(FILL_SWATCH_ID, [0.0, 1.0, 0.0, 1.0]));
        assert_eq!(doc.swatch_color(FILL_SWATCH_ID), None);
    }
}
