//! Drag-and-drop handling from the shape palette to the canvas. Does
//! not handle manipulation of shapes already on the canvas.

use crate::document::{Document, FILL_SWATCH_ID, STROKE_SWATCH_ID};
use crate::drawing::{PlacedShape, ShapeKind, SourceId, SourceIdError, StyleKind};
use crate::history::HistorySink;
use crate::math::TAU;
use crate::payload::{DataTransfer, DragPayload, PayloadError};
use crate::surface::Surface2d;

/// Dropped shapes are drawn at twice the source element's size.
pub const SIZE_SCALE: f32 = 2.0;
/// Margin nudging the dropped shape away from the pointer, applied at
/// the same scale as the size.
pub const DROP_MARGIN: f32 = 10.0;

#[derive(Debug, thiserror::Error)]
pub enum DropError {
    #[error("event object is not defined")]
    MissingEvent,
    #[error(transparent)]
    Payload(#[from] PayloadError),
    #[error("drag payload could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("no drawing surface with id `{0}`")]
    UnknownSurface(String),
    #[error("no source element with id `{0}`")]
    UnknownElement(String),
    #[error(transparent)]
    SourceId(#[from] SourceIdError),
    #[error("no color swatch with id `{0}`")]
    MissingSwatch(&'static str),
}

/// A drag lifecycle event: the id of the element it targets, the
/// pointer position within that target, and the transfer channel
/// shared between dragstart and drop.
#[derive(Debug, Clone, Default)]
pub struct DragEvent {
    pub target_id: String,
    pub pointer: [f32; 2],
    pub data_transfer: DataTransfer,
    prevented: u32,
}

impl DragEvent {
    pub fn new(target_id: impl Into<String>, pointer: [f32; 2]) -> Self {
        Self {
            target_id: target_id.into(),
            pointer,
            data_transfer: DataTransfer::new(),
            prevented: 0,
        }
    }

    pub fn prevent_default(&mut self) {
        self.prevented += 1;
    }

    pub fn default_prevented(&self) -> bool {
        self.prevented > 0
    }

    pub fn times_prevented(&self) -> u32 {
        self.prevented
    }
}

/// Destination geometry for a dropped shape: position offset by the
/// scaled drag-origin offset plus the margin, sized at twice the
/// source's declared dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Placement {
    pub fn from_drop(pointer: [f32; 2], offset: [f32; 2], source_size: [f32; 2]) -> Self {
        Self {
            x: pointer[0] - offset[0] * SIZE_SCALE + DROP_MARGIN * SIZE_SCALE,
            y: pointer[1] - offset[1] * SIZE_SCALE + DROP_MARGIN * SIZE_SCALE,
            width: source_size[0] * SIZE_SCALE,
            height: source_size[1] * SIZE_SCALE,
        }
    }
}

/// Handles the initial dragging action from the palette: stores the
/// target id and pointer offset into the event's transfer channel.
pub fn begin_drag(event: Option<&mut DragEvent>) -> Result<(), DropError> {
    let event = event.ok_or(DropError::MissingEvent)?;

    let payload = DragPayload {
        source_id: event.target_id.clone(),
        offset_x: event.pointer[0],
        offset_y: event.pointer[1],
    };
    event.data_transfer.set_payload(&payload)?;
    Ok(())
}

/// Handles dragover on the canvas: the default is to reject the drop,
/// so suppress it.
pub fn allow_drop(event: Option<&mut DragEvent>) -> Result<(), DropError> {
    let event = event.ok_or(DropError::MissingEvent)?;
    event.prevent_default();
    Ok(())
}

/// Handles a drop into the canvas: draws the dragged shape at twice
/// its source size and records the placement.
pub fn drop_into_canvas<S: Surface2d>(
    event: Option<&mut DragEvent>,
    document: &mut Document<S>,
    history: &mut dyn HistorySink,
) -> Result<PlacedShape, DropError> {
    let event = event.ok_or(DropError::MissingEvent)?;
    // the default drop action navigates away from the page
    event.prevent_default();

    // a new placement means there is no longer a path to redo
    history.invalidate_redo();

    if !document.contains_surface(&event.target_id) {
        return Err(DropError::UnknownSurface(event.target_id.clone()));
    }

    let payload = event.data_transfer.payload()?;
    let source = document
        .element(&payload.source_id)
        .ok_or_else(|| DropError::UnknownElement(payload.source_id.clone()))?;
    let source_size = source.size;
    let source_id: SourceId = payload.source_id.parse()?;

    let placement = Placement::from_drop(
        event.pointer,
        [payload.offset_x, payload.offset_y],
        source_size,
    );

    let stroke_color = document
        .swatch_color(STROKE_SWATCH_ID)
        .ok_or(DropError::MissingSwatch(STROKE_SWATCH_ID))?;
    let fill_color = document
        .swatch_color(FILL_SWATCH_ID)
        .ok_or(DropError::MissingSwatch(FILL_SWATCH_ID))?;

    let context = document
        .context_2d(&event.target_id)
        .ok_or_else(|| DropError::UnknownSurface(event.target_id.clone()))?;
    context.set_stroke_style(stroke_color);
    context.set_fill_style(fill_color);

    match source_id.shape {
        ShapeKind::Rect => match source_id.style {
            StyleKind::Stroke => {
                context.stroke_rect(placement.x, placement.y, placement.width, placement.height)
            }
            StyleKind::Fill => {
                context.fill_rect(placement.x, placement.y, placement.width, placement.height)
            }
        },
        ShapeKind::Circle => {
            context.begin_path();
            // Compatibility: the circle stays centered on the raw
            // pointer position, not the offset-adjusted corner the
            // rectangle uses. Radius comes from the computed width.
            context.arc(
                event.pointer[0],
                event.pointer[1],
                placement.width / 2.0,
                0.0,
                TAU,
                true,
            );
            context.stroke();
            if source_id.style == StyleKind::Fill {
                context.fill();
            }
            context.close_path();
        }
    }

    let placed = PlacedShape::new(
        source_id.style,
        source_id.shape,
        placement.x,
        placement.y,
        placement.width,
        placement.height,
    );
    log::info!(
        "dropped {} at ({}, {}) size {}x{}",
        source_id,
        placement.x,
        placement.y,
        placement.width,
        placement.height
    );
    history.record(placed.clone());
    Ok(placed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{CANVAS_ID, Element};
    use crate::payload::PARAMS_KEY;
    use crate::surface::Rgba;
    use std::cell::RefCell;
    use std::rc::Rc;

    const STROKE_COLOR: Rgba = [0.0, 0.0, 0.0, 1.0];
    const FILL_COLOR: Rgba = [1.0, 0.0, 0.0, 1.0];

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        SetStrokeStyle(Rgba),
        SetFillStyle(Rgba),
        StrokeRect(f32, f32, f32, f32),
        FillRect(f32, f32, f32, f32),
        BeginPath,
        Arc(f32, f32, f32, f32, f32, bool),
        Stroke,
        Fill,
        ClosePath,
    }

    /// Surface double that records every drawing-primitive call.
    #[derive(Default)]
    struct RecordingSurface {
        calls: Rc<RefCell<Vec<Call>>>,
    }

    impl Surface2d for RecordingSurface {
        fn set_stroke_style(&mut self, color: Rgba) {
            self.calls.borrow_mut().push(Call::SetStrokeStyle(color));
        }
        fn set_fill_style(&mut self, color: Rgba) {
            self.calls.borrow_mut().push(Call::SetFillStyle(color));
        }
        fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
            self.calls.borrow_mut().push(Call::StrokeRect(x, y, w, h));
        }
        fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
            self.calls.borrow_mut().push(Call::FillRect(x, y, w, h));
        }
        fn begin_path(&mut self) {
            self.calls.borrow_mut().push(Call::BeginPath);
        }
        fn arc(&mut self, cx: f32, cy: f32, r: f32, start: f32, end: f32, ccw: bool) {
            self.calls.borrow_mut().push(Call::Arc(cx, cy, r, start, end, ccw));
        }
        fn stroke(&mut self) {
            self.calls.borrow_mut().push(Call::Stroke);
        }
        fn fill(&mut self) {
            self.calls.borrow_mut().push(Call::Fill);
        }
        fn close_path(&mut self) {
            self.calls.borrow_mut().push(Call::ClosePath);
        }
    }

    #[derive(Default)]
    struct RecordingHistory {
        invalidations: u32,
        records: Vec<PlacedShape>,
    }

    impl HistorySink for RecordingHistory {
        fn invalidate_redo(&mut self) {
            self.invalidations += 1;
        }
        fn record(&mut self, shape: PlacedShape) {
            self.records.push(shape);
        }
    }

    fn document() -> (Document<RecordingSurface>, Rc<RefCell<Vec<Call>>>) {
        let mut doc = Document::new();
        for id in ["stroke_rect", "fill_rect", "stroke_circle", "fill_circle", "stroke_triangle"] {
            doc.insert_element(Element::source(id, [150.0, 150.0]));
        }
        doc.insert_element(Element::swatch(STROKE_SWATCH_ID, STROKE_COLOR));
        doc.insert_element(Element::swatch(FILL_SWATCH_ID, FILL_COLOR));

        let surface = RecordingSurface::default();
        let calls = Rc::clone(&surface.calls);
        doc.insert_surface("dummy", surface);
        (doc, calls)
    }

    fn drop_event(source_id: &str) -> DragEvent {
        let mut event = DragEvent::new("dummy", [0.0, 0.0]);
        event.data_transfer.set_data(PARAMS_KEY, format!("{source_id},0,0"));
        event
    }

    #[test]
    fn entry_points_error_without_an_event() {
        let (mut doc, _) = document();
        let mut history = RecordingHistory::default();

        let errors = [
            begin_drag(None).unwrap_err(),
            allow_drop(None).unwrap_err(),
            drop_into_canvas(None, &mut doc, &mut history).unwrap_err(),
        ];
        for err in errors {
            assert!(matches!(err, DropError::MissingEvent));
            assert_eq!(err.to_string(), "event object is not defined");
        }
    }

    #[test]
    fn begin_drag_encodes_target_and_pointer_offset() {
        let mut event = DragEvent::new("stroke_rect", [0.0, 0.0]);
        begin_drag(Some(&mut event)).unwrap();

        let payload = event.data_transfer.payload().unwrap();
        assert_eq!(payload.source_id, "stroke_rect");
        assert_eq!((payload.offset_x, payload.offset_y), (0.0, 0.0));
        assert_eq!(payload.to_string(), "stroke_rect,0,0");
    }

    #[test]
    fn allow_drop_suppresses_the_default_exactly_once() {
        let mut event = DragEvent::new(CANVAS_ID, [10.0, 10.0]);
        allow_drop(Some(&mut event)).unwrap();
        assert_eq!(event.times_prevented(), 1);
    }

    #[test]
    fn drop_draws_an_outlined_rectangle_at_doubled_size() {
        let (mut doc, calls) = document();
        let mut history = RecordingHistory::default();
        let mut event = drop_event("stroke_rect");

        drop_into_canvas(Some(&mut event), &mut doc, &mut history).unwrap();

        let calls = calls.borrow();
        assert_eq!(
            *calls,
            vec![
                Call::SetStrokeStyle(STROKE_COLOR),
                Call::SetFillStyle(FILL_COLOR),
                Call::StrokeRect(20.0, 20.0, 300.0, 300.0),
            ]
        );
    }

    #[test]
    fn drop_draws_a_filled_rectangle() {
        let (mut doc, calls) = document();
        let mut history = RecordingHistory::default();
        let mut event = drop_event("fill_rect");

        drop_into_canvas(Some(&mut event), &mut doc, &mut history).unwrap();

        assert!(calls.borrow().contains(&Call::FillRect(20.0, 20.0, 300.0, 300.0)));
        assert!(!calls.borrow().iter().any(|c| matches!(c, Call::StrokeRect(..))));
    }

    #[test]
    fn drop_strokes_a_circle_at_the_raw_pointer() {
        let (mut doc, calls) = document();
        let mut history = RecordingHistory::default();
        let mut event = drop_event("stroke_circle");

        drop_into_canvas(Some(&mut event), &mut doc, &mut history).unwrap();

        let calls = calls.borrow();
        assert_eq!(
            *calls,
            vec![
                Call::SetStrokeStyle(STROKE_COLOR),
                Call::SetFillStyle(FILL_COLOR),
                Call::BeginPath,
                Call::Arc(0.0, 0.0, 150.0, 0.0, TAU, true),
                Call::Stroke,
                Call::ClosePath,
            ]
        );
    }

    #[test]
    fn drop_fills_a_circle_after_stroking_it() {
        let (mut doc, calls) = document();
        let mut history = RecordingHistory::default();
        let mut event = drop_event("fill_circle");

        drop_into_canvas(Some(&mut event), &mut doc, &mut history).unwrap();

        let calls = calls.borrow();
        assert!(calls.contains(&Call::Arc(0.0, 0.0, 150.0, 0.0, TAU, true)));
        let stroke_at = calls.iter().position(|c| *c == Call::Stroke).unwrap();
        let fill_at = calls.iter().position(|c| *c == Call::Fill).unwrap();
        assert!(stroke_at < fill_at);
    }

    #[test]
    fn drop_suppresses_default_invalidates_redo_and_records() {
        let (mut doc, _) = document();
        let mut history = RecordingHistory::default();
        let mut event = drop_event("stroke_rect");

        drop_into_canvas(Some(&mut event), &mut doc, &mut history).unwrap();

        assert_eq!(event.times_prevented(), 1);
        assert_eq!(history.invalidations, 1);
        assert_eq!(history.records.len(), 1);
        let record = &history.records[0];
        assert_eq!(record.style, StyleKind::Stroke);
        assert_eq!(record.shape, ShapeKind::Rect);
        assert_eq!(
            (record.x, record.y, record.width, record.height),
            (20.0, 20.0, 300.0, 300.0)
        );
    }

    // The original silently drew nothing for unknown shape kinds; that
    // gap is now a hard error, and no drawing primitive runs.
    #[test]
    fn unsupported_shape_kind_is_an_error_not_a_silent_noop() {
        let (mut doc, calls) = document();
        let mut history = RecordingHistory::default();
        let mut event = drop_event("stroke_triangle");

        let err = drop_into_canvas(Some(&mut event), &mut doc, &mut history).unwrap_err();
        assert!(matches!(
            err,
            DropError::SourceId(SourceIdError::UnknownShape(_))
        ));
        assert!(calls.borrow().is_empty());
        assert!(history.records.is_empty());
    }

    #[test]
    fn drop_without_a_payload_is_an_error() {
        let (mut doc, calls) = document();
        let mut history = RecordingHistory::default();
        let mut event = DragEvent::new("dummy", [0.0, 0.0]);

        let err = drop_into_canvas(Some(&mut event), &mut doc, &mut history).unwrap_err();
        assert!(matches!(err, DropError::Payload(PayloadError::Missing)));
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn drop_onto_an_unknown_surface_is_an_error() {
        let (mut doc, _) = document();
        let mut history = RecordingHistory::default();
        let mut event = drop_event("stroke_rect");
        event.target_id = "offscreen".into();

        let err = drop_into_canvas(Some(&mut event), &mut doc, &mut history).unwrap_err();
        assert!(matches!(err, DropError::UnknownSurface(id) if id == "offscreen"));
    }

    #[test]
    fn drop_from_an_unregistered_source_is_an_error() {
        let (mut doc, _) = document();
        let mut history = RecordingHistory::default();
        let mut event = drop_event("fill_hexagon");

        let err = drop_into_canvas(Some(&mut event), &mut doc, &mut history).unwrap_err();
        assert!(matches!(err, DropError::UnknownElement(id) if id == "fill_hexagon"));
    }

    #[test]
    fn placement_scales_offset_and_size() {
        let placement = Placement::from_drop([100.0, 80.0], [5.0, 3.0], [40.0, 40.0]);
        assert_eq!(placement.x, 100.0 - 10.0 + 20.0);
        assert_eq!(placement.y, 80.0 - 6.0 + 20.0);
        assert_eq!((placement.width, placement.height), (80.0, 80.0));
    }
}
