use crate::drawing::PlacedShape;

/// Capability the drop handler records placements through. The original
/// surface exposed these as empty stubs; here they are the named
/// interface points a history component implements.
pub trait HistorySink {
    /// A new action happened; any redo path is no longer valid.
    fn invalidate_redo(&mut self);
    /// A shape was placed on the surface.
    fn record(&mut self, shape: PlacedShape);
}

/// Sink that drops everything, matching the original stub behavior.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullHistory;

impl HistorySink for NullHistory {
    fn invalidate_redo(&mut self) {}
    fn record(&mut self, _shape: PlacedShape) {}
}

pub const DEFAULT_CAPACITY: usize = 64;

/// Bounded undo/redo stack pair. Recording pushes onto the undo list,
/// evicting the oldest entry at capacity; invalidation clears the redo
/// list. Traversal moves records between the two lists without touching
/// any surface.
#[derive(Debug)]
pub struct PlacementHistory {
    undo: Vec<PlacedShape>,
    redo: Vec<PlacedShape>,
    capacity: usize,
}

impl PlacementHistory {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            undo: Vec::new(),
            redo: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn undo_list(&self) -> &[PlacedShape] {
        &self.undo
    }

    pub fn redo_list(&self) -> &[PlacedShape] {
        &self.redo
    }

    /// Moves the most recent placement onto the redo list.
    pub fn undo(&mut self) -> Option<&PlacedShape> {
        let shape = self.undo.pop()?;
        self.redo.push(shape);
        self.redo.last()
    }

    /// Moves the most recently undone placement back onto the undo list.
    pub fn redo(&mut self) -> Option<&PlacedShape> {
        let shape = self.redo.pop()?;
        self.undo.push(shape);
        self.undo.last()
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}

impl Default for PlacementHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl HistorySink for PlacementHistory {
    fn invalidate_redo(&mut self) {
        self.redo.clear();
    }

    fn record(&mut self, shape: PlacedShape) {
        if self.undo.len() == self.capacity {
            self.undo.remove(0);
        }
        self.undo.push(shape);
    }
}
