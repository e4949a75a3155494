use std::collections::HashMap;

use crate::state::CellPosition;
use crate::window::VisibleRange;

/// Something the rendering layer can focus, such as an `<input>` element
pub trait FocusTarget {
    /// Focus the field and select all of its text
    fn focus_and_select(&self);
}

/// Editor handles by cell, populated by the rendering layer as it creates
/// and recycles editable fields.
#[derive(Debug)]
pub struct FocusRegistry<H> {
    handles: HashMap<CellPosition, H>,
}

impl<H> Default for FocusRegistry<H> {
    fn default() -> Self {
        Self {
            handles: HashMap::new(),
        }
    }
}

impl<H> FocusRegistry<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the handle for a cell, returning the one it replaces
    pub fn register(&mut self, position: CellPosition, handle: H) -> Option<H> {
        self.handles.insert(position, handle)
    }

    pub fn unregister(&mut self, position: CellPosition) -> Option<H> {
        self.handles.remove(&position)
    }

    pub fn get(&self, position: CellPosition) -> Option<&H> {
        self.handles.get(&position)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn clear(&mut self) {
        self.handles.clear();
    }

    /// Drop handles for cells that scrolled out of the rendered window
    pub fn retain_visible(&mut self, rows: VisibleRange, columns: VisibleRange) {
        self.handles
            .retain(|pos, _| rows.contains(pos.row) && columns.contains(pos.col));
    }
}

impl<H: FocusTarget> FocusRegistry<H> {
    /// Focus the cell's editor. Returns false when no editor is registered yet.
    pub fn focus(&self, position: CellPosition) -> bool {
        match self.handles.get(&position) {
            Some(handle) => {
                handle.focus_and_select();
                true
            }
            None => false,
        }
    }
}
