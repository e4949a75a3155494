use serde::{Deserialize, Serialize};

use super::input::EditAction;
use super::position::CellPosition;
use crate::matrix::GridMatrix;

/// What the user is currently doing with the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditMode {
    /// Nothing selected
    Browsing,
    /// One cell highlighted, rendered as static text
    Selected { position: CellPosition },
    /// One cell rendered as an editable field
    Editing { position: CellPosition },
}

impl Default for EditMode {
    fn default() -> Self {
        Self::Browsing
    }
}

impl EditMode {
    pub fn is_browsing(&self) -> bool {
        matches!(self, EditMode::Browsing)
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, EditMode::Editing { .. })
    }

    pub fn selected_position(&self) -> Option<CellPosition> {
        match self {
            EditMode::Selected { position } => Some(*position),
            _ => None,
        }
    }

    pub fn editing_position(&self) -> Option<CellPosition> {
        match self {
            EditMode::Editing { position } => Some(*position),
            _ => None,
        }
    }
}

/// Selection/editing state machine over a [`GridMatrix`].
///
/// At most one cell is selected or edited at a time, and the matrix is only
/// written by a commit, so writes are serialized by the state machine itself.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EditSession {
    mode: EditMode,
    /// Content of the editing cell when the edit began (returned on cancel)
    original_content: Option<String>,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn is_editing(&self) -> bool {
        self.mode.is_editing()
    }

    pub fn selected(&self) -> Option<CellPosition> {
        self.mode.selected_position()
    }

    pub fn editing(&self) -> Option<CellPosition> {
        self.mode.editing_position()
    }

    pub fn original_content(&self) -> Option<&str> {
        self.original_content.as_deref()
    }

    /// Highlight a cell. Any state moves to `Selected`.
    pub fn select_cell(&mut self, position: CellPosition, matrix: &GridMatrix) {
        debug_assert!(
            matrix.contains(position.row, position.col),
            "selecting {position} outside the grid"
        );
        self.original_content = None;
        self.mode = EditMode::Selected { position };
    }

    /// Turn a cell into an editable field.
    ///
    /// Out-of-range positions are ignored and leave the state unchanged, which
    /// is what stops Tab/Arrow navigation at the edge of the grid. Returns
    /// whether editing started.
    pub fn start_edit(&mut self, position: CellPosition, matrix: &GridMatrix) -> bool {
        let Some(content) = matrix.get(position.row, position.col) else {
            tracing::trace!(%position, "start_edit outside grid ignored");
            return false;
        };
        self.original_content = Some(content.to_string());
        self.mode = EditMode::Editing { position };
        true
    }

    /// Write `value` into the cell and return to `Browsing`
    pub fn commit_edit(&mut self, position: CellPosition, value: String, matrix: &mut GridMatrix) {
        matrix.set_cell_text(position.row, position.col, value);
        self.original_content = None;
        self.mode = EditMode::Browsing;
    }

    /// Leave editing without touching the matrix. Returns the content the
    /// cell held when editing began, or `None` if nothing was being edited.
    pub fn cancel_edit(&mut self) -> Option<String> {
        if !self.mode.is_editing() {
            return None;
        }
        self.mode = EditMode::Browsing;
        self.original_content.take()
    }

    /// Commit, then edit the neighbour in the action's direction. A neighbour
    /// outside the grid leaves the session `Browsing`.
    pub fn commit_and_move(
        &mut self,
        position: CellPosition,
        value: String,
        action: EditAction,
        matrix: &mut GridMatrix,
    ) -> bool {
        if action == EditAction::Cancel {
            self.cancel_edit();
            return false;
        }

        self.commit_edit(position, value, matrix);

        match action.step().and_then(|(dr, dc)| position.offset(dr, dc)) {
            Some(next) => self.start_edit(next, matrix),
            None => false,
        }
    }

    /// Tab: commit and move one column right
    pub fn on_tab(
        &mut self,
        position: CellPosition,
        value: String,
        matrix: &mut GridMatrix,
    ) -> bool {
        self.commit_and_move(position, value, EditAction::CommitAndMoveRight, matrix)
    }

    /// Shift+Tab: commit and move one column left
    pub fn on_shift_tab(
        &mut self,
        position: CellPosition,
        value: String,
        matrix: &mut GridMatrix,
    ) -> bool {
        self.commit_and_move(position, value, EditAction::CommitAndMoveLeft, matrix)
    }

    /// ArrowDown: commit and move one row down
    pub fn on_arrow_down(
        &mut self,
        position: CellPosition,
        value: String,
        matrix: &mut GridMatrix,
    ) -> bool {
        self.commit_and_move(position, value, EditAction::CommitAndMoveDown, matrix)
    }

    /// ArrowUp: commit and move one row up
    pub fn on_arrow_up(
        &mut self,
        position: CellPosition,
        value: String,
        matrix: &mut GridMatrix,
    ) -> bool {
        self.commit_and_move(position, value, EditAction::CommitAndMoveUp, matrix)
    }

    /// Enter: same as ArrowDown
    pub fn on_enter(
        &mut self,
        position: CellPosition,
        value: String,
        matrix: &mut GridMatrix,
    ) -> bool {
        self.on_arrow_down(position, value, matrix)
    }
}
