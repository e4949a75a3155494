use crate::axis::{AxisKind, AxisModel};
use crate::config::GridConfig;
use crate::error::GridError;
use crate::focus::{FocusRegistry, FocusTarget};
use crate::label::column_label;
use crate::matrix::{default_seed, GridMatrix};
use crate::scroll::{HostMetrics, ScrollCommand, ScrollCoordinator};
use crate::state::{
    key_to_edit_action, CellPosition, EditAction, EditMode, EditSession, Key, Modifiers,
};
use crate::window::VisibleRange;

/// One grid session: both axes, the cell store, the edit state machine and
/// the scroll coordinator.
///
/// The rendering layer owns the engine, forwards host events to the
/// `notify_*` and edit methods, applies the returned [`ScrollCommand`]s, and
/// re-queries the visible ranges before drawing.
#[derive(Debug, Clone)]
pub struct GridEngine {
    config: GridConfig,
    rows: AxisModel,
    columns: AxisModel,
    matrix: GridMatrix,
    edit: EditSession,
    scroll: ScrollCoordinator,
    /// Cell whose editor should receive focus once the renderer has built it
    pending_focus: Option<CellPosition>,
}

impl GridEngine {
    /// Create a session seeded with `R{row+1}-C{col+1}`
    pub fn new(config: GridConfig) -> Result<Self, GridError> {
        Self::with_seed(config, default_seed)
    }

    /// Create a session, calling `seed(row, col)` for every cell
    pub fn with_seed<F>(config: GridConfig, seed: F) -> Result<Self, GridError>
    where
        F: FnMut(usize, usize) -> String,
    {
        config.validate()?;
        let matrix = GridMatrix::new(config.column_count, config.row_count, seed);
        Ok(Self::assemble(config, matrix))
    }

    /// Create a session over an existing matrix; its shape overrides the
    /// configured counts
    pub fn with_matrix(mut config: GridConfig, matrix: GridMatrix) -> Result<Self, GridError> {
        config.validate()?;
        config.row_count = matrix.row_count();
        config.column_count = matrix.column_count();
        Ok(Self::assemble(config, matrix))
    }

    fn assemble(config: GridConfig, matrix: GridMatrix) -> Self {
        let rows = AxisModel::new(
            AxisKind::Rows,
            matrix.row_count(),
            config.row_height,
            config.buffer_count,
        );
        let columns = AxisModel::new(
            AxisKind::Columns,
            matrix.column_count(),
            config.column_item_size(),
            config.buffer_count,
        )
        .with_trailing_gap(config.default_scrollbar_gap);
        let scroll = ScrollCoordinator::from_config(&config);

        tracing::debug!(
            rows = matrix.row_count(),
            columns = matrix.column_count(),
            "grid session created"
        );

        Self {
            config,
            rows,
            columns,
            matrix,
            edit: EditSession::new(),
            scroll,
            pending_focus: None,
        }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn rows(&self) -> &AxisModel {
        &self.rows
    }

    pub fn columns(&self) -> &AxisModel {
        &self.columns
    }

    pub fn matrix(&self) -> &GridMatrix {
        &self.matrix
    }

    pub fn edit_session(&self) -> &EditSession {
        &self.edit
    }

    pub fn mode(&self) -> EditMode {
        self.edit.mode()
    }

    pub fn scroll(&self) -> &ScrollCoordinator {
        &self.scroll
    }

    pub fn row_count(&self) -> usize {
        self.matrix.row_count()
    }

    pub fn column_count(&self) -> usize {
        self.matrix.column_count()
    }

    // Windowing

    pub fn row_visible_range(&self, viewport_height: f64) -> VisibleRange {
        self.rows.visible_range(viewport_height)
    }

    pub fn column_visible_range(&self, viewport_width: f64) -> VisibleRange {
        self.columns.visible_range(viewport_width)
    }

    /// Visible cells in render order: column by column, rows top to bottom
    pub fn visible_cells(
        &self,
        viewport_height: f64,
        viewport_width: f64,
    ) -> impl Iterator<Item = (CellPosition, &str)> + '_ {
        let rows = self.row_visible_range(viewport_height);
        self.column_visible_range(viewport_width)
            .into_iter()
            .flat_map(move |col| {
                rows.into_iter().map(move |row| {
                    (CellPosition::new(row, col), self.matrix.cell_text(row, col))
                })
            })
    }

    /// Top edge of a row in pixels
    pub fn row_offset(&self, row: usize) -> f64 {
        self.rows.offset_of(row)
    }

    /// Left edge of a column in pixels
    pub fn column_offset(&self, col: usize) -> f64 {
        self.columns.offset_of(col)
    }

    pub fn content_height(&self) -> f64 {
        self.rows.content_extent()
    }

    /// Scrollable width plus room for the synthetic scrollbar
    pub fn content_width_with_gap(&self) -> f64 {
        self.columns.content_extent()
    }

    // Cells

    pub fn cell_text(&self, row: usize, col: usize) -> &str {
        self.matrix.cell_text(row, col)
    }

    pub fn set_cell_text(&mut self, row: usize, col: usize, value: impl Into<String>) {
        self.matrix.set_cell_text(row, col, value.into());
    }

    pub fn column_label(&self, index: usize) -> String {
        column_label(index)
    }

    // Scrolling

    pub fn notify_body_scroll(&mut self, offset_left: f64, offset_top: f64) -> Vec<ScrollCommand> {
        self.scroll
            .on_body_scroll(offset_left, offset_top, &mut self.columns, &mut self.rows)
    }

    pub fn notify_header_scroll(&mut self, offset_left: f64) -> Vec<ScrollCommand> {
        self.scroll.on_header_scroll(offset_left, &mut self.columns)
    }

    pub fn notify_synthetic_bar_scroll(&mut self, offset_left: f64) -> Vec<ScrollCommand> {
        self.scroll.on_bar_scroll(offset_left, &mut self.columns)
    }

    pub fn notify_resize(&mut self, metrics: HostMetrics) -> Vec<ScrollCommand> {
        self.scroll.on_resize(metrics, &mut self.columns)
    }

    /// Call once per rendering pass, after the previous commands were applied
    pub fn apply_pending_corrections(&mut self) -> Vec<ScrollCommand> {
        self.scroll.apply_pending_corrections(&self.columns)
    }

    // Selection and editing

    pub fn select_cell(&mut self, row: usize, col: usize) {
        self.edit.select_cell(CellPosition::new(row, col), &self.matrix);
        self.after_edit_transition();
    }

    /// Start editing a cell; out-of-range cells are ignored. On success the
    /// cell's editor is queued for focus (see [`GridEngine::resolve_focus`]).
    pub fn start_edit(&mut self, row: usize, col: usize) -> bool {
        let started = self.edit.start_edit(CellPosition::new(row, col), &self.matrix);
        if started {
            self.after_edit_transition();
        }
        started
    }

    pub fn commit_edit(&mut self, row: usize, col: usize, value: impl Into<String>) {
        self.edit
            .commit_edit(CellPosition::new(row, col), value.into(), &mut self.matrix);
        self.after_edit_transition();
    }

    /// Abandon the edit; returns the cell's text from when editing began
    pub fn cancel_edit(&mut self) -> Option<String> {
        let original = self.edit.cancel_edit();
        self.after_edit_transition();
        original
    }

    pub fn on_tab(&mut self, row: usize, col: usize, value: impl Into<String>) -> bool {
        self.navigate(row, col, value.into(), EditAction::CommitAndMoveRight)
    }

    pub fn on_shift_tab(&mut self, row: usize, col: usize, value: impl Into<String>) -> bool {
        self.navigate(row, col, value.into(), EditAction::CommitAndMoveLeft)
    }

    pub fn on_arrow_down(&mut self, row: usize, col: usize, value: impl Into<String>) -> bool {
        self.navigate(row, col, value.into(), EditAction::CommitAndMoveDown)
    }

    pub fn on_arrow_up(&mut self, row: usize, col: usize, value: impl Into<String>) -> bool {
        self.navigate(row, col, value.into(), EditAction::CommitAndMoveUp)
    }

    pub fn on_enter(&mut self, row: usize, col: usize, value: impl Into<String>) -> bool {
        self.on_arrow_down(row, col, value)
    }

    /// Dispatch a keydown from the editor of `(row, col)`. Returns true when
    /// the key was consumed and the host's default action should be prevented.
    pub fn handle_key(
        &mut self,
        row: usize,
        col: usize,
        key: Key,
        modifiers: Modifiers,
        value: impl Into<String>,
    ) -> bool {
        match key_to_edit_action(key, modifiers) {
            EditAction::None => false,
            EditAction::Cancel => {
                self.cancel_edit();
                true
            }
            action => {
                self.navigate(row, col, value.into(), action);
                true
            }
        }
    }

    fn navigate(&mut self, row: usize, col: usize, value: String, action: EditAction) -> bool {
        let moved = self.edit.commit_and_move(
            CellPosition::new(row, col),
            value,
            action,
            &mut self.matrix,
        );
        self.after_edit_transition();
        moved
    }

    fn after_edit_transition(&mut self) {
        self.pending_focus = self.edit.editing();
    }

    // Focus

    /// Cell whose editor is waiting for focus
    pub fn pending_focus(&self) -> Option<CellPosition> {
        self.pending_focus
    }

    /// Focus the pending editor if the renderer has registered it.
    ///
    /// The request stays queued while the editor does not exist yet, so the
    /// renderer can call this after every pass.
    pub fn resolve_focus<H: FocusTarget>(
        &mut self,
        registry: &FocusRegistry<H>,
    ) -> Option<CellPosition> {
        let position = self.pending_focus?;
        if registry.focus(position) {
            self.pending_focus = None;
            Some(position)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scroll::{ScrollRegion, SyncPhase};
    use std::cell::Cell;

    fn engine() -> GridEngine {
        GridEngine::new(GridConfig::with_dimensions(200, 100)).unwrap()
    }

    fn metrics() -> HostMetrics {
        HostMetrics {
            body_scroll_width: 18_800.0,
            body_client_width: 1_200.0,
            vertical_offset_width: 1_216.0,
            vertical_client_width: 1_200.0,
        }
    }

    #[derive(Default)]
    struct FakeInput {
        focused: Cell<bool>,
    }

    impl FocusTarget for FakeInput {
        fn focus_and_select(&self) {
            self.focused.set(true);
        }
    }

    #[test]
    fn test_new_engine() {
        let engine = engine();
        assert_eq!(engine.row_count(), 200);
        assert_eq!(engine.column_count(), 100);
        assert_eq!(engine.cell_text(0, 0), "R1-C1");
        assert_eq!(engine.mode(), EditMode::Browsing);
        assert!(engine.scroll().is_idle());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GridConfig {
            row_height: 0.0,
            ..GridConfig::with_dimensions(10, 10)
        };
        assert!(GridEngine::new(config).is_err());
    }

    #[test]
    fn test_with_matrix_overrides_counts() {
        let matrix = GridMatrix::filled(3, 4, "x");
        let engine = GridEngine::with_matrix(GridConfig::default(), matrix).unwrap();
        assert_eq!(engine.config().row_count, 4);
        assert_eq!(engine.config().column_count, 3);
        assert_eq!(engine.rows().item_count(), 4);
        assert_eq!(engine.columns().item_count(), 3);
    }

    #[test]
    fn test_scroll_then_edit_scenario() {
        let mut engine = engine();

        engine.notify_body_scroll(0.0, 4400.0);
        assert_eq!(engine.row_visible_range(800.0), VisibleRange::new(90, 129));

        assert!(engine.start_edit(5, 3));
        assert_eq!(
            engine.mode(),
            EditMode::Editing {
                position: CellPosition::new(5, 3)
            }
        );

        engine.commit_edit(5, 3, "X");
        assert_eq!(engine.cell_text(5, 3), "X");
        assert_eq!(engine.mode(), EditMode::Browsing);
    }

    #[test]
    fn test_row_range_capped_at_row_count() {
        let mut engine = engine();
        engine.notify_body_scroll(0.0, 8000.0);
        assert_eq!(engine.row_visible_range(800.0), VisibleRange::new(171, 200));
    }

    #[test]
    fn test_column_range_follows_horizontal_scroll() {
        let mut engine = engine();
        engine.notify_body_scroll(1880.0, 0.0);
        // 1880 / 188 = column 10; (1880 + 1200) / 188 = 16.4
        assert_eq!(engine.column_visible_range(1200.0), VisibleRange::new(0, 27));
    }

    #[test]
    fn test_visible_cells_cross_product() {
        let config = GridConfig {
            buffer_count: 0,
            ..GridConfig::with_dimensions(200, 100)
        };
        let engine = GridEngine::new(config).unwrap();

        let cells: Vec<_> = engine.visible_cells(88.0, 376.0).collect();

        assert_eq!(cells.len(), 4);
        assert_eq!(cells[0], (CellPosition::new(0, 0), "R1-C1"));
        assert_eq!(cells[1], (CellPosition::new(1, 0), "R2-C1"));
        assert_eq!(cells[2], (CellPosition::new(0, 1), "R1-C2"));
    }

    #[test]
    fn test_offsets_and_extents() {
        let engine = engine();
        assert_eq!(engine.row_offset(100), 4400.0);
        assert_eq!(engine.column_offset(2), 376.0);
        assert_eq!(engine.content_height(), 8800.0);
        // 100 columns * 188px + 16px default gap
        assert_eq!(engine.content_width_with_gap(), 18_816.0);
    }

    #[test]
    fn test_measured_gap_replaces_default() {
        let mut engine = engine();
        engine.notify_resize(metrics());
        assert_eq!(engine.content_width_with_gap(), 18_816.0);

        let no_scrollbar = HostMetrics {
            vertical_offset_width: 1_200.0,
            ..metrics()
        };
        engine.notify_resize(no_scrollbar);
        assert_eq!(engine.scroll().scrollbar_gap(), Some(0.0));
        assert_eq!(engine.content_width_with_gap(), 18_800.0);
    }

    #[test]
    fn test_repeated_resize_is_stable() {
        let mut engine = engine();
        engine.notify_resize(metrics());
        let width = engine.content_width_with_gap();
        let gap = engine.scroll().scrollbar_gap();

        for _ in 0..3 {
            assert!(engine.notify_resize(metrics()).is_empty());
            assert_eq!(engine.content_width_with_gap(), width);
            assert_eq!(engine.scroll().scrollbar_gap(), gap);
        }
    }

    #[test]
    fn test_bar_to_end_jumps_body_to_last_column() {
        let mut engine = engine();
        engine.notify_resize(metrics());
        engine.apply_pending_corrections();

        let writes = engine.notify_synthetic_bar_scroll(17_590.0);
        assert!(writes.contains(&ScrollCommand::SetScrollLeft {
            region: ScrollRegion::Body,
            offset: 17_590.0
        }));

        // Echo from the body in the same frame is ignored
        assert!(engine.notify_body_scroll(17_590.0, 0.0).is_empty());

        let corrections = engine.apply_pending_corrections();
        assert_eq!(
            corrections,
            vec![
                ScrollCommand::ScrollBodyToIndex { index: 99 },
                ScrollCommand::RevalidateBodySize
            ]
        );
        assert_eq!(engine.scroll().phase(), SyncPhase::Idle);
    }

    #[test]
    fn test_header_scroll_moves_columns() {
        let mut engine = engine();
        let writes = engine.notify_header_scroll(376.0);
        assert_eq!(writes.len(), 2);
        assert_eq!(engine.columns().scroll_offset(), 376.0);
    }

    #[test]
    fn test_start_edit_out_of_range_keeps_state() {
        let mut engine = engine();
        engine.select_cell(4, 4);

        assert!(!engine.start_edit(200, 0));
        assert!(!engine.start_edit(0, 100));
        assert_eq!(
            engine.mode(),
            EditMode::Selected {
                position: CellPosition::new(4, 4)
            }
        );
    }

    #[test]
    fn test_tab_past_last_column() {
        let mut engine = engine();
        engine.start_edit(7, 99);

        assert!(!engine.on_tab(7, 99, "last"));
        assert_eq!(engine.cell_text(7, 99), "last");
        assert_eq!(engine.mode(), EditMode::Browsing);
        assert_eq!(engine.pending_focus(), None);
    }

    #[test]
    fn test_tab_and_arrow_navigation() {
        let mut engine = engine();
        engine.start_edit(5, 3);

        assert!(engine.on_tab(5, 3, "a"));
        assert_eq!(engine.edit_session().editing(), Some(CellPosition::new(5, 4)));

        assert!(engine.on_arrow_down(5, 4, "b"));
        assert_eq!(engine.edit_session().editing(), Some(CellPosition::new(6, 4)));

        assert!(engine.on_enter(6, 4, "c"));
        assert!(engine.on_arrow_up(7, 4, "d"));
        assert!(engine.on_shift_tab(6, 4, "e"));
        assert_eq!(engine.edit_session().editing(), Some(CellPosition::new(6, 3)));
        assert_eq!(engine.cell_text(6, 4), "e");
    }

    #[test]
    fn test_handle_key() {
        let mut engine = engine();
        let none = Modifiers::new();
        engine.start_edit(0, 0);

        assert!(engine.handle_key(0, 0, Key::Tab, none, "t"));
        assert_eq!(engine.edit_session().editing(), Some(CellPosition::new(0, 1)));

        assert!(!engine.handle_key(0, 1, Key::Char('q'), none, "tq"));
        assert!(engine.edit_session().is_editing());

        assert!(engine.handle_key(0, 1, Key::Escape, none, "discarded"));
        assert_eq!(engine.mode(), EditMode::Browsing);
        assert_eq!(engine.cell_text(0, 1), "R1-C2");
        assert_eq!(engine.cell_text(0, 0), "t");
    }

    #[test]
    fn test_cancel_returns_original() {
        let mut engine = engine();
        engine.start_edit(2, 2);
        assert_eq!(engine.cancel_edit(), Some("R3-C3".to_string()));
        assert_eq!(engine.cancel_edit(), None);
    }

    #[test]
    fn test_focus_deferred_until_editor_registered() {
        let mut engine = engine();
        let mut registry = FocusRegistry::new();

        engine.start_edit(5, 3);
        assert_eq!(engine.pending_focus(), Some(CellPosition::new(5, 3)));

        // Renderer has not produced the editor yet
        assert_eq!(engine.resolve_focus(&registry), None);
        assert_eq!(engine.pending_focus(), Some(CellPosition::new(5, 3)));

        registry.register(CellPosition::new(5, 3), FakeInput::default());
        assert_eq!(engine.resolve_focus(&registry), Some(CellPosition::new(5, 3)));
        assert!(registry.get(CellPosition::new(5, 3)).unwrap().focused.get());
        assert_eq!(engine.pending_focus(), None);
    }

    #[test]
    fn test_focus_request_dropped_when_edit_ends() {
        let mut engine = engine();
        engine.start_edit(1, 1);
        engine.commit_edit(1, 1, "done");
        assert_eq!(engine.pending_focus(), None);
    }

    #[test]
    fn test_selecting_another_cell_drops_focus_request() {
        let mut engine = engine();
        let mut registry = FocusRegistry::new();
        registry.register(CellPosition::new(1, 1), FakeInput::default());

        engine.start_edit(1, 1);
        engine.select_cell(2, 2);

        assert_eq!(engine.pending_focus(), None);
        assert_eq!(engine.resolve_focus(&registry), None);
        assert!(!registry.get(CellPosition::new(1, 1)).unwrap().focused.get());
    }

    #[test]
    fn test_rejected_start_edit_keeps_focus_state() {
        let mut engine = engine();
        let mut registry = FocusRegistry::new();
        registry.register(CellPosition::new(1, 1), FakeInput::default());

        engine.start_edit(1, 1);
        assert_eq!(engine.resolve_focus(&registry), Some(CellPosition::new(1, 1)));

        // Editor already has focus; a rejected edit must not queue it again
        assert!(!engine.start_edit(200, 1));
        assert_eq!(engine.edit_session().editing(), Some(CellPosition::new(1, 1)));
        assert_eq!(engine.pending_focus(), None);
        assert_eq!(engine.resolve_focus(&registry), None);
    }

    #[test]
    fn test_focus_follows_tab() {
        let mut engine = engine();
        let mut registry = FocusRegistry::new();
        registry.register(CellPosition::new(0, 1), FakeInput::default());

        engine.start_edit(0, 0);
        engine.on_tab(0, 0, "x");

        assert_eq!(engine.resolve_focus(&registry), Some(CellPosition::new(0, 1)));
    }

    #[test]
    fn test_set_cell_text_and_labels() {
        let mut engine = engine();
        engine.set_cell_text(199, 99, "corner");
        assert_eq!(engine.cell_text(199, 99), "corner");
        assert_eq!(engine.column_label(99), "CV");
        assert_eq!(engine.column_label(26), "AA");
    }
}
