use serde::{Deserialize, Serialize};
use vgrid_core::{
    column_label, CellPosition, FocusRegistry, GridConfig, GridEngine, GridError, HostMetrics, Key,
    ScrollCommand,
};
use wasm_bindgen::prelude::*;
use web_sys::HtmlInputElement;

use crate::editor::{modifiers_from_flags, EditorHandle};

/// Grid session exposed to JavaScript.
///
/// The host calls the `on*Scroll`/`onResize` methods from its event listeners
/// and applies the returned commands, calls `applyPendingCorrections` once per
/// animation frame, and re-renders from `rowRange`/`columnRange`.
#[wasm_bindgen]
pub struct GridView {
    engine: GridEngine,
    editors: FocusRegistry<EditorHandle>,
}

/// Structured error object for JavaScript
#[derive(Serialize)]
pub struct JsGridError {
    code: String,
    message: String,
}

impl From<GridError> for JsGridError {
    fn from(err: GridError) -> Self {
        Self {
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }
}

fn to_js_error(err: GridError) -> JsValue {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::error_1(&format!("[vgrid] {}", err).into());

    let js_error = JsGridError::from(err);
    serde_wasm_bindgen::to_value(&js_error).unwrap_or(JsValue::NULL)
}

fn commands_to_js(commands: &[ScrollCommand]) -> JsValue {
    serde_wasm_bindgen::to_value(commands).unwrap_or(JsValue::NULL)
}

/// One rendered cell for JavaScript
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellData {
    pub row: u32,
    pub col: u32,
    pub text: String,
    #[serde(skip_serializing_if = "is_false", default)]
    pub editing: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl GridView {
    fn from_grid_config(config: GridConfig) -> Result<GridView, JsValue> {
        let engine = GridEngine::new(config).map_err(to_js_error)?;
        Ok(Self {
            engine,
            editors: FocusRegistry::new(),
        })
    }
}

#[wasm_bindgen]
impl GridView {
    /// Create a grid of `row_count` x `column_count` seeded cells with default sizing
    #[wasm_bindgen(constructor)]
    pub fn new(row_count: u32, column_count: u32) -> Result<GridView, JsValue> {
        let config = GridConfig::with_dimensions(row_count as usize, column_count as usize);
        Self::from_grid_config(config)
    }

    /// Create a grid from a (possibly partial) camelCase JSON configuration
    #[wasm_bindgen(js_name = fromConfig)]
    pub fn from_config(config_json: &str) -> Result<GridView, JsValue> {
        let config = GridConfig::from_json(config_json).map_err(to_js_error)?;
        Self::from_grid_config(config)
    }

    #[wasm_bindgen(js_name = rowCount)]
    pub fn row_count(&self) -> u32 {
        self.engine.row_count() as u32
    }

    #[wasm_bindgen(js_name = columnCount)]
    pub fn column_count(&self) -> u32 {
        self.engine.column_count() as u32
    }

    /// Current configuration as a JSON string
    #[wasm_bindgen(js_name = getConfig)]
    pub fn get_config(&self) -> String {
        serde_json::to_string(self.engine.config()).unwrap_or_else(|_| "{}".to_string())
    }

    // ========== Windowing ==========

    /// `{from, to}` rows to render for a viewport of the given height
    #[wasm_bindgen(js_name = rowRange)]
    pub fn row_range(&self, viewport_height: f64) -> JsValue {
        serde_wasm_bindgen::to_value(&self.engine.row_visible_range(viewport_height))
            .unwrap_or(JsValue::NULL)
    }

    /// `{from, to}` columns to render for a viewport of the given width
    #[wasm_bindgen(js_name = columnRange)]
    pub fn column_range(&self, viewport_width: f64) -> JsValue {
        serde_wasm_bindgen::to_value(&self.engine.column_visible_range(viewport_width))
            .unwrap_or(JsValue::NULL)
    }

    /// Visible cells as a JSON array, column by column
    #[wasm_bindgen(js_name = getViewportData)]
    pub fn get_viewport_data(&self, viewport_height: f64, viewport_width: f64) -> String {
        let editing = self.engine.edit_session().editing();
        let cells: Vec<CellData> = self
            .engine
            .visible_cells(viewport_height, viewport_width)
            .map(|(position, text)| CellData {
                row: position.row as u32,
                col: position.col as u32,
                text: text.to_string(),
                editing: editing == Some(position),
            })
            .collect();

        serde_json::to_string(&cells).unwrap_or_else(|_| "[]".to_string())
    }

    /// Header labels for columns `[from, to)`
    #[wasm_bindgen(js_name = columnLabels)]
    pub fn column_labels(&self, from: u32, to: u32) -> js_sys::Array {
        let to = (to as usize).min(self.engine.column_count());
        let labels = js_sys::Array::new();
        for index in (from as usize)..to {
            labels.push(&JsValue::from_str(&column_label(index)));
        }
        labels
    }

    #[wasm_bindgen(js_name = rowOffset)]
    pub fn row_offset(&self, row: u32) -> f64 {
        self.engine.row_offset(row as usize)
    }

    #[wasm_bindgen(js_name = columnOffset)]
    pub fn column_offset(&self, col: u32) -> f64 {
        self.engine.column_offset(col as usize)
    }

    #[wasm_bindgen(js_name = contentHeight)]
    pub fn content_height(&self) -> f64 {
        self.engine.content_height()
    }

    /// Width for the header strip and bar track, including the scrollbar gap
    #[wasm_bindgen(js_name = contentWidth)]
    pub fn content_width(&self) -> f64 {
        self.engine.content_width_with_gap()
    }

    // ========== Cells ==========

    #[wasm_bindgen(js_name = getCellText)]
    pub fn get_cell_text(&self, row: u32, col: u32) -> String {
        self.engine.cell_text(row as usize, col as usize).to_string()
    }

    #[wasm_bindgen(js_name = setCellText)]
    pub fn set_cell_text(&mut self, row: u32, col: u32, value: &str) {
        self.engine.set_cell_text(row as usize, col as usize, value);
    }

    // ========== Scroll sync ==========

    /// Body viewport scrolled; returns the scroll commands to apply
    #[wasm_bindgen(js_name = onBodyScroll)]
    pub fn on_body_scroll(&mut self, scroll_left: f64, scroll_top: f64) -> JsValue {
        commands_to_js(&self.engine.notify_body_scroll(scroll_left, scroll_top))
    }

    #[wasm_bindgen(js_name = onHeaderScroll)]
    pub fn on_header_scroll(&mut self, scroll_left: f64) -> JsValue {
        commands_to_js(&self.engine.notify_header_scroll(scroll_left))
    }

    #[wasm_bindgen(js_name = onBarScroll)]
    pub fn on_bar_scroll(&mut self, scroll_left: f64) -> JsValue {
        commands_to_js(&self.engine.notify_synthetic_bar_scroll(scroll_left))
    }

    /// Host resized. `metrics` is a `{bodyScrollWidth, bodyClientWidth,
    /// verticalOffsetWidth, verticalClientWidth}` object.
    #[wasm_bindgen(js_name = onResize)]
    pub fn on_resize(&mut self, metrics: JsValue) -> Result<JsValue, JsValue> {
        let metrics: HostMetrics = serde_wasm_bindgen::from_value(metrics).map_err(|e| {
            to_js_error(GridError::InvalidConfig(format!("invalid host metrics: {}", e)))
        })?;
        Ok(commands_to_js(&self.engine.notify_resize(metrics)))
    }

    /// Call from `requestAnimationFrame` after applying the previous commands
    #[wasm_bindgen(js_name = applyPendingCorrections)]
    pub fn apply_pending_corrections(&mut self) -> JsValue {
        commands_to_js(&self.engine.apply_pending_corrections())
    }

    #[wasm_bindgen(js_name = scrollbarGap)]
    pub fn scrollbar_gap(&self) -> f64 {
        self.engine
            .scroll()
            .scrollbar_gap()
            .unwrap_or(self.engine.config().default_scrollbar_gap)
    }

    // ========== Editing ==========

    #[wasm_bindgen(js_name = selectCell)]
    pub fn select_cell(&mut self, row: u32, col: u32) {
        self.engine.select_cell(row as usize, col as usize);
    }

    #[wasm_bindgen(js_name = startEdit)]
    pub fn start_edit(&mut self, row: u32, col: u32) -> bool {
        self.engine.start_edit(row as usize, col as usize)
    }

    #[wasm_bindgen(js_name = commitEdit)]
    pub fn commit_edit(&mut self, row: u32, col: u32, value: &str) {
        self.engine.commit_edit(row as usize, col as usize, value);
    }

    /// Abandon the edit; returns the text the cell held when editing began
    #[wasm_bindgen(js_name = cancelEdit)]
    pub fn cancel_edit(&mut self) -> Option<String> {
        self.engine.cancel_edit()
    }

    /// Keydown inside the editor of `(row, col)`. Returns true when the host
    /// should call `preventDefault()`.
    #[wasm_bindgen(js_name = handleKey)]
    #[allow(clippy::too_many_arguments)]
    pub fn handle_key(
        &mut self,
        row: u32,
        col: u32,
        key: &str,
        shift: bool,
        ctrl: bool,
        alt: bool,
        meta: bool,
        value: &str,
    ) -> bool {
        let modifiers = modifiers_from_flags(shift, ctrl, alt, meta);
        self.engine.handle_key(
            row as usize,
            col as usize,
            Key::from_name(key),
            modifiers,
            value,
        )
    }

    /// Current mode as `"Browsing"`, `{Selected: {position}}` or `{Editing: {position}}`
    #[wasm_bindgen(js_name = getEditMode)]
    pub fn get_edit_mode(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.engine.mode()).unwrap_or(JsValue::NULL)
    }

    #[wasm_bindgen(js_name = isEditing)]
    pub fn is_editing(&self, row: u32, col: u32) -> bool {
        self.engine.edit_session().editing() == Some(CellPosition::new(row as usize, col as usize))
    }

    // ========== Focus ==========

    /// Register the `<input>` rendered for an editing cell
    #[wasm_bindgen(js_name = registerEditor)]
    pub fn register_editor(&mut self, row: u32, col: u32, input: HtmlInputElement) {
        self.editors.register(
            CellPosition::new(row as usize, col as usize),
            EditorHandle::new(input),
        );
    }

    #[wasm_bindgen(js_name = unregisterEditor)]
    pub fn unregister_editor(&mut self, row: u32, col: u32) {
        self.editors
            .unregister(CellPosition::new(row as usize, col as usize));
    }

    /// Forget editors for cells outside the current window
    #[wasm_bindgen(js_name = pruneEditors)]
    pub fn prune_editors(&mut self, viewport_height: f64, viewport_width: f64) {
        let rows = self.engine.row_visible_range(viewport_height);
        let columns = self.engine.column_visible_range(viewport_width);
        self.editors.retain_visible(rows, columns);
    }

    /// Focus the pending editor once it is registered. Returns true when focus moved.
    #[wasm_bindgen(js_name = resolveFocus)]
    pub fn resolve_focus(&mut self) -> bool {
        self.engine.resolve_focus(&self.editors).is_some()
    }

    /// Current text of the registered editor for `(row, col)`
    #[wasm_bindgen(js_name = editorValue)]
    pub fn editor_value(&self, row: u32, col: u32) -> Option<String> {
        self.editors
            .get(CellPosition::new(row as usize, col as usize))
            .map(EditorHandle::value)
    }
}
