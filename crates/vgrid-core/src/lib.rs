//! Two-axis virtual scrolling engine for very large editable grids.

pub mod axis;
pub mod config;
pub mod engine;
pub mod error;
pub mod focus;
pub mod label;
pub mod matrix;
pub mod scroll;
pub mod state;
pub mod window;

pub use axis::{AxisKind, AxisModel};
pub use config::GridConfig;
pub use engine::GridEngine;
pub use error::GridError;
pub use focus::{FocusRegistry, FocusTarget};
pub use label::{cell_name, column_label, parse_column_label};
pub use matrix::{default_seed, GridMatrix};
pub use scroll::{
    Correction, HostMetrics, ScrollCommand, ScrollCoordinator, ScrollRegion, SyncPhase,
};
pub use state::{
    key_to_edit_action, CellPosition, EditAction, EditMode, EditSession, Key, Modifiers,
};
pub use window::{visible_range, VisibleRange};
