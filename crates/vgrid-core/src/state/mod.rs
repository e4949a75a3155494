pub mod edit;
pub mod input;
pub mod position;

pub use edit::{EditMode, EditSession};
pub use input::{key_to_edit_action, EditAction, Key, Modifiers};
pub use position::CellPosition;
