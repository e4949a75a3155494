use serde::{Deserialize, Serialize};

/// Keys the in-cell editor reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Enter,
    Tab,
    Escape,
    Char(char),
    Unknown,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_name(name: &str) -> Self {
        match name {
            "ArrowUp" => Key::ArrowUp,
            "ArrowDown" => Key::ArrowDown,
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            "Enter" => Key::Enter,
            "Tab" => Key::Tab,
            "Escape" | "Esc" => Key::Escape,
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => Key::Unknown,
                }
            }
        }
    }
}

/// Modifier keys state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_shift(mut self, shift: bool) -> Self {
        self.shift = shift;
        self
    }

    pub fn with_ctrl(mut self, ctrl: bool) -> Self {
        self.ctrl = ctrl;
        self
    }

    pub fn with_alt(mut self, alt: bool) -> Self {
        self.alt = alt;
        self
    }

    pub fn with_meta(mut self, meta: bool) -> Self {
        self.meta = meta;
        self
    }

    pub fn none_pressed(&self) -> bool {
        !self.shift && !self.ctrl && !self.alt && !self.meta
    }

    pub fn only_shift(&self) -> bool {
        self.shift && !self.ctrl && !self.alt && !self.meta
    }
}

/// What a keypress inside an editing cell asks the session to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EditAction {
    CommitAndMoveRight,
    CommitAndMoveLeft,
    CommitAndMoveDown,
    CommitAndMoveUp,
    Cancel,
    /// Left to the text field (caret movement, typing)
    None,
}

impl EditAction {
    /// Row/column step for the navigating actions
    pub fn step(&self) -> Option<(isize, isize)> {
        match self {
            EditAction::CommitAndMoveRight => Some((0, 1)),
            EditAction::CommitAndMoveLeft => Some((0, -1)),
            EditAction::CommitAndMoveDown => Some((1, 0)),
            EditAction::CommitAndMoveUp => Some((-1, 0)),
            EditAction::Cancel | EditAction::None => None,
        }
    }
}

/// Convert a keypress in the editor to an action.
///
/// Tab moves right, Enter and ArrowDown move down, and Shift reverses Tab and
/// Enter. ArrowLeft/ArrowRight stay with the text field so the caret can move.
pub fn key_to_edit_action(key: Key, modifiers: Modifiers) -> EditAction {
    if modifiers.ctrl || modifiers.alt || modifiers.meta {
        return EditAction::None;
    }

    match (key, modifiers.shift) {
        (Key::Tab, false) => EditAction::CommitAndMoveRight,
        (Key::Tab, true) => EditAction::CommitAndMoveLeft,
        (Key::Enter, false) => EditAction::CommitAndMoveDown,
        (Key::Enter, true) => EditAction::CommitAndMoveUp,
        (Key::ArrowDown, _) => EditAction::CommitAndMoveDown,
        (Key::ArrowUp, _) => EditAction::CommitAndMoveUp,
        (Key::Escape, _) => EditAction::Cancel,
        _ => EditAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_from_name() {
        assert_eq!(Key::from_name("Tab"), Key::Tab);
        assert_eq!(Key::from_name("ArrowDown"), Key::ArrowDown);
        assert_eq!(Key::from_name("Esc"), Key::Escape);
        assert_eq!(Key::from_name("x"), Key::Char('x'));
        assert_eq!(Key::from_name("é"), Key::Char('é'));
        assert_eq!(Key::from_name("F5"), Key::Unknown);
        assert_eq!(Key::from_name(""), Key::Unknown);
    }

    #[test]
    fn test_modifiers_builder() {
        let mods = Modifiers::new().with_shift(true);
        assert!(mods.only_shift());
        assert!(!mods.none_pressed());

        let mods = Modifiers::new().with_ctrl(true).with_alt(true).with_meta(true);
        assert!(!mods.only_shift());
        assert!(Modifiers::new().none_pressed());
    }

    #[test]
    fn test_navigation_keys() {
        let none = Modifiers::new();
        let shift = Modifiers::new().with_shift(true);

        assert_eq!(key_to_edit_action(Key::Tab, none), EditAction::CommitAndMoveRight);
        assert_eq!(key_to_edit_action(Key::Tab, shift), EditAction::CommitAndMoveLeft);
        assert_eq!(key_to_edit_action(Key::Enter, none), EditAction::CommitAndMoveDown);
        assert_eq!(key_to_edit_action(Key::Enter, shift), EditAction::CommitAndMoveUp);
        assert_eq!(key_to_edit_action(Key::ArrowDown, none), EditAction::CommitAndMoveDown);
        assert_eq!(key_to_edit_action(Key::ArrowUp, none), EditAction::CommitAndMoveUp);
        assert_eq!(key_to_edit_action(Key::Escape, none), EditAction::Cancel);
    }

    #[test]
    fn test_caret_and_typing_keys_pass_through() {
        let none = Modifiers::new();
        assert_eq!(key_to_edit_action(Key::ArrowLeft, none), EditAction::None);
        assert_eq!(key_to_edit_action(Key::ArrowRight, none), EditAction::None);
        assert_eq!(key_to_edit_action(Key::Char('a'), none), EditAction::None);
        assert_eq!(key_to_edit_action(Key::Unknown, none), EditAction::None);
    }

    #[test]
    fn test_shortcuts_pass_through() {
        let ctrl = Modifiers::new().with_ctrl(true);
        assert_eq!(key_to_edit_action(Key::Tab, ctrl), EditAction::None);
        let meta = Modifiers::new().with_meta(true);
        assert_eq!(key_to_edit_action(Key::Enter, meta), EditAction::None);
    }

    #[test]
    fn test_steps() {
        assert_eq!(EditAction::CommitAndMoveRight.step(), Some((0, 1)));
        assert_eq!(EditAction::CommitAndMoveDown.step(), Some((1, 0)));
        assert_eq!(EditAction::Cancel.step(), None);
    }
}
