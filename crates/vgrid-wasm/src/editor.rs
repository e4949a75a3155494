use vgrid_core::{FocusTarget, Modifiers};
use web_sys::HtmlInputElement;

/// The `<input>` rendered for a cell in editing mode
pub struct EditorHandle(HtmlInputElement);

impl EditorHandle {
    pub fn new(input: HtmlInputElement) -> Self {
        Self(input)
    }

    pub fn value(&self) -> String {
        self.0.value()
    }
}

impl FocusTarget for EditorHandle {
    fn focus_and_select(&self) {
        match self.0.focus() {
            Ok(()) => self.0.select(),
            Err(_err) => {
                #[cfg(target_arch = "wasm32")]
                web_sys::console::warn_2(&"[vgrid] editor focus failed".into(), &_err);
            }
        }
    }
}

/// Build [`Modifiers`] from the flags of a DOM `KeyboardEvent`
pub fn modifiers_from_flags(shift: bool, ctrl: bool, alt: bool, meta: bool) -> Modifiers {
    Modifiers::new()
        .with_shift(shift)
        .with_ctrl(ctrl)
        .with_alt(alt)
        .with_meta(meta)
}
