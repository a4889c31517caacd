use super::{InputWiring, Listeners};
use crate::input;
use web_sys as web;

/// Arrow keys pan while the canvas has focus. The canvas is made focusable
/// here and takes focus on pointer down.
pub(super) fn wire_keydown(w: &InputWiring, listeners: &mut Listeners) {
    w.canvas.set_tab_index(0);
    let w = w.clone();
    let target: web::EventTarget = w.canvas.clone().into();
    listeners.listen(&target, "keydown", false, move |ev: web::KeyboardEvent| {
        let Some(key) = input::pan_key(&ev.key()) else {
            return;
        };
        if w.viewer.borrow_mut().controls_mut().pan_key(key) {
            ev.prevent_default();
        }
    });
}
