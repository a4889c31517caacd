use super::{InputWiring, Listeners};
use crate::constants::{WHEEL_LINE_PX, WHEEL_PAGE_PX};
use crate::input;
use helix_core::{PointerButton, PointerInput};
use web_sys as web;

fn pointer_input(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> PointerInput {
    let rect = canvas.get_bounding_client_rect();
    PointerInput {
        id: ev.pointer_id(),
        position: input::canvas_css_position(
            ev.client_x() as f64,
            ev.client_y() as f64,
            rect.left(),
            rect.top(),
        ),
        // buttons other than the three mapped ones fall back to primary for
        // touch and pen, where `button` is 0 or -1
        button: input::pointer_button(ev.button()).unwrap_or(PointerButton::Primary),
        kind: input::pointer_kind(&ev.pointer_type()),
        modifiers: input::modifiers(ev.shift_key(), ev.ctrl_key(), ev.meta_key()),
    }
}

pub(super) fn wire_pointer(w: &InputWiring, listeners: &mut Listeners) {
    let target: &web::EventTarget = w.canvas.as_ref();

    let down = w.clone();
    listeners.listen(target, "pointerdown", false, move |ev: web::PointerEvent| {
        if input::pointer_button(ev.button()).is_none() && ev.pointer_type() == "mouse" {
            return;
        }
        let p = pointer_input(&ev, &down.canvas);
        let started = down.viewer.borrow_mut().controls_mut().pointer_down(p);
        if started {
            _ = down.canvas.set_pointer_capture(p.id);
            _ = down.canvas.focus();
            ev.prevent_default();
        }
    });

    let moved = w.clone();
    listeners.listen(target, "pointermove", true, move |ev: web::PointerEvent| {
        let p = pointer_input(&ev, &moved.canvas);
        moved
            .viewer
            .borrow_mut()
            .controls_mut()
            .pointer_move(p.id, p.position);
    });

    for kind in ["pointerup", "pointercancel"] {
        let up = w.clone();
        listeners.listen(target, kind, true, move |ev: web::PointerEvent| {
            let id = ev.pointer_id();
            up.viewer.borrow_mut().controls_mut().pointer_up(id);
            if up.canvas.has_pointer_capture(id) {
                _ = up.canvas.release_pointer_capture(id);
            }
        });
    }
}

pub(super) fn wire_wheel(w: &InputWiring, listeners: &mut Listeners) {
    let w = w.clone();
    let target: web::EventTarget = w.canvas.clone().into();
    listeners.listen(&target, "wheel", false, move |ev: web::WheelEvent| {
        let dy = input::wheel_delta_px(ev.delta_y(), ev.delta_mode(), WHEEL_LINE_PX, WHEEL_PAGE_PX);
        if w.viewer.borrow_mut().controls_mut().wheel(dy) {
            ev.prevent_default();
        }
    });
}

// right-drag pans, so the context menu stays closed over the canvas
pub(super) fn wire_contextmenu(w: &InputWiring, listeners: &mut Listeners) {
    let target: &web::EventTarget = w.canvas.as_ref();
    listeners.listen(target, "contextmenu", false, |ev: web::MouseEvent| {
        ev.prevent_default();
    });
}
