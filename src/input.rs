// Pure mapping from DOM event fields to controller input.
//
// Kept free of `web_sys` so the mapping can be tested on the host.
use glam::Vec2;
use helix_core::{Modifiers, PanKey, PointerButton, PointerKind};

/// `MouseEvent.button` to a controller button. Back/forward buttons are not
/// mapped.
#[inline]
pub fn pointer_button(button: i16) -> Option<PointerButton> {
    match button {
        0 => Some(PointerButton::Primary),
        1 => Some(PointerButton::Middle),
        2 => Some(PointerButton::Secondary),
        _ => None,
    }
}

/// `PointerEvent.pointerType`. Unknown strings are treated as a mouse.
#[inline]
pub fn pointer_kind(pointer_type: &str) -> PointerKind {
    match pointer_type {
        "touch" => PointerKind::Touch,
        "pen" => PointerKind::Pen,
        _ => PointerKind::Mouse,
    }
}

/// `KeyboardEvent.key` to a pan direction.
#[inline]
pub fn pan_key(key: &str) -> Option<PanKey> {
    match key {
        "ArrowUp" => Some(PanKey::Up),
        "ArrowDown" => Some(PanKey::Down),
        "ArrowLeft" => Some(PanKey::Left),
        "ArrowRight" => Some(PanKey::Right),
        _ => None,
    }
}

#[inline]
pub fn modifiers(shift: bool, ctrl: bool, meta: bool) -> Modifiers {
    Modifiers { shift, ctrl, meta }
}

/// Client coordinates to CSS pixels relative to the canvas' top-left.
#[inline]
pub fn canvas_css_position(client_x: f64, client_y: f64, rect_left: f64, rect_top: f64) -> Vec2 {
    Vec2::new((client_x - rect_left) as f32, (client_y - rect_top) as f32)
}

/// `WheelEvent.deltaY` in CSS pixels for any `deltaMode` (0 pixel, 1 line,
/// 2 page).
#[inline]
pub fn wheel_delta_px(delta_y: f64, delta_mode: u32, line_px: f64, page_px: f64) -> f32 {
    let scale = match delta_mode {
        1 => line_px,
        2 => page_px,
        _ => 1.0,
    };
    (delta_y * scale) as f32
}

/// Optional JS seed to a `u64`. Only finite, non-negative integers are
/// accepted; anything else lets the viewer pick a random seed.
pub fn seed_from_js(seed: Option<f64>) -> Option<u64> {
    const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;
    let s = seed?;
    if s.is_finite() && s >= 0.0 && s.fract() == 0.0 && s <= MAX_SAFE_INTEGER {
        Some(s as u64)
    } else {
        None
    }
}
