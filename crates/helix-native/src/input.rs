// winit input mapped onto viewer actions and controller input.
use glam::Vec2;
use helix_core::{Modifiers, PanKey, PointerButton};
use winit::event::{MouseButton, MouseScrollDelta};
use winit::keyboard::{Key, ModifiersState, NamedKey};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    TogglePlaying,
    ToggleMuted,
    ResetCamera,
    SwitchPreset,
    Pan(PanKey),
    Exit,
}

pub fn action_for(key: &Key) -> Option<Action> {
    match key {
        Key::Named(NamedKey::Space) => Some(Action::TogglePlaying),
        Key::Named(NamedKey::Escape) => Some(Action::Exit),
        Key::Named(NamedKey::ArrowUp) => Some(Action::Pan(PanKey::Up)),
        Key::Named(NamedKey::ArrowDown) => Some(Action::Pan(PanKey::Down)),
        Key::Named(NamedKey::ArrowLeft) => Some(Action::Pan(PanKey::Left)),
        Key::Named(NamedKey::ArrowRight) => Some(Action::Pan(PanKey::Right)),
        Key::Character(c) => match c.as_str() {
            "m" | "M" => Some(Action::ToggleMuted),
            "r" | "R" => Some(Action::ResetCamera),
            "c" | "C" => Some(Action::SwitchPreset),
            " " => Some(Action::TogglePlaying),
            _ => None,
        },
        _ => None,
    }
}

#[inline]
pub fn pointer_button(button: MouseButton) -> Option<PointerButton> {
    match button {
        MouseButton::Left => Some(PointerButton::Primary),
        MouseButton::Middle => Some(PointerButton::Middle),
        MouseButton::Right => Some(PointerButton::Secondary),
        _ => None,
    }
}

#[inline]
pub fn modifiers(state: ModifiersState) -> Modifiers {
    Modifiers {
        shift: state.shift_key(),
        ctrl: state.control_key(),
        meta: state.super_key(),
    }
}

/// Wheel delta in the DOM convention the controls expect: negative zooms in.
/// winit reports scrolling up (away from the user) as positive.
#[inline]
pub fn wheel_delta(delta: MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => -y,
        MouseScrollDelta::PixelDelta(p) => -(p.y as f32),
    }
}

/// Physical window coordinates to logical pixels.
#[inline]
pub fn logical_position(x: f64, y: f64, scale_factor: f64) -> Vec2 {
    let s = if scale_factor.is_finite() && scale_factor > 0.0 {
        scale_factor
    } else {
        1.0
    };
    Vec2::new((x / s) as f32, (y / s) as f32)
}
