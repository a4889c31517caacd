// Host-side tests for the native input mapping.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}

use helix_core::{PanKey, PointerButton};
use input::*;
use winit::dpi::PhysicalPosition;
use winit::event::{MouseButton, MouseScrollDelta};
use winit::keyboard::{Key, ModifiersState, NamedKey};

#[test]
fn named_keys_map_to_actions() {
    assert_eq!(action_for(&Key::Named(NamedKey::Space)), Some(Action::TogglePlaying));
    assert_eq!(action_for(&Key::Named(NamedKey::Escape)), Some(Action::Exit));
    assert_eq!(
        action_for(&Key::Named(NamedKey::ArrowLeft)),
        Some(Action::Pan(PanKey::Left))
    );
    assert_eq!(action_for(&Key::Named(NamedKey::Enter)), None);
}

#[test]
fn letter_keys_ignore_case() {
    for (lower, upper, action) in [
        ("m", "M", Action::ToggleMuted),
        ("r", "R", Action::ResetCamera),
        ("c", "C", Action::SwitchPreset),
    ] {
        assert_eq!(action_for(&Key::Character(lower.into())), Some(action));
        assert_eq!(action_for(&Key::Character(upper.into())), Some(action));
    }
    assert_eq!(action_for(&Key::Character("x".into())), None);
}

#[test]
fn mouse_buttons_map_like_the_browser() {
    assert_eq!(pointer_button(MouseButton::Left), Some(PointerButton::Primary));
    assert_eq!(pointer_button(MouseButton::Middle), Some(PointerButton::Middle));
    assert_eq!(pointer_button(MouseButton::Right), Some(PointerButton::Secondary));
    assert_eq!(pointer_button(MouseButton::Back), None);
}

#[test]
fn scrolling_up_zooms_in() {
    assert!(wheel_delta(MouseScrollDelta::LineDelta(0.0, 1.0)) < 0.0);
    assert!(wheel_delta(MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, -12.0))) > 0.0);
}

#[test]
fn modifiers_follow_winit_state() {
    let m = modifiers(ModifiersState::SHIFT | ModifiersState::SUPER);
    assert!(m.shift && m.meta && !m.ctrl);
    assert!(!modifiers(ModifiersState::empty()).any());
}

#[test]
fn physical_positions_are_scaled_to_logical() {
    assert_eq!(logical_position(200.0, 100.0, 2.0), glam::Vec2::new(100.0, 50.0));
    assert_eq!(logical_position(200.0, 100.0, 0.0), glam::Vec2::new(200.0, 100.0));
}
