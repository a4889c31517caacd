// Host-side checks on the web renderer's tuning constants.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn post_processing_constants_are_in_range() {
    assert!(BLOOM_STRENGTH > 0.0 && BLOOM_STRENGTH <= 2.0);
    assert!(BLOOM_THRESHOLD >= 0.0);
    assert!(EXPOSURE > 0.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn clear_color_is_opaque() {
    assert_eq!(CLEAR_COLOR[3], 1.0);
    assert!(CLEAR_COLOR.iter().all(|c| (0.0..=1.0).contains(c)));
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn buffers_and_units_are_sane() {
    assert!(INITIAL_INSTANCE_CAPACITY.is_power_of_two());
    assert!(WHEEL_LINE_PX > 0.0 && WHEEL_PAGE_PX > WHEEL_LINE_PX);
    assert_eq!(MS_PER_SECOND, 1000.0);
}
