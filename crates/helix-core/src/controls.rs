//! Orbit camera controls: rotate, dolly and pan around a look-at target with
//! inertial damping and an optional auto-rotate.
//!
//! Input handlers only accumulate pending deltas; [`OrbitControls::update`]
//! integrates them once per frame and is the only place the camera moves.
//! Pixel quantities are CSS pixels of the canvas.

use crate::constants::{
    AUTO_ROTATE_STEP_PER_SPEED, KEY_PAN_PIXELS, POLAR_EPSILON, WHEEL_ZOOM_BASE,
};
use crate::scene::Camera;
use glam::{Vec2, Vec3};
use smallvec::SmallVec;
use std::f32::consts::{PI, TAU};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Pen,
    Touch,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub meta: bool,
}

impl Modifiers {
    #[inline]
    pub fn any(self) -> bool {
        self.shift || self.ctrl || self.meta
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerInput {
    pub id: i32,
    pub position: Vec2,
    pub button: PointerButton,
    pub kind: PointerKind,
    pub modifiers: Modifiers,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanKey {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Clone, Debug, PartialEq)]
pub struct OrbitParams {
    pub min_distance: f32,
    pub max_distance: f32,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub auto_rotate_speed: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub enable_rotate: bool,
    pub enable_zoom: bool,
    pub enable_pan: bool,
}

impl Default for OrbitParams {
    fn default() -> Self {
        Self {
            min_distance: 5.0,
            max_distance: 35.0,
            enable_damping: true,
            damping_factor: 0.08,
            auto_rotate_speed: 2.5,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
            enable_rotate: true,
            enable_zoom: true,
            enable_pan: true,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Spherical {
    radius: f32,
    theta: f32, // azimuth around +Y, measured from +Z
    phi: f32,   // polar angle from +Y
}

impl Spherical {
    fn from_offset(v: Vec3) -> Self {
        let radius = v.length();
        if radius <= f32::EPSILON {
            return Self::default();
        }
        Self {
            radius,
            theta: v.x.atan2(v.z),
            phi: (v.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    fn to_offset(self) -> Vec3 {
        let sin_phi = self.phi.sin();
        Vec3::new(
            self.radius * sin_phi * self.theta.sin(),
            self.radius * self.phi.cos(),
            self.radius * sin_phi * self.theta.cos(),
        )
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum Gesture {
    #[default]
    Idle,
    Rotate,
    Dolly,
    Pan,
    TouchDollyPan,
}

#[derive(Clone, Copy, Debug)]
struct ActivePointer {
    id: i32,
    position: Vec2,
    kind: PointerKind,
}

pub struct OrbitControls {
    params: OrbitParams,
    camera: Camera,
    target: Vec3,
    spherical: Spherical,
    delta_theta: f32,
    delta_phi: f32,
    pan_offset: Vec3,
    scale: f32,
    auto_rotate: bool,
    gesture: Gesture,
    pointers: SmallVec<[ActivePointer; 2]>,
    last: Vec2,
    pinch_distance: f32,
    client_size: Vec2,
    saved: (Vec3, Spherical),
}

impl OrbitControls {
    pub fn new(camera: Camera, params: OrbitParams) -> Self {
        let target = camera.target;
        let mut spherical = Spherical::from_offset(camera.eye - target);
        spherical.radius = spherical
            .radius
            .clamp(params.min_distance, params.max_distance);
        let mut controls = Self {
            params,
            camera,
            target,
            spherical,
            delta_theta: 0.0,
            delta_phi: 0.0,
            pan_offset: Vec3::ZERO,
            scale: 1.0,
            auto_rotate: false,
            gesture: Gesture::Idle,
            pointers: SmallVec::new(),
            last: Vec2::ZERO,
            pinch_distance: 0.0,
            client_size: Vec2::new(1.0, 1.0),
            saved: (target, spherical),
        };
        controls.sync_camera();
        controls
    }

    #[inline]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    #[inline]
    pub fn params(&self) -> &OrbitParams {
        &self.params
    }

    #[inline]
    pub fn target(&self) -> Vec3 {
        self.target
    }

    #[inline]
    pub fn distance(&self) -> f32 {
        self.spherical.radius
    }

    #[inline]
    pub fn azimuth(&self) -> f32 {
        self.spherical.theta
    }

    #[inline]
    pub fn polar(&self) -> f32 {
        self.spherical.phi
    }

    #[inline]
    pub fn auto_rotate(&self) -> bool {
        self.auto_rotate
    }

    pub fn set_auto_rotate(&mut self, enabled: bool) {
        self.auto_rotate = enabled;
    }

    #[inline]
    pub fn is_interacting(&self) -> bool {
        self.gesture != Gesture::Idle
    }

    /// Canvas size in CSS pixels; drives rotation/pan scaling and aspect.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.client_size = Vec2::new(width.max(1.0), height.max(1.0));
        self.camera.aspect = self.client_size.x / self.client_size.y;
    }

    // ---------------- Primitive motions ----------------

    pub fn rotate_left(&mut self, angle: f32) {
        self.delta_theta -= angle;
    }

    pub fn rotate_up(&mut self, angle: f32) {
        self.delta_phi -= angle;
    }

    /// Move towards the target; `factor < 1` brings the camera closer.
    pub fn dolly_in(&mut self, factor: f32) {
        if factor.is_finite() && factor > 0.0 {
            self.scale *= factor;
        }
    }

    pub fn dolly_out(&mut self, factor: f32) {
        if factor.is_finite() && factor > 0.0 {
            self.scale /= factor;
        }
    }

    /// Pan so the scene follows a drag of `(dx, dy)` CSS pixels.
    pub fn pan_pixels(&mut self, dx: f32, dy: f32) {
        if !(dx.is_finite() && dy.is_finite()) {
            return;
        }
        let (right, up, _) = self.camera.basis();
        let target_distance =
            (self.camera.eye - self.target).length() * (self.camera.fovy_radians * 0.5).tan();
        let h = self.client_size.y;
        self.pan_offset += right * (-2.0 * dx * target_distance / h);
        self.pan_offset += up * (2.0 * dy * target_distance / h);
    }

    #[inline]
    fn zoom_scale(&self) -> f32 {
        WHEEL_ZOOM_BASE.powf(self.params.zoom_speed)
    }

    #[inline]
    fn rotate_by_pixels(&mut self, d: Vec2) {
        let h = self.client_size.y;
        let k = TAU * self.params.rotate_speed / h;
        self.rotate_left(d.x * k);
        self.rotate_up(d.y * k);
    }

    // ---------------- Input events ----------------

    /// Wheel notch; only the sign of `delta_y` is used. Returns whether the
    /// wheel changed the zoom.
    pub fn wheel(&mut self, delta_y: f32) -> bool {
        if !self.params.enable_zoom {
            return false;
        }
        let s = self.zoom_scale();
        if delta_y < 0.0 {
            self.dolly_in(s);
        } else if delta_y > 0.0 {
            self.dolly_out(s);
        } else {
            return false;
        }
        true
    }

    /// Returns whether the key was consumed.
    pub fn pan_key(&mut self, key: PanKey) -> bool {
        if !self.params.enable_pan {
            return false;
        }
        let step = KEY_PAN_PIXELS;
        match key {
            PanKey::Up => self.pan_pixels(0.0, step),
            PanKey::Down => self.pan_pixels(0.0, -step),
            PanKey::Left => self.pan_pixels(step, 0.0),
            PanKey::Right => self.pan_pixels(-step, 0.0),
        }
        true
    }

    /// Start tracking a pointer. Returns whether a gesture is now active.
    pub fn pointer_down(&mut self, input: PointerInput) -> bool {
        if !self.pointers.iter().any(|p| p.id == input.id) {
            self.pointers.push(ActivePointer {
                id: input.id,
                position: input.position,
                kind: input.kind,
            });
        }
        if input.kind == PointerKind::Touch {
            self.begin_touch_gesture();
        } else {
            self.last = input.position;
            self.gesture = match input.button {
                PointerButton::Primary if input.modifiers.any() => self.gate_pan(),
                PointerButton::Primary => self.gate_rotate(),
                PointerButton::Middle if self.params.enable_zoom => Gesture::Dolly,
                PointerButton::Middle => Gesture::Idle,
                PointerButton::Secondary => self.gate_pan(),
            };
        }
        self.gesture != Gesture::Idle
    }

    pub fn pointer_move(&mut self, id: i32, position: Vec2) {
        let Some(slot) = self.pointers.iter_mut().find(|p| p.id == id) else {
            return;
        };
        slot.position = position;
        match self.gesture {
            Gesture::Idle => {}
            Gesture::Rotate => {
                let d = position - self.last;
                self.last = position;
                self.rotate_by_pixels(d);
            }
            Gesture::Pan => {
                let d = (position - self.last) * self.params.pan_speed;
                self.last = position;
                self.pan_pixels(d.x, d.y);
            }
            Gesture::Dolly => {
                let dy = position.y - self.last.y;
                self.last = position;
                let s = self.zoom_scale();
                if dy > 0.0 {
                    self.dolly_in(s);
                } else if dy < 0.0 {
                    self.dolly_out(s);
                }
            }
            Gesture::TouchDollyPan => {
                let (distance, mid) = self.pinch_metrics();
                if self.params.enable_zoom && self.pinch_distance > 0.0 && distance > 0.0 {
                    let ratio = (distance / self.pinch_distance).powf(self.params.zoom_speed);
                    self.dolly_out(ratio);
                }
                if self.params.enable_pan {
                    let d = (mid - self.last) * self.params.pan_speed;
                    self.pan_pixels(d.x, d.y);
                }
                self.pinch_distance = distance;
                self.last = mid;
            }
        }
    }

    pub fn pointer_up(&mut self, id: i32) {
        let was_touch = self
            .pointers
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.kind == PointerKind::Touch)
            .unwrap_or(false);
        self.pointers.retain(|p| p.id != id);
        if self.pointers.is_empty() {
            self.gesture = Gesture::Idle;
        } else if was_touch {
            self.begin_touch_gesture();
        }
    }

    /// Drop every tracked pointer, e.g. when the canvas loses focus.
    pub fn cancel(&mut self) {
        self.pointers.clear();
        self.gesture = Gesture::Idle;
    }

    fn gate_rotate(&self) -> Gesture {
        if self.params.enable_rotate {
            Gesture::Rotate
        } else {
            Gesture::Idle
        }
    }

    fn gate_pan(&self) -> Gesture {
        if self.params.enable_pan {
            Gesture::Pan
        } else {
            Gesture::Idle
        }
    }

    fn begin_touch_gesture(&mut self) {
        match self.pointers.len() {
            0 => self.gesture = Gesture::Idle,
            1 => {
                self.last = self.pointers[0].position;
                self.gesture = self.gate_rotate();
            }
            _ => {
                let (distance, mid) = self.pinch_metrics();
                self.pinch_distance = distance;
                self.last = mid;
                self.gesture = Gesture::TouchDollyPan;
            }
        }
    }

    fn pinch_metrics(&self) -> (f32, Vec2) {
        match (self.pointers.first(), self.pointers.get(1)) {
            (Some(a), Some(b)) => (
                a.position.distance(b.position),
                (a.position + b.position) * 0.5,
            ),
            (Some(a), None) => (0.0, a.position),
            _ => (0.0, Vec2::ZERO),
        }
    }

    // ---------------- Integration ----------------

    /// Integrate pending input, auto-rotate and damping into the camera.
    /// Call exactly once per frame. Returns whether the camera moved.
    pub fn update(&mut self) -> bool {
        let previous_eye = self.camera.eye;
        let previous_target = self.target;

        if self.auto_rotate {
            self.rotate_left(AUTO_ROTATE_STEP_PER_SPEED * self.params.auto_rotate_speed);
        }

        let (apply, keep) = if self.params.enable_damping {
            let df = self.params.damping_factor;
            (df, 1.0 - df)
        } else {
            (1.0, 0.0)
        };

        self.spherical.theta = (self.spherical.theta + self.delta_theta * apply).rem_euclid(TAU);
        self.spherical.phi = (self.spherical.phi + self.delta_phi * apply)
            .clamp(POLAR_EPSILON, PI - POLAR_EPSILON);
        self.spherical.radius = (self.spherical.radius * self.scale)
            .clamp(self.params.min_distance, self.params.max_distance);
        self.target += self.pan_offset * apply;

        self.delta_theta *= keep;
        self.delta_phi *= keep;
        self.pan_offset *= keep;
        self.scale = 1.0;

        self.sync_camera();
        previous_eye.distance_squared(self.camera.eye) > 1e-12
            || previous_target.distance_squared(self.target) > 1e-12
    }

    /// Restore the camera placement captured at construction.
    pub fn reset(&mut self) {
        let (target, spherical) = self.saved;
        self.target = target;
        self.spherical = spherical;
        self.delta_theta = 0.0;
        self.delta_phi = 0.0;
        self.pan_offset = Vec3::ZERO;
        self.scale = 1.0;
        self.cancel();
        self.sync_camera();
        log::debug!("[controls] reset to distance {:.2}", self.spherical.radius);
    }

    fn sync_camera(&mut self) {
        self.camera.target = self.target;
        self.camera.eye = self.target + self.spherical.to_offset();
    }
}
