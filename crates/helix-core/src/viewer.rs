//! The mounted helix component.
//!
//! A [`HelixViewer`] owns every piece of per-mount state: the generated
//! geometry, the animation driver, the camera controls and the reusable
//! frame buffers. Dropping it is the unmount.

use crate::animation::AnimationDriver;
use crate::constants::MAX_PIXEL_RATIO;
use crate::controls::OrbitControls;
use crate::error::ConfigResult;
use crate::helix::DoubleHelix;
use crate::particles::{generate_from_params, SparkleField};
use crate::preset::HelixSceneConfig;
use crate::render_data::{BackdropUniforms, FrameGeometry, SceneUniforms};
use crate::scene::{Scene, SceneComposer};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Canvas size in CSS pixels plus the display's device pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub device_pixel_ratio: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
            device_pixel_ratio: 1.0,
        }
    }
}

impl Viewport {
    pub fn new(width: f64, height: f64, device_pixel_ratio: f64) -> Self {
        Self {
            width,
            height,
            device_pixel_ratio,
        }
    }

    /// Device pixel ratio capped at [`MAX_PIXEL_RATIO`]; non-finite or
    /// non-positive ratios fall back to 1.
    pub fn pixel_ratio(&self) -> f64 {
        let dpr = self.device_pixel_ratio;
        if dpr.is_finite() && dpr > 0.0 {
            dpr.min(MAX_PIXEL_RATIO)
        } else {
            1.0
        }
    }

    /// Drawing-buffer size in physical pixels, each side at least 1.
    pub fn backing_size(&self) -> (u32, u32) {
        let ratio = self.pixel_ratio();
        let side = |css: f64| {
            let px = (css.max(0.0) * ratio).round();
            if px.is_finite() {
                (px as u32).max(1)
            } else {
                1
            }
        };
        (side(self.width), side(self.height))
    }

    pub fn css_size(&self) -> (f32, f32) {
        (self.width.max(1.0) as f32, self.height.max(1.0) as f32)
    }

    pub fn aspect(&self) -> f32 {
        let (w, h) = self.css_size();
        w / h
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewerProps {
    /// Drives camera auto-rotate.
    pub is_playing: bool,
    /// Stored only; the viewer has no audio.
    pub is_muted: bool,
}

impl Default for ViewerProps {
    fn default() -> Self {
        Self {
            is_playing: true,
            is_muted: false,
        }
    }
}

pub struct HelixViewer {
    config: HelixSceneConfig,
    seed: u64,
    props: ViewerProps,
    viewport: Viewport,
    scene: Scene,
    driver: AnimationDriver,
    controls: OrbitControls,
    geometry: FrameGeometry,
}

impl HelixViewer {
    pub fn mount(
        config: HelixSceneConfig,
        props: ViewerProps,
        viewport: Viewport,
    ) -> ConfigResult<Self> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);

        let field = generate_from_params(&config.particles, &mut rng);
        let sparkles = SparkleField::generate(&config.sparkles, &mut rng);
        let helix = DoubleHelix::from_params(&config.helix);
        let scene = SceneComposer::compose(&config, helix, sparkles, viewport.aspect());

        let particle_count = field.len();
        let driver = AnimationDriver::new(config.animation.clone(), field);
        let mut controls = OrbitControls::new(scene.camera.clone(), config.controls.clone());
        let (w, h) = viewport.css_size();
        controls.set_viewport(w, h);
        controls.set_auto_rotate(props.is_playing);

        let mut geometry = FrameGeometry::for_scene(&scene, particle_count);
        geometry.rebuild(&scene, driver.state(), driver.snapshot());

        log::info!(
            "[viewer] mounted preset={} seed={} points={} particles={} sparkles={}",
            config.preset,
            seed,
            scene.helix.len(),
            particle_count,
            scene.sparkles.len()
        );

        Ok(Self {
            config,
            seed,
            props,
            viewport,
            scene,
            driver,
            controls,
            geometry,
        })
    }

    #[inline]
    pub fn config(&self) -> &HelixSceneConfig {
        &self.config
    }

    /// Seed the particle field was generated from.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[inline]
    pub fn props(&self) -> ViewerProps {
        self.props
    }

    pub fn set_props(&mut self, props: ViewerProps) {
        if props.is_playing != self.props.is_playing {
            log::debug!("[viewer] playing={}", props.is_playing);
        }
        self.controls.set_auto_rotate(props.is_playing);
        self.props = props;
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn resize(&mut self, viewport: Viewport) {
        let (w, h) = viewport.css_size();
        self.controls.set_viewport(w, h);
        self.viewport = viewport;
    }

    #[inline]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[inline]
    pub fn driver(&self) -> &AnimationDriver {
        &self.driver
    }

    #[inline]
    pub fn controls(&self) -> &OrbitControls {
        &self.controls
    }

    #[inline]
    pub fn controls_mut(&mut self) -> &mut OrbitControls {
        &mut self.controls
    }

    pub fn reset_camera(&mut self) {
        self.controls.reset();
    }

    #[inline]
    pub fn geometry(&self) -> &FrameGeometry {
        &self.geometry
    }

    /// Advance one presented frame. A frame with a non-finite `elapsed` is
    /// skipped and the previous geometry is returned unchanged.
    pub fn frame(&mut self, elapsed: f64) -> &FrameGeometry {
        if self.driver.tick(elapsed) {
            self.controls.update();
            self.geometry
                .rebuild(&self.scene, self.driver.state(), self.driver.snapshot());
        }
        &self.geometry
    }

    pub fn uniforms(&self) -> SceneUniforms {
        SceneUniforms::new(
            self.controls.camera(),
            &self.scene,
            self.driver.state().elapsed,
        )
    }

    pub fn backdrop_uniforms(&self) -> BackdropUniforms {
        BackdropUniforms::new(
            &self.scene,
            self.controls.azimuth(),
            self.controls.polar(),
            self.viewport.aspect(),
            self.driver.state().elapsed,
        )
    }
}
