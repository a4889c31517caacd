#![cfg(target_arch = "wasm32")]
//! Browser front-end: mounts a [`HelixViewer`] on a canvas and drives it
//! from `requestAnimationFrame`.
use helix_core::{
    FrameScheduler, FrameSubscription, HelixSceneConfig, HelixViewer, VisualPreset, ViewerProps,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;

mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod render;
mod timing;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("helix-web starting");
    Ok(())
}

// Field order is drop order: stop the loop before tearing down its callback.
struct Mounted {
    raf: frame::RafLoop,
    _subscription: FrameSubscription,
    _listeners: events::Listeners,
    viewer: Rc<RefCell<HelixViewer>>,
}

/// Handle to a mounted helix. Call [`HelixView::destroy`] (or drop it from
/// JS with `free()`) to unmount.
#[wasm_bindgen]
pub struct HelixView {
    mounted: Option<Mounted>,
    seed: u64,
}

#[wasm_bindgen]
impl HelixView {
    pub fn set_playing(&mut self, is_playing: bool) {
        self.update_props(|p| p.is_playing = is_playing);
    }

    pub fn set_muted(&mut self, is_muted: bool) {
        self.update_props(|p| p.is_muted = is_muted);
    }

    pub fn reset_camera(&mut self) {
        if let Some(m) = &self.mounted {
            m.viewer.borrow_mut().reset_camera();
        }
    }

    /// Seed of the particle field, as a decimal string (u64 does not fit a
    /// JS number).
    #[wasm_bindgen(getter)]
    pub fn seed(&self) -> String {
        self.seed.to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    /// Unmount: cancel the frame loop, release the frame callback and the
    /// GPU resources, and remove every DOM listener. Idempotent.
    pub fn destroy(&mut self) {
        if let Some(mut m) = self.mounted.take() {
            m.raf.stop();
            drop(m);
            log::info!("[view] unmounted");
        }
    }

    fn update_props(&mut self, f: impl FnOnce(&mut ViewerProps)) {
        if let Some(m) = &self.mounted {
            let mut viewer = m.viewer.borrow_mut();
            let mut props = viewer.props();
            f(&mut props);
            viewer.set_props(props);
        }
    }
}

impl Drop for HelixView {
    fn drop(&mut self) {
        self.destroy();
    }
}

/// Mount the helix on `<canvas id=canvas_id>`.
///
/// `preset` names a visual preset ("showcase" or "classic"; default
/// showcase). `seed` fixes the particle layout; omit it for a random one.
#[wasm_bindgen]
pub async fn mount(
    canvas_id: String,
    is_playing: bool,
    is_muted: bool,
    preset: Option<String>,
    seed: Option<f64>,
) -> Result<HelixView, JsValue> {
    mount_inner(&canvas_id, ViewerProps { is_playing, is_muted }, preset, seed)
        .await
        .map_err(|e| {
            log::error!("mount error: {e:?}");
            JsValue::from_str(&e.to_string())
        })
}

async fn mount_inner(
    canvas_id: &str,
    props: ViewerProps,
    preset: Option<String>,
    seed: Option<f64>,
) -> anyhow::Result<HelixView> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas = dom::canvas_by_id(&document, canvas_id)?;

    let preset = match preset.as_deref() {
        Some(name) => name.parse::<VisualPreset>()?,
        None => VisualPreset::default(),
    };
    let mut config = HelixSceneConfig::from_preset(preset);
    config.seed = input::seed_from_js(seed);

    let viewport = dom::viewport_of(&canvas);
    dom::sync_canvas_backing_size(&canvas, &viewport);
    let viewer = HelixViewer::mount(config, props, viewport)?;
    let seed = viewer.seed();

    let gpu = render::GpuState::new(&canvas, &viewer).await?;
    let viewer = Rc::new(RefCell::new(viewer));
    let resized = Rc::new(Cell::new(false));

    let listeners = events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        viewer: viewer.clone(),
        resized: resized.clone(),
    });

    let scheduler = FrameScheduler::new();
    let mut ctx = frame::FrameContext {
        viewer: viewer.clone(),
        canvas,
        gpu,
        resized,
        stopped: false,
    };
    let subscription = scheduler.register_frame_callback(move |elapsed| ctx.frame(elapsed));
    let raf = frame::RafLoop::start(scheduler);

    Ok(HelixView {
        mounted: Some(Mounted {
            raf,
            _subscription: subscription,
            _listeners: listeners,
            viewer,
        }),
        seed,
    })
}
