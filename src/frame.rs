use crate::constants::MS_PER_SECOND;
use crate::dom;
use crate::render;
use crate::timing::FrameClock;
use helix_core::{FrameScheduler, HelixViewer};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Everything one presented frame touches. Owned by the frame callback, so
/// it lives exactly as long as the subscription.
pub struct FrameContext {
    pub viewer: Rc<RefCell<HelixViewer>>,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: render::GpuState,
    pub resized: Rc<Cell<bool>>,
    pub stopped: bool,
}

impl FrameContext {
    pub fn frame(&mut self, elapsed: f64) {
        if self.stopped {
            return;
        }
        if self.resized.replace(false) {
            let viewport = dom::viewport_of(&self.canvas);
            let (w, h) = dom::sync_canvas_backing_size(&self.canvas, &viewport);
            self.viewer.borrow_mut().resize(viewport);
            self.gpu.resize_if_needed(w, h);
        }

        let mut viewer = self.viewer.borrow_mut();
        viewer.frame(elapsed);
        match self.gpu.render(&viewer) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.gpu.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("[gpu] out of memory; stopping the render loop");
                self.stopped = true;
            }
            Err(e) => log::warn!("[gpu] frame dropped: {e:?}"),
        }
    }
}

type TickClosure = Closure<dyn FnMut(f64)>;

/// `requestAnimationFrame` loop that presents one scheduler frame per
/// browser frame. Dropping it cancels the pending request.
pub struct RafLoop {
    handle: Rc<Cell<Option<i32>>>,
    tick: Rc<RefCell<Option<TickClosure>>>,
}

fn request_frame(tick: &RefCell<Option<TickClosure>>) -> Option<i32> {
    let window = web::window()?;
    let tick = tick.borrow();
    let closure = tick.as_ref()?;
    window
        .request_animation_frame(closure.as_ref().unchecked_ref())
        .ok()
}

impl RafLoop {
    pub fn start(scheduler: FrameScheduler) -> Self {
        let handle: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let tick: Rc<RefCell<Option<TickClosure>>> = Rc::new(RefCell::new(None));

        let handle_tick = handle.clone();
        // weak so the closure does not keep itself alive
        let tick_weak = Rc::downgrade(&tick);
        let mut clock = FrameClock::new();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp_ms: f64| {
            handle_tick.set(None);
            scheduler.present_frame(clock.elapsed(timestamp_ms, MS_PER_SECOND));
            if let Some(tick) = tick_weak.upgrade() {
                handle_tick.set(request_frame(&tick));
            }
        }) as Box<dyn FnMut(f64)>));
        handle.set(request_frame(&tick));

        Self { handle, tick }
    }

    pub fn stop(&mut self) {
        if let (Some(id), Some(window)) = (self.handle.take(), web::window()) {
            _ = window.cancel_animation_frame(id);
        }
        self.tick.borrow_mut().take();
    }
}

impl Drop for RafLoop {
    fn drop(&mut self) {
        self.stop();
    }
}
