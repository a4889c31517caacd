use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use glam::Vec2;
use helix_core::{
    FrameScheduler, FrameSubscription, HelixSceneConfig, HelixViewer, Modifiers, PointerButton,
    PointerInput, PointerKind, ViewerProps, Viewport, VisualPreset,
};
use winit::event::*;
use winit::event_loop::{EventLoop, EventLoopWindowTarget};
use winit::window::{Window, WindowBuilder};

mod input;
mod render;

use input::Action;
use render::GpuState;

const MOUSE_POINTER_ID: i32 = 0;
// touch ids are offset so they never collide with the mouse
const TOUCH_POINTER_BASE: i32 = 1;

fn viewport_for(window: &Window) -> Viewport {
    let size = window.inner_size();
    let scale = window.scale_factor();
    Viewport::new(size.width as f64 / scale, size.height as f64 / scale, scale)
}

fn mount_viewer(
    preset: VisualPreset,
    props: ViewerProps,
    viewport: Viewport,
) -> anyhow::Result<HelixViewer> {
    Ok(HelixViewer::mount(
        HelixSceneConfig::from_preset(preset),
        props,
        viewport,
    )?)
}

struct App {
    viewer: Rc<RefCell<HelixViewer>>,
    scheduler: FrameScheduler,
    _subscription: FrameSubscription,
    preset: VisualPreset,
    modifiers: Modifiers,
    cursor: Vec2,
    started: Instant,
}

impl App {
    fn new(viewer: HelixViewer, preset: VisualPreset) -> Self {
        let viewer = Rc::new(RefCell::new(viewer));
        let scheduler = FrameScheduler::new();
        let frame_viewer = viewer.clone();
        let subscription = scheduler.register_frame_callback(move |elapsed| {
            frame_viewer.borrow_mut().frame(elapsed);
        });
        Self {
            viewer,
            scheduler,
            _subscription: subscription,
            preset,
            modifiers: Modifiers::default(),
            cursor: Vec2::ZERO,
            started: Instant::now(),
        }
    }

    fn apply(&mut self, action: Action, window: &Window, elwt: &EventLoopWindowTarget<()>) {
        match action {
            Action::TogglePlaying => {
                let mut viewer = self.viewer.borrow_mut();
                let mut props = viewer.props();
                props.is_playing = !props.is_playing;
                viewer.set_props(props);
                log::info!("[native] playing={}", props.is_playing);
            }
            Action::ToggleMuted => {
                let mut viewer = self.viewer.borrow_mut();
                let mut props = viewer.props();
                props.is_muted = !props.is_muted;
                viewer.set_props(props);
                log::info!("[native] muted={}", props.is_muted);
            }
            Action::ResetCamera => self.viewer.borrow_mut().reset_camera(),
            Action::SwitchPreset => self.switch_preset(window),
            Action::Pan(key) => {
                self.viewer.borrow_mut().controls_mut().pan_key(key);
            }
            Action::Exit => elwt.exit(),
        }
    }

    fn switch_preset(&mut self, window: &Window) {
        let next = self.preset.next();
        let props = self.viewer.borrow().props();
        match mount_viewer(next, props, viewport_for(window)) {
            Ok(viewer) => {
                *self.viewer.borrow_mut() = viewer;
                self.preset = next;
            }
            Err(e) => log::error!("[native] could not switch to {next}: {e:?}"),
        }
    }

    fn mouse_button(&mut self, state: ElementState, button: MouseButton) {
        let Some(button) = input::pointer_button(button) else {
            return;
        };
        let mut viewer = self.viewer.borrow_mut();
        let controls = viewer.controls_mut();
        match state {
            ElementState::Pressed => {
                controls.pointer_down(PointerInput {
                    id: MOUSE_POINTER_ID,
                    position: self.cursor,
                    button,
                    kind: PointerKind::Mouse,
                    modifiers: self.modifiers,
                });
            }
            ElementState::Released => controls.pointer_up(MOUSE_POINTER_ID),
        }
    }

    fn touch(&mut self, touch: Touch, scale_factor: f64) {
        let id = TOUCH_POINTER_BASE.saturating_add(touch.id as i32);
        let position = input::logical_position(touch.location.x, touch.location.y, scale_factor);
        let mut viewer = self.viewer.borrow_mut();
        let controls = viewer.controls_mut();
        match touch.phase {
            TouchPhase::Started => {
                controls.pointer_down(PointerInput {
                    id,
                    position,
                    button: PointerButton::Primary,
                    kind: PointerKind::Touch,
                    modifiers: self.modifiers,
                });
            }
            TouchPhase::Moved => controls.pointer_move(id, position),
            TouchPhase::Ended | TouchPhase::Cancelled => controls.pointer_up(id),
        }
    }

    fn window_event(
        &mut self,
        event: WindowEvent,
        state: &mut GpuState<'_>,
        elwt: &EventLoopWindowTarget<()>,
    ) {
        let window = state.window;
        match event {
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::Resized(size) => {
                state.resize(size);
                self.viewer.borrow_mut().resize(viewport_for(window));
            }
            WindowEvent::ScaleFactorChanged { .. } => {
                self.viewer.borrow_mut().resize(viewport_for(window));
            }
            WindowEvent::Focused(false) => self.viewer.borrow_mut().controls_mut().cancel(),
            WindowEvent::ModifiersChanged(m) => self.modifiers = input::modifiers(m.state()),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key,
                        state: ElementState::Pressed,
                        repeat,
                        ..
                    },
                ..
            } => match input::action_for(&logical_key) {
                Some(action @ Action::Pan(_)) => self.apply(action, window, elwt),
                Some(action) if !repeat => self.apply(action, window, elwt),
                _ => {}
            },
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = input::logical_position(position.x, position.y, window.scale_factor());
                self.viewer
                    .borrow_mut()
                    .controls_mut()
                    .pointer_move(MOUSE_POINTER_ID, self.cursor);
            }
            WindowEvent::MouseInput { state: s, button, .. } => self.mouse_button(s, button),
            WindowEvent::MouseWheel { delta, .. } => {
                self.viewer
                    .borrow_mut()
                    .controls_mut()
                    .wheel(input::wheel_delta(delta));
            }
            WindowEvent::Touch(touch) => self.touch(touch, window.scale_factor()),
            _ => {}
        }
    }

    fn frame(&mut self, state: &mut GpuState<'_>, elwt: &EventLoopWindowTarget<()>) {
        self.scheduler
            .present_frame(self.started.elapsed().as_secs_f64());
        let result = state.render(&self.viewer.borrow());
        match result {
            Ok(_) => state.window.request_redraw(),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                state.resize(state.window.inner_size())
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("[gpu] out of memory");
                elwt.exit()
            }
            Err(e) => log::warn!("[gpu] frame dropped: {e:?}"),
        }
    }
}

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let event_loop = EventLoop::new().expect("event loop");
    let window = WindowBuilder::new()
        .with_title("DNA Helix (native)")
        .build(&event_loop)
        .expect("window");

    let preset = VisualPreset::default();
    let viewer = mount_viewer(preset, ViewerProps::default(), viewport_for(&window)).expect("mount");
    let mut state = pollster::block_on(GpuState::new(&window, &viewer)).expect("gpu");
    let mut app = App::new(viewer, preset);
    log::info!("[native] Space play/pause, M mute, R reset camera, C switch preset, Esc quit");

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent { event, .. } => app.window_event(event, &mut state, elwt),
            Event::AboutToWait => app.frame(&mut state, elwt),
            _ => {}
        })
        .unwrap();
}
