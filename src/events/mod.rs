//! DOM listeners that feed the orbit controls.
//!
//! Every listener is owned by a [`Listeners`] set and removed from its
//! target when the set drops, so an unmounted view leaves nothing behind.

use helix_core::HelixViewer;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

mod keyboard;
mod pointer;

struct Listener {
    target: web::EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl Drop for Listener {
    fn drop(&mut self) {
        _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }
}

#[derive(Default)]
pub struct Listeners {
    items: Vec<Listener>,
}

impl Listeners {
    /// Attach `handler` for `kind` events on `target`. Events that are not
    /// an `E` are ignored. Non-passive listeners may call `preventDefault`.
    pub(crate) fn listen<E, F>(
        &mut self,
        target: &web::EventTarget,
        kind: &'static str,
        passive: bool,
        mut handler: F,
    ) where
        E: JsCast + 'static,
        F: FnMut(E) + 'static,
    {
        let closure = Closure::wrap(Box::new(move |ev: web::Event| {
            if let Ok(ev) = ev.dyn_into::<E>() {
                handler(ev);
            }
        }) as Box<dyn FnMut(web::Event)>);
        let opts = web::AddEventListenerOptions::new();
        opts.set_passive(passive);
        if let Err(e) = target.add_event_listener_with_callback_and_add_event_listener_options(
            kind,
            closure.as_ref().unchecked_ref(),
            &opts,
        ) {
            log::warn!("[events] could not listen for {kind}: {e:?}");
            return;
        }
        self.items.push(Listener {
            target: target.clone(),
            kind,
            closure,
        });
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub viewer: Rc<RefCell<HelixViewer>>,
    // set by window resize, consumed by the frame callback
    pub resized: Rc<Cell<bool>>,
}

pub fn wire_input_handlers(w: InputWiring) -> Listeners {
    let mut listeners = Listeners::default();
    pointer::wire_pointer(&w, &mut listeners);
    pointer::wire_wheel(&w, &mut listeners);
    pointer::wire_contextmenu(&w, &mut listeners);
    keyboard::wire_keydown(&w, &mut listeners);
    wire_resize(&w, &mut listeners);
    log::debug!("[events] {} listeners attached", listeners.len());
    listeners
}

fn wire_resize(w: &InputWiring, listeners: &mut Listeners) {
    let Some(window) = web::window() else {
        return;
    };
    let resized = w.resized.clone();
    listeners.listen(&window, "resize", true, move |_: web::Event| {
        resized.set(true);
    });
}
