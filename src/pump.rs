//! Browser event sources that drive the frame loop.

use gloo_utils::window;
use log::warn;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

type FrameClosure = Closure<dyn FnMut(f64)>;

/// Calls a callback once per display refresh until dropped.
pub struct FramePump {
    closure: Rc<RefCell<Option<FrameClosure>>>,
    request_id: Rc<Cell<Option<i32>>>,
}

impl FramePump {
    pub fn start(mut on_frame: impl FnMut(f64) + 'static) -> Result<Self, JsValue> {
        // The closure re-schedules itself, so it needs a handle to its own slot.
        let closure: Rc<RefCell<Option<FrameClosure>>> = Rc::new(RefCell::new(None));
        let request_id = Rc::new(Cell::new(None));

        let slot = closure.clone();
        let id = request_id.clone();
        *closure.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
            on_frame(timestamp);
            if let Some(next) = slot.borrow().as_ref() {
                match window().request_animation_frame(next.as_ref().unchecked_ref()) {
                    Ok(handle) => id.set(Some(handle)),
                    Err(e) => {
                        warn!("Frame pump stopped: {:?}", e);
                        id.set(None);
                    }
                }
            }
        }) as Box<dyn FnMut(f64)>));

        if let Some(first) = closure.borrow().as_ref() {
            let handle = window().request_animation_frame(first.as_ref().unchecked_ref())?;
            request_id.set(Some(handle));
        }
        Ok(Self {
            closure,
            request_id,
        })
    }
}

impl Drop for FramePump {
    fn drop(&mut self) {
        if let Some(handle) = self.request_id.take() {
            let _ = window().cancel_animation_frame(handle);
        }
        self.closure.borrow_mut().take();
    }
}

/// Window `resize` subscription, removed when dropped.
pub struct ResizeListener {
    closure: Closure<dyn FnMut()>,
}

impl ResizeListener {
    pub fn attach(on_resize: impl FnMut() + 'static) -> Result<Self, JsValue> {
        let closure = Closure::wrap(Box::new(on_resize) as Box<dyn FnMut()>);
        window().add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        Ok(Self { closure })
    }
}

impl Drop for ResizeListener {
    fn drop(&mut self) {
        let _ = window()
            .remove_event_listener_with_callback("resize", self.closure.as_ref().unchecked_ref());
    }
}
