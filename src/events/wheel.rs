use crate::constants::ZOOM_STEP;
use crate::input::wheel_zoom_delta;
use std::cell::RefCell;
use std::rc::Rc;
use supershape_core::{Engine, InputEvent};
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn wire_wheel_zoom(canvas: &web::HtmlCanvasElement, engine: Rc<RefCell<Engine>>) {
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        let delta = wheel_zoom_delta(ev.delta_y(), ZOOM_STEP);
        if delta != 0.0 {
            engine.borrow_mut().push_event(InputEvent::Zoom(delta));
        }
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
    closure.forget();
}
