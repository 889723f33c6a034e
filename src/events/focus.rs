use crate::dom;
use std::cell::RefCell;
use std::rc::Rc;
use supershape_core::{Engine, InputEvent};
use wasm_bindgen::JsCast;
use web_sys as web;

/// Drop every held control when the window blurs or the page is hidden;
/// the matching keyup would otherwise never arrive.
pub fn wire_focus_loss(engine: Rc<RefCell<Engine>>) {
    let Some(window) = web::window() else {
        return;
    };

    let engine_blur = engine.clone();
    let blur = wasm_bindgen::closure::Closure::wrap(Box::new(move || {
        engine_blur.borrow_mut().push_event(InputEvent::FocusLost);
    }) as Box<dyn FnMut()>);
    _ = window.add_event_listener_with_callback("blur", blur.as_ref().unchecked_ref());
    blur.forget();

    if let Some(document) = dom::window_document() {
        let doc = document.clone();
        let hidden = wasm_bindgen::closure::Closure::wrap(Box::new(move || {
            if doc.hidden() {
                engine.borrow_mut().push_event(InputEvent::FocusLost);
            }
        }) as Box<dyn FnMut()>);
        _ = document
            .add_event_listener_with_callback("visibilitychange", hidden.as_ref().unchecked_ref());
        hidden.forget();
    }
}
