use crate::input::{key_event, KeyEdge};
use std::cell::RefCell;
use std::rc::Rc;
use supershape_core::{Engine, InputEvent};
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn handle_key(ev: &web::KeyboardEvent, edge: KeyEdge, engine: &Rc<RefCell<Engine>>) {
    let key = ev.key();
    let event = {
        let eng = engine.borrow();
        key_event(&key, edge, |c| eng.control_for_key(c))
    };
    let Some(event) = event else {
        return;
    };
    if event == InputEvent::AddShape {
        ev.prevent_default();
    }
    engine.borrow_mut().push_event(event);
}

/// Wire keydown/keyup on the window. The first key also resumes audio, since
/// browsers keep an `AudioContext` suspended until a user gesture.
pub fn wire_keyboard(engine: Rc<RefCell<Engine>>, audio_ctx: Option<web::AudioContext>) {
    let Some(window) = web::window() else {
        return;
    };

    let engine_down = engine.clone();
    let down = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        if let Some(a) = &audio_ctx {
            _ = a.resume();
        }
        handle_key(&ev, KeyEdge::Down, &engine_down);
    }) as Box<dyn FnMut(_)>);
    _ = window.add_event_listener_with_callback("keydown", down.as_ref().unchecked_ref());
    down.forget();

    let up = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        handle_key(&ev, KeyEdge::Up, &engine);
    }) as Box<dyn FnMut(_)>);
    _ = window.add_event_listener_with_callback("keyup", up.as_ref().unchecked_ref());
    up.forget();
}
