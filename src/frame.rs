use crate::audio::ControlVoices;
use crate::constants::MAX_FRAME_DT_SEC;
use crate::lifecycle::LoopGuard;
use crate::render::CanvasRenderer;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use supershape_core::Engine;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub engine: Rc<RefCell<Engine>>,
    pub renderer: CanvasRenderer,
    pub voices: Option<ControlVoices>,
    pub last_instant: Instant,
    pub frames: u64,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_instant).min(Duration::from_secs_f64(MAX_FRAME_DT_SEC));
        self.last_instant = now;

        let output = self.engine.borrow_mut().tick(dt);
        self.renderer.draw(&output);
        if let Some(v) = &self.voices {
            v.apply(&output);
        }

        self.frames += 1;
        if output.release_voices {
            log::debug!("[frame] {} idle housekeeping; voices released", self.frames);
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>, guard: LoopGuard) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if !guard.is_running() {
            log::info!("[frame] loop stopped");
            return;
        }
        frame_ctx_tick.borrow_mut().frame();
        if let (Some(w), Some(cb)) = (web::window(), tick_clone.borrow().as_ref()) {
            _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut()>));
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
