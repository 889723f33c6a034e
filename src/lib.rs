#![cfg(target_arch = "wasm32")]
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use supershape_core::{Engine, EngineConfig, InputEvent, PhaseInit, TuningPreset};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod lifecycle;
mod render;

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement, engine: Rc<RefCell<Engine>>) {
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        let (w, h) = dom::sync_canvas_backing_size(&canvas_resize);
        engine.borrow_mut().push_event(InputEvent::Resize {
            width: w as f64,
            height: h as f64,
        });
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

/// Stop the frame loop and release the audio graph when the page goes away.
fn wire_teardown(guard: lifecycle::LoopGuard, audio_ctx: Option<web::AudioContext>) {
    let closure = Closure::wrap(Box::new(move || {
        if !guard.stop() {
            return;
        }
        if let Some(a) = &audio_ctx {
            _ = a.close();
        }
        log::info!("[app] torn down");
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("beforeunload", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn build_engine(width: u32, height: u32) -> anyhow::Result<Rc<RefCell<Engine>>> {
    let seed = (js_sys::Math::random() * u32::MAX as f64) as u64;
    let config =
        EngineConfig::from_preset(TuningPreset::Cinematic).with_phase_init(PhaseInit::Seeded(seed));
    let engine = Engine::new(config, width as f64, height as f64)?;
    Ok(Rc::new(RefCell::new(engine)))
}

fn build_audio(control_count: usize) -> Option<(web::AudioContext, audio::ControlVoices)> {
    let audio_ctx = match web::AudioContext::new() {
        Ok(a) => a,
        Err(e) => {
            log::warn!("[audio] unavailable: {:?}", e);
            return None;
        }
    };
    let voices = audio::build_control_voices(&audio_ctx, control_count).ok()?;
    Some((audio_ctx, voices))
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("supershape-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id(constants::CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", constants::CANVAS_ID))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    let (w, h) = dom::sync_canvas_backing_size(&canvas);
    let engine = build_engine(w, h)?;
    let renderer = render::CanvasRenderer::new(&canvas)?;

    let control_count = engine.borrow().controls().len();
    let (audio_ctx, voices) = match build_audio(control_count) {
        Some((ctx, v)) => (Some(ctx), Some(v)),
        None => (None, None),
    };

    wire_canvas_resize(&canvas, engine.clone());
    let guard = lifecycle::LoopGuard::new();
    wire_teardown(guard.clone(), audio_ctx.clone());
    events::wire_keyboard(engine.clone(), audio_ctx);
    events::wire_wheel_zoom(&canvas, engine.clone());
    events::wire_focus_loss(engine.clone());

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        engine,
        renderer,
        voices,
        last_instant: Instant::now(),
        frames: 0,
    }));
    frame::start_loop(frame_ctx, guard);
    Ok(())
}
