#![cfg(target_arch = "wasm32")]
use field_core::{AnimationClock, InputState, SceneConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

mod canvas2d;
mod constants;
mod dom;
mod events;
mod frame;
mod render;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("neuralfield starting");

    static STARTED: AtomicBool = AtomicBool::new(false);
    if STARTED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }
    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let viewport = dom::viewport().ok_or_else(|| anyhow::anyhow!("no viewport size"))?;
    let input = Rc::new(RefCell::new(InputState::new(viewport)));
    let mut rng = StdRng::from_entropy();

    // Each layer is optional: a missing canvas, context or adapter only
    // removes that layer.
    let particles = match frame::ParticleLayer::new(&document, viewport, &mut rng) {
        Ok(layer) => Some(layer),
        Err(e) => {
            log::warn!("[particles] layer skipped: {:#}", e);
            None
        }
    };
    let scene = match frame::SceneLayer::new(&document, SceneConfig::default(), &mut rng).await {
        Ok(layer) => Some(layer),
        Err(e) => {
            log::warn!("[scene] layer skipped: {:#}", e);
            None
        }
    };
    if particles.is_none() && scene.is_none() {
        anyhow::bail!("no background layer could start");
    }

    events::wire_pointer_tracking(input.clone());

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        clock: AnimationClock::new(),
        input,
        particles,
        scene,
        rng,
        running: true,
    }));
    events::wire_resize(frame_ctx.clone());
    events::wire_teardown(frame_ctx.clone());
    frame::start_loop(frame_ctx);
    Ok(())
}
