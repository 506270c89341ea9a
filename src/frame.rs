use crate::canvas2d::Canvas2dSurface;
use crate::constants::{PARTICLE_CANVAS_ID, PARTICLE_Z_INDEX, SCENE_CANVAS_ID, SCENE_Z_INDEX};
use crate::dom;
use crate::render;
use field_core::{
    AnimationClock, InputState, ParticleConfig, ParticleField, SceneConfig, SceneField, Viewport,
};
use rand::rngs::StdRng;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// 2D particle field and the canvas it draws into.
pub struct ParticleLayer {
    surface: Canvas2dSurface,
    field: ParticleField,
}

impl ParticleLayer {
    pub fn new(
        document: &web::Document,
        viewport: Viewport,
        rng: &mut StdRng,
    ) -> anyhow::Result<Self> {
        let canvas = dom::background_canvas(document, PARTICLE_CANVAS_ID, PARTICLE_Z_INDEX)?;
        dom::sync_canvas_css_size(&canvas, viewport);
        let surface = Canvas2dSurface::new(canvas)?;
        let field = ParticleField::new(ParticleConfig::default(), viewport.size(), rng)?;
        Ok(Self { surface, field })
    }
}

/// 3D scene field and the GPU surface it renders through.
pub struct SceneLayer {
    canvas: web::HtmlCanvasElement,
    gpu: render::GpuState,
    field: SceneField,
}

impl SceneLayer {
    pub async fn new(
        document: &web::Document,
        config: SceneConfig,
        rng: &mut StdRng,
    ) -> anyhow::Result<Self> {
        let canvas = dom::background_canvas(document, SCENE_CANVAS_ID, SCENE_Z_INDEX)?;
        dom::sync_canvas_backing_size(&canvas);
        let gpu = render::GpuState::new(&canvas).await?;
        let field = SceneField::build(config, rng)?;
        Ok(Self { canvas, gpu, field })
    }
}

pub struct FrameContext {
    pub clock: AnimationClock,
    pub input: Rc<RefCell<InputState>>,
    pub particles: Option<ParticleLayer>,
    pub scene: Option<SceneLayer>,
    pub rng: StdRng,
    pub running: bool,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let time = self.clock.tick();
        let input = *self.input.borrow();

        if let Some(layer) = &mut self.particles {
            layer.field.step(time.frames(), input.pointer);
            layer.field.render(&mut layer.surface);
        }

        if let Some(layer) = &mut self.scene {
            layer.field.tick(&time, &input, &mut self.rng);
            layer
                .gpu
                .resize_if_needed(layer.canvas.width(), layer.canvas.height());
            layer.field.render(&mut layer.gpu);
        }
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.input.borrow_mut().resized(viewport);
        if let Some(layer) = &mut self.particles {
            dom::sync_canvas_css_size(layer.surface.canvas(), viewport);
            layer.field.resize(viewport.size());
        }
        if let Some(layer) = &mut self.scene {
            dom::sync_canvas_backing_size(&layer.canvas);
            layer
                .gpu
                .resize_if_needed(layer.canvas.width(), layer.canvas.height());
        }
    }

    /// Stop scheduling frames and tear the scene down.
    pub fn shutdown(&mut self) {
        self.running = false;
        self.particles = None;
        if let Some(layer) = self.scene.take() {
            layer.field.dispose();
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let mut ctx = frame_ctx.borrow_mut();
        if !ctx.running {
            return;
        }
        ctx.frame();
        drop(ctx);
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
