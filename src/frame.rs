use crate::core::{AppState, MeshInstance, OrbitCamera, SceneController};
use crate::{overlay, render};
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Seconds since mount. Shared by the frame loop and input handlers so
/// tweens started from a click line up with the frames that sample them.
#[derive(Clone, Copy)]
pub struct SceneClock {
    origin: Instant,
}

impl SceneClock {
    pub fn start() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    pub fn now_sec(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

pub struct FrameContext {
    pub scene: Rc<RefCell<SceneController>>,
    pub camera: Rc<RefCell<OrbitCamera>>,
    pub app_state: Rc<RefCell<AppState>>,
    pub document: web::Document,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState>,
    pub clock: SceneClock,
    pub last_instant: Instant,
    pub shown_state: Option<AppState>,
    pub instances: Vec<MeshInstance>,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;
        let t = self.clock.now_sec();

        // Signal is whatever the detector last reported.
        let is_fist = self.app_state.borrow().is_fist;
        {
            let mut scene = self.scene.borrow_mut();
            let mut events = scene.on_fist_signal(is_fist, t).into_iter().collect::<Vec<_>>();
            events.extend(scene.update(t));
            let mut state = self.app_state.borrow_mut();
            for ev in events {
                state.apply(ev);
            }
        }

        let state = *self.app_state.borrow();
        if self.shown_state != Some(state) {
            overlay::render_state(&self.document, &state);
            self.shown_state = Some(state);
        }

        self.camera.borrow_mut().update(dt_sec);

        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(self.canvas.width(), self.canvas.height());
            let scene = self.scene.borrow();
            scene.mesh_instances(t, &mut self.instances);
            let particles = scene.particles();
            let camera = self.camera.borrow();
            let frame = render::FrameInputs {
                camera: &camera,
                particle_positions: &particles.positions,
                particle_colors: &particles.colors,
                meshes: &self.instances,
            };
            if let Err(e) = g.render(&frame) {
                log::error!("render error: {:?}", e);
            }
        }
    }
}

/// Handle to a running animation-frame loop.
pub struct FrameLoop {
    raf_id: Rc<Cell<Option<i32>>>,
    tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
}

impl FrameLoop {
    /// Cancel the pending frame and release the loop closure.
    pub fn cancel(self) {
        if let (Some(id), Some(w)) = (self.raf_id.take(), web::window()) {
            _ = w.cancel_animation_frame(id);
        }
        self.tick.borrow_mut().take();
    }
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>, raf_id: &Cell<Option<i32>>) {
    let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref().map(|c| c.as_ref().clone()))
    else {
        return;
    };
    match w.request_animation_frame(cb.unchecked_ref()) {
        Ok(id) => raf_id.set(Some(id)),
        Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) -> FrameLoop {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let raf_id = Rc::new(Cell::new(None));
    let tick_clone = tick.clone();
    let raf_id_clone = raf_id.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        raf_id_clone.set(None);
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone, &raf_id_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick, &raf_id);
    FrameLoop { raf_id, tick }
}
