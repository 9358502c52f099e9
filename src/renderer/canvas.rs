//! Canvas 2D particle loop
//!
//! Drives a `ParticleSimulator` from `requestAnimationFrame` and keeps the
//! canvas sized to the viewport. `stop` (also run on drop) cancels the pending
//! frame and removes the resize listener.

use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::platform::js_reason;
use crate::sim::{ParticleSimulator, ParticleSurface, SimulatorPhase};

/// `ParticleSurface` over a 2D context
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: &HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()??
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { ctx })
    }
}

impl ParticleSurface for CanvasSurface {
    fn clear(&mut self, width: f32, height: f32) {
        self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, opacity: f32) {
        self.ctx.begin_path();
        if let Err(e) = self.ctx.arc(x as f64, y as f64, radius as f64, 0.0, TAU) {
            log::warn!("Particle arc failed: {}", js_reason(&e));
            return;
        }
        self.ctx
            .set_fill_style_str(&format!("rgba(255, 255, 255, {})", opacity));
        self.ctx.fill();
    }
}

struct LoopState {
    sim: ParticleSimulator,
    surface: CanvasSurface,
    canvas: HtmlCanvasElement,
    frame_id: Option<i32>,
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Running particle effect bound to one canvas
pub struct ParticleLoop {
    state: Option<Rc<RefCell<LoopState>>>,
    frame_cb: FrameCallback,
    resize_cb: Option<Closure<dyn FnMut(web_sys::Event)>>,
}

fn viewport_size() -> (f32, f32) {
    let Some(window) = web_sys::window() else {
        return (0.0, 0.0);
    };
    let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32;
    (dim(window.inner_width()), dim(window.inner_height()))
}

fn prefers_reduced_motion() -> bool {
    web_sys::window()
        .and_then(|w| w.match_media("(prefers-reduced-motion: reduce)").ok().flatten())
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

fn resize_canvas(canvas: &HtmlCanvasElement, width: f32, height: f32) {
    canvas.set_width(width.max(0.0) as u32);
    canvas.set_height(height.max(0.0) as u32);
}

fn request_frame(cb: &FrameCallback) -> Option<i32> {
    let window = web_sys::window()?;
    let cb = cb.borrow();
    let closure = cb.as_ref()?;
    window
        .request_animation_frame(closure.as_ref().unchecked_ref())
        .ok()
}

impl ParticleLoop {
    /// Start the effect on `canvas`. Under reduced motion (or without a 2D
    /// context) the returned loop never runs.
    pub fn mount(canvas: HtmlCanvasElement, count: usize, seed: u64) -> Self {
        let mut this = Self {
            state: None,
            frame_cb: Rc::new(RefCell::new(None)),
            resize_cb: None,
        };

        let mut sim = ParticleSimulator::new(count);
        let (width, height) = viewport_size();
        if !sim.start(prefers_reduced_motion(), width, height, seed) {
            return this;
        }
        let Some(surface) = CanvasSurface::new(&canvas) else {
            log::warn!("No 2D context, particles disabled");
            return this;
        };
        resize_canvas(&canvas, width, height);

        let state = Rc::new(RefCell::new(LoopState {
            sim,
            surface,
            canvas,
            frame_id: None,
        }));

        // Resize listener
        {
            let state = state.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let (w, h) = viewport_size();
                let mut s = state.borrow_mut();
                resize_canvas(&s.canvas, w, h);
                s.sim.resize(w, h);
            });
            if let Some(window) = web_sys::window() {
                let _ = window
                    .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            }
            this.resize_cb = Some(closure);
        }

        // Frame loop
        {
            let state = state.clone();
            let frame_cb = this.frame_cb.clone();
            *this.frame_cb.borrow_mut() = Some(Closure::new(move |_time: f64| {
                let mut s = state.borrow_mut();
                let LoopState { sim, surface, .. } = &mut *s;
                if !sim.frame(surface) {
                    s.frame_id = None;
                    return;
                }
                s.frame_id = request_frame(&frame_cb);
            }));
        }
        state.borrow_mut().frame_id = request_frame(&this.frame_cb);

        this.state = Some(state);
        this
    }

    pub fn phase(&self) -> SimulatorPhase {
        self.state
            .as_ref()
            .map(|s| s.borrow().sim.phase())
            .unwrap_or(SimulatorPhase::Uninitialized)
    }

    /// Cancel the pending frame and detach from the window
    pub fn stop(&mut self) {
        let window = web_sys::window();

        if let Some(state) = self.state.as_ref() {
            let mut s = state.borrow_mut();
            if let (Some(id), Some(window)) = (s.frame_id.take(), window.as_ref()) {
                let _ = window.cancel_animation_frame(id);
            }
            s.sim.stop();
        }

        if let Some(closure) = self.resize_cb.take() {
            if let Some(window) = window.as_ref() {
                let _ = window.remove_event_listener_with_callback(
                    "resize",
                    closure.as_ref().unchecked_ref(),
                );
            }
        }

        // Drops the frame closure, breaking its self-reference
        self.frame_cb.borrow_mut().take();
    }
}

impl Drop for ParticleLoop {
    fn drop(&mut self) {
        self.stop();
    }
}
