use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;

use anyhow::Context;
use serde_wasm_bindgen::from_value;
use shoal_engine::config::RenderConfig;
use shoal_engine::frame::{FrameScheduler, StopToken, Visualization};
use shoal_engine::surface::SurfaceHost;
use wasm_bindgen::prelude::*;
use web_sys::Window;

use crate::bridge::{JsBridge, JsSimulation};
use crate::host::{CanvasSurface, DocumentHost};
use crate::logger::init_console_logging;
use crate::js_error;

type Scheduler = FrameScheduler<Visualization<JsBridge, CanvasSurface>>;

/// State shared between the viewer handle and its browser callbacks.
///
/// `step()`/`world()` run in JS while `scheduler` is mutably borrowed, and they
/// may call back into the viewer. Every access therefore uses `try_borrow*`;
/// a re-entrant stop cancels the token, which the scheduler observes as soon
/// as the current tick returns.
struct Shared {
    window: Window,
    host: DocumentHost,
    scheduler: RefCell<Scheduler>,
    token: RefCell<Option<StopToken>>,
    ticks: Cell<u64>,
    pending: Cell<Option<i32>>,
    on_frame: RefCell<Option<Closure<dyn FnMut(f64)>>>,
}

impl Shared {
    fn request_frame(&self) {
        if self.pending.get().is_some() {
            return;
        }
        let on_frame = self.on_frame.borrow();
        let Some(callback) = on_frame.as_ref() else { return };
        match self.window.request_animation_frame(callback.as_ref().unchecked_ref()) {
            Ok(id) => self.pending.set(Some(id)),
            Err(err) => log::error!("requestAnimationFrame failed: {err:?}"),
        }
    }

    fn cancel_frame(&self) {
        if let Some(id) = self.pending.take() {
            if let Err(err) = self.window.cancel_animation_frame(id) {
                log::warn!("cancelAnimationFrame failed: {err:?}");
            }
        }
    }

    fn animation_frame(&self, timestamp: f64) {
        self.pending.set(None);
        let millis = if timestamp.is_finite() { timestamp.max(0.0) } else { 0.0 };
        let Ok(mut scheduler) = self.scheduler.try_borrow_mut() else {
            log::warn!("animation frame skipped: viewer is busy");
            self.request_frame();
            return;
        };
        let armed = scheduler.fire_at(Duration::from_secs_f64(millis / 1000.0));
        self.ticks.set(scheduler.task().animation().ticks());
        drop(scheduler);
        if armed {
            self.request_frame();
        }
    }

    fn resized(&self) {
        let metrics = self.host.metrics();
        let Ok(mut scheduler) = self.scheduler.try_borrow_mut() else {
            log::warn!("resize ignored: viewer is busy");
            return;
        };
        if let Err(err) = scheduler.task_mut().resize(metrics) {
            log::error!("viewport resize failed: {err}");
        }
    }

    fn live_token(&self) -> bool {
        self.token.borrow().as_ref().is_some_and(|t| !t.is_cancelled())
    }
}

/// Renders a JS simulation onto `<canvas id="viewport">`.
///
/// ```js
/// const viewer = new Viewer(simulation, { validation: "finite_only" });
/// viewer.start();
/// ```
///
/// The simulation may call `stop()`, `isRunning()` and `ticks()` from inside
/// `step()`/`world()`. `start()` and `renderFrame()` made from there are
/// ignored with a warning.
#[wasm_bindgen]
pub struct Viewer {
    shared: Rc<Shared>,
    on_resize: Closure<dyn FnMut()>,
}

#[wasm_bindgen]
impl Viewer {
    /// `config` takes the same fields as the native `shoal.toml`; `undefined`
    /// means defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(simulation: JsSimulation, config: JsValue) -> Result<Viewer, JsValue> {
        let config = decode_config(config).map_err(|err| js_error(format!("{err:#}")))?;
        init_console_logging(config.logging.filter.as_deref());

        let mut host = DocumentHost::current().ok_or_else(|| js_error("no window document"))?;
        let visualization = Visualization::attach(&mut host, JsBridge::new(simulation), &config)
            .map_err(|err| js_error(format!("{err:#}")))?;

        let shared = Rc::new(Shared {
            window: host.window().clone(),
            host,
            scheduler: RefCell::new(FrameScheduler::new(visualization)),
            token: RefCell::new(None),
            ticks: Cell::new(0),
            pending: Cell::new(None),
            on_frame: RefCell::new(None),
        });

        let weak = Rc::downgrade(&shared);
        *shared.on_frame.borrow_mut() = Some(Closure::new(move |timestamp: f64| {
            if let Some(shared) = weak.upgrade() {
                shared.animation_frame(timestamp);
            }
        }));

        let on_resize = resize_listener(Rc::downgrade(&shared));
        shared
            .window
            .add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;

        Ok(Self { shared, on_resize })
    }

    /// Starts (or keeps) the frame loop.
    pub fn start(&self) {
        let Ok(mut scheduler) = self.shared.scheduler.try_borrow_mut() else {
            log::warn!("start() ignored: called from inside a frame");
            return;
        };
        let token = scheduler.start();
        drop(scheduler);
        *self.shared.token.borrow_mut() = Some(token);
        self.shared.request_frame();
    }

    /// Stops the frame loop; the last frame stays on screen.
    pub fn stop(&self) {
        let token = self.shared.token.borrow_mut().take();
        if let Some(token) = token {
            token.cancel();
            if let Ok(mut scheduler) = self.shared.scheduler.try_borrow_mut() {
                scheduler.stop(&token);
            }
        }
        self.shared.cancel_frame();
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        match self.shared.scheduler.try_borrow() {
            Ok(scheduler) => scheduler.is_armed(),
            Err(_) => self.shared.live_token(),
        }
    }

    /// Runs one step-clear-draw tick outside the loop.
    #[wasm_bindgen(js_name = renderFrame)]
    pub fn render_frame(&self) {
        let Ok(mut scheduler) = self.shared.scheduler.try_borrow_mut() else {
            log::warn!("renderFrame() ignored: called from inside a frame");
            return;
        };
        scheduler.task_mut().tick();
        self.shared.ticks.set(scheduler.task().animation().ticks());
    }

    /// Ticks run so far.
    pub fn ticks(&self) -> f64 {
        self.shared.ticks.get() as f64
    }
}

impl Drop for Viewer {
    fn drop(&mut self) {
        self.shared.cancel_frame();
        if let Err(err) = self
            .shared
            .window
            .remove_event_listener_with_callback("resize", self.on_resize.as_ref().unchecked_ref())
        {
            log::warn!("failed to remove resize listener: {err:?}");
        }
    }
}

fn resize_listener(shared: Weak<Shared>) -> Closure<dyn FnMut()> {
    Closure::new(move || {
        if let Some(shared) = shared.upgrade() {
            shared.resized();
        }
    })
}

fn decode_config(value: JsValue) -> anyhow::Result<RenderConfig> {
    if value.is_undefined() || value.is_null() {
        return Ok(RenderConfig::default());
    }
    let config: RenderConfig = from_value(value)
        .map_err(|err| anyhow::anyhow!("{err}"))
        .context("failed to decode viewer config")?;
    config.check()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use js_sys::{Function, Object, Reflect};
    use shoal_engine::world::Simulation;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

    use super::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn simulation(world: &str) -> JsSimulation {
        let obj = Object::new();
        Reflect::set(&obj, &"steps".into(), &0.into()).unwrap();
        Reflect::set(&obj, &"step".into(), &Function::new_no_args("this.steps += 1;")).unwrap();
        Reflect::set(&obj, &"world".into(), &Function::new_no_args(&format!("return {world};"))).unwrap();
        obj.unchecked_into()
    }

    const RED_CENTER: &str = "{ foods: [{ x: 0.5, y: 0.5, color: '#ff0000' }], animals: [] }";

    fn mount_viewport() -> HtmlCanvasElement {
        let document = web_sys::window().unwrap().document().unwrap();
        if let Some(old) = document.get_element_by_id("viewport") {
            old.remove();
        }
        let canvas: HtmlCanvasElement = document.create_element("canvas").unwrap().unchecked_into();
        canvas.set_id("viewport");
        document.body().unwrap().append_child(&canvas).unwrap();
        canvas
    }

    #[wasm_bindgen_test]
    fn bridge_decodes_js_world() {
        let mut bridge = JsBridge::new(simulation(
            "{ foods: [{ x: 0.1, y: 0.2, color: 'rgb(1, 2, 3)' }], animals: [{ x: 0.3, y: 0.4, rotation: 1.5 }] }",
        ));
        bridge.step();
        let world = bridge.world();
        assert_eq!(world.foods.len(), 1);
        assert_eq!(world.foods[0].color, "rgb(1, 2, 3)");
        assert_eq!(world.animals[0].rotation, 1.5);
    }

    #[wasm_bindgen_test]
    fn malformed_world_decodes_to_empty_snapshot() {
        let bridge = JsBridge::new(simulation("{ foods: 'nope' }"));
        assert!(bridge.snapshot().is_err());
        assert_eq!(bridge.world().entity_count(), 0);
    }

    #[wasm_bindgen_test]
    fn missing_canvas_fails_construction() {
        let document = web_sys::window().unwrap().document().unwrap();
        if let Some(old) = document.get_element_by_id("viewport") {
            old.remove();
        }
        assert!(Viewer::new(simulation(RED_CENTER), JsValue::UNDEFINED).is_err());
    }

    #[wasm_bindgen_test]
    fn render_frame_paints_food_at_center() {
        let canvas = mount_viewport();
        let viewer = Viewer::new(simulation(RED_CENTER), JsValue::UNDEFINED).unwrap();

        let window = web_sys::window().unwrap();
        let dpr = window.device_pixel_ratio();
        let width = window.inner_width().unwrap().as_f64().unwrap();
        assert_eq!(canvas.width(), (width * dpr).round() as u32);

        viewer.render_frame();
        assert_eq!(viewer.ticks(), 1.0);

        let ctx: CanvasRenderingContext2d = canvas.get_context("2d").unwrap().unwrap().unchecked_into();
        let (cx, cy) = (canvas.width() / 2, canvas.height() / 2);
        let pixel = ctx.get_image_data(cx as f64, cy as f64, 1.0, 1.0).unwrap().data();
        assert_eq!(pixel.to_vec(), vec![255, 0, 0, 255]);
    }

    #[wasm_bindgen_test]
    fn start_stop_toggles_running() {
        mount_viewport();
        let viewer = Viewer::new(simulation(RED_CENTER), JsValue::UNDEFINED).unwrap();
        assert!(!viewer.is_running());
        viewer.start();
        assert!(viewer.is_running());
        viewer.stop();
        assert!(!viewer.is_running());
    }

    #[wasm_bindgen_test]
    fn stop_during_a_frame_does_not_panic() {
        mount_viewport();
        let viewer = Viewer::new(simulation(RED_CENTER), JsValue::UNDEFINED).unwrap();
        viewer.start();

        let shared = Rc::clone(&viewer.shared);
        let frame = shared.scheduler.borrow_mut();
        assert!(viewer.is_running());
        viewer.stop();
        assert!(!viewer.is_running());
        viewer.render_frame();
        viewer.start();
        drop(frame);

        assert!(!shared.scheduler.borrow().is_armed());
        assert_eq!(viewer.ticks(), 0.0);
    }

    #[wasm_bindgen_test]
    fn stop_from_inside_step_halts_the_loop() {
        mount_viewport();
        let sim = simulation(RED_CENTER);
        let viewer = Viewer::new(sim.clone(), JsValue::UNDEFINED).unwrap();
        viewer.start();

        let stop = Closure::<dyn FnMut()>::new({
            let shared = Rc::clone(&viewer.shared);
            move || {
                let token = shared.token.borrow_mut().take();
                if let Some(token) = token {
                    token.cancel();
                }
            }
        });
        let obj: &Object = sim.unchecked_ref();
        Reflect::set(obj, &"step".into(), stop.as_ref()).unwrap();

        viewer.shared.cancel_frame();
        viewer.shared.animation_frame(16.0);
        assert!(!viewer.is_running());
        assert_eq!(viewer.shared.pending.get(), None);
        assert_eq!(viewer.ticks(), 1.0);
    }

    #[wasm_bindgen_test]
    fn rejects_invalid_config() {
        mount_viewport();
        let config = Object::new();
        Reflect::set(&config, &"background".into(), &"not-a-color".into()).unwrap();
        assert!(Viewer::new(simulation(RED_CENTER), config.into()).is_err());
    }
}
