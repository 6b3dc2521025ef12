use serde_wasm_bindgen::from_value;
use shoal_engine::world::{Simulation, WorldSnapshot};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// Any JS object with `step()` and `world()` methods; `world()` returns
    /// `{ foods: [{ x, y, color }], animals: [{ x, y, rotation }] }`.
    pub type JsSimulation;

    #[wasm_bindgen(method, catch)]
    fn step(this: &JsSimulation) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch)]
    fn world(this: &JsSimulation) -> Result<JsValue, JsValue>;
}

/// Adapts a [`JsSimulation`] to the engine's [`Simulation`] trait.
///
/// Exceptions thrown by the JS side and snapshots that fail to decode are
/// logged; a failed `world()` yields an empty snapshot so the frame still
/// clears.
pub struct JsBridge {
    inner: JsSimulation,
}

impl JsBridge {
    pub fn new(inner: JsSimulation) -> Self {
        Self { inner }
    }

    pub fn snapshot(&self) -> Result<WorldSnapshot, JsValue> {
        let value = self.inner.world()?;
        from_value(value).map_err(JsValue::from)
    }
}

impl Simulation for JsBridge {
    fn step(&mut self) {
        if let Err(err) = self.inner.step() {
            log::error!("simulation step threw: {err:?}");
        }
    }

    fn world(&self) -> WorldSnapshot {
        self.snapshot().unwrap_or_else(|err| {
            log::warn!("dropping undecodable world snapshot: {err:?}");
            WorldSnapshot::default()
        })
    }
}
