use shoal_engine::coords::WindowMetrics;
use shoal_engine::surface::{InitError, Surface, SurfaceHost};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, Window};

use crate::canvas::CanvasContext;

/// A `<canvas>` element and its 2D context.
pub struct CanvasSurface {
    element: HtmlCanvasElement,
    display: (f32, f32),
    canvas: CanvasContext,
}

impl CanvasSurface {
    pub fn element(&self) -> &HtmlCanvasElement {
        &self.element
    }

    pub fn context(&self) -> &CanvasContext {
        &self.canvas
    }
}

impl Surface for CanvasSurface {
    type Canvas = CanvasContext;

    fn set_backing_size(&mut self, width: u32, height: u32) {
        // Assigning either dimension resets the context state.
        self.element.set_width(width);
        self.element.set_height(height);
    }

    fn backing_size(&self) -> (u32, u32) {
        (self.element.width(), self.element.height())
    }

    fn set_display_size(&mut self, width: f32, height: f32) {
        let style = self.element.style();
        for (name, value) in [("width", width), ("height", height)] {
            if let Err(err) = style.set_property(name, &format!("{value}px")) {
                log::warn!("failed to set canvas css {name}: {err:?}");
            }
        }
        self.display = (width, height);
    }

    fn display_size(&self) -> (f32, f32) {
        self.display
    }

    fn canvas(&mut self) -> &mut CanvasContext {
        &mut self.canvas
    }
}

/// The page document as a surface host.
#[derive(Clone)]
pub struct DocumentHost {
    window: Window,
    document: Document,
}

impl DocumentHost {
    /// Host for the current global window, if the page has a document.
    pub fn current() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self { window, document })
    }

    #[inline]
    pub fn window(&self) -> &Window {
        &self.window
    }
}

impl SurfaceHost for DocumentHost {
    type Surface = CanvasSurface;

    fn find_surface(&mut self, id: &str) -> Result<CanvasSurface, InitError> {
        let not_found = || InitError::SurfaceNotFound { id: id.to_string() };
        let no_context = || InitError::ContextUnavailable { id: id.to_string() };

        let element = self
            .document
            .get_element_by_id(id)
            .ok_or_else(not_found)?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| no_context())?;

        let ctx = element
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|obj| obj.dyn_into::<CanvasRenderingContext2d>().ok())
            .ok_or_else(no_context)?;

        Ok(CanvasSurface { element, display: (0.0, 0.0), canvas: CanvasContext::new(ctx) })
    }

    fn metrics(&self) -> WindowMetrics {
        let dimension = |value: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
            value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
        };
        WindowMetrics::new(
            dimension(self.window.inner_width()),
            dimension(self.window.inner_height()),
            // `devicePixelRatio || 1`: zero and garbage fall back downstream.
            Some(self.window.device_pixel_ratio() as f32),
        )
    }
}
