//! WASM bindings for the causemap-core library.
//!
//! The host wires DOM pointer and wheel events straight into a
//! `CauseMapHandle` and redraws from `scene_json()` after every call that
//! returns true.

use wasm_bindgen::prelude::*;
use web_sys::{Element, PointerEvent, WheelEvent};

use crate::hierarchy::NodeId;
use crate::layout::{LayoutConfig, Point};
use crate::map::CauseMap;
use crate::view::Viewport;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console, js_name = log)]
    pub fn console_log(s: &str);

    #[wasm_bindgen(js_namespace = console, js_name = error)]
    pub fn console_error(s: &str);
}

fn viewport_of(canvas: &Element) -> Viewport {
    let rect = canvas.get_bounding_client_rect();
    Viewport { left: rect.left(), top: rect.top(), width: rect.width(), height: rect.height() }
}

fn client_point(event: &web_sys::MouseEvent) -> Point {
    Point::new(event.client_x() as f64, event.client_y() as f64)
}

fn to_js_error(e: crate::error::MapError) -> JsValue {
    console_error(&format!("causemap: {e}"));
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen]
pub struct CauseMapHandle {
    inner: CauseMap,
}

#[wasm_bindgen]
impl CauseMapHandle {
    /// `input` is the JSON tree list; `config` an optional partial `LayoutConfig` as JSON.
    #[wasm_bindgen(constructor)]
    pub fn new(input: &str, config: Option<String>) -> Result<CauseMapHandle, JsValue> {
        let cfg = match config.as_deref() {
            Some(json) => LayoutConfig::from_json(json).map_err(to_js_error)?,
            None => LayoutConfig::default(),
        };
        let inner = CauseMap::from_json(input, cfg).map_err(to_js_error)?;
        Ok(CauseMapHandle { inner })
    }

    /// The bundled reference map.
    pub fn reference() -> Result<CauseMapHandle, JsValue> {
        let inner = CauseMap::reference().map_err(to_js_error)?;
        console_log(&format!("causemap: reference map with {} nodes", inner.topology().node_ids().len()));
        Ok(CauseMapHandle { inner })
    }

    pub fn pointer_down_canvas(&mut self, canvas: &Element, event: &PointerEvent) -> bool {
        self.inner.set_viewport(viewport_of(canvas));
        let started = self.inner.on_canvas_pointer_down(event.pointer_id(), client_point(event));
        if started {
            let _ = canvas.set_pointer_capture(event.pointer_id());
        }
        started
    }

    /// Press on a node circle. Stops propagation so the canvas doesn't start a pan.
    pub fn pointer_down_node(&mut self, node_id: &str, canvas: &Element, event: &PointerEvent) -> bool {
        event.stop_propagation();
        let node = match node_id.parse::<NodeId>() {
            Ok(node) => node,
            Err(e) => {
                console_error(&format!("causemap: {e}"));
                return false;
            }
        };
        self.inner.set_viewport(viewport_of(canvas));
        let started = self.inner.on_node_pointer_down(event.pointer_id(), node, client_point(event));
        if started {
            let _ = canvas.set_pointer_capture(event.pointer_id());
        }
        started
    }

    pub fn pointer_move(&mut self, canvas: &Element, event: &PointerEvent) -> bool {
        if self.inner.session().is_idle() {
            return false;
        }
        self.inner.set_viewport(viewport_of(canvas));
        self.inner.on_pointer_move(event.pointer_id(), client_point(event))
    }

    /// Returns true if the gesture ended (node drags are settled first).
    pub fn pointer_up(&mut self, canvas: &Element, event: &PointerEvent) -> bool {
        let _ = canvas.release_pointer_capture(event.pointer_id());
        let was_active = self.inner.session().pointer_id() == Some(event.pointer_id());
        self.inner.on_pointer_up(event.pointer_id());
        was_active
    }

    pub fn pointer_leave(&mut self) -> bool {
        let was_active = !self.inner.session().is_idle();
        self.inner.on_pointer_leave();
        was_active
    }

    pub fn wheel(&mut self, canvas: &Element, event: &WheelEvent) {
        event.prevent_default();
        self.inner.set_viewport(viewport_of(canvas));
        self.inner.on_wheel(client_point(event), event.delta_y());
    }

    pub fn zoom_in(&mut self) {
        self.inner.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.inner.zoom_out();
    }

    pub fn reset_view(&mut self) {
        self.inner.reset_view();
    }

    pub fn reset_layout(&mut self) {
        self.inner.reset_layout();
    }

    pub fn scene_json(&self) -> String {
        match self.inner.scene_json() {
            Ok(json) => json,
            Err(e) => {
                console_error(&format!("causemap: error serializing scene: {e}"));
                serde_json::json!({ "error": e.to_string() }).to_string()
            }
        }
    }
}
