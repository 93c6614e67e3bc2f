use crate::constants::{CANDLE_CLASS, CANDLE_OUT_CLASS, FLAME_CLASS};
use crate::core::{place_candles, Candle, LayoutParams};
use crate::dom;
use wasm_bindgen::JsCast;
use web_sys as web;

/// The cake element and the candle elements currently on it.
pub struct CakeView {
    document: web::Document,
    cake: web::HtmlElement,
    candles: Vec<web::HtmlElement>,
}

impl CakeView {
    pub fn new(document: web::Document, cake: web::HtmlElement) -> Self {
        Self {
            document,
            cake,
            candles: Vec::new(),
        }
    }

    pub fn width_px(&self) -> f64 {
        self.cake.get_bounding_client_rect().width()
    }

    /// Remove any existing candles and lay out a fresh set for the current width.
    pub fn relayout(&mut self, blown: bool) {
        self.clear();
        let width = self.width_px();
        let layout = place_candles(&LayoutParams::for_width(width));
        if layout.shortfall() > 0 {
            log::warn!(
                "[layout] placed {} of {} candles (width {:.0}px)",
                layout.candles.len(),
                layout.requested,
                width
            );
        }
        if layout.overflow() > 0 {
            log::warn!(
                "[layout] {} candles stacked past clearance (width {:.0}px)",
                layout.overflow(),
                width
            );
        }
        for candle in &layout.candles {
            match self.create_candle(candle) {
                Ok(el) => {
                    if blown {
                        _ = el.class_list().add_1(CANDLE_OUT_CLASS);
                    }
                    self.candles.push(el);
                }
                Err(e) => log::error!("[layout] candle {}: {:?}", candle.index, e),
            }
        }
        log::info!(
            "[layout] {} candles on {} rings, clearance {:.1}px",
            self.candles.len(),
            layout.rings.iter().filter(|r| r.allocated + r.overflow > 0).count(),
            layout.clearance_px
        );
    }

    fn create_candle(&self, candle: &Candle) -> anyhow::Result<web::HtmlElement> {
        let el = self.create_div(CANDLE_CLASS)?;
        dom::set_style(&el, "left", &format!("{}%", candle.position.x));
        dom::set_style(&el, "top", &format!("{}%", candle.position.y));
        dom::set_style(&el, "--candle", candle.color);
        dom::set_style(&el, "height", &format!("{}px", candle.height_px));

        let flame = self.create_div(FLAME_CLASS)?;
        let flicker = format!("{:.2}s", candle.flicker_sec);
        dom::set_style(&flame, "animation-duration", &flicker);
        el.append_child(&flame)
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        self.cake
            .append_child(&el)
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        Ok(el)
    }

    fn create_div(&self, class: &str) -> anyhow::Result<web::HtmlElement> {
        let el = self
            .document
            .create_element("div")
            .map_err(|e| anyhow::anyhow!("{:?}", e))?
            .dyn_into::<web::HtmlElement>()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        el.set_class_name(class);
        Ok(el)
    }

    pub fn clear(&mut self) {
        for el in self.candles.drain(..) {
            el.remove();
        }
    }

    pub fn extinguish(&self) {
        for el in &self.candles {
            _ = el.class_list().add_1(CANDLE_OUT_CLASS);
        }
    }

    pub fn relight(&self) {
        for el in &self.candles {
            _ = el.class_list().remove_1(CANDLE_OUT_CLASS);
        }
    }
}
