use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type TickSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// A `requestAnimationFrame` loop with an explicit cancel handle.
///
/// The step closure runs once per frame and returns whether the loop should
/// keep going. Cancelling (or dropping the handle) withdraws the pending
/// frame synchronously, so no step runs after `cancel` returns.
pub struct FrameLoop {
    tick: TickSlot,
    pending: Rc<Cell<Option<i32>>>,
}

impl FrameLoop {
    pub fn start(mut step: impl FnMut() -> bool + 'static) -> anyhow::Result<Self> {
        let tick: TickSlot = Rc::new(RefCell::new(None));
        let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));

        let weak_tick: Weak<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::downgrade(&tick);
        let pending_tick = pending.clone();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            pending_tick.set(None);
            if !step() {
                return;
            }
            // The handle may have been dropped inside `step`.
            if let Some(slot) = weak_tick.upgrade() {
                if let Some(cb) = slot.borrow().as_ref() {
                    pending_tick.set(request_frame(cb));
                }
            }
        }) as Box<dyn FnMut()>));

        let first = tick
            .borrow()
            .as_ref()
            .and_then(request_frame)
            .ok_or_else(|| anyhow::anyhow!("requestAnimationFrame unavailable"))?;
        pending.set(Some(first));
        Ok(Self { tick, pending })
    }

    pub fn cancel(&self) {
        if let Some(id) = self.pending.take() {
            if let Some(w) = web::window() {
                _ = w.cancel_animation_frame(id);
            }
        }
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.cancel();
        self.tick.borrow_mut().take();
    }
}

fn request_frame(cb: &Closure<dyn FnMut()>) -> Option<i32> {
    let w = web::window()?;
    match w.request_animation_frame(cb.as_ref().unchecked_ref()) {
        Ok(id) => Some(id),
        Err(e) => {
            log::error!("[frame] requestAnimationFrame error: {:?}", e);
            None
        }
    }
}
