#![cfg(target_arch = "wasm32")]
use crate::core::{DetectorProfile, DeviceClass};
use crate::session::{Session, SharedSession};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod cake;
mod constants;
pub mod core;
mod dom;
mod frame;
mod mic;
mod session;
mod ui;

fn detect_device_class(window: &web::Window) -> DeviceClass {
    let ua = window.navigator().user_agent().unwrap_or_default();
    DeviceClass::from_user_agent(&ua)
}

fn wire_controls(document: &web::Document, session: &SharedSession) {
    let s = session.clone();
    dom::add_click_listener(document, constants::SONG_TOGGLE_ID, move || {
        spawn_local(session::toggle_song(s.clone()));
    });

    let s = session.clone();
    dom::add_click_listener(document, constants::RELIGHT_ID, move || {
        s.borrow_mut().relight();
    });

    let s = session.clone();
    dom::add_click_listener(document, constants::TAP_TO_BLOW_ID, move || {
        s.borrow_mut().tap_to_blow();
    });

    let s = session.clone();
    dom::add_window_listener("resize", move || {
        s.borrow_mut().on_resize();
    });

    let s = session.clone();
    dom::add_window_listener("pagehide", move || {
        s.borrow_mut().teardown();
    });
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("cake-web starting");

    if let Err(e) = init() {
        log::error!("init error: {:?}", e);
    }
    Ok(())
}

fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let cake_el = document
        .query_selector(constants::CAKE_SELECTOR)
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?
        .ok_or_else(|| anyhow::anyhow!("missing {}", constants::CAKE_SELECTOR))?;
    let cake_el: web::HtmlElement = cake_el
        .dyn_into::<web::HtmlElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    let device = detect_device_class(&window);
    let profile = DetectorProfile::for_device(device);
    log::info!("[detector] {:?} profile {:?}", device, profile);

    let ui = ui::Ui::new(&document);
    let cake = cake::CakeView::new(document.clone(), cake_el);
    let session: SharedSession = Rc::new(RefCell::new(Session::new(ui, cake, profile)));
    session.borrow_mut().layout_candles();

    wire_controls(&document, &session);
    Ok(())
}
