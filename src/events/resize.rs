use crate::dom;
use crate::frame::FrameContext;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn wire_resize(frame_ctx: Rc<RefCell<FrameContext>>) {
    let closure = Closure::wrap(Box::new(move || {
        if let Some(viewport) = dom::viewport() {
            frame_ctx.borrow_mut().resize(viewport);
        }
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

/// Stop the loop and release the scene when the page is hidden for good.
/// A page kept in the back/forward cache (`persisted`) keeps running.
pub fn wire_teardown(frame_ctx: Rc<RefCell<FrameContext>>) {
    let closure = Closure::wrap(Box::new(move |ev: web::PageTransitionEvent| {
        if !ev.persisted() {
            frame_ctx.borrow_mut().shutdown();
        }
    }) as Box<dyn FnMut(_)>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
