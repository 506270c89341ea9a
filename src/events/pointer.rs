use field_core::InputState;
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Feed window pointer movement into the shared input state. Both canvases
/// ignore pointer events, so the listeners sit on the window.
pub fn wire_pointer_tracking(input: Rc<RefCell<InputState>>) {
    wire_pointermove(input.clone());
    wire_pointerout(input);
}

#[inline]
fn client_px(ev: &web::MouseEvent) -> Vec2 {
    Vec2::new(ev.client_x() as f32, ev.client_y() as f32)
}

fn wire_pointermove(input: Rc<RefCell<InputState>>) {
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        input.borrow_mut().pointer_moved(client_px(&ev));
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    }

    closure.forget();
}

fn wire_pointerout(input: Rc<RefCell<InputState>>) {
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        // Moving between elements also fires pointerout; only leaving the
        // window has no related target.
        if ev.related_target().is_none() {
            input.borrow_mut().pointer_left();
        }
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointerout", closure.as_ref().unchecked_ref());
    }

    closure.forget();
}
