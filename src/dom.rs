use field_core::Viewport;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// CSS-pixel size of the window's layout viewport.
pub fn viewport() -> Option<Viewport> {
    let w = web::window()?;
    let width = w.inner_width().ok()?.as_f64()?;
    let height = w.inner_height().ok()?.as_f64()?;
    Some(Viewport::new(width as f32, height as f32))
}

/// Reuse the canvas with `id`, or prepend a fixed full-viewport canvas to
/// `<body>` that ignores pointer events and sits at `z_index`.
pub fn background_canvas(
    document: &web::Document,
    id: &str,
    z_index: &str,
) -> anyhow::Result<web::HtmlCanvasElement> {
    if let Some(el) = document.get_element_by_id(id) {
        return el
            .dyn_into::<web::HtmlCanvasElement>()
            .map_err(|_| anyhow::anyhow!("#{id} is not a canvas"));
    }
    let body = document
        .body()
        .ok_or_else(|| anyhow::anyhow!("no <body>"))?;
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .dyn_into()
        .map_err(|_| anyhow::anyhow!("created element is not a canvas"))?;
    canvas.set_id(id);
    let style = canvas.style();
    for (prop, value) in [
        ("position", "fixed"),
        ("top", "0"),
        ("left", "0"),
        ("width", "100%"),
        ("height", "100%"),
        ("pointer-events", "none"),
        ("z-index", z_index),
    ] {
        style
            .set_property(prop, value)
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    }
    body.prepend_with_node_1(&canvas)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(canvas)
}

/// Backing store in CSS pixels; the 2D layer draws in CSS pixel units.
pub fn sync_canvas_css_size(canvas: &web::HtmlCanvasElement, viewport: Viewport) {
    canvas.set_width((viewport.width as u32).max(1));
    canvas.set_height((viewport.height as u32).max(1));
}

/// Backing store in device pixels so the GPU layer stays sharp on HiDPI.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

