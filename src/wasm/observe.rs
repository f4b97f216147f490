//! Canvas display-size tracking via `ResizeObserver`.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, HtmlCanvasElement, ResizeObserver, ResizeObserverBoxOptions, ResizeObserverEntry,
    ResizeObserverOptions, ResizeObserverSize,
};

use crate::aspect::{DisplaySize, DEFAULT_DISPLAY_SIZE};

/// Latest observed display size in device pixels. The observer callback is
/// the only writer; the frame loop reads it before each draw.
pub type SharedDisplaySize = Rc<RefCell<DisplaySize>>;

/// Watches the canvas content box and records its size in device pixels.
/// The cell starts at the canvas default 300x150 until the first callback
/// fires.
pub fn observe(canvas: &HtmlCanvasElement) -> Result<SharedDisplaySize, JsValue> {
    let cell: SharedDisplaySize = Rc::new(RefCell::new(DEFAULT_DISPLAY_SIZE));

    let sink = cell.clone();
    let on_resize = Closure::wrap(Box::new(move |entries: js_sys::Array| {
        for entry in entries.iter() {
            let entry: ResizeObserverEntry = entry.unchecked_into();
            *sink.borrow_mut() = entry_display_size(&entry);
        }
    }) as Box<dyn FnMut(js_sys::Array)>);

    let observer = ResizeObserver::new(on_resize.as_ref().unchecked_ref())?;
    let options = ResizeObserverOptions::new();
    options.set_box(ResizeObserverBoxOptions::ContentBox);
    observer.observe_with_options(canvas, &options);
    on_resize.forget();

    Ok(cell)
}

/// Device-pixel measurement with a three-tier fallback. Only the
/// devicePixelContentBox reading is exact and needs no scaling; the
/// content-box and content-rect tiers are CSS pixels and are scaled by the
/// current device pixel ratio, rounded to the nearest integer.
fn entry_display_size(entry: &ResizeObserverEntry) -> DisplaySize {
    let dpr = window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);

    let device_boxes = entry.device_pixel_content_box_size();
    if device_boxes.length() > 0 {
        let size: ResizeObserverSize = device_boxes.get(0).unchecked_into();
        return DisplaySize::from_css_pixels(size.inline_size(), size.block_size(), 1.0);
    }

    let content_boxes = entry.content_box_size();
    if content_boxes.length() > 0 {
        let size: ResizeObserverSize = content_boxes.get(0).unchecked_into();
        return DisplaySize::from_css_pixels(size.inline_size(), size.block_size(), dpr);
    }

    let rect = entry.content_rect();
    DisplaySize::from_css_pixels(rect.width(), rect.height(), dpr)
}
