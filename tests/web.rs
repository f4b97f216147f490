#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{HtmlCanvasElement, WebGl2RenderingContext};

use backdrop_wasm::error::{BackdropError, ShaderKind};
use backdrop_wasm::shaders;
use backdrop_wasm::wasm::render::{compile_shader, link_program, Renderer};

wasm_bindgen_test_configure!(run_in_browser);

fn attach_canvas(id: &str) -> HtmlCanvasElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas = document
        .create_element("canvas")
        .unwrap()
        .dyn_into::<HtmlCanvasElement>()
        .unwrap();
    canvas.set_id(id);
    document.body().unwrap().append_child(&canvas).unwrap();
    canvas
}

fn webgl2(canvas: &HtmlCanvasElement) -> Option<WebGl2RenderingContext> {
    canvas
        .get_context("webgl2")
        .ok()
        .flatten()
        .and_then(|ctx| ctx.dyn_into().ok())
}

#[wasm_bindgen_test]
fn missing_surface_fails_bootstrap() {
    let err = Renderer::initialize("no-such-canvas").unwrap_err();
    assert!(matches!(err, BackdropError::SurfaceNotFound(_)));
}

#[wasm_bindgen_test]
fn bootstrap_links_the_backdrop_program() {
    attach_canvas("bootstrap-canvas");
    match Renderer::initialize("bootstrap-canvas") {
        Ok(_) => {}
        // headless runners without GPU support land here
        Err(BackdropError::ContextUnavailable) => {}
        Err(err) => panic!("unexpected bootstrap failure: {err}"),
    }
}

#[wasm_bindgen_test]
fn valid_sources_compile_link_and_expose_the_attribute() {
    let canvas = attach_canvas("link-canvas");
    let Some(gl) = webgl2(&canvas) else { return };

    let vertex = compile_shader(&gl, ShaderKind::Vertex, shaders::VERTEX_SHADER).unwrap();
    let fragment = compile_shader(&gl, ShaderKind::Fragment, shaders::FRAGMENT_SHADER).unwrap();
    let program = link_program(&gl, &vertex, &fragment).unwrap();

    assert!(gl.get_attrib_location(&program, "a_position") >= 0);
}

#[wasm_bindgen_test]
fn malformed_fragment_source_reports_compile_failure() {
    let canvas = attach_canvas("compile-canvas");
    let Some(gl) = webgl2(&canvas) else { return };

    let err = compile_shader(
        &gl,
        ShaderKind::Fragment,
        "#version 300 es\nvoid main() { nonsense",
    )
    .unwrap_err();
    assert!(matches!(
        err,
        BackdropError::ShaderCompileFailed {
            kind: ShaderKind::Fragment,
            ..
        }
    ));
}
