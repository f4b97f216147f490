//! Renderer bootstrap and the throttled animation loop.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, HtmlCanvasElement, Storage, WebGl2RenderingContext as GL, WebGlProgram, WebGlShader,
    WebGlUniformLocation, WebGlVertexArrayObject,
};

use crate::aspect::{self, BackingStore, DisplaySize};
use crate::error::{BackdropError, ShaderKind};
use crate::frame::{self, FrameSink};
use crate::shaders;
use crate::timing::{self, FrameThrottle, RateProvider};

use super::observe;

impl BackingStore for HtmlCanvasElement {
    fn backing_size(&self) -> DisplaySize {
        DisplaySize::new(self.width(), self.height())
    }

    fn set_backing_size(&mut self, size: DisplaySize) {
        self.set_width(size.width);
        self.set_height(size.height);
    }
}

/// Everything the frame loop needs, resolved once at bootstrap. Never
/// rebuilt: a failed bootstrap means no loop is scheduled for this page load.
pub struct Renderer {
    canvas: HtmlCanvasElement,
    gl: GL,
    program: WebGlProgram,
    vao: WebGlVertexArrayObject,
    time_loc: Option<WebGlUniformLocation>,
    res_loc: Option<WebGlUniformLocation>,
    time_offset: f64,
}

impl Renderer {
    /// Looks up the surface, acquires a WebGL2 context, compiles and links
    /// the backdrop program, uploads the static quad and reads the persisted
    /// animation offset.
    pub fn initialize(surface_id: &str) -> Result<Renderer, BackdropError> {
        let document = window()
            .and_then(|w| w.document())
            .ok_or_else(|| BackdropError::SurfaceNotFound(surface_id.to_string()))?;
        let canvas = document
            .get_element_by_id(surface_id)
            .ok_or_else(|| BackdropError::SurfaceNotFound(surface_id.to_string()))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| BackdropError::SurfaceNotFound(surface_id.to_string()))?;

        let gl: GL = canvas
            .get_context("webgl2")
            .map_err(|_| BackdropError::ContextUnavailable)?
            .ok_or(BackdropError::ContextUnavailable)?
            .dyn_into()
            .map_err(|_| BackdropError::ContextUnavailable)?;

        let program = build_program(&gl)?;

        let time_loc = gl.get_uniform_location(&program, "u_time");
        let res_loc = gl.get_uniform_location(&program, "u_res");

        let vao = upload_quad(&gl, &program)?;

        let size = canvas.backing_size();
        gl.viewport(0, 0, size.width as i32, size.height as i32);

        Ok(Renderer {
            canvas,
            gl,
            program,
            vao,
            time_loc,
            res_loc,
            time_offset: read_offset(),
        })
    }

    /// One executed frame: reconcile the backing store with the observed
    /// display size, compute the render time, persist the advanced offset and
    /// replay the draw sequence.
    fn tick(&mut self, now_ms: f64, display: DisplaySize) {
        aspect::reconcile(&mut self.canvas, display);

        let plan = frame::plan_frame(now_ms, self.time_offset, self.canvas.backing_size());
        persist_offset(plan.stored_offset);

        let mut sink = GlFrame {
            gl: &self.gl,
            program: &self.program,
            vao: &self.vao,
            time_loc: self.time_loc.as_ref(),
            res_loc: self.res_loc.as_ref(),
        };
        frame::render_frame(&mut sink, &plan);
    }
}

/// Bootstraps the renderer on `surface_id` and starts the animation loop.
/// Bootstrap failures are logged and leave the page without a backdrop; they
/// never propagate to the caller.
pub fn start(surface_id: &str, rate: Rc<dyn RateProvider>) -> Result<(), JsValue> {
    let renderer = match Renderer::initialize(surface_id) {
        Ok(renderer) => renderer,
        Err(err) => {
            log::error!("backdrop disabled: {err}");
            return Ok(());
        }
    };
    run_loop(renderer, rate)
}

/// Self-rescheduling animation-frame loop, throttled to the provider's rate.
///
/// `f` holds the animation-frame closure so that we can keep calling
/// `request_animation_frame` recursively. Storing it inside an `Option`
/// allows us to create the `Closure` first and then obtain a reference to
/// it from within itself.
fn run_loop(mut renderer: Renderer, rate: Rc<dyn RateProvider>) -> Result<(), JsValue> {
    let display = observe::observe(&renderer.canvas)?;
    let mut throttle = FrameThrottle::new();

    let f: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();

    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |now_ms: f64| {
        if throttle.should_run(now_ms, rate.target_fps()) {
            renderer.tick(now_ms, *display.borrow());
        }

        // schedule next
        if let Some(win) = window() {
            if let Some(cb) = f.borrow().as_ref() {
                if win
                    .request_animation_frame(cb.as_ref().unchecked_ref())
                    .is_err()
                {
                    log::warn!("failed to schedule next animation frame");
                }
            }
        }
    }) as Box<dyn FnMut(f64)>));

    window()
        .ok_or("no window")?
        .request_animation_frame(g.borrow().as_ref().unwrap().as_ref().unchecked_ref())?;

    Ok(())
}

/// Compiles one shader object. On failure the driver's info log is logged,
/// the shader object is released and linking is never attempted.
pub fn compile_shader(
    gl: &GL,
    kind: ShaderKind,
    source: &str,
) -> Result<WebGlShader, BackdropError> {
    let gl_kind = match kind {
        ShaderKind::Vertex => GL::VERTEX_SHADER,
        ShaderKind::Fragment => GL::FRAGMENT_SHADER,
    };
    let shader = gl
        .create_shader(gl_kind)
        .ok_or(BackdropError::ContextUnavailable)?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    let compiled = gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false);
    if compiled {
        return Ok(shader);
    }

    let info_log = gl.get_shader_info_log(&shader).unwrap_or_default();
    log::error!("{kind} shader failed to compile: {info_log}");
    gl.delete_shader(Some(&shader));
    Err(BackdropError::ShaderCompileFailed {
        kind,
        log: info_log,
    })
}

/// Links a compiled vertex/fragment pair. On failure the program object is
/// released along with its info log; the caller still owns the shaders.
pub fn link_program(
    gl: &GL,
    vertex: &WebGlShader,
    fragment: &WebGlShader,
) -> Result<WebGlProgram, BackdropError> {
    let program = gl
        .create_program()
        .ok_or(BackdropError::ContextUnavailable)?;
    gl.attach_shader(&program, vertex);
    gl.attach_shader(&program, fragment);
    gl.link_program(&program);

    let linked = gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false);
    if linked {
        return Ok(program);
    }

    let info_log = gl.get_program_info_log(&program).unwrap_or_default();
    log::error!("program failed to link: {info_log}");
    gl.delete_program(Some(&program));
    Err(BackdropError::ProgramLinkFailed(info_log))
}

fn build_program(gl: &GL) -> Result<WebGlProgram, BackdropError> {
    let vertex = compile_shader(gl, ShaderKind::Vertex, shaders::VERTEX_SHADER)?;
    let fragment = match compile_shader(gl, ShaderKind::Fragment, shaders::FRAGMENT_SHADER) {
        Ok(fragment) => fragment,
        Err(err) => {
            gl.delete_shader(Some(&vertex));
            return Err(err);
        }
    };

    let program = link_program(gl, &vertex, &fragment);

    // the linked program retains the compiled code
    gl.delete_shader(Some(&vertex));
    gl.delete_shader(Some(&fragment));

    program
}

/// Uploads the static quad and captures the attribute pointer setup in a
/// vertex array, so each frame only rebinds the VAO. A -1 attribute location
/// (optimized out by the driver) skips the pointer setup.
fn upload_quad(gl: &GL, program: &WebGlProgram) -> Result<WebGlVertexArrayObject, BackdropError> {
    let buffer = gl.create_buffer().ok_or(BackdropError::ContextUnavailable)?;
    gl.bind_buffer(GL::ARRAY_BUFFER, Some(&buffer));
    let vertices = js_sys::Float32Array::from(shaders::QUAD_VERTICES.as_slice());
    gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &vertices, GL::STATIC_DRAW);

    let vao = gl
        .create_vertex_array()
        .ok_or(BackdropError::ContextUnavailable)?;
    gl.bind_vertex_array(Some(&vao));

    let position = gl.get_attrib_location(program, "a_position");
    if position >= 0 {
        gl.enable_vertex_attrib_array(position as u32);
        gl.vertex_attrib_pointer_with_i32(position as u32, 2, GL::FLOAT, false, 0, 0);
    }

    Ok(vao)
}

/// [`FrameSink`] over the real WebGL2 context. Missing uniform locations
/// turn the corresponding set calls into no-ops.
struct GlFrame<'a> {
    gl: &'a GL,
    program: &'a WebGlProgram,
    vao: &'a WebGlVertexArrayObject,
    time_loc: Option<&'a WebGlUniformLocation>,
    res_loc: Option<&'a WebGlUniformLocation>,
}

impl FrameSink for GlFrame<'_> {
    fn set_viewport(&mut self, size: DisplaySize) {
        self.gl
            .viewport(0, 0, size.width as i32, size.height as i32);
    }

    fn clear(&mut self) {
        self.gl.clear_color(0.0, 0.0, 0.0, 0.0);
        self.gl.clear(GL::COLOR_BUFFER_BIT | GL::DEPTH_BUFFER_BIT);
    }

    fn bind_pipeline(&mut self) {
        self.gl.use_program(Some(self.program));
        self.gl.bind_vertex_array(Some(self.vao));
    }

    fn set_time(&mut self, t: f32) {
        self.gl.uniform1f(self.time_loc, t);
    }

    fn set_resolution(&mut self, res: (f32, f32)) {
        self.gl.uniform2f(self.res_loc, res.0, res.1);
    }

    fn draw_quad(&mut self) {
        self.gl.draw_arrays(GL::TRIANGLE_FAN, 0, 4);
    }
}

fn session_storage() -> Option<Storage> {
    window().and_then(|w| w.session_storage().ok().flatten())
}

fn read_offset() -> f64 {
    let raw = session_storage().and_then(|s| s.get_item(timing::OFFSET_STORAGE_KEY).ok().flatten());
    timing::decode_offset(raw.as_deref())
}

fn persist_offset(offset: f64) {
    if let Some(storage) = session_storage() {
        if storage
            .set_item(timing::OFFSET_STORAGE_KEY, &timing::encode_offset(offset))
            .is_err()
        {
            log::warn!("failed to persist animation offset");
        }
    }
}
