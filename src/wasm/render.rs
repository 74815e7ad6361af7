use std::cell::RefCell;
use std::f32::consts::FRAC_PI_4;
use std::rc::Rc;

use glam::{Mat4, Vec3};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, HtmlCanvasElement, WebGl2RenderingContext as GL, WebGlBuffer, WebGlProgram,
    WebGlShader, WebGlUniformLocation,
};

use crate::solids::Solid;

// Fixed shader contract shared by all solids: vec3 position + vec4 color in,
// projection and model-view matrices as uniforms, interpolated color out.
const VERTEX_SHADER: &str = r#"
attribute vec3 vertexPos;
attribute vec4 vertexColor;
uniform mat4 modelViewMatrix;
uniform mat4 projectionMatrix;
varying vec4 vColor;
void main(void) {
    gl_Position = projectionMatrix * modelViewMatrix * vec4(vertexPos, 1.0);
    vColor = vertexColor;
}
"#;

const FRAGMENT_SHADER: &str = r#"
precision lowp float;
varying vec4 vColor;
void main(void) {
    gl_FragColor = vColor;
}
"#;

/// Everything the frame closure needs to draw: the GL handle, the linked
/// program and its attribute/uniform locations. Built once at startup.
struct SceneContext {
    gl: GL,
    program: WebGlProgram,
    attr_pos: u32,
    attr_color: u32,
    u_projection: WebGlUniformLocation,
    u_model_view: WebGlUniformLocation,
}

impl SceneContext {
    fn new(gl: GL) -> Result<Self, JsValue> {
        let vert = compile_shader(&gl, GL::VERTEX_SHADER, VERTEX_SHADER)?;
        let frag = compile_shader(&gl, GL::FRAGMENT_SHADER, FRAGMENT_SHADER)?;
        let program = link_program(&gl, &vert, &frag)?;

        let attr_pos = gl.get_attrib_location(&program, "vertexPos");
        let attr_color = gl.get_attrib_location(&program, "vertexColor");
        if attr_pos < 0 || attr_color < 0 {
            return Err(fatal("could not locate shader attributes"));
        }
        let attr_pos = attr_pos as u32;
        let attr_color = attr_color as u32;
        gl.enable_vertex_attrib_array(attr_pos);
        gl.enable_vertex_attrib_array(attr_color);

        let u_projection = gl
            .get_uniform_location(&program, "projectionMatrix")
            .ok_or_else(|| fatal("missing projectionMatrix uniform"))?;
        let u_model_view = gl
            .get_uniform_location(&program, "modelViewMatrix")
            .ok_or_else(|| fatal("missing modelViewMatrix uniform"))?;

        Ok(SceneContext {
            gl,
            program,
            attr_pos,
            attr_color,
            u_projection,
            u_model_view,
        })
    }
}

/// A solid plus its GPU-side buffers, uploaded once at startup.
struct GpuSolid {
    solid: Solid,
    vertex_buf: WebGlBuffer,
    color_buf: WebGlBuffer,
    index_buf: WebGlBuffer,
}

impl GpuSolid {
    fn upload(gl: &GL, solid: Solid) -> Result<Self, JsValue> {
        let vertex_buf = upload_f32(gl, solid.vertices())?;
        let color_buf = upload_f32(gl, solid.vertex_colors())?;
        let index_buf = upload_u16(gl, solid.indices())?;
        Ok(GpuSolid {
            solid,
            vertex_buf,
            color_buf,
            index_buf,
        })
    }

    fn draw(&self, ctx: &SceneContext, projection: &Mat4) {
        let gl = &ctx.gl;
        gl.bind_buffer(GL::ARRAY_BUFFER, Some(&self.vertex_buf));
        gl.vertex_attrib_pointer_with_i32(ctx.attr_pos, 3, GL::FLOAT, false, 0, 0);

        gl.bind_buffer(GL::ARRAY_BUFFER, Some(&self.color_buf));
        gl.vertex_attrib_pointer_with_i32(ctx.attr_color, 4, GL::FLOAT, false, 0, 0);

        gl.bind_buffer(GL::ELEMENT_ARRAY_BUFFER, Some(&self.index_buf));

        gl.uniform_matrix4fv_with_f32_array(
            Some(&ctx.u_projection),
            false,
            &projection.to_cols_array(),
        );
        gl.uniform_matrix4fv_with_f32_array(
            Some(&ctx.u_model_view),
            false,
            &self.solid.transform().to_cols_array(),
        );

        gl.draw_elements_with_i32(GL::TRIANGLES, self.solid.index_count(), GL::UNSIGNED_SHORT, 0);
    }
}

/// Set up the scene and start the render loop.
pub fn start(canvas: HtmlCanvasElement) -> Result<(), JsValue> {
    let gl: GL = canvas
        .get_context("webgl2")?
        .ok_or_else(|| {
            fatal("Your browser does not support WebGL2, or it is not enabled by default.")
        })?
        .dyn_into()?;

    // Size canvas to the window now and on every resize.
    let win = window().ok_or("no window")?;
    let width = win.inner_width()?.as_f64().unwrap_or(0.0);
    let height = win.inner_height()?.as_f64().unwrap_or(0.0);
    canvas.set_width(width as u32);
    canvas.set_height(height as u32);

    let resize_closure = {
        let canvas = canvas.clone();
        Closure::wrap(Box::new(move || {
            let w = window().unwrap().inner_width().unwrap().as_f64().unwrap();
            let h = window().unwrap().inner_height().unwrap().as_f64().unwrap();
            canvas.set_width(w as u32);
            canvas.set_height(h as u32);
        }) as Box<dyn FnMut()>)
    };
    win.add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref())?;
    resize_closure.forget();

    let ctx = SceneContext::new(gl)?;

    // The octahedron spawns at Y=0 so its bounce covers the full [-8, 0]
    // range from the first frame.
    let mut solids = vec![
        GpuSolid::upload(&ctx.gl, Solid::pyramid(Vec3::new(2.0, -2.5, -16.0), Vec3::Y))?,
        GpuSolid::upload(
            &ctx.gl,
            Solid::dodecahedron(Vec3::new(5.0, -3.5, -24.0), [Vec3::Y, Vec3::X]),
        )?,
        GpuSolid::upload(
            &ctx.gl,
            Solid::octahedron(Vec3::new(-7.0, 0.0, -20.0), Vec3::new(1.0, 1.0, 0.0)),
        )?,
    ];

    let performance = win.performance().ok_or("no performance")?;

    // Animation loop
    // `f` holds the animation-frame closure so that we can keep calling
    // `request_animation_frame` recursively. Storing it inside an `Option`
    // allows us to create the `Closure` first and then obtain a reference to
    // it from within itself.
    let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);
        ctx.gl.viewport(0, 0, width as i32, height as i32);
        let projection =
            Mat4::perspective_rh_gl(FRAC_PI_4, width as f32 / height as f32, 1.0, 10000.0);

        ctx.gl.clear_color(0.1, 0.1, 0.1, 1.0);
        ctx.gl.enable(GL::DEPTH_TEST);
        ctx.gl.clear(GL::COLOR_BUFFER_BIT | GL::DEPTH_BUFFER_BIT);
        ctx.gl.use_program(Some(&ctx.program));

        // Draw all solids, then advance them all, in the same order.
        for solid in &solids {
            solid.draw(&ctx, &projection);
        }
        let now = performance.now();
        for solid in &mut solids {
            solid.solid.tick(now);
        }

        // schedule next
        window()
            .unwrap()
            .request_animation_frame(f.borrow().as_ref().unwrap().as_ref().unchecked_ref())
            .unwrap();
    }) as Box<dyn FnMut()>));

    window()
        .ok_or("no window")?
        .request_animation_frame(g.borrow().as_ref().unwrap().as_ref().unchecked_ref())?;

    Ok(())
}

/// Context and shader failures are fatal: notify the user, then halt.
fn fatal(msg: &str) -> JsValue {
    if let Some(win) = window() {
        let _ = win.alert_with_message(msg);
    }
    JsValue::from_str(msg)
}

fn compile_shader(gl: &GL, shader_type: u32, source: &str) -> Result<WebGlShader, JsValue> {
    let shader = gl
        .create_shader(shader_type)
        .ok_or_else(|| fatal("unable to create shader"))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    if gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(shader)
    } else {
        let log = gl.get_shader_info_log(&shader).unwrap_or_default();
        Err(fatal(&format!("shader compile failed: {log}")))
    }
}

fn link_program(gl: &GL, vert: &WebGlShader, frag: &WebGlShader) -> Result<WebGlProgram, JsValue> {
    let program = gl
        .create_program()
        .ok_or_else(|| fatal("unable to create shader program"))?;
    gl.attach_shader(&program, vert);
    gl.attach_shader(&program, frag);
    gl.link_program(&program);

    if gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(program)
    } else {
        let log = gl.get_program_info_log(&program).unwrap_or_default();
        Err(fatal(&format!("could not initialise shaders: {log}")))
    }
}

fn upload_f32(gl: &GL, data: &[f32]) -> Result<WebGlBuffer, JsValue> {
    let buf = gl
        .create_buffer()
        .ok_or_else(|| fatal("unable to create buffer"))?;
    gl.bind_buffer(GL::ARRAY_BUFFER, Some(&buf));
    // The view aliases wasm memory, so nothing may allocate while it is
    // alive; buffer_data copies the contents immediately.
    unsafe {
        let view = js_sys::Float32Array::view(data);
        gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &view, GL::STATIC_DRAW);
    }
    Ok(buf)
}

fn upload_u16(gl: &GL, data: &[u16]) -> Result<WebGlBuffer, JsValue> {
    let buf = gl
        .create_buffer()
        .ok_or_else(|| fatal("unable to create buffer"))?;
    gl.bind_buffer(GL::ELEMENT_ARRAY_BUFFER, Some(&buf));
    unsafe {
        let view = js_sys::Uint16Array::view(data);
        gl.buffer_data_with_array_buffer_view(GL::ELEMENT_ARRAY_BUFFER, &view, GL::STATIC_DRAW);
    }
    Ok(buf)
}
