//! OpenGL Shaders
//!
//! This module defines the [`Shader`] and [`ShaderProgram`] structs for managing OpenGL shaders.
//! Both release their GL object when dropped. This module also provides the [`Uniform`] trait
//! for setting uniform variables in shader programs.

use std::sync::Arc;

use glam::Vec4;
use glow::HasContext;

use crate::error::ShaderError;
use crate::shadersource::ShaderProgramSource;

/// The programmable pipeline stages a [`ShaderProgram`] is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    /// The GL enum passed to `glCreateShader`.
    pub fn gl_type(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        }
    }
}

impl std::fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Represents an individual compiled OpenGL shader.
pub struct Shader {
    gl: Arc<glow::Context>,
    id: glow::Shader,
}

impl Shader {
    /// Compiles a new shader of the given stage from source code.
    ///
    /// On failure the compiler log is written to the error log and the shader
    /// object is deleted before returning.
    pub fn new(gl: &Arc<glow::Context>, stage: ShaderStage, source: &str) -> Result<Self, ShaderError> {
        unsafe {
            let shader = gl.create_shader(stage.gl_type()).map_err(ShaderError::Create)?;
            gl.shader_source(shader, source);
            gl.compile_shader(shader);

            if !gl.get_shader_compile_status(shader) {
                let mut log = gl.get_shader_info_log(shader);
                gl.delete_shader(shader);
                if log.trim().is_empty() {
                    log = "no diagnostic output from the driver".to_string();
                }
                log::error!("Failed to compile {} shader", stage);
                log::error!("{}", log.trim_end());
                return Err(ShaderError::Compile { stage, log });
            }

            Ok(Self {
                gl: Arc::clone(gl),
                id: shader,
            })
        }
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_shader(self.id);
        }
    }
}

/// Represents a uniform variable in a shader program.
pub trait Uniform {
    /// Sets the value of the uniform variable in the given shader program.
    fn set_uniform(&self, gl: &glow::Context, program: glow::Program, name: &str);
}

impl Uniform for Vec4 {
    fn set_uniform(&self, gl: &glow::Context, program: glow::Program, name: &str) {
        unsafe {
            let location = gl.get_uniform_location(program, name);
            if let Some(loc) = location {
                gl.uniform_4_f32(Some(&loc), self.x, self.y, self.z, self.w);
            }
        }
    }
}

impl<T: Uniform> Uniform for &T {
    fn set_uniform(&self, gl: &glow::Context, program: glow::Program, name: &str) {
        (*self).set_uniform(gl, program, name);
    }
}

/// Represents a linked OpenGL shader program.
pub struct ShaderProgram {
    gl: Arc<glow::Context>,
    id: glow::Program,
}

impl ShaderProgram {
    /// Compiles both stages of `source` and links them into a program.
    ///
    /// Both stages are always compiled so that every diagnostic reaches the log; the
    /// first failure is returned and linking is skipped.
    pub fn from_source(gl: &Arc<glow::Context>, source: &ShaderProgramSource) -> Result<Self, ShaderError> {
        let vertex = Shader::new(gl, ShaderStage::Vertex, &source.vertex);
        let fragment = Shader::new(gl, ShaderStage::Fragment, &source.fragment);
        let (vertex, fragment) = (vertex?, fragment?);
        Self::new(gl, &[&vertex, &fragment])
    }

    /// Links a new shader program from the given shaders.
    pub fn new(gl: &Arc<glow::Context>, shaders: &[&Shader]) -> Result<Self, ShaderError> {
        unsafe {
            let program = gl.create_program().map_err(ShaderError::Create)?;

            for shader in shaders {
                gl.attach_shader(program, shader.id);
            }

            gl.link_program(program);

            if !gl.get_program_link_status(program) {
                let log = gl.get_program_info_log(program);
                gl.delete_program(program);
                log::error!("Failed to link shader program");
                log::error!("{}", log.trim_end());
                return Err(ShaderError::Link { log });
            }

            // Validation depends on the GL state at the time of the call, so a failure
            // here is reported without rejecting the program.
            gl.validate_program(program);
            if !gl.get_program_validate_status(program) {
                log::warn!(
                    "Shader program failed validation: {}",
                    gl.get_program_info_log(program).trim_end()
                );
            }

            for shader in shaders {
                gl.detach_shader(program, shader.id);
            }

            Ok(Self {
                gl: Arc::clone(gl),
                id: program,
            })
        }
    }

    /// Binds the shader program for use.
    pub fn use_program(&self) {
        unsafe {
            self.gl.use_program(Some(self.id));
        }
    }

    /// Sets a uniform variable in the shader program.
    pub fn set_uniform<T: Uniform>(&self, name: &str, value: T) {
        value.set_uniform(&self.gl, self.id, name);
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_program(self.id);
        }
    }
}
