//! The render driver.
//!
//! [`Driver`] walks the program through its one-way lifecycle: window, context,
//! geometry, shader program, render loop, teardown. The per-frame work runs through
//! the [`Surface`] and [`FrameRenderer`] traits so the loop itself does not depend on
//! a live window.

use std::sync::Arc;
use std::time::{Duration, Instant};

use glow::HasContext;

use crate::abs::{App, AppWindow, Mesh, ShaderProgram};
use crate::config::Config;
use crate::error::DriverError;
use crate::quad::{QUAD_INDICES, QUAD_VERTICES};
use crate::shadersource::ShaderProgramSource;

/// Lifecycle states of the driver, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DriverState {
    Uninitialized,
    WindowCreated,
    ContextCurrent,
    GeometryUploaded,
    ProgramActive,
    Rendering,
    Terminated,
}

impl DriverState {
    /// The only state reachable from `self`, if any.
    pub fn next(self) -> Option<DriverState> {
        use DriverState::*;
        match self {
            Uninitialized => Some(WindowCreated),
            WindowCreated => Some(ContextCurrent),
            ContextCurrent => Some(GeometryUploaded),
            GeometryUploaded => Some(ProgramActive),
            ProgramActive => Some(Rendering),
            Rendering => Some(Terminated),
            Terminated => None,
        }
    }

    /// Moves to `to`, which must be the immediate successor of `self`.
    pub fn advance(&mut self, to: DriverState) -> Result<(), DriverError> {
        if self.next() != Some(to) {
            return Err(DriverError::InvalidTransition { from: *self, to });
        }
        log::debug!("{:?} -> {:?}", self, to);
        *self = to;
        Ok(())
    }
}

/// The window side of a frame: presenting and event handling.
pub trait Surface {
    /// Shows the frame that was just rendered.
    fn present(&mut self);

    /// Processes pending window events. Returns `true` once the window should close.
    fn poll_events(&mut self) -> bool;
}

/// The GL side of a frame.
pub trait FrameRenderer {
    fn clear(&mut self);

    /// Issues the indexed draw call. Returns the number of indices drawn.
    fn draw(&mut self) -> usize;
}

/// Summary of a finished render loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopStats {
    pub frames: u64,
    /// Indices submitted by draw calls across all frames.
    pub indices: u64,
    pub elapsed: Duration,
}

/// Runs frames until `surface` reports that the window should close.
///
/// Each iteration clears, draws, presents and then polls events once, so the loop ends
/// in the same iteration the close request is observed.
pub fn render_loop<S: Surface, R: FrameRenderer>(surface: &mut S, renderer: &mut R) -> LoopStats {
    let start = Instant::now();
    let mut frames = 0;
    let mut indices = 0;

    loop {
        renderer.clear();
        indices += renderer.draw() as u64;
        surface.present();
        frames += 1;

        if surface.poll_events() {
            break;
        }
    }

    LoopStats {
        frames,
        indices,
        elapsed: start.elapsed(),
    }
}

/// The SDL window and its event pump.
struct WindowSurface<'a> {
    gl: &'a glow::Context,
    window: &'a sdl2::video::Window,
    event_pump: &'a mut sdl2::EventPump,
}

impl Surface for WindowSurface<'_> {
    fn present(&mut self) {
        self.window.gl_swap_window();
    }

    fn poll_events(&mut self) -> bool {
        let mut close = false;
        for event in self.event_pump.poll_iter() {
            match event {
                sdl2::event::Event::Quit { .. } => close = true,
                sdl2::event::Event::Window {
                    win_event: sdl2::event::WindowEvent::Resized(width, height),
                    ..
                } => unsafe {
                    self.gl.viewport(0, 0, width, height);
                },
                _ => {}
            }
        }
        close
    }
}

/// Draws the quad with the linked program, or only clears when no program is available.
struct QuadRenderer<'a> {
    gl: &'a glow::Context,
    mesh: &'a Mesh,
    program: Option<&'a ShaderProgram>,
}

impl FrameRenderer for QuadRenderer<'_> {
    fn clear(&mut self) {
        unsafe {
            self.gl.clear(glow::COLOR_BUFFER_BIT);
        }
    }

    fn draw(&mut self) -> usize {
        if self.program.is_none() {
            return 0;
        }
        self.mesh.draw();
        self.mesh.index_count()
    }
}

/// Owns the window, the GL resources and the lifecycle state.
pub struct Driver {
    config: Config,
    state: DriverState,
}

impl Driver {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: DriverState::Uninitialized,
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Runs the whole program. Only window and context failures are returned; shader
    /// problems are logged and leave the window showing the clear color.
    pub fn run(&mut self) -> Result<LoopStats, DriverError> {
        let window = AppWindow::new(&self.config)?;
        self.state.advance(DriverState::WindowCreated)?;

        let mut app: App = window.make_current(self.config.vsync)?;
        self.state.advance(DriverState::ContextCurrent)?;

        let gl = Arc::clone(&app.gl);
        unsafe {
            let color = self.config.clear_color();
            gl.clear_color(color.x, color.y, color.z, color.w);
        }

        let mesh = Mesh::new(&gl, &QUAD_VERTICES, &QUAD_INDICES, glow::TRIANGLES)?;
        self.state.advance(DriverState::GeometryUploaded)?;

        let program = self.build_program(&gl);
        self.state.advance(DriverState::ProgramActive)?;

        self.state.advance(DriverState::Rendering)?;
        let stats = {
            let mut surface = WindowSurface {
                gl: &gl,
                window: &app.window,
                event_pump: &mut app.event_pump,
            };
            let mut renderer = QuadRenderer {
                gl: &gl,
                mesh: &mesh,
                program: program.as_ref(),
            };
            render_loop(&mut surface, &mut renderer)
        };

        drop(program);
        drop(mesh);
        drop(gl);
        drop(app);
        self.state.advance(DriverState::Terminated)?;

        Ok(stats)
    }

    /// Loads, compiles and binds the shader program. Failures are logged and yield `None`.
    fn build_program(&self, gl: &Arc<glow::Context>) -> Option<ShaderProgram> {
        let source = match ShaderProgramSource::load(&self.config.shader_path) {
            Ok(source) => source,
            Err(e) => {
                log::error!("{}", e);
                return None;
            }
        };

        match ShaderProgram::from_source(gl, &source) {
            Ok(program) => {
                program.use_program();
                program.set_uniform("u_color", self.config.quad_color());
                Some(program)
            }
            Err(e) => {
                log::error!("Rendering without a shader program: {}", e);
                None
            }
        }
    }
}
