//! SDL2 and OpenGL application management.
//!
//! This module defines the [`App`] struct which encapsulates the SDL2
//! and OpenGL context necessary for creating a windowed application.

use std::sync::Arc;

use glow::HasContext;

use crate::config::Config;
use crate::error::InitError;
use crate::logging::GL_INFO_TARGET;

/// The [`App`] struct encapsulates the SDL2 and OpenGL context.
///
/// Fields are declared so that the GL context is dropped before the window and SDL.
pub struct App {
    pub gl: Arc<glow::Context>,
    pub event_pump: sdl2::EventPump,
    pub gl_context: sdl2::video::GLContext,
    pub window: sdl2::video::Window,
    pub video_subsystem: sdl2::VideoSubsystem,
    pub sdl: sdl2::Sdl,
}

/// A window that exists but has no current GL context yet.
pub struct AppWindow {
    sdl: sdl2::Sdl,
    video_subsystem: sdl2::VideoSubsystem,
    window: sdl2::video::Window,
}

impl AppWindow {
    /// Initializes SDL and creates an OpenGL 3.3 core window as described by `config`.
    pub fn new(config: &Config) -> Result<Self, InitError> {
        let sdl = sdl2::init().map_err(InitError::Sdl)?;
        let video_subsystem = sdl.video().map_err(InitError::Sdl)?;
        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_profile(sdl2::video::GLProfile::Core);
        gl_attr.set_context_version(3, 3);

        let window = video_subsystem
            .window(&config.title, config.width, config.height)
            .opengl()
            .resizable()
            .build()
            .map_err(|e| InitError::Window(e.to_string()))?;

        Ok(Self {
            sdl,
            video_subsystem,
            window,
        })
    }

    /// Creates the GL context, makes it current and loads the GL functions.
    pub fn make_current(self, vsync: bool) -> Result<App, InitError> {
        let gl_context = self.window.gl_create_context().map_err(InitError::Context)?;
        self.window
            .gl_make_current(&gl_context)
            .map_err(InitError::Context)?;

        let interval = if vsync {
            sdl2::video::SwapInterval::VSync
        } else {
            sdl2::video::SwapInterval::Immediate
        };
        if let Err(e) = self.video_subsystem.gl_set_swap_interval(interval) {
            log::warn!("Could not set swap interval: {}", e);
        }

        let video_subsystem = &self.video_subsystem;
        let gl = unsafe {
            glow::Context::from_loader_function(|s| video_subsystem.gl_get_proc_address(s) as *const _)
        };

        let version = gl.version();
        if version.is_embedded || (version.major, version.minor) < (3, 3) {
            return Err(InitError::Loader(format!(
                "OpenGL 3.3 core is required, driver reports {}.{}{}",
                version.major,
                version.minor,
                if version.is_embedded { " ES" } else { "" }
            )));
        }
        log::info!(target: GL_INFO_TARGET, "{}", unsafe { gl.get_parameter_string(glow::VERSION) });

        let event_pump = self.sdl.event_pump().map_err(InitError::Sdl)?;

        Ok(App {
            gl: Arc::new(gl),
            event_pump,
            gl_context,
            window: self.window,
            video_subsystem: self.video_subsystem,
            sdl: self.sdl,
        })
    }
}
