//! Error types for every stage of bringing the quad on screen.

use std::path::{Path, PathBuf};

use crate::abs::ShaderStage;
use crate::driver::DriverState;

/// Errors produced while reading or splitting an annotated shader file.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("shader file not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("failed to read shader file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed shader file at line {line}: {message}")]
    Format { line: usize, message: String },
    #[error("shader file has no `#shader {0}` section")]
    MissingStage(ShaderStage),
}

impl SourceError {
    pub(crate) fn open(path: &Path, error: std::io::Error) -> Self {
        if error.kind() == std::io::ErrorKind::NotFound {
            SourceError::FileNotFound(path.to_path_buf())
        } else {
            SourceError::Io(error)
        }
    }
}

/// Errors produced while reading the configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid configuration: {0}")]
    Json(#[from] serde_json::Error),
    #[error("window size must be non-zero, got {width}x{height}")]
    ZeroSize { width: u32, height: u32 },
}

/// Errors produced while compiling shaders or linking a program.
#[derive(Debug, thiserror::Error)]
pub enum ShaderError {
    #[error("failed to create GL object: {0}")]
    Create(String),
    #[error("failed to compile {stage} shader:\n{log}")]
    Compile { stage: ShaderStage, log: String },
    #[error("failed to link shader program:\n{log}")]
    Link { log: String },
}

/// Fatal failures while setting up the window and the OpenGL context.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("failed to initialize SDL: {0}")]
    Sdl(String),
    #[error("failed to create window: {0}")]
    Window(String),
    #[error("failed to create OpenGL context: {0}")]
    Context(String),
    #[error("failed to load OpenGL functions: {0}")]
    Loader(String),
    #[error("failed to create GPU buffers: {0}")]
    Geometry(String),
}

/// Errors surfaced by the render driver.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error(transparent)]
    Init(#[from] InitError),
    #[error("invalid state transition from {from:?} to {to:?}")]
    InvalidTransition { from: DriverState, to: DriverState },
}
