//! Draws a single colored quad with OpenGL.
//!
//! The shader pair is read from one annotated `.shader` file, split by
//! [`shadersource::ShaderProgramSource`], compiled and linked by [`abs::ShaderProgram`]
//! and drawn every frame by [`driver::Driver`].

pub mod abs;
pub mod config;
pub mod driver;
pub mod error;
pub mod logging;
pub mod quad;
pub mod shadersource;
