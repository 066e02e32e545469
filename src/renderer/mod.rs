//! Rendering module
//!
//! `board` turns game state into a triangle list; `pipeline` draws it with WebGPU.

pub mod board;
pub mod font;
pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use board::{RenderOptions, Viewport, render};
pub use pipeline::RenderState;
pub use vertex::Vertex;
