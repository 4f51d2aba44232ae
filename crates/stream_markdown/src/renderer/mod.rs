//! Concrete [`Renderer`](crate::render::Renderer) implementations.

pub mod html;
pub mod plain_text;
pub mod trace;
