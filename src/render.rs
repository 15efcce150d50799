//! File rendering, output sinks and decoration

pub mod decorate;
pub mod renderer;
pub mod sink;

pub use decorate::Decorator;
pub use renderer::{RenderError, RenderReport, Renderer};
pub use sink::{Sink, SinkError};
