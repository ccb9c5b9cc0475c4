//! Engine module - per-interaction filter and aggregate computation

mod compute;
mod selection;

pub use compute::{compute, BarEntry, EngineError, ViewResult};
pub use selection::Selection;
