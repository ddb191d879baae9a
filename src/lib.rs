//! Shifting Shapes (workspace facade crate).
//!
//! This package exposes `shifting_shapes::{core,adapter,term,input,types}` while the
//! implementation lives in dedicated crates under `crates/`.

pub use shifting_shapes_adapter as adapter;
pub use shifting_shapes_core as core;
pub use shifting_shapes_input as input;
pub use shifting_shapes_term as term;
pub use shifting_shapes_types as types;
