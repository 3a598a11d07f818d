//! Query Handlers 实现

mod access_gate;

pub use access_gate::*;
