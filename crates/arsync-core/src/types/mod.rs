//! Core type definitions

mod intrinsics;
mod pose;
mod target;

pub use intrinsics::*;
pub use pose::*;
pub use target::*;
