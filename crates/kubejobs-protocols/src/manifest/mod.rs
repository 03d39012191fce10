//! Manifest builder.
//!
//! Pure functions that turn a request plus site defaults into a complete
//! `batch/v1` Job. No I/O happens here.

mod labels;
mod naming;
mod resources;
mod scaffold;
mod syntax;

pub use labels::*;
pub use naming::*;
pub use resources::*;
pub use scaffold::*;
pub use syntax::*;
