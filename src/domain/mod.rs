//! Domain types for the action gateway.

mod envelope;
mod request;

pub use envelope::*;
pub use request::*;
