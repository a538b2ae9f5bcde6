//! Action-routed gateway.
//!
//! - Registry: static action name → handler table
//! - Secrets: per-call credential lookup
//! - Upstream: the one outbound HTTP call per action
//! - Router: decode, dispatch, normalize

mod handler;
mod registry;
mod router;
mod secrets;
mod upstream;

pub use handler::*;
pub use registry::*;
pub use router::*;
pub use secrets::*;
pub use upstream::*;
