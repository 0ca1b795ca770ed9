//! Guest component logic for the playground host.
//!
//! A component receives tick events and named RPC calls from its host and
//! talks back through the [`HostApi`] collaborator trait (logging, entity
//! spawning, outbound RPC). The [`Router`] implements the full guest surface
//! once, parameterized by [`RouterConfig`], instead of duplicating the same
//! benchmark/dispatch logic per guest entry point.
//!
//! # Example
//!
//! ```ignore
//! use playground_component::{Router, RouterConfig};
//!
//! let mut router = Router::new(host_handle, RouterConfig {
//!     peer: "client".into(),
//!     benchmark_tick: Some(4),
//!     ..RouterConfig::default()
//! });
//! router.process("tick:4");
//! assert_eq!(router.on_rpc_request("client", "ping", "hi"), "pong:hi");
//! ```

mod host_api;
mod router;

pub use host_api::HostApi;
pub use router::{Router, RouterConfig};
