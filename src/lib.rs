//! In-process playground host.
//!
//! The host owns the game world and drives guest components: each tick it
//! broadcasts a `tick:<n>` event to every registered component, routes the
//! RPC calls they issue to each other, and answers their entity queries and
//! spawn requests. Components are plain `Router` instances from
//! `playground-component`; the host hands each one a handle implementing the
//! `HostApi` collaborator trait.

pub mod runtime;
pub mod world;
