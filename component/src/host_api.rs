//! Collaborator trait for everything a component asks of its host.

/// Host functions available to a guest component.
///
/// Components never touch host state directly; all effects go through this
/// trait so a router can run against the real host runtime or a fake in
/// tests. Every call is synchronous from the component's point of view.
/// `rpc_call` is fire-and-forget: it only enqueues the call and returns a
/// correlation id, and the peer's answer (if any) arrives later through
/// `Router::on_rpc_response`.
pub trait HostApi {
    /// Writes one line to the host's log sink. Never fails observably.
    fn log(&self, msg: &str);

    /// Returns the host's current entity list in its serialized string form.
    fn get_entities(&self) -> String;

    /// Asks the host to spawn an entity, returning the assigned id.
    fn spawn_entity(&self, name: &str, x: f32, y: f32) -> u64;

    /// Enqueues an outbound RPC to another component and returns the
    /// correlation id for the eventual response.
    fn rpc_call(&self, target: &str, method: &str, args: &str) -> u64;
}
