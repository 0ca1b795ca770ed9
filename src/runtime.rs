//! Component runtime: tick broadcast and RPC routing between components.
//!
//! The runtime runs on a dedicated blocking thread. It receives `Command`s
//! from the main loop, calls synchronously into each registered router, and
//! reports back through `Event`s; queries that need an answer carry a oneshot
//! reply channel.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use playground_component::{HostApi, Router, RouterConfig};
use tokio::sync::{mpsc, oneshot};

/// Commands from the main loop to the runtime.
#[derive(Debug)]
pub enum Command {
    Tick(u64),
}

/// Events from the runtime back to the main loop.
#[derive(Debug)]
pub enum Event {
    GetEntities {
        reply: oneshot::Sender<String>,
    },
    SpawnEntity {
        name: String,
        x: f32,
        y: f32,
        reply: oneshot::Sender<u64>,
    },
    TickDone,
}

/// One queued component-to-component call awaiting dispatch.
#[derive(Debug)]
struct RpcEnvelope {
    id: u64,
    from: String,
    to: String,
    method: String,
    args: String,
}

struct RpcState {
    queue: VecDeque<RpcEnvelope>,
    next_id: u64,
}

/// Host functions handed to one component; routes every call back to the
/// runtime's shared state or the main loop.
pub struct HostHandle {
    component: String,
    event_tx: mpsc::UnboundedSender<Event>,
    rpc: Arc<Mutex<RpcState>>,
}

impl HostApi for HostHandle {
    fn log(&self, msg: &str) {
        tracing::info!("[{}] {}", self.component, msg);
    }

    fn get_entities(&self) -> String {
        let (tx, rx) = oneshot::channel();
        if self
            .event_tx
            .send(Event::GetEntities { reply: tx })
            .is_err()
        {
            return String::new();
        }
        rx.blocking_recv().unwrap_or_default()
    }

    fn spawn_entity(&self, name: &str, x: f32, y: f32) -> u64 {
        let (tx, rx) = oneshot::channel();
        let event = Event::SpawnEntity {
            name: name.to_string(),
            x,
            y,
            reply: tx,
        };
        if self.event_tx.send(event).is_err() {
            return 0;
        }
        rx.blocking_recv().unwrap_or_default()
    }

    fn rpc_call(&self, target: &str, method: &str, args: &str) -> u64 {
        let Ok(mut rpc) = self.rpc.lock() else {
            return 0;
        };
        let id = rpc.next_id;
        rpc.next_id += 1;

        tracing::info!(
            "[host] RPC {} -> {}: {}({})",
            self.component,
            target,
            method,
            args
        );
        rpc.queue.push_back(RpcEnvelope {
            id,
            from: self.component.clone(),
            to: target.to_string(),
            method: method.to_string(),
            args: args.to_string(),
        });
        id
    }
}

/// Registry of named routers plus the shared RPC queue.
pub struct Runtime {
    components: Vec<(String, Router<HostHandle>)>,
    rpc: Arc<Mutex<RpcState>>,
    cmd_rx: mpsc::UnboundedReceiver<Command>,
    event_tx: mpsc::UnboundedSender<Event>,
}

impl Runtime {
    pub fn new(cmd_rx: mpsc::UnboundedReceiver<Command>, event_tx: mpsc::UnboundedSender<Event>) -> Self {
        Self {
            components: Vec::new(),
            rpc: Arc::new(Mutex::new(RpcState {
                queue: VecDeque::new(),
                next_id: 1,
            })),
            cmd_rx,
            event_tx,
        }
    }

    /// Registers a component. Ticks are delivered in registration order.
    pub fn add_component(&mut self, name: &str, config: RouterConfig) {
        let handle = HostHandle {
            component: name.to_string(),
            event_tx: self.event_tx.clone(),
            rpc: Arc::clone(&self.rpc),
        };
        self.components
            .push((name.to_string(), Router::new(handle, config)));
        tracing::info!("Registered component: {}", name);
    }

    /// Processes commands until the main loop drops its sender.
    ///
    /// Blocking; intended to run under `tokio::task::spawn_blocking`.
    pub fn run(mut self) {
        while let Some(cmd) = self.cmd_rx.blocking_recv() {
            match cmd {
                Command::Tick(tick) => self.process_tick(tick),
            }
        }
        tracing::info!("Runtime shutdown");
    }

    fn process_tick(&mut self, tick: u64) {
        tracing::info!("Tick {}", tick);

        let input = format!("tick:{}", tick);
        for (_, router) in &mut self.components {
            router.process(&input);
        }

        self.process_rpc_queue();

        let _ = self.event_tx.send(Event::TickDone);
    }

    /// Drains the RPC queue one call at a time so calls enqueued while
    /// handling a request are delivered within the same tick.
    fn process_rpc_queue(&mut self) {
        loop {
            let envelope = {
                let Ok(mut rpc) = self.rpc.lock() else {
                    return;
                };
                rpc.queue.pop_front()
            };
            let Some(envelope) = envelope else {
                break;
            };

            let Some(target) = self.position(&envelope.to) else {
                tracing::warn!("RPC target '{}' not registered, dropping call", envelope.to);
                continue;
            };
            let result = self.components[target].1.on_rpc_request(
                &envelope.from,
                &envelope.method,
                &envelope.args,
            );
            tracing::info!(
                "[host] RPC {} <- {}: {}",
                envelope.from,
                envelope.to,
                result
            );

            let Some(caller) = self.position(&envelope.from) else {
                continue;
            };
            self.components[caller]
                .1
                .on_rpc_response(envelope.id, &result);
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.components.iter().position(|(n, _)| n == name)
    }
}
