//! Command router: tick handling and RPC dispatch for one component.

use matrix_bench::BenchConfig;

use crate::HostApi;

const DEFAULT_PLAYER_NAME: &str = "player";
const SPAWN_X: f32 = 50.0;
const SPAWN_Y: f32 = 50.0;

/// Per-component behavior knobs.
///
/// One `Router` type covers every guest role; the config decides which tick
/// (if any) triggers the benchmark suite and which tick requests a player
/// spawn from the peer.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Peer component targeted by outbound calls.
    pub peer: String,
    /// Tick on which this component runs the benchmark suite locally and
    /// asks `peer` to run its own.
    pub benchmark_tick: Option<u64>,
    /// Tick on which this component asks `peer` to spawn a player entity.
    pub spawn_tick: Option<u64>,
    /// Configs run (in order) whenever the benchmark suite is triggered.
    pub bench_suite: Vec<BenchConfig>,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            peer: String::new(),
            benchmark_tick: None,
            spawn_tick: None,
            bench_suite: vec![
                BenchConfig {
                    size: 64,
                    iterations: 100,
                },
                BenchConfig {
                    size: 128,
                    iterations: 50,
                },
                BenchConfig {
                    size: 256,
                    iterations: 10,
                },
            ],
        }
    }
}

/// Dispatches tick events and inbound RPC calls for one component.
///
/// Stateless across calls except for the correlation id of an in-flight
/// spawn request, kept so the matching `on_rpc_response` can confirm it.
pub struct Router<H: HostApi> {
    host: H,
    config: RouterConfig,
    pending_spawn: Option<u64>,
}

impl<H: HostApi> Router<H> {
    pub fn new(host: H, config: RouterConfig) -> Self {
        Self {
            host,
            config,
            pending_spawn: None,
        }
    }

    /// Handles one tick-style event from the host.
    ///
    /// Inputs that are not `tick:<n>`, or ticks with no configured behavior,
    /// are logged and otherwise ignored.
    pub fn process(&mut self, input: &str) {
        self.host.log(&format!("Processing: {}", input));

        let Some(tick) = tick_number(input) else {
            return;
        };

        if self.config.benchmark_tick == Some(tick) {
            self.host.log("Running local benchmark...");
            self.run_suite();
            self.host
                .log(&format!("Asking {} to run benchmark...", self.config.peer));
            self.host
                .rpc_call(&self.config.peer, "run_benchmark", "");
        }

        if self.config.spawn_tick == Some(tick) {
            let entities = self.host.get_entities();
            self.host.log(&format!("Current entities: {}", entities));

            let req_id = self
                .host
                .rpc_call(&self.config.peer, "ready_to_spawn", "player1");
            self.host
                .log(&format!("Requested spawn, req_id={}", req_id));
            self.pending_spawn = Some(req_id);
        }
    }

    /// Handles one inbound RPC call and returns its string result.
    ///
    /// Method matching is exact and case-sensitive; unrecognized methods
    /// produce `error:unknown_method` rather than an error path.
    pub fn on_rpc_request(&self, caller: &str, method: &str, args: &str) -> String {
        self.host
            .log(&format!("RPC from {}: {}({})", caller, method, args));

        match method {
            "ready_to_spawn" => {
                let name = if args.is_empty() {
                    DEFAULT_PLAYER_NAME
                } else {
                    args
                };
                let id = self.host.spawn_entity(name, SPAWN_X, SPAWN_Y);
                self.host
                    .log(&format!("Spawned player '{}' with id={}", name, id));
                format!("ok:{}", id)
            }
            "ping" => format!("pong:{}", args),
            "run_benchmark" => {
                self.host.log("Running benchmark on request...");
                self.run_suite();
                "ok".into()
            }
            _ => "error:unknown_method".into(),
        }
    }

    /// Handles the delayed answer to an outbound call issued earlier.
    ///
    /// Purely observational, except that a response matching the pending
    /// spawn request re-queries the entity list to confirm the spawn.
    pub fn on_rpc_response(&mut self, request_id: u64, payload: &str) {
        self.host
            .log(&format!("RPC response {}: {}", request_id, payload));

        if self.pending_spawn == Some(request_id) {
            self.pending_spawn = None;
            self.host.log("Spawn confirmed! Checking entities...");
            let entities = self.host.get_entities();
            self.host
                .log(&format!("Entities after spawn: {}", entities));
        }
    }

    /// Runs one benchmark for the given dimensions and returns the elapsed
    /// time in nanoseconds. This is the direct benchmark entry point exposed
    /// to the host, bypassing the RPC surface.
    pub fn matrix_bench(&self, size: u32, iterations: u32) -> Result<u64, matrix_bench::Error> {
        let result = matrix_bench::run(&BenchConfig { size, iterations })?;
        self.host
            .log(&format!("Benchmark checksum: {}", result.checksum));
        Ok(result.elapsed_nanos())
    }

    fn run_suite(&self) {
        for config in &self.config.bench_suite {
            match matrix_bench::run(config) {
                Ok(result) => self.host.log(&format!(
                    "  {}x{} x{}: {:.1}ms, {:.2} GFLOPS (checksum {})",
                    config.size,
                    config.size,
                    config.iterations,
                    result.elapsed_millis(),
                    result.gflops(),
                    result.checksum,
                )),
                Err(e) => self.host.log(&format!("  benchmark failed: {}", e)),
            }
        }
    }
}

fn tick_number(input: &str) -> Option<u64> {
    input.strip_prefix("tick:")?.parse().ok()
}
