use std::env;
use std::time::Duration;

use playground_component::RouterConfig;
use playground_host::runtime::{Command, Event, Runtime};
use playground_host::world::World;
use rand::Rng;
use tokio::sync::mpsc;

const TICK_RATE: Duration = Duration::from_secs(1);
const TOTAL_TICKS: u64 = 5;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();
    let mode = args.get(1).cloned().unwrap_or_else(|| "run".to_string());

    match mode.as_str() {
        "run" => run_game_loop().await?,
        "bench" => {
            let size: u32 = args.get(2).unwrap_or(&"256".to_string()).parse()?;
            let iterations: u32 = args.get(3).unwrap_or(&"10".to_string()).parse()?;

            let result = matrix_bench::run(&matrix_bench::BenchConfig { size, iterations })?;
            println!(
                "{}x{} x{}: {:.1}ms, {:.2} GFLOPS (checksum {})",
                size,
                size,
                iterations,
                result.elapsed_millis(),
                result.gflops(),
                result.checksum
            );
        }
        _ => {
            eprintln!("Unknown mode: {}", mode);
            eprintln!("Usage: {} [mode]", args[0]);
            eprintln!("Modes:");
            eprintln!("  run                        - Run the tick loop (default)");
            eprintln!("  bench [size] [iterations]  - Run one benchmark directly");
            std::process::exit(1);
        }
    }

    Ok(())
}

async fn run_game_loop() -> Result<(), Box<dyn std::error::Error>> {
    let mut world = World::new();
    world.spawn("tree", 10.0, 20.0);
    world.spawn("rock", 15.0, 25.0);
    let npc_id = world.spawn("npc_merchant", 100.0, 100.0);

    tracing::info!("Initial entities: {}", world.serialize());

    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();

    let mut runtime = Runtime::new(cmd_rx, event_tx);
    runtime.add_component(
        "server",
        RouterConfig {
            peer: "client".to_string(),
            benchmark_tick: Some(4),
            ..RouterConfig::default()
        },
    );
    runtime.add_component(
        "client",
        RouterConfig {
            peer: "server".to_string(),
            spawn_tick: Some(1),
            ..RouterConfig::default()
        },
    );
    let runtime_handle = tokio::task::spawn_blocking(move || runtime.run());

    for tick in 1..=TOTAL_TICKS {
        let start = tokio::time::Instant::now();

        // Wander the NPC each tick.
        if let Some(npc) = world.get_mut(npc_id) {
            let mut rng = rand::thread_rng();
            npc.x = rng.gen_range(0.0..200.0);
            npc.y = rng.gen_range(0.0..200.0);
            tracing::info!("Moved npc_merchant to ({:.1}, {:.1})", npc.x, npc.y);
        }

        cmd_tx.send(Command::Tick(tick))?;

        // Answer component queries until the runtime finishes the tick.
        loop {
            match event_rx.recv().await {
                Some(Event::GetEntities { reply }) => {
                    let _ = reply.send(world.serialize());
                }
                Some(Event::SpawnEntity { name, x, y, reply }) => {
                    let id = world.spawn(name.clone(), x, y);
                    tracing::info!("Spawned '{}' with id={}", name, id);
                    let _ = reply.send(id);
                }
                Some(Event::TickDone) | None => break,
            }
        }

        let elapsed = start.elapsed();
        if elapsed < TICK_RATE {
            tokio::time::sleep(TICK_RATE - elapsed).await;
        }
    }

    drop(cmd_tx);
    runtime_handle.await?;

    tracing::info!("Final entities: {}", world.serialize());
    Ok(())
}
