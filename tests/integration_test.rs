use matrix_bench::BenchConfig;
use playground_component::RouterConfig;
use playground_host::runtime::{Command, Event, Runtime};
use playground_host::world::World;
use tokio::sync::mpsc;

/// Answers runtime events against `world` until the tick finishes, recording
/// what happened.
async fn drive_tick(
    world: &mut World,
    event_rx: &mut mpsc::UnboundedReceiver<Event>,
    seen: &mut Vec<String>,
) {
    loop {
        match event_rx.recv().await {
            Some(Event::GetEntities { reply }) => {
                seen.push("get_entities".to_string());
                let _ = reply.send(world.serialize());
            }
            Some(Event::SpawnEntity { name, x, y, reply }) => {
                seen.push(format!("spawn:{}:{}:{}", name, x, y));
                let id = world.spawn(name, x, y);
                let _ = reply.send(id);
            }
            Some(Event::TickDone) => {
                seen.push("tick_done".to_string());
                break;
            }
            None => break,
        }
    }
}

fn tiny_suite() -> Vec<BenchConfig> {
    vec![BenchConfig {
        size: 4,
        iterations: 2,
    }]
}

#[tokio::test]
async fn spawn_flow_end_to_end() {
    let mut world = World::new();
    world.spawn("tree", 10.0, 20.0);

    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();

    let mut runtime = Runtime::new(cmd_rx, event_tx);
    runtime.add_component(
        "server",
        RouterConfig {
            peer: "client".to_string(),
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
    let handle = tokio::task::spawn_blocking(move || runtime.run());

    cmd_tx.send(Command::Tick(1)).unwrap();
    let mut seen = Vec::new();
    drive_tick(&mut world, &mut event_rx, &mut seen).await;

    // Client queries entities, server spawns the requested player at the
    // default coordinates, the client confirms the response by re-querying.
    assert_eq!(
        seen,
        vec![
            "get_entities",
            "spawn:player1:50:50",
            "get_entities",
            "tick_done"
        ]
    );
    assert!(world.serialize().contains("player1"));

    drop(cmd_tx);
    handle.await.unwrap();
}

#[tokio::test]
async fn benchmark_tick_completes_without_host_queries() {
    let mut world = World::new();

    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();

    let mut runtime = Runtime::new(cmd_rx, event_tx);
    runtime.add_component(
        "server",
        RouterConfig {
            peer: "client".to_string(),
            benchmark_tick: Some(1),
            bench_suite: tiny_suite(),
            ..RouterConfig::default()
        },
    );
    runtime.add_component(
        "client",
        RouterConfig {
            peer: "server".to_string(),
            bench_suite: tiny_suite(),
            ..RouterConfig::default()
        },
    );
    let handle = tokio::task::spawn_blocking(move || runtime.run());

    cmd_tx.send(Command::Tick(1)).unwrap();
    let mut seen = Vec::new();
    drive_tick(&mut world, &mut event_rx, &mut seen).await;

    // Both the local suite and the peer's requested run happen inside the
    // runtime; the host only sees the tick boundary.
    assert_eq!(seen, vec!["tick_done"]);

    drop(cmd_tx);
    handle.await.unwrap();
}

#[tokio::test]
async fn unregistered_rpc_target_is_skipped() {
    let mut world = World::new();

    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();

    let mut runtime = Runtime::new(cmd_rx, event_tx);
    runtime.add_component(
        "solo",
        RouterConfig {
            peer: "nobody".to_string(),
            benchmark_tick: Some(1),
            bench_suite: tiny_suite(),
            ..RouterConfig::default()
        },
    );
    let handle = tokio::task::spawn_blocking(move || runtime.run());

    let mut seen = Vec::new();
    cmd_tx.send(Command::Tick(1)).unwrap();
    drive_tick(&mut world, &mut event_rx, &mut seen).await;
    assert_eq!(seen, vec!["tick_done"]);

    // The dropped call must not wedge the runtime.
    seen.clear();
    cmd_tx.send(Command::Tick(2)).unwrap();
    drive_tick(&mut world, &mut event_rx, &mut seen).await;
    assert_eq!(seen, vec!["tick_done"]);

    drop(cmd_tx);
    handle.await.unwrap();
}
