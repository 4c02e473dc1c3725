use std::sync::Arc;
use std::time::Duration;

use rustberry_engine::world::World;
use rustberry_engine::world::position::{BlockPos, Vec3};
use rustberry_server::block;
use rustberry_server::events::EventStore;
use rustberry_server::host::HostWorld;
use rustberry_server::net::listener::Listener;
use rustberry_server::settings::{DEFAULT_MAX_COMMANDS_PER_TICK, Settings};
use rustberry_server::tick::{self, SessionSet};

/// Classic API port.
const DEFAULT_BIND: &str = "0.0.0.0:4711";

#[tokio::main]
async fn main() {
    let bind_addr = std::env::args()
        .skip_while(|a| a != "--bind")
        .nth(1)
        .unwrap_or_else(|| DEFAULT_BIND.into());
    let tick_ms: u64 = std::env::args()
        .skip_while(|a| a != "--tick-ms")
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(50);
    let max_commands: usize = std::env::args()
        .skip_while(|a| a != "--max-commands-per-tick")
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_MAX_COMMANDS_PER_TICK);

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".parse().unwrap()),
        )
        .init();

    tracing::info!("Rustberry -- Minecraft Pi Edition API server");

    // ── World setup ──────────────────────────────────────────────────────
    let world = Arc::new(World::new());
    tracing::info!("Generating flat world...");
    generate_flat_world(&world, 64);
    tracing::info!("World ready: {} blocks", world.block_count());

    let spawn = Vec3::new(0.5, 4.0, 0.5);
    let player = world.entities().spawn_player("steve", spawn);
    tracing::info!(id = player, "spawned demo player");

    let events = Arc::new(EventStore::new());
    let settings = Arc::new(Settings::new(max_commands));
    let sessions = Arc::new(SessionSet::new());

    // ── Listener + tick loop with graceful shutdown ──────────────────────
    let listener = match Listener::bind(&bind_addr) {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {:#}", bind_addr, e);
            return;
        }
    };

    let host: Arc<dyn HostWorld> = world;
    tokio::spawn(tick::run(
        Arc::clone(&sessions),
        Arc::clone(&host),
        Arc::clone(&events),
        Arc::clone(&settings),
        Duration::from_millis(tick_ms),
    ));

    tokio::select! {
        _ = listener.run(Arc::clone(&sessions)) => {}
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Ctrl+C received, shutting down...");
        }
    }

    sessions.close_all().await;
}

/// Flat demo terrain: bedrock at y=0, stone y=1-2, grass at y=3.
fn generate_flat_world(world: &World, radius: i32) {
    for x in -radius..radius {
        for z in -radius..radius {
            world.set_block(BlockPos::new(x, 0, z), block::BEDROCK);
            for y in 1..=2 {
                world.set_block(BlockPos::new(x, y, z), block::STONE);
            }
            world.set_block(BlockPos::new(x, 3, z), block::GRASS_BLOCK);
        }
    }
}
