//! Dispatcher behavior against a real world.

use rustberry_engine::world::World;
use rustberry_engine::world::position::{BlockFace, BlockPos, Vec3};
use rustberry_server::command::dispatch;
use rustberry_server::events::{BlockHit, ChatPost, EventStore};

fn world_with_player() -> (World, i32) {
    let world = World::new();
    let id = world.entities().spawn_player("steve", Vec3::new(0.5, 4.0, 0.5));
    (world, id)
}

fn run(world: &World, events: &EventStore, line: &str) -> Option<String> {
    dispatch(line, world, events).expect(line)
}

#[test]
fn set_block_then_get_block() {
    let world = World::new();
    let events = EventStore::new();
    assert_eq!(run(&world, &events, "world.setBlock(10,64,-3,1)"), None);
    assert_eq!(
        run(&world, &events, "world.getBlock(10,64,-3)"),
        Some("1".into())
    );
    // Float coordinates are truncated.
    assert_eq!(
        run(&world, &events, "world.getBlock(10.9,64.2,-3.0)"),
        Some("1".into())
    );
}

#[test]
fn get_block_defaults_to_air() {
    let world = World::new();
    let events = EventStore::new();
    assert_eq!(
        run(&world, &events, "world.getBlock(5,5,5)"),
        Some("0".into())
    );
}

#[test]
fn set_blocks_fills_an_inclusive_region_from_any_corners() {
    let world = World::new();
    let events = EventStore::new();
    // Corners given in "wrong" order on every axis.
    assert_eq!(run(&world, &events, "world.setBlocks(2,5,3,0,4,1,1)"), None);
    for x in 0..=2 {
        for y in 4..=5 {
            for z in 1..=3 {
                assert_eq!(
                    world.get_block(BlockPos::new(x, y, z)),
                    rustberry_server::block::STONE
                );
            }
        }
    }
    assert_eq!(world.block_count(), 3 * 2 * 3);
}

#[test]
fn get_blocks_is_x_outer_z_middle_y_inner() {
    let world = World::new();
    let events = EventStore::new();
    world.set_block(BlockPos::new(0, 0, 0), rustberry_server::block::STONE);
    world.set_block(BlockPos::new(1, 1, 1), rustberry_server::block::GRASS_BLOCK);

    let reply = run(&world, &events, "world.getBlocks(0,0,0,1,1,1)").unwrap();
    let ids: Vec<&str> = reply.split(',').collect();
    assert_eq!(ids.len(), 8);
    // Index = ((x * z-extent) + z) * y-extent + y.
    assert_eq!(ids[0], "1"); // (0,0,0)
    assert_eq!(ids[7], "2"); // (1,1,1)
    assert!(ids[1..7].iter().all(|id| *id == "0"));
}

#[test]
fn get_height_reports_highest_non_air() {
    let world = World::new();
    let events = EventStore::new();
    world.set_block(BlockPos::new(3, 0, 3), rustberry_server::block::BEDROCK);
    world.set_block(BlockPos::new(3, 17, 3), rustberry_server::block::STONE);
    assert_eq!(
        run(&world, &events, "world.getHeight(3,3)"),
        Some("17".into())
    );
    // An empty column reads 0.
    assert_eq!(
        run(&world, &events, "world.getHeight(8,8)"),
        Some("0".into())
    );
}

#[test]
fn player_ids_and_lookup_by_name() {
    let (world, steve) = world_with_player();
    let alex = world.entities().spawn_player("alex", Vec3::default());
    let events = EventStore::new();

    assert_eq!(
        run(&world, &events, "world.getPlayerIds()"),
        Some(format!("{steve},{alex}"))
    );
    assert_eq!(
        run(&world, &events, "world.getPlayerId(alex)"),
        Some(alex.to_string())
    );
    // Unknown names are logged server-side, nothing is sent.
    assert_eq!(run(&world, &events, "world.getPlayerId(nobody)"), None);
}

#[test]
fn player_namespace_targets_the_first_player() {
    let (world, steve) = world_with_player();
    world.entities().spawn_player("alex", Vec3::default());
    let events = EventStore::new();

    assert_eq!(run(&world, &events, "player.setPos(1.5,64.25,-2.5)"), None);
    assert_eq!(
        world.entities().get(steve).unwrap().pos,
        Vec3::new(1.5, 64.25, -2.5)
    );
    assert_eq!(
        run(&world, &events, "player.getPos()"),
        Some("1.5,64.25,-2.5".into())
    );
}

#[test]
fn player_commands_without_a_player_are_silent() {
    let world = World::new();
    let events = EventStore::new();
    assert_eq!(run(&world, &events, "player.getPos()"), None);
    assert_eq!(run(&world, &events, "player.setPos(0,0,0)"), None);
}

#[test]
fn tile_truncates_and_teleports_to_block_center() {
    let (world, steve) = world_with_player();
    let events = EventStore::new();

    assert_eq!(run(&world, &events, "player.setPos(1.9,64.7,-2.1)"), None);
    assert_eq!(
        run(&world, &events, "player.getTile()"),
        Some("1,64,-2".into())
    );

    assert_eq!(run(&world, &events, "player.setTile(10,20,30)"), None);
    assert_eq!(
        world.entities().get(steve).unwrap().pos,
        Vec3::new(10.5, 20.5, 30.5)
    );
}

#[test]
fn rotation_and_pitch_round_trip() {
    let (world, _) = world_with_player();
    let events = EventStore::new();

    assert_eq!(run(&world, &events, "player.setRotation(90)"), None);
    assert_eq!(run(&world, &events, "player.setPitch(-30)"), None);
    assert_eq!(
        run(&world, &events, "player.getRotation()"),
        Some("90.0".into())
    );
    assert_eq!(
        run(&world, &events, "player.getPitch()"),
        Some("-30.0".into())
    );
}

#[test]
fn direction_survives_a_set_get_cycle() {
    let (world, _) = world_with_player();
    let events = EventStore::new();

    assert_eq!(run(&world, &events, "player.setDirection(0,0,1)"), None);
    let reply = run(&world, &events, "player.getDirection()").unwrap();
    let parts: Vec<f64> = reply.split(',').map(|p| p.parse().unwrap()).collect();
    assert!(parts[0].abs() < 1e-6);
    assert!(parts[1].abs() < 1e-6);
    assert!((parts[2] - 1.0).abs() < 1e-6);

    // A non-axis direction comes back close to what was set.
    assert_eq!(run(&world, &events, "player.setDirection(1,-1,0.5)"), None);
    let reply = run(&world, &events, "player.getDirection()").unwrap();
    let parts: Vec<f64> = reply.split(',').map(|p| p.parse().unwrap()).collect();
    let len = (1.0f64 + 1.0 + 0.25).sqrt();
    assert!((parts[0] - 1.0 / len).abs() < 1e-6);
    assert!((parts[1] + 1.0 / len).abs() < 1e-6);
    assert!((parts[2] - 0.5 / len).abs() < 1e-6);
}

#[test]
fn entity_namespace_takes_a_leading_id() {
    let (world, steve) = world_with_player();
    let events = EventStore::new();

    assert_eq!(run(&world, &events, &format!("entity.setPos({steve},7,8,9)")), None);
    assert_eq!(
        run(&world, &events, &format!("entity.getPos({steve})")),
        Some("7.0,8.0,9.0".into())
    );
    assert_eq!(
        run(&world, &events, &format!("entity.getName({steve})")),
        Some("steve".into())
    );
    // Unknown entity ids are silent.
    assert_eq!(run(&world, &events, "entity.getPos(999)"), None);
}

#[test]
fn chat_post_reassembles_commas_and_broadcasts() {
    let (world, _) = world_with_player();
    let events = EventStore::new();
    assert_eq!(run(&world, &events, "chat.post(hello, world, again)"), None);
    assert_eq!(world.chat_history(), vec!["hello, world, again"]);
}

#[test]
fn actor_event_reads_are_destructive_and_disjoint() {
    let (world, steve) = world_with_player();
    let alex = world.entities().spawn_player("alex", Vec3::default());
    let events = EventStore::new();

    events.report_block_hit(BlockHit {
        actor: steve,
        pos: BlockPos::new(1, 2, 3),
        face: BlockFace::Up,
    });
    events.report_block_hit(BlockHit {
        actor: alex,
        pos: BlockPos::new(4, 5, 6),
        face: BlockFace::East,
    });

    assert_eq!(
        run(&world, &events, "player.events.block.hits()"),
        Some(format!("1,2,3,1,{steve}"))
    );
    // Steve's read did not consume Alex's event.
    assert_eq!(
        run(&world, &events, &format!("entity.events.block.hits({alex})")),
        Some(format!("4,5,6,5,{alex}"))
    );
    // Both queues are now empty.
    assert_eq!(run(&world, &events, "events.block.hits()"), Some("".into()));
}

#[test]
fn global_event_read_takes_everything_once() {
    let (world, steve) = world_with_player();
    let events = EventStore::new();
    events.report_chat_post(ChatPost {
        actor: steve,
        message: "hi there".into(),
    });
    events.report_chat_post(ChatPost {
        actor: steve,
        message: "again".into(),
    });

    assert_eq!(
        run(&world, &events, "events.chat.posts()"),
        Some(format!("{steve}, hi there|{steve}, again"))
    );
    assert_eq!(run(&world, &events, "events.chat.posts()"), Some("".into()));
}

#[test]
fn events_clear_empties_both_queues() {
    let (world, steve) = world_with_player();
    let events = EventStore::new();
    events.report_block_hit(BlockHit {
        actor: steve,
        pos: BlockPos::new(0, 0, 0),
        face: BlockFace::Down,
    });
    events.report_chat_post(ChatPost {
        actor: steve,
        message: "gone".into(),
    });

    assert_eq!(run(&world, &events, "events.clear()"), None);
    assert_eq!(run(&world, &events, "events.block.hits()"), Some("".into()));
    assert_eq!(run(&world, &events, "events.chat.posts()"), Some("".into()));
}

#[test]
fn malformed_lines_error_without_side_effects() {
    let world = World::new();
    let events = EventStore::new();
    assert!(dispatch("world.setBlock(1,2,3", &world, &events).is_err());
    assert!(dispatch("no parens at all", &world, &events).is_err());
    assert!(dispatch("world.setBlock(1,2,3,nope)", &world, &events).is_err());
    assert_eq!(world.block_count(), 0);
}

#[test]
fn unknown_commands_are_silent() {
    let world = World::new();
    let events = EventStore::new();
    assert_eq!(run(&world, &events, "world.saveCheckpoint()"), None);
    assert_eq!(run(&world, &events, "bogus.thing(1,2)"), None);
}
