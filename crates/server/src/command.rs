//! Line parser and command dispatcher.
//!
//! Wire lines look like `world.setBlock(10,64,-3,1)`: a dotted method name,
//! a parenthesized comma-separated argument list, no quoting or escaping.
//! Replies are plain values or comma/pipe-joined lists. There is no error
//! channel -- a malformed or failing line is logged server-side and the
//! client hears nothing, so handlers return `Ok(None)` for silence and
//! `Err` only for lines the caller should log.

use anyhow::{Context, Result, bail};
use tracing::{debug, warn};

use rustberry_engine::world::block::BlockState;
use rustberry_engine::world::position::{BlockPos, Vec3};

use crate::block;
use crate::events::EventStore;
use crate::host::{ActorId, HostWorld};

/// Handle one inbound line. `Ok(Some(text))` is a reply to queue for the
/// client; `Ok(None)` means the command was a pure side effect (or was
/// silently ignored); `Err` means the line was malformed or failed.
pub fn dispatch(line: &str, world: &dyn HostWorld, events: &EventStore) -> Result<Option<String>> {
    let (name, args) = parse(line)?;

    if let Some(op) = name.strip_prefix("world.") {
        world_command(op, &args, world)
    } else if let Some(op) = name.strip_prefix("player.") {
        let Some(actor) = world.first_player() else {
            warn!(command = name, "no player connected");
            return Ok(None);
        };
        actor_command(op, &args, actor, world, events, false)
    } else if let Some(op) = name.strip_prefix("entity.") {
        let id = int_arg(&args, 0)?;
        if !world.has_entity(id) {
            warn!(command = name, id, "entity not found");
            return Ok(None);
        }
        actor_command(op, &args[1..], id, world, events, true)
    } else if name == "chat.post" {
        // The argument list is the message, split on the commas it happened
        // to contain. Patch it back together.
        world.broadcast_chat(&args.join(","));
        Ok(None)
    } else if let Some(op) = name.strip_prefix("events.") {
        global_events(op, events)
    } else {
        debug!(command = name, "unknown command ignored");
        Ok(None)
    }
}

/// Split `name(a,b,c)` into the name and raw argument slices. An empty
/// argument list parses as zero arguments, not one empty argument.
fn parse(line: &str) -> Result<(&str, Vec<&str>)> {
    let open = line.find('(').context("missing '(' in command")?;
    let body = line[open + 1..]
        .strip_suffix(')')
        .context("missing ')' at end of command")?;
    let name = &line[..open];
    if name.is_empty() {
        bail!("empty command name");
    }
    let args = if body.is_empty() {
        Vec::new()
    } else {
        body.split(',').collect()
    };
    Ok((name, args))
}

// ── world.* ─────────────────────────────────────────────────────────────────

fn world_command(op: &str, args: &[&str], world: &dyn HostWorld) -> Result<Option<String>> {
    match op {
        "setBlock" => {
            let pos = block_pos(args, 0)?;
            let id = int_arg(args, 3)?;
            let data = opt_int_arg(args, 4)?;
            world.set_block(pos, block::to_state(id, data));
            Ok(None)
        }
        "setBlocks" => {
            let a = block_pos(args, 0)?;
            let b = block_pos(args, 3)?;
            let id = int_arg(args, 6)?;
            let data = opt_int_arg(args, 7)?;
            let state = block::to_state(id, data);
            for_each_in_region(a, b, |pos| world.set_block(pos, state));
            Ok(None)
        }
        "getBlock" => {
            let pos = block_pos(args, 0)?;
            Ok(Some(block::to_api_id(world.get_block(pos)).to_string()))
        }
        "getBlocks" => {
            let a = block_pos(args, 0)?;
            let b = block_pos(args, 3)?;
            let mut ids = Vec::new();
            for_each_in_region(a, b, |pos| {
                ids.push(block::to_api_id(world.get_block(pos)).to_string());
            });
            Ok(Some(ids.join(",")))
        }
        "getHeight" => {
            let x = int_arg(args, 0)?;
            let z = int_arg(args, 1)?;
            let mut highest = 0;
            for y in 0..=255 {
                if world.get_block(BlockPos::new(x, y, z)) != BlockState::AIR {
                    highest = y;
                }
            }
            Ok(Some(highest.to_string()))
        }
        "getPlayerIds" => {
            let ids: Vec<String> = world.player_ids().iter().map(i32::to_string).collect();
            Ok(Some(ids.join(",")))
        }
        "getPlayerId" => {
            let name = args.first().context("missing player name")?;
            match world.resolve_player(name) {
                Some(id) => Ok(Some(id.to_string())),
                None => {
                    warn!(player = %name, "player not found");
                    Ok(None)
                }
            }
        }
        _ => {
            debug!(command = op, "unknown world command ignored");
            Ok(None)
        }
    }
}

// ── player.* / entity.* ─────────────────────────────────────────────────────

/// The `player.*` and `entity.*` namespaces share their operation set; only
/// how the actor was chosen differs (entity ids also get `getName`).
fn actor_command(
    op: &str,
    args: &[&str],
    actor: ActorId,
    world: &dyn HostWorld,
    events: &EventStore,
    is_entity: bool,
) -> Result<Option<String>> {
    match op {
        "getPos" => Ok(world.position(actor).map(serialize_vec3)),
        "setPos" => {
            world.set_position(actor, vec3(args, 0)?);
            Ok(None)
        }
        "getTile" => Ok(world.position(actor).map(|pos| {
            let tile = pos.block_pos();
            format!("{},{},{}", tile.x, tile.y, tile.z)
        })),
        "setTile" => {
            world.set_position(actor, block_pos(args, 0)?.center());
            Ok(None)
        }
        "getDirection" => Ok(world
            .rotation(actor)
            .map(|(yaw, pitch)| serialize_vec3(angles_to_direction(yaw, pitch)))),
        "setDirection" => {
            let (yaw, pitch) = direction_to_angles(vec3(args, 0)?);
            world.set_rotation(actor, yaw, pitch);
            Ok(None)
        }
        "getRotation" => Ok(world.rotation(actor).map(|(yaw, _)| fmt_angle(yaw))),
        "setRotation" => {
            let yaw = float_arg(args, 0)? as f32;
            if let Some((_, pitch)) = world.rotation(actor) {
                world.set_rotation(actor, yaw, pitch);
            }
            Ok(None)
        }
        "getPitch" => Ok(world.rotation(actor).map(|(_, pitch)| fmt_angle(pitch))),
        "setPitch" => {
            let pitch = float_arg(args, 0)? as f32;
            if let Some((yaw, _)) = world.rotation(actor) {
                world.set_rotation(actor, yaw, pitch);
            }
            Ok(None)
        }
        "getName" if is_entity => Ok(world.entity_name(actor)),
        "events.block.hits" => {
            let hits = events.take_block_hits_for(actor);
            Ok(Some(join_serialized(hits.iter().map(|h| h.serialize()))))
        }
        "events.chat.posts" => {
            let posts = events.take_chat_posts_for(actor);
            Ok(Some(join_serialized(posts.iter().map(|p| p.serialize()))))
        }
        "events.clear" => {
            events.clear_for(actor);
            Ok(None)
        }
        _ => {
            debug!(command = op, "unknown actor command ignored");
            Ok(None)
        }
    }
}

// ── events.* ────────────────────────────────────────────────────────────────

fn global_events(op: &str, events: &EventStore) -> Result<Option<String>> {
    match op {
        "block.hits" => {
            let hits = events.take_block_hits();
            Ok(Some(join_serialized(hits.iter().map(|h| h.serialize()))))
        }
        "chat.posts" => {
            let posts = events.take_chat_posts();
            Ok(Some(join_serialized(posts.iter().map(|p| p.serialize()))))
        }
        "clear" => {
            events.clear();
            Ok(None)
        }
        _ => {
            debug!(command = op, "unknown events command ignored");
            Ok(None)
        }
    }
}

// ── Argument helpers ────────────────────────────────────────────────────────

fn int_arg(args: &[&str], idx: usize) -> Result<i32> {
    let raw = args
        .get(idx)
        .with_context(|| format!("missing argument {idx}"))?;
    raw.parse()
        .with_context(|| format!("bad integer argument {raw:?}"))
}

fn opt_int_arg(args: &[&str], idx: usize) -> Result<i32> {
    match args.get(idx) {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("bad integer argument {raw:?}")),
        None => Ok(0),
    }
}

fn float_arg(args: &[&str], idx: usize) -> Result<f64> {
    let raw = args
        .get(idx)
        .with_context(|| format!("missing argument {idx}"))?;
    raw.parse()
        .with_context(|| format!("bad float argument {raw:?}"))
}

/// Block coordinates are accepted in float form and truncated toward zero.
fn coord_arg(args: &[&str], idx: usize) -> Result<i32> {
    Ok(float_arg(args, idx)? as i32)
}

fn block_pos(args: &[&str], at: usize) -> Result<BlockPos> {
    Ok(BlockPos::new(
        coord_arg(args, at)?,
        coord_arg(args, at + 1)?,
        coord_arg(args, at + 2)?,
    ))
}

fn vec3(args: &[&str], at: usize) -> Result<Vec3> {
    Ok(Vec3::new(
        float_arg(args, at)?,
        float_arg(args, at + 1)?,
        float_arg(args, at + 2)?,
    ))
}

/// Visit every cell of the inclusive box spanned by two corners, x-outer,
/// z-middle, y-inner -- the order region replies are laid out in.
fn for_each_in_region(a: BlockPos, b: BlockPos, mut f: impl FnMut(BlockPos)) {
    for x in a.x.min(b.x)..=a.x.max(b.x) {
        for z in a.z.min(b.z)..=a.z.max(b.z) {
            for y in a.y.min(b.y)..=a.y.max(b.y) {
                f(BlockPos::new(x, y, z));
            }
        }
    }
}

fn serialize_vec3(v: Vec3) -> String {
    format!("{},{},{}", fmt_float(v.x), fmt_float(v.y), fmt_float(v.z))
}

/// Floats on the wire always carry a decimal point: y = 4.0 serializes as
/// `4.0`, never `4`.
fn fmt_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

fn fmt_angle(value: f32) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

fn join_serialized(items: impl Iterator<Item = String>) -> String {
    items.collect::<Vec<_>>().join("|")
}

// ── Direction math ──────────────────────────────────────────────────────────
// Standard spherical look-vector conversion: yaw 0 faces +z, pitch is
// positive looking down. The two functions are exact inverses for unit
// vectors, so get/set direction round-trips.

fn angles_to_direction(yaw: f32, pitch: f32) -> Vec3 {
    let yaw = f64::from(yaw).to_radians();
    let pitch = f64::from(pitch).to_radians();
    Vec3::new(
        -pitch.cos() * yaw.sin(),
        -pitch.sin(),
        pitch.cos() * yaw.cos(),
    )
    .normalized()
}

fn direction_to_angles(dir: Vec3) -> (f32, f32) {
    let dir = dir.normalized();
    let pitch = (-dir.y).asin().to_degrees();
    let yaw = (-dir.x).atan2(dir.z).to_degrees();
    (yaw as f32, pitch as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_splits_name_and_args() {
        let (name, args) = parse("world.setBlock(1,2,3,4)").unwrap();
        assert_eq!(name, "world.setBlock");
        assert_eq!(args, vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn parse_empty_argument_list_is_zero_args() {
        let (name, args) = parse("world.getPlayerIds()").unwrap();
        assert_eq!(name, "world.getPlayerIds");
        assert!(args.is_empty());
    }

    #[test]
    fn parse_keeps_embedded_whitespace() {
        let (_, args) = parse("chat.post(hello world, again)").unwrap();
        assert_eq!(args, vec!["hello world", " again"]);
    }

    #[test]
    fn parse_rejects_missing_parens() {
        assert!(parse("world.getBlock").is_err());
        assert!(parse("world.getBlock(1,2,3").is_err());
        assert!(parse("(1,2,3)").is_err());
    }

    #[test]
    fn coords_truncate_toward_zero() {
        let pos = block_pos(&["1.9", "-1.9", "0.2"], 0).unwrap();
        assert_eq!(pos, BlockPos::new(1, -1, 0));
    }

    #[test]
    fn wire_floats_always_carry_a_decimal_point() {
        assert_eq!(serialize_vec3(Vec3::new(0.5, 4.0, -2.0)), "0.5,4.0,-2.0");
        assert_eq!(fmt_float(64.25), "64.25");
        assert_eq!(fmt_angle(90.0), "90.0");
        assert_eq!(fmt_angle(-30.5), "-30.5");
    }

    #[test]
    fn direction_round_trips_through_angles() {
        for (yaw, pitch) in [
            (0.0_f32, 0.0_f32),
            (90.0, 0.0),
            (-90.0, 45.0),
            (135.0, -60.0),
            (30.0, 89.0),
        ] {
            let dir = angles_to_direction(yaw, pitch);
            let (yaw2, pitch2) = direction_to_angles(dir);
            let wrapped = |a: f32| a.rem_euclid(360.0);
            assert!((wrapped(yaw) - wrapped(yaw2)).abs() < 1e-3, "yaw {yaw}");
            assert!((pitch - pitch2).abs() < 1e-3, "pitch {pitch}");
        }
    }

    #[test]
    fn direction_axes_match_convention() {
        // Yaw 0, pitch 0 looks along +z.
        let dir = angles_to_direction(0.0, 0.0);
        assert!((dir.z - 1.0).abs() < 1e-9);
        // Pitch 90 looks straight down.
        let dir = angles_to_direction(0.0, 90.0);
        assert!((dir.y + 1.0).abs() < 1e-9);
    }
}
