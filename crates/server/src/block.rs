//! Block-id codec between the wire API and engine block states.
//!
//! The wire speaks the classic `(id, data)` pairs; the engine stores opaque
//! `BlockState` values. One table drives both directions: each row is
//! `(api_id, api_data, state)`, and the two lookup maps are derived from it
//! at first use. When several rows share a state, the first row wins for
//! encoding, so `world.getBlock` reports the canonical id of an ambiguous
//! state (water placed as 8 or 9 reads back as 8).

use std::collections::HashMap;
use std::sync::LazyLock;

use rustberry_engine::world::block::BlockState;

// ── States ──────────────────────────────────────────────────────────────────
// Synthetic state numbering, one constant per distinct block the API can
// express. Orientation variants (stairs, torches, chests, furnaces, ladders)
// are distinct states so a placed facing survives get/set, but they all
// encode back to the base id.

pub const AIR: BlockState = BlockState::AIR;
pub const STONE: BlockState = BlockState(1);
pub const GRASS_BLOCK: BlockState = BlockState(2);
pub const DIRT: BlockState = BlockState(3);
pub const COBBLESTONE: BlockState = BlockState(4);
pub const OAK_PLANKS: BlockState = BlockState(5);
pub const SPRUCE_PLANKS: BlockState = BlockState(6);
pub const BIRCH_PLANKS: BlockState = BlockState(7);
pub const OAK_SAPLING: BlockState = BlockState(8);
pub const SPRUCE_SAPLING: BlockState = BlockState(9);
pub const BIRCH_SAPLING: BlockState = BlockState(10);
pub const BEDROCK: BlockState = BlockState(11);
pub const WATER: BlockState = BlockState(12);
pub const LAVA: BlockState = BlockState(13);
pub const SAND: BlockState = BlockState(14);
pub const GRAVEL: BlockState = BlockState(15);
pub const GOLD_ORE: BlockState = BlockState(16);
pub const IRON_ORE: BlockState = BlockState(17);
pub const COAL_ORE: BlockState = BlockState(18);
pub const OAK_WOOD: BlockState = BlockState(19);
pub const OAK_LEAVES: BlockState = BlockState(20);
pub const SPRUCE_LEAVES: BlockState = BlockState(21);
pub const BIRCH_LEAVES: BlockState = BlockState(22);
pub const GLASS: BlockState = BlockState(23);
pub const LAPIS_ORE: BlockState = BlockState(24);
pub const LAPIS_BLOCK: BlockState = BlockState(25);
pub const SANDSTONE: BlockState = BlockState(26);
pub const CHISELED_SANDSTONE: BlockState = BlockState(27);
pub const SMOOTH_SANDSTONE: BlockState = BlockState(28);
pub const RED_BED: BlockState = BlockState(29);
pub const COBWEB: BlockState = BlockState(30);
pub const DEAD_BUSH: BlockState = BlockState(31);
pub const TALL_GRASS: BlockState = BlockState(32);
pub const FERN: BlockState = BlockState(33);
pub const WHITE_WOOL: BlockState = BlockState(34);
pub const ORANGE_WOOL: BlockState = BlockState(35);
pub const MAGENTA_WOOL: BlockState = BlockState(36);
pub const LIGHT_BLUE_WOOL: BlockState = BlockState(37);
pub const YELLOW_WOOL: BlockState = BlockState(38);
pub const LIME_WOOL: BlockState = BlockState(39);
pub const PINK_WOOL: BlockState = BlockState(40);
pub const GRAY_WOOL: BlockState = BlockState(41);
pub const LIGHT_GRAY_WOOL: BlockState = BlockState(42);
pub const CYAN_WOOL: BlockState = BlockState(43);
pub const PURPLE_WOOL: BlockState = BlockState(44);
pub const BLUE_WOOL: BlockState = BlockState(45);
pub const BROWN_WOOL: BlockState = BlockState(46);
pub const GREEN_WOOL: BlockState = BlockState(47);
pub const RED_WOOL: BlockState = BlockState(48);
pub const BLACK_WOOL: BlockState = BlockState(49);
pub const DANDELION: BlockState = BlockState(50);
pub const CORNFLOWER: BlockState = BlockState(51);
pub const BROWN_MUSHROOM: BlockState = BlockState(52);
pub const RED_MUSHROOM: BlockState = BlockState(53);
pub const GOLD_BLOCK: BlockState = BlockState(54);
pub const IRON_BLOCK: BlockState = BlockState(55);
pub const STONE_SLAB_DOUBLE: BlockState = BlockState(56);
pub const SANDSTONE_SLAB_DOUBLE: BlockState = BlockState(57);
pub const OAK_SLAB_DOUBLE: BlockState = BlockState(58);
pub const COBBLESTONE_SLAB_DOUBLE: BlockState = BlockState(59);
pub const BRICK_SLAB_DOUBLE: BlockState = BlockState(60);
pub const STONE_BRICK_SLAB_DOUBLE: BlockState = BlockState(61);
pub const STONE_SLAB: BlockState = BlockState(62);
pub const SANDSTONE_SLAB: BlockState = BlockState(63);
pub const OAK_SLAB: BlockState = BlockState(64);
pub const COBBLESTONE_SLAB: BlockState = BlockState(65);
pub const BRICK_SLAB: BlockState = BlockState(66);
pub const STONE_BRICK_SLAB: BlockState = BlockState(67);
pub const BRICK_WALL: BlockState = BlockState(68);
pub const TNT: BlockState = BlockState(69);
pub const BOOKSHELF: BlockState = BlockState(70);
pub const MOSSY_COBBLESTONE: BlockState = BlockState(71);
pub const OBSIDIAN: BlockState = BlockState(72);
pub const TORCH: BlockState = BlockState(73);
pub const WALL_TORCH_EAST: BlockState = BlockState(74);
pub const WALL_TORCH_WEST: BlockState = BlockState(75);
pub const WALL_TORCH_SOUTH: BlockState = BlockState(76);
pub const WALL_TORCH_NORTH: BlockState = BlockState(77);
pub const FIRE: BlockState = BlockState(78);
pub const OAK_STAIRS_EAST: BlockState = BlockState(79);
pub const OAK_STAIRS_WEST: BlockState = BlockState(80);
pub const OAK_STAIRS_SOUTH: BlockState = BlockState(81);
pub const OAK_STAIRS_NORTH: BlockState = BlockState(82);
pub const OAK_STAIRS_EAST_TOP: BlockState = BlockState(83);
pub const OAK_STAIRS_WEST_TOP: BlockState = BlockState(84);
pub const OAK_STAIRS_SOUTH_TOP: BlockState = BlockState(85);
pub const OAK_STAIRS_NORTH_TOP: BlockState = BlockState(86);
pub const CHEST: BlockState = BlockState(87);
pub const CHEST_EAST: BlockState = BlockState(88);
pub const CHEST_WEST: BlockState = BlockState(89);
pub const CHEST_SOUTH: BlockState = BlockState(90);
pub const CHEST_NORTH: BlockState = BlockState(91);
pub const DIAMOND_ORE: BlockState = BlockState(92);
pub const DIAMOND_BLOCK: BlockState = BlockState(93);
pub const CRAFTING_TABLE: BlockState = BlockState(94);
pub const WHEAT: BlockState = BlockState(95);
pub const FARMLAND: BlockState = BlockState(96);
pub const FURNACE: BlockState = BlockState(97);
pub const FURNACE_EAST: BlockState = BlockState(98);
pub const FURNACE_WEST: BlockState = BlockState(99);
pub const FURNACE_SOUTH: BlockState = BlockState(100);
pub const FURNACE_NORTH: BlockState = BlockState(101);
pub const OAK_SIGN: BlockState = BlockState(102);
pub const OAK_DOOR: BlockState = BlockState(103);
pub const LADDER: BlockState = BlockState(104);
pub const LADDER_EAST: BlockState = BlockState(105);
pub const LADDER_WEST: BlockState = BlockState(106);
pub const LADDER_SOUTH: BlockState = BlockState(107);
pub const LADDER_NORTH: BlockState = BlockState(108);
pub const COBBLESTONE_STAIRS_EAST: BlockState = BlockState(109);
pub const COBBLESTONE_STAIRS_WEST: BlockState = BlockState(110);
pub const COBBLESTONE_STAIRS_SOUTH: BlockState = BlockState(111);
pub const COBBLESTONE_STAIRS_NORTH: BlockState = BlockState(112);
pub const COBBLESTONE_STAIRS_EAST_TOP: BlockState = BlockState(113);
pub const COBBLESTONE_STAIRS_WEST_TOP: BlockState = BlockState(114);
pub const COBBLESTONE_STAIRS_SOUTH_TOP: BlockState = BlockState(115);
pub const COBBLESTONE_STAIRS_NORTH_TOP: BlockState = BlockState(116);
pub const IRON_DOOR: BlockState = BlockState(117);
pub const REDSTONE_ORE: BlockState = BlockState(118);
pub const REDSTONE_ORE_LIT: BlockState = BlockState(119);
pub const SNOW: BlockState = BlockState(120);
pub const ICE: BlockState = BlockState(121);
pub const SNOW_BLOCK: BlockState = BlockState(122);
pub const CACTUS: BlockState = BlockState(123);
pub const CLAY: BlockState = BlockState(124);
pub const SUGAR_CANE: BlockState = BlockState(125);
pub const OAK_FENCE: BlockState = BlockState(126);
pub const NETHERRACK: BlockState = BlockState(127);
pub const GLOWSTONE: BlockState = BlockState(128);
pub const BARRIER: BlockState = BlockState(129);
pub const OAK_TRAPDOOR: BlockState = BlockState(130);
pub const STONE_BRICKS: BlockState = BlockState(131);
pub const MOSSY_STONE_BRICKS: BlockState = BlockState(132);
pub const CRACKED_STONE_BRICKS: BlockState = BlockState(133);
pub const CHISELED_STONE_BRICKS: BlockState = BlockState(134);
pub const GLASS_PANE: BlockState = BlockState(135);
pub const MELON: BlockState = BlockState(136);
pub const MELON_STEM: BlockState = BlockState(137);
pub const OAK_FENCE_GATE: BlockState = BlockState(138);
pub const STONE_BRICK_STAIRS: BlockState = BlockState(139);
pub const NETHER_BRICKS: BlockState = BlockState(140);
pub const NETHER_BRICK_STAIRS: BlockState = BlockState(141);
pub const SANDSTONE_STAIRS: BlockState = BlockState(142);
pub const QUARTZ_BLOCK: BlockState = BlockState(143);
pub const QUARTZ_STAIRS: BlockState = BlockState(144);
pub const STONECUTTER: BlockState = BlockState(145);
pub const CRYING_OBSIDIAN: BlockState = BlockState(146);
pub const NETHER_PORTAL: BlockState = BlockState(147);

// ── Table ───────────────────────────────────────────────────────────────────

/// `(api_id, api_data, state)` rows, in canonical order. Ids absent from the
/// table decode to AIR; data values absent for a present id fall back to that
/// id's data-0 row.
static TABLE: &[(i32, i32, BlockState)] = &[
    (0, 0, AIR),
    (1, 0, STONE),
    (2, 0, GRASS_BLOCK),
    (3, 0, DIRT),
    (4, 0, COBBLESTONE),
    (5, 0, OAK_PLANKS),
    (5, 1, SPRUCE_PLANKS),
    (5, 2, BIRCH_PLANKS),
    (6, 0, OAK_SAPLING),
    (6, 1, SPRUCE_SAPLING),
    (6, 2, BIRCH_SAPLING),
    (7, 0, BEDROCK),
    (8, 0, WATER),
    (9, 0, WATER), // stationary water, same state here
    (10, 0, LAVA),
    (11, 0, LAVA), // stationary lava, same state here
    (12, 0, SAND),
    (13, 0, GRAVEL),
    (14, 0, GOLD_ORE),
    (15, 0, IRON_ORE),
    (16, 0, COAL_ORE),
    (17, 0, OAK_WOOD),
    (18, 0, OAK_LEAVES),
    (18, 1, OAK_LEAVES),
    (18, 2, SPRUCE_LEAVES),
    (18, 3, BIRCH_LEAVES),
    (20, 0, GLASS),
    (21, 0, LAPIS_ORE),
    (22, 0, LAPIS_BLOCK),
    (24, 0, SANDSTONE),
    (24, 1, CHISELED_SANDSTONE),
    (24, 2, SMOOTH_SANDSTONE),
    (26, 0, RED_BED),
    (30, 0, COBWEB),
    (31, 0, DEAD_BUSH),
    (31, 1, TALL_GRASS),
    (31, 2, FERN),
    (35, 0, WHITE_WOOL),
    (35, 1, ORANGE_WOOL),
    (35, 2, MAGENTA_WOOL),
    (35, 3, LIGHT_BLUE_WOOL),
    (35, 4, YELLOW_WOOL),
    (35, 5, LIME_WOOL),
    (35, 6, PINK_WOOL),
    (35, 7, GRAY_WOOL),
    (35, 8, LIGHT_GRAY_WOOL),
    (35, 9, CYAN_WOOL),
    (35, 10, PURPLE_WOOL),
    (35, 11, BLUE_WOOL),
    (35, 12, BROWN_WOOL),
    (35, 13, GREEN_WOOL),
    (35, 14, RED_WOOL),
    (35, 15, BLACK_WOOL),
    (37, 0, DANDELION),
    (38, 0, CORNFLOWER),
    (39, 0, BROWN_MUSHROOM),
    (40, 0, RED_MUSHROOM),
    (41, 0, GOLD_BLOCK),
    (42, 0, IRON_BLOCK),
    (43, 0, STONE_SLAB_DOUBLE),
    (43, 1, SANDSTONE_SLAB_DOUBLE),
    (43, 2, OAK_SLAB_DOUBLE),
    (43, 3, COBBLESTONE_SLAB_DOUBLE),
    (43, 4, BRICK_SLAB_DOUBLE),
    (43, 5, STONE_BRICK_SLAB_DOUBLE),
    (44, 0, STONE_SLAB),
    (44, 1, SANDSTONE_SLAB),
    (44, 2, OAK_SLAB),
    (44, 3, COBBLESTONE_SLAB),
    (44, 4, BRICK_SLAB),
    (44, 5, STONE_BRICK_SLAB),
    (45, 0, BRICK_WALL),
    (46, 0, TNT),
    (47, 0, BOOKSHELF),
    (48, 0, MOSSY_COBBLESTONE),
    (49, 0, OBSIDIAN),
    (50, 0, TORCH),
    (50, 1, WALL_TORCH_EAST),
    (50, 2, WALL_TORCH_WEST),
    (50, 3, WALL_TORCH_SOUTH),
    (50, 4, WALL_TORCH_NORTH),
    (51, 0, FIRE),
    (53, 0, OAK_STAIRS_EAST),
    (53, 1, OAK_STAIRS_WEST),
    (53, 2, OAK_STAIRS_SOUTH),
    (53, 3, OAK_STAIRS_NORTH),
    (53, 4, OAK_STAIRS_EAST_TOP),
    (53, 5, OAK_STAIRS_WEST_TOP),
    (53, 6, OAK_STAIRS_SOUTH_TOP),
    (53, 7, OAK_STAIRS_NORTH_TOP),
    (54, 0, CHEST),
    (54, 1, CHEST_EAST),
    (54, 2, CHEST_WEST),
    (54, 3, CHEST_SOUTH),
    (54, 4, CHEST_NORTH),
    (56, 0, DIAMOND_ORE),
    (57, 0, DIAMOND_BLOCK),
    (58, 0, CRAFTING_TABLE),
    (59, 0, WHEAT),
    (60, 0, FARMLAND),
    (61, 0, FARMLAND), // inactive furnace never mapped; mirrors the id table
    (62, 0, FURNACE),
    (62, 1, FURNACE_EAST),
    (62, 2, FURNACE_WEST),
    (62, 3, FURNACE_SOUTH),
    (62, 4, FURNACE_NORTH),
    (63, 0, OAK_SIGN),
    (64, 0, OAK_DOOR),
    (65, 0, LADDER),
    (65, 1, LADDER_EAST),
    (65, 2, LADDER_WEST),
    (65, 3, LADDER_SOUTH),
    (65, 4, LADDER_NORTH),
    (67, 0, COBBLESTONE_STAIRS_EAST),
    (67, 1, COBBLESTONE_STAIRS_WEST),
    (67, 2, COBBLESTONE_STAIRS_SOUTH),
    (67, 3, COBBLESTONE_STAIRS_NORTH),
    (67, 4, COBBLESTONE_STAIRS_EAST_TOP),
    (67, 5, COBBLESTONE_STAIRS_WEST_TOP),
    (67, 6, COBBLESTONE_STAIRS_SOUTH_TOP),
    (67, 7, COBBLESTONE_STAIRS_NORTH_TOP),
    (71, 0, IRON_DOOR),
    (73, 0, REDSTONE_ORE),
    (74, 0, REDSTONE_ORE_LIT),
    (78, 0, SNOW),
    (79, 0, ICE),
    (80, 0, SNOW_BLOCK),
    (81, 0, CACTUS),
    (82, 0, CLAY),
    (83, 0, SUGAR_CANE),
    (85, 0, OAK_FENCE),
    (87, 0, NETHERRACK),
    (89, 0, GLOWSTONE),
    (95, 0, BARRIER),
    (96, 0, OAK_TRAPDOOR),
    (98, 0, STONE_BRICKS),
    (98, 1, MOSSY_STONE_BRICKS),
    (98, 2, CRACKED_STONE_BRICKS),
    (98, 3, CHISELED_STONE_BRICKS),
    (102, 0, GLASS_PANE),
    (103, 0, MELON),
    (105, 0, MELON_STEM),
    (107, 0, OAK_FENCE_GATE),
    (108, 0, STONE_BRICK_STAIRS),
    (112, 0, NETHER_BRICKS),
    (114, 0, NETHER_BRICK_STAIRS),
    (128, 0, SANDSTONE_STAIRS),
    (155, 0, QUARTZ_BLOCK),
    (156, 0, QUARTZ_STAIRS),
    (245, 0, STONECUTTER),
    (246, 0, CRYING_OBSIDIAN),
    (247, 0, NETHER_PORTAL),
];

static DECODE: LazyLock<HashMap<(i32, i32), BlockState>> = LazyLock::new(|| {
    let mut map = HashMap::with_capacity(TABLE.len());
    for &(id, data, state) in TABLE {
        map.entry((id, data)).or_insert(state);
    }
    map
});

static ENCODE: LazyLock<HashMap<BlockState, i32>> = LazyLock::new(|| {
    let mut map = HashMap::with_capacity(TABLE.len());
    for &(id, _, state) in TABLE {
        map.entry(state).or_insert(id);
    }
    map
});

/// Decode a wire `(id, data)` pair into an engine state.
///
/// Unknown data for a known id falls back to that id's data-0 variant;
/// unknown ids decode to AIR.
pub fn to_state(id: i32, data: i32) -> BlockState {
    if let Some(state) = DECODE.get(&(id, data)) {
        return *state;
    }
    DECODE.get(&(id, 0)).copied().unwrap_or(BlockState::AIR)
}

/// Encode an engine state as a wire block id. States the table doesn't know
/// read back as stone (1).
pub fn to_api_id(state: BlockState) -> i32 {
    ENCODE.get(&state).copied().unwrap_or(1)
}
