/// Opaque block state. The engine stores these without interpreting them.
/// Game-specific layers assign meaning to specific states (e.g. id/data pairs
/// of an external API).
///
/// The only semantic the engine enforces is that `BlockState::AIR` (0) is the
/// "empty" state: cells holding AIR are not stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BlockState(pub u16);

impl BlockState {
    /// The universal "empty" state.
    pub const AIR: BlockState = BlockState(0);

    pub const fn new(state: u16) -> Self {
        Self(state)
    }
}
