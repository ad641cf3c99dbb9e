use crate::state::BoardState;
use crate::types::Player;

/// `SplitMix64` finalizer for stable, well-mixed fingerprints.
#[inline]
fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

// Domain tags (arbitrary but fixed)
const DOM_EDGES: u64 = 0xD07B_0E5E_0000_0001;
const DOM_BOXES: u64 = 0xD07B_0E5E_0000_00B0;
const DOM_META: u64 = 0xD07B_0E5E_0000_00C0;

/// Exact snapshot identifying a search node: board size, ownership of every
/// edge and box, the player to move and the remaining ply budget (`None` for
/// unbounded search).
///
/// The key carries the full position rather than a hash of it, so two keys
/// compare equal only for identical nodes. Board size is part of the key, so
/// entries from another topology can never match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PositionKey {
    pub size: u8,
    pub edges: [u128; 2],
    pub boxes: [u64; 2],
    pub mover: Player,
    pub depth: Option<u8>,
}

impl PositionKey {
    /// 64-bit digest of the key. Used for direct-mapped table indexing and
    /// for display; not a substitute for key equality.
    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        let mut z = splitmix64(DOM_META ^ u64::from(self.size));
        for half in self.edges {
            z = splitmix64(z ^ DOM_EDGES ^ (half as u64));
            z = splitmix64(z ^ DOM_EDGES.rotate_left(17) ^ ((half >> 64) as u64));
        }
        for b in self.boxes {
            z = splitmix64(z ^ DOM_BOXES ^ b);
        }
        let mover_bit = self.mover.index() as u64;
        let depth_bits = self.depth.map_or(0xFFFF, u64::from);
        splitmix64(z ^ DOM_META ^ (mover_bit << 8) ^ (depth_bits << 16))
    }
}

#[inline]
#[must_use]
pub fn position_key(state: &BoardState, mover: Player, depth: Option<u8>) -> PositionKey {
    PositionKey {
        size: state.topology().size() as u8,
        edges: [
            state.edges_of(Player::Human),
            state.edges_of(Player::Agent),
        ],
        boxes: [
            state.boxes_of(Player::Human),
            state.boxes_of(Player::Agent),
        ],
        mover,
        depth,
    }
}
