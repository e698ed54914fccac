//! Deterministic slot of a chain inside the merge-mining merkle tree.

/// Multiplier of the linear congruential step used for mixing.
const MIX_MUL: u32 = 1_103_515_245;

/// Increment of the linear congruential step used for mixing.
const MIX_ADD: u32 = 12_345;

/// Calculates the index at which a chain's hash must appear in the chain merkle
/// tree of a given `height`, from the coinbase nonce and the chain id.
///
/// Neither input can be picked freely once the parent block is mined, so a miner
/// can't place the same chain at a slot of its choosing. The result is always in
/// `[0, 2^height)`.
pub fn expected_index(nonce: u32, chain_id: i32, height: u32) -> u32 {
    let mut rand = nonce;
    rand = rand.wrapping_mul(MIX_MUL).wrapping_add(MIX_ADD);
    rand = rand.wrapping_add(chain_id as u32);
    rand = rand.wrapping_mul(MIX_MUL).wrapping_add(MIX_ADD);

    match 1u32.checked_shl(height) {
        Some(size) => rand % size,
        None => rand,
    }
}
