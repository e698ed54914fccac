//! Bitcoin-style merkle branch computation.

use auxchain_primitives::{Buf32, sha256d};

/// Hashes two nodes into their parent.
fn hash_pair(left: &Buf32, right: &Buf32) -> Buf32 {
    let mut combined = [0u8; 64];
    combined[..32].copy_from_slice(left.as_slice());
    combined[32..].copy_from_slice(right.as_slice());
    sha256d(&combined)
}

/// Recomputes a merkle root from a leaf, its branch of cohashes and its index.
///
/// The index is consumed from the least significant bit: a 0 bit puts the running
/// hash on the left of the cohash, a 1 bit puts it on the right. There is no check
/// relating `index` to the branch length; an out-of-range index yields a root that
/// won't match whatever it's compared against.
pub fn compute_merkle_root(leaf: Buf32, branch: &[Buf32], mut index: u32) -> Buf32 {
    let mut hash = leaf;
    for cohash in branch {
        hash = if index & 1 == 0 {
            hash_pair(&hash, cohash)
        } else {
            hash_pair(cohash, &hash)
        };
        index >>= 1;
    }
    hash
}

/// Builds the merkle tree over `ids` and returns the branch for the leaf at
/// `index` along with the root.
///
/// Levels with an odd number of nodes pair their last node with itself, as in
/// Bitcoin's transaction merkle tree. The branch is what [`compute_merkle_root`]
/// takes to get back to the root.
///
/// # Panics
///
/// If `index` is out of range for `ids`.
pub fn get_cohashes<T>(ids: &[T], index: u32) -> (Vec<Buf32>, Buf32)
where
    T: Into<Buf32> + Clone,
{
    let mut pos = index as usize;
    assert!(
        pos < ids.len(),
        "merkle: leaf index {index} out of range for {} leaves",
        ids.len()
    );

    let mut level: Vec<Buf32> = ids.iter().cloned().map(Into::into).collect();
    let mut branch = Vec::new();
    while level.len() > 1 {
        if level.len() % 2 == 1 {
            level.push(level[level.len() - 1]);
        }
        branch.push(level[pos ^ 1]);
        level = level
            .chunks_exact(2)
            .map(|pair| hash_pair(&pair[0], &pair[1]))
            .collect();
        pos /= 2;
    }

    (branch, level[0])
}
