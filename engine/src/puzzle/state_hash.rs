// engine/src/puzzle/state_hash.rs
#![forbid(unsafe_code)]

/*
State identity

A configuration is identified by where every piece sits, except that pieces
of identical shape are interchangeable: two boards that differ only by which
member of a same-shape group occupies which slot are the same search state.

Scheme:
- fingerprint: the piece's first (anchor) coordinate, bit-packed and run
  through a 64-bit finalizer so nearby anchors land far apart.
- within a shape group, fingerprints combine with a wrapping sum, which is
  commutative, so member identity drops out.
- group sums fold into the final value in the canonical group order fixed at
  construction.

Equal configurations always hash equal. Distinct configurations colliding is
the usual hashing trade-off; the characterization tests enumerate small
reachable spaces and assert no collision occurs at in-scope sizes.
*/

use std::collections::BTreeMap;

/// splitmix64 finalizer.
#[inline]
pub(crate) fn mix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Positional fingerprint of a piece anchor.
#[inline]
pub(crate) fn fingerprint(x: i32, y: i32) -> u64 {
    mix64(((x as u32 as u64) << 32) | (y as u32 as u64))
}

/// Canonical shape: cells translated so the minimum x and y are zero, in
/// row-major order.
pub(crate) fn normalized_shape(cells: &[(i32, i32)]) -> Vec<(i32, i32)> {
    let min_x = cells.iter().map(|c| c.0).min().unwrap_or(0);
    let min_y = cells.iter().map(|c| c.1).min().unwrap_or(0);
    let mut shape: Vec<(i32, i32)> = cells.iter().map(|&(x, y)| (x - min_x, y - min_y)).collect();
    shape.sort_unstable_by_key(|&(x, y)| (y, x));
    shape
}

/// Group piece labels by canonical shape. The outer order (shape-lexicographic)
/// and the inner order (label-sorted) are both deterministic, which fixes the
/// fold order of [`combine_groups`] for the lifetime of the board.
pub(crate) fn shape_groups<'a>(
    pieces: impl Iterator<Item = (u8, &'a [(i32, i32)])>,
) -> Vec<Vec<u8>> {
    let mut by_shape: BTreeMap<Vec<(i32, i32)>, Vec<u8>> = BTreeMap::new();
    for (label, cells) in pieces {
        by_shape
            .entry(normalized_shape(cells))
            .or_default()
            .push(label);
    }
    by_shape.into_values().collect()
}

/// Fold per-piece fingerprints into one state hash: commutative sum within a
/// group, order-dependent mix across groups.
pub(crate) fn combine_groups(groups: &[Vec<u8>], mut fp: impl FnMut(u8) -> u64) -> u64 {
    let mut h = 0x243F_6A88_85A3_08D3u64;
    for group in groups {
        let mut acc = 0u64;
        for &label in group {
            acc = acc.wrapping_add(fp(label));
        }
        h = mix64(h ^ acc);
    }
    h
}
