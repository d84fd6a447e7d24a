//! Deterministic per-cell hash
//!
//! A pure avalanche mix over (x, y, phase). Same triple, same value, across
//! processes: no RNG state is consulted anywhere in the morph path.

/// Hash a cell coordinate and phase index into [0, 1]
#[inline]
pub fn hash01(x: i32, y: i32, phase: u32) -> f32 {
    let mut h = (x as u32)
        .wrapping_mul(73_856_093)
        ^ (y as u32).wrapping_mul(19_349_663)
        ^ phase.wrapping_mul(83_492_791);
    h ^= h << 13;
    h ^= h >> 17;
    h ^= h << 5;
    (h as f64 / u32::MAX as f64) as f32
}
