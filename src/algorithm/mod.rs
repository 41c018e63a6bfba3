/// Fixed 256-bit set of active luminance keys
pub mod bitset;
/// Pixel assignment executor and one-shot synthesis
pub mod executor;
/// Luminance-indexed pool of unassigned colors
pub mod pool;
/// Deterministic interleaved traversal of canvas coordinates
pub mod traversal;
