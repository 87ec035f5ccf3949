//! Centralized constants for the codeweight library
//!
//! Constants are organized by category for easy reference and maintenance.

// ============================================================================
// ARCHITECTURE-SPECIFIC CONSTANTS
// ============================================================================

/// Vector width in bytes for AVX-512 architecture
pub const AVX512_VECTOR_WIDTH_BYTES: usize = 64;

/// Vector width in bytes for AVX2 architecture
pub const AVX2_VECTOR_WIDTH_BYTES: usize = 32;

/// Vector width in bytes for ARM NEON architecture
pub const NEON_VECTOR_WIDTH_BYTES: usize = 16;

/// Vector width in bytes for generic/scalar processing
pub const SCALAR_VECTOR_WIDTH_BYTES: usize = 8;

/// Byte alignment of packed column masks (one cache line)
pub const MASK_ALIGNMENT: usize = 64;

// ============================================================================
// NUMERIC THRESHOLDS
// ============================================================================

/// Pivots smaller than this are treated as zero when inverting over the reals
pub const FLOAT_PIVOT_EPSILON: f64 = 1e-9;
