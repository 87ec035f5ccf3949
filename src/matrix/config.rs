//! Configuration for weight enumeration

use crate::constants::{
    AVX2_VECTOR_WIDTH_BYTES, AVX512_VECTOR_WIDTH_BYTES, NEON_VECTOR_WIDTH_BYTES,
    SCALAR_VECTOR_WIDTH_BYTES,
};
use crate::error::{CodeError, CodeResult};

/// The target architecture, used to pick a default lane width
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Architecture {
    /// Intel/AMD x86_64 with AVX-512 support
    X86WithAVX512,
    /// Intel/AMD x86_64 without AVX-512 support
    X86WithoutAVX512,
    /// ARM architecture with NEON support
    ArmNeon,
    /// Generic implementation for any architecture
    Generic,
}

impl Architecture {
    /// Get the vector width in bytes for this architecture
    pub fn vector_width_bytes(&self) -> usize {
        match self {
            Architecture::X86WithAVX512 => AVX512_VECTOR_WIDTH_BYTES,
            Architecture::X86WithoutAVX512 => AVX2_VECTOR_WIDTH_BYTES,
            Architecture::ArmNeon => NEON_VECTOR_WIDTH_BYTES,
            Architecture::Generic => SCALAR_VECTOR_WIDTH_BYTES,
        }
    }

    /// Number of 64-bit column masks processed side by side
    pub fn lane_width(&self) -> usize {
        (self.vector_width_bytes() / std::mem::size_of::<u64>()).max(1)
    }
}

/// Detects the current CPU architecture
pub fn detect_architecture() -> Architecture {
    #[cfg(target_arch = "x86_64")]
    {
        #[cfg(target_feature = "avx512f")]
        {
            return Architecture::X86WithAVX512;
        }
        #[cfg(not(target_feature = "avx512f"))]
        {
            if std::is_x86_feature_detected!("avx512f") {
                return Architecture::X86WithAVX512;
            } else {
                return Architecture::X86WithoutAVX512;
            }
        }
    }

    #[cfg(target_arch = "aarch64")]
    {
        return Architecture::ArmNeon;
    }

    #[allow(unreachable_code)]
    Architecture::Generic
}

/// Which part of the message space an enumeration run covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumerationMode {
    /// Every message of the code, `2^k` candidates
    Exhaustive,
    /// The first `n` message indices only
    Sampled(u64),
}

impl EnumerationMode {
    /// Number of candidate messages for a code with `message_bits` inputs
    ///
    /// Exhaustive runs need `2^message_bits` to fit a 64-bit counter.
    pub fn candidate_count(&self, message_bits: usize) -> CodeResult<u64> {
        match *self {
            EnumerationMode::Exhaustive => {
                if message_bits >= u64::BITS as usize {
                    Err(CodeError::Dimension(format!(
                        "exhaustive enumeration of {} message bits exceeds a 64-bit counter",
                        message_bits
                    )))
                } else {
                    Ok(1u64 << message_bits)
                }
            }
            EnumerationMode::Sampled(n) => Ok(n),
        }
    }

    /// Returns true for runs that cover the whole message space
    pub fn is_exhaustive(&self) -> bool {
        matches!(self, EnumerationMode::Exhaustive)
    }
}

/// Configuration for a weight enumeration run
#[derive(Debug, Clone)]
pub struct EnumerationConfig {
    /// Message space coverage
    pub mode: EnumerationMode,

    /// Number of column masks per batch; 1 selects the scalar kernel
    pub lane_width: usize,

    /// Number of worker threads
    pub n_threads: usize,

    /// Target architecture for optimization
    pub architecture: Architecture,
}

impl Default for EnumerationConfig {
    fn default() -> Self {
        Self::for_architecture(detect_architecture())
    }
}

impl EnumerationConfig {
    /// Create a config tuned for a specific architecture
    pub fn for_architecture(arch: Architecture) -> Self {
        Self {
            mode: EnumerationMode::Exhaustive,
            lane_width: arch.lane_width(),
            n_threads: num_cpus::get(),
            architecture: arch,
        }
    }

    pub fn with_mode(mut self, mode: EnumerationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_lane_width(mut self, lane_width: usize) -> Self {
        self.lane_width = lane_width;
        self
    }

    pub fn with_threads(mut self, n_threads: usize) -> Self {
        self.n_threads = n_threads;
        self
    }

    /// Rejects zero lane widths and zero thread counts
    pub fn validate(&self) -> CodeResult<()> {
        if self.lane_width == 0 {
            return Err(CodeError::Dimension("lane width must be at least 1".into()));
        }
        if self.n_threads == 0 {
            return Err(CodeError::Dimension("thread count must be at least 1".into()));
        }
        Ok(())
    }
}
