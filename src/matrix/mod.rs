// Matrix data structures, conversions and configuration

pub mod alist;
pub mod config;
pub mod conversion;

pub use alist::SparseBinaryMatrix;
pub use config::{detect_architecture, Architecture, EnumerationConfig, EnumerationMode};
pub use conversion::{ensure_binary, AsBinaryMatrix, BinMatrix};
