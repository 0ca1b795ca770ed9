//! Error types for benchmark runs.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid benchmark config: size={0}, iterations={1} (both must be >= 1)")]
    InvalidConfig(u32, u32),
}
