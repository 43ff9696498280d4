//! Errors reported through the context's error channel.

use thiserror::Error;

pub const GL_NO_ERROR: u32 = 0;
pub const GL_INVALID_ENUM: u32 = 0x0500;
pub const GL_INVALID_VALUE: u32 = 0x0501;

/// A GL error condition.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlError {
    #[error("invalid enumerant 0x{0:04X}")]
    InvalidEnum(u32),

    #[error("invalid value: {0}")]
    InvalidValue(&'static str),
}

impl GlError {
    /// The GL error code for this condition.
    pub fn code(&self) -> u32 {
        match self {
            GlError::InvalidEnum(_) => GL_INVALID_ENUM,
            GlError::InvalidValue(_) => GL_INVALID_VALUE,
        }
    }
}
