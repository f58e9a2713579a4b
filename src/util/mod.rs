//! Utility modules.

pub mod text;
pub mod timeout;
