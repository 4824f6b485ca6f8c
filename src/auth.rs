//! Bearer token model and the cached client-credentials token provider.

pub mod secret;
pub(crate) mod token;

pub use secret::*;
pub(crate) use token::*;
