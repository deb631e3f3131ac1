//! `chirpy-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no HTTP or storage
//! concerns): typed identifiers, the domain error model, the user and chirp
//! records, and the content moderator.

pub mod error;
pub mod id;
pub mod model;
pub mod moderation;

pub use error::{DomainError, DomainResult};
pub use id::{ChirpId, UserId};
pub use model::{Chirp, User};
