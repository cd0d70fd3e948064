//! Group and challenge membership state machines for the Warren tracker.
//!
//! Pure permission predicates and status transitions over the social types
//! in `warren-types`. The engine consults these before every mutation;
//! nothing here touches storage.
//!
//! # Modules
//!
//! - [`roles`] -- The role/permission matrix (moderation, kicking, role
//!   management) and join semantics by visibility
//! - [`group`] -- Group lifecycle rules and gold costs
//! - [`challenge`] -- Challenge lifecycle rules and gold costs
//! - [`error`] -- Error types for all social operations ([`SocialError`])

pub mod challenge;
pub mod error;
pub mod group;
pub mod roles;

pub use error::SocialError;
