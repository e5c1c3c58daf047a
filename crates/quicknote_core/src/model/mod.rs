//! Domain model for remote note records.
//!
//! # Responsibility
//! - Define the note shapes exchanged with the notes API.
//! - Hold the presence checks applied before a create request is sent.
//!
//! # Invariants
//! - Note ids are assigned by the remote API and never generated here.
//! - The client never holds authoritative state; views are re-derived by
//!   re-fetching.

pub mod note;
