//! Schedule use-case services.
//!
//! # Responsibility
//! - Shape entity store reads into week views.
//! - Validate raw mutation input and translate store failures into
//!   user-facing error categories.
//!
//! # Invariants
//! - Services never bypass repository transactions.
//! - Services remain storage-agnostic (generic over repository traits).

pub mod schedule_mutation;
pub mod schedule_query;
