//! Core types and logic for the agenda event service.
//!
//! This crate provides what the server and the notifier share:
//! - `Event` and related types, including their camelCase wire format
//! - overlap detection between a candidate event and the stored collection
//! - recurrence grouping for batch-created events
//! - batch update/delete over a collection
//! - the upcoming-event notification state machine

pub mod batch;
pub mod error;
pub mod event;
pub mod notifier;
pub mod overlap;
pub mod recurrence;
pub mod search;

pub use error::{AgendaError, AgendaResult};

// Re-export all event types at crate root for convenience
pub use event::*;
