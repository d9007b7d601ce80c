//! ventboard/crates/vb-services/src/lib.rs
//!
//! The application core: intent tracking, the moderation state machine,
//! comment threading, best-effort notifications, and inbound routing.
//! Everything here talks to the outside world through the vb-core ports,
//! so any store/transport plugin pair can sit underneath.

pub mod comments;
pub mod intent;
mod markup;
pub mod moderation;
pub mod notify;
pub mod router;

#[cfg(test)]
pub(crate) mod testutil;

pub use comments::CommentService;
pub use intent::IntentTracker;
pub use moderation::{ModerationConfig, ModerationService, VENT_NUMBER_KEY};
pub use notify::Notifier;
pub use router::{Reply, Router};
