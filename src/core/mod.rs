//! Core concierge components
//!
//! The dialogue engine, the lead it fills, and the session registry that
//! gives every visitor an engine of their own.

pub mod engine;
pub mod events;
pub mod extract;
pub mod intent;
pub mod lead;
pub mod session;

pub use engine::DialogueError;
pub use lead::{Lead, LeadField};
pub use session::{SessionError, SessionManager, SessionSnapshot, TurnOutcome};
