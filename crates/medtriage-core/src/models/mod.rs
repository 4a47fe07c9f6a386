//! Domain models for the triage system.

mod medication;
mod patient;
mod recommendation;
mod triage;

pub use medication::*;
pub use patient::*;
pub use recommendation::*;
pub use triage::*;
