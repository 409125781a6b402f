//! Remote validation boundary.
//!
//! The rest of the crate only sees the [`RemoteValidator`] trait, so a real
//! backend can replace the simulation without touching callers.

pub mod in_memory;
pub mod simulated;
pub mod validator;

pub use in_memory::{InMemoryValidator, ScriptedReply};
pub use simulated::SimulatedValidator;
pub use validator::{RemoteFailure, RemoteValidator};
