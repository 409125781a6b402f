//! Interactive validation sessions.
//!
//! [`SessionMachine`] is the pure transition logic; [`SessionHandle`] runs it
//! on a tokio task and performs the validations it asks for.

pub mod machine;
pub mod runtime;
pub mod state;

pub use machine::{AttemptId, Effect, SessionEvent, SessionMachine, Transition};
pub use runtime::{SessionClosed, SessionHandle};
pub use state::{Phase, SessionState};
