//! Session state and auth failure escalation
//!
//! # Module Layout
//!
//! - [`session`] -- authenticated/unauthenticated projection, sign-in and
//!   sign-out
//! - [`sink`]    -- single-slot callback fired on irrecoverable refresh
//!   failure

pub mod session;
pub mod sink;

pub use session::AuthSession;
pub use sink::AuthFailureSink;
