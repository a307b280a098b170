//! Records held by the backend stores, serialised the way the host sees them.

pub mod channel;
pub mod user;

pub use channel::*;
pub use user::*;
