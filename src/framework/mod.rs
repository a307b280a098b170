//! Generic actor framework backing the user and channel stores.
//!
//! Each store is a [`ResourceActor`] that owns its records and processes requests
//! sequentially, so lookups and find-or-create are atomic without locks. Callers talk to it
//! through a cloneable [`ResourceClient`].
//!
//! # Main Components
//!
//! - [`ActorEntity`] - Trait that record types implement to be managed by an actor
//! - [`ResourceActor`] - The store itself (server half)
//! - [`ResourceClient`] - Type-safe async handle to a store (client half)
//! - [`ActorClient`] - Shared behaviour for the typed store clients
//! - [`FrameworkError`] - Transport and store-level failures
//!
//! # Testing
//!
//! See [`mock`] for a client that answers from scripted expectations.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
