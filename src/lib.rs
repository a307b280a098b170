//! # userstore-binding
//!
//! A binding layer that lets a host look up users and run commands against a user/channel
//! store through opaque handles, without ever seeing the store's internal types.
//!
//! ## How it fits together
//!
//! ```text
//! host ──▶ boundary ──▶ registry (sessions, pending handles)
//!                   ├─▶ resolution ──▶ clients ──▶ user store actor
//!                   └─▶ dispatch   ──▶ clients ──▶ user / channel store actors
//! ```
//!
//! 1. **Open** a session ([`boundary::database`]) and **spawn** a pending handle. No I/O.
//! 2. **Resolve** it once ([`resolution`]). The lookup's outcome, success or failure, is
//!    recorded on the handle.
//! 3. **Read** [`boundary::model_data`] or [`boundary::model_error`]; exactly one is set.
//!
//! Commands ([`dispatch`]) validate synchronously and execute asynchronously, returning the
//! payload or the backend error as data.
//!
//! ## Errors
//!
//! Backend refusals and transport faults are [`error::Error`] values
//! (`{ "type", "location" }`). Misuse of the binding itself (resolving twice, negative
//! durations, ...) is an [`error::BindingError`].
//!
//! ## Backend stores
//!
//! The stores are tokio actors built on the generic [`framework::ResourceActor`]. Each
//! processes its requests one at a time, so find-or-create needs no locking.
//!
//! ## Logging
//!
//! `tracing` throughout; [`lifecycle::init`] installs a compact subscriber. Set `RUST_LOG`
//! to override the configured filter.

#[macro_use]
pub mod error;

pub mod boundary;
pub mod channel_actor;
pub mod clients;
pub mod config;
pub mod dispatch;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod registry;
pub mod resolution;
pub mod user_actor;
