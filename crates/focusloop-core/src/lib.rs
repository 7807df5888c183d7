//! # FocusLoop Core Library
//!
//! Core business logic for FocusLoop, a work/break interval timer with
//! remote progress and gamification sync. The CLI binary is a thin layer
//! over this library.
//!
//! ## Architecture
//!
//! - **Session machine**: a pulse-driven countdown state machine; the
//!   caller delivers one-second pulses via `tick()`
//! - **Storage**: JSON daily progress snapshot and TOML configuration
//! - **Sync**: HTTP client for the remote progress/gamification authority
//! - **Metrics**: pure formatting and geometry helpers for renderers
//!
//! ## Key Components
//!
//! - [`SessionStateMachine`]: countdown state machine and completion protocol
//! - [`SessionClock`]: cancellable one-second pulse source
//! - [`ProgressStore`]: date-scoped local progress cache
//! - [`SyncClient`]: remote authority interface

pub mod error;
pub mod events;
pub mod gamification;
pub mod metrics;
pub mod notify;
pub mod session;
pub mod storage;
pub mod sync;

pub use error::{ConfigError, CoreError, StoreError};
pub use events::Event;
pub use gamification::{Badge, GamificationCache};
pub use notify::NotificationSink;
pub use session::{ClockSubscription, Durations, Phase, SessionClock, SessionState, SessionStateMachine};
pub use storage::{Config, ProgressSnapshot, ProgressStore};
pub use sync::{SyncClient, SyncError};
