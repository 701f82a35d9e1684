//! # KickUp Core Library
//!
//! Core business logic for KickUp, a youth football training companion.
//! Everything is available through the standalone `kickup` CLI; a mobile or
//! desktop shell is a thin layer over the same library.
//!
//! ## Architecture
//!
//! - **Machines**: Drill and feedback sessions are table-driven state
//!   machines built on one reusable abstraction ([`machine`])
//! - **Streaks**: Daily check-in tracker with streak freezes
//! - **Matchmaking**: Privacy-first player search (minors only ever see minors)
//! - **Storage**: SQLite for drill history and key-value state, TOML config
//!
//! ## Key Components
//!
//! - [`DrillSession`]: AR keepy-uppy drill state machine
//! - [`FeedbackSession`]: Form-analysis state machine
//! - [`StreakRecord`]: Streak and freeze bookkeeping
//! - [`find_players`]: Matchmaking filter
//! - [`AppState`]: Explicit application state (profile, streak, fatigue)

pub mod machine;
pub mod drill;
pub mod feedback;
pub mod streak;
pub mod matchmaking;
pub mod health;
pub mod profile;
pub mod storage;
pub mod events;
pub mod error;

pub use drill::{DrillDriver, DrillEvent, DrillMetrics, DrillSession, DrillState};
pub use feedback::{CoachingTip, FeedbackEvent, FeedbackSession, FeedbackState};
pub use streak::{CheckInOutcome, StreakRecord, StreakStore};
pub use matchmaking::{find_players, GeoPoint, MatchCandidate, MatchQuery, RankedCandidate};
pub use health::HealthCheck;
pub use profile::{AppState, UserProfile};
pub use storage::{Config, Database};
pub use events::Event;
pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
