//! Camera-assisted form feedback.
//!
//! Same guided-flow pattern as the drill: a linear scan with one regression
//! edge (lost tracking) and a terminal-ish step whose entry generates
//! coaching tips.

mod session;
mod tips;

pub use session::{
    FeedbackContext, FeedbackEffect, FeedbackEvent, FeedbackFlow, FeedbackSession, FeedbackState,
};
pub use tips::{generate_tips, CoachingTip, TipFocus, MAX_TIPS};
