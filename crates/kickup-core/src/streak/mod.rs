mod store;
mod tracker;

pub use store::StreakStore;
pub use tracker::{arm_freeze, buy_freeze, check_in, CheckInOutcome, StreakRecord};
