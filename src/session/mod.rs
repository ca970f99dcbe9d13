//! The quiz session: state, the actions that change it, and the figures
//! derived from it.

mod action;
mod reducer;
mod state;
pub mod stats;
mod store;

pub use action::Action;
pub use reducer::{percentage, reduce};
pub use state::{Phase, SessionState};
pub use stats::{HeaderStats, ResultsSummary, ReviewItem, ScoreTier, TimeTier};
pub use store::Store;
