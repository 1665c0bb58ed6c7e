//! Presentation-side plumbing: widget state and the periodic refresh
//! scheduler. The GUI toolkit attaches on top of this crate; nothing in
//! here draws.

pub mod refresh;
pub mod state;

pub use refresh::{fetch_cycle, resolve_manual_location, RefreshScheduler};
pub use state::{CurrentConditions, RefreshOutcome, WidgetState};
