//! View State
//!
//! Panel state machine, event filters and request generations.

mod generation;
mod view;

pub use generation::{Generation, RequestToken};
pub use view::{filter_events, AreaCounts, AreaData, EventFilter, Panel, ViewState};
