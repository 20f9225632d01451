//! Core engine for sundial.
//!
//! This crate holds everything that computes something:
//! - `provider` and `projector` for moving between UTC instants and wall clocks
//! - `catalog` and `city` for the static city reference data
//! - `overlap` and `timeline` for aligning work hours on a shared 24-hour axis
//! - `session` for the application state that front ends drive

pub mod catalog;
pub mod city;
pub mod config;
pub mod error;
pub mod local_time;
pub mod overlap;
pub mod projector;
pub mod provider;
pub mod session;
pub mod timeline;

pub use catalog::CityRegistry;
pub use city::City;
pub use error::{SundialError, SundialResult};
pub use local_time::{DayPhase, LocalTime};
pub use overlap::{OverlapSegment, TimelineWindow, WorkWindow, find_overlap, total_overlap_hours};
pub use projector::Projector;
pub use provider::{TimeZoneProvider, TzdbProvider};
pub use session::Session;
pub use timeline::{Timeline, TimelineRow, build_timeline, resolve_click};
