//! Tandem-parking compatibility core.
//!
//! Rebuilds each student's day-by-day campus presence from their extracted
//! schedule document, against the school's fixed six-day bell rotation, and
//! scores pairs of students for sharing one parking spot on offsetting
//! schedules.
//!
//! Data flows strictly upward through four pure stages:
//! document lines → [`parsing`] → course records → [`presence`] →
//! per-day timelines → [`algorithms`] → pairwise scores and rankings.
//! The [`time`] module is the shared source of truth for the bell grid and
//! time arithmetic. No stage performs I/O except the optional [`io`] loader.

pub mod algorithms;
pub mod core;
pub mod io;
pub mod parsing;
pub mod presence;
pub mod time;

pub use crate::algorithms::{compute_compatibility, rank_partners, CompatibilityResult};
pub use crate::core::domain::{ScheduleDocument, StudentSchedule};
pub use crate::parsing::parse;
pub use crate::presence::{build_schedule, BuildOptions};
