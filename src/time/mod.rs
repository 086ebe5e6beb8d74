pub mod bell;
pub mod clock;

pub use bell::{BellSchedule, BellSlot};
pub use clock::{minutes_to_time, overlap_minutes, time_to_minutes};
