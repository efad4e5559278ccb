//! Class scheduling
//!
//! Time slot normalization, overlap detection, day query resolution and the
//! registration arbiter that decides whether a student may join a class.

pub mod time_slot;
pub mod days;
pub mod arbiter;

pub use time_slot::{normalize, overlaps, TimeSlot};
pub use days::{resolve_days, resolve_day_query, DayQuery, Weekday};
pub use arbiter::{mark_session_used, register_student, EnrollmentStore, EnrollmentTransaction};
