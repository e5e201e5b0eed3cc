//! Service layer.
//!
//! `schedule_selector` and `streak` are the pure core: synchronous, total
//! functions over in-memory data. The remaining modules fetch from the portal
//! and hand the data to the core.

pub mod attendance;
pub mod performance;
pub mod schedule;
pub mod schedule_selector;
pub mod streak;

pub use attendance::{academic_year_start, get_attendance, get_attendance_streak};
pub use performance::{get_score, get_subjects};
pub use schedule::{get_class_details, get_schedule, ScheduleQuery};
pub use schedule_selector::{merge_event_sources, select_events, SubgroupSelection};
pub use streak::calculate_streak;
