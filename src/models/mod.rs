pub mod day_summary;
pub mod entry;
pub mod record;
pub mod timer;

pub use day_summary::{DaySummary, TimerSummary};
pub use entry::Entry;
pub use record::{EntryRecord, TimerRecord};
pub use timer::{Timer, TimerKey};
