pub mod types;
pub mod day_category;
pub mod slot_utils;
pub mod normalize;
pub mod merge;
pub mod lookup;
pub mod assembly;

pub use types::{DayView, ProgramSlotEntry, Schedule, Slot, TimeKey, Weekday};
pub use day_category::DayCategory;
pub use slot_utils::{parse_time_key, split_channels};
pub use normalize::{normalize_row, Diagnostic, NormalizedRow, RawRow};
pub use lookup::NextProgram;
pub use assembly::{build_schedule, ScheduleBuild};
