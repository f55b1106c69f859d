use std::fs::{self, Permissions};
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::schedule::{ProgramSlotEntry, Schedule, Weekday};
use crate::{Result, ScheduleError};

#[cfg(unix)]
const NEW_FILE_MODE: u32 = 0o644;

/// Formats a slot's programs as "program (channel)", comma separated
pub fn format_entries(entries: &[ProgramSlotEntry]) -> String {
    entries
        .iter()
        .map(|e| format!("{} ({})", e.program_name, e.channel))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Renders the schedule as indented JSON with non-ASCII text kept as is
pub fn schedule_to_json(schedule: &Schedule) -> Result<String> {
    Ok(serde_json::to_string_pretty(schedule)?)
}

/// Writes the schedule JSON to `path`.
///
/// The document goes to a temporary file next to the destination which is
/// then renamed over it, so a failed write never leaves a truncated file.
pub fn write_schedule_to_file(schedule: &Schedule, path: &Path) -> Result<()> {
    let json = schedule_to_json(schedule)?;
    let unwritable = |source: std::io::Error| ScheduleError::OutputUnwritable {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir).map_err(unwritable)?;
    file.write_all(json.as_bytes()).map_err(unwritable)?;
    file.flush().map_err(unwritable)?;
    if let Some(permissions) = output_permissions(path) {
        file.as_file().set_permissions(permissions).map_err(unwritable)?;
    }
    file.persist(path).map_err(|e| unwritable(e.error))?;

    Ok(())
}

/// Permissions for the finished file: those of the file being replaced, or
/// 0644 for a new file. Temp files start out owner-only.
fn output_permissions(path: &Path) -> Option<Permissions> {
    if let Ok(existing) = fs::metadata(path) {
        return Some(existing.permissions());
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        Some(Permissions::from_mode(NEW_FILE_MODE))
    }
    #[cfg(not(unix))]
    {
        None
    }
}

/// Prints the occupied slots of every day
pub fn print_week_schedule(schedule: &Schedule) {
    println!("\n=== Weekly Schedule ===");
    println!("Occupied slots: {} of {}", schedule.occupied_slots(), 7 * 24);

    for day in Weekday::ALL {
        println!("\n{}:", day);
        let mut any = false;
        for (time, entries) in schedule.day(day).occupied() {
            println!("  {} -> {}", time, format_entries(entries));
            any = true;
        }
        if !any {
            println!("  [EMPTY]");
        }
    }
}
