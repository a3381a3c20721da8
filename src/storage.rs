use std::fs::{self, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::models::Task;

/// File name of the single slot holding the serialized task collection.
pub const SLOT_FILE: &str = "tasks.json";

/// Returns the path to the task slot (`tasks.json`).
///
/// The path is determined in the following order:
/// 1. `TASKS_DB` environment variable.
/// 2. `~/.local/share/taskpad/tasks.json` (on Linux).
/// 3. `./tasks.json` (fallback).
pub fn slot_path() -> PathBuf {
    std::env::var("TASKS_DB").map(PathBuf::from).unwrap_or_else(|_| {
        let mut p = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        p.push("taskpad");
        if !p.exists() {
            let _ = fs::create_dir_all(&p);
        }
        p.push(SLOT_FILE);
        p
    })
}

/// Reads the task collection from the slot.
///
/// A missing file, an unreadable file, or an unparseable payload all
/// yield an empty collection; none of them is an error at load time.
pub fn read_slot(path: &Path) -> Vec<Task> {
    if !path.exists() {
        return Vec::new();
    }
    let mut f = match OpenOptions::new().read(true).open(path) {
        Ok(f) => f,
        Err(_) => return Vec::new(),
    };
    let mut s = String::new();
    if f.read_to_string(&mut s).is_err() {
        return Vec::new();
    }
    serde_json::from_str(&s).unwrap_or_else(|_| Vec::new())
}

/// Writes the whole task collection to the slot, replacing its previous
/// contents.
pub fn write_slot(path: &Path, tasks: &[Task]) -> std::io::Result<()> {
    let s = serde_json::to_string_pretty(tasks)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    let mut f = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

/// Deletes the slot file, if present.
pub fn delete_slot(path: &Path) -> std::io::Result<()> {
    if path.exists() {
        fs::remove_file(path)?;
    }
    Ok(())
}
