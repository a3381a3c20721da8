//! # Taskpad
//!
//! A terminal task manager with subtasks, written in Rust. Taskpad pairs a
//! quick CLI with an interactive TUI, backed by a single task store that
//! mirrors every change to disk.
//!
//! ## Features
//!
//! *   **Single and Series tasks**: a task is either a plain item or a
//!     series with an ordered subtask checklist.
//! *   **Due-date badges**: tasks show as "Overdue", "Due Soon" (within 2
//!     days) or "Completed" in lists.
//! *   **Dual interface**:
//!     *   **CLI**: scriptable and quick for single commands.
//!     *   **TUI**: interactive list with expandable details, multi-select
//!         deletion behind a confirmation modal, and a step-by-step add
//!         form.
//! *   **Data persistence**: tasks are stored in standard XDG data
//!     directories (JSON format); every mutation rewrites the collection
//!     through a single-writer queue.
//!
//! ## Usage
//!
//! ```bash
//! # Interactive mode (default)
//! taskpad
//!
//! # Add a task
//! taskpad add "Buy milk" --due 2026-09-01 --priority high --category Errands
//!
//! # Add a series with subtasks
//! taskpad add "Plan trip" --subtask "Book flights" --subtask "Pack bags"
//!
//! # List pending tasks (ids can be abbreviated to a unique prefix)
//! taskpad list
//! taskpad complete 3f2a
//! taskpad remove 3f2a
//! ```
//!
//! ## Data storage
//!
//! Tasks are saved in your local data directory:
//! *   Linux: `~/.local/share/taskpad/tasks.json`
//! *   macOS: `~/Library/Application Support/taskpad/tasks.json`
//! *   Windows: `%APPDATA%\taskpad\tasks.json`
//!
//! You can override this by setting the `TASKS_DB` environment variable.
//!
//! The store keeps the whole collection in memory and rewrites the file
//! wholesale after each mutation; writes are serialized through a
//! dedicated writer thread that coalesces rapid successive snapshots, so
//! the newest state always wins. A missing or unparseable file loads as
//! an empty list.

pub mod badge;
pub mod commands;
pub mod models;
pub mod persist;
pub mod storage;
pub mod store;
pub mod tui;
