use std::io::{self, Write};

use chrono::Local;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use crate::badge::{badge_for, Badge};
use crate::models::{new_id, Priority, SubTask, Task, TaskType};
use crate::storage::{delete_slot, slot_path};
use crate::store::TaskStore;

/// Resolves a user-supplied id, accepting any unique prefix of a full
/// task id.
///
/// Returns `None` (with a message unless silent) when nothing matches or
/// the prefix is ambiguous.
fn resolve_id(store: &TaskStore, id: &str, silent: bool) -> Option<String> {
    if store.get(id).is_some() {
        return Some(id.to_string());
    }
    let matches: Vec<&Task> = store
        .tasks()
        .iter()
        .filter(|t| t.id.starts_with(id))
        .collect();
    match matches.len() {
        0 => {
            if !silent {
                eprintln!("Task '{}' not found.", id);
            }
            None
        }
        1 => Some(matches[0].id.clone()),
        n => {
            if !silent {
                eprintln!("Id '{}' is ambiguous ({} matches).", id, n);
            }
            None
        }
    }
}

/// Adds a new task.
///
/// The non-empty-title rule is enforced here, at the creation boundary;
/// the store accepts whatever it is handed. Any `--subtask` value (or
/// the `--series` flag) turns the task into a Series with the given
/// subtasks in order.
pub fn cmd_add(
    store: &mut TaskStore,
    title: String,
    description: Option<String>,
    due: Option<String>,
    priority: Option<String>,
    category: Option<String>,
    subtask_titles: Vec<String>,
    series: bool,
    silent: bool,
) {
    if title.trim().is_empty() {
        if !silent {
            eprintln!("Task title must not be empty.");
        }
        return;
    }
    let priority = match priority {
        Some(p) => match Priority::parse(&p) {
            Some(p) => p,
            None => {
                if !silent {
                    eprintln!("Invalid priority '{}'. Use low, medium or high.", p);
                }
                return;
            }
        },
        None => Priority::Low,
    };

    let is_series = series || !subtask_titles.is_empty();
    let subtasks = if is_series {
        Some(
            subtask_titles
                .into_iter()
                .filter(|t| !t.trim().is_empty())
                .map(|title| SubTask {
                    id: new_id(),
                    title,
                    completed: false,
                })
                .collect::<Vec<_>>(),
        )
    } else {
        None
    };

    let task = Task {
        id: new_id(),
        title,
        description: description.unwrap_or_default(),
        due_date: due.unwrap_or_default(),
        priority,
        category: category.unwrap_or_default(),
        kind: if is_series { TaskType::Series } else { TaskType::Single },
        completed: false,
        subtasks,
    };
    let id = task.id.clone();
    store.add_task(task);
    if !silent {
        println!("Task added (id = {})", short(&id));
    }
}

/// Toggles a task's completed flag.
pub fn cmd_complete(store: &mut TaskStore, id: &str, silent: bool) {
    let Some(id) = resolve_id(store, id, silent) else { return };
    store.toggle_complete(&id);
    if !silent {
        match store.get(&id) {
            Some(t) if t.completed => println!("Task {} marked as complete.", short(&id)),
            _ => println!("Task {} marked as pending.", short(&id)),
        }
    }
}

/// Removes a task.
pub fn cmd_remove(store: &mut TaskStore, id: &str, silent: bool) {
    let Some(id) = resolve_id(store, id, silent) else { return };
    store.delete_task(&id);
    if !silent {
        println!("Task {} removed.", short(&id));
    }
}

/// Edits an existing task's fields, replacing the record in place.
pub fn cmd_edit(
    store: &mut TaskStore,
    id: &str,
    title: Option<String>,
    description: Option<String>,
    due: Option<String>,
    priority: Option<String>,
    category: Option<String>,
    silent: bool,
) {
    let Some(id) = resolve_id(store, id, silent) else { return };
    let mut task = match store.get(&id) {
        Some(t) => t.clone(),
        None => return,
    };
    if let Some(t) = title {
        if t.trim().is_empty() {
            if !silent {
                eprintln!("Task title must not be empty.");
            }
            return;
        }
        task.title = t;
    }
    if let Some(d) = description {
        task.description = d;
    }
    if let Some(d) = due {
        task.due_date = d;
    }
    if let Some(p) = priority {
        match Priority::parse(&p) {
            Some(p) => task.priority = p,
            None => {
                if !silent {
                    eprintln!("Invalid priority '{}'. Use low, medium or high.", p);
                }
                return;
            }
        }
    }
    if let Some(c) = category {
        task.category = c;
    }
    store.edit_task(task);
    if !silent {
        println!("Task {} updated.", short(&id));
    }
}

/// Lists tasks in a formatted table, in insertion order.
///
/// Hides completed tasks unless `all` is true. Series tasks get their
/// subtasks as indented rows beneath them.
pub fn cmd_list(store: &TaskStore, all: bool) {
    let tasks: Vec<&Task> = store
        .tasks()
        .iter()
        .filter(|t| all || !t.completed)
        .collect();
    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("ID").add_attribute(Attribute::Bold),
            Cell::new("Title").add_attribute(Attribute::Bold),
            Cell::new("Category").add_attribute(Attribute::Bold),
            Cell::new("Priority").add_attribute(Attribute::Bold),
            Cell::new("Due").add_attribute(Attribute::Bold),
            Cell::new("Status").add_attribute(Attribute::Bold),
        ]);

    let now = Local::now().naive_local();
    for t in tasks {
        let badge = badge_for(t, now);
        let (status, color) = match badge {
            Some(Badge::Completed) => ("Completed", Color::Green),
            Some(Badge::Overdue) => ("Overdue", Color::Red),
            Some(Badge::DueSoon) => ("Due Soon", Color::Yellow),
            None => ("Pending", Color::Reset),
        };
        table.add_row(vec![
            Cell::new(short(&t.id)),
            Cell::new(&t.title),
            Cell::new(&t.category),
            Cell::new(t.priority.as_str()),
            Cell::new(&t.due_date),
            Cell::new(status).fg(color),
        ]);
        if let Some(subs) = &t.subtasks {
            for sub in subs {
                let mark = if sub.completed { "[x]" } else { "[ ]" };
                table.add_row(vec![
                    Cell::new(""),
                    Cell::new(format!("  • {}", sub.title)).fg(Color::Grey),
                    Cell::new(""),
                    Cell::new(""),
                    Cell::new(""),
                    Cell::new(mark).fg(Color::Grey),
                ]);
            }
        }
    }

    println!("{table}");
}

/// Prints the full detail of one task, including its subtask checklist.
pub fn cmd_show(store: &TaskStore, id: &str) {
    let Some(id) = resolve_id(store, id, false) else { return };
    let Some(t) = store.get(&id) else { return };
    println!("Id:          {}", t.id);
    println!("Title:       {}", t.title);
    println!(
        "Description: {}",
        if t.description.is_empty() { "None" } else { &t.description }
    );
    println!(
        "Due Date:    {}",
        if t.due_date.is_empty() { "None" } else { &t.due_date }
    );
    println!("Priority:    {}", t.priority.as_str());
    println!(
        "Category:    {}",
        if t.category.is_empty() { "None" } else { &t.category }
    );
    println!("Type:        {:?}", t.kind);
    println!("Completed:   {}", if t.completed { "Yes" } else { "No" });
    if let Some(subs) = &t.subtasks {
        println!("Subtasks:");
        for sub in subs {
            println!("  [{}] {}", if sub.completed { "x" } else { " " }, sub.title);
        }
    }
}

/// Deletes the whole task collection after confirmation.
pub fn cmd_reset(force: bool) {
    if !force {
        print!("Are you sure you want to delete all tasks? This cannot be undone. [y/N] ");
        let _ = io::stdout().flush();
        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_err() {
            return;
        }
        if input.trim().to_lowercase() != "y" {
            println!("Aborted.");
            return;
        }
    }

    if let Err(e) = delete_slot(&slot_path()) {
        eprintln!("Failed to reset tasks: {}", e);
    } else {
        println!("All tasks deleted.");
    }
}

/// Leading 8 bytes of an id, enough to disambiguate in practice. Ids
/// are opaque strings, so fall back to the full id when byte 8 is not a
/// character boundary.
fn short(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}
