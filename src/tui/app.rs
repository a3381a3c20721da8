use std::collections::HashSet;

use ratatui::widgets::TableState;

use crate::models::{new_id, Priority, SubTask, Task, TaskType};
use crate::store::TaskStore;

#[derive(PartialEq)]
pub enum InputMode {
    Normal,
    /// Multi-step add form is open.
    Adding,
    /// Delete confirmation modal is open.
    Confirming,
}

/// One renderable row of the task list.
pub enum DisplayItem {
    Task(Task),
    /// Indented detail or subtask line under an expanded task.
    Line(String),
}

/// State for the multi-step "Add Task" form.
///
/// Steps: 0 Title, 1 Description, 2 Due, 3 Priority, 4 Category,
/// 5 Type; Series tasks then loop on step 6 collecting subtask titles
/// until an empty entry submits the form.
#[derive(Default)]
pub struct AddState {
    pub title: String,
    pub description: String,
    pub due: String,
    pub priority: Priority,
    pub category: String,
    pub series: bool,
    pub subtasks: Vec<String>,
    pub step: usize,
}

pub struct App {
    pub store: TaskStore,
    pub display_items: Vec<DisplayItem>,
    pub state: TableState,
    pub input_mode: InputMode,
    pub input_buffer: String,
    pub add_state: AddState,
    pub show_completed: bool,
    /// Multi-select mode, the TUI stand-in for the app's long-press.
    pub selection_mode: bool,
    pub selected_ids: HashSet<String>,
    pub expanded: HashSet<String>,
    /// Ids queued for deletion while the confirm modal is open.
    pub pending_delete: Vec<String>,
}

impl App {
    pub fn new(store: TaskStore) -> App {
        let mut app = App {
            store,
            display_items: Vec::new(),
            state: TableState::default(),
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            add_state: AddState::default(),
            show_completed: true,
            selection_mode: false,
            selected_ids: HashSet::new(),
            expanded: HashSet::new(),
            pending_delete: Vec::new(),
        };
        app.refresh();
        app
    }

    /// Rebuilds the display list from the store and clamps the
    /// selection.
    pub fn refresh(&mut self) {
        self.display_items.clear();
        let tasks: Vec<Task> = self
            .store
            .tasks()
            .iter()
            .filter(|t| self.show_completed || !t.completed)
            .cloned()
            .collect();
        for t in tasks {
            let expanded = self.expanded.contains(&t.id);
            self.display_items.push(DisplayItem::Task(t.clone()));
            if expanded {
                self.push_details(t);
            }
        }

        if self.display_items.is_empty() {
            self.state.select(None);
        } else if let Some(i) = self.state.selected() {
            if i >= self.display_items.len() {
                self.state.select(Some(self.display_items.len() - 1));
            }
        } else {
            self.state.select(Some(0));
        }
    }

    fn push_details(&mut self, t: Task) {
        let none_if_empty = |s: &str| {
            if s.is_empty() {
                "None".to_string()
            } else {
                s.to_string()
            }
        };
        self.display_items
            .push(DisplayItem::Line(format!("  Description: {}", none_if_empty(&t.description))));
        self.display_items
            .push(DisplayItem::Line(format!("  Due Date: {}", none_if_empty(&t.due_date))));
        self.display_items
            .push(DisplayItem::Line(format!("  Category: {}", none_if_empty(&t.category))));
        self.display_items
            .push(DisplayItem::Line(format!("  Priority: {}", t.priority.as_str())));
        if let Some(subs) = &t.subtasks {
            self.display_items.push(DisplayItem::Line("  Subtasks:".to_string()));
            for sub in subs {
                let mark = if sub.completed { "✓" } else { " " };
                self.display_items
                    .push(DisplayItem::Line(format!("    • {} [{}]", sub.title, mark)));
            }
        }
    }

    /// Selects the next row.
    pub fn next(&mut self) {
        if self.display_items.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i >= self.display_items.len() - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    /// Selects the previous row.
    pub fn previous(&mut self) {
        if self.display_items.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i == 0 {
                    self.display_items.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    fn selected_task_id(&self) -> Option<String> {
        let i = self.state.selected()?;
        match self.display_items.get(i) {
            Some(DisplayItem::Task(t)) => Some(t.id.clone()),
            _ => None,
        }
    }

    /// Space: toggles completion, or membership while selecting.
    pub fn toggle_selected(&mut self) {
        let Some(id) = self.selected_task_id() else { return };
        if self.selection_mode {
            if !self.selected_ids.remove(&id) {
                self.selected_ids.insert(id);
            }
        } else {
            self.store.toggle_complete(&id);
        }
        self.refresh();
    }

    /// Expands or collapses the selected task's detail rows.
    pub fn toggle_expand(&mut self) {
        let Some(id) = self.selected_task_id() else { return };
        if !self.expanded.remove(&id) {
            self.expanded.insert(id);
        }
        self.refresh();
    }

    /// Enters selection mode with the current task selected.
    pub fn enter_selection_mode(&mut self) {
        let Some(id) = self.selected_task_id() else { return };
        self.selection_mode = true;
        self.selected_ids.clear();
        self.selected_ids.insert(id);
    }

    pub fn exit_selection_mode(&mut self) {
        self.selection_mode = false;
        self.selected_ids.clear();
    }

    /// Opens the confirm modal for the selected task(s).
    pub fn request_delete(&mut self) {
        self.pending_delete.clear();
        if self.selection_mode {
            if self.selected_ids.is_empty() {
                return;
            }
            // Keep sequence order for deterministic deletion.
            for t in self.store.tasks() {
                if self.selected_ids.contains(&t.id) {
                    self.pending_delete.push(t.id.clone());
                }
            }
        } else if let Some(id) = self.selected_task_id() {
            self.pending_delete.push(id);
        } else {
            return;
        }
        self.input_mode = InputMode::Confirming;
    }

    pub fn confirm_delete(&mut self) {
        for id in std::mem::take(&mut self.pending_delete) {
            self.store.delete_task(&id);
        }
        self.exit_selection_mode();
        self.input_mode = InputMode::Normal;
        self.refresh();
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete.clear();
        self.input_mode = InputMode::Normal;
    }

    pub fn toggle_show_completed(&mut self) {
        self.show_completed = !self.show_completed;
        self.refresh();
    }

    /// Opens the "Add Task" form.
    pub fn start_add(&mut self) {
        self.input_mode = InputMode::Adding;
        self.add_state = AddState::default();
        self.input_buffer.clear();
    }

    /// Advances the add form by one step with the current input buffer.
    pub fn handle_add_input(&mut self) {
        match self.add_state.step {
            0 => {
                // Title is the one required field.
                if !self.input_buffer.trim().is_empty() {
                    self.add_state.title = self.input_buffer.clone();
                    self.advance();
                }
            }
            1 => {
                self.add_state.description = self.input_buffer.clone();
                self.advance();
            }
            2 => {
                self.add_state.due = self.input_buffer.clone();
                self.advance();
            }
            3 => {
                if self.input_buffer.is_empty() {
                    self.advance();
                } else if let Some(p) = Priority::parse(&self.input_buffer) {
                    self.add_state.priority = p;
                    self.advance();
                }
                // Unrecognized priority: stay on this step.
            }
            4 => {
                self.add_state.category = self.input_buffer.clone();
                self.advance();
            }
            5 => {
                let answer = self.input_buffer.trim().to_lowercase();
                self.add_state.series = answer == "series" || answer == "s";
                if self.add_state.series {
                    self.advance();
                } else {
                    self.submit_add();
                }
            }
            _ => {
                // Subtask loop: empty entry submits the form.
                if self.input_buffer.trim().is_empty() {
                    self.submit_add();
                } else {
                    self.add_state.subtasks.push(self.input_buffer.clone());
                    self.input_buffer.clear();
                }
            }
        }
    }

    fn advance(&mut self) {
        self.add_state.step += 1;
        self.input_buffer.clear();
    }

    fn submit_add(&mut self) {
        let add = std::mem::take(&mut self.add_state);
        let subtasks = if add.series {
            Some(
                add.subtasks
                    .into_iter()
                    .map(|title| SubTask {
                        id: new_id(),
                        title,
                        completed: false,
                    })
                    .collect(),
            )
        } else {
            None
        };
        self.store.add_task(Task {
            id: new_id(),
            title: add.title,
            description: add.description,
            due_date: add.due,
            priority: add.priority,
            category: add.category,
            kind: if add.series { TaskType::Series } else { TaskType::Single },
            completed: false,
            subtasks,
        });
        self.input_mode = InputMode::Normal;
        self.input_buffer.clear();
        self.refresh();
    }

    pub fn cancel_input(&mut self) {
        self.input_mode = InputMode::Normal;
        self.input_buffer.clear();
    }
}
