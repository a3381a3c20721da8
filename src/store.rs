use std::path::PathBuf;

use crate::models::Task;
use crate::persist::Persister;
use crate::storage::{read_slot, slot_path};

/// Observer invoked with the new task sequence after every mutation.
pub type ChangeListener = Box<dyn Fn(&[Task])>;

/// The canonical in-memory task collection plus its durable mirror.
///
/// A store only exists in the ready state: `load` is the sole
/// constructor, so no mutation can be issued before the initial load has
/// completed. The sequence is exclusively owned here; frontends read it
/// through [`tasks`](TaskStore::tasks) and mutate it through the four
/// operations below, each of which queues a whole-collection durability
/// write and notifies observers.
pub struct TaskStore {
    tasks: Vec<Task>,
    persister: Persister,
    listeners: Vec<ChangeListener>,
    revision: u64,
}

impl TaskStore {
    /// Loads the durably persisted collection from `path` and returns a
    /// ready store. A missing or malformed payload yields an empty
    /// collection.
    pub fn load(path: PathBuf) -> TaskStore {
        let tasks = read_slot(&path);
        TaskStore {
            tasks,
            persister: Persister::spawn(path),
            listeners: Vec::new(),
            revision: 0,
        }
    }

    /// Loads from the default slot location (`TASKS_DB` env override,
    /// else the platform data directory).
    pub fn open_default() -> TaskStore {
        TaskStore::load(slot_path())
    }

    /// The live task sequence, in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Bumped once per mutation; lets a frontend cheaply detect that its
    /// view of the sequence is stale.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Registers an observer called with the sequence after each
    /// mutation.
    pub fn on_change(&mut self, listener: impl Fn(&[Task]) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Appends a task to the end of the sequence. The caller is
    /// responsible for id uniqueness and the non-empty-title rule; the
    /// store does not validate.
    pub fn add_task(&mut self, task: Task) {
        self.tasks.push(task);
        self.committed();
    }

    /// Removes the task with the given id. A no-op if absent.
    pub fn delete_task(&mut self, id: &str) {
        let len_before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() != len_before {
            self.committed();
        }
    }

    /// Flips the completed flag of the task with the given id. A no-op
    /// if absent.
    pub fn toggle_complete(&mut self, id: &str) {
        if let Some(t) = self.tasks.iter_mut().find(|t| t.id == id) {
            t.completed = !t.completed;
            self.committed();
        }
    }

    /// Replaces the task whose id equals `task.id`, keeping its position
    /// in the sequence. A no-op if no task with that id exists.
    pub fn edit_task(&mut self, task: Task) {
        if let Some(t) = self.tasks.iter_mut().find(|t| t.id == task.id) {
            *t = task;
            self.committed();
        }
    }

    /// Blocks until all queued durability writes have completed.
    pub fn flush(&self) {
        self.persister.flush();
    }

    fn committed(&mut self) {
        self.revision += 1;
        self.persister.save(self.tasks.clone());
        for listener in &self.listeners {
            listener(&self.tasks);
        }
    }
}
