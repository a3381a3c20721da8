use std::cell::RefCell;
use std::collections::HashSet;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

use taskpad::models::{Priority, SubTask, Task, TaskType};
use taskpad::store::TaskStore;

fn test_slot(test_name: &str) -> PathBuf {
    let mut path = env::temp_dir();
    path.push(format!("taskpad_test_{}.json", test_name));
    if path.exists() {
        fs::remove_file(&path).unwrap();
    }
    path
}

fn task(id: &str, title: &str) -> Task {
    Task {
        id: id.into(),
        title: title.into(),
        description: String::new(),
        due_date: String::new(),
        priority: Priority::Low,
        category: String::new(),
        kind: TaskType::Single,
        completed: false,
        subtasks: None,
    }
}

#[test]
fn test_missing_slot_loads_empty() {
    let path = test_slot("missing_slot");
    let store = TaskStore::load(path);
    assert!(store.tasks().is_empty());
}

#[test]
fn test_malformed_slot_loads_empty() {
    let path = test_slot("malformed_slot");
    fs::write(&path, "{ not valid json ]").unwrap();
    let store = TaskStore::load(path.clone());
    assert!(store.tasks().is_empty());
    fs::remove_file(&path).unwrap();
}

#[test]
fn test_round_trip() {
    let path = test_slot("round_trip");
    {
        let mut store = TaskStore::load(path.clone());
        let mut a = task("1", "Buy milk");
        a.description = "Semi-skimmed".into();
        a.due_date = "2026-09-01".into();
        a.priority = Priority::High;
        a.category = "Errands".into();
        store.add_task(a);
        store.add_task(task("2", "Water plants"));
        store.flush();
    }
    let reloaded = TaskStore::load(path.clone());
    assert_eq!(reloaded.tasks().len(), 2);
    assert_eq!(reloaded.tasks()[0].id, "1");
    assert_eq!(reloaded.tasks()[0].title, "Buy milk");
    assert_eq!(reloaded.tasks()[0].description, "Semi-skimmed");
    assert_eq!(reloaded.tasks()[0].due_date, "2026-09-01");
    assert_eq!(reloaded.tasks()[0].priority, Priority::High);
    assert_eq!(reloaded.tasks()[0].category, "Errands");
    assert_eq!(reloaded.tasks()[1].id, "2");
    fs::remove_file(&path).unwrap();
}

#[test]
fn test_series_subtasks_survive_reload() {
    let path = test_slot("series_round_trip");
    {
        let mut store = TaskStore::load(path.clone());
        let mut t = task("1", "Plan trip");
        t.kind = TaskType::Series;
        t.subtasks = Some(vec![
            SubTask { id: "s1".into(), title: "A".into(), completed: false },
            SubTask { id: "s2".into(), title: "B".into(), completed: false },
        ]);
        store.add_task(t);
        store.flush();
    }
    let reloaded = TaskStore::load(path.clone());
    let t = &reloaded.tasks()[0];
    assert_eq!(t.kind, TaskType::Series);
    let subs = t.subtasks.as_ref().unwrap();
    assert_eq!(subs.len(), 2);
    assert_eq!(subs[0].id, "s1");
    assert_eq!(subs[0].title, "A");
    assert_eq!(subs[1].id, "s2");
    assert_eq!(subs[1].title, "B");
    fs::remove_file(&path).unwrap();
}

#[test]
fn test_single_task_serializes_without_subtasks_field() {
    let path = test_slot("no_subtasks_field");
    {
        let mut store = TaskStore::load(path.clone());
        store.add_task(task("1", "Plain"));
        store.flush();
    }
    let json = fs::read_to_string(&path).unwrap();
    assert!(!json.contains("subtasks"));
    fs::remove_file(&path).unwrap();
}

#[test]
fn test_json_field_names_match_app_shape() {
    let path = test_slot("field_names");
    {
        let mut store = TaskStore::load(path.clone());
        let mut t = task("1", "Shaped");
        t.due_date = "2026-09-01".into();
        store.add_task(t);
        store.flush();
    }
    let json = fs::read_to_string(&path).unwrap();
    assert!(json.contains("\"dueDate\""));
    assert!(!json.contains("due_date"));
    assert!(json.contains("\"type\""));

    let reloaded = TaskStore::load(path.clone());
    assert_eq!(reloaded.tasks()[0].due_date, "2026-09-01");
    fs::remove_file(&path).unwrap();
}

#[test]
fn test_ids_stay_distinct() {
    let path = test_slot("distinct_ids");
    let mut store = TaskStore::load(path.clone());
    for i in 0..20 {
        store.add_task(task(&i.to_string(), "Task"));
    }
    let ids: HashSet<&str> = store.tasks().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids.len(), store.tasks().len());
    drop(store);
    fs::remove_file(&path).unwrap();
}

#[test]
fn test_mutations_on_absent_id_are_noops() {
    let path = test_slot("absent_noop");
    let mut store = TaskStore::load(path.clone());
    store.add_task(task("1", "Only task"));
    let before = store.tasks().to_vec();
    let revision = store.revision();

    store.delete_task("missing");
    store.toggle_complete("missing");
    store.edit_task(task("missing", "Ghost"));

    assert_eq!(store.tasks(), before.as_slice());
    assert_eq!(store.revision(), revision);
    drop(store);
    fs::remove_file(&path).unwrap();
}

#[test]
fn test_toggle_is_an_involution() {
    let path = test_slot("toggle_involution");
    let mut store = TaskStore::load(path.clone());
    store.add_task(task("1", "Flip me"));

    store.toggle_complete("1");
    assert!(store.tasks()[0].completed);
    store.toggle_complete("1");
    assert!(!store.tasks()[0].completed);
    drop(store);
    fs::remove_file(&path).unwrap();
}

#[test]
fn test_edit_replaces_in_place() {
    let path = test_slot("edit_in_place");
    let mut store = TaskStore::load(path.clone());
    store.add_task(task("1", "First"));
    store.add_task(task("2", "Second"));
    store.add_task(task("3", "Third"));

    let mut updated = task("2", "Second, renamed");
    updated.priority = Priority::Medium;
    store.edit_task(updated);

    assert_eq!(store.tasks().len(), 3);
    assert_eq!(store.tasks()[1].id, "2");
    assert_eq!(store.tasks()[1].title, "Second, renamed");
    assert_eq!(store.tasks()[1].priority, Priority::Medium);
    // Neighbors untouched.
    assert_eq!(store.tasks()[0].title, "First");
    assert_eq!(store.tasks()[2].title, "Third");
    drop(store);
    fs::remove_file(&path).unwrap();
}

#[test]
fn test_add_toggle_delete_scenario() {
    let path = test_slot("scenario");
    let mut store = TaskStore::load(path.clone());

    store.add_task(task("1", "Buy milk"));
    assert_eq!(store.tasks().len(), 1);
    assert!(!store.tasks()[0].completed);

    store.toggle_complete("1");
    assert!(store.tasks()[0].completed);

    store.delete_task("1");
    assert!(store.tasks().is_empty());
    drop(store);
    fs::remove_file(&path).unwrap();
}

#[test]
fn test_observers_notified_per_mutation() {
    let path = test_slot("observers");
    let mut store = TaskStore::load(path.clone());
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    store.on_change(move |tasks| sink.borrow_mut().push(tasks.len()));

    store.add_task(task("1", "One"));
    store.add_task(task("2", "Two"));
    store.delete_task("1");
    store.delete_task("not there"); // no-op, no notification

    assert_eq!(*seen.borrow(), vec![1, 2, 1]);
    assert_eq!(store.revision(), 3);
    drop(store);
    fs::remove_file(&path).unwrap();
}

#[test]
fn test_rapid_mutations_persist_latest_state() {
    let path = test_slot("coalesced_writes");
    {
        let mut store = TaskStore::load(path.clone());
        for i in 0..50 {
            store.add_task(task(&i.to_string(), "Burst"));
        }
        store.delete_task("0");
        store.flush();
    }
    let reloaded = TaskStore::load(path.clone());
    assert_eq!(reloaded.tasks().len(), 49);
    assert_eq!(reloaded.tasks()[0].id, "1");
    fs::remove_file(&path).unwrap();
}

#[test]
fn test_drop_flushes_pending_writes() {
    let path = test_slot("drop_flush");
    {
        let mut store = TaskStore::load(path.clone());
        store.add_task(task("1", "Persist me"));
        // No explicit flush; Drop must drain the writer queue.
    }
    let reloaded = TaskStore::load(path.clone());
    assert_eq!(reloaded.tasks().len(), 1);
    fs::remove_file(&path).unwrap();
}
