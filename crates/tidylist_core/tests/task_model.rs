use tidylist_core::{normalize_text, Task, TaskIdGen, TaskList, MAX_TASK_TEXT_CHARS};

#[test]
fn task_new_sets_defaults() {
    let task = Task::new(42, "water the plants");

    assert_eq!(task.id, 42);
    assert_eq!(task.text, "water the plants");
    assert!(!task.completed);
}

#[test]
fn task_serialization_uses_expected_wire_fields() {
    let mut task = Task::new(1_700_000_000_000, "ship the release");
    task.completed = true;

    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(json["id"], 1_700_000_000_000_i64);
    assert_eq!(json["text"], "ship the release");
    assert_eq!(json["completed"], true);

    let decoded: Task = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, task);
}

#[test]
fn normalize_text_trims_surrounding_whitespace() {
    assert_eq!(normalize_text("  buy milk \t"), Some("buy milk".to_string()));
}

#[test]
fn normalize_text_rejects_whitespace_only_input() {
    assert_eq!(normalize_text(""), None);
    assert_eq!(normalize_text("   "), None);
    assert_eq!(normalize_text("\t\n"), None);
}

#[test]
fn normalize_text_caps_length_in_characters() {
    let long = "x".repeat(MAX_TASK_TEXT_CHARS + 40);
    let capped = normalize_text(&long).unwrap();
    assert_eq!(capped.chars().count(), MAX_TASK_TEXT_CHARS);

    let multibyte = "é".repeat(MAX_TASK_TEXT_CHARS + 40);
    let capped_multibyte = normalize_text(&multibyte).unwrap();
    assert_eq!(capped_multibyte.chars().count(), MAX_TASK_TEXT_CHARS);
}

#[test]
fn id_gen_issues_distinct_increasing_ids_under_rapid_calls() {
    let mut ids = TaskIdGen::new();
    let mut issued = Vec::new();
    for _ in 0..50 {
        issued.push(ids.next());
    }

    for pair in issued.windows(2) {
        assert!(pair[0] < pair[1], "ids must be strictly increasing");
    }
}

#[test]
fn id_gen_seeded_issues_above_existing_ids() {
    let far_future = i64::MAX - 1_000;
    let mut ids = TaskIdGen::seeded(far_future);

    assert!(ids.next() > far_future);
}

#[test]
fn with_added_prepends_newest_first() {
    let list = TaskList::new()
        .with_added(Task::new(1, "oldest"))
        .with_added(Task::new(2, "newest"));

    assert_eq!(list.len(), 2);
    assert_eq!(list.tasks()[0].id, 2);
    assert_eq!(list.tasks()[1].id, 1);
}

#[test]
fn with_added_rejects_duplicate_id() {
    let list = TaskList::new().with_added(Task::new(1, "first"));
    let same = list.with_added(Task::new(1, "imposter"));

    assert_eq!(same, list);
}

#[test]
fn double_toggle_is_identity() {
    let list = TaskList::new()
        .with_added(Task::new(1, "a"))
        .with_added(Task::new(2, "b"));

    assert_eq!(list.with_toggled(1).with_toggled(1), list);
}

#[test]
fn transforms_on_unknown_id_return_unchanged_list() {
    let list = TaskList::new().with_added(Task::new(1, "a"));

    assert_eq!(list.with_toggled(99), list);
    assert_eq!(list.without(99), list);
    assert_eq!(list.with_text(99, "ghost"), list);
}

#[test]
fn remaining_count_ignores_completed_tasks() {
    let list = TaskList::new()
        .with_added(Task::new(1, "a"))
        .with_added(Task::new(2, "b"))
        .with_toggled(1);

    assert_eq!(list.len(), 2);
    assert_eq!(list.remaining_count(), 1);
}

#[test]
fn from_tasks_keeps_first_occurrence_of_duplicate_ids() {
    let list = TaskList::from_tasks(vec![
        Task::new(1, "keep me"),
        Task::new(2, "other"),
        Task::new(1, "drop me"),
    ]);

    assert_eq!(list.len(), 2);
    assert_eq!(list.get(1).unwrap().text, "keep me");
}

#[test]
fn max_id_reports_largest_id() {
    assert_eq!(TaskList::new().max_id(), None);

    let list = TaskList::new()
        .with_added(Task::new(7, "a"))
        .with_added(Task::new(3, "b"));
    assert_eq!(list.max_id(), Some(7));
}
