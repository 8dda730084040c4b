use daybook_core::command::{
    FEEDBACK_DUPLICATE_RECORD, FEEDBACK_EXIT, FEEDBACK_INDEX_OUT_OF_RANGE,
    FEEDBACK_SORTED_DESCENDING,
};
use daybook_core::{parse_command, Command, Day, Record, RecordStore};

fn store_with_names(names: &[&str]) -> RecordStore {
    RecordStore::from_records(names.iter().map(|name| Record::contact(*name)).collect())
}

fn names(store: &RecordStore) -> Vec<&str> {
    store
        .records()
        .iter()
        .map(|record| record.name.as_str())
        .collect()
}

fn run(input: &str, store: &mut RecordStore) -> daybook_core::CommandResult {
    parse_command(input).execute(store)
}

#[test]
fn add_appends_and_echoes_the_new_record() {
    let mut store = store_with_names(&["Alice"]);
    let result = run("add Charlie", &mut store);

    assert_eq!(names(&store), ["Alice", "Charlie"]);
    let echoed = result.records.expect("add should echo the record");
    assert_eq!(echoed.len(), 1);
    assert_eq!(echoed[0].name, "Charlie");
}

#[test]
fn add_rejects_a_second_identical_record() {
    let mut store = RecordStore::new();
    run("add Alice p/91234567", &mut store);
    let result = run("add Alice p/91234567", &mut store);

    assert_eq!(store.len(), 1);
    assert_eq!(result.feedback, FEEDBACK_DUPLICATE_RECORD);
}

#[test]
fn add_allows_same_name_with_different_fields() {
    let mut store = RecordStore::new();
    run("add Alice p/91234567", &mut store);
    run("add Alice p/87654321", &mut store);
    assert_eq!(store.len(), 2);
}

#[test]
fn delete_out_of_range_leaves_store_unchanged() {
    let mut store = store_with_names(&["Alice", "Bob"]);
    let result = run("delete 5", &mut store);

    assert_eq!(store.len(), 2);
    assert_eq!(result.feedback, FEEDBACK_INDEX_OUT_OF_RANGE);
}

#[test]
fn delete_removes_the_record_at_the_display_index() {
    let mut store = store_with_names(&["Alice", "Bob", "Carol"]);
    let result = run("delete 2", &mut store);

    assert_eq!(names(&store), ["Alice", "Carol"]);
    assert_eq!(result.records.unwrap()[0].name, "Bob");
}

#[test]
fn sort_desc_reverses_alphabetical_order_and_reports_it() {
    let mut store = store_with_names(&["Alice", "Bob"]);
    let result = run("sort desc", &mut store);

    assert_eq!(names(&store), ["Bob", "Alice"]);
    assert_eq!(result.feedback, FEEDBACK_SORTED_DESCENDING);
}

#[test]
fn sort_ascending_is_idempotent() {
    let mut store = store_with_names(&["carol", "Alice", "bob"]);
    run("sort asc", &mut store);
    let once = store.clone();
    run("sort asc", &mut store);
    assert_eq!(store, once);
}

#[test]
fn sort_descending_is_the_exact_reverse_of_ascending() {
    let mut ascending = store_with_names(&["carol", "Alice", "bob", "dave"]);
    run("sort asc", &mut ascending);

    let mut descending = ascending.clone();
    run("sort desc", &mut descending);

    let mut reversed: Vec<_> = ascending.records().to_vec();
    reversed.reverse();
    assert_eq!(descending.records(), reversed);
}

#[test]
fn edit_replaces_fields_and_keeps_position() {
    let mut store = store_with_names(&["Alice", "Bob"]);
    let result = run("edit 2 p/98765432 t/friend", &mut store);

    assert_eq!(store.records()[1].name, "Bob");
    assert_eq!(store.records()[1].phone.as_deref(), Some("98765432"));
    assert_eq!(store.records()[1].tags, vec!["friend"]);
    assert_eq!(result.records.unwrap()[0].phone.as_deref(), Some("98765432"));
}

#[test]
fn edit_into_a_duplicate_of_another_record_is_rejected() {
    let mut store = store_with_names(&["Alice", "Bob"]);
    let result = run("edit 2 n/Alice", &mut store);

    assert_eq!(names(&store), ["Alice", "Bob"]);
    assert_eq!(result.feedback, FEEDBACK_DUPLICATE_RECORD);
}

#[test]
fn edit_out_of_range_reports_and_leaves_store_unchanged() {
    let mut store = store_with_names(&["Alice"]);
    let result = run("edit 3 p/91234567", &mut store);

    assert_eq!(names(&store), ["Alice"]);
    assert_eq!(result.feedback, FEEDBACK_INDEX_OUT_OF_RANGE);
}

#[test]
fn edit_adding_a_day_turns_a_contact_into_an_appointment() {
    let mut store = store_with_names(&["Dentist"]);
    run("edit 1 d/fri s/09:30", &mut store);

    let record = &store.records()[0];
    assert_eq!(record.day, Some(Day::Friday));
    assert_eq!(record.slot.as_deref(), Some("09:30"));
    assert_eq!(record.kind, daybook_core::RecordKind::Appointment);
}

#[test]
fn find_matches_all_keywords_case_insensitively_in_store_order() {
    let mut store = RecordStore::new();
    run("add Alice Tan a/Clementi Road t/friend", &mut store);
    run("add Bob Lee a/Clementi Road", &mut store);
    run("add Carol a/Jurong West", &mut store);

    let result = run("find CLEMENTI road", &mut store);
    let found = result.records.unwrap();
    assert_eq!(found.len(), 2);
    assert_eq!(found[0].name, "Alice Tan");
    assert_eq!(found[1].name, "Bob Lee");
    assert!(result.feedback.contains("2 record(s)"));
}

#[test]
fn find_is_read_only() {
    let mut store = store_with_names(&["Alice", "Bob"]);
    let before = store.clone();
    run("find alice", &mut store);
    assert_eq!(store, before);
}

#[test]
fn list_returns_everything_or_a_day_filtered_view() {
    let mut store = RecordStore::new();
    run("add Standup d/mon s/09:00", &mut store);
    run("add Retro d/fri s/16:00", &mut store);
    run("add Alice p/91234567", &mut store);

    let all = run("list", &mut store);
    assert_eq!(all.records.unwrap().len(), 3);

    let mondays = run("list mon", &mut store);
    let mondays = mondays.records.unwrap();
    assert_eq!(mondays.len(), 1);
    assert_eq!(mondays[0].name, "Standup");
}

#[test]
fn clear_empties_the_store() {
    let mut store = store_with_names(&["Alice", "Bob"]);
    run("clear", &mut store);
    assert!(store.is_empty());
}

#[test]
fn help_lists_every_command_word() {
    let mut store = RecordStore::new();
    let result = run("help", &mut store);
    for word in ["add", "delete", "edit", "find", "list", "sort", "clear", "help", "exit"] {
        assert!(result.feedback.contains(word), "missing `{word}`");
    }
}

#[test]
fn exit_reports_farewell_and_signals_termination() {
    let command = parse_command("exit");
    assert!(command.is_exit());
    assert!(!command.mutates_store());

    let mut store = RecordStore::new();
    assert_eq!(command.execute(&mut store).feedback, FEEDBACK_EXIT);
}

#[test]
fn incorrect_is_a_read_only_echo_of_its_feedback() {
    let mut store = store_with_names(&["Alice"]);
    let before = store.clone();
    let command = Command::Incorrect {
        feedback: "nope".to_string(),
    };
    assert!(!command.mutates_store());
    assert_eq!(command.execute(&mut store).feedback, "nope");
    assert_eq!(store, before);
}

#[test]
fn only_state_changing_commands_report_store_mutation() {
    for (input, mutates) in [
        ("add Alice", true),
        ("delete 1", true),
        ("edit 1 p/91234567", true),
        ("sort", true),
        ("clear", true),
        ("find alice", false),
        ("list", false),
        ("help", false),
        ("exit", false),
    ] {
        assert_eq!(parse_command(input).mutates_store(), mutates, "input `{input}`");
    }
}
