use super::*;
use crate::net::types::Speciality;

fn comment(id: &str, parent: Option<&str>, author: &str) -> Comment {
    Comment {
        id: id.to_owned(),
        create_time: "2024-01-01T10:00:00Z".to_owned(),
        modified_date: Some("2024-01-01T10:00:00Z".to_owned()),
        content: format!("text {id}"),
        author_id: format!("{author}-id"),
        author: author.to_owned(),
        parent_id: parent.map(ToOwned::to_owned),
    }
}

fn consultation(comments: Vec<Comment>) -> Consultation {
    Consultation {
        id: "cons-1".to_owned(),
        speciality: Speciality { name: "Хирург".to_owned(), ..Speciality::default() },
        comments,
        ..Consultation::default()
    }
}

fn sample() -> CommentThread {
    CommentThread::new(
        &consultation(vec![
            comment("1", None, "Ann"),
            comment("2", Some("1"), "Bob"),
            comment("3", Some("1"), "Ann"),
            comment("4", Some("2"), "Bob"),
        ]),
        None,
    )
}

fn depths(rows: &[TreeRow]) -> Vec<(&str, usize)> {
    rows.iter().map(|r| (r.id.as_str(), r.depth)).collect()
}

fn expand_all(thread: &CommentThread) -> ExpandedComments {
    let mut expanded = ExpandedComments::default();
    for id in thread.ids() {
        expanded.toggle(id);
    }
    expanded
}

fn doctor(id: &str, name: &str) -> Doctor {
    Doctor { id: id.to_owned(), name: name.to_owned(), ..Doctor::default() }
}

// =============================================================
// Tree reconstruction
// =============================================================

#[test]
fn children_follow_parent_references_in_server_order() {
    let thread = sample();
    assert_eq!(thread.roots(), ["1".to_owned()]);
    assert_eq!(thread.children_of("1"), ["2".to_owned(), "3".to_owned()]);
    assert_eq!(thread.children_of("2"), ["4".to_owned()]);
    assert!(thread.children_of("4").is_empty());
}

#[test]
fn collapsed_tree_shows_roots_only() {
    let thread = sample();
    let rows = thread.visible_rows(&ExpandedComments::default());
    assert_eq!(depths(&rows), vec![("1", 0)]);
    assert!(rows[0].has_children);
    assert!(!rows[0].expanded);
}

#[test]
fn grandchild_appears_only_once_its_parent_is_expanded() {
    let thread = sample();
    let mut expanded = ExpandedComments::default();
    expanded.toggle("1");
    assert_eq!(depths(&thread.visible_rows(&expanded)), vec![("1", 0), ("2", 1), ("3", 1)]);

    expanded.toggle("2");
    assert_eq!(
        depths(&thread.visible_rows(&expanded)),
        vec![("1", 0), ("2", 1), ("4", 2), ("3", 1)]
    );
}

#[test]
fn toggling_twice_restores_the_render() {
    let thread = sample();
    let mut expanded = ExpandedComments::default();
    expanded.toggle("1");
    let before = thread.visible_rows(&expanded);
    expanded.toggle("2");
    expanded.toggle("2");
    assert_eq!(thread.visible_rows(&expanded), before);
}

#[test]
fn expanding_a_leaf_changes_nothing() {
    let thread = sample();
    let mut expanded = ExpandedComments::default();
    expanded.toggle("4");
    assert_eq!(thread.visible_rows(&expanded), thread.visible_rows(&ExpandedComments::default()));
}

#[test]
fn fully_expanded_tree_contains_every_comment_once() {
    let thread = sample();
    let rows = thread.visible_rows(&expand_all(&thread));
    let mut ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec!["1", "2", "3", "4"]);
}

#[test]
fn orphans_are_promoted_to_top_level() {
    let thread = CommentThread::new(
        &consultation(vec![comment("1", None, "Ann"), comment("2", Some("missing"), "Bob")]),
        None,
    );
    assert_eq!(thread.roots(), ["1".to_owned(), "2".to_owned()]);
}

#[test]
fn cycles_render_each_member_once() {
    let thread = CommentThread::new(
        &consultation(vec![
            comment("1", None, "Ann"),
            comment("a", Some("b"), "Bob"),
            comment("b", Some("a"), "Bob"),
            comment("self", Some("self"), "Bob"),
        ]),
        None,
    );
    let rows = thread.visible_rows(&expand_all(&thread));
    let mut ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec!["1", "a", "b", "self"]);
}

#[test]
fn duplicate_ids_keep_the_first_occurrence() {
    let thread = CommentThread::new(
        &consultation(vec![comment("1", None, "Ann"), comment("1", None, "Bob")]),
        None,
    );
    assert_eq!(thread.len(), 1);
    assert_eq!(thread.get("1").map(|e| e.comment.author.as_str()), Some("Ann"));
}

#[test]
fn embedded_root_comment_is_added_and_listed_first() {
    let root = RootComment {
        id: "r".to_owned(),
        content: "root".to_owned(),
        author: doctor("ann-id", "Ann"),
        ..RootComment::default()
    };
    let thread = CommentThread::new(
        &consultation(vec![comment("x", None, "Bob"), comment("2", Some("r"), "Bob")]),
        Some(&root),
    );
    assert_eq!(thread.roots()[0], "r");
    assert_eq!(thread.children_of("r"), ["2".to_owned()]);
    assert_eq!(thread.get("r").map(|e| e.comment.author_id.as_str()), Some("ann-id"));
}

// =============================================================
// Labels and permissions
// =============================================================

#[test]
fn author_label_marks_root_and_root_author_replies() {
    let thread = sample();
    assert_eq!(thread.author_label("1"), AUTHOR_LABEL);
    assert_eq!(thread.author_label("3"), AUTHOR_LABEL);
    assert_eq!(thread.author_label("2"), "Хирург");
}

#[test]
fn only_the_author_can_edit() {
    let thread = sample();
    assert!(thread.can_edit("2", Some("Bob-id")));
    assert!(!thread.can_edit("2", Some("Ann-id")));
    assert!(!thread.can_edit("2", None));
    assert!(!thread.can_edit("missing", Some("Bob-id")));
}

#[test]
fn modified_flag_follows_timestamps() {
    let mut edited = comment("1", None, "Ann");
    edited.modified_date = Some("2024-02-01T00:00:00Z".to_owned());
    let thread = CommentThread::new(&consultation(vec![edited, comment("2", Some("1"), "Bob")]), None);
    assert!(thread.is_modified("1"));
    assert!(!thread.is_modified("2"));
}

// =============================================================
// Replies
// =============================================================

#[test]
fn reply_is_pending_until_confirmed_then_rekeyed() {
    let mut thread = sample();
    let temp = thread.begin_reply("3", " thanks ", &doctor("Bob-id", "Bob"), "now").unwrap();
    assert!(temp.starts_with(TEMP_ID_PREFIX));
    assert!(thread.get(&temp).unwrap().is_pending());
    assert_eq!(thread.children_of("3"), [temp.clone()]);
    assert_eq!(thread.get(&temp).unwrap().comment.content, "thanks");

    thread.confirm_reply(&temp, "srv-9").unwrap();
    assert!(thread.get(&temp).is_none());
    let entry = thread.get("srv-9").unwrap();
    assert_eq!(entry.sync, SyncState::Confirmed);
    assert_eq!(entry.comment.id, "srv-9");
    assert_eq!(thread.children_of("3"), ["srv-9".to_owned()]);
    assert!(thread.ids().any(|id| id == "srv-9"));
}

#[test]
fn rejected_reply_is_removed() {
    let mut thread = sample();
    let before = thread.clone();
    let temp = thread.begin_reply("1", "hi", &doctor("Bob-id", "Bob"), "now").unwrap();
    thread.rollback_reply(&temp);
    assert_eq!(thread, before);
}

#[test]
fn second_reply_to_same_parent_waits_for_the_first() {
    let mut thread = sample();
    let author = doctor("Bob-id", "Bob");
    thread.begin_reply("1", "one", &author, "now").unwrap();
    assert_eq!(thread.begin_reply("1", "two", &author, "now"), Err(ThreadError::ReplyInFlight));
    assert!(thread.begin_reply("2", "other parent", &author, "now").is_ok());
}

#[test]
fn reply_validation_errors() {
    let mut thread = sample();
    let author = doctor("Bob-id", "Bob");
    assert_eq!(thread.begin_reply("1", "   ", &author, "now"), Err(ThreadError::EmptyContent));
    assert_eq!(
        thread.begin_reply("nope", "x", &author, "now"),
        Err(ThreadError::UnknownComment("nope".to_owned()))
    );
    let temp = thread.begin_reply("1", "x", &author, "now").unwrap();
    assert_eq!(thread.begin_reply(&temp, "y", &author, "now"), Err(ThreadError::ParentNotSaved));
}

#[test]
fn forbidden_reply_names_the_speciality() {
    let thread = sample();
    assert_eq!(
        thread.reply_failure_message(&ApiError::Forbidden),
        "Только Хирург может писать комментарии"
    );
    assert_eq!(thread.reply_failure_message(&ApiError::Status(500)), "Не удалось отправить ответ");
}

// =============================================================
// Edits
// =============================================================

#[test]
fn confirmed_edit_keeps_new_content() {
    let mut thread = sample();
    thread.begin_edit("2", "fixed", Some("Bob-id"), "later").unwrap();
    let entry = thread.get("2").unwrap();
    assert!(entry.is_pending());
    assert_eq!(entry.comment.content, "fixed");

    thread.confirm_edit("2");
    let entry = thread.get("2").unwrap();
    assert_eq!(entry.sync, SyncState::Confirmed);
    assert_eq!(entry.comment.modified_date.as_deref(), Some("later"));
    assert!(thread.is_modified("2"));
}

#[test]
fn failed_edit_restores_previous_content() {
    let mut thread = sample();
    let before = thread.clone();
    thread.begin_edit("2", "fixed", Some("Bob-id"), "later").unwrap();
    thread.rollback_edit("2");
    assert_eq!(thread, before);
}

#[test]
fn edit_rules() {
    let mut thread = sample();
    assert_eq!(thread.begin_edit("2", "x", Some("Ann-id"), "t"), Err(ThreadError::NotAuthor));
    assert_eq!(thread.begin_edit("2", "", Some("Bob-id"), "t"), Err(ThreadError::EmptyContent));
    thread.begin_edit("2", "x", Some("Bob-id"), "t").unwrap();
    assert_eq!(thread.begin_edit("2", "y", Some("Bob-id"), "t"), Err(ThreadError::EditInFlight));
}
