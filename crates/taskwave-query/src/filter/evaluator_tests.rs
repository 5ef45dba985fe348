//! Tests for the predicate pipeline.

use super::*;
use crate::clock::FixedClock;
use crate::filter::{DateField, DateRange, Selector, SortKey, SortOrder};
use crate::models::{Attachment, Priority};
use chrono::{Duration, NaiveDate, TimeZone};

// ==================== Test Helpers ====================

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap()
}

fn engine() -> FilterEngine<FixedClock> {
    FilterEngine::with_clock(FixedClock::new(now()))
}

fn make_task(id: &str, title: &str) -> Task {
    Task::new(id, title, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn run(tasks: &[Task], criteria: &FilterCriteria) -> Vec<String> {
    engine()
        .apply(tasks, criteria, &FilterContext::new(&[], &[]))
        .into_tasks()
        .into_iter()
        .map(|t| t.id.clone())
        .collect()
}

fn sorted(mut ids: Vec<String>) -> Vec<String> {
    ids.sort();
    ids
}

// ==================== Search ====================

#[test]
fn test_search_matches_title_case_insensitive() {
    let tasks = vec![make_task("1", "Quarterly REPORT"), make_task("2", "Email")];
    let mut criteria = FilterCriteria::new();
    criteria.search = "report".into();

    assert_eq!(run(&tasks, &criteria), vec!["1"]);
}

#[test]
fn test_search_matches_description_and_tags() {
    let mut described = make_task("1", "Call");
    described.description = Some("Discuss the Budget".into());
    let mut tagged = make_task("2", "Plan");
    tagged.tags = vec!["BUDGET-2024".into()];
    let plain = make_task("3", "Lunch");
    let tasks = vec![described, tagged, plain];

    let mut criteria = FilterCriteria::new();
    criteria.search = "budget".into();

    assert_eq!(sorted(run(&tasks, &criteria)), vec!["1", "2"]);
}

#[test]
fn test_search_without_description_uses_title_only() {
    let tasks = vec![make_task("1", "Write")];
    let mut criteria = FilterCriteria::new();
    criteria.search = "notes".into();

    assert!(run(&tasks, &criteria).is_empty());
}

// ==================== Status ====================

fn status_fixture() -> Vec<Task> {
    let mut done = make_task("done", "t");
    done.completed = true;
    done.completed_at = Some(now() - Duration::days(1));
    done.due_date = Some(now() - Duration::days(2));

    let mut late = make_task("late", "t");
    late.due_date = Some(now() - Duration::minutes(1));

    let mut upcoming = make_task("upcoming", "t");
    upcoming.due_date = Some(now() + Duration::days(1));

    let undated = make_task("undated", "t");

    vec![done, late, upcoming, undated]
}

#[test]
fn test_status_completed() {
    let mut criteria = FilterCriteria::new();
    criteria.status = StatusFilter::Completed;
    assert_eq!(run(&status_fixture(), &criteria), vec!["done"]);
}

#[test]
fn test_status_pending() {
    let mut criteria = FilterCriteria::new();
    criteria.status = StatusFilter::Pending;
    assert_eq!(
        sorted(run(&status_fixture(), &criteria)),
        vec!["late", "undated", "upcoming"]
    );
}

#[test]
fn test_status_overdue_requires_past_due_and_pending() {
    let mut criteria = FilterCriteria::new();
    criteria.status = StatusFilter::Overdue;
    assert_eq!(run(&status_fixture(), &criteria), vec!["late"]);
}

#[test]
fn test_status_overdue_due_exactly_now_is_not_overdue() {
    let mut task = make_task("1", "t");
    task.due_date = Some(now());
    let mut criteria = FilterCriteria::new();
    criteria.status = StatusFilter::Overdue;

    assert!(run(&[task], &criteria).is_empty());
}

#[test]
fn test_overdue_follows_the_clock() {
    let mut task = make_task("1", "t");
    task.due_date = Some(now());
    let tasks = vec![task];
    let mut criteria = FilterCriteria::new();
    criteria.status = StatusFilter::Overdue;
    let context = FilterContext::new(&[], &[]);

    let before = FilterEngine::with_clock(FixedClock::new(now() - Duration::seconds(1)));
    let after = FilterEngine::with_clock(FixedClock::new(now() + Duration::seconds(1)));

    assert!(before.apply(&tasks, &criteria, &context).is_empty());
    assert_eq!(after.apply(&tasks, &criteria, &context).len(), 1);
}

// ==================== Priority / Category / Assignee ====================

#[test]
fn test_priority_exact_match_excludes_missing() {
    let mut high = make_task("high", "t");
    high.priority = Some(Priority::High);
    let mut low = make_task("low", "t");
    low.priority = Some(Priority::Low);
    let none = make_task("none", "t");
    let tasks = vec![high, low, none];

    let mut criteria = FilterCriteria::new();
    criteria.priority = Selector::Only(Priority::High);
    assert_eq!(run(&tasks, &criteria), vec!["high"]);

    criteria.priority = Selector::Any;
    assert_eq!(run(&tasks, &criteria).len(), 3);
}

#[test]
fn test_category_exact_match() {
    let mut work = make_task("w", "t");
    work.category_id = Some("work".into());
    let mut personal = make_task("p", "t");
    personal.category_id = Some("personal".into());
    let none = make_task("n", "t");
    let tasks = vec![work, personal, none];

    let mut criteria = FilterCriteria::new();
    criteria.category = Selector::Only("work".into());
    assert_eq!(run(&tasks, &criteria), vec!["w"]);
}

#[test]
fn test_assignee_member_and_unassigned() {
    let mut ada = make_task("ada", "t");
    ada.assigned_to = Some("m1".into());
    let mut bob = make_task("bob", "t");
    bob.assigned_to = Some("m2".into());
    let nobody = make_task("nobody", "t");
    let tasks = vec![ada, bob, nobody];

    let mut criteria = FilterCriteria::new();
    criteria.assignee = AssigneeFilter::Member("m1".into());
    assert_eq!(run(&tasks, &criteria), vec!["ada"]);

    criteria.assignee = AssigneeFilter::Unassigned;
    assert_eq!(run(&tasks, &criteria), vec!["nobody"]);
}

// ==================== Date Range ====================

#[test]
fn test_date_range_both_bounds_inclusive() {
    let mut first = make_task("first", "t");
    first.due_date = Some(Utc.with_ymd_and_hms(2024, 1, 7, 0, 0, 0).unwrap());
    let mut last = make_task("last", "t");
    last.due_date = Some(Utc.with_ymd_and_hms(2024, 1, 13, 23, 0, 0).unwrap());
    let mut outside = make_task("outside", "t");
    outside.due_date = Some(Utc.with_ymd_and_hms(2024, 1, 14, 0, 0, 0).unwrap());
    let undated = make_task("undated", "t");
    let tasks = vec![first, last, outside, undated];

    let mut criteria = FilterCriteria::new();
    criteria.date_range = DateRange::new(Some(date(2024, 1, 7)), Some(date(2024, 1, 13)), DateField::DueDate);

    assert_eq!(sorted(run(&tasks, &criteria)), vec!["first", "last"]);
}

#[test]
fn test_date_range_single_bounds() {
    let mut early = make_task("early", "t");
    early.due_date = Some(Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap());
    let mut late = make_task("late", "t");
    late.due_date = Some(Utc.with_ymd_and_hms(2024, 1, 20, 0, 0, 0).unwrap());
    let tasks = vec![early, late];

    let mut criteria = FilterCriteria::new();
    criteria.date_range.start = Some(date(2024, 1, 10));
    assert_eq!(run(&tasks, &criteria), vec!["late"]);

    criteria.date_range = DateRange::new(None, Some(date(2024, 1, 10)), DateField::DueDate);
    assert_eq!(run(&tasks, &criteria), vec!["early"]);
}

#[test]
fn test_date_range_over_completed_at_excludes_missing() {
    let mut done = make_task("done", "t");
    done.completed = true;
    done.completed_at = Some(Utc.with_ymd_and_hms(2024, 1, 9, 15, 0, 0).unwrap());
    let pending = make_task("pending", "t");
    let tasks = vec![done, pending];

    let mut criteria = FilterCriteria::new();
    criteria.date_range = DateRange::new(Some(date(2024, 1, 9)), None, DateField::CompletedAt);
    assert_eq!(run(&tasks, &criteria), vec!["done"]);
}

#[test]
fn test_date_range_over_created_at() {
    let old = make_task("old", "t");
    let mut new = make_task("new", "t");
    new.created_at = Utc.with_ymd_and_hms(2024, 1, 9, 0, 0, 0).unwrap();
    let tasks = vec![old, new];

    let mut criteria = FilterCriteria::new();
    criteria.date_range = DateRange::new(Some(date(2024, 1, 8)), None, DateField::CreatedAt);
    assert_eq!(run(&tasks, &criteria), vec!["new"]);
}

#[test]
fn test_inactive_date_range_keeps_undated() {
    let tasks = vec![make_task("undated", "t")];
    let mut criteria = FilterCriteria::new();
    criteria.date_range.field = DateField::CompletedAt;
    assert_eq!(run(&tasks, &criteria), vec!["undated"]);
}

// ==================== Tags / Attachments / Sharing ====================

#[test]
fn test_tags_require_all_and_match_exactly() {
    let mut both = make_task("both", "t");
    both.tags = vec!["home".into(), "urgent".into()];
    let mut one = make_task("one", "t");
    one.tags = vec!["home".into()];
    let mut shouting = make_task("shouting", "t");
    shouting.tags = vec!["HOME".into(), "URGENT".into()];
    let tasks = vec![both, one, shouting];

    let mut criteria = FilterCriteria::new();
    criteria.tags = vec!["home".into(), "urgent".into()];
    assert_eq!(run(&tasks, &criteria), vec!["both"]);
}

#[test]
fn test_attachments_flag() {
    let mut with = make_task("with", "t");
    with.attachments = vec![Attachment(serde_json::json!({"name": "a.pdf"}))];
    let without = make_task("without", "t");
    let tasks = vec![with, without];

    let mut criteria = FilterCriteria::new();
    criteria.has_attachments = true;
    assert_eq!(run(&tasks, &criteria), vec!["with"]);
}

#[test]
fn test_shared_flag() {
    let mut shared = make_task("shared", "t");
    shared.shared_with = vec!["u2".into()];
    let private = make_task("private", "t");
    let tasks = vec![shared, private];

    let mut criteria = FilterCriteria::new();
    criteria.is_shared = true;
    assert_eq!(run(&tasks, &criteria), vec!["shared"]);
}

// ==================== Combination, Sorting, Grouping ====================

#[test]
fn test_stages_combine_with_and() {
    let mut hit = make_task("hit", "Fix bug");
    hit.priority = Some(Priority::High);
    hit.tags = vec!["backend".into()];
    let mut wrong_priority = make_task("wrong", "Fix typo");
    wrong_priority.priority = Some(Priority::Low);
    wrong_priority.tags = vec!["backend".into()];
    let tasks = vec![hit, wrong_priority];

    let mut criteria = FilterCriteria::new();
    criteria.search = "fix".into();
    criteria.priority = Selector::Only(Priority::High);
    criteria.tags = vec!["backend".into()];
    criteria.status = StatusFilter::Pending;

    assert_eq!(run(&tasks, &criteria), vec!["hit"]);
}

#[test]
fn test_apply_sorts_by_criteria() {
    let tasks = vec![make_task("b", "beta"), make_task("a", "Alpha"), make_task("c", "gamma")];
    let mut criteria = FilterCriteria::new();
    criteria.sort_by = SortKey::Title;
    criteria.sort_order = SortOrder::Asc;

    assert_eq!(run(&tasks, &criteria), vec!["a", "b", "c"]);
}

#[test]
fn test_apply_groups_when_requested() {
    let mut done = make_task("done", "t");
    done.completed = true;
    let pending = make_task("pending", "t");
    let tasks = vec![done, pending];

    let mut criteria = FilterCriteria::new();
    criteria.group_by = GroupBy::Status;
    let output = engine().apply(&tasks, &criteria, &FilterContext::new(&[], &[]));

    let groups = output.as_groups().expect("grouped output");
    assert!(output.as_list().is_none());
    assert_eq!(groups.labels().collect::<Vec<_>>(), vec!["Completed", "Pending"]);
}

#[test]
fn test_apply_does_not_modify_input() {
    let tasks = vec![make_task("a", "z"), make_task("b", "a")];
    let before = tasks.clone();
    let mut criteria = FilterCriteria::new();
    criteria.sort_by = SortKey::Title;
    criteria.sort_order = SortOrder::Asc;

    let _ = run(&tasks, &criteria);
    assert_eq!(tasks, before);
}

#[test]
fn test_matches_single_task() {
    let mut task = make_task("1", "Report");
    task.priority = Some(Priority::High);

    let mut criteria = FilterCriteria::new();
    assert!(engine().matches(&task, &criteria));

    criteria.priority = Selector::Only(Priority::Low);
    assert!(!engine().matches(&task, &criteria));
}

#[test]
fn test_stage_activity_follows_disabled_values() {
    let criteria = FilterCriteria::new();
    assert!(Stage::ALL.iter().all(|stage| !stage.is_active(&criteria)));

    let mut criteria = FilterCriteria::new();
    criteria.assignee = AssigneeFilter::Unassigned;
    assert!(Stage::Assignee.is_active(&criteria));
}

#[test]
fn test_unfiltered_criteria_keep_every_task() {
    let mut done = make_task("2", "Done");
    done.completed = true;
    let tasks = vec![make_task("1", "Open"), done, make_task("3", "Later")];

    let mut criteria = FilterCriteria::new();
    criteria.sort_by = SortKey::Title;
    criteria.sort_order = SortOrder::Asc;
    assert!(criteria.is_unfiltered(), "sort settings are not filters");
    assert_eq!(run(&tasks, &criteria), vec!["2", "3", "1"]);

    criteria.date_range = DateRange::new(Some(date(2024, 1, 1)), None, DateField::CreatedAt);
    assert!(!criteria.is_unfiltered());
    assert_eq!(run(&tasks, &criteria), vec!["2", "3", "1"]);

    criteria.status = StatusFilter::Pending;
    assert_eq!(run(&tasks, &criteria), vec!["3", "1"]);
}

#[test]
fn test_output_serializes_as_array_or_object() {
    let tasks = vec![make_task("1", "t")];
    let context = FilterContext::new(&[], &[]);

    let list = engine().apply(&tasks, &FilterCriteria::new(), &context);
    assert!(serde_json::to_value(&list).unwrap().is_array());

    let mut criteria = FilterCriteria::new();
    criteria.group_by = GroupBy::Priority;
    let grouped = engine().apply(&tasks, &criteria, &context);
    let json = serde_json::to_value(&grouped).unwrap();
    assert_eq!(json["No Priority"][0]["id"], "1");
}

#[test]
fn test_engine_presets_and_stats_use_clock() {
    let presets = engine().presets();
    let today = presets.iter().find(|p| p.id == "today").unwrap();
    assert_eq!(today.criteria.date_range.start, Some(date(2024, 1, 10)));

    let mut late = make_task("late", "t");
    late.due_date = Some(now() - Duration::hours(1));
    assert_eq!(engine().stats(&[late]).overdue, 1);
}

#[test]
fn test_context_lookups() {
    let categories = vec![crate::models::Category::new("work", "Work", "", "")];
    let members = vec![crate::models::TeamMember::new("m1", "Ada Lovelace")];
    let context = FilterContext::new(&categories, &members);

    assert!(context.find_category_by_id_or_name("WORK").is_some());
    assert!(context.find_category_by_id_or_name("work").is_some());
    assert!(context.find_category_by_id_or_name("home").is_none());
    assert!(context.find_member_by_id_or_name("ada lovelace").is_some());
    assert!(context.find_member("m2").is_none());
}
