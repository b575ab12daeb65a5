use cucumber::gherkin::Step;
use cucumber::then;

use assign_lib::assignment_service::{ChangeKind, UnassignOutcome};
use assign_lib::entities::{Edge, UserId};
use assign_lib::errors_service::AssignServiceError;

use crate::support::world::{parse_ids, TestWorld};

#[then("the server received these calls:")]
pub async fn server_received_calls(world: &mut TestWorld, step: &Step) {
    let table = step.table.as_ref().expect("calls table is required");
    let expected: Vec<(ChangeKind, UserId, UserId)> = table
        .rows
        .iter()
        .skip(1)
        .map(|row| {
            let kind = match row[0].as_str() {
                "assign" => ChangeKind::Assign,
                "unassign" => ChangeKind::Unassign,
                other => panic!("unknown action {other}"),
            };
            (kind, row[1].parse().unwrap(), row[2].parse().unwrap())
        })
        .collect();

    let actual: Vec<(ChangeKind, UserId, UserId)> = world
        .api
        .mutations()
        .into_iter()
        .map(|(kind, edge)| (kind, edge.boss_id, edge.child_id))
        .collect();

    assert_eq!(actual, expected);
}

#[then("the server received no changes")]
pub async fn server_received_nothing(world: &mut TestWorld) {
    assert_eq!(world.api.mutations(), Vec::<(ChangeKind, Edge)>::new());
}

#[then(expr = "boss {int} should have children {string}")]
pub async fn boss_should_have_children(world: &mut TestWorld, boss_id: UserId, children: String) {
    let relation = world.relation_of(boss_id);
    let mut actual = world.api.children_of(relation, boss_id);
    let mut expected = parse_ids(&children);
    actual.sort_unstable();
    expected.sort_unstable();
    assert_eq!(actual, expected);
}

#[then(expr = "the notice should be {string}")]
pub async fn notice_should_be(world: &mut TestWorld, message: String) {
    let last = world
        .session
        .notices()
        .last()
        .map(|n| n.message.clone());
    assert_eq!(last.as_deref(), Some(message.as_str()));
}

#[then("the save should be rejected as an invalid assignment")]
pub async fn save_rejected_invalid(world: &mut TestWorld) {
    assert!(world.report.is_none());
    assert!(
        matches!(world.error, Some(AssignServiceError::InvalidEdge { .. })),
        "unexpected error: {:?}",
        world.error
    );
}

#[then("the save should be rejected as empty")]
pub async fn save_rejected_empty(world: &mut TestWorld) {
    assert!(world.report.is_none());
    assert!(matches!(world.error, Some(AssignServiceError::NothingSelected)));
}

/// Reads the visible checklist as `name` / `[x] name` entries joined by `, `.
#[then(expr = "the checklist should read {string}")]
pub async fn checklist_should_read(world: &mut TestWorld, expected: String) {
    let actual = world
        .session
        .checklist()
        .rows()
        .iter()
        .map(|row| {
            if row.checked {
                format!("[x] {}", row.user.username)
            } else {
                row.user.username.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(", ");
    assert_eq!(actual, expected);
}

#[then(expr = "{int} children should be selected")]
pub async fn children_selected(world: &mut TestWorld, count: usize) {
    assert_eq!(world.session.checklist().selected_count(), count);
}

#[then(expr = "the unassign should report {int} succeeded and {int} failed")]
pub async fn unassign_counts(world: &mut TestWorld, succeeded: usize, failed: usize) {
    assert_eq!(
        world.outcome,
        Some(UnassignOutcome::Done { succeeded, failed })
    );
}

#[then("the unassign should be cancelled")]
pub async fn unassign_cancelled(world: &mut TestWorld) {
    assert_eq!(world.outcome, Some(UnassignOutcome::Cancelled));
}

/// Table rows as `boss: child, child` joined by `; `.
#[then(expr = "the table should list {string}")]
pub async fn table_should_list(world: &mut TestWorld, expected: String) {
    let table = world.table.as_ref().expect("a table should have been built");
    let actual = table
        .rows()
        .iter()
        .map(|row| {
            let children = row
                .children
                .iter()
                .map(|c| c.username.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            format!("{}: {children}", row.boss.username)
        })
        .collect::<Vec<_>>()
        .join("; ");
    assert_eq!(actual, expected);
}

#[then(expr = "the table should count {int} unresolved edge(s)")]
pub async fn table_unresolved(world: &mut TestWorld, count: usize) {
    let table = world.table.as_ref().expect("a table should have been built");
    assert_eq!(table.unresolved(), count);
}

#[then("the console should refuse access")]
pub async fn console_refuses(world: &mut TestWorld) {
    assert!(matches!(world.error, Some(AssignServiceError::AdminOnly)));
    assert!(world.session.directory().all().is_empty());
}
