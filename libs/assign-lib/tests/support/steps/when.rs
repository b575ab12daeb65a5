use cucumber::when;

use assign_lib::entities::UserId;
use assign_lib::relation::Relation;
use assign_lib::selection::ClickTarget;

use crate::support::world::{parse_ids, TestWorld};

#[when(expr = "the admin selects boss {int}")]
pub async fn select_boss(world: &mut TestWorld, boss_id: UserId) {
    let service = world.service();
    if let Err(e) = service.select_boss(&mut world.session, boss_id).await {
        world.error = Some(e);
    }
}

#[when(expr = "the admin searches for {string}")]
pub async fn search(world: &mut TestWorld, term: String) {
    world.session.set_search(Some(term));
}

#[when(expr = "the admin clicks the row of child {int}")]
pub async fn click_row(world: &mut TestWorld, child_id: UserId) {
    world
        .session
        .checklist_mut()
        .on_click(child_id, ClickTarget::Row);
}

#[when(expr = "the admin clicks the checkbox of child {int}")]
pub async fn click_checkbox(world: &mut TestWorld, child_id: UserId) {
    let checklist = world.session.checklist_mut();
    let was_checked = checklist
        .rows()
        .iter()
        .any(|r| r.user.id == child_id && r.checked);

    // the browser flips the box, then the click bubbles to the row
    checklist.on_checkbox_change(child_id, !was_checked);
    checklist.on_click(child_id, ClickTarget::Checkbox);
}

#[when("the admin saves")]
pub async fn save(world: &mut TestWorld) {
    let service = world.service();
    match service.save(&mut world.session).await {
        Ok(report) => world.report = Some(report),
        Err(e) => world.error = Some(e),
    }
}

#[when(expr = "the admin saves the selection {string}")]
pub async fn save_selection(world: &mut TestWorld, selection: String) {
    let service = world.service();
    let checked = parse_ids(&selection);
    match service.save_selection(&mut world.session, &checked).await {
        Ok(report) => world.report = Some(report),
        Err(e) => world.error = Some(e),
    }
}

#[when(expr = "the admin unassigns all children of boss {int} and {word}")]
pub async fn unassign_all(world: &mut TestWorld, boss_id: UserId, answer: String) {
    let service = world.service();
    let approve = answer == "confirms";
    let confirm = move |_: &str| approve;
    match service
        .unassign_all(&mut world.session, boss_id, &confirm)
        .await
    {
        Ok(outcome) => world.outcome = Some(outcome),
        Err(e) => world.error = Some(e),
    }
}

#[when(expr = "the admin unassigns child {int} from boss {int}")]
pub async fn unassign_child(world: &mut TestWorld, child_id: UserId, boss_id: UserId) {
    let service = world.service();
    let confirm = |_: &str| true;
    match service
        .unassign_child(&mut world.session, boss_id, child_id, &confirm)
        .await
    {
        Ok(outcome) => world.outcome = Some(outcome),
        Err(e) => world.error = Some(e),
    }
}

#[when(expr = "the admin builds the {word} table")]
pub async fn build_table(world: &mut TestWorld, relation: String) {
    let relation: Relation = relation.parse().expect("relation should be known");
    let service = world.service();
    world.table = Some(service.build_table(world.session.directory(), relation).await);
}
