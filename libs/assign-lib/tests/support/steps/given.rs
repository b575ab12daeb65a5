use cucumber::gherkin::Step;
use cucumber::given;

use assign_lib::api::models::UserRecord;
use assign_lib::entities::{Edge, UserId};
use assign_lib::session::AdminSession;

use crate::support::world::{parse_ids, TestWorld};

#[given("the admin directory:")]
pub async fn admin_directory(world: &mut TestWorld, step: &Step) {
    let table = step.table.as_ref().expect("directory table is required");
    let users = table
        .rows
        .iter()
        .skip(1)
        .map(|row| UserRecord {
            id: row[0].parse().expect("id should be an integer"),
            username: row[1].clone(),
            role: row[2].clone(),
            status: row[3].clone(),
        })
        .collect();
    world.api.set_users(users);
}

#[given(expr = "the console is opened by admin {int}")]
pub async fn console_opened(world: &mut TestWorld, admin_id: UserId) {
    world.session = AdminSession::new(Some(admin_id));
    let service = world.service();
    if let Err(e) = service.load_directory(&mut world.session).await {
        world.error = Some(e);
    }
}

#[given(expr = "boss {int} has children {string}")]
pub async fn boss_has_children(world: &mut TestWorld, boss_id: UserId, children: String) {
    let relation = world.relation_of(boss_id);
    for child_id in parse_ids(&children) {
        world.api.seed(Edge::new(relation, boss_id, child_id));
    }
}

#[given(expr = "the server fails every change to child {int}")]
pub async fn server_fails_child(world: &mut TestWorld, child_id: UserId) {
    world.api.fail_child(child_id);
}
