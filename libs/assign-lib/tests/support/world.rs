use std::sync::Arc;

use cucumber::World;

use assign_lib::assignment_service::{AssignmentService, SyncReport, UnassignOutcome};
use assign_lib::entities::UserId;
use assign_lib::errors_service::AssignServiceError;
use assign_lib::relation::Relation;
use assign_lib::session::AdminSession;
use assign_lib::table::AssignmentTable;

use crate::support::fake_api::FakeApi;

#[derive(Debug, Default, World)]
pub struct TestWorld {
    // State
    pub api: Arc<FakeApi>,
    pub session: AdminSession,

    // Results
    pub report: Option<SyncReport>,
    pub outcome: Option<UnassignOutcome>,
    pub table: Option<AssignmentTable>,
    pub error: Option<AssignServiceError>,
}

impl TestWorld {
    pub fn service(&self) -> AssignmentService<FakeApi> {
        AssignmentService::with_api(self.api.clone())
    }

    /// Relation managed by `boss_id`, read from the loaded directory.
    pub fn relation_of(&self, boss_id: UserId) -> Relation {
        let boss = self
            .session
            .directory()
            .find(boss_id)
            .expect("boss should be in the directory");
        Relation::for_boss(boss.role).expect("user should be able to hold assignments")
    }
}

pub fn parse_ids(list: &str) -> Vec<UserId> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse().expect("ids should be integers"))
        .collect()
}
