use std::sync::Mutex;

use async_trait::async_trait;

use assign_lib::api::errors::ApiError;
use assign_lib::api::models::UserRecord;
use assign_lib::api::traits::AssignmentApi;
use assign_lib::assignment_service::ChangeKind;
use assign_lib::entities::{Edge, UserId};
use assign_lib::relation::Relation;

/// In-memory admin server. Edges live in a list; every mutation is logged.
#[derive(Debug, Default)]
pub struct FakeApi {
    users: Mutex<Vec<UserRecord>>,
    edges: Mutex<Vec<Edge>>,
    failing_children: Mutex<Vec<UserId>>,
    mutations: Mutex<Vec<(ChangeKind, Edge)>>,
}

impl FakeApi {
    pub fn set_users(&self, users: Vec<UserRecord>) {
        *self.users.lock().unwrap() = users;
    }

    pub fn seed(&self, edge: Edge) {
        let mut edges = self.edges.lock().unwrap();
        if !edges.contains(&edge) {
            edges.push(edge);
        }
    }

    pub fn fail_child(&self, child_id: UserId) {
        self.failing_children.lock().unwrap().push(child_id);
    }

    pub fn mutations(&self) -> Vec<(ChangeKind, Edge)> {
        self.mutations.lock().unwrap().clone()
    }

    pub fn children_of(&self, relation: Relation, boss_id: UserId) -> Vec<UserId> {
        self.edges
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.relation == relation && e.boss_id == boss_id)
            .map(|e| e.child_id)
            .collect()
    }

    fn record(&self, kind: ChangeKind, edge: Edge) -> Result<(), ApiError> {
        self.mutations.lock().unwrap().push((kind, edge));
        if self.failing_children.lock().unwrap().contains(&edge.child_id) {
            return Err(ApiError::Status {
                status: 500,
                body: "simulated failure".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl AssignmentApi for FakeApi {
    async fn list_users(&self) -> Result<Vec<UserRecord>, ApiError> {
        Ok(self.users.lock().unwrap().clone())
    }

    async fn list_children(&self, relation: Relation, boss_id: UserId) -> Result<Vec<UserId>, ApiError> {
        Ok(self.children_of(relation, boss_id))
    }

    async fn assign(&self, edge: Edge) -> Result<(), ApiError> {
        self.record(ChangeKind::Assign, edge)?;
        self.seed(edge);
        Ok(())
    }

    async fn unassign(&self, edge: Edge) -> Result<(), ApiError> {
        self.record(ChangeKind::Unassign, edge)?;
        self.edges.lock().unwrap().retain(|e| *e != edge);
        Ok(())
    }
}
