use async_trait::async_trait;

use crate::api::errors::ApiError;
use crate::api::models::UserRecord;
use crate::entities::{Edge, UserId};
use crate::relation::Relation;

/// The admin REST surface the console talks to.
#[async_trait]
pub trait AssignmentApi: Send + Sync {
    async fn list_users(&self) -> Result<Vec<UserRecord>, ApiError>;
    /// Child ids of `boss_id`, already normalized to integers.
    async fn list_children(&self, relation: Relation, boss_id: UserId) -> Result<Vec<UserId>, ApiError>;
    async fn assign(&self, edge: Edge) -> Result<(), ApiError>;
    async fn unassign(&self, edge: Edge) -> Result<(), ApiError>;
}
