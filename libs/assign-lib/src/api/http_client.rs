use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;

use super::config::{AdminApiConfig, ADMIN_ID_HEADER};
use super::errors::ApiError;
use super::models::{normalize_child_ids, EdgeRequest, UserRecord};
use super::traits::AssignmentApi;
use crate::entities::{Edge, UserId};
use crate::relation::Relation;

pub struct AdminApiClient {
    config: AdminApiConfig,
    http: Client,
}

impl AdminApiClient {
    pub fn new(config: AdminApiConfig) -> Result<Self, ApiError> {
        if !config.is_configured() {
            return Err(ApiError::NotConfigured(
                "an admin id is required".to_string(),
            ));
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::NotConfigured(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { config, http })
    }

    fn with_admin(&self, request: RequestBuilder) -> RequestBuilder {
        match self.config.admin_id {
            Some(id) => request.header(ADMIN_ID_HEADER, id.to_string()),
            None => request,
        }
    }

    async fn ensure_success(response: Response, operation: &str) -> Result<Response, ApiError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        tracing::debug!(operation, status = status.as_u16(), body = %body, "admin api call rejected");
        Err(ApiError::Status {
            status: status.as_u16(),
            body,
        })
    }

    async fn send_edge(&self, request: RequestBuilder, edge: Edge, operation: &str) -> Result<(), ApiError> {
        let response = self
            .with_admin(request)
            .json(&EdgeRequest::from(edge))
            .send()
            .await?;
        Self::ensure_success(response, operation).await?;
        Ok(())
    }
}

#[async_trait]
impl AssignmentApi for AdminApiClient {
    async fn list_users(&self) -> Result<Vec<UserRecord>, ApiError> {
        let response = self
            .with_admin(self.http.get(self.config.users_url()))
            .send()
            .await?;
        let response = Self::ensure_success(response, "list_users").await?;

        response
            .json::<Vec<UserRecord>>()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    async fn list_children(&self, relation: Relation, boss_id: UserId) -> Result<Vec<UserId>, ApiError> {
        let response = self
            .with_admin(self.http.get(self.config.children_url(relation, boss_id)))
            .send()
            .await?;
        let response = Self::ensure_success(response, "list_children").await?;

        let body = response.text().await?;
        let value = if body.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str::<Value>(&body)
                .map_err(|e| ApiError::InvalidResponse(e.to_string()))?
        };

        Ok(normalize_child_ids(&value, relation))
    }

    async fn assign(&self, edge: Edge) -> Result<(), ApiError> {
        let request = self.http.post(self.config.assign_url(edge.relation));
        self.send_edge(request, edge, "assign").await
    }

    async fn unassign(&self, edge: Edge) -> Result<(), ApiError> {
        let request = self.http.delete(self.config.unassign_url(edge.relation));
        self.send_edge(request, edge, "unassign").await
    }
}
