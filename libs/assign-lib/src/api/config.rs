use std::time::Duration;

use crate::entities::UserId;
use crate::relation::{Relation, API_ADMIN_PREFIX};

pub const ADMIN_API_URL: &str = "ADMIN_API_URL";
pub const ADMIN_ID: &str = "ADMIN_ID";
pub const ADMIN_API_TIMEOUT_SECS: &str = "ADMIN_API_TIMEOUT_SECS";

const DEFAULT_ADMIN_API_URL: &str = "http://localhost:3000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Header carrying the acting admin's id.
pub const ADMIN_ID_HEADER: &str = "x-admin-id";

#[derive(Debug, Clone)]
pub struct AdminApiConfig {
    pub base_url: String,
    pub admin_id: Option<UserId>,
    pub timeout: Duration,
}

impl Default for AdminApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_ADMIN_API_URL.to_string(),
            admin_id: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl AdminApiConfig {
    pub fn from_env() -> Self {
        let default = Self::default();

        let base_url = std::env::var(ADMIN_API_URL).unwrap_or(default.base_url);

        let admin_id = std::env::var(ADMIN_ID).ok().and_then(|v| {
            v.trim().parse::<UserId>().map_err(|_| {
                tracing::warn!(env_var = ADMIN_ID, value = %v, "ignoring non-numeric admin id");
            })
            .ok()
        });

        let timeout_secs: u64 = std::env::var(ADMIN_API_TIMEOUT_SECS)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            base_url,
            admin_id,
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_admin_id(mut self, admin_id: UserId) -> Self {
        self.admin_id = Some(admin_id);
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    pub fn users_url(&self) -> String {
        self.url(&format!("{API_ADMIN_PREFIX}/users"))
    }

    pub fn children_url(&self, relation: Relation, boss_id: UserId) -> String {
        self.url(&relation.list_path(boss_id))
    }

    pub fn assign_url(&self, relation: Relation) -> String {
        self.url(&relation.assign_path())
    }

    pub fn unassign_url(&self, relation: Relation) -> String {
        self.url(&relation.unassign_path())
    }

    pub fn is_configured(&self) -> bool {
        self.admin_id.is_some() && !self.base_url.trim().is_empty()
    }
}
