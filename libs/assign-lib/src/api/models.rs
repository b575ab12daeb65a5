use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::entities::{Edge, User, UserId, UserRole, UserStatus};
use crate::relation::Relation;

/// User as returned by `GET /api/admin/users`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct UserRecord {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: UserId,
    pub username: String,
    pub role: String,
    #[serde(default)]
    pub status: String,
}

impl UserRecord {
    /// `None` when the role is not one this console knows about.
    pub fn into_user(self) -> Option<User> {
        let role: UserRole = self.role.parse().ok()?;
        Some(User {
            id: self.id,
            username: self.username,
            role,
            status: UserStatus::parse_lenient(&self.status),
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(i64),
    Text(String),
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<UserId, D::Error>
where
    D: Deserializer<'de>,
{
    match RawId::deserialize(deserializer)? {
        RawId::Number(n) => Ok(n),
        RawId::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid user id: {s}"))),
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ManagerEmployeeRequest {
    pub manager_id: UserId,
    pub employee_id: UserId,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDealerRequest {
    pub employee_id: UserId,
    pub dealer_id: UserId,
}

/// Body of the assign/unassign calls; the shape depends on the relation.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum EdgeRequest {
    ManagerEmployee(ManagerEmployeeRequest),
    EmployeeDealer(EmployeeDealerRequest),
}

impl From<Edge> for EdgeRequest {
    fn from(edge: Edge) -> Self {
        match edge.relation {
            Relation::ManagerEmployee => EdgeRequest::ManagerEmployee(ManagerEmployeeRequest {
                manager_id: edge.boss_id,
                employee_id: edge.child_id,
            }),
            Relation::EmployeeDealer => EdgeRequest::EmployeeDealer(EmployeeDealerRequest {
                employee_id: edge.boss_id,
                dealer_id: edge.child_id,
            }),
        }
    }
}

fn id_from_value(value: &Value, relation: Relation) -> Option<UserId> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        Value::Object(map) => map
            .get(relation.child_key())
            .or_else(|| map.get("id"))
            .and_then(|v| match v {
                Value::Object(_) => None,
                other => id_from_value(other, relation),
            }),
        _ => None,
    }
}

/// Reads a child listing into integer ids.
///
/// Anything that is not an array yields no ids. Unreadable elements are
/// skipped and repeats dropped.
pub fn normalize_child_ids(value: &Value, relation: Relation) -> Vec<UserId> {
    let Value::Array(items) = value else {
        if !value.is_null() {
            tracing::warn!(relation = %relation, "child listing is not an array, treating as empty");
        }
        return Vec::new();
    };

    let mut ids = Vec::with_capacity(items.len());
    for item in items {
        match id_from_value(item, relation) {
            Some(id) if !ids.contains(&id) => ids.push(id),
            Some(_) => {}
            None => tracing::warn!(relation = %relation, item = %item, "skipping unreadable child id"),
        }
    }
    ids
}
