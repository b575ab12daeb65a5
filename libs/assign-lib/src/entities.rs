use std::fmt;
use std::str::FromStr;


use crate::relation::Relation;

pub type UserId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UserRole {
    Manager,
    Employee,
    Dealer,
    Admin,
}

impl UserRole {
    pub fn as_str(self) -> &'static str {
        match self {
            UserRole::Manager => "manager",
            UserRole::Employee => "employee",
            UserRole::Dealer => "dealer",
            UserRole::Admin => "admin",
        }
    }

    pub fn with_article(self) -> &'static str {
        match self {
            UserRole::Manager => "a manager",
            UserRole::Employee => "an employee",
            UserRole::Dealer => "a dealer",
            UserRole::Admin => "an admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "manager" => Ok(UserRole::Manager),
            "employee" => Ok(UserRole::Employee),
            "dealer" => Ok(UserRole::Dealer),
            "admin" => Ok(UserRole::Admin),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserStatus {
    Active,
    Inactive,
}

impl UserStatus {
    /// Anything other than "active" counts as inactive.
    pub fn parse_lenient(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("active") {
            UserStatus::Active
        } else {
            UserStatus::Inactive
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub role: UserRole,
    pub status: UserStatus,
}

impl User {
    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }
}

/// A directed assignment from a boss to one of its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub relation: Relation,
    pub boss_id: UserId,
    pub child_id: UserId,
}

impl Edge {
    pub fn new(relation: Relation, boss_id: UserId, child_id: UserId) -> Self {
        Self {
            relation,
            boss_id,
            child_id,
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}#{} -> {}#{}",
            self.relation.boss_role(),
            self.boss_id,
            self.relation.child_role(),
            self.child_id
        )
    }
}
