//! The two legal assignment kinds and the role adjacency rule.
//!
//! A manager may hold employees and an employee may hold dealers. Nothing
//! else forms an edge: no same-role pairs, and a manager is never a child.

use std::fmt;
use std::str::FromStr;

use crate::entities::{UserId, UserRole};

pub const API_ADMIN_PREFIX: &str = "/api/admin";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Relation {
    ManagerEmployee,
    EmployeeDealer,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RelationError {
    #[error("{} cannot be assigned to another {}", .0.with_article(), .0)]
    SameRole(UserRole),

    #[error("a manager can never be assigned as a child")]
    ManagerAsChild,

    #[error("{} cannot hold assignments", .0.with_article())]
    NotABoss(UserRole),

    #[error("{} cannot be assigned to {}", .child.with_article(), .parent.with_article())]
    NotAdjacent { parent: UserRole, child: UserRole },
}

impl Relation {
    pub const ALL: [Relation; 2] = [Relation::ManagerEmployee, Relation::EmployeeDealer];

    pub fn boss_role(self) -> UserRole {
        match self {
            Relation::ManagerEmployee => UserRole::Manager,
            Relation::EmployeeDealer => UserRole::Employee,
        }
    }

    pub fn child_role(self) -> UserRole {
        match self {
            Relation::ManagerEmployee => UserRole::Employee,
            Relation::EmployeeDealer => UserRole::Dealer,
        }
    }

    /// The relation a user of `role` manages, if any.
    pub fn for_boss(role: UserRole) -> Result<Relation, RelationError> {
        match role {
            UserRole::Manager => Ok(Relation::ManagerEmployee),
            UserRole::Employee => Ok(Relation::EmployeeDealer),
            other => Err(RelationError::NotABoss(other)),
        }
    }

    /// Checks the adjacency rule for a parent/child pair.
    pub fn between(parent: UserRole, child: UserRole) -> Result<Relation, RelationError> {
        if child == UserRole::Manager {
            return Err(RelationError::ManagerAsChild);
        }
        if parent == child {
            return Err(RelationError::SameRole(parent));
        }
        let relation = Relation::for_boss(parent)?;
        if relation.child_role() != child {
            return Err(RelationError::NotAdjacent { parent, child });
        }
        Ok(relation)
    }

    pub fn slug(self) -> &'static str {
        match self {
            Relation::ManagerEmployee => "manager-employee",
            Relation::EmployeeDealer => "employee-dealer",
        }
    }

    /// Field name some servers use when listing children as objects.
    pub fn child_key(self) -> &'static str {
        match self {
            Relation::ManagerEmployee => "employee_id",
            Relation::EmployeeDealer => "dealer_id",
        }
    }

    pub fn list_path(self, boss_id: UserId) -> String {
        match self {
            Relation::ManagerEmployee => {
                format!("{API_ADMIN_PREFIX}/manager-employees/{boss_id}")
            }
            Relation::EmployeeDealer => format!("{API_ADMIN_PREFIX}/employee-dealers/{boss_id}"),
        }
    }

    pub fn assign_path(self) -> String {
        match self {
            Relation::ManagerEmployee => format!("{API_ADMIN_PREFIX}/assign-employee"),
            Relation::EmployeeDealer => format!("{API_ADMIN_PREFIX}/assign-dealer"),
        }
    }

    pub fn unassign_path(self) -> String {
        match self {
            Relation::ManagerEmployee => format!("{API_ADMIN_PREFIX}/unassign-employee"),
            Relation::EmployeeDealer => format!("{API_ADMIN_PREFIX}/unassign-dealer"),
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Relation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "manager-employee" => Ok(Relation::ManagerEmployee),
            "employee-dealer" => Ok(Relation::EmployeeDealer),
            other => Err(format!("unknown relation: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legal_pairs() {
        assert_eq!(
            Relation::between(UserRole::Manager, UserRole::Employee),
            Ok(Relation::ManagerEmployee)
        );
        assert_eq!(
            Relation::between(UserRole::Employee, UserRole::Dealer),
            Ok(Relation::EmployeeDealer)
        );
    }

    #[test]
    fn test_same_role_rejected() {
        assert_eq!(
            Relation::between(UserRole::Employee, UserRole::Employee),
            Err(RelationError::SameRole(UserRole::Employee))
        );
        assert_eq!(
            Relation::between(UserRole::Dealer, UserRole::Dealer),
            Err(RelationError::SameRole(UserRole::Dealer))
        );
    }

    #[test]
    fn test_manager_never_a_child() {
        assert_eq!(
            Relation::between(UserRole::Manager, UserRole::Manager),
            Err(RelationError::ManagerAsChild)
        );
        assert_eq!(
            Relation::between(UserRole::Employee, UserRole::Manager),
            Err(RelationError::ManagerAsChild)
        );
    }

    #[test]
    fn test_skipping_a_level_rejected() {
        assert_eq!(
            Relation::between(UserRole::Manager, UserRole::Dealer),
            Err(RelationError::NotAdjacent {
                parent: UserRole::Manager,
                child: UserRole::Dealer
            })
        );
        assert_eq!(
            Relation::between(UserRole::Dealer, UserRole::Employee),
            Err(RelationError::NotABoss(UserRole::Dealer))
        );
        assert_eq!(
            Relation::between(UserRole::Admin, UserRole::Employee),
            Err(RelationError::NotABoss(UserRole::Admin))
        );
    }

    #[test]
    fn test_error_messages_use_articles() {
        assert_eq!(
            RelationError::SameRole(UserRole::Employee).to_string(),
            "an employee cannot be assigned to another employee"
        );
        assert_eq!(
            RelationError::NotABoss(UserRole::Dealer).to_string(),
            "a dealer cannot hold assignments"
        );
        assert_eq!(
            RelationError::NotAdjacent {
                parent: UserRole::Manager,
                child: UserRole::Dealer
            }
            .to_string(),
            "a dealer cannot be assigned to a manager"
        );
    }

    #[test]
    fn test_paths() {
        assert_eq!(
            Relation::ManagerEmployee.list_path(1),
            "/api/admin/manager-employees/1"
        );
        assert_eq!(
            Relation::EmployeeDealer.list_path(42),
            "/api/admin/employee-dealers/42"
        );
        assert_eq!(
            Relation::EmployeeDealer.unassign_path(),
            "/api/admin/unassign-dealer"
        );
    }

    #[test]
    fn test_slug_parses_back() {
        for relation in Relation::ALL {
            assert_eq!(relation.slug().parse::<Relation>(), Ok(relation));
        }
        assert!("dealer-manager".parse::<Relation>().is_err());
    }
}
