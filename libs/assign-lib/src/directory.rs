use crate::entities::{User, UserId, UserRole};

/// Users loaded once per session, split into active role pools.
///
/// `all` keeps every user the server returned (inactive ones and admins
/// included) so role lookups still work for users outside the pools.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directory {
    all: Vec<User>,
    managers: Vec<User>,
    employees: Vec<User>,
    dealers: Vec<User>,
}

impl Directory {
    pub fn from_users(users: Vec<User>) -> Self {
        let pool = |role: UserRole| -> Vec<User> {
            users
                .iter()
                .filter(|u| u.role == role && u.is_active())
                .cloned()
                .collect()
        };

        let managers = pool(UserRole::Manager);
        let employees = pool(UserRole::Employee);
        let dealers = pool(UserRole::Dealer);

        Self {
            all: users,
            managers,
            employees,
            dealers,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    pub fn all(&self) -> &[User] {
        &self.all
    }

    pub fn managers(&self) -> &[User] {
        &self.managers
    }

    pub fn employees(&self) -> &[User] {
        &self.employees
    }

    pub fn dealers(&self) -> &[User] {
        &self.dealers
    }

    /// Active users holding `role`. Admins never form a pool.
    pub fn pool(&self, role: UserRole) -> &[User] {
        match role {
            UserRole::Manager => &self.managers,
            UserRole::Employee => &self.employees,
            UserRole::Dealer => &self.dealers,
            UserRole::Admin => &[],
        }
    }

    /// Any user the server returned, active or not.
    pub fn find(&self, id: UserId) -> Option<&User> {
        self.all.iter().find(|u| u.id == id)
    }

    pub fn find_in_pool(&self, role: UserRole, id: UserId) -> Option<&User> {
        self.pool(role).iter().find(|u| u.id == id)
    }

    /// Resolves child ids against the active pool for `role`, in pool order.
    pub fn resolve(&self, role: UserRole, ids: &[UserId]) -> Vec<User> {
        self.pool(role)
            .iter()
            .filter(|u| ids.contains(&u.id))
            .cloned()
            .collect()
    }

    pub fn display_name(&self, id: UserId) -> String {
        self.find(id)
            .map(|u| u.username.clone())
            .unwrap_or_else(|| format!("#{id}"))
    }
}
