use crate::directory::Directory;
use crate::entities::{User, UserId};
use crate::relation::Relation;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentRow {
    pub boss: User,
    pub children: Vec<User>,
}

/// Aggregate view of every edge of one relation.
///
/// Bosses whose children do not resolve to active users get no row. The
/// edges dropped that way are still counted in `unresolved`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentTable {
    relation: Relation,
    rows: Vec<AssignmentRow>,
    unresolved: usize,
    failed_bosses: Vec<UserId>,
}

impl AssignmentTable {
    pub fn new(relation: Relation) -> Self {
        Self {
            relation,
            rows: Vec::new(),
            unresolved: 0,
            failed_bosses: Vec::new(),
        }
    }

    pub fn relation(&self) -> Relation {
        self.relation
    }

    pub fn rows(&self) -> &[AssignmentRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn unresolved(&self) -> usize {
        self.unresolved
    }

    pub fn failed_bosses(&self) -> &[UserId] {
        &self.failed_bosses
    }

    pub fn row(&self, boss_id: UserId) -> Option<&AssignmentRow> {
        self.rows.iter().find(|r| r.boss.id == boss_id)
    }

    /// Adds the row for `boss` from the child ids the server reported.
    pub fn push_boss(&mut self, directory: &Directory, boss: &User, child_ids: &[UserId]) {
        let children = directory.resolve(self.relation.child_role(), child_ids);
        self.unresolved += child_ids.len().saturating_sub(children.len());

        if !children.is_empty() {
            self.rows.push(AssignmentRow {
                boss: boss.clone(),
                children,
            });
        }
    }

    pub fn mark_failed(&mut self, boss_id: UserId) {
        self.failed_bosses.push(boss_id);
    }

    pub fn edge_count(&self) -> usize {
        self.rows.iter().map(|r| r.children.len()).sum()
    }
}
