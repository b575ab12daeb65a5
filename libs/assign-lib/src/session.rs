use std::collections::BTreeMap;

use crate::directory::Directory;
use crate::entities::UserId;
use crate::relation::Relation;
use crate::selection::Checklist;
use crate::table::AssignmentTable;

/// Selection state for the boss currently being edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BossState {
    #[default]
    Unselected,
    Loading {
        boss_id: UserId,
        relation: Relation,
    },
    Ready {
        boss_id: UserId,
        relation: Relation,
        assigned: Vec<UserId>,
    },
    Failed {
        boss_id: UserId,
        relation: Relation,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A transient message for the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Everything one admin session knows: who is acting, the loaded user
/// directory, the boss being edited and its checklist, the last built
/// tables and pending notices.
#[derive(Debug, Clone, Default)]
pub struct AdminSession {
    admin_id: Option<UserId>,
    directory: Directory,
    state: BossState,
    checklist: Checklist,
    search: Option<String>,
    tables: BTreeMap<Relation, AssignmentTable>,
    notices: Vec<Notice>,
}

impl AdminSession {
    pub fn new(admin_id: Option<UserId>) -> Self {
        Self {
            admin_id,
            ..Self::default()
        }
    }

    pub fn admin_id(&self) -> Option<UserId> {
        self.admin_id
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    pub fn set_directory(&mut self, directory: Directory) {
        self.directory = directory;
    }

    pub fn state(&self) -> &BossState {
        &self.state
    }

    pub fn checklist(&self) -> &Checklist {
        &self.checklist
    }

    pub fn checklist_mut(&mut self) -> &mut Checklist {
        &mut self.checklist
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn selected_boss(&self) -> Option<(UserId, Relation)> {
        match &self.state {
            BossState::Loading { boss_id, relation } | BossState::Ready { boss_id, relation, .. } => {
                Some((*boss_id, *relation))
            }
            _ => None,
        }
    }

    /// Relation of the boss last picked, whether or not its load succeeded.
    pub fn relation_in_view(&self) -> Option<Relation> {
        match &self.state {
            BossState::Unselected => None,
            BossState::Loading { relation, .. }
            | BossState::Ready { relation, .. }
            | BossState::Failed { relation, .. } => Some(*relation),
        }
    }

    /// The selected boss, once its children have loaded.
    pub fn ready_boss(&self) -> Option<(UserId, Relation)> {
        match &self.state {
            BossState::Ready {
                boss_id, relation, ..
            } => Some((*boss_id, *relation)),
            _ => None,
        }
    }

    /// Children of the selected boss as last loaded. Empty unless ready.
    pub fn current_assignments(&self) -> &[UserId] {
        match &self.state {
            BossState::Ready { assigned, .. } => assigned,
            _ => &[],
        }
    }

    pub fn begin_loading(&mut self, boss_id: UserId, relation: Relation) {
        self.state = BossState::Loading { boss_id, relation };
    }

    /// Completes a load. Results for a boss that is no longer loading are dropped.
    pub fn finish_loading(&mut self, boss_id: UserId, assigned: Vec<UserId>) -> bool {
        let relation = match self.state {
            BossState::Loading {
                boss_id: loading,
                relation,
            } if loading == boss_id => relation,
            _ => return false,
        };

        self.state = BossState::Ready {
            boss_id,
            relation,
            assigned,
        };
        self.rebuild_checklist();
        true
    }

    /// Marks a load as failed. Failures for a boss that is no longer loading are dropped.
    pub fn fail_loading(&mut self, boss_id: UserId, reason: impl Into<String>) -> bool {
        let relation = match self.state {
            BossState::Loading {
                boss_id: loading,
                relation,
            } if loading == boss_id => relation,
            _ => return false,
        };

        self.state = BossState::Failed {
            boss_id,
            relation,
            reason: reason.into(),
        };
        self.checklist = Checklist::default();
        true
    }

    pub fn deselect(&mut self) {
        self.state = BossState::Unselected;
        self.checklist = Checklist::default();
    }

    /// Re-filters the checklist, keeping the rows' selection where possible.
    pub fn set_search(&mut self, term: Option<String>) {
        let selected = self.checklist.checked_ids();
        self.search = term.filter(|t| !t.trim().is_empty());
        if let BossState::Ready { relation, .. } = &self.state {
            self.checklist = Checklist::build(
                self.directory.pool(relation.child_role()),
                &selected,
                self.search.as_deref(),
            );
        }
    }

    pub fn clear_selection(&mut self) -> usize {
        let cleared = self.checklist.clear();
        self.notify(NoticeLevel::Info, "Selection cleared");
        cleared
    }

    fn rebuild_checklist(&mut self) {
        self.checklist = match &self.state {
            BossState::Ready {
                relation, assigned, ..
            } => Checklist::build(
                self.directory.pool(relation.child_role()),
                assigned,
                self.search.as_deref(),
            ),
            _ => Checklist::default(),
        };
    }

    pub fn tables(&self) -> &BTreeMap<Relation, AssignmentTable> {
        &self.tables
    }

    pub fn table(&self, relation: Relation) -> Option<&AssignmentTable> {
        self.tables.get(&relation)
    }

    pub fn store_table(&mut self, table: AssignmentTable) {
        self.tables.insert(table.relation(), table);
    }

    pub fn notify(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.notices.push(Notice {
            level,
            message: message.into(),
        });
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}
