use std::sync::Arc;

use crate::api::{AdminApiClient, AssignmentApi};
use crate::diff::AssignmentDiff;
use crate::directory::Directory;
use crate::entities::{Edge, User, UserId, UserRole};
use crate::errors_service::AssignServiceError;
use crate::relation::Relation;
use crate::session::{AdminSession, NoticeLevel};
use crate::table::AssignmentTable;

/// Asks the operator to approve a destructive action.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Assign,
    Unassign,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedChange {
    pub edge: Edge,
    pub kind: ChangeKind,
    pub error: String,
}

/// What a save actually changed on the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub relation: Relation,
    pub boss_id: UserId,
    pub added: Vec<UserId>,
    pub removed: Vec<UserId>,
    pub failed: Vec<FailedChange>,
}

impl SyncReport {
    fn new(relation: Relation, boss_id: UserId) -> Self {
        Self {
            relation,
            boss_id,
            added: Vec::new(),
            removed: Vec::new(),
            failed: Vec::new(),
        }
    }

    pub fn is_noop(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.failed.is_empty()
    }

    pub fn level(&self) -> NoticeLevel {
        if self.failed.is_empty() {
            if self.is_noop() {
                NoticeLevel::Info
            } else {
                NoticeLevel::Success
            }
        } else if self.added.is_empty() && self.removed.is_empty() {
            NoticeLevel::Error
        } else {
            NoticeLevel::Warning
        }
    }

    pub fn summary(&self) -> String {
        let noun = self.relation.child_role();
        let (added, removed) = (self.added.len(), self.removed.len());

        let applied = match (added, removed) {
            (0, 0) if self.failed.is_empty() => return "No changes made".to_string(),
            (0, 0) => {
                return format!(
                    "Failed to save assignments ({} change(s) failed)",
                    self.failed.len()
                )
            }
            (a, 0) => format!("Successfully assigned {a} {noun}(s)"),
            (0, r) => format!("Successfully unassigned {r} {noun}(s)"),
            (a, r) => format!("Added {a} and removed {r} {noun}(s)"),
        };

        if self.failed.is_empty() {
            applied
        } else {
            format!("{applied}; {} change(s) failed", self.failed.len())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnassignOutcome {
    Cancelled,
    NothingAssigned,
    Done { succeeded: usize, failed: usize },
}

pub struct AssignmentService<A = AdminApiClient>
where
    A: AssignmentApi,
{
    pub api: Arc<A>,
}

impl AssignmentService<AdminApiClient> {
    pub fn new(api: AdminApiClient) -> Self {
        Self { api: Arc::new(api) }
    }
}

impl<A> AssignmentService<A>
where
    A: AssignmentApi,
{
    pub fn with_api(api: Arc<A>) -> Self {
        Self { api }
    }

    /// Loads every user once and partitions the active ones by role.
    pub async fn load_directory(&self, session: &mut AdminSession) -> Result<(), AssignServiceError> {
        let records = match self.api.list_users().await {
            Ok(records) => records,
            Err(e) => {
                tracing::error!(error = %e, "failed to load users");
                session.notify(NoticeLevel::Error, "Failed to load users");
                return Err(e.into());
            }
        };

        let total = records.len();
        let users: Vec<User> = records
            .into_iter()
            .filter_map(|record| {
                let (id, role) = (record.id, record.role.clone());
                let user = record.into_user();
                if user.is_none() {
                    tracing::warn!(user_id = id, role = %role, "skipping user with unknown role");
                }
                user
            })
            .collect();

        if let Some(admin_id) = session.admin_id() {
            match users.iter().find(|u| u.id == admin_id) {
                Some(admin) if admin.role != UserRole::Admin => {
                    tracing::warn!(admin_id, role = %admin.role, "acting user is not an admin");
                    session.notify(NoticeLevel::Error, "Admin access only");
                    return Err(AssignServiceError::AdminOnly);
                }
                Some(_) => {}
                None => tracing::warn!(admin_id, "acting admin is not in the user directory"),
            }
        }

        let directory = Directory::from_users(users);
        tracing::info!(
            total,
            managers = directory.managers().len(),
            employees = directory.employees().len(),
            dealers = directory.dealers().len(),
            "user directory loaded"
        );
        session.set_directory(directory);
        Ok(())
    }

    pub async fn fetch_assignments(
        &self,
        relation: Relation,
        boss_id: UserId,
    ) -> Result<Vec<UserId>, AssignServiceError> {
        let children = self.api.list_children(relation, boss_id).await?;
        tracing::debug!(relation = %relation, boss_id, count = children.len(), "assignments fetched");
        Ok(children)
    }

    fn boss_relation(directory: &Directory, boss_id: UserId) -> Result<Relation, AssignServiceError> {
        let boss = directory
            .find(boss_id)
            .ok_or(AssignServiceError::UnknownUser(boss_id))?;
        Relation::for_boss(boss.role).map_err(|_| AssignServiceError::NotABoss {
            id: boss_id,
            role: boss.role,
        })
    }

    fn resolve_boss(
        session: &mut AdminSession,
        boss_id: UserId,
    ) -> Result<Relation, AssignServiceError> {
        Self::boss_relation(session.directory(), boss_id).inspect_err(|e| {
            session.notify(NoticeLevel::Error, capitalize(&e.to_string()));
        })
    }

    /// Selects a boss and loads its current children into the checklist.
    pub async fn select_boss(
        &self,
        session: &mut AdminSession,
        boss_id: UserId,
    ) -> Result<(), AssignServiceError> {
        let relation = Self::resolve_boss(session, boss_id)?;

        session.begin_loading(boss_id, relation);
        match self.fetch_assignments(relation, boss_id).await {
            Ok(children) => {
                session.finish_loading(boss_id, children);
                Ok(())
            }
            Err(e) => {
                tracing::error!(relation = %relation, boss_id, error = %e, "failed to load current assignments");
                session.fail_loading(boss_id, e.to_string());
                session.notify(NoticeLevel::Error, "Failed to load current assignments");
                Err(e)
            }
        }
    }

    /// Saves the checklist of the selected boss.
    pub async fn save(&self, session: &mut AdminSession) -> Result<SyncReport, AssignServiceError> {
        if session.ready_boss().is_some() && !session.checklist().can_save() {
            session.notify(NoticeLevel::Error, "Nothing selected");
            return Err(AssignServiceError::NothingSelected);
        }
        let checked = session.checklist().checked_ids();
        self.save_selection(session, &checked).await
    }

    /// Makes `checked` the exact child set of the selected boss.
    ///
    /// Every target is checked against the role rule before the first call
    /// goes out; one bad target aborts the whole batch. Calls then run one at
    /// a time and a failed call does not undo the ones before it.
    pub async fn save_selection(
        &self,
        session: &mut AdminSession,
        checked: &[UserId],
    ) -> Result<SyncReport, AssignServiceError> {
        let Some((boss_id, relation)) = session.ready_boss() else {
            let role = session
                .relation_in_view()
                .map(Relation::boss_role)
                .unwrap_or(UserRole::Manager);
            let err = AssignServiceError::NoBossSelected(role);
            session.notify(NoticeLevel::Error, capitalize(&err.to_string()));
            return Err(err);
        };

        if checked.is_empty() {
            session.notify(NoticeLevel::Error, "Nothing selected");
            return Err(AssignServiceError::NothingSelected);
        }

        let diff = AssignmentDiff::between(session.current_assignments(), checked);
        if let Err(e) = validate_targets(session.directory(), relation, &diff) {
            tracing::warn!(relation = %relation, boss_id, error = %e, "batch rejected before any call");
            session.notify(NoticeLevel::Error, capitalize(&e.to_string()));
            return Err(e);
        }

        let report = self.apply_diff(relation, boss_id, &diff).await;
        session.notify(report.level(), report.summary());

        if let Err(e) = self.select_boss(session, boss_id).await {
            tracing::warn!(boss_id, error = %e, "reload after save failed");
        }
        self.refresh_tables(session).await;

        Ok(report)
    }

    async fn apply_diff(&self, relation: Relation, boss_id: UserId, diff: &AssignmentDiff) -> SyncReport {
        let mut report = SyncReport::new(relation, boss_id);

        for &child_id in &diff.to_add {
            let edge = Edge::new(relation, boss_id, child_id);
            match self.api.assign(edge).await {
                Ok(()) => {
                    tracing::info!(edge = %edge, "assigned");
                    report.added.push(child_id);
                }
                Err(e) => {
                    tracing::error!(edge = %edge, error = %e, "assign failed");
                    report.failed.push(FailedChange {
                        edge,
                        kind: ChangeKind::Assign,
                        error: e.to_string(),
                    });
                }
            }
        }

        for &child_id in &diff.to_remove {
            let edge = Edge::new(relation, boss_id, child_id);
            match self.api.unassign(edge).await {
                Ok(()) => {
                    tracing::info!(edge = %edge, "unassigned");
                    report.removed.push(child_id);
                }
                Err(e) => {
                    tracing::error!(edge = %edge, error = %e, "unassign failed");
                    report.failed.push(FailedChange {
                        edge,
                        kind: ChangeKind::Unassign,
                        error: e.to_string(),
                    });
                }
            }
        }

        report
    }

    /// Builds the aggregate table for one relation, one boss at a time.
    pub async fn build_table(&self, directory: &Directory, relation: Relation) -> AssignmentTable {
        let mut table = AssignmentTable::new(relation);

        for boss in directory.pool(relation.boss_role()) {
            match self.api.list_children(relation, boss.id).await {
                Ok(child_ids) => table.push_boss(directory, boss, &child_ids),
                Err(e) => {
                    tracing::error!(relation = %relation, boss_id = boss.id, error = %e, "failed to load assignments for boss");
                    table.mark_failed(boss.id);
                }
            }
        }

        if table.unresolved() > 0 {
            tracing::warn!(
                relation = %relation,
                unresolved = table.unresolved(),
                "assignments to unknown or inactive users are not shown"
            );
        }
        table
    }

    pub async fn refresh_tables(&self, session: &mut AdminSession) {
        for relation in Relation::ALL {
            let table = self.build_table(session.directory(), relation).await;
            session.store_table(table);
        }
    }

    /// Removes a single edge after the operator confirms.
    pub async fn unassign_child(
        &self,
        session: &mut AdminSession,
        boss_id: UserId,
        child_id: UserId,
        confirm: &dyn Confirm,
    ) -> Result<UnassignOutcome, AssignServiceError> {
        let relation = Self::resolve_boss(session, boss_id)?;
        if let Some(child) = session.directory().find(child_id) {
            if let Err(source) = Relation::between(relation.boss_role(), child.role) {
                let err = AssignServiceError::InvalidEdge { child_id, source };
                session.notify(NoticeLevel::Error, capitalize(&err.to_string()));
                return Err(err);
            }
        }

        let boss_name = session.directory().display_name(boss_id);
        let child_name = session.directory().display_name(child_id);
        if !confirm.confirm(&format!("Unassign {child_name} from {boss_name}?")) {
            return Ok(UnassignOutcome::Cancelled);
        }

        let edge = Edge::new(relation, boss_id, child_id);
        if let Err(e) = self.api.unassign(edge).await {
            tracing::error!(edge = %edge, error = %e, "unassign failed");
            session.notify(
                NoticeLevel::Error,
                format!("Failed to unassign {child_name} from {boss_name}"),
            );
            return Err(e.into());
        }
        tracing::info!(edge = %edge, "unassigned");
        session.notify(
            NoticeLevel::Success,
            format!("Unassigned {child_name} from {boss_name}"),
        );

        self.after_change(session, boss_id).await;
        Ok(UnassignOutcome::Done {
            succeeded: 1,
            failed: 0,
        })
    }

    /// Removes every child of a boss after the operator confirms.
    ///
    /// The child list comes fresh from the server. Each removal is its own
    /// call; failures are counted, never retried or rolled back.
    pub async fn unassign_all(
        &self,
        session: &mut AdminSession,
        boss_id: UserId,
        confirm: &dyn Confirm,
    ) -> Result<UnassignOutcome, AssignServiceError> {
        let relation = Self::resolve_boss(session, boss_id)?;
        let noun = relation.child_role();
        let boss_name = session.directory().display_name(boss_id);

        if !confirm.confirm(&format!(
            "Are you sure you want to unassign all {noun}s from {boss_name}?"
        )) {
            return Ok(UnassignOutcome::Cancelled);
        }

        let children = match self.fetch_assignments(relation, boss_id).await {
            Ok(children) => children,
            Err(e) => {
                tracing::error!(relation = %relation, boss_id, error = %e, "failed to load assignments");
                session.notify(NoticeLevel::Error, format!("Failed to unassign {noun}s"));
                return Err(e);
            }
        };

        if children.is_empty() {
            session.notify(
                NoticeLevel::Info,
                format!("No {noun}s assigned to {boss_name}"),
            );
            return Ok(UnassignOutcome::NothingAssigned);
        }

        let (mut succeeded, mut failed) = (0, 0);
        for child_id in children {
            let edge = Edge::new(relation, boss_id, child_id);
            match self.api.unassign(edge).await {
                Ok(()) => {
                    tracing::info!(edge = %edge, "unassigned");
                    succeeded += 1;
                }
                Err(e) => {
                    tracing::error!(edge = %edge, error = %e, "unassign failed");
                    failed += 1;
                }
            }
        }

        let (level, message) = match (succeeded, failed) {
            (s, 0) => (
                NoticeLevel::Success,
                format!("Successfully unassigned {s} {noun}(s) from {boss_name}"),
            ),
            (0, _) => (
                NoticeLevel::Error,
                format!("Failed to unassign any {noun}s from {boss_name}"),
            ),
            (s, f) => (
                NoticeLevel::Warning,
                format!("Partially successful: unassigned {s} {noun}(s), {f} failed"),
            ),
        };
        session.notify(level, message);

        self.after_change(session, boss_id).await;
        Ok(UnassignOutcome::Done { succeeded, failed })
    }

    async fn after_change(&self, session: &mut AdminSession, boss_id: UserId) {
        if session.selected_boss().map(|(id, _)| id) == Some(boss_id) {
            if let Err(e) = self.select_boss(session, boss_id).await {
                tracing::warn!(boss_id, error = %e, "reload after unassign failed");
            }
        }
        self.refresh_tables(session).await;
    }
}

/// Checks every target of a batch against the role rule.
///
/// Additions must name an active user. A removal target that no longer
/// resolves is allowed so dangling edges can still be cleaned up.
pub fn validate_targets(
    directory: &Directory,
    relation: Relation,
    diff: &AssignmentDiff,
) -> Result<(), AssignServiceError> {
    let boss_role = relation.boss_role();

    for &child_id in &diff.to_add {
        let child = directory
            .find(child_id)
            .ok_or(AssignServiceError::UnknownUser(child_id))?;
        Relation::between(boss_role, child.role)
            .map_err(|source| AssignServiceError::InvalidEdge { child_id, source })?;
        if directory
            .find_in_pool(relation.child_role(), child_id)
            .is_none()
        {
            return Err(AssignServiceError::InactiveUser(child_id));
        }
    }

    for &child_id in &diff.to_remove {
        if let Some(child) = directory.find(child_id) {
            Relation::between(boss_role, child.role)
                .map_err(|source| AssignServiceError::InvalidEdge { child_id, source })?;
        }
    }

    Ok(())
}

fn capitalize(message: &str) -> String {
    let mut chars = message.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
