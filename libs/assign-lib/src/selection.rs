//! Checklist of assignable children for the selected boss.

use std::cmp::Ordering;

use crate::entities::{User, UserId};

/// How well a user matches a search term. Lower sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchRank {
    Exact,
    Prefix,
    Partial,
}

/// Ranks `user` against a lowercase, trimmed search term.
pub fn rank(user: &User, term: &str) -> Option<MatchRank> {
    let name = user.username.to_lowercase();
    let role = user.role.as_str();

    if name == term || role == term {
        Some(MatchRank::Exact)
    } else if name.starts_with(term) {
        Some(MatchRank::Prefix)
    } else if name.contains(term) || role.contains(term) {
        Some(MatchRank::Partial)
    } else {
        None
    }
}

fn alphabetical(a: &User, b: &User) -> Ordering {
    a.username
        .to_lowercase()
        .cmp(&b.username.to_lowercase())
        .then(a.id.cmp(&b.id))
}

/// Where a click landed inside a checklist row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Row,
    Checkbox,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistRow {
    pub user: User,
    pub checked: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Checklist {
    rows: Vec<ChecklistRow>,
    // assigned children with no visible row; they stay selected
    hidden_checked: Vec<UserId>,
}

impl Checklist {
    pub fn build(candidates: &[User], assigned: &[UserId], search: Option<&str>) -> Self {
        let term = search
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());

        let mut ranked: Vec<(Option<MatchRank>, &User)> = match &term {
            Some(term) => candidates
                .iter()
                .filter_map(|u| rank(u, term).map(|r| (Some(r), u)))
                .collect(),
            None => candidates.iter().map(|u| (None, u)).collect(),
        };
        ranked.sort_by(|(ra, a), (rb, b)| ra.cmp(rb).then_with(|| alphabetical(a, b)));

        let rows: Vec<ChecklistRow> = ranked
            .into_iter()
            .map(|(_, u)| ChecklistRow {
                user: u.clone(),
                checked: assigned.contains(&u.id),
            })
            .collect();

        let mut hidden_checked = Vec::new();
        for id in assigned {
            if !rows.iter().any(|r| r.user.id == *id) && !hidden_checked.contains(id) {
                hidden_checked.push(*id);
            }
        }

        Self {
            rows,
            hidden_checked,
        }
    }

    pub fn rows(&self) -> &[ChecklistRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn hidden_checked(&self) -> &[UserId] {
        &self.hidden_checked
    }

    fn row_mut(&mut self, id: UserId) -> Option<&mut ChecklistRow> {
        self.rows.iter_mut().find(|r| r.user.id == id)
    }

    /// Flips a row. Returns the new state, or `None` if no such row.
    pub fn toggle(&mut self, id: UserId) -> Option<bool> {
        let row = self.row_mut(id)?;
        row.checked = !row.checked;
        Some(row.checked)
    }

    /// Row click handler. A click on the checkbox itself is left to
    /// [`Checklist::on_checkbox_change`], so one click toggles once.
    pub fn on_click(&mut self, id: UserId, target: ClickTarget) -> Option<bool> {
        match target {
            ClickTarget::Row => self.toggle(id),
            ClickTarget::Checkbox => None,
        }
    }

    /// Checkbox change handler; sets the value the checkbox now shows.
    pub fn on_checkbox_change(&mut self, id: UserId, checked: bool) -> Option<bool> {
        let row = self.row_mut(id)?;
        row.checked = checked;
        Some(row.checked)
    }

    /// Unchecks every visible row and returns how many were checked.
    pub fn clear(&mut self) -> usize {
        let mut cleared = 0;
        for row in self.rows.iter_mut().filter(|r| r.checked) {
            row.checked = false;
            cleared += 1;
        }
        cleared
    }

    /// Visible checked rows in display order, then hidden assigned children.
    pub fn checked_ids(&self) -> Vec<UserId> {
        self.rows
            .iter()
            .filter(|r| r.checked)
            .map(|r| r.user.id)
            .chain(self.hidden_checked.iter().copied())
            .collect()
    }

    pub fn selected_count(&self) -> usize {
        self.rows.iter().filter(|r| r.checked).count() + self.hidden_checked.len()
    }

    pub fn can_save(&self) -> bool {
        self.selected_count() > 0
    }
}
