use std::collections::HashSet;

use crate::entities::UserId;

/// Changes needed to move a boss from its current children to a new selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentDiff {
    pub to_add: Vec<UserId>,
    pub to_remove: Vec<UserId>,
}

impl AssignmentDiff {
    /// `to_add = checked - previous`, `to_remove = previous - checked`.
    ///
    /// Both lists keep the order of their source and drop repeats.
    pub fn between(previous: &[UserId], checked: &[UserId]) -> Self {
        let previous_set: HashSet<UserId> = previous.iter().copied().collect();
        let checked_set: HashSet<UserId> = checked.iter().copied().collect();

        Self {
            to_add: ordered_difference(checked, &previous_set),
            to_remove: ordered_difference(previous, &checked_set),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }

    pub fn len(&self) -> usize {
        self.to_add.len() + self.to_remove.len()
    }

    /// Applies the diff to `previous`, yielding the resulting child set.
    pub fn apply(&self, previous: &[UserId]) -> HashSet<UserId> {
        let mut result: HashSet<UserId> = previous.iter().copied().collect();
        for id in &self.to_remove {
            result.remove(id);
        }
        result.extend(self.to_add.iter().copied());
        result
    }
}

fn ordered_difference(source: &[UserId], exclude: &HashSet<UserId>) -> Vec<UserId> {
    let mut seen = HashSet::new();
    source
        .iter()
        .copied()
        .filter(|id| !exclude.contains(id) && seen.insert(*id))
        .collect()
}
