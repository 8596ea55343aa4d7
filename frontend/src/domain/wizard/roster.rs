//! Roster diffing for project edits.

use std::collections::HashSet;

use crate::domain::EmployeeId;

/// Employees to add to and remove from a project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterChange {
    /// Ids present now but not initially, in current order.
    pub added: Vec<EmployeeId>,
    /// Ids present initially but not now, in initial order.
    pub removed: Vec<EmployeeId>,
}

impl RosterChange {
    /// Diff the roster captured at load time against the current selection.
    ///
    /// # Examples
    /// ```
    /// use frontend::domain::{EmployeeId, RosterChange};
    ///
    /// let ids = |raw: &[i64]| raw.iter().copied().map(EmployeeId::new).collect::<Vec<_>>();
    /// let change = RosterChange::between(&ids(&[1, 2, 3]), &ids(&[3, 4, 1]));
    /// assert_eq!(change.added, ids(&[4]));
    /// assert_eq!(change.removed, ids(&[2]));
    /// ```
    #[must_use]
    pub fn between(initial: &[EmployeeId], current: &[EmployeeId]) -> Self {
        let before: HashSet<EmployeeId> = initial.iter().copied().collect();
        let after: HashSet<EmployeeId> = current.iter().copied().collect();
        Self {
            added: unique_missing(current, &before),
            removed: unique_missing(initial, &after),
        }
    }

    /// Whether the roster is unchanged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

fn unique_missing(ids: &[EmployeeId], other: &HashSet<EmployeeId>) -> Vec<EmployeeId> {
    let mut seen = HashSet::new();
    ids.iter()
        .copied()
        .filter(|id| !other.contains(id) && seen.insert(*id))
        .collect()
}
