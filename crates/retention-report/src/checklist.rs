//! Completion state of a package's action checklist.

use std::collections::BTreeSet;
use std::fmt;

use retention_model::{RetentionAction, RetentionPackage};
use serde::Serialize;

use crate::error::{ReportError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChecklistSection {
    Immediate,
    FollowUp,
}

impl ChecklistSection {
    fn actions(self, package: &RetentionPackage) -> &[RetentionAction] {
        match self {
            Self::Immediate => &package.immediate,
            Self::FollowUp => &package.follow_up,
        }
    }
}

impl fmt::Display for ChecklistSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Immediate => f.write_str("immediate"),
            Self::FollowUp => f.write_str("follow-up"),
        }
    }
}

/// Indices of completed actions, per section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChecklistProgress {
    immediate: BTreeSet<usize>,
    follow_up: BTreeSet<usize>,
}

impl ChecklistProgress {
    pub fn new() -> Self {
        Self::default()
    }

    fn indices_mut(&mut self, section: ChecklistSection) -> &mut BTreeSet<usize> {
        match section {
            ChecklistSection::Immediate => &mut self.immediate,
            ChecklistSection::FollowUp => &mut self.follow_up,
        }
    }

    fn indices(&self, section: ChecklistSection) -> &BTreeSet<usize> {
        match section {
            ChecklistSection::Immediate => &self.immediate,
            ChecklistSection::FollowUp => &self.follow_up,
        }
    }

    fn check_index(
        package: &RetentionPackage,
        section: ChecklistSection,
        index: usize,
    ) -> Result<()> {
        let len = section.actions(package).len();
        if index >= len {
            return Err(ReportError::ChecklistIndex {
                section,
                index,
                len,
            });
        }
        Ok(())
    }

    /// Marks an action done or not done.
    pub fn set(
        &mut self,
        package: &RetentionPackage,
        section: ChecklistSection,
        index: usize,
        done: bool,
    ) -> Result<()> {
        Self::check_index(package, section, index)?;
        let indices = self.indices_mut(section);
        if done {
            indices.insert(index);
        } else {
            indices.remove(&index);
        }
        Ok(())
    }

    /// Flips an action and returns its new state.
    pub fn toggle(
        &mut self,
        package: &RetentionPackage,
        section: ChecklistSection,
        index: usize,
    ) -> Result<bool> {
        let done = !self.is_done(section, index);
        self.set(package, section, index, done)?;
        Ok(done)
    }

    pub fn is_done(&self, section: ChecklistSection, index: usize) -> bool {
        self.indices(section).contains(&index)
    }

    /// Completed actions of `section`, in checklist order.
    pub fn completed<'a>(
        &self,
        package: &'a RetentionPackage,
        section: ChecklistSection,
    ) -> Vec<&'a RetentionAction> {
        section
            .actions(package)
            .iter()
            .enumerate()
            .filter(|(idx, _)| self.is_done(section, *idx))
            .map(|(_, action)| action)
            .collect()
    }
}
