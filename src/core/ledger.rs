//! Ordered collection of report sections.
//!
//! Sections are stored in a `Vec` whose index is always equal to each
//! section's `order`. Every mutating method renumbers the affected range
//! before returning, so callers never see a gap or a duplicate order.

use crate::domain::model::{Section, SectionDraft, SectionId};
use crate::utils::error::{ReportError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Section>", into = "Vec<Section>")]
pub struct SectionLedger {
    sections: Vec<Section>,
}

impl SectionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn get(&self, id: SectionId) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn position_of(&self, id: SectionId) -> Option<usize> {
        self.sections.iter().position(|s| s.id == id)
    }

    /// Adds a section at the tail.
    pub fn append(&mut self, title: impl Into<String>, content: impl Into<String>) -> &Section {
        let order = self.sections.len();
        self.sections.push(Section {
            id: SectionId::generate(),
            title: title.into(),
            content: content.into(),
            order,
        });
        &self.sections[order]
    }

    /// Inserts a section at `index`, clamped to `[0, len]`.
    pub fn insert_at(
        &mut self,
        index: usize,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> &Section {
        let index = index.min(self.sections.len());
        self.sections.insert(
            index,
            Section {
                id: SectionId::generate(),
                title: title.into(),
                content: content.into(),
                order: index,
            },
        );
        self.renumber_from(index + 1);
        &self.sections[index]
    }

    /// Removes the section with `id`. Absent ids are a no-op.
    pub fn delete(&mut self, id: SectionId) -> Option<Section> {
        let Some(position) = self.position_of(id) else {
            tracing::debug!("delete: section {} not found, ignoring", id);
            return None;
        };
        let removed = self.sections.remove(position);
        self.renumber_from(position);
        Some(removed)
    }

    /// Moves the section with `id` so that its order becomes
    /// `clamp(to_index, 0, len - 1)`.
    ///
    /// Only the sections between the old and the new position shift.
    /// Returns `false` when nothing changed (unknown id or same position).
    pub fn move_section(&mut self, id: SectionId, to_index: usize) -> bool {
        let Some(from) = self.position_of(id) else {
            tracing::debug!("move: section {} not found, ignoring", id);
            return false;
        };
        let to = to_index.min(self.sections.len() - 1);
        if from == to {
            return false;
        }

        if from < to {
            self.sections[from..=to].rotate_left(1);
        } else {
            self.sections[to..=from].rotate_right(1);
        }
        for order in from.min(to)..=from.max(to) {
            self.sections[order].order = order;
        }
        true
    }

    /// Replaces title and content in place. Order and id never change.
    pub fn update(
        &mut self,
        id: SectionId,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> bool {
        match self.sections.iter_mut().find(|s| s.id == id) {
            Some(section) => {
                section.title = title.into();
                section.content = content.into();
                true
            }
            None => false,
        }
    }

    /// Appends every draft in iteration order with freshly generated ids.
    ///
    /// Returns the number of sections added.
    pub fn merge_append<I>(&mut self, drafts: I) -> usize
    where
        I: IntoIterator,
        I::Item: Into<SectionDraft>,
    {
        let drafts = drafts.into_iter();
        let start = self.sections.len();
        self.sections.reserve(drafts.size_hint().0);

        for (offset, draft) in drafts.enumerate() {
            let draft = draft.into();
            self.sections.push(Section {
                id: SectionId::generate(),
                title: draft.title,
                content: draft.content,
                order: start + offset,
            });
        }

        self.sections.len() - start
    }

    /// Copies all sections of `other` onto the tail, in its order.
    pub fn merge_from(&mut self, other: &SectionLedger) -> usize {
        self.merge_append(other.to_ordered_list())
    }

    /// Sections by ascending order. The iterator is `Clone`, so it can be
    /// restarted without borrowing the ledger again.
    pub fn to_ordered_list(&self) -> std::slice::Iter<'_, Section> {
        self.sections.iter()
    }

    pub fn to_records(&self) -> Vec<Section> {
        self.sections.clone()
    }

    /// Rebuilds a ledger from persisted records, in any order.
    pub fn from_records(mut records: Vec<Section>) -> Result<Self> {
        records.sort_by_key(|s| s.order);

        let mut seen = HashSet::with_capacity(records.len());
        for (position, section) in records.iter().enumerate() {
            if section.order != position {
                return Err(ReportError::corrupt_ledger(format!(
                    "expected order {} but found {}",
                    position, section.order
                )));
            }
            if !seen.insert(section.id) {
                return Err(ReportError::corrupt_ledger(format!(
                    "duplicate section id {}",
                    section.id
                )));
            }
        }

        Ok(Self { sections: records })
    }

    pub fn check_invariant(&self) -> Result<()> {
        match self
            .sections
            .iter()
            .enumerate()
            .find(|(position, s)| s.order != *position)
        {
            Some((position, s)) => Err(ReportError::corrupt_ledger(format!(
                "section {} at position {} has order {}",
                s.id, position, s.order
            ))),
            None => Ok(()),
        }
    }

    fn renumber_from(&mut self, start: usize) {
        for (order, section) in self.sections.iter_mut().enumerate().skip(start) {
            section.order = order;
        }
    }
}

impl TryFrom<Vec<Section>> for SectionLedger {
    type Error = ReportError;

    fn try_from(records: Vec<Section>) -> Result<Self> {
        Self::from_records(records)
    }
}

impl From<SectionLedger> for Vec<Section> {
    fn from(ledger: SectionLedger) -> Self {
        ledger.sections
    }
}

impl<'a> IntoIterator for &'a SectionLedger {
    type Item = &'a Section;
    type IntoIter = std::slice::Iter<'a, Section>;

    fn into_iter(self) -> Self::IntoIter {
        self.to_ordered_list()
    }
}
