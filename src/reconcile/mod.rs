//! Sequence reconciliation: resolving a performance sequence against the
//! content catalog.
//!
//! Each sequence entry is tried against a cascade of lookups, most specific
//! first:
//!
//! 1. `section-id`: the entry's `sectionId`
//! 2. `label+number`: the normalized label `"<base> <number>"`
//! 3. `base+number`: the `(base, number)` pair
//! 4. `label`: the normalized full label
//! 5. `base`: any section sharing the base phrase
//!
//! Lookups 1-5 only consider sections not yet consumed by an earlier entry.
//! If all of them fail, lookups 2-5 are repeated allowing reuse. Within a
//! lookup the first candidate in catalog order wins. Sections the sequence
//! never reaches are appended at the end, so every section is placed.
//!
//! ```
//! use cuebuild::catalog::ContentCatalog;
//! use cuebuild::payload::{SectionPayload, SequenceEntry};
//! use cuebuild::reconcile::Reconciler;
//!
//! let sections = vec![
//!     SectionPayload::new("Verse 1"),
//!     SectionPayload::new("Verse 2"),
//!     SectionPayload::new("Chorus"),
//! ];
//! let sequence = vec![
//!     SequenceEntry::labelled("Verse").with_number(2),
//!     SequenceEntry::labelled("Chorus"),
//!     SequenceEntry::labelled("Verse").with_number(1),
//! ];
//!
//! let catalog = ContentCatalog::new(&sections);
//! let result = Reconciler::new(&catalog).reconcile(Some(&sequence));
//! let order: Vec<_> = result.units.iter().map(|u| u.source_index).collect();
//! assert_eq!(order, vec![Some(1), Some(2), Some(0)]);
//! assert!(result.report.leftovers.is_empty());
//! ```

mod report;

use std::collections::HashSet;

use tracing::debug;

use crate::catalog::ContentCatalog;
use crate::label::{normalize, split_base_and_ordinal};
use crate::payload::SequenceEntry;
use crate::util::title_case;

pub use report::{LeftoverRecord, MatchRecord, ReconcileReport};

/// Lookup that resolved a sequence entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchStrategy {
    SectionId,
    LabelNumber,
    BaseNumber,
    Label,
    Base,
}

impl MatchStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            MatchStrategy::SectionId => "section-id",
            MatchStrategy::LabelNumber => "label+number",
            MatchStrategy::BaseNumber => "base+number",
            MatchStrategy::Label => "label",
            MatchStrategy::Base => "base",
        }
    }
}

impl std::fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A successful lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOutcome {
    /// Catalog index of the chosen section.
    pub index: usize,
    pub strategy: MatchStrategy,
    /// The section had already been consumed by an earlier entry.
    pub reused: bool,
    /// Number of candidates that were available to the lookup.
    pub candidates: usize,
}

impl MatchOutcome {
    pub fn is_ambiguous(&self) -> bool {
        self.candidates > 1
    }

    /// Diagnostic reason, e.g. `label (reuse) (ambiguous:2)`.
    pub fn reason(&self) -> String {
        let mut reason = self.strategy.as_str().to_string();
        if self.reused {
            reason.push_str(" (reuse)");
        }
        if self.is_ambiguous() {
            reason.push_str(&format!(" (ambiguous:{})", self.candidates));
        }
        reason
    }
}

/// One position in the final order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedUnit {
    /// Catalog index of the section, `None` for label-only markers.
    pub source_index: Option<usize>,
    /// Display label resolved from the sequence entry.
    pub label: Option<String>,
    /// The section was placed earlier in the order as well.
    pub reused: bool,
}

impl OrderedUnit {
    fn leftover(index: usize) -> Self {
        Self {
            source_index: Some(index),
            label: None,
            reused: false,
        }
    }
}

/// Output of one reconciliation pass.
#[derive(Debug, Clone, Default)]
pub struct Reconciliation {
    pub units: Vec<OrderedUnit>,
    pub report: ReconcileReport,
}

/// One reconciliation pass over a catalog.
///
/// The set of consumed sections lives here, so a `Reconciler` is used for
/// exactly one sequence.
pub struct Reconciler<'c, 'a> {
    catalog: &'c ContentCatalog<'a>,
    used: HashSet<usize>,
}

/// Derived lookup keys for one sequence entry.
struct EntryKeys<'e> {
    label_text: &'e str,
    normalized: String,
    base_key: String,
    number: Option<String>,
}

impl<'e> EntryKeys<'e> {
    fn new(entry: &'e SequenceEntry) -> Self {
        let label_text = entry.label_text();
        let normalized = normalize(label_text);
        let (base_from_label, number_from_label) = split_base_and_ordinal(label_text);
        let number = entry.ordinal().or(number_from_label);
        let base_key = if base_from_label.is_empty() {
            normalized.clone()
        } else {
            base_from_label
        };
        Self {
            label_text,
            normalized,
            base_key,
            number,
        }
    }
}

impl<'c, 'a> Reconciler<'c, 'a> {
    pub fn new(catalog: &'c ContentCatalog<'a>) -> Self {
        Self {
            catalog,
            used: HashSet::new(),
        }
    }

    /// Resolve `sequence` into an ordered unit list.
    ///
    /// With no sequence, or an empty one, the catalog order is returned
    /// unchanged and the report is empty.
    pub fn reconcile(mut self, sequence: Option<&[SequenceEntry]>) -> Reconciliation {
        let sequence = match sequence {
            Some(entries) if !entries.is_empty() => entries,
            _ => {
                return Reconciliation {
                    units: (0..self.catalog.len()).map(OrderedUnit::leftover).collect(),
                    report: ReconcileReport::default(),
                };
            }
        };

        let mut result = Reconciliation::default();
        for (position, entry) in sequence.iter().enumerate() {
            let keys = EntryKeys::new(entry);
            let outcome = self.resolve(entry, &keys);
            let label = self.resolve_label(&keys, outcome.as_ref());

            result.report.records.push(MatchRecord {
                position: position + 1,
                label: keys.label_text.to_string(),
                ordinal: keys.number.clone(),
                section: outcome.map(|o| self.describe(o.index)),
                outcome,
            });

            match (outcome, label) {
                (Some(outcome), label) => result.units.push(OrderedUnit {
                    source_index: Some(outcome.index),
                    label,
                    reused: outcome.reused,
                }),
                (None, Some(label)) => result.units.push(OrderedUnit {
                    source_index: None,
                    label: Some(label),
                    reused: false,
                }),
                (None, None) => {
                    debug!(position = position + 1, "dropping unmatched sequence entry without a label");
                }
            }
        }

        for index in 0..self.catalog.len() {
            if self.used.contains(&index) {
                continue;
            }
            result.units.push(OrderedUnit::leftover(index));
            result.report.leftovers.push(LeftoverRecord {
                index,
                section: self.describe(index),
            });
        }

        result
    }

    fn resolve(&mut self, entry: &SequenceEntry, keys: &EntryKeys<'_>) -> Option<MatchOutcome> {
        let catalog = self.catalog;
        if let Some(id) = entry.section_ref()
            && let Some(outcome) = self.select(catalog.by_id(id), MatchStrategy::SectionId, false)
        {
            return Some(outcome);
        }

        self.resolve_by_label(keys, false)
            .or_else(|| self.resolve_by_label(keys, true))
    }

    /// Lookups 2-5, in order.
    fn resolve_by_label(&mut self, keys: &EntryKeys<'_>, allow_reuse: bool) -> Option<MatchOutcome> {
        let catalog = self.catalog;
        let has_base = !keys.base_key.is_empty();

        if let (Some(number), true) = (keys.number.as_deref(), has_base) {
            let combined = format!("{} {}", keys.base_key, number);
            if let Some(outcome) = self.select(catalog.by_label(&combined), MatchStrategy::LabelNumber, allow_reuse) {
                return Some(outcome);
            }
            if let Some(outcome) = self.select(
                catalog.by_base(&keys.base_key, Some(number)),
                MatchStrategy::BaseNumber,
                allow_reuse,
            ) {
                return Some(outcome);
            }
        }

        if !keys.normalized.is_empty()
            && let Some(outcome) = self.select(catalog.by_label(&keys.normalized), MatchStrategy::Label, allow_reuse)
        {
            return Some(outcome);
        }

        if has_base {
            return self.select(catalog.by_base(&keys.base_key, None), MatchStrategy::Base, allow_reuse);
        }

        None
    }

    /// Pick the first available candidate and mark it consumed.
    fn select(&mut self, candidates: &[usize], strategy: MatchStrategy, allow_reuse: bool) -> Option<MatchOutcome> {
        let mut available = candidates
            .iter()
            .copied()
            .filter(|index| allow_reuse || !self.used.contains(index));
        let index = available.next()?;
        let candidates = 1 + available.count();

        let reused = !self.used.insert(index);
        Some(MatchOutcome {
            index,
            strategy,
            reused,
            candidates,
        })
    }

    fn resolve_label(&self, keys: &EntryKeys<'_>, outcome: Option<&MatchOutcome>) -> Option<String> {
        let matched = outcome.and_then(|o| self.catalog.get(o.index));

        if !keys.label_text.is_empty() {
            let mut label = keys.label_text.to_string();
            if let Some(number) = &keys.number {
                let append = keys.base_key.is_empty() || self.catalog.is_ordinal_ambiguous(&keys.base_key);
                let implied = format!("{} {}", keys.base_key, number);
                if append && normalize(keys.label_text) != implied.trim() {
                    label = format!("{} {}", keys.label_text, number);
                }
            }
            return Some(label);
        }

        if let (Some(number), Some(entry)) = (&keys.number, matched) {
            if let Some(primary) = entry.primary_label {
                return Some(primary.to_string());
            }
            if !keys.base_key.is_empty() {
                return Some(title_case(&format!("{} {}", keys.base_key, number)));
            }
        }

        matched.and_then(|entry| entry.primary_label).map(str::to_string)
    }

    fn describe(&self, index: usize) -> String {
        self.catalog
            .get(index)
            .map_or_else(|| "(no match)".to_string(), |entry| entry.describe())
    }
}
