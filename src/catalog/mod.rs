//! Lookup indices over the content sections of a payload.
//!
//! The catalog is built once per payload and never mutated. Every candidate
//! list it hands out is in catalog order, which is what makes the
//! reconciler's first-candidate tie-break deterministic.

use std::collections::{BTreeMap, HashMap};

use crate::label::{normalize, split_base_and_ordinal};
use crate::payload::SectionPayload;

/// One indexed section with the labels derived from it.
#[derive(Debug, Clone)]
pub struct CatalogEntry<'a> {
    pub index: usize,
    pub section: &'a SectionPayload,
    pub id: Option<String>,
    /// First non-empty of `sequenceLabel` and `name`.
    pub primary_label: Option<&'a str>,
    /// Base phrase of the primary label.
    pub base: Option<String>,
    /// Ordinal of the primary label.
    pub ordinal: Option<String>,
}

impl CatalogEntry<'_> {
    pub fn describe(&self) -> String {
        self.section.describe()
    }
}

/// Sections sharing one base phrase.
#[derive(Debug, Default)]
struct BaseIndex {
    /// Every section with this base, with or without an ordinal.
    any: Vec<usize>,
    by_ordinal: BTreeMap<String, Vec<usize>>,
}

/// Content sections indexed by id, normalized label, and base/ordinal.
#[derive(Debug)]
pub struct ContentCatalog<'a> {
    entries: Vec<CatalogEntry<'a>>,
    by_id: HashMap<String, Vec<usize>>,
    by_label: HashMap<String, Vec<usize>>,
    by_base: HashMap<String, BaseIndex>,
}

impl<'a> ContentCatalog<'a> {
    pub fn new(sections: &'a [SectionPayload]) -> Self {
        let mut catalog = Self {
            entries: Vec::with_capacity(sections.len()),
            by_id: HashMap::new(),
            by_label: HashMap::new(),
            by_base: HashMap::new(),
        };

        for (index, section) in sections.iter().enumerate() {
            let id = section.section_id();
            if let Some(id) = &id {
                push_unique(catalog.by_id.entry(id.clone()).or_default(), index);
            }

            for raw in section.raw_labels() {
                let normalized = normalize(raw);
                if normalized.is_empty() {
                    continue;
                }
                push_unique(catalog.by_label.entry(normalized).or_default(), index);

                let (base, ordinal) = split_base_and_ordinal(raw);
                let slot = catalog.by_base.entry(base).or_default();
                push_unique(&mut slot.any, index);
                if let Some(ordinal) = ordinal {
                    push_unique(slot.by_ordinal.entry(ordinal).or_default(), index);
                }
            }

            let primary_label = section.primary_label();
            let (base, ordinal) = match primary_label {
                Some(label) => split_base_and_ordinal(label),
                None => (String::new(), None),
            };
            catalog.entries.push(CatalogEntry {
                index,
                section,
                id,
                primary_label,
                base: (!base.is_empty()).then_some(base),
                ordinal,
            });
        }

        catalog
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CatalogEntry<'a>> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[CatalogEntry<'a>] {
        &self.entries
    }

    /// Sections carrying external id `id`.
    pub fn by_id(&self, id: &str) -> &[usize] {
        self.by_id.get(id).map_or(&[], Vec::as_slice)
    }

    /// Sections with a label normalizing to `normalized`.
    pub fn by_label(&self, normalized: &str) -> &[usize] {
        self.by_label.get(normalized).map_or(&[], Vec::as_slice)
    }

    /// Sections with base phrase `base` and the given ordinal. `None` is the
    /// wildcard: every section with that base, numbered or not.
    pub fn by_base(&self, base: &str, ordinal: Option<&str>) -> &[usize] {
        let Some(slot) = self.by_base.get(base) else {
            return &[];
        };
        match ordinal {
            None => &slot.any,
            Some(ordinal) => slot.by_ordinal.get(ordinal).map_or(&[], Vec::as_slice),
        }
    }

    /// True when `base` appears with two or more distinct ordinals.
    pub fn is_ordinal_ambiguous(&self, base: &str) -> bool {
        self.by_base
            .get(base)
            .is_some_and(|slot| slot.by_ordinal.len() > 1)
    }
}

/// Append `index` unless it is already the last element. Indices arrive in
/// ascending order, so this keeps lists sorted and duplicate-free.
fn push_unique(list: &mut Vec<usize>, index: usize) {
    if list.last() != Some(&index) {
        list.push(index);
    }
}
