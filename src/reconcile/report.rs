//! Operator-facing diagnostics for a reconciliation pass.

use std::fmt;

use super::MatchOutcome;

/// How one sequence entry was resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    /// 1-based position in the sequence.
    pub position: usize,
    /// Trimmed label text, empty when the entry had none.
    pub label: String,
    pub ordinal: Option<String>,
    /// Description of the matched section.
    pub section: Option<String>,
    pub outcome: Option<MatchOutcome>,
}

impl fmt::Display for MatchRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = if self.label.is_empty() { "(none)" } else { &self.label };
        let number = self.ordinal.as_deref().unwrap_or("-");
        let section = self.section.as_deref().unwrap_or("(no match)");
        let reason = self
            .outcome
            .map_or_else(|| "unmatched".to_string(), |o| o.reason());
        write!(
            f,
            "seq#{:02} \u{2022} label='{label}' number='{number}' -> {section} [{reason}]",
            self.position
        )
    }
}

/// A section the sequence never reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeftoverRecord {
    pub index: usize,
    pub section: String,
}

impl fmt::Display for LeftoverRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "leftover section \u{2022} {}", self.section)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub records: Vec<MatchRecord>,
    pub leftovers: Vec<LeftoverRecord>,
}

impl ReconcileReport {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty() && self.leftovers.is_empty()
    }

    /// Entries that resolved to nothing.
    pub fn unmatched(&self) -> impl Iterator<Item = &MatchRecord> {
        self.records.iter().filter(|r| r.outcome.is_none())
    }

    /// Summary block: a header line followed by one indented line per entry
    /// and per leftover. Empty when there is nothing to report.
    pub fn summary_lines(&self, heading: &str) -> Vec<String> {
        if self.is_empty() {
            return Vec::new();
        }
        let mut lines = Vec::with_capacity(1 + self.records.len() + self.leftovers.len());
        lines.push(format!("SEQUENCE MATCH SUMMARY \u{2022} {heading}"));
        lines.extend(self.records.iter().map(|r| format!("  {r}")));
        lines.extend(self.leftovers.iter().map(|l| format!("  {l}")));
        lines
    }
}
