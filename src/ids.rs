//! Identifier generation for cues, groups, actions, and slides.

use uuid::Uuid;

/// Source of fresh identifiers.
///
/// The assembler never creates identifiers on its own; every uuid in a
/// rebuilt document comes from the `IdSource` it was given.
pub trait IdSource {
    fn next_id(&mut self) -> String;
}

/// Random v4 UUIDs, uppercase hyphenated (`3F2504E0-4F89-41D3-...`).
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIds;

impl IdSource for RandomIds {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().hyphenated().to_string().to_uppercase()
    }
}

/// Deterministic identifiers (`ID-0001`, `ID-0002`, ...).
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    counter: u64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::with_prefix("ID")
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: 0,
        }
    }

    /// Number of identifiers handed out so far.
    pub fn issued(&self) -> u64 {
        self.counter
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> String {
        self.counter += 1;
        format!("{}-{:04}", self.prefix, self.counter)
    }
}

impl<T: IdSource + ?Sized> IdSource for &mut T {
    fn next_id(&mut self) -> String {
        (**self).next_id()
    }
}
