use std::collections::HashMap;
use std::fmt;

/// One decoded input line: an account and the field that follows it.
/// For seed and gold files the value is a label, for the corpus it is the raw message text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub account: String,
    pub value: String,
}

/// Label a normalized message is believed to express
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AttributedLabel {
    /// Shared only by accounts carrying this label
    Concrete(String),
    /// Shared by accounts with two or more distinct labels; ignored when voting
    Ambiguous,
}

impl AttributedLabel {
    pub fn concrete(&self) -> Option<&str> {
        match self {
            Self::Concrete(label) => Some(label),
            Self::Ambiguous => None,
        }
    }

    pub fn is_ambiguous(&self) -> bool {
        matches!(self, Self::Ambiguous)
    }

    /// Fold another sighting of the same message into this attribution.
    /// A conflicting label turns the attribution ambiguous, and ambiguity is permanent.
    pub fn merge(&mut self, label: &str) {
        if let Self::Concrete(current) = self {
            if current != label {
                *self = Self::Ambiguous;
            }
        }
    }
}

impl fmt::Display for AttributedLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Concrete(label) => f.write_str(label),
            Self::Ambiguous => f.write_str("UNK"),
        }
    }
}

/// Account to label mapping that iterates in first-insertion order.
/// Re-inserting an account replaces its label but keeps its position.
#[derive(Debug, Clone, Default)]
pub struct LabelMap {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl LabelMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the label for `account`, returning the previous label
    pub fn insert(&mut self, account: impl Into<String>, label: impl Into<String>) -> Option<String> {
        let account = account.into();
        let label = label.into();

        match self.index.get(&account) {
            Some(&pos) => Some(std::mem::replace(&mut self.entries[pos].1, label)),
            None => {
                self.index.insert(account.clone(), self.entries.len());
                self.entries.push((account, label));
                None
            }
        }
    }

    pub fn get(&self, account: &str) -> Option<&str> {
        self.index
            .get(account)
            .map(|&pos| self.entries[pos].1.as_str())
    }

    pub fn contains(&self, account: &str) -> bool {
        self.index.contains_key(account)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(account, label)| (account.as_str(), label.as_str()))
    }
}

impl PartialEq for LabelMap {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for LabelMap {}

impl<A: Into<String>, L: Into<String>> FromIterator<(A, L)> for LabelMap {
    fn from_iter<I: IntoIterator<Item = (A, L)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (account, label) in iter {
            map.insert(account, label);
        }
        map
    }
}
