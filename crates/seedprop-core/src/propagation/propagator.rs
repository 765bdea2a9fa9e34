use std::collections::HashMap;

use super::normalizer::normalize;
use crate::labels::{
    for_each_record, read_labels, AttributedLabel, LabelMap, RecordSource, ScanStats,
};
use crate::Result;

/// Normalized message text to the label it expresses
pub type MessageLabels = HashMap<String, AttributedLabel>;

/// Per-account vote counts, in order of each account's first counted vote
#[derive(Debug, Clone, Default)]
pub struct VoteTally {
    accounts: Vec<String>,
    votes: HashMap<String, HashMap<String, u32>>,
}

impl VoteTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_vote(&mut self, account: &str, label: &str) {
        if !self.votes.contains_key(account) {
            self.accounts.push(account.to_string());
        }
        *self
            .votes
            .entry(account.to_string())
            .or_default()
            .entry(label.to_string())
            .or_insert(0) += 1;
    }

    pub fn votes_for(&self, account: &str) -> Option<&HashMap<String, u32>> {
        self.votes.get(account)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &HashMap<String, u32>)> {
        self.accounts
            .iter()
            .filter_map(|account| self.votes.get(account).map(|v| (account.as_str(), v)))
    }
}

/// Counters collected during one propagation run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PropagationStats {
    pub seed_accounts: usize,
    pub corpus_records: usize,
    pub skipped_lines: usize,
    pub attributed_messages: usize,
    pub ambiguous_messages: usize,
    pub voting_accounts: usize,
    pub inferred_accounts: usize,
}

#[derive(Debug, Clone)]
pub struct PropagationOutcome {
    pub labels: LabelMap,
    pub stats: PropagationStats,
}

/// Votes an account must exceed when no threshold is configured
pub const DEFAULT_THRESHOLD: u32 = 5;

/// Single pass label propagation through shared messages
#[derive(Debug, Clone, Copy)]
pub struct Propagator {
    threshold: u32,
}

impl Default for Propagator {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl Propagator {
    pub fn new(threshold: u32) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Load the seeds and run both corpus passes, returning seeds plus inferred labels
    pub fn propagate<S, C>(&self, seeds: &S, corpus: &C) -> Result<PropagationOutcome>
    where
        S: RecordSource + ?Sized,
        C: RecordSource + ?Sized,
    {
        let seed_labels = read_labels(seeds)?;
        tracing::info!(
            "Loaded {} seed accounts from {}",
            seed_labels.len(),
            seeds.name()
        );

        let (messages, scan) = self.attribute_messages(&seed_labels, corpus)?;
        let ambiguous = messages.values().filter(|l| l.is_ambiguous()).count();
        tracing::info!(
            "Attributed {} distinct messages ({} ambiguous)",
            messages.len(),
            ambiguous
        );
        if scan.skipped > 0 {
            tracing::debug!(skipped = scan.skipped, "Skipped malformed corpus lines");
        }

        let tally = self.tally_votes(&messages, corpus)?;
        let labels = self.decide(&tally, &seed_labels);
        let inferred = labels
            .iter()
            .filter(|(account, _)| !seed_labels.contains(account))
            .count();

        tracing::info!(
            voting_accounts = tally.len(),
            inferred,
            threshold = self.threshold,
            "Propagation complete"
        );

        Ok(PropagationOutcome {
            stats: PropagationStats {
                seed_accounts: seed_labels.len(),
                corpus_records: scan.records,
                skipped_lines: scan.skipped,
                attributed_messages: messages.len(),
                ambiguous_messages: ambiguous,
                voting_accounts: tally.len(),
                inferred_accounts: inferred,
            },
            labels,
        })
    }

    /// First corpus pass: attribute each message shared by a seed account to that account's label
    pub fn attribute_messages<C: RecordSource + ?Sized>(
        &self,
        seeds: &LabelMap,
        corpus: &C,
    ) -> Result<(MessageLabels, ScanStats)> {
        let mut messages = MessageLabels::new();

        let scan = for_each_record(corpus.open()?, |record| {
            let Some(label) = seeds.get(&record.account) else {
                return Ok(());
            };

            messages
                .entry(normalize(&record.value))
                .and_modify(|attributed| attributed.merge(label))
                .or_insert_with(|| AttributedLabel::Concrete(label.to_string()));
            Ok(())
        })?;

        Ok((messages, scan))
    }

    /// Second corpus pass: one vote per record whose message has a concrete attribution
    pub fn tally_votes<C: RecordSource + ?Sized>(
        &self,
        messages: &MessageLabels,
        corpus: &C,
    ) -> Result<VoteTally> {
        let mut tally = VoteTally::new();

        for_each_record(corpus.open()?, |record| {
            if let Some(label) = messages
                .get(&normalize(&record.value))
                .and_then(AttributedLabel::concrete)
            {
                tally.add_vote(&record.account, label);
            }
            Ok(())
        })?;

        Ok(tally)
    }

    /// Keep accounts whose votes all go to one label and exceed the threshold,
    /// then overlay the seeds so they always win
    pub fn decide(&self, tally: &VoteTally, seeds: &LabelMap) -> LabelMap {
        let mut labels = LabelMap::new();

        for (account, votes) in tally.iter() {
            if votes.len() != 1 {
                continue;
            }
            if let Some((label, &count)) = votes.iter().next() {
                if count > self.threshold {
                    labels.insert(account, label.as_str());
                }
            }
        }

        for (account, label) in seeds.iter() {
            labels.insert(account, label);
        }

        labels
    }
}
