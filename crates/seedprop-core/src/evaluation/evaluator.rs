use std::fmt;

use crate::labels::{for_each_record, read_labels, RecordSource};
use crate::{Error, Result};

/// Agreement between a produced label file and gold labels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub accuracy: f64,
    pub correct: u64,
    pub incorrect: u64,
    pub total: u64,
}

impl Evaluation {
    fn from_counts(correct: u64, incorrect: u64) -> Result<Self> {
        let total = correct + incorrect;
        if total == 0 {
            return Err(Error::EmptyEvaluation);
        }

        Ok(Self {
            accuracy: correct as f64 / total as f64,
            correct,
            incorrect,
            total,
        })
    }
}

/// Render a ratio the way Python's `repr(float)` does: the shortest round-trip
/// digits, a trailing `.0` on whole values, and exponent form below `1e-4`.
pub fn format_ratio(value: f64) -> String {
    if value != 0.0 && value.abs() < 1e-4 {
        let formatted = format!("{:e}", value);
        return match formatted.split_once('e') {
            Some((mantissa, exponent)) => {
                let (sign, digits) = match exponent.strip_prefix('-') {
                    Some(digits) => ('-', digits),
                    None => ('+', exponent),
                };
                format!("{}e{}{:0>2}", mantissa, sign, digits)
            }
            None => formatted,
        };
    }

    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

impl fmt::Display for Evaluation {
    /// Renders `<accuracy> (<correct> out of <total>)`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} out of {})",
            format_ratio(self.accuracy),
            self.correct,
            self.total
        )
    }
}

/// Compare every line of `produced` with the gold label of its account.
///
/// Duplicate accounts in `produced` are counted once per line. An account
/// missing from `gold` fails with [`Error::UnknownAccount`], and an empty
/// `produced` fails with [`Error::EmptyEvaluation`].
pub fn evaluate<G, P>(gold: &G, produced: &P) -> Result<Evaluation>
where
    G: RecordSource + ?Sized,
    P: RecordSource + ?Sized,
{
    let gold_labels = read_labels(gold)?;
    tracing::info!(
        "Loaded {} gold labels from {}",
        gold_labels.len(),
        gold.name()
    );

    let mut correct = 0u64;
    let mut incorrect = 0u64;

    for_each_record(produced.open()?, |record| {
        let expected = gold_labels
            .get(&record.account)
            .ok_or_else(|| Error::UnknownAccount(record.account.clone()))?;

        if expected == record.value {
            correct += 1;
        } else {
            incorrect += 1;
        }
        Ok(())
    })?;

    let evaluation = Evaluation::from_counts(correct, incorrect)?;
    tracing::info!(
        correct = evaluation.correct,
        incorrect = evaluation.incorrect,
        "Evaluated {}",
        produced.name()
    );

    Ok(evaluation)
}
