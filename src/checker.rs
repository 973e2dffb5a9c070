//! Output comparators used to grade task answers.

use std::fs;
use std::path::Path;

use anyhow::Context;

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Comparator {
    /// Files must be identical byte for byte.
    Exact,
    /// Files must contain the same whitespace-separated integers.
    Tokens,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
pub enum Verdict {
    #[strum(serialize = "OK")]
    Accepted,
    #[strum(serialize = "WA")]
    WrongAnswer,
}

impl From<bool> for Verdict {
    fn from(equal: bool) -> Self {
        if equal {
            Verdict::Accepted
        } else {
            Verdict::WrongAnswer
        }
    }
}

/// Compares `actual` against the reference output `expected`.
pub fn compare(comparator: Comparator, expected: &[u8], actual: &[u8]) -> Verdict {
    match comparator {
        Comparator::Exact => Verdict::from(expected == actual),
        Comparator::Tokens => {
            let expected = String::from_utf8_lossy(expected);
            let actual = String::from_utf8_lossy(actual);
            Verdict::from(itertools::equal(integers(&expected), integers(&actual)))
        }
    }
}

pub fn check_files(
    comparator: Comparator,
    expected: &Path,
    actual: &Path,
) -> anyhow::Result<Verdict> {
    let expected_bytes = fs::read(expected)
        .with_context(|| format!("reading expected output {}", expected.display()))?;
    let actual_bytes =
        fs::read(actual).with_context(|| format!("reading actual output {}", actual.display()))?;

    let verdict = compare(comparator, &expected_bytes, &actual_bytes);
    tracing::debug!(
        ?comparator,
        expected_len = expected_bytes.len(),
        actual_len = actual_bytes.len(),
        %verdict,
        "outputs compared"
    );
    Ok(verdict)
}

/// Leading run of integer tokens. Reading stops at the first token that is not
/// an integer, the same way a stream extraction would fail.
fn integers(text: &str) -> impl Iterator<Item = i64> + '_ {
    text.split_ascii_whitespace()
        .map_while(|token| token.parse().ok())
}
