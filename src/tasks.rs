//! Drivers that read a judge task from text input, run it against a segment
//! tree and write the answers.

use std::io::Write;

use anyhow::Context;

use crate::scanner::Scanner;
use crate::{Gcd, GcdTree, MaxIndex, MaxIndexTree};

/// A line of the range gcd command stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::EnumString, strum::Display)]
pub enum Command {
    #[strum(serialize = "s")]
    Query,
    #[strum(serialize = "u")]
    Update,
}

/// Input: `n`, `n` values, `k`, then `k` pairs `l r`.
///
/// Prints the maximum of each range followed by its position, one range per
/// line. Equal maxima resolve to the leftmost position.
pub fn range_max<W: Write>(input: &str, out: &mut W) -> anyhow::Result<()> {
    let mut scanner = Scanner::new(input);
    let n: usize = scanner.token().context("reading element count")?;
    let values: Vec<i64> = scanner.tokens(n).context("reading elements")?;
    let tree = MaxIndexTree::build(values, MaxIndex)?;

    let k: usize = scanner.token().context("reading query count")?;
    for i in 0..k {
        let l = scanner.token()?;
        let r = scanner.token()?;
        let pos = tree
            .query(l, r)
            .with_context(|| format!("query {}", i + 1))?
            .context("range has no maximum")?;
        writeln!(out, "{} {}", tree.get(pos)?, pos)?;
    }

    tracing::debug!(n, queries = k, "range-max finished");
    Ok(())
}

/// Input: `n`, `n` values, `k`, then `k` commands `c x y`.
///
/// `s l r` prints the gcd of positions `l..=r` followed by a space, `u p v`
/// sets position `p` to `v`.
pub fn range_gcd<W: Write>(input: &str, out: &mut W) -> anyhow::Result<()> {
    let mut scanner = Scanner::new(input);
    let n: usize = scanner.token().context("reading element count")?;
    let values: Vec<i64> = scanner.tokens(n).context("reading elements")?;
    let mut tree = GcdTree::build(values, Gcd)?;

    let k: usize = scanner.token().context("reading command count")?;
    let mut answered = 0;
    for i in 0..k {
        let command: Command = scanner
            .token()
            .with_context(|| format!("reading command {}", i + 1))?;
        match command {
            Command::Query => {
                let l = scanner.token()?;
                let r = scanner.token()?;
                let g = tree
                    .query(l, r)
                    .with_context(|| format!("command {}", i + 1))?;
                write!(out, "{g} ")?;
                answered += 1;
            }
            Command::Update => {
                let p = scanner.token()?;
                let v = scanner.token()?;
                tree.update(p, v)
                    .with_context(|| format!("command {}", i + 1))?;
            }
        }
    }

    tracing::debug!(n, commands = k, answered, "range-gcd finished");
    Ok(())
}
