use std::str::{FromStr, SplitAsciiWhitespace};

use anyhow::Context;

/// Reads whitespace-separated tokens from judge input.
pub struct Scanner<'a> {
    tokens: SplitAsciiWhitespace<'a>,
    consumed: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            tokens: input.split_ascii_whitespace(),
            consumed: 0,
        }
    }

    /// Parses the next token as a `T`.
    pub fn token<T>(&mut self) -> anyhow::Result<T>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        let index = self.consumed;
        let token = self
            .tokens
            .next()
            .with_context(|| format!("unexpected end of input at token {index}"))?;
        self.consumed += 1;
        token
            .parse()
            .with_context(|| format!("malformed token {index}: {token:?}"))
    }

    /// Parses the next `count` tokens.
    pub fn tokens<T>(&mut self, count: usize) -> anyhow::Result<Vec<T>>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        (0..count).map(|_| self.token()).collect()
    }
}
