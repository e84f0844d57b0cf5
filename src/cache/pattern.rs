//! Key Pattern Module
//!
//! Glob-style matching used for bulk invalidation (`user:*`, `*:summary`).
//!
//! Syntax:
//! - `*` matches any run of characters, including none
//! - `?` matches exactly one character
//! - `\` makes the next character literal

use std::fmt;

use crate::error::{CacheError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Literal(char),
    AnyOne,
    AnyRun,
}

// == Key Pattern ==
/// A parsed glob pattern, matched against whole keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPattern {
    source: String,
    tokens: Vec<Token>,
}

impl KeyPattern {
    // == Parse ==
    /// Parses a glob pattern.
    ///
    /// Fails with [`CacheError::InvalidPattern`] when the pattern ends in an
    /// unpaired escape.
    pub fn parse(pattern: &str) -> Result<Self> {
        let mut tokens = Vec::with_capacity(pattern.len());
        let mut chars = pattern.chars();

        while let Some(c) = chars.next() {
            let token = match c {
                '*' => {
                    // Collapse runs of stars
                    if tokens.last() == Some(&Token::AnyRun) {
                        continue;
                    }
                    Token::AnyRun
                }
                '?' => Token::AnyOne,
                '\\' => match chars.next() {
                    Some(escaped) => Token::Literal(escaped),
                    None => {
                        return Err(CacheError::InvalidPattern(format!(
                            "'{}' ends with an unpaired escape",
                            pattern
                        )))
                    }
                },
                other => Token::Literal(other),
            };
            tokens.push(token);
        }

        Ok(Self {
            source: pattern.to_string(),
            tokens,
        })
    }

    /// The pattern text as given.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    // == Matches ==
    /// Returns true when the whole key matches the pattern.
    ///
    /// Iterative wildcard matching that only backtracks to the last `*`,
    /// so the worst case is `O(key.len() * tokens.len())`.
    pub fn matches(&self, key: &str) -> bool {
        let key: Vec<char> = key.chars().collect();
        let tokens = &self.tokens;

        let (mut k, mut t) = (0usize, 0usize);
        // Position after the last `*` seen, and the key index it was tried at
        let mut star: Option<(usize, usize)> = None;

        while k < key.len() {
            match tokens.get(t) {
                Some(Token::AnyRun) => {
                    star = Some((t + 1, k));
                    t += 1;
                }
                Some(Token::AnyOne) => {
                    k += 1;
                    t += 1;
                }
                Some(Token::Literal(c)) if *c == key[k] => {
                    k += 1;
                    t += 1;
                }
                _ => match star {
                    Some((after_star, tried_at)) => {
                        // Let the star swallow one more character
                        t = after_star;
                        k = tried_at + 1;
                        star = Some((after_star, tried_at + 1));
                    }
                    None => return false,
                },
            }
        }

        tokens[t..].iter().all(|token| *token == Token::AnyRun)
    }
}

impl fmt::Display for KeyPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
