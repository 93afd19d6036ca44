//! Message watermark
//!
//! The highest `sent_at` seen for one conversation. It is owned by the caller
//! and threaded through every message poll; the only mutator is
//! [`Watermark::advance`], which never moves it backwards.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Watermark(String);

impl Watermark {
    /// Start from a known `sent_at` (e.g. the last message already on screen)
    pub fn new(sent_at: impl Into<String>) -> Self {
        Watermark(sent_at.into())
    }

    /// Nothing seen yet
    pub fn empty() -> Self {
        Watermark(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether a message with this `sent_at` has not been seen yet
    pub fn is_behind(&self, sent_at: &str) -> bool {
        sent_at > self.0.as_str()
    }

    /// Move forward to `sent_at` if it is newer. Returns whether it moved.
    pub fn advance(&mut self, sent_at: &str) -> bool {
        if self.is_behind(sent_at) {
            self.0 = sent_at.to_string();
            true
        } else {
            false
        }
    }
}

impl fmt::Display for Watermark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
