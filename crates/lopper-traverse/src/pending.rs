// SPDX-License-Identifier: MIT OR Apache-2.0
//! Deferred-open bookkeeping.
//!
//! Every container and property on the path from the root to the current
//! node owns one level in [`PendingWrites`]. A level writes its open token
//! only when something beneath it commits, and its close token only if the
//! open was written. Opens always cascade from the bottom of the stack, so
//! the opened levels form a prefix and a single counter tracks them.

use lopper_core::{JsonSink, LopperError, Result};
use smallvec::SmallVec;

/// The token a level writes when it opens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opener<'a> {
    /// `{` ... `}`
    Object,
    /// `[` ... `]`
    Array,
    /// A property name; closes silently
    Key(&'a str),
}

/// Lifecycle of one level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelState {
    /// Nothing beneath has committed yet
    Unopened,
    /// The open token was written
    Opened,
    /// The close token was written
    Closed,
}

/// Handle returned by [`PendingWrites::enter`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "every entered level must be exited"]
pub struct LevelId(usize);

#[derive(Debug)]
struct Level<'a> {
    opener: Opener<'a>,
    state: LevelState,
}

/// Stack of levels awaiting their first committed descendant
#[derive(Debug, Default)]
pub struct PendingWrites<'a> {
    levels: SmallVec<[Level<'a>; 16]>,
    opened: usize,
}

impl<'a> PendingWrites<'a> {
    /// Empty stack
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a new unopened level
    pub fn enter(&mut self, opener: Opener<'a>) -> LevelId {
        self.levels.push(Level {
            opener,
            state: LevelState::Unopened,
        });
        LevelId(self.levels.len() - 1)
    }

    /// Open every unopened level, bottom-up, exactly once each
    ///
    /// # Errors
    ///
    /// Returns an error if the sink rejects a token.
    pub fn commit<S: JsonSink + ?Sized>(&mut self, sink: &mut S) -> Result<()> {
        for level in &mut self.levels[self.opened..] {
            match level.opener {
                Opener::Object => sink.begin_object()?,
                Opener::Array => sink.begin_array()?,
                Opener::Key(key) => sink.write_key(key)?,
            }
            level.state = LevelState::Opened;
        }
        self.opened = self.levels.len();
        Ok(())
    }

    /// Pop the top level, writing its close token if it was opened
    ///
    /// Returns [`LevelState::Closed`] if the level had opened and
    /// [`LevelState::Unopened`] if it never did.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is not the top level or the sink rejects the
    /// close token.
    pub fn exit<S: JsonSink + ?Sized>(&mut self, id: LevelId, sink: &mut S) -> Result<LevelState> {
        if id.0 + 1 != self.levels.len() {
            return Err(LopperError::sink("pending write closed out of order"));
        }
        let Some(mut level) = self.levels.pop() else {
            return Err(LopperError::sink("no pending write to close"));
        };
        if level.state == LevelState::Unopened {
            return Ok(LevelState::Unopened);
        }
        match level.opener {
            Opener::Object => sink.end_object()?,
            Opener::Array => sink.end_array()?,
            Opener::Key(_) => {}
        }
        level.state = LevelState::Closed;
        self.opened -= 1;
        Ok(level.state)
    }

    /// State of a level still on the stack
    #[must_use]
    pub fn state(&self, id: LevelId) -> Option<LevelState> {
        self.levels.get(id.0).map(|level| level.state)
    }

    /// Number of levels on the stack
    #[must_use]
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    /// Number of levels whose open token was written
    #[must_use]
    pub const fn opened(&self) -> usize {
        self.opened
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopper_core::TreeSink;
    use serde_json::json;

    #[test]
    fn test_unopened_levels_write_nothing() {
        let mut sink = TreeSink::new();
        let mut pending = PendingWrites::new();
        let obj = pending.enter(Opener::Object);
        let key = pending.enter(Opener::Key("a"));
        let arr = pending.enter(Opener::Array);

        assert_eq!(pending.exit(arr, &mut sink).unwrap(), LevelState::Unopened);
        assert_eq!(pending.exit(key, &mut sink).unwrap(), LevelState::Unopened);
        assert_eq!(pending.exit(obj, &mut sink).unwrap(), LevelState::Unopened);
        assert_eq!(sink.finish().unwrap(), None);
    }

    #[test]
    fn test_commit_cascades_once() {
        let mut sink = TreeSink::new();
        let mut pending = PendingWrites::new();
        let obj = pending.enter(Opener::Object);
        let key = pending.enter(Opener::Key("B"));
        let arr = pending.enter(Opener::Array);

        pending.commit(&mut sink).unwrap();
        sink.write_value(&json!(1)).unwrap();
        // Second commit must not reopen anything
        pending.commit(&mut sink).unwrap();
        sink.write_value(&json!(2)).unwrap();
        assert_eq!(pending.state(arr), Some(LevelState::Opened));
        assert_eq!(pending.opened(), 3);

        assert_eq!(pending.exit(arr, &mut sink).unwrap(), LevelState::Closed);
        assert_eq!(pending.exit(key, &mut sink).unwrap(), LevelState::Closed);
        assert_eq!(pending.exit(obj, &mut sink).unwrap(), LevelState::Closed);
        assert_eq!(sink.finish().unwrap(), Some(json!({"B": [1, 2]})));
    }

    #[test]
    fn test_sibling_after_commit_opens_only_new_levels() {
        let mut sink = TreeSink::new();
        let mut pending = PendingWrites::new();
        let obj = pending.enter(Opener::Object);
        pending.commit(&mut sink).unwrap();

        let first = pending.enter(Opener::Key("x"));
        pending.exit(first, &mut sink).unwrap();

        let second = pending.enter(Opener::Key("y"));
        pending.commit(&mut sink).unwrap();
        sink.write_value(&json!(true)).unwrap();
        pending.exit(second, &mut sink).unwrap();

        pending.exit(obj, &mut sink).unwrap();
        assert_eq!(sink.finish().unwrap(), Some(json!({"y": true})));
    }

    #[test]
    fn test_exit_out_of_order_fails() {
        let mut sink = TreeSink::new();
        let mut pending = PendingWrites::new();
        let outer = pending.enter(Opener::Array);
        let _inner = pending.enter(Opener::Array);
        assert!(pending.exit(outer, &mut sink).is_err());
        assert_eq!(pending.depth(), 2);
    }
}
