// SPDX-License-Identifier: MIT OR Apache-2.0
//! Lazy collection mode.
//!
//! [`Matches`] is a pull-based cursor over the source tree. It keeps an
//! explicit stack of partially consumed child iterators, so every call to
//! `next` resumes exactly where the previous one stopped, and dropping it
//! early releases nothing but memory.

use lopper_core::{Breadcrumb, Decide, Flow};
use serde_json::Value;
use std::fmt;
use std::iter::{Enumerate, FusedIterator};
use tracing::trace;

enum Children<'a> {
    Object(serde_json::map::Iter<'a>),
    Array(Enumerate<std::slice::Iter<'a, Value>>),
}

impl<'a> Children<'a> {
    fn of(node: &'a Value) -> Option<Self> {
        match node {
            Value::Object(map) => Some(Self::Object(map.iter())),
            Value::Array(items) => Some(Self::Array(items.iter().enumerate())),
            _ => None,
        }
    }
}

struct Frame<'a> {
    children: Children<'a>,
    crumb: Breadcrumb<'a>,
}

impl<'a> Frame<'a> {
    fn next_child(&mut self) -> Option<(&'a Value, Breadcrumb<'a>)> {
        match &mut self.children {
            Children::Object(iter) => iter
                .next()
                .map(|(key, value)| (value, self.crumb.key(key))),
            Children::Array(iter) => iter
                .next()
                .map(|(index, value)| (value, self.crumb.index(index))),
        }
    }
}

/// Marked descendants of a root, in depth-first pre-order
///
/// The root itself is never evaluated. A marked container is yielded before
/// its children are considered.
pub struct Matches<'a, D> {
    decide: D,
    stack: Vec<Frame<'a>>,
}

impl<'a, D: Decide> Matches<'a, D> {
    /// Start a walk over the descendants of `root`
    #[must_use]
    pub fn new(root: &'a Value, decide: D) -> Self {
        let stack = Children::of(root)
            .map(|children| Frame {
                children,
                crumb: Breadcrumb::root(),
            })
            .into_iter()
            .collect();
        Self { decide, stack }
    }

    /// Advance to the next match, returning its breadcrumb as well
    pub fn next_located(&mut self) -> Option<(&'a Value, Breadcrumb<'a>)> {
        loop {
            let frame = self.stack.last_mut()?;
            let Some((node, crumb)) = frame.next_child() else {
                self.stack.pop();
                continue;
            };

            let instruction = self.decide.decide(node, &crumb);
            let marked = instruction.is_marked();
            match instruction.flow {
                Flow::Children => {
                    if let Some(children) = Children::of(node) {
                        self.stack.push(Frame {
                            children,
                            crumb: crumb.clone(),
                        });
                    }
                }
                Flow::Sibling => {}
                Flow::Parent => {
                    self.stack.pop();
                }
                Flow::Stop => {
                    trace!(breadcrumb = %crumb, "stop");
                    self.stack.clear();
                }
            }

            if marked {
                return Some((node, crumb));
            }
        }
    }

    /// Yield `(node, breadcrumb)` pairs instead of bare nodes
    #[must_use]
    pub const fn located(self) -> Located<'a, D> {
        Located { inner: self }
    }

    /// Depth of the suspended walk
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

impl<'a, D: Decide> Iterator for Matches<'a, D> {
    type Item = &'a Value;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_located().map(|(node, _)| node)
    }
}

impl<D: Decide> FusedIterator for Matches<'_, D> {}

impl<D> fmt::Debug for Matches<'_, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matches")
            .field("depth", &self.stack.len())
            .finish_non_exhaustive()
    }
}

/// Iterator adapter returned by [`Matches::located`]
#[derive(Debug)]
pub struct Located<'a, D> {
    inner: Matches<'a, D>,
}

impl<'a, D: Decide> Iterator for Located<'a, D> {
    type Item = (&'a Value, Breadcrumb<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next_located()
    }
}

impl<D: Decide> FusedIterator for Located<'_, D> {}

/// Lazily collect the descendants of `root` marked by `decide`
#[must_use]
pub fn enumerate<D: Decide>(root: &Value, decide: D) -> Matches<'_, D> {
    Matches::new(root, decide)
}
