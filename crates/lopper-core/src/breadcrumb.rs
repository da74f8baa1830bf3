// SPDX-License-Identifier: MIT OR Apache-2.0
//! Structurally shared breadcrumb trail.
//!
//! A [`Breadcrumb`] is the ordered list of segments from the document root to
//! the node being visited. Extending a breadcrumb never mutates it: the child
//! shares its parent's links, so siblings (and suspended iterators) always see
//! the prefix they were created with.

use std::fmt;
use std::sync::Arc;

/// One step in a breadcrumb
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment<'a> {
    /// Object property name
    Key(&'a str),
    /// Zero-based array index, rendered as `[i]`
    Index(usize),
}

impl Segment<'_> {
    /// Property name, if this is a key segment
    #[must_use]
    pub const fn as_key(&self) -> Option<&str> {
        match self {
            Self::Key(k) => Some(*k),
            Self::Index(_) => None,
        }
    }

    /// Array index, if this is an index segment
    #[must_use]
    pub const fn as_index(&self) -> Option<usize> {
        match self {
            Self::Index(i) => Some(*i),
            Self::Key(_) => None,
        }
    }

    /// Whether this is a synthesized array index segment
    #[must_use]
    pub const fn is_index(&self) -> bool {
        matches!(self, Self::Index(_))
    }
}

impl fmt::Display for Segment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(k) => f.write_str(k),
            Self::Index(i) => write!(f, "[{i}]"),
        }
    }
}

#[derive(Debug)]
struct Link<'a> {
    segment: Segment<'a>,
    parent: Option<Arc<Link<'a>>>,
}

/// Persistent path from the root to the current node
#[derive(Debug, Clone, Default)]
pub struct Breadcrumb<'a> {
    head: Option<Arc<Link<'a>>>,
    len: usize,
}

impl<'a> Breadcrumb<'a> {
    /// The empty breadcrumb of the root node
    #[must_use]
    pub const fn root() -> Self {
        Self { head: None, len: 0 }
    }

    /// A new breadcrumb one segment deeper, sharing this one as its prefix
    #[must_use]
    pub fn child(&self, segment: Segment<'a>) -> Self {
        Self {
            head: Some(Arc::new(Link {
                segment,
                parent: self.head.clone(),
            })),
            len: self.len + 1,
        }
    }

    /// Shorthand for `child(Segment::Key(key))`
    #[must_use]
    pub fn key(&self, key: &'a str) -> Self {
        self.child(Segment::Key(key))
    }

    /// Shorthand for `child(Segment::Index(index))`
    #[must_use]
    pub fn index(&self, index: usize) -> Self {
        self.child(Segment::Index(index))
    }

    /// Number of segments
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether this is the root breadcrumb
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The segment of the current node
    #[must_use]
    pub fn last(&self) -> Option<Segment<'a>> {
        self.head.as_ref().map(|link| link.segment)
    }

    /// The segment at `depth`, counted from the root
    #[must_use]
    pub fn get(&self, depth: usize) -> Option<Segment<'a>> {
        if depth >= self.len {
            return None;
        }
        self.iter_rev().nth(self.len - 1 - depth)
    }

    /// The breadcrumb of the parent node
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.head.as_ref().map(|link| Self {
            head: link.parent.clone(),
            len: self.len - 1,
        })
    }

    /// Segments from the current node back to the root
    pub fn iter_rev(&self) -> impl Iterator<Item = Segment<'a>> + '_ {
        let mut cursor = self.head.as_deref();
        std::iter::from_fn(move || {
            let link = cursor?;
            cursor = link.parent.as_deref();
            Some(link.segment)
        })
    }

    /// Segments in root-to-node order
    #[must_use]
    pub fn segments(&self) -> Vec<Segment<'a>> {
        let mut out: Vec<_> = self.iter_rev().collect();
        out.reverse();
        out
    }
}

impl PartialEq for Breadcrumb<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter_rev().eq(other.iter_rev())
    }
}

impl Eq for Breadcrumb<'_> {}

impl fmt::Display for Breadcrumb<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments().iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}
