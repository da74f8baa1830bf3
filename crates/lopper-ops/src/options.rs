// SPDX-License-Identifier: MIT OR Apache-2.0
//! Option structs for path-based operations.

/// Options shared by every path-based operation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PathOptions {
    /// Compare path names case-sensitively (default: insensitive)
    pub case_sensitive: bool,
}

impl PathOptions {
    /// Case-insensitive matching
    #[must_use]
    pub const fn new() -> Self {
        Self {
            case_sensitive: false,
        }
    }

    /// Switch to case-sensitive matching
    #[must_use]
    pub const fn case_sensitive(mut self) -> Self {
        self.case_sensitive = true;
        self
    }

    /// Set case sensitivity explicitly
    #[must_use]
    pub const fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }
}

/// Options for adding a property to an object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyOptions {
    /// Compare property and path names case-sensitively (default: insensitive)
    pub case_sensitive: bool,
    /// Overwrite an existing property whose value is `null` (default: true)
    pub ignore_null_existing: bool,
}

impl Default for PropertyOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertyOptions {
    /// Case-insensitive, overwriting existing nulls
    #[must_use]
    pub const fn new() -> Self {
        Self {
            case_sensitive: false,
            ignore_null_existing: true,
        }
    }

    /// Switch to case-sensitive matching
    #[must_use]
    pub const fn case_sensitive(mut self) -> Self {
        self.case_sensitive = true;
        self
    }

    /// Set case sensitivity explicitly
    #[must_use]
    pub const fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Leave an existing `null` property untouched
    #[must_use]
    pub const fn keep_null_existing(mut self) -> Self {
        self.ignore_null_existing = false;
        self
    }

    /// Set null handling explicitly
    #[must_use]
    pub const fn with_ignore_null_existing(mut self, ignore: bool) -> Self {
        self.ignore_null_existing = ignore;
        self
    }

    /// Path options carrying the same case rule
    #[must_use]
    pub const fn path(self) -> PathOptions {
        PathOptions::new().with_case_sensitive(self.case_sensitive)
    }
}

impl From<PathOptions> for PropertyOptions {
    fn from(options: PathOptions) -> Self {
        Self::new().with_case_sensitive(options.case_sensitive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert!(!PathOptions::default().case_sensitive);
        let opts = PropertyOptions::default();
        assert!(!opts.case_sensitive);
        assert!(opts.ignore_null_existing);
    }

    #[test]
    fn test_builders() {
        assert!(PathOptions::new().case_sensitive().case_sensitive);
        let opts = PropertyOptions::new().case_sensitive().keep_null_existing();
        assert!(opts.case_sensitive);
        assert!(!opts.ignore_null_existing);
        assert!(opts.path().case_sensitive);
        assert!(PropertyOptions::from(PathOptions::new().case_sensitive()).case_sensitive);
    }
}
