// SPDX-License-Identifier: MIT OR Apache-2.0
//! Rewrite mode.
//!
//! [`Rewriter`] walks a source tree depth-first, asks its decision function
//! about every node, and streams the surviving nodes into a [`JsonSink`].
//! Ancestors of a surviving node are opened through [`PendingWrites`], so a
//! container with nothing surviving beneath it leaves no trace in the output
//! unless it was kept in its own right.
//!
//! How marks are read depends on the [`MarkSemantic`]:
//!
//! | Semantic  | unmarked                          | `Take`        | `TakeOrReplace`   |
//! |-----------|-----------------------------------|---------------|-------------------|
//! | `Pick`    | dropped; drilled lazily on `Children` | emitted    | emitted via hook  |
//! | `Ignore`  | kept; drilled on `Children`           | dropped    | dropped           |
//! | `Replace` | kept; drilled eagerly on `Children`   | emitted    | emitted via hook  |
//!
//! Under `Ignore` a non-empty array element is drilled lazily, so an element
//! whose every child was dropped disappears from its array. Any other drilled
//! container is opened eagerly and survives as `{}` or `[]`.

use crate::pending::{Opener, PendingWrites};
use lopper_core::{
    Breadcrumb, Decide, Document, Flow, JsonSink, JsonWriter, Mark, MarkSemantic, MatchHook,
    Result, TreeSink,
};
use serde_json::{Map, Value};
use std::io;
use tracing::{debug, trace};

/// Counters collected during one rewrite
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteStats {
    /// Nodes handed to the decision function
    pub visited: usize,
    /// Nodes written to the output (whole subtrees count once)
    pub emitted: usize,
    /// Nodes removed by a mark or by the hook
    pub dropped: usize,
    /// Whether a `Stop` instruction ended the walk early
    pub stopped: bool,
}

/// Configurable rewrite over a decision function
///
/// ```
/// use lopper_core::{Breadcrumb, Instruction, MarkSemantic};
/// use lopper_traverse::Rewriter;
/// use serde_json::{Value, json};
///
/// let source = json!({"a": 1, "b": "two", "c": [3, "four"]});
/// let doc = Rewriter::new(|node: &Value, _: &Breadcrumb<'_>| {
///     if node.is_string() { Instruction::TAKE } else { Instruction::TO_CHILDREN }
/// })
/// .semantic(MarkSemantic::Ignore)
/// .rewrite(&source)
/// .unwrap();
/// assert_eq!(doc, json!({"a": 1, "c": [3]}));
/// ```
pub struct Rewriter<'h, D> {
    decide: D,
    semantic: MarkSemantic,
    hook: Option<Box<dyn MatchHook + 'h>>,
}

impl<D> std::fmt::Debug for Rewriter<'_, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rewriter")
            .field("semantic", &self.semantic)
            .field("hook", &self.hook.is_some())
            .finish_non_exhaustive()
    }
}

impl<'h, D: Decide> Rewriter<'h, D> {
    /// Rewriter with `Pick` semantics and no hook
    pub const fn new(decide: D) -> Self {
        Self {
            decide,
            semantic: MarkSemantic::Pick,
            hook: None,
        }
    }

    /// Set the mark semantic
    #[must_use]
    pub const fn semantic(mut self, semantic: MarkSemantic) -> Self {
        self.semantic = semantic;
        self
    }

    /// Route `TakeOrReplace` matches through `hook`
    #[must_use]
    pub fn on_match<H: MatchHook + 'h>(mut self, hook: H) -> Self {
        self.hook = Some(Box::new(hook));
        self
    }

    /// Rewrite `root` into a new document
    ///
    /// A scalar root that does not survive becomes `null`.
    ///
    /// # Errors
    ///
    /// Returns the first hook failure; no partial output is produced.
    pub fn rewrite(&mut self, root: &Value) -> Result<Document> {
        let mut sink = TreeSink::new();
        self.rewrite_into(root, &mut sink)?;
        Ok(Document::from_value(sink.finish()?.unwrap_or(Value::Null)))
    }

    /// Stream the rewrite of `root` into `sink`
    ///
    /// # Errors
    ///
    /// Returns the first hook or sink failure.
    pub fn rewrite_into<S: JsonSink + ?Sized>(
        &mut self,
        root: &Value,
        sink: &mut S,
    ) -> Result<RewriteStats> {
        debug!(semantic = %self.semantic, hooked = self.hook.is_some(), "rewrite start");
        let mut engine = Engine {
            decide: &mut self.decide,
            hook: self.hook.as_deref_mut(),
            semantic: self.semantic,
            sink,
            pending: PendingWrites::new(),
            stats: RewriteStats::default(),
        };
        engine.run(root)?;
        let stats = engine.stats;
        debug!(
            visited = stats.visited,
            emitted = stats.emitted,
            dropped = stats.dropped,
            stopped = stats.stopped,
            "rewrite finish"
        );
        Ok(stats)
    }

    /// Write the rewrite of `root` to `writer` as compact JSON
    ///
    /// The output is rendered into a buffer first; `writer` receives nothing
    /// unless the whole rewrite succeeds.
    ///
    /// # Errors
    ///
    /// Returns the first hook or I/O failure.
    pub fn rewrite_to_writer<W: io::Write>(&mut self, root: &Value, mut writer: W) -> Result<W> {
        let mut out = JsonWriter::new(Vec::new());
        self.rewrite_into(root, &mut out)?;
        if !out.has_output() {
            out.write_value(&Value::Null)?;
        }
        let rendered = out.finish()?;
        writer.write_all(&rendered)?;
        Ok(writer)
    }
}

/// Keep only nodes marked by `decide`
///
/// # Errors
///
/// Never fails for hook-free rewrites into memory; the `Result` mirrors
/// [`Rewriter::rewrite`].
pub fn filter<D: Decide>(root: &Value, decide: D) -> Result<Document> {
    Rewriter::new(decide).rewrite(root)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Signal {
    Continue,
    Stop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Open {
    Lazy,
    Eager,
}

fn is_element(crumb: &Breadcrumb<'_>) -> bool {
    crumb.last().is_some_and(|segment| segment.is_index())
}

fn is_empty_container(node: &Value) -> bool {
    match node {
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

struct Engine<'a, 'e, 'h, D, S: ?Sized> {
    decide: &'e mut D,
    hook: Option<&'e mut (dyn MatchHook + 'h)>,
    semantic: MarkSemantic,
    sink: &'e mut S,
    pending: PendingWrites<'a>,
    stats: RewriteStats,
}

impl<'a, D: Decide, S: JsonSink + ?Sized> Engine<'a, '_, '_, D, S> {
    fn run(&mut self, root: &'a Value) -> Result<()> {
        let crumb = Breadcrumb::root();
        let signal = if root.is_object() || root.is_array() {
            // The root container is always emitted, even when empty
            self.descend(root, &crumb, Open::Eager)?
        } else {
            match self.visit(root, crumb)? {
                Flow::Stop => Signal::Stop,
                _ => Signal::Continue,
            }
        };
        self.stats.stopped = signal == Signal::Stop;
        Ok(())
    }

    /// Decide on one node and honour its mark; returns the flow to apply
    fn visit(&mut self, node: &'a Value, crumb: Breadcrumb<'a>) -> Result<Flow> {
        let instruction = self.decide.decide(node, &crumb);
        self.stats.visited += 1;
        let flow = instruction.flow;
        let drill = flow == Flow::Children && (node.is_object() || node.is_array());

        let signal = match (self.semantic, instruction.mark) {
            (MarkSemantic::Pick, Mark::None) if drill => self.descend(node, &crumb, Open::Lazy)?,
            (MarkSemantic::Pick, Mark::None) => Signal::Continue,
            (MarkSemantic::Ignore, Mark::Take | Mark::TakeOrReplace) => {
                trace!(breadcrumb = %crumb, "dropped by mark");
                self.stats.dropped += 1;
                Signal::Continue
            }
            (MarkSemantic::Ignore, Mark::None) if drill => {
                let open = if is_element(&crumb) && !is_empty_container(node) {
                    Open::Lazy
                } else {
                    Open::Eager
                };
                self.descend(node, &crumb, open)?
            }
            (MarkSemantic::Replace, Mark::None) if drill => {
                self.descend(node, &crumb, Open::Eager)?
            }
            (MarkSemantic::Ignore | MarkSemantic::Replace, Mark::None)
            | (MarkSemantic::Pick | MarkSemantic::Replace, Mark::Take) => {
                self.emit(node)?;
                Signal::Continue
            }
            (MarkSemantic::Pick | MarkSemantic::Replace, Mark::TakeOrReplace) => {
                self.emit_hooked(node, &crumb)?;
                Signal::Continue
            }
        };

        Ok(if signal == Signal::Stop { Flow::Stop } else { flow })
    }

    fn descend(&mut self, node: &'a Value, crumb: &Breadcrumb<'a>, open: Open) -> Result<Signal> {
        let opener = match node {
            Value::Object(_) => Opener::Object,
            Value::Array(_) => Opener::Array,
            _ => return Ok(Signal::Continue),
        };
        let id = self.pending.enter(opener);
        if open == Open::Eager {
            self.pending.commit(&mut *self.sink)?;
        }
        let signal = match node {
            Value::Object(map) => self.walk_object(map, crumb)?,
            Value::Array(items) => self.walk_array(items, crumb)?,
            _ => Signal::Continue,
        };
        self.pending.exit(id, &mut *self.sink)?;
        Ok(signal)
    }

    fn walk_object(&mut self, map: &'a Map<String, Value>, crumb: &Breadcrumb<'a>) -> Result<Signal> {
        for (key, value) in map {
            let id = self.pending.enter(Opener::Key(key));
            let flow = self.visit(value, crumb.key(key))?;
            self.pending.exit(id, &mut *self.sink)?;
            if let Some(signal) = Self::after(flow, crumb) {
                return Ok(signal);
            }
        }
        Ok(Signal::Continue)
    }

    fn walk_array(&mut self, items: &'a [Value], crumb: &Breadcrumb<'a>) -> Result<Signal> {
        for (index, value) in items.iter().enumerate() {
            let flow = self.visit(value, crumb.index(index))?;
            if let Some(signal) = Self::after(flow, crumb) {
                return Ok(signal);
            }
        }
        Ok(Signal::Continue)
    }

    /// `None` to continue the sibling loop
    fn after(flow: Flow, crumb: &Breadcrumb<'_>) -> Option<Signal> {
        match flow {
            Flow::Children | Flow::Sibling => None,
            Flow::Parent => Some(Signal::Continue),
            Flow::Stop => {
                trace!(breadcrumb = %crumb, "stop");
                Some(Signal::Stop)
            }
        }
    }

    fn emit(&mut self, node: &Value) -> Result<()> {
        self.pending.commit(&mut *self.sink)?;
        self.sink.write_value(node)?;
        self.stats.emitted += 1;
        Ok(())
    }

    fn emit_hooked(&mut self, node: &Value, crumb: &Breadcrumb<'_>) -> Result<()> {
        let Some(hook) = self.hook.as_deref_mut() else {
            return self.emit(node);
        };
        match hook.on_match(node, crumb)? {
            Some(replacement) => {
                self.pending.commit(&mut *self.sink)?;
                self.sink.write_owned_value(replacement)?;
                self.stats.emitted += 1;
            }
            None => {
                trace!(breadcrumb = %crumb, "dropped by hook");
                self.stats.dropped += 1;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopper_core::{Instruction, compile};
    use serde_json::json;

    fn sample() -> Value {
        json!({"A": 10, "B": [{"Val": 40}, {"Val": 20}, {"Factor": 20}], "C": [0, 25, 50, 100], "Note": "Re-shape json"})
    }

    fn rewrite_path(path: &str, semantic: MarkSemantic) -> Value {
        Rewriter::new(compile(path, false, semantic))
            .semantic(semantic)
            .rewrite(&sample())
            .unwrap()
            .into_value()
    }

    #[test]
    fn test_pick_opens_ancestors_lazily() {
        assert_eq!(rewrite_path("B.[1]", MarkSemantic::Pick), json!({"B": [{"Val": 20}]}));
        assert_eq!(rewrite_path("Z", MarkSemantic::Pick), json!({}));
    }

    #[test]
    fn test_ignore_keeps_emptied_container() {
        // B leaves the path at the top, so its elements are searched too
        assert_eq!(
            rewrite_path("C.[]", MarkSemantic::Ignore),
            json!({"A": 10, "B": [], "C": [], "Note": "Re-shape json"})
        );
    }

    #[test]
    fn test_ignore_drops_emptied_element() {
        assert_eq!(
            rewrite_path("B.*.val", MarkSemantic::Ignore),
            json!({"A": 10, "B": [{"Factor": 20}], "C": [0, 25, 50, 100], "Note": "Re-shape json"})
        );
        // Elements that were empty to begin with stay
        let doc = Rewriter::new(compile("x.*.v", false, MarkSemantic::Ignore))
            .semantic(MarkSemantic::Ignore)
            .rewrite(&json!({"x": [{}, {"v": 1}, []]}))
            .unwrap();
        assert_eq!(doc, json!({"x": [{}, []]}));
    }

    #[test]
    fn test_replace_without_hook_is_identity() {
        assert_eq!(rewrite_path("B.*.val", MarkSemantic::Replace), sample());
    }

    #[test]
    fn test_hook_none_drops_node() {
        let doc = Rewriter::new(compile("C.*", false, MarkSemantic::Replace))
            .semantic(MarkSemantic::Replace)
            .on_match(|n: &Value, _: &Breadcrumb<'_>| {
                n.as_i64().filter(|v| *v >= 50).map(Value::from)
            })
            .rewrite(&json!({"C": [0, 25, 50, 100]}))
            .unwrap();
        assert_eq!(doc, json!({"C": [50, 100]}));
    }

    #[test]
    fn test_hook_drop_under_pick_leaves_no_ancestor() {
        let doc = Rewriter::new(compile("B.*.Val", false, MarkSemantic::Replace))
            .on_match(|_: &Value, _: &Breadcrumb<'_>| -> Option<Value> { None })
            .rewrite(&sample())
            .unwrap();
        assert_eq!(doc, json!({}));
    }

    #[test]
    fn test_scalar_root() {
        let take = |_: &Value, _: &Breadcrumb<'_>| Instruction::TAKE;
        let skip = |_: &Value, _: &Breadcrumb<'_>| Instruction::SKIP_TO_SIBLING;
        assert_eq!(filter(&json!(5), take).unwrap(), json!(5));
        assert_eq!(filter(&json!(5), skip).unwrap(), json!(null));
    }

    #[test]
    fn test_stats() {
        let mut rewriter = Rewriter::new(compile("C.[]", false, MarkSemantic::Ignore))
            .semantic(MarkSemantic::Ignore);
        let mut sink = TreeSink::new();
        let stats = rewriter.rewrite_into(&sample(), &mut sink).unwrap();
        // The three elements of B and the four of C
        assert_eq!(stats.dropped, 7);
        assert!(!stats.stopped);
        assert_eq!(stats.visited, 11);
        // A and Note
        assert_eq!(stats.emitted, 2);
    }

    #[test]
    fn test_rewrite_to_writer() {
        let out = Rewriter::new(compile("B.[0]", false, MarkSemantic::Pick))
            .rewrite_to_writer(&sample(), Vec::new())
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), r#"{"B":[{"Val":40}]}"#);

        let skip = |_: &Value, _: &Breadcrumb<'_>| Instruction::SKIP_TO_SIBLING;
        let out = Rewriter::new(skip).rewrite_to_writer(&json!("x"), Vec::new()).unwrap();
        assert_eq!(out, b"null");
    }

    #[test]
    fn test_writer_untouched_on_hook_failure() {
        let mut out = b"prefix".to_vec();
        let result = Rewriter::new(compile("C.[2]", false, MarkSemantic::Replace))
            .semantic(MarkSemantic::Replace)
            .on_match(lopper_core::try_hook(|_: &Value, crumb: &Breadcrumb<'_>| {
                Err(lopper_core::LopperError::hook(crumb.to_string(), "rejected"))
            }))
            .rewrite_to_writer(&sample(), &mut out);
        assert!(result.is_err());
        assert_eq!(out, b"prefix");
    }
}
