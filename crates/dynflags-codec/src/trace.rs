//! Tracing infrastructure for encode/decode walks.
//!
//! `NoopTracer` methods are empty and inlined, so an untraced codec pays
//! nothing for the hooks. `PrintTracer` writes one line per slot:
//!
//! ```text
//! #0   container System.ValueTuple<3>             false
//! #1   leaf        dynamic                        true
//! ```

use std::io::Write;

use dynflags_core::{Colors, TypeExpr};

use crate::error::CodecError;
use crate::walker::{Slot, SlotKind, slot_label};

/// Verbosity level for trace output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Verbosity {
    /// Slot index, kind, node head and flag.
    #[default]
    Default,
    /// Also prints the full rendering of each container's subtree.
    Verbose,
}

/// Hooks called while a codec walks a type.
pub trait WalkTracer {
    /// Called once per slot, in slot order, with the flag written or read.
    fn trace_slot(&mut self, slot: &Slot<'_>, flag: bool);

    /// Called for a leading signature slot (custom modifier or by-ref kind).
    fn trace_prefix(&mut self, index: usize, label: &str, flag: bool);

    /// Called when decoding fails with malformed flags.
    fn trace_mismatch(&mut self, error: &CodecError);

    /// Called when the lenient policy drops malformed flags and keeps the
    /// erased type.
    fn trace_ignored(&mut self, error: &CodecError, kept: &TypeExpr);
}

/// No-op tracer that gets optimized away completely.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopTracer;

impl WalkTracer for NoopTracer {
    #[inline(always)]
    fn trace_slot(&mut self, _slot: &Slot<'_>, _flag: bool) {}

    #[inline(always)]
    fn trace_prefix(&mut self, _index: usize, _label: &str, _flag: bool) {}

    #[inline(always)]
    fn trace_mismatch(&mut self, _error: &CodecError) {}

    #[inline(always)]
    fn trace_ignored(&mut self, _error: &CodecError, _kept: &TypeExpr) {}
}

/// Tracer that writes a line per slot to a sink.
pub struct PrintTracer<W: Write> {
    out: W,
    verbosity: Verbosity,
    colors: Colors,
}

const LABEL_WIDTH: usize = 32;

/// Column where slot labels start: `#` + index (3) + space + kind (9) + space.
const LABEL_COLUMN: usize = 15;

impl<W: Write> PrintTracer<W> {
    pub fn new(out: W, verbosity: Verbosity, colors: Colors) -> Self {
        Self {
            out,
            verbosity,
            colors,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, index: usize, indent: usize, kind: &str, label: &str, flag: bool) {
        let c = self.colors;
        let label_color = if label == dynflags_core::DYNAMIC_NAME {
            c.green
        } else if kind == SlotKind::Container.name() {
            c.dim
        } else {
            c.blue
        };
        let pad = LABEL_WIDTH.saturating_sub(indent + label.len());
        // Write errors are ignored.
        let _ = writeln!(
            self.out,
            "{}#{:<3}{} {:<9} {:indent$}{}{}{}{:pad$} {}{}{}",
            c.dim,
            index,
            c.reset,
            kind,
            "",
            label_color,
            label,
            c.reset,
            "",
            c.flag(flag),
            flag,
            c.reset,
        );
    }
}

impl<W: Write> WalkTracer for PrintTracer<W> {
    fn trace_slot(&mut self, slot: &Slot<'_>, flag: bool) {
        let label = slot_label(slot.node);
        self.line(
            slot.index,
            slot.depth as usize * 2,
            slot.kind.name(),
            &label,
            flag,
        );
        if self.verbosity == Verbosity::Verbose && slot.kind == SlotKind::Container {
            let dim = self.colors.dim;
            let reset = self.colors.reset;
            let indent = slot.depth as usize * 2 + LABEL_COLUMN;
            let _ = writeln!(self.out, "{:indent$}{dim}= {}{reset}", "", slot.node);
        }
    }

    fn trace_prefix(&mut self, index: usize, label: &str, flag: bool) {
        self.line(index, 0, "prefix", label, flag);
    }

    fn trace_mismatch(&mut self, error: &CodecError) {
        let _ = writeln!(self.out, "error: {error}");
    }

    fn trace_ignored(&mut self, error: &CodecError, kept: &TypeExpr) {
        let _ = writeln!(self.out, "ignored: {error}");
        let _ = writeln!(self.out, "kept: {kept}");
    }
}
