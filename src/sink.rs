//! Observer hooks for per-operation instrumentation.
//!
//! A tree carries one [`OpSink`], chosen at construction. Every public operation hands the sink a
//! single [`OpRecord`] once it completes. Arguments are passed as `&dyn Debug` and only formatted
//! if the sink decides to render them.

use core::{cell::RefCell, fmt};
use std::fmt::Write as _;

/// The public tree operations that produce a record.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Op {
    Insert,
    Delete,
    Contains,
    Get,
    Min,
    Max,
    Predecessor,
    Successor,
    HasPredecessor,
    HasSuccessor,
    PopFirst,
    PopLast,
    Clear,
    Iterator,
    Render,
}

impl Op {
    pub const fn name(self) -> &'static str {
        match self {
            Op::Insert => "insert",
            Op::Delete => "delete",
            Op::Contains => "contains",
            Op::Get => "get",
            Op::Min => "min",
            Op::Max => "max",
            Op::Predecessor => "predecessor",
            Op::Successor => "successor",
            Op::HasPredecessor => "has_predecessor",
            Op::HasSuccessor => "has_successor",
            Op::PopFirst => "pop_first",
            Op::PopLast => "pop_last",
            Op::Clear => "clear",
            Op::Iterator => "iterator",
            Op::Render => "render",
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One completed operation.
#[derive(Copy, Clone)]
pub struct OpRecord<'a> {
    pub op: Op,
    pub arg: Option<&'a dyn fmt::Debug>,
    /// Key comparisons (or, for min/max, descent steps) spent on the operation.
    pub comparisons: usize,
}

impl fmt::Debug for OpRecord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpRecord")
            .field("op", &self.op)
            .field("arg", &self.arg)
            .field("comparisons", &self.comparisons)
            .finish()
    }
}

impl fmt::Display for OpRecord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Operation {}(", self.op)?;
        if let Some(arg) = self.arg {
            write!(f, "{arg:?}")?;
        }
        write!(f, ") completed using {} comparisons", self.comparisons)
    }
}

/// Receives one record per public tree operation.
pub trait OpSink {
    fn record(&self, record: &OpRecord<'_>);
}

impl OpSink for () {
    #[inline]
    fn record(&self, _: &OpRecord<'_>) {}
}

impl<S: OpSink + ?Sized> OpSink for &S {
    #[inline]
    fn record(&self, record: &OpRecord<'_>) {
        (**self).record(record)
    }
}

/// Forwards records to the [`log`] facade.
#[derive(Copy, Clone, Debug)]
pub struct LogSink {
    level: log::Level,
}

impl LogSink {
    pub const fn new(level: log::Level) -> Self {
        LogSink { level }
    }
}

impl Default for LogSink {
    fn default() -> Self {
        LogSink::new(log::Level::Debug)
    }
}

impl OpSink for LogSink {
    fn record(&self, record: &OpRecord<'_>) {
        log::log!(self.level, "{record}");
    }
}

/// Accumulates one line per record, in the order operations complete.
#[derive(Debug, Default)]
pub struct OpLog {
    lines: RefCell<String>,
}

impl OpLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every line recorded since the last call to `take`, and starts a fresh log.
    pub fn take(&self) -> String {
        self.lines.take()
    }

    /// Returns `true` if nothing has been recorded since the last call to `take`.
    pub fn is_empty(&self) -> bool {
        self.lines.borrow().is_empty()
    }
}

impl OpSink for OpLog {
    fn record(&self, record: &OpRecord<'_>) {
        let mut lines = self.lines.borrow_mut();
        // Writing into a `String` cannot fail.
        let _ = writeln!(lines, "{record}");
    }
}
