// SPDX-License-Identifier: LGPL-3.0-only

//! Diagnostic and profiling tools for display lists.
//!
//! [DisplayListStats] describes what a list contains; [Diagnostics] times
//! repeated dispatches and aggregates the results.

use std::time::{Duration, Instant};

use indexmap::IndexMap;

use crate::canvas::Canvas;
use crate::display_list::DisplayList;
use crate::op::{OpKind, Operation};

/// Static description of a display list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayListStats {
    /// Operation counts per kind, in order of first appearance
    pub op_counts: IndexMap<OpKind, usize>,
    /// Total operations, nested lists included
    pub total_ops: usize,
    /// Deepest list nesting (0 when flat)
    pub nesting_depth: usize,
    /// Deepest save stack reached on replay
    pub max_save_depth: usize,
    /// Every save matched by a restore, and no stray restores
    pub balanced: bool,
}

impl DisplayListStats {
    /// Walk `list`, descending into nested lists in replay order.
    pub fn collect(list: &DisplayList) -> Self {
        let mut walker = StatsWalker::default();
        walker.walk(list, 0);
        Self {
            op_counts: walker.op_counts,
            total_ops: walker.total_ops,
            nesting_depth: walker.nesting_depth,
            max_save_depth: walker.max_save_depth,
            balanced: walker.save_depth == 0 && !walker.underflow,
        }
    }

    /// Count of operations of the given kind.
    pub fn count(&self, kind: OpKind) -> usize {
        self.op_counts.get(&kind).copied().unwrap_or(0)
    }

    /// Number of operations that produce pixels.
    ///
    /// Nested list operations are excluded; the operations inside them are
    /// counted individually.
    pub fn draw_ops(&self) -> usize {
        self.op_counts
            .iter()
            .filter(|(kind, _)| !kind.is_state() && **kind != OpKind::DrawDisplayList)
            .map(|(_, count)| count)
            .sum()
    }
}

#[derive(Default)]
struct StatsWalker {
    op_counts: IndexMap<OpKind, usize>,
    total_ops: usize,
    nesting_depth: usize,
    save_depth: usize,
    max_save_depth: usize,
    underflow: bool,
}

impl StatsWalker {
    fn walk(&mut self, list: &DisplayList, depth: usize) {
        self.nesting_depth = self.nesting_depth.max(depth);
        for op in list {
            self.total_ops += 1;
            *self.op_counts.entry(op.kind()).or_insert(0) += 1;
            match op {
                Operation::Save | Operation::SaveLayer { .. } => {
                    self.save_depth += 1;
                    self.max_save_depth = self.max_save_depth.max(self.save_depth);
                },
                Operation::Restore => {
                    if self.save_depth == 0 {
                        self.underflow = true;
                    } else {
                        self.save_depth -= 1;
                    }
                },
                Operation::DrawDisplayList { list } => self.walk(list, depth + 1),
                _ => {},
            }
        }
    }
}

/// Timing of a single dispatch.
#[derive(Debug, Clone, Default)]
pub struct DispatchMetrics {
    /// Time spent in dispatch
    pub duration: Duration,
    /// Top-level operations dispatched
    pub operations: usize,
}

/// Dispatch metrics aggregated over the history.
#[derive(Debug, Clone, Default)]
pub struct AggregatedMetrics {
    /// Number of dispatches measured
    pub dispatch_count: usize,
    /// Average dispatch time
    pub avg_duration: Duration,
    /// Slowest dispatch time
    pub max_duration: Duration,
    /// Average operations per dispatch
    pub avg_operations: f64,
}

/// Dispatch timing tracker with a bounded history.
pub struct Diagnostics {
    history: Vec<DispatchMetrics>,
    max_history_size: usize,
    dispatch_start: Option<Instant>,
}

impl Diagnostics {
    /// Create a tracker remembering the last 100 dispatches.
    pub fn new() -> Self {
        Self::with_history_size(100)
    }

    /// Create a tracker with the given history size.
    pub fn with_history_size(max_history_size: usize) -> Self {
        Self {
            history: Vec::with_capacity(max_history_size),
            max_history_size,
            dispatch_start: None,
        }
    }

    /// Start timing a dispatch.
    pub fn start_dispatch(&mut self) {
        self.dispatch_start = Some(Instant::now());
    }

    /// Stop timing and record the dispatch. Does nothing if no dispatch was
    /// started.
    pub fn end_dispatch(&mut self, operations: usize) {
        if let Some(start) = self.dispatch_start.take() {
            self.record(DispatchMetrics {
                duration: start.elapsed(),
                operations,
            });
        }
    }

    /// Dispatch `list` into `canvas`, recording how long it took.
    pub fn dispatch<C: Canvas + ?Sized>(&mut self, list: &DisplayList, canvas: &mut C) {
        self.start_dispatch();
        list.dispatch(canvas);
        self.end_dispatch(list.len());
    }

    /// Add a measurement to the history, evicting the oldest if full.
    pub fn record(&mut self, metrics: DispatchMetrics) {
        if self.max_history_size == 0 {
            return;
        }
        if self.history.len() == self.max_history_size {
            self.history.remove(0);
        }
        self.history.push(metrics);
    }

    /// Recorded dispatches, oldest first.
    pub fn history(&self) -> &[DispatchMetrics] {
        &self.history
    }

    /// Aggregate the recorded dispatches.
    pub fn aggregated_metrics(&self) -> AggregatedMetrics {
        if self.history.is_empty() {
            return AggregatedMetrics::default();
        }

        let dispatch_count = self.history.len();
        let mut total_duration = Duration::ZERO;
        let mut max_duration = Duration::ZERO;
        let mut total_operations = 0;
        for metrics in &self.history {
            total_duration += metrics.duration;
            max_duration = max_duration.max(metrics.duration);
            total_operations += metrics.operations;
        }

        AggregatedMetrics {
            dispatch_count,
            avg_duration: total_duration / dispatch_count as u32,
            max_duration,
            avg_operations: total_operations as f64 / dispatch_count as f64,
        }
    }

    /// Clear the history.
    pub fn clear(&mut self) {
        self.history.clear();
        self.dispatch_start = None;
    }
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::DisplayListBuilder;
    use crate::paint::Paint;
    use tessera_geometry::Rect;

    #[test]
    fn history_is_bounded() {
        let mut diagnostics = Diagnostics::with_history_size(2);
        for operations in 1..=3 {
            diagnostics.record(DispatchMetrics {
                duration: Duration::from_millis(operations as u64),
                operations,
            });
        }
        let ops: Vec<_> = diagnostics.history().iter().map(|m| m.operations).collect();
        assert_eq!(ops, vec![2, 3]);

        let aggregated = diagnostics.aggregated_metrics();
        assert_eq!(aggregated.dispatch_count, 2);
        assert_eq!(aggregated.max_duration, Duration::from_millis(3));
        assert_eq!(aggregated.avg_operations, 2.5);
    }

    #[test]
    fn end_without_start_is_ignored() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.end_dispatch(10);
        assert!(diagnostics.history().is_empty());
    }

    #[test]
    fn dispatch_records_operation_count() {
        let mut builder = DisplayListBuilder::new();
        builder.draw_rect(Rect::from_ltrb(0.0, 0.0, 1.0, 1.0), &Paint::default());
        builder.draw_rect(Rect::from_ltrb(1.0, 1.0, 2.0, 2.0), &Paint::default());
        let list = builder.build();

        let mut diagnostics = Diagnostics::new();
        let mut sink = DisplayListBuilder::new();
        diagnostics.dispatch(&list, &mut sink);
        assert_eq!(diagnostics.history()[0].operations, 2);
        assert_eq!(sink.len(), 2);
    }

    #[test]
    fn draw_ops_skip_state_and_nested_list_ops() {
        let mut inner = DisplayListBuilder::new();
        inner.draw_rect(Rect::from_ltrb(0.0, 0.0, 1.0, 1.0), &Paint::default());
        let inner = inner.build();

        let mut outer = DisplayListBuilder::new();
        outer.save();
        outer.translate(1.0, 1.0);
        outer.draw_display_list(&inner);
        outer.draw_display_list(&inner);
        outer.restore();
        let stats = DisplayListStats::collect(&outer.build());

        assert_eq!(stats.count(OpKind::DrawDisplayList), 2);
        assert_eq!(stats.count(OpKind::DrawRect), 2);
        assert_eq!(stats.draw_ops(), 2);
    }
}
