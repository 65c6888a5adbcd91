// SPDX-License-Identifier: LGPL-3.0-only

use std::sync::Arc;

use tessera_geometry::Rect;

use crate::bounds::BoundsCanvas;
use crate::canvas::Canvas;
use crate::op::Operation;

/// An immutable, replayable sequence of operations.
///
/// Created by [DisplayListBuilder::build](crate::builder::DisplayListBuilder::build).
/// Cloning is cheap and shares the operations, which is how one list ends up
/// nested inside several parents. Since nothing in a list ever changes it can
/// be dispatched from any number of threads at once.
#[derive(Debug, Clone)]
pub struct DisplayList {
    ops: Arc<[Operation]>,
}

impl Default for DisplayList {
    fn default() -> Self {
        Self::from_operations(Vec::new())
    }
}

impl DisplayList {
    /// Wrap an operation sequence.
    pub fn from_operations(ops: Vec<Operation>) -> Self {
        Self { ops: ops.into() }
    }

    /// Replay every operation, in recorded order, into `canvas`.
    ///
    /// Nested lists arrive through [Canvas::draw_display_list], whose default
    /// replays them into the same canvas.
    pub fn dispatch<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        for op in self.ops.iter() {
            op.replay(canvas);
        }
    }

    /// Number of operations, not counting those inside nested lists.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Whether the list has no operations.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// The recorded operations.
    pub fn operations(&self) -> &[Operation] {
        &self.ops
    }

    /// Iterate over the recorded operations.
    pub fn iter(&self) -> std::slice::Iter<'_, Operation> {
        self.ops.iter()
    }

    /// Whether both lists share the same storage.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.ops, &other.ops)
    }

    /// Conservative device-space bounds of everything the list draws.
    ///
    /// Empty lists and lists that draw nothing report [Rect::ZERO].
    pub fn bounds(&self) -> Rect {
        let mut canvas = BoundsCanvas::new();
        self.dispatch(&mut canvas);
        canvas.bounds()
    }
}

impl PartialEq for DisplayList {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.ops[..] == other.ops[..]
    }
}

impl<'a> IntoIterator for &'a DisplayList {
    type Item = &'a Operation;
    type IntoIter = std::slice::Iter<'a, Operation>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::DisplayListBuilder;
    use crate::paint::Paint;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn lists_can_cross_threads() {
        assert_send_sync::<DisplayList>();
    }

    #[test]
    fn equality_is_structural() {
        let record = || {
            let mut builder = DisplayListBuilder::new();
            builder.save();
            builder.draw_rect(Rect::from_ltrb(0.0, 0.0, 4.0, 4.0), &Paint::default());
            builder.restore();
            builder.build()
        };
        let a = record();
        let b = record();
        assert!(!a.ptr_eq(&b));
        assert_eq!(a, b);
        assert_ne!(a, DisplayList::default());
    }

    #[test]
    fn concurrent_dispatch_sees_the_same_operations() {
        let mut builder = DisplayListBuilder::new();
        for i in 0..16 {
            builder.translate(i as f32, 0.0);
        }
        let list = builder.build();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let list = list.clone();
                std::thread::spawn(move || {
                    let mut copy = DisplayListBuilder::new();
                    list.dispatch(&mut copy);
                    copy.build()
                })
            })
            .collect();
        for handle in handles {
            let replayed = handle.join().expect("dispatch thread panicked");
            assert_eq!(replayed, list);
        }
    }
}
