//! Lazy traversals over a built forest

use super::node::VersionTree;
use crate::version::VersionRecord;

/// Depth-first, pre-order iterator yielding `(depth, node)`.
///
/// Siblings come out in stored order (newest first). Roots are at depth 0.
#[derive(Debug, Clone)]
pub struct Walk<'a> {
    stack: Vec<(usize, &'a VersionTree)>,
}

impl<'a> Walk<'a> {
    pub fn new(roots: &'a [VersionTree]) -> Self {
        Self {
            stack: roots.iter().rev().map(|root| (0, root)).collect(),
        }
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, &'a VersionTree);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        self.stack
            .extend(node.children().iter().rev().map(|child| (depth + 1, child)));
        Some((depth, node))
    }
}

/// Records of alive nodes, in walk order
#[derive(Debug, Clone)]
pub struct AliveRecords<'a> {
    walk: Walk<'a>,
}

impl<'a> AliveRecords<'a> {
    pub fn new(walk: Walk<'a>) -> Self {
        Self { walk }
    }
}

impl<'a> Iterator for AliveRecords<'a> {
    type Item = &'a VersionRecord;

    fn next(&mut self) -> Option<Self::Item> {
        self.walk
            .by_ref()
            .find_map(|(_, node)| node.record().filter(|_| node.is_alive()))
    }
}

/// Every currently supported record across the forest.
///
/// Can be called any number of times on the same forest.
pub fn collect_alive(forest: &[VersionTree]) -> AliveRecords<'_> {
    AliveRecords::new(Walk::new(forest))
}
