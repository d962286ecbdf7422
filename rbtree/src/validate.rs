use crate::{InvariantViolation, NodeId, RedBlackTree};

impl<K> RedBlackTree<K>
where
    K: Ord,
{
    /// Walks the whole tree and checks every red-black and search tree
    /// property:
    ///
    /// * the sentinel is black and unlinked
    /// * the root is black and has no parent
    /// * every child points back at its parent
    /// * a red node has only black children
    /// * every path from a node down to the sentinel has the same number of
    ///   black nodes
    /// * keys are non-decreasing in order
    ///
    /// Returns the black height on success. O(n), meant for tests and the
    /// `check-invariants` feature.
    pub fn validate(&self) -> Result<usize, InvariantViolation> {
        let sentinel = self.raw(NodeId::SENTINEL);
        if sentinel.color.is_red()
            || !sentinel.is_vacant()
            || !sentinel.parent.is_sentinel()
            || !sentinel.left.is_sentinel()
            || !sentinel.right.is_sentinel()
        {
            return Err(InvariantViolation::Sentinel);
        }

        let root = self.root_id();
        if root.is_sentinel() {
            return match self.len() {
                0 => Ok(0),
                expected => Err(InvariantViolation::Len {
                    expected,
                    actual: 0,
                }),
            };
        }
        if !self.is_live(root) {
            return Err(InvariantViolation::VacantLink {
                parent: NodeId::SENTINEL,
                child: root,
            });
        }
        if self.color(root).is_red() {
            return Err(InvariantViolation::RedRoot(root));
        }
        if !self.parent(root).is_sentinel() {
            return Err(InvariantViolation::RootHasParent(root));
        }

        let mut count = 0;
        let black_height = self.validate_subtree(root, &mut count)?;
        if count != self.len() {
            return Err(InvariantViolation::Len {
                expected: self.len(),
                actual: count,
            });
        }

        // links are sound at this point, so the successor walk terminates
        let mut prev = self.first_id();
        let mut node = self.successor_of(prev);
        while !node.is_sentinel() {
            if self.key_of(prev) > self.key_of(node) {
                return Err(InvariantViolation::Order { prev, node });
            }
            prev = node;
            node = self.successor_of(node);
        }

        Ok(black_height)
    }

    /// Returns the number of black nodes from `node` (inclusive) down to the
    /// sentinel (exclusive).
    fn validate_subtree(&self, node: NodeId, count: &mut usize) -> Result<usize, InvariantViolation> {
        *count += 1;
        if *count > self.len() {
            // a cycle or a node linked twice
            return Err(InvariantViolation::Len {
                expected: self.len(),
                actual: *count,
            });
        }

        let mut heights = [0; 2];
        for (height, child) in heights.iter_mut().zip([self.left(node), self.right(node)]) {
            if child.is_sentinel() {
                continue;
            }
            if !self.is_live(child) {
                return Err(InvariantViolation::VacantLink {
                    parent: node,
                    child,
                });
            }
            if self.parent(child) != node {
                return Err(InvariantViolation::BrokenParentLink {
                    parent: node,
                    child,
                });
            }
            if self.color(node).is_red() && self.color(child).is_red() {
                return Err(InvariantViolation::RedRed {
                    parent: node,
                    child,
                });
            }
            *height = self.validate_subtree(child, count)?;
        }

        let [left, right] = heights;
        if left != right {
            return Err(InvariantViolation::BlackHeight { node, left, right });
        }

        Ok(left + usize::from(self.color(node).is_black()))
    }
}
