use core::fmt;

use crate::node::NodePos;
use crate::{NodeId, RedBlackTree};

/// Depth-indented rendering of a tree, one node per line, parents before
/// children and left before right:
///
/// ```text
/// ROOT- 2 (black)
///  |   L---- 1 (red)
///      R---- 3 (red)
/// ```
///
/// Meant for debugging, the format is not stable.
pub struct Pretty<'a, K> {
    tree: &'a RedBlackTree<K>,
}

impl<'a, K> Pretty<'a, K> {
    pub(crate) fn new(tree: &'a RedBlackTree<K>) -> Self {
        Self { tree }
    }
}

impl<K> fmt::Display for Pretty<'_, K>
where
    K: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tree = self.tree;
        let mut stack: Vec<(NodeId, String)> = vec![(tree.root_id(), String::new())];

        while let Some((node, indent)) = stack.pop() {
            if node.is_sentinel() {
                continue;
            }

            let pos = match tree.pos(node) {
                NodePos::Root => "ROOT-",
                NodePos::Left => "L----",
                NodePos::Right => "R----",
            };
            writeln!(
                f,
                "{indent}{pos} {} ({})",
                tree.key_of(node),
                tree.color(node)
            )?;

            // right goes first so the left subtree is printed first
            stack.push((tree.right(node), format!("{indent}     ")));
            stack.push((tree.left(node), format!("{indent} |   ")));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::RedBlackTree;

    #[test]
    fn empty() {
        let tree = RedBlackTree::<i32>::new();
        assert_eq!(tree.pretty().to_string(), "");
    }

    #[test]
    fn small() {
        let tree: RedBlackTree<i32> = [2, 1, 3].into_iter().collect();
        assert_eq!(
            tree.pretty().to_string(),
            "ROOT- 2 (black)\n |   L---- 1 (red)\n     R---- 3 (red)\n"
        );
    }

    #[test]
    fn nested() {
        let tree: RedBlackTree<i32> = (1..=4).collect();
        // 2:b with 1:b on the left and 3:b -> 4:r on the right
        assert_eq!(
            tree.pretty().to_string(),
            concat!(
                "ROOT- 2 (black)\n",
                " |   L---- 1 (black)\n",
                "     R---- 3 (black)\n",
                "          R---- 4 (red)\n",
            )
        );
    }
}
