use core::fmt;
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::mem;

use log::{debug, trace};

use crate::node::{Color, Node, NodeId, NodePos, NodeRef};
use crate::{Error, Iter, Pretty};

/// An ordered multiset backed by a red-black tree.
///
/// Nodes live in an arena and link to each other by [`NodeId`]. Slot 0 is the
/// sentinel: it fills every empty child slot and is the parent of the root.
///
/// Equal keys are kept, not merged. On a tie both insert and search descend
/// right, so a later duplicate ends up after the earlier one in key order.
#[derive(Clone)]
pub struct RedBlackTree<K> {
    // INVARIANTS:
    //  * nodes[0] is the sentinel, black and keyless
    //  * every id in `free` names a vacant slot
    //  * root is the sentinel iff len == 0
    nodes: Vec<Node<K>>,
    free: Vec<NodeId>,
    root: NodeId,
    len: usize,
}

impl<K> Default for RedBlackTree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> fmt::Debug for RedBlackTree<K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct TreeDebug<'a, K> {
            tree: &'a RedBlackTree<K>,
        }

        impl<K> fmt::Debug for TreeDebug<'_, K>
        where
            K: fmt::Debug,
        {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let mut f = f.debug_list();
                let mut node = self.tree.first_id();
                while !node.is_sentinel() {
                    f.entry(&NodeRef::new(self.tree, node));
                    node = self.tree.successor_of(node);
                }
                f.finish()
            }
        }

        f.debug_struct("RedBlackTree")
            .field("len", &self.len)
            .field("root", &self.root())
            .field("nodes", &TreeDebug { tree: self })
            .finish()
    }
}

impl<K> RedBlackTree<K> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty tree with room for `capacity` nodes before the arena
    /// has to grow.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity.saturating_add(1));
        nodes.push(Node::sentinel());
        Self {
            nodes,
            free: Vec::new(),
            root: NodeId::SENTINEL,
            len: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Removes every key. Previously handed out ids become invalid.
    pub fn clear(&mut self) {
        self.nodes.truncate(1);
        self.free.clear();
        self.root = NodeId::SENTINEL;
        self.len = 0;
    }

    /// Id of the root, or the sentinel if the tree is empty.
    #[inline]
    pub fn root_id(&self) -> NodeId {
        self.root
    }

    pub fn root(&self) -> Option<NodeRef<'_, K>> {
        if self.root.is_sentinel() {
            None
        } else {
            Some(NodeRef::new(self, self.root))
        }
    }

    /// Resolves an id returned by [`insert`](Self::insert) or read off a
    /// [`NodeRef`].
    pub fn node(&self, id: NodeId) -> Result<NodeRef<'_, K>, Error> {
        self.check_live(id)?;
        Ok(NodeRef::new(self, id))
    }

    /// Leftmost node of the subtree rooted at `subtree`.
    ///
    /// Fails with [`Error::Sentinel`] for an empty subtree, so calling it on
    /// [`root_id`](Self::root_id) of an empty tree is an error.
    pub fn minimum(&self, subtree: NodeId) -> Result<NodeRef<'_, K>, Error> {
        self.check_live(subtree)?;
        Ok(NodeRef::new(self, self.min_of(subtree)))
    }

    /// Rightmost node of the subtree rooted at `subtree`.
    pub fn maximum(&self, subtree: NodeId) -> Result<NodeRef<'_, K>, Error> {
        self.check_live(subtree)?;
        Ok(NodeRef::new(self, self.max_of(subtree)))
    }

    pub fn min(&self) -> Option<&K> {
        if self.is_empty() {
            return None;
        }
        Some(self.key_of(self.min_of(self.root)))
    }

    pub fn max(&self) -> Option<&K> {
        if self.is_empty() {
            return None;
        }
        Some(self.key_of(self.max_of(self.root)))
    }

    /// In-order iterator over the keys. Each call starts a new traversal.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter::new(self, self.first_id(), self.last_id(), self.len)
    }

    /// Diagnostic depth-indented rendering of the tree, see [`Pretty`].
    pub fn pretty(&self) -> Pretty<'_, K> {
        Pretty::new(self)
    }

    /// Number of nodes on the longest root to leaf path.
    pub fn height(&self) -> usize {
        fn inner<K>(tree: &RedBlackTree<K>, node: NodeId) -> usize {
            if node.is_sentinel() {
                return 0;
            }
            1 + inner(tree, tree.left(node)).max(inner(tree, tree.right(node)))
        }

        inner(self, self.root)
    }

    /// Number of black nodes on any path from the root down to the
    /// sentinel, counting the root but not the sentinel. Zero for an empty
    /// tree.
    pub fn black_height(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        // all paths carry the same black count, so the leftmost one will do
        let mut black_count = 0;
        let mut node = self.root;
        while !node.is_sentinel() {
            if self.color(node).is_black() {
                black_count += 1;
            }
            node = self.left(node);
        }
        black_count
    }

    pub fn find<Q>(&self, key: &Q) -> Option<NodeRef<'_, K>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_id(key).map(|id| NodeRef::new(self, id))
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_id(key).is_some()
    }

    /// Number of stored keys equal to `key`.
    pub fn count<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        // Rotations can move an equal key to either side of a match,
        // so both subtrees of every match have to be searched.
        let mut count = 0;
        let mut stack = vec![self.root];
        while let Some(node) = stack.pop() {
            if node.is_sentinel() {
                continue;
            }
            match key.cmp(self.key_of(node).borrow()) {
                Ordering::Less => stack.push(self.left(node)),
                Ordering::Equal => {
                    count += 1;
                    stack.push(self.left(node));
                    stack.push(self.right(node));
                }
                Ordering::Greater => stack.push(self.right(node)),
            }
        }
        count
    }

    /// Inserts `key` and returns the id of its new node. Never fails, equal
    /// keys are stored next to each other.
    pub fn insert(&mut self, key: K) -> NodeId
    where
        K: Ord,
    {
        // Move left/right down the tree until we find empty slot,
        // going right on ties
        let mut parent = NodeId::SENTINEL;
        let mut pos = NodePos::Root;
        let mut x = self.root;
        while !x.is_sentinel() {
            parent = x;
            if key < *self.key_of(x) {
                pos = NodePos::Left;
                x = self.left(x);
            } else {
                pos = NodePos::Right;
                x = self.right(x);
            }
        }

        let new_node = self.alloc(Node::leaf(key, parent));
        match pos {
            NodePos::Root => self.root = new_node,
            NodePos::Left => self.set_left(parent, new_node),
            NodePos::Right => self.set_right(parent, new_node),
        }
        self.len += 1;

        if parent.is_sentinel() {
            // the tree was empty
            self.set_color(new_node, Color::Black);
        } else if !self.parent(parent).is_sentinel() {
            // a red child of the black root cannot break anything yet
            self.insert_fixup(new_node);
        }

        self.check_invariants();
        new_node
    }

    /// Removes one node whose key equals `key` and returns its key.
    ///
    /// Returns `None` and leaves the tree untouched if there is no such key.
    pub fn delete<Q>(&mut self, key: &Q) -> Option<K>
    where
        K: Borrow<Q> + Ord,
        Q: Ord + ?Sized,
    {
        match self.find_id(key) {
            Some(node) => {
                let key = self.delete_core(node);
                self.check_invariants();
                Some(key)
            }
            None => {
                debug!("delete: key not found, tree left unchanged");
                None
            }
        }
    }

    /// A broken invariant is a bug in this module, never something to
    /// recover from.
    #[cfg(feature = "check-invariants")]
    fn check_invariants(&self)
    where
        K: Ord,
    {
        if let Err(violation) = self.validate() {
            panic!("red-black tree invariant violated: {violation}");
        }
    }

    #[cfg(not(feature = "check-invariants"))]
    #[inline(always)]
    fn check_invariants(&self) {}

    pub(crate) fn raw(&self, id: NodeId) -> &Node<K> {
        &self.nodes[id.index()]
    }

    pub(crate) fn slot(&self, id: NodeId) -> Option<&Node<K>> {
        self.nodes.get(id.index())
    }

    pub(crate) fn is_live(&self, id: NodeId) -> bool {
        !id.is_sentinel() && self.slot(id).is_some_and(|node| !node.is_vacant())
    }

    fn check_live(&self, id: NodeId) -> Result<(), Error> {
        if id.is_sentinel() {
            Err(Error::Sentinel)
        } else if !self.is_live(id) {
            Err(Error::UnknownNode(id))
        } else {
            Ok(())
        }
    }

    pub(crate) fn key_of(&self, id: NodeId) -> &K {
        match &self.raw(id).key {
            Some(key) => key,
            None => unreachable!("{id} is the sentinel or a vacant slot"),
        }
    }

    #[inline]
    pub(crate) fn color(&self, id: NodeId) -> Color {
        self.raw(id).color
    }

    #[inline]
    pub(crate) fn parent(&self, id: NodeId) -> NodeId {
        self.raw(id).parent
    }

    #[inline]
    pub(crate) fn left(&self, id: NodeId) -> NodeId {
        self.raw(id).left
    }

    #[inline]
    pub(crate) fn right(&self, id: NodeId) -> NodeId {
        self.raw(id).right
    }

    #[inline]
    fn set_color(&mut self, id: NodeId, color: Color) {
        debug_assert!(!id.is_sentinel() || color.is_black(), "sentinel must stay black");
        self.nodes[id.index()].color = color;
    }

    /// Also used on the sentinel by the delete routine, see `delete_core`.
    #[inline]
    fn set_parent(&mut self, id: NodeId, parent: NodeId) {
        self.nodes[id.index()].parent = parent;
    }

    #[inline]
    fn set_left(&mut self, id: NodeId, left: NodeId) {
        debug_assert!(!id.is_sentinel());
        self.nodes[id.index()].left = left;
    }

    #[inline]
    fn set_right(&mut self, id: NodeId, right: NodeId) {
        debug_assert!(!id.is_sentinel());
        self.nodes[id.index()].right = right;
    }

    /// Position of `id` under its parent.
    ///
    /// For the sentinel this is only meaningful while the delete routine has
    /// pointed its parent slot at the node that lost a child. The sibling of
    /// the sentinel is never the sentinel at that point, so checking which
    /// child slot of the parent is empty gives the right answer.
    pub(crate) fn pos(&self, id: NodeId) -> NodePos {
        let parent = self.parent(id);
        if parent.is_sentinel() {
            NodePos::Root
        } else if self.left(parent) == id {
            NodePos::Left
        } else {
            debug_assert_eq!(self.right(parent), id);
            NodePos::Right
        }
    }

    fn alloc(&mut self, node: Node<K>) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                self.nodes[id.index()] = node;
                id
            }
            None => {
                self.nodes.push(node);
                NodeId(self.nodes.len() - 1)
            }
        }
    }

    /// Vacates the slot of an unlinked node and hands back its key.
    fn release(&mut self, id: NodeId) -> K {
        let node = mem::replace(&mut self.nodes[id.index()], Node::sentinel());
        self.free.push(id);
        match node.key {
            Some(key) => key,
            None => unreachable!("{id} was released twice"),
        }
    }

    pub(crate) fn first_id(&self) -> NodeId {
        if self.is_empty() {
            NodeId::SENTINEL
        } else {
            self.min_of(self.root)
        }
    }

    pub(crate) fn last_id(&self) -> NodeId {
        if self.is_empty() {
            NodeId::SENTINEL
        } else {
            self.max_of(self.root)
        }
    }

    fn find_id<Q>(&self, key: &Q) -> Option<NodeId>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut x = self.root;
        while !x.is_sentinel() {
            match key.cmp(self.key_of(x).borrow()) {
                Ordering::Less => x = self.left(x),
                Ordering::Equal => return Some(x),
                Ordering::Greater => x = self.right(x),
            }
        }

        None
    }

    fn min_of(&self, root: NodeId) -> NodeId {
        let mut x = root;
        while !self.left(x).is_sentinel() {
            x = self.left(x);
        }

        x
    }

    fn max_of(&self, root: NodeId) -> NodeId {
        let mut x = root;
        while !self.right(x).is_sentinel() {
            x = self.right(x);
        }

        x
    }

    /// In-order successor of `node`, or the sentinel for the last node.
    pub(crate) fn successor_of(&self, mut node: NodeId) -> NodeId {
        let right = self.right(node);
        if !right.is_sentinel() {
            // everything in the right subtree is larger than node but smaller
            // than any larger ancestor
            return self.min_of(right);
        }

        // Move up the parents and find the first node which is the left child
        // of it's parent. The parent of that node is the successor.
        let mut parent = self.parent(node);
        while !parent.is_sentinel() && self.left(parent) != node {
            node = parent;
            parent = self.parent(node);
        }

        parent
    }

    /// In-order predecessor of `node`, or the sentinel for the first node.
    pub(crate) fn predecessor_of(&self, mut node: NodeId) -> NodeId {
        let left = self.left(node);
        if !left.is_sentinel() {
            return self.max_of(left);
        }

        let mut parent = self.parent(node);
        while !parent.is_sentinel() && self.right(parent) != node {
            node = parent;
            parent = self.parent(node);
        }

        parent
    }

    fn rotate_left(&mut self, node: NodeId) {
        //    p                       p
        //    |                       |
        // +-node-+               +-right-+
        // |      |      -->      |       |
        // a  +-right-+       +-node-+    c
        //    |       |       |      |
        //    b       c       a      b
        // where a, b, c can be any subtrees
        let right = self.right(node);
        assert!(!right.is_sentinel(), "rotate_left at {node} without right child");
        trace!("rotate left at {node}");

        // attach b to node
        let b = self.left(right);
        self.set_right(node, b);
        if !b.is_sentinel() {
            self.set_parent(b, node);
        }

        // attach right to parent
        let parent = self.parent(node);
        self.set_parent(right, parent);
        match self.pos(node) {
            NodePos::Root => self.root = right,
            NodePos::Left => self.set_left(parent, right),
            NodePos::Right => self.set_right(parent, right),
        }

        // attach node to right
        self.set_left(right, node);
        self.set_parent(node, right);
    }

    fn rotate_right(&mut self, node: NodeId) {
        //         p              p
        //         |              |
        //     +-node-+       +-left-+
        //     |      |       |      |
        // +-left-+   c  -->  a  +-node-+
        // |      |              |      |
        // a      b              b      c
        // where a, b, c can be any subtrees
        let left = self.left(node);
        assert!(!left.is_sentinel(), "rotate_right at {node} without left child");
        trace!("rotate right at {node}");

        // attach b to node
        let b = self.right(left);
        self.set_left(node, b);
        if !b.is_sentinel() {
            self.set_parent(b, node);
        }

        // attach left to parent
        let parent = self.parent(node);
        self.set_parent(left, parent);
        match self.pos(node) {
            NodePos::Root => self.root = left,
            NodePos::Left => self.set_left(parent, left),
            NodePos::Right => self.set_right(parent, left),
        }

        // attach node to left
        self.set_right(left, node);
        self.set_parent(node, left);
    }

    fn insert_fixup(&mut self, new_node: NodeId) {
        let mut node = new_node;
        // The only violation is a red node with a red parent. On the first
        // iteration that is the new node, after a red uncle recolor it is the
        // grand parent. Both rotation cases leave a black parent and end the loop.
        while self.color(self.parent(node)).is_red() {
            debug_assert!(self.color(node).is_red());
            let mut parent = self.parent(node);
            // parent is red and thus not the root, so grand parent exists
            let grand_parent = self.parent(parent);
            debug_assert!(self.color(grand_parent).is_black());

            match self.pos(parent) {
                NodePos::Root => unreachable!("red parent {parent} cannot be the root"),
                NodePos::Left => {
                    let uncle = self.right(grand_parent);
                    if self.color(uncle).is_red() {
                        //     +--- gp:b ---+               +--- gp:r ---+
                        //     |            |               |            |
                        //  + p:r +      + u:r +   -->   + p:b +      + u:b +
                        //  |     |      |     |         |     |      |     |
                        // n:r   a:b    b:b   c:b       n:r   a:b    b:b   c:b
                        //
                        // black height is unchanged, the grand parent may now
                        // have a red parent so repeat from there
                        trace!("insert fixup: red uncle {uncle}, move up to {grand_parent}");
                        self.set_color(parent, Color::Black);
                        self.set_color(uncle, Color::Black);
                        self.set_color(grand_parent, Color::Red);
                        node = grand_parent;
                    } else {
                        if let NodePos::Right = self.pos(node) {
                            //       +-- gp:b --+                 +-- gp:b --+
                            //       |          |                 |          |
                            //  +-- p:r --+    u:b  -->       +- n:r --+    u:b
                            //  |         |                   |        |
                            // a:b    +- n:r -+           +- p:r -+   c:b
                            //        |       |           |       |
                            //       b:b     c:b         a:b     b:b
                            //
                            // left rotate parent and swap node and parent so we match the case below
                            trace!("insert fixup: black uncle, {node} is an inner right child");
                            self.rotate_left(parent);
                            mem::swap(&mut parent, &mut node);
                        }

                        //           +-- gp:b --+            +----- p:b -----+
                        //           |          |            |               |
                        //      +-- p:r --+    u:b  -->   +- n:r -+     +- gp:r -+
                        //      |         |               |       |     |        |
                        //  +- n:r -+    c:b             a:b     b:b   c:b      u:b
                        //  |       |
                        // a:b     b:b
                        trace!("insert fixup: black uncle, rotate right at {grand_parent}");
                        self.set_color(parent, Color::Black);
                        self.set_color(grand_parent, Color::Red);
                        self.rotate_right(grand_parent);
                    }
                }
                NodePos::Right => {
                    // same as Left branch but left/right are switched
                    let uncle = self.left(grand_parent);
                    if self.color(uncle).is_red() {
                        trace!("insert fixup: red uncle {uncle}, move up to {grand_parent}");
                        self.set_color(parent, Color::Black);
                        self.set_color(uncle, Color::Black);
                        self.set_color(grand_parent, Color::Red);
                        node = grand_parent;
                    } else {
                        if let NodePos::Left = self.pos(node) {
                            trace!("insert fixup: black uncle, {node} is an inner left child");
                            self.rotate_right(parent);
                            mem::swap(&mut parent, &mut node);
                        }

                        trace!("insert fixup: black uncle, rotate left at {grand_parent}");
                        self.set_color(parent, Color::Black);
                        self.set_color(grand_parent, Color::Red);
                        self.rotate_left(grand_parent);
                    }
                }
            }

            if node == self.root {
                break;
            }
        }

        let root = self.root;
        self.set_color(root, Color::Black);
    }

    fn delete_core(&mut self, node: NodeId) -> K {
        //       +---------- 34 ---------+
        //       |                       |
        // +---- 2 ----+                 58 ----+
        // |           |                        |
        // 1      +--- 9 ----+              +-- 77 --+
        //        |          |              |        |
        //     +- 6       +- 20 -+      +- 71 -+     82
        //     |          |      |      |      |
        //     5         12 -+   24    67      75
        //                   |
        //                   13

        // Color of the node that physically leaves its position
        let mut removed_color = self.color(node);
        // Node that takes the place of the removed one, fixup starts there.
        // It may be the sentinel, in which case its parent slot is pointed at
        // the node above the hole so the fixup can climb from it.
        let replacement;
        let (left, right) = (self.left(node), self.right(node));
        if left.is_sentinel() {
            // no children or only a right one, for example remove 1, 5, 13, 58
            replacement = right;
            self.replace_subtree(node, right);
        } else if right.is_sentinel() {
            // only a left child, for example remove 6
            replacement = left;
            self.replace_subtree(node, left);
        } else {
            // Replace `node` with its successor, the minimum of the right
            // subtree. The successor has no left child.
            let successor = self.min_of(right);
            removed_color = self.color(successor);
            replacement = self.right(successor);

            if self.parent(successor) == node {
                // successor is the right child of node, for example remove 20, 71, 77
                self.set_parent(replacement, successor);
            } else {
                // otherwise detach successor first, for example remove 9, successor is 12
                self.replace_subtree(successor, replacement);
                self.set_right(successor, right);
                self.set_parent(right, successor);
            }

            self.replace_subtree(node, successor);
            self.set_left(successor, left);
            self.set_parent(left, successor);
            let color = self.color(node);
            self.set_color(successor, color);
        }

        // Removing a red node cannot change any black height
        if removed_color.is_black() {
            self.delete_fixup(replacement);
        }

        let sentinel = &mut self.nodes[NodeId::SENTINEL.index()];
        sentinel.parent = NodeId::SENTINEL;
        sentinel.color = Color::Black;

        self.len -= 1;
        self.release(node)
    }

    fn delete_fixup(&mut self, mut x: NodeId) {
        // x sits where a black node was removed, every path through x is one
        // black node short. If x is red, coloring it black after the loop
        // fixes that. If x is black ("doubly black") and not the root, the
        // loop either fixes the deficit locally or moves it up to the parent.
        while x != self.root && self.color(x).is_black() {
            // x has a real sibling here: the paths through x were at least one
            // black node longer before the removal
            let parent = self.parent(x);

            match self.pos(x) {
                NodePos::Root => unreachable!("{x} is not the root"),
                NodePos::Left => {
                    let mut sibling = self.right(parent);
                    debug_assert!(!sibling.is_sentinel());

                    if self.color(sibling).is_red() {
                        //     +--- p:b ---+                +--- s:b ---+
                        //     |           |                |           |
                        // +- x:b -+   +- s:r -+   -->  +- p:r -+      d:b
                        //             |       |        |       |
                        //            c:b     d:b      x:b     c:b
                        //
                        // x gains a red parent and a black sibling, one of the
                        // cases below finishes the job
                        trace!("delete fixup: case 1, red sibling {sibling}");
                        self.set_color(sibling, Color::Black);
                        self.set_color(parent, Color::Red);
                        self.rotate_left(parent);
                        sibling = self.right(parent);
                    }

                    let near = self.left(sibling);
                    let far = self.right(sibling);
                    if self.color(near).is_black() && self.color(far).is_black() {
                        // Take one black off x and sibling and put it on the
                        // parent, which then becomes the new x.
                        //
                        //     +--- p:c ---+                +--- p:c ---+
                        //     |           |                |           |
                        //    x:b      +- s:b -+   -->     x:b      +- s:r -+
                        //             |       |                    |       |
                        //            c:b     d:b                  c:b     d:b
                        trace!("delete fixup: case 2, black sibling {sibling} with black children");
                        self.set_color(sibling, Color::Red);
                        x = parent;
                    } else {
                        if self.color(far).is_black() {
                            //    +---- p:c ----+               +--- p:c ---+
                            //    |             |               |           |
                            //   x:b        +- s:b -+   -->    x:b      +- c:b -+
                            //              |       |                   |       |
                            //          +- c:r -+  d:b                  e   +- s:r -+
                            //          |       |                           |       |
                            //          e       f                           f      d:b
                            //
                            // turns into case 4
                            trace!("delete fixup: case 3, near child {near} of {sibling} is red");
                            self.set_color(near, Color::Black);
                            self.set_color(sibling, Color::Red);
                            self.rotate_right(sibling);
                            sibling = self.right(parent);
                        }

                        //     +--- p:c ---+                    +--- s:c ---+
                        //     |           |                    |           |
                        //    x:b      +- s:b -+   -->      +- p:b -+      d:b
                        //             |       |            |       |
                        //             c      d:r          x:b      c
                        //
                        // paths through x gain the missing black node, the
                        // lost black on paths through d goes back onto d
                        trace!("delete fixup: case 4, far child of {sibling} is red");
                        let far = self.right(sibling);
                        let parent_color = self.color(parent);
                        self.set_color(sibling, parent_color);
                        self.set_color(parent, Color::Black);
                        self.set_color(far, Color::Black);
                        self.rotate_left(parent);
                        x = self.root;
                    }
                }
                NodePos::Right => {
                    // same as Left branch but left/right are switched
                    let mut sibling = self.left(parent);
                    debug_assert!(!sibling.is_sentinel());

                    if self.color(sibling).is_red() {
                        trace!("delete fixup: case 1, red sibling {sibling}");
                        self.set_color(sibling, Color::Black);
                        self.set_color(parent, Color::Red);
                        self.rotate_right(parent);
                        sibling = self.left(parent);
                    }

                    let near = self.right(sibling);
                    let far = self.left(sibling);
                    if self.color(near).is_black() && self.color(far).is_black() {
                        trace!("delete fixup: case 2, black sibling {sibling} with black children");
                        self.set_color(sibling, Color::Red);
                        x = parent;
                    } else {
                        if self.color(far).is_black() {
                            trace!("delete fixup: case 3, near child {near} of {sibling} is red");
                            self.set_color(near, Color::Black);
                            self.set_color(sibling, Color::Red);
                            self.rotate_left(sibling);
                            sibling = self.left(parent);
                        }

                        trace!("delete fixup: case 4, far child of {sibling} is red");
                        let far = self.left(sibling);
                        let parent_color = self.color(parent);
                        self.set_color(sibling, parent_color);
                        self.set_color(parent, Color::Black);
                        self.set_color(far, Color::Black);
                        self.rotate_right(parent);
                        x = self.root;
                    }
                }
            }
        }

        self.set_color(x, Color::Black);
    }

    /// Replaces subtree `old` with subtree `new`.
    fn replace_subtree(&mut self, old: NodeId, new: NodeId) {
        // make the parent of `old` point to `new`, if `old` was the root
        // then `new` becomes the root
        let parent = self.parent(old);
        match self.pos(old) {
            NodePos::Root => self.root = new,
            NodePos::Left => self.set_left(parent, new),
            NodePos::Right => self.set_right(parent, new),
        }

        // `new` may be the sentinel, see `delete_core`
        self.set_parent(new, parent);
    }
}

impl<K> FromIterator<K> for RedBlackTree<K>
where
    K: Ord,
{
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = RedBlackTree::new();
        tree.extend(iter);
        tree
    }
}

impl<K> Extend<K> for RedBlackTree<K>
where
    K: Ord,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<'a, K> IntoIterator for &'a RedBlackTree<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
