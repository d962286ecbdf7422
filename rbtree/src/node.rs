use core::fmt;

use crate::RedBlackTree;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Black,
}

impl Color {
    /// Returns `true` if the color is [`Red`].
    ///
    /// [`Red`]: Color::Red
    #[must_use]
    pub fn is_red(&self) -> bool {
        matches!(self, Self::Red)
    }

    /// Returns `true` if the color is [`Black`].
    ///
    /// [`Black`]: Color::Black
    #[must_use]
    pub fn is_black(&self) -> bool {
        matches!(self, Self::Black)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Red => f.write_str("red"),
            Color::Black => f.write_str("black"),
        }
    }
}

/// Index of a node slot in the tree's arena.
///
/// The id stays valid while the node is in the tree. Once the node is
/// deleted its slot may be reused by a later insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Id of the per-tree sentinel. It sits in every empty child slot and is
    /// the parent of the root.
    pub const SENTINEL: NodeId = NodeId(0);

    #[inline]
    #[must_use]
    pub fn is_sentinel(self) -> bool {
        self == Self::SENTINEL
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone)]
pub(crate) struct Node<K> {
    // key is `None` only for the sentinel and for vacant slots on the free
    // list, otherwise it must always hold a value
    pub(crate) key: Option<K>,
    pub(crate) color: Color,
    pub(crate) parent: NodeId,
    pub(crate) left: NodeId,
    pub(crate) right: NodeId,
}

impl<K> Node<K> {
    pub(crate) fn sentinel() -> Self {
        Self {
            key: None,
            color: Color::Black,
            parent: NodeId::SENTINEL,
            left: NodeId::SENTINEL,
            right: NodeId::SENTINEL,
        }
    }

    /// Fresh red leaf, the shape every node has right after insertion.
    pub(crate) fn leaf(key: K, parent: NodeId) -> Self {
        Self {
            key: Some(key),
            color: Color::Red,
            parent,
            left: NodeId::SENTINEL,
            right: NodeId::SENTINEL,
        }
    }

    #[inline]
    pub(crate) fn is_vacant(&self) -> bool {
        self.key.is_none()
    }
}

impl<K> fmt::Debug for Node<K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("key", &self.key)
            .field("color", &self.color)
            .field("parent", &self.parent)
            .field("left", &self.left)
            .field("right", &self.right)
            .finish()
    }
}

/// Position of a node relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NodePos {
    Root,
    Left,
    Right,
}

/// Shared handle to a live node of a [`RedBlackTree`].
///
/// Handles never point at the sentinel: every link that would lead to it is
/// reported as `None` instead.
pub struct NodeRef<'a, K> {
    tree: &'a RedBlackTree<K>,
    id: NodeId,
}

impl<K> Clone for NodeRef<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for NodeRef<'_, K> {}

impl<'a, K> NodeRef<'a, K> {
    /// `id` must name a live node of `tree`.
    pub(crate) fn new(tree: &'a RedBlackTree<K>, id: NodeId) -> Self {
        debug_assert!(tree.is_live(id));
        Self { tree, id }
    }

    fn link(&self, id: NodeId) -> Option<NodeRef<'a, K>> {
        if id.is_sentinel() {
            None
        } else {
            Some(NodeRef::new(self.tree, id))
        }
    }

    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    #[inline]
    pub fn key(&self) -> &'a K {
        self.tree.key_of(self.id)
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.tree.color(self.id)
    }

    pub fn parent(&self) -> Option<NodeRef<'a, K>> {
        self.link(self.tree.parent(self.id))
    }

    pub fn left(&self) -> Option<NodeRef<'a, K>> {
        self.link(self.tree.left(self.id))
    }

    pub fn right(&self) -> Option<NodeRef<'a, K>> {
        self.link(self.tree.right(self.id))
    }

    pub fn is_root(&self) -> bool {
        self.tree.parent(self.id).is_sentinel()
    }

    /// Next node in key order.
    pub fn successor(&self) -> Option<NodeRef<'a, K>> {
        self.link(self.tree.successor_of(self.id))
    }

    /// Previous node in key order.
    pub fn predecessor(&self) -> Option<NodeRef<'a, K>> {
        self.link(self.tree.predecessor_of(self.id))
    }
}

impl<K> PartialEq for NodeRef<'_, K> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl<K> Eq for NodeRef<'_, K> {}

impl<K> fmt::Debug for NodeRef<'_, K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("key", self.key())
            .field("color", &self.color())
            .finish()
    }
}
