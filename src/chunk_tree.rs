//! A balanced tree of items stored in an index-addressed arena.
//!
//! # Overview
//! `ChunkTree` keeps an ordered sequence of items (the text buffer stores one
//! item per line) in a B-tree whose nodes live in a single `Vec`. Nodes refer
//! to their children by [`NodeId`], never by owning pointers, so there are no
//! ownership cycles and removed nodes are recycled through a free list.
//!
//! # Examples
//! ```
//! use vedit::chunk_tree::{ChunkTree, ChunkTreeConfig};
//!
//! let mut tree = ChunkTree::new(ChunkTreeConfig::new(2, 2));
//! tree.insert(0, "world");
//! tree.insert(0, "hello");
//! tree.insert(2, "!");
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), ["hello", "world", "!"]);
//!
//! assert_eq!(tree.remove(1), Some("world"));
//! assert_eq!(tree.len(), 2);
//! ```
//!
//! # Implementation Details
//! The tree maintains the following invariants:
//! - Leaf nodes hold at most `leaf_capacity` items
//! - Internal nodes hold at most `fanout` children and cache their subtree length
//! - Every node except the root is non-empty
//! - All leaves are at the same depth
//!
//! Overflowing nodes split in half and push the new sibling into their parent,
//! growing the tree at the root. Nodes emptied by removal are unlinked from
//! their parent and freed; a root left with a single child is collapsed.
//!
//! # Performance
//! - Insert / remove / get: O(log n), plus a node-local shift bounded by the
//!   fixed node capacity
//! - Length query: O(1)
//! - Iteration from an index: O(log n) to start, O(1) amortized per item
use std::fmt;

/// Capacities of the nodes of a [`ChunkTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkTreeConfig {
    /// Maximum number of items stored in one leaf
    pub leaf_capacity: usize,
    /// Maximum number of children of one internal node
    pub fanout: usize,
}

impl ChunkTreeConfig {
    /// Panics if either capacity is below 2
    pub const fn new(leaf_capacity: usize, fanout: usize) -> Self {
        assert!(leaf_capacity >= 2, "leaf_capacity must be at least 2");
        assert!(fanout >= 2, "fanout must be at least 2");
        Self {
            leaf_capacity,
            fanout,
        }
    }
}

/// Index of a node inside the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NodeId(usize);

#[derive(Debug, Clone)]
enum Node<T> {
    Leaf { items: Vec<T> },
    Internal { children: Vec<NodeId>, len: usize },
    Free { next: Option<NodeId> },
}

pub struct ChunkTree<T> {
    nodes: Vec<Node<T>>,
    root: NodeId,
    free: Option<NodeId>,
    config: ChunkTreeConfig,
}

impl<T> ChunkTree<T> {
    pub fn new(config: ChunkTreeConfig) -> Self {
        Self {
            nodes: vec![Node::Leaf { items: Vec::new() }],
            root: NodeId(0),
            free: None,
            config,
        }
    }

    /// Builds a balanced tree holding `items` in order.
    pub fn from_vec(items: Vec<T>, config: ChunkTreeConfig) -> Self {
        let mut tree = Self::new(config);
        if items.is_empty() {
            return tree;
        }
        tree.nodes.clear();

        let mut level = Vec::new();
        let mut items = items.into_iter().peekable();
        while items.peek().is_some() {
            let chunk: Vec<T> = items.by_ref().take(config.leaf_capacity).collect();
            level.push(tree.alloc(Node::Leaf { items: chunk }));
        }

        while level.len() > 1 {
            let mut parents = Vec::with_capacity(level.len() / config.fanout + 1);
            for group in level.chunks(config.fanout) {
                let len = group.iter().map(|&child| tree.node_len(child)).sum();
                parents.push(tree.alloc(Node::Internal {
                    children: group.to_vec(),
                    len,
                }));
            }
            level = parents;
        }

        tree.root = level[0];
        tree
    }

    pub fn len(&self) -> usize {
        self.node_len(self.root)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of levels from the root down to the leaves (a lone leaf is 1).
    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut node = self.root;
        while let Node::Internal { children, .. } = &self.nodes[node.0] {
            depth += 1;
            node = children[0];
        }
        depth
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        let (leaf, local) = self.locate(index)?;
        match &self.nodes[leaf.0] {
            Node::Leaf { items } => items.get(local),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        let (leaf, local) = self.locate(index)?;
        match &mut self.nodes[leaf.0] {
            Node::Leaf { items } => items.get_mut(local),
            _ => None,
        }
    }

    /// Inserts `item` so that it ends up at `index`. Indices past the end append.
    pub fn insert(&mut self, index: usize, item: T) {
        let index = index.min(self.len());
        if let Some(sibling) = self.insert_into(self.root, index, item) {
            let old_root = self.root;
            let len = self.node_len(old_root) + self.node_len(sibling);
            self.root = self.alloc(Node::Internal {
                children: vec![old_root, sibling],
                len,
            });
        }
    }

    /// Removes and returns the item at `index`, or `None` past the end.
    pub fn remove(&mut self, index: usize) -> Option<T> {
        if index >= self.len() {
            return None;
        }
        let item = self.remove_from(self.root, index);
        self.collapse_root();
        Some(item)
    }

    pub fn iter(&self) -> ChunkTreeIter<'_, T> {
        self.iter_from(0)
    }

    /// Iterates over the items starting at `index`.
    pub fn iter_from(&self, index: usize) -> ChunkTreeIter<'_, T> {
        let mut iter = ChunkTreeIter {
            tree: self,
            stack: Vec::new(),
            leaf: <&[T]>::default().iter(),
        };
        if index >= self.len() {
            return iter;
        }

        let mut node = self.root;
        let mut index = index;
        loop {
            match &self.nodes[node.0] {
                Node::Leaf { items } => {
                    iter.leaf = items[index..].iter();
                    return iter;
                }
                Node::Internal { children, .. } => {
                    let (slot, local) = self.child_containing(children, index);
                    iter.stack.push((node, slot + 1));
                    node = children[slot];
                    index = local;
                }
                Node::Free { .. } => return iter,
            }
        }
    }

    fn node_len(&self, id: NodeId) -> usize {
        match &self.nodes[id.0] {
            Node::Leaf { items } => items.len(),
            Node::Internal { len, .. } => *len,
            Node::Free { .. } => 0,
        }
    }

    fn alloc(&mut self, node: Node<T>) -> NodeId {
        match self.free {
            Some(id) => {
                self.free = match self.nodes[id.0] {
                    Node::Free { next } => next,
                    _ => None,
                };
                self.nodes[id.0] = node;
                id
            }
            None => {
                self.nodes.push(node);
                NodeId(self.nodes.len() - 1)
            }
        }
    }

    fn release(&mut self, id: NodeId) {
        self.nodes[id.0] = Node::Free { next: self.free };
        self.free = Some(id);
    }

    /// Slot of the child holding the existing item at `index`, and the index
    /// inside that child.
    fn child_containing(&self, children: &[NodeId], index: usize) -> (usize, usize) {
        let mut offset = 0;
        for (slot, &child) in children.iter().enumerate() {
            let len = self.node_len(child);
            if index < offset + len || slot + 1 == children.len() {
                return (slot, index - offset);
            }
            offset += len;
        }
        (0, index)
    }

    /// Like [`Self::child_containing`], but an index on a boundary goes to the
    /// left child so appends land in the last child.
    fn child_for_insert(&self, children: &[NodeId], index: usize) -> (usize, usize) {
        let mut offset = 0;
        for (slot, &child) in children.iter().enumerate() {
            let len = self.node_len(child);
            if index <= offset + len || slot + 1 == children.len() {
                return (slot, index - offset);
            }
            offset += len;
        }
        (0, index)
    }

    fn locate(&self, index: usize) -> Option<(NodeId, usize)> {
        if index >= self.len() {
            return None;
        }
        let mut node = self.root;
        let mut index = index;
        loop {
            match &self.nodes[node.0] {
                Node::Leaf { .. } => return Some((node, index)),
                Node::Internal { children, .. } => {
                    let (slot, local) = self.child_containing(children, index);
                    node = children[slot];
                    index = local;
                }
                Node::Free { .. } => return None,
            }
        }
    }

    /// Returns the new right sibling when `id` had to split.
    fn insert_into(&mut self, id: NodeId, index: usize, item: T) -> Option<NodeId> {
        let leaf_capacity = self.config.leaf_capacity;
        let fanout = self.config.fanout;

        if let Node::Leaf { items } = &mut self.nodes[id.0] {
            items.insert(index, item);
            if items.len() <= leaf_capacity {
                return None;
            }
            let tail = items.split_off(items.len() / 2);
            return Some(self.alloc(Node::Leaf { items: tail }));
        }

        let (slot, child, local) = match &self.nodes[id.0] {
            Node::Internal { children, .. } => {
                let (slot, local) = self.child_for_insert(children, index);
                (slot, children[slot], local)
            }
            _ => return None,
        };

        let split = self.insert_into(child, local, item);

        let overflow = match &mut self.nodes[id.0] {
            Node::Internal { children, len } => {
                *len += 1;
                if let Some(sibling) = split {
                    children.insert(slot + 1, sibling);
                }
                if children.len() <= fanout {
                    return None;
                }
                children.split_off(children.len() / 2)
            }
            _ => return None,
        };

        let moved: usize = overflow.iter().map(|&c| self.node_len(c)).sum();
        if let Node::Internal { len, .. } = &mut self.nodes[id.0] {
            *len -= moved;
        }
        Some(self.alloc(Node::Internal {
            children: overflow,
            len: moved,
        }))
    }

    fn remove_from(&mut self, id: NodeId, index: usize) -> T {
        if let Node::Leaf { items } = &mut self.nodes[id.0] {
            return items.remove(index);
        }

        let (slot, child, local) = match &self.nodes[id.0] {
            Node::Internal { children, .. } => {
                let (slot, local) = self.child_containing(children, index);
                (slot, children[slot], local)
            }
            _ => unreachable!("free node reachable from root"),
        };

        let item = self.remove_from(child, local);
        let child_emptied = self.node_len(child) == 0;

        if let Node::Internal { children, len } = &mut self.nodes[id.0] {
            *len -= 1;
            if child_emptied {
                children.remove(slot);
            }
        }
        if child_emptied {
            self.release(child);
        }
        item
    }

    fn collapse_root(&mut self) {
        loop {
            let (count, first) = match &self.nodes[self.root.0] {
                Node::Internal { children, .. } => (children.len(), children.first().copied()),
                _ => return,
            };
            match (count, first) {
                (0, _) => {
                    self.nodes[self.root.0] = Node::Leaf { items: Vec::new() };
                    return;
                }
                (1, Some(child)) => {
                    let old_root = self.root;
                    self.root = child;
                    self.release(old_root);
                }
                _ => return,
            }
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ChunkTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Clone> Clone for ChunkTree<T> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
            root: self.root,
            free: self.free,
            config: self.config,
        }
    }
}

/// In-order iterator over the items of a [`ChunkTree`].
pub struct ChunkTreeIter<'a, T> {
    tree: &'a ChunkTree<T>,
    stack: Vec<(NodeId, usize)>, // (internal node, next child slot)
    leaf: std::slice::Iter<'a, T>,
}

impl<'a, T> Iterator for ChunkTreeIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.leaf.next() {
                return Some(item);
            }

            let (node, slot) = self.stack.pop()?;
            let Node::Internal { children, .. } = &self.tree.nodes[node.0] else {
                continue;
            };
            if slot >= children.len() {
                continue;
            }
            self.stack.push((node, slot + 1));

            // descend to the leftmost leaf of the next child
            let mut child = children[slot];
            loop {
                match &self.tree.nodes[child.0] {
                    Node::Leaf { items } => {
                        self.leaf = items.iter();
                        break;
                    }
                    Node::Internal { children, .. } => {
                        self.stack.push((child, 1));
                        child = children[0];
                    }
                    Node::Free { .. } => break,
                }
            }
        }
    }
}
