//! Arena-backed binary search tree.
//!
//! Nodes live in a slot vector and refer to each other through [`NodeId`]
//! handles. There are no parent links: callers that need a parent carry it
//! from their own descent. Equal values always route right, both when
//! inserting and when searching.
//!
//! Structural edits are split the way the animated delete needs them:
//! leaf and one-child removals happen in [`Tree::structural_delete`], while
//! two-child removal is a value copy plus successor splice performed by
//! [`Tree::replace_with_successor`] once the successor's move animation has
//! finished.

mod node;

pub use node::{Node, NodeId, VisualTag};

/// Which link of a parent a node hangs from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// The parent's left link.
    Left,
    /// The parent's right link.
    Right,
}

/// Result of [`Tree::locate`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Located {
    /// Descent sequence from the root. Ends at the found node when there is
    /// one, otherwise at the last node before a null link.
    pub path: Vec<NodeId>,
    /// Rightmost reachable node holding the value.
    pub found: Option<NodeId>,
}

impl Located {
    /// Parent of the found node, taken from the descent path.
    #[must_use]
    pub fn found_parent(&self) -> Option<NodeId> {
        self.found
            .and_then(|_| self.path.iter().rev().nth(1).copied())
    }
}

/// Result of [`Tree::insertion_slot`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertionSlot {
    /// Descent sequence from the root to the slot's parent.
    pub path: Vec<NodeId>,
    /// Parent of the free slot, `None` for an empty tree.
    pub parent: Option<NodeId>,
    /// Which link of `parent` is free.
    pub side: Side,
    /// Depth the new node will sit at (root is 0).
    pub depth: usize,
}

/// Inorder successor of a two-child node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Successor {
    /// Node whose link holds the successor. Equal to the deleted node when
    /// the successor is its immediate right child.
    pub parent: NodeId,
    /// The successor itself. It never has a left child.
    pub node: NodeId,
}

/// Outcome of [`Tree::structural_delete`].
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteResult {
    /// The handle did not refer to a live node.
    NotFound,
    /// A leaf was unlinked and freed.
    Detached(Node),
    /// A one-child node was replaced by its child and freed.
    Spliced {
        /// The freed node.
        removed: Node,
        /// The child now occupying the freed node's slot.
        child: NodeId,
    },
    /// Two-child removal is left to the caller; nothing changed.
    HasTwoChildren,
}

/// Binary search tree with stable integer handles.
#[derive(Debug, Clone, Default)]
pub struct Tree {
    slots: Vec<Option<Node>>,
    free: Vec<u32>,
    root: Option<NodeId>,
    len: usize,
}

impl Tree {
    /// Empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Root handle.
    #[must_use]
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Node behind a handle, if live.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    /// Mutable node behind a handle, if live.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots.get_mut(id.index()).and_then(Option::as_mut)
    }

    /// Whether the handle refers to a live node.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Value stored at a handle.
    #[must_use]
    pub fn value(&self, id: NodeId) -> Option<i64> {
        self.get(id).map(Node::value)
    }

    /// Every live node, in slot order.
    pub fn nodes_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.slots.iter_mut().flatten()
    }

    // -- Queries ---------------------------------------------------------

    /// Descend from the root looking for `value`.
    ///
    /// Equal values route right, so with duplicates the found node is the
    /// rightmost equal-valued node reachable, and the path stops there.
    #[must_use]
    pub fn locate(&self, value: i64) -> Located {
        let mut path = Vec::new();
        let mut found_len = None;
        let mut cur = self.root;
        while let Some(id) = cur {
            let Some(node) = self.get(id) else { break };
            path.push(id);
            if node.value == value {
                found_len = Some(path.len());
            }
            cur = if value < node.value {
                node.left
            } else {
                node.right
            };
        }

        match found_len {
            Some(len) => {
                path.truncate(len);
                Located {
                    found: path.last().copied(),
                    path,
                }
            }
            None => Located { path, found: None },
        }
    }

    /// Descend exactly like [`locate`](Self::locate) but stop at the first
    /// null link: that link is where `value` would be attached.
    #[must_use]
    pub fn insertion_slot(&self, value: i64) -> InsertionSlot {
        let mut path = Vec::new();
        let mut side = Side::Left;
        let mut cur = self.root;
        while let Some(id) = cur {
            let Some(node) = self.get(id) else { break };
            path.push(id);
            if value < node.value {
                side = Side::Left;
                cur = node.left;
            } else {
                side = Side::Right;
                cur = node.right;
            }
        }
        InsertionSlot {
            parent: path.last().copied(),
            depth: path.len(),
            side,
            path,
        }
    }

    /// Inorder successor of `id`: the leftmost node of its right subtree.
    ///
    /// Returns `None` when `id` has no right child; callers only ask for a
    /// successor of two-child nodes.
    #[must_use]
    pub fn successor_of(&self, id: NodeId) -> Option<Successor> {
        let mut parent = id;
        let mut cur = self.get(id)?.right?;
        while let Some(left) = self.get(cur)?.left {
            parent = cur;
            cur = left;
        }
        Some(Successor { parent, node: cur })
    }

    /// Child handle on one side of a node.
    #[must_use]
    pub fn child(&self, id: NodeId, side: Side) -> Option<NodeId> {
        let node = self.get(id)?;
        match side {
            Side::Left => node.left,
            Side::Right => node.right,
        }
    }

    // -- Mutation --------------------------------------------------------

    /// Create a node holding `value` in the free link `side` of `parent`,
    /// or as the root when `parent` is `None`.
    ///
    /// Returns `None` without allocating if the slot is no longer free.
    pub fn attach(
        &mut self,
        parent: Option<NodeId>,
        side: Side,
        value: i64,
        radius: f32,
    ) -> Option<NodeId> {
        match parent {
            None if self.root.is_none() => {
                let id = self.alloc(Node::new(value, radius));
                self.root = Some(id);
                Some(id)
            }
            None => None,
            Some(parent) => {
                if self.child(parent, side).is_some() || !self.contains(parent)
                {
                    return None;
                }
                let id = self.alloc(Node::new(value, radius));
                let node = self.get_mut(parent)?;
                match side {
                    Side::Left => node.left = Some(id),
                    Side::Right => node.right = Some(id),
                }
                Some(id)
            }
        }
    }

    /// Remove a leaf or one-child node hanging from `parent` (`None` for
    /// the root) and free it.
    ///
    /// Two-child nodes are refused with [`DeleteResult::HasTwoChildren`];
    /// see [`replace_with_successor`](Self::replace_with_successor).
    pub fn structural_delete(
        &mut self,
        parent: Option<NodeId>,
        id: NodeId,
    ) -> DeleteResult {
        let Some(node) = self.get(id) else {
            return DeleteResult::NotFound;
        };
        match (node.left, node.right) {
            (None, None) => {
                self.replace_link(parent, id, None);
                self.release(id)
                    .map_or(DeleteResult::NotFound, DeleteResult::Detached)
            }
            (Some(child), None) | (None, Some(child)) => {
                self.replace_link(parent, id, Some(child));
                self.release(id).map_or(DeleteResult::NotFound, |removed| {
                    DeleteResult::Spliced { removed, child }
                })
            }
            (Some(_), Some(_)) => DeleteResult::HasTwoChildren,
        }
    }

    /// Finish a two-child delete: copy the successor's value into `target`,
    /// splice the successor's right child into the successor's own slot and
    /// free the successor. Returns the freed successor.
    pub fn replace_with_successor(
        &mut self,
        target: NodeId,
        successor: Successor,
    ) -> Option<Node> {
        let (value, right) = {
            let succ = self.get(successor.node)?;
            (succ.value, succ.right)
        };
        self.get_mut(target)?.value = value;
        self.replace_link(Some(successor.parent), successor.node, right);
        self.release(successor.node)
    }

    /// Free every node. Returns how many were freed.
    pub fn clear(&mut self) -> usize {
        let freed = self.len;
        self.slots.clear();
        self.free.clear();
        self.root = None;
        self.len = 0;
        freed
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        self.len += 1;
        if let Some(index) = self.free.pop() {
            if let Some(slot) = self.slots.get_mut(index as usize) {
                *slot = Some(node);
                return NodeId(index);
            }
        }
        self.slots.push(Some(node));
        NodeId((self.slots.len() - 1) as u32)
    }

    fn release(&mut self, id: NodeId) -> Option<Node> {
        let node = self.slots.get_mut(id.index())?.take()?;
        self.free.push(id.0);
        self.len -= 1;
        Some(node)
    }

    /// Point whichever link held `old` (root or a side of `parent`) at
    /// `new`.
    fn replace_link(
        &mut self,
        parent: Option<NodeId>,
        old: NodeId,
        new: Option<NodeId>,
    ) {
        let Some(parent) = parent.and_then(|p| self.get_mut(p)) else {
            if self.root == Some(old) {
                self.root = new;
            }
            return;
        };
        if parent.left == Some(old) {
            parent.left = new;
        } else if parent.right == Some(old) {
            parent.right = new;
        }
    }

    // -- Traversals ------------------------------------------------------

    /// Node handles in preorder (node, left, right).
    #[must_use]
    pub fn preorder(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.len);
        let mut stack: Vec<NodeId> = self.root.into_iter().collect();
        while let Some(id) = stack.pop() {
            let Some(node) = self.get(id) else { continue };
            out.push(id);
            stack.extend(node.right);
            stack.extend(node.left);
        }
        out
    }

    /// Values in sorted (inorder) order.
    #[must_use]
    pub fn inorder_values(&self) -> Vec<i64> {
        let mut out = Vec::with_capacity(self.len);
        let mut stack = Vec::new();
        let mut cur = self.root;
        loop {
            while let Some(node) = cur.and_then(|id| self.get(id)) {
                stack.push(node);
                cur = node.left;
            }
            let Some(node) = stack.pop() else { break };
            out.push(node.value);
            cur = node.right;
        }
        out
    }

    /// Number of levels (0 for an empty tree).
    #[must_use]
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(NodeId, usize)> =
            self.root.map(|id| (id, 1)).into_iter().collect();
        while let Some((id, depth)) = stack.pop() {
            let Some(node) = self.get(id) else { continue };
            height = height.max(depth);
            stack.extend(node.left.map(|c| (c, depth + 1)));
            stack.extend(node.right.map(|c| (c, depth + 1)));
        }
        height
    }

    /// Check the ordering invariant (`left < node <= right`, duplicates
    /// resolving right), that every link resolves to a live node, and that
    /// exactly `len` nodes are reachable.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        let mut reached = 0;
        // (node, inclusive lower bound, exclusive upper bound)
        let mut stack: Vec<(NodeId, Option<i64>, Option<i64>)> =
            self.root.map(|id| (id, None, None)).into_iter().collect();
        while let Some((id, lower, upper)) = stack.pop() {
            let Some(node) = self.get(id) else {
                return false;
            };
            reached += 1;
            if lower.is_some_and(|lo| node.value < lo)
                || upper.is_some_and(|hi| node.value >= hi)
            {
                return false;
            }
            stack.extend(node.left.map(|c| (c, lower, Some(node.value))));
            stack.extend(node.right.map(|c| (c, Some(node.value), upper)));
        }
        reached == self.len
    }
}
