//! District tree - unbalanced binary search tree keyed by district id
//!
//! Nodes own their children through `Option<Box<_>>` links; there are no
//! parent pointers. Deletion works by taking a subtree out of its link and
//! handing back whatever should replace it.
//!
//! No rebalancing is done, so every operation is O(height): O(log n) for
//! shuffled input, O(n) when ids arrive already sorted.
//!
//! ## Architecture
//! - Level 2: Tree operations (insert, find, delete)
//! - Level 3: Traversals (preorder, in-order) and constrained lookup
//! - Level 4: Link helpers

use std::cmp::Ordering;

use crate::district::{District, DistrictId};

// ============================================================================
// TYPES
// ============================================================================

type Link = Option<Box<TreeNode>>;

/// A node in the district tree
#[derive(Clone, Debug)]
pub struct TreeNode {
    district: District,
    left: Link,
    right: Link,
}

impl TreeNode {
    fn leaf(district: District) -> Self {
        Self {
            district,
            left: None,
            right: None,
        }
    }

    pub fn district(&self) -> &District {
        &self.district
    }

    pub fn left(&self) -> Option<&TreeNode> {
        self.left.as_deref()
    }

    pub fn right(&self) -> Option<&TreeNode> {
        self.right.as_deref()
    }
}

// ============================================================================
// DISTRICT TREE (Level 2 - Tree Operations)
// ============================================================================

/// The districts still in the game
#[derive(Clone, Debug, Default)]
pub struct DistrictTree {
    root: Link,
    len: usize,
}

impl DistrictTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&self) -> Option<&TreeNode> {
        self.root.as_deref()
    }

    /// Number of districts in the tree
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Insert a district at its BST position
    ///
    /// Returns false (and drops nothing from the tree) if a district with the
    /// same id is already present.
    pub fn insert(&mut self, district: District) -> bool {
        let inserted = insert_into(&mut self.root, district);
        if inserted {
            self.len += 1;
        }
        inserted
    }

    /// Look up a district by id
    pub fn find(&self, id: DistrictId) -> Option<&District> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match id.cmp(&node.district.id()) {
                Ordering::Equal => return Some(&node.district),
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
            };
        }
        None
    }

    pub fn find_mut(&mut self, id: DistrictId) -> Option<&mut District> {
        find_node_mut(&mut self.root, id).map(|node| &mut node.district)
    }

    pub fn contains(&self, id: DistrictId) -> bool {
        self.find(id).is_some()
    }

    /// Remove a district, returning it if it was present
    ///
    /// A node with two children takes over its in-order successor's district,
    /// and the successor's right subtree is spliced into the successor's old
    /// position.
    pub fn delete(&mut self, id: DistrictId) -> Option<District> {
        let removed = delete_from(&mut self.root, id);
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    // ========================================================================
    // Level 3: Traversals
    // ========================================================================

    /// Districts in preorder: node, then left subtree, then right subtree
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder {
            stack: self.root.as_deref().into_iter().collect(),
        }
    }

    /// Districts in ascending id order
    pub fn in_order(&self) -> InOrder<'_> {
        let mut iter = InOrder { stack: Vec::new() };
        iter.push_left_spine(self.root.as_deref());
        iter
    }

    /// All ids in ascending order
    pub fn ids(&self) -> Vec<DistrictId> {
        self.in_order().map(District::id).collect()
    }

    /// First district in preorder that satisfies `predicate`
    pub fn find_first<P>(&self, mut predicate: P) -> Option<&District>
    where
        P: FnMut(&District) -> bool,
    {
        self.preorder().find(|district| predicate(district))
    }

    /// Number of nodes on the longest root-to-leaf path
    pub fn height(&self) -> usize {
        fn height_of(node: Option<&TreeNode>) -> usize {
            match node {
                None => 0,
                Some(n) => 1 + height_of(n.left()).max(height_of(n.right())),
            }
        }
        height_of(self.root())
    }
}

impl Extend<District> for DistrictTree {
    fn extend<I: IntoIterator<Item = District>>(&mut self, iter: I) {
        for district in iter {
            self.insert(district);
        }
    }
}

impl FromIterator<District> for DistrictTree {
    fn from_iter<I: IntoIterator<Item = District>>(iter: I) -> Self {
        let mut tree = DistrictTree::new();
        tree.extend(iter);
        tree
    }
}

/// Preorder iterator over districts
pub struct Preorder<'a> {
    stack: Vec<&'a TreeNode>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = &'a District;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Right first so the left subtree is visited first
        self.stack.extend(node.right.as_deref());
        self.stack.extend(node.left.as_deref());
        Some(&node.district)
    }
}

/// In-order iterator over districts
pub struct InOrder<'a> {
    stack: Vec<&'a TreeNode>,
}

impl<'a> InOrder<'a> {
    fn push_left_spine(&mut self, mut node: Option<&'a TreeNode>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<'a> Iterator for InOrder<'a> {
    type Item = &'a District;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        Some(&node.district)
    }
}

// ============================================================================
// Level 4: Link helpers
// ============================================================================

fn insert_into(link: &mut Link, district: District) -> bool {
    match link {
        None => {
            *link = Some(Box::new(TreeNode::leaf(district)));
            true
        }
        Some(node) => match district.id().cmp(&node.district.id()) {
            Ordering::Less => insert_into(&mut node.left, district),
            Ordering::Greater => insert_into(&mut node.right, district),
            Ordering::Equal => false,
        },
    }
}

fn find_node_mut(link: &mut Link, id: DistrictId) -> Option<&mut TreeNode> {
    let node = link.as_deref_mut()?;
    match id.cmp(&node.district.id()) {
        Ordering::Equal => Some(node),
        Ordering::Less => find_node_mut(&mut node.left, id),
        Ordering::Greater => find_node_mut(&mut node.right, id),
    }
}

fn delete_from(link: &mut Link, id: DistrictId) -> Option<District> {
    let node = link.as_deref_mut()?;
    match id.cmp(&node.district.id()) {
        Ordering::Less => return delete_from(&mut node.left, id),
        Ordering::Greater => return delete_from(&mut node.right, id),
        Ordering::Equal => {}
    }

    let mut target = link.take()?;
    match (target.left.take(), target.right.take()) {
        (None, only) | (only, None) => {
            *link = only;
            Some(target.district)
        }
        (Some(left), Some(right)) => {
            let (rest, successor) = detach_leftmost(right);
            let removed = std::mem::replace(&mut target.district, successor);
            target.left = Some(left);
            target.right = rest;
            *link = Some(target);
            Some(removed)
        }
    }
}

/// Split off the leftmost district of a subtree
///
/// Returns the remaining subtree and the detached district. The leftmost
/// node's right child takes its place.
fn detach_leftmost(mut node: Box<TreeNode>) -> (Link, District) {
    match node.left.take() {
        Some(left) => {
            let (rest, leftmost) = detach_leftmost(left);
            node.left = rest;
            (Some(node), leftmost)
        }
        None => {
            let TreeNode { district, right, .. } = *node;
            (right, district)
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
