use arrayvec::ArrayVec;
use std::{
    borrow::Borrow,
    cmp::{max, min, Ordering},
};

// AVL height is bounded by 1.44 * log2(n + 2), so this is deep enough
// for any tree that fits in a 64 bit address space.
const MAX_DEPTH: usize = 94;

/// One stored element. Handles to nodes are read only; tree structure
/// can only change through insert, remove, and clear on the owning set.
#[derive(Clone)]
pub struct Node<T: Ord> {
    value: T,
    left: Link<T>,
    right: Link<T>,
    height: u16,
}

pub(crate) type Link<T> = Option<Box<Node<T>>>;

impl<T: Ord> Node<T> {
    fn leaf(value: T) -> Self {
        Node {
            value,
            left: None,
            right: None,
            height: 1,
        }
    }

    /// the element stored in this node
    pub fn value(&self) -> &T {
        &self.value
    }

    /// the left subtree, containing every element less than this one
    pub fn left(&self) -> Option<&Node<T>> {
        self.left.as_deref()
    }

    /// the right subtree, containing every element greater than this one
    pub fn right(&self) -> Option<&Node<T>> {
        self.right.as_deref()
    }

    /// the cached height of the subtree rooted here. A leaf has height
    /// 1, an empty subtree height 0.
    pub fn height(&self) -> u16 {
        self.height
    }
}

fn height<T: Ord>(tree: &Link<T>) -> u16 {
    tree.as_ref().map_or(0, |n| n.height)
}

fn update_height<T: Ord>(node: &mut Node<T>) {
    node.height = 1 + max(height(&node.left), height(&node.right));
}

// Promote the left child above its parent. The parent takes the
// child's former right subtree as its new left subtree. Heights are
// recomputed demoted node first, since it is now the deeper of the
// two.
fn rotate_right<T: Ord>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    match node.left.take() {
        None => panic!("tree heights wrong"),
        Some(mut pivot) => {
            node.left = pivot.right.take();
            update_height(&mut node);
            pivot.right = Some(node);
            update_height(&mut pivot);
            pivot
        }
    }
}

// Mirror image of rotate_right, promoting the right child.
fn rotate_left<T: Ord>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    match node.right.take() {
        None => panic!("tree heights wrong"),
        Some(mut pivot) => {
            node.right = pivot.left.take();
            update_height(&mut node);
            pivot.left = Some(node);
            update_height(&mut pivot);
            pivot
        }
    }
}

// Restore the balance invariant at the root of this subtree, assuming
// both children are already balanced, and refresh the cached height.
// Equal grandchild heights take the single rotation branch. No-op on
// an empty subtree.
fn rebalance<T: Ord>(tree: &mut Link<T>) {
    if let Some(mut node) = tree.take() {
        let (hl, hr) = (height(&node.left) as i32, height(&node.right) as i32);
        if hl - hr > 1 {
            let single = match node.left.as_deref() {
                None => panic!("tree heights wrong"),
                Some(l) => height(&l.left) >= height(&l.right),
            };
            if !single {
                node.left = node.left.take().map(rotate_left);
            }
            node = rotate_right(node);
        } else if hr - hl > 1 {
            let single = match node.right.as_deref() {
                None => panic!("tree heights wrong"),
                Some(r) => height(&r.right) >= height(&r.left),
            };
            if !single {
                node.right = node.right.take().map(rotate_right);
            }
            node = rotate_left(node);
        }
        update_height(&mut node);
        *tree = Some(node);
    }
}

fn insert<T: Ord>(tree: &mut Link<T>, value: T) -> bool {
    let inserted = match tree {
        None => {
            *tree = Some(Box::new(Node::leaf(value)));
            return true;
        }
        Some(node) => match value.cmp(&node.value) {
            Ordering::Equal => return false,
            Ordering::Less => insert(&mut node.left, value),
            Ordering::Greater => insert(&mut node.right, value),
        },
    };
    // a failed insert touched nothing, so there is nothing to fix
    if inserted {
        rebalance(tree);
    }
    inserted
}

// Detach the rightmost node of this subtree, rebalancing the path to
// it on the way back up. The detached node comes back with its left
// child already spliced out.
fn take_rightmost<T: Ord>(tree: &mut Link<T>) -> Link<T> {
    let mut node = tree.take()?;
    if node.right.is_none() {
        *tree = node.left.take();
        return Some(node);
    }
    let rightmost = take_rightmost(&mut node.right);
    *tree = Some(node);
    rebalance(tree);
    rightmost
}

fn remove<T, Q>(tree: &mut Link<T>, value: &Q) -> bool
where
    T: Ord + Borrow<Q>,
    Q: ?Sized + Ord,
{
    let mut node = match tree.take() {
        None => return false,
        Some(node) => node,
    };
    let removed = match value.cmp(node.value.borrow()) {
        Ordering::Less => remove(&mut node.left, value),
        Ordering::Greater => remove(&mut node.right, value),
        Ordering::Equal => {
            if node.left.is_none() {
                // leaf, or right child only. The child subtree is
                // already balanced, so splicing it in needs no fixup.
                *tree = node.right.take();
                return true;
            }
            if node.right.is_none() {
                *tree = node.left.take();
                return true;
            }
            // Two children. The node keeps its allocation and takes
            // over the value of its in order predecessor, whose old
            // node is the one physically deleted.
            if let Some(pred) = take_rightmost(&mut node.left) {
                node.value = pred.value;
            }
            true
        }
    };
    *tree = Some(node);
    if removed {
        rebalance(tree);
    }
    removed
}

fn search<'a, T, Q>(tree: &'a Link<T>, value: &Q) -> Option<&'a Node<T>>
where
    T: Ord + Borrow<Q>,
    Q: ?Sized + Ord,
{
    let node = tree.as_deref()?;
    match value.cmp(node.value.borrow()) {
        Ordering::Equal => Some(node),
        Ordering::Less => search(&node.left, value),
        Ordering::Greater => search(&node.right, value),
    }
}

#[derive(Clone)]
pub(crate) struct Tree<T: Ord> {
    root: Link<T>,
    len: usize,
}

impl<T: Ord> Tree<T> {
    pub(crate) fn new() -> Self {
        Tree { root: None, len: 0 }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn root(&self) -> Option<&Node<T>> {
        self.root.as_deref()
    }

    pub(crate) fn insert(&mut self, value: T) -> bool {
        let inserted = insert(&mut self.root, value);
        if inserted {
            self.len += 1;
        }
        inserted
    }

    pub(crate) fn remove<Q>(&mut self, value: &Q) -> bool
    where
        Q: ?Sized + Ord,
        T: Borrow<Q>,
    {
        let removed = remove(&mut self.root, value);
        if removed {
            self.len -= 1;
        }
        removed
    }

    pub(crate) fn get<'a, Q>(&'a self, value: &Q) -> Option<&'a T>
    where
        Q: ?Sized + Ord,
        T: Borrow<Q>,
    {
        search(&self.root, value).map(|n| &n.value)
    }

    // Dropping the root releases every node child-first. Safe to call
    // on an already empty tree.
    pub(crate) fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    pub(crate) fn iter(&self) -> Iter<T> {
        let mut iter = Iter {
            stack: ArrayVec::new(),
        };
        iter.push_left_spine(self.root.as_deref());
        iter
    }
}

/// In order traversal over borrowed elements, crate private. Used by
/// the trait impls on Set and by the test suite; deliberately not part
/// of the public API.
pub(crate) struct Iter<'a, T: Ord> {
    stack: ArrayVec<&'a Node<T>, MAX_DEPTH>,
}

impl<'a, T: Ord> Iter<'a, T> {
    fn push_left_spine(&mut self, mut tree: Option<&'a Node<T>>) {
        while let Some(node) = tree {
            self.stack.push(node);
            tree = node.left.as_deref();
        }
    }
}

impl<'a, T: Ord> Iterator for Iter<'a, T> {
    type Item = &'a T;
    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        Some(&node.value)
    }
}

impl<T: Ord> Tree<T> {
    #[allow(dead_code)]
    pub(crate) fn invariant(&self) {
        fn check<T: Ord>(
            tree: &Link<T>,
            lower: Option<&T>,
            upper: Option<&T>,
        ) -> (u16, usize) {
            match tree {
                None => (0, 0),
                Some(node) => {
                    if let Some(lower) = lower {
                        if lower.cmp(&node.value) != Ordering::Less {
                            panic!("BST order violated on the left")
                        }
                    }
                    if let Some(upper) = upper {
                        if upper.cmp(&node.value) != Ordering::Greater {
                            panic!("BST order violated on the right")
                        }
                    }
                    let (hl, nl) = check(&node.left, lower, Some(&node.value));
                    let (hr, nr) = check(&node.right, Some(&node.value), upper);
                    let th = 1 + max(hl, hr);
                    if th != node.height {
                        panic!("node height is wrong {} vs {}", th, node.height)
                    }
                    if max(hl, hr) - min(hl, hr) > 1 {
                        panic!("tree is unbalanced {} vs {}", hl, hr)
                    }
                    (th, 1 + nl + nr)
                }
            }
        }

        let (_height, tlen) = check(&self.root, None, None);
        if tlen != self.len {
            panic!("len is wrong {} vs {}", self.len, tlen)
        }
    }
}
