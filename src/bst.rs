//! Unbalanced binary search tree.
//!
//! Parents own their children through `Option<Box<Node>>` links; there are no
//! parent pointers. All descents are iterative so that degenerate (list
//! shaped) trees built from sorted input do not exhaust the stack, and `Drop`
//! is iterative for the same reason.

use std::cmp::Ordering;

use crate::engine::{EngineKind, SymbolTable};
use crate::probes::{OpClass, ProbeCounters};
use crate::token::Token;

type Link = Option<Box<Node>>;

#[derive(Clone, Debug)]
struct Node {
    token: Token,
    left: Link,
    right: Link,
}

impl Node {
    fn leaf(token: Token) -> Box<Self> {
        Box::new(Self {
            token,
            left: None,
            right: None,
        })
    }
}

/// BST keyed by token order. Duplicate inserts leave the shape unchanged.
#[derive(Clone, Debug, Default)]
pub struct BinarySearchTree {
    root: Link,
    count: usize,
    probes: ProbeCounters,
}

/// Walk down from `link` towards `token`, charging one probe per node
/// visited. Returns the link holding `token`, or the empty link where it
/// would be attached.
fn descend<'a>(mut link: &'a mut Link, token: &Token, probes: &mut u64) -> &'a mut Link {
    loop {
        let ord = match link.as_deref() {
            Some(node) => token.cmp(&node.token),
            None => return link,
        };
        *probes += 1;
        if ord == Ordering::Equal {
            return link;
        }
        if let Some(node) = link {
            link = if ord == Ordering::Less {
                &mut node.left
            } else {
                &mut node.right
            };
        }
    }
}

/// Unlink the minimum of a non-empty subtree, charging one probe per node on
/// the leftmost path (the minimum included).
fn detach_min(mut link: &mut Link, probes: &mut u64) -> Option<Box<Node>> {
    loop {
        let has_left = match link.as_deref() {
            Some(node) => node.left.is_some(),
            None => return None,
        };
        *probes += 1;
        if !has_left {
            break;
        }
        if let Some(node) = link {
            link = &mut node.left;
        }
    }
    let mut min = link.take()?;
    *link = min.right.take();
    Some(min)
}

/// Remove `node` from its position, returning what takes its place.
fn splice(mut node: Box<Node>, probes: &mut u64) -> Link {
    match (node.left.take(), node.right.take()) {
        (None, right) => right,
        (left, None) => left,
        (left, Some(right)) => {
            let mut right = Some(right);
            if let Some(successor) = detach_min(&mut right, probes) {
                node.token = successor.token;
            }
            node.left = left;
            node.right = right;
            Some(node)
        }
    }
}

impl BinarySearchTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Membership test without charging probes.
    pub fn contains(&self, token: &Token) -> bool {
        let mut cur = self.root.as_deref();
        while let Some(node) = cur {
            cur = match token.cmp(&node.token) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return true,
            };
        }
        false
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        let mut max = 0;
        let mut stack: Vec<(&Node, usize)> = Vec::new();
        if let Some(root) = self.root.as_deref() {
            stack.push((root, 1));
        }
        while let Some((node, depth)) = stack.pop() {
            max = max.max(depth);
            for child in [node.left.as_deref(), node.right.as_deref()].into_iter().flatten() {
                stack.push((child, depth + 1));
            }
        }
        max
    }

    /// In-order iteration.
    pub fn iter(&self) -> Iter<'_> {
        let mut it = Iter { stack: Vec::new() };
        it.push_left(self.root.as_deref());
        it
    }
}

impl SymbolTable for BinarySearchTree {
    fn kind(&self) -> EngineKind {
        EngineKind::Bst
    }

    /// Charged every node visited, plus one for a newly created leaf.
    fn insert(&mut self, token: Token) {
        let mut probes = 0;
        let link = descend(&mut self.root, &token, &mut probes);
        if link.is_none() {
            *link = Some(Node::leaf(token));
            probes += 1;
            self.count += 1;
        }
        self.probes.record(OpClass::Insert, probes);
    }

    fn search(&mut self, token: &Token) -> bool {
        let mut probes = 0;
        let found = descend(&mut self.root, token, &mut probes).is_some();
        self.probes.record_search(found, probes);
        found
    }

    /// Charged every node visited, including the successor's leftmost path
    /// when a two-child node is replaced.
    fn remove(&mut self, token: &Token) -> bool {
        let mut probes = 0;
        let link = descend(&mut self.root, token, &mut probes);
        let removed = match link.take() {
            Some(node) => {
                *link = splice(node, &mut probes);
                true
            }
            None => false,
        };
        if removed {
            self.count -= 1;
        }
        self.probes.record(OpClass::Delete, probes);
        removed
    }

    fn len(&self) -> usize {
        self.count
    }

    fn probes(&self) -> &ProbeCounters {
        &self.probes
    }
}

impl Drop for BinarySearchTree {
    fn drop(&mut self) {
        let mut stack: Vec<Box<Node>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

pub struct Iter<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iter<'a> {
    fn push_left(&mut self, mut cur: Option<&'a Node>) {
        while let Some(node) = cur {
            self.stack.push(node);
            cur = node.left.as_deref();
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Token;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left(node.right.as_deref());
        Some(&node.token)
    }
}
