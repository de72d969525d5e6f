//! Tree nodes and the AVL rebalancer.
//!
//! Nodes own their children outright; there are no parent links.  Insertion
//! and removal recurse from the root, then restore balance on the way back
//! up, one ancestor at a time.
use crate::ordering::Compare;
use std::cmp::Ordering::{self, *};
use std::fmt::{Debug, Formatter};
use std::mem::replace;
use tracing::trace;

pub(crate) type OptNode<K, V> = Option<Box<Node<K, V>>>;

#[derive(Clone)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) val: V,
    height: i8,
    pub(crate) left: OptNode<K, V>,
    pub(crate) right: OptNode<K, V>,
}

pub(crate) fn height<K, V>(opt_node: &OptNode<K, V>) -> i8 {
    opt_node.as_ref().map_or(0, |n| n.height)
}

impl<K, V> Node<K, V> {
    fn leaf(key: K, val: V) -> Self {
        Node {
            key,
            val,
            height: 1,
            left: None,
            right: None,
        }
    }

    pub(crate) fn height(&self) -> i8 {
        self.height
    }

    // The "balance factor": positive when the left side is taller.
    pub(crate) fn bal(&self) -> i8 {
        height(&self.left) - height(&self.right)
    }

    fn fix_height(&mut self) {
        self.height = height(&self.left).max(height(&self.right)) + 1;
    }

    /// Visits the subtree in ascending order.  Returns false if `f` asked to
    /// stop.
    pub(crate) fn ascend<F>(&self, f: &mut F, idx: &mut usize) -> bool
    where
        F: FnMut(&K, &V, usize) -> bool,
    {
        if let Some(lf) = self.left.as_ref() {
            if !lf.ascend(f, idx) {
                return false;
            }
        }

        let go_on = f(&self.key, &self.val, *idx);
        *idx += 1;

        go_on && self.right.as_ref().map_or(true, |rt| rt.ascend(f, idx))
    }

    /// Visits the subtree in descending order.  Returns false if `f` asked to
    /// stop.
    pub(crate) fn descend<F>(&self, f: &mut F, idx: &mut usize) -> bool
    where
        F: FnMut(&K, &V, usize) -> bool,
    {
        if let Some(rt) = self.right.as_ref() {
            if !rt.descend(f, idx) {
                return false;
            }
        }

        let go_on = f(&self.key, &self.val, *idx);
        *idx += 1;

        go_on && self.left.as_ref().map_or(true, |lf| lf.descend(f, idx))
    }

    #[cfg(test)]
    pub(crate) fn chk<'a, C: Compare<K>>(
        &'a self,
        greatest: Option<&'a K>,
        cmp: &C,
    ) -> (usize, Option<&'a K>) {
        // is our node in order with left-side ancestors?
        assert!(greatest.iter().all(|&k| cmp.compare(k, &self.key) == Less));

        // is our cached height right?
        assert_eq!(
            height(&self.left).max(height(&self.right)) + 1,
            self.height
        );

        // are we balanced?
        assert!(self.bal().abs() <= 1);

        // are our left descendents okay?
        let (lf_len, greatest) = chk(&self.left, greatest, cmp);

        // are our left descendents all less than us?
        assert!(greatest.iter().all(|&k| cmp.compare(k, &self.key) == Less));

        // are our right descendents okay?
        let (rt_len, greatest) = chk(&self.right, Some(&self.key), cmp);

        (lf_len + rt_len + 1, greatest)
    }
}

#[cfg(test)]
pub(crate) fn chk<'a, K, V, C: Compare<K>>(
    opt_node: &'a OptNode<K, V>,
    greatest: Option<&'a K>,
    cmp: &C,
) -> (usize, Option<&'a K>) {
    match opt_node.as_ref() {
        None => (0, greatest),
        Some(n) => n.chk(greatest, cmp),
    }
}

impl<K: Debug, V: Debug> Debug for Node<K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "(ht: {} {{{:?}: {:?}}} ",
            self.height, self.key, self.val
        ))?;

        match &self.left {
            None => f.write_str(".")?,
            Some(lf) => lf.fmt(f)?,
        }

        f.write_str(" ")?;

        match &self.right {
            None => f.write_str(".")?,
            Some(rt) => rt.fmt(f)?,
        }

        f.write_str(")")
    }
}

fn rot_lf<K, V>(mut a: Box<Node<K, V>>) -> Box<Node<K, V>> {
    // We want the following transformation:
    //    a(x, b(y, z))   =>   b(a(x, y), z)
    // x and z retain the same parents.
    let Some(mut b) = a.right.take() else {
        return a;
    };

    trace!(height = a.height, "rotate left");

    // move y from b to a
    a.right = b.left.take();
    a.fix_height();

    // make a be b's left child
    b.left = Some(a);
    b.fix_height();

    b
}

fn rot_rt<K, V>(mut a: Box<Node<K, V>>) -> Box<Node<K, V>> {
    // We want the following transformation:
    //    a(b(x, y), z)   =>   b(x, a(y, z))
    // x and z retain the same parents.
    let Some(mut b) = a.left.take() else {
        return a;
    };

    trace!(height = a.height, "rotate right");

    // move y from b to a
    a.left = b.right.take();
    a.fix_height();

    // move a into b
    b.right = Some(a);
    b.fix_height();

    b
}

// Applies a rotation to the subtree in a slot.
fn rotate<K, V>(slot: &mut OptNode<K, V>, rot: fn(Box<Node<K, V>>) -> Box<Node<K, V>>) {
    if let Some(n) = slot.take() {
        *slot = Some(rot(n));
    }
}

// Shifts height from the left side to the right side.  With `double`, the left
// child leans right and is first rotated to lean left:
//    a(b(x, c(y, z)), w)   =>   c(b(x, y), a(z, w))
fn rebal_lf_to_rt<K, V>(root: &mut OptNode<K, V>, double: bool) {
    if let Some(n) = root.as_mut() {
        if double {
            rotate(&mut n.left, rot_lf);
        }
    }
    rotate(root, rot_rt);
}

// Shifts height from the right side to the left side.  With `double`, the right
// child leans left and is first rotated to lean right:
//    a(x, b(c(y, z), w))   =>   c(a(x, y), b(z, w))
fn rebal_rt_to_lf<K, V>(root: &mut OptNode<K, V>, double: bool) {
    if let Some(n) = root.as_mut() {
        if double {
            rotate(&mut n.right, rot_rt);
        }
    }
    rotate(root, rot_lf);
}

// Recomputes the height of the node in root after one of its subtrees changed
// and rotates if the node is out of balance.  The choice between single and
// double rotation comes from the heavy child's own balance.
fn rebalance<K, V>(root: &mut OptNode<K, V>) {
    let Some(n) = root.as_mut() else {
        return;
    };

    n.fix_height();
    let bal = n.bal();
    if bal > 1 {
        let lf_bal = n.left.as_ref().map_or(0, |lf| lf.bal());
        rebal_lf_to_rt(root, lf_bal < 0);
    } else if bal < -1 {
        let rt_bal = n.right.as_ref().map_or(0, |rt| rt.bal());
        rebal_rt_to_lf(root, rt_bal > 0);
    }
}

/// The result of inserting below a node.
pub(crate) struct Inserted<V> {
    /// The value replaced by the insertion, if the key was already present.
    pub(crate) old: Option<V>,
    /// How the inserted key compared with the key of the node at the top of
    /// the subtree.  `Equal` when that node holds the inserted key.
    path: Ordering,
}

/// Inserts (k, v) into the subtree at root.  An existing entry for k has its
/// value replaced, and its key too when `replace_key` is set.  Either way the
/// tree keeps its shape.
pub(crate) fn insert<K, V, C>(
    root: &mut OptNode<K, V>,
    k: K,
    v: V,
    replace_key: bool,
    cmp: &C,
) -> Inserted<V>
where
    C: Compare<K>,
{
    let n = match root.as_mut() {
        None => {
            *root = Some(Box::new(Node::leaf(k, v)));
            return Inserted {
                old: None,
                path: Equal,
            }; // *** EARLY RETURN ***
        }

        Some(n) => n,
    };

    let path = cmp.compare(&k, &n.key);
    let below = match path {
        Equal => {
            if replace_key {
                n.key = k;
            }
            return Inserted {
                old: Some(replace(&mut n.val, v)),
                path,
            };
        }

        Less => insert(&mut n.left, k, v, replace_key, cmp),
        Greater => insert(&mut n.right, k, v, replace_key, cmp),
    };

    if below.old.is_none() {
        n.fix_height();

        // The heavy child is the one we descended into.  If the insertion
        // continued below it on the far side, the child leans away from the
        // heavy side and needs its own rotation first.
        let bal = n.bal();
        if bal > 1 {
            rebal_lf_to_rt(root, below.path == Greater);
        } else if bal < -1 {
            rebal_rt_to_lf(root, below.path == Less);
        }
    }

    Inserted {
        old: below.old,
        path,
    }
}

/// Removes the least entry of the subtree at root.
pub(crate) fn pop_first<K, V>(root: &mut OptNode<K, V>) -> Option<(K, V)> {
    let n = root.as_mut()?;

    if n.left.is_some() {
        let kv = pop_first(&mut n.left);
        rebalance(root);
        kv
    } else {
        let old_n = root.take()?;
        let Node { key, val, right, .. } = *old_n;
        *root = right;
        Some((key, val))
    }
}

/// Removes the greatest entry of the subtree at root.
pub(crate) fn pop_last<K, V>(root: &mut OptNode<K, V>) -> Option<(K, V)> {
    let n = root.as_mut()?;

    if n.right.is_some() {
        let kv = pop_last(&mut n.right);
        rebalance(root);
        kv
    } else {
        let old_n = root.take()?;
        let Node { key, val, left, .. } = *old_n;
        *root = left;
        Some((key, val))
    }
}

/// Removes the entry for k from the subtree at root and returns it.
pub(crate) fn remove<K, V, C>(root: &mut OptNode<K, V>, k: &K, cmp: &C) -> Option<(K, V)>
where
    C: Compare<K>,
{
    let n = root.as_mut()?;

    let removed = match cmp.compare(k, &n.key) {
        Less => remove(&mut n.left, k, cmp),
        Greater => remove(&mut n.right, k, cmp),
        Equal if n.left.is_some() && n.right.is_some() => {
            // both children are populated: the in-order successor takes our
            // place
            let (succ_key, succ_val) = pop_first(&mut n.right)?;
            let old_key = replace(&mut n.key, succ_key);
            let old_val = replace(&mut n.val, succ_val);
            Some((old_key, old_val))
        }

        Equal => {
            // at most one child: it takes our place
            let old_n = root.take()?;
            let Node {
                key,
                val,
                left,
                right,
                ..
            } = *old_n;
            *root = left.or(right);
            return Some((key, val)); // *** EARLY RETURN ***
        }
    };

    if removed.is_some() {
        rebalance(root);
    }

    removed
}
