use ordtree::AvlSet;
use proptest::prelude::*;
use std::collections::BTreeSet as StdSet;

mod common;
use common::*;

#[derive(Clone, Debug)]
struct Sets<T> {
    avl_set: AvlSet<T>,
    std_set: StdSet<T>, // std::collections::BTreeSet
}

impl<T> Sets<T>
where
    T: Clone + Ord + std::fmt::Debug,
{
    fn new(v: Vec<T>) -> Sets<T> {
        Sets {
            avl_set: AvlSet::from_iter(v.clone()),
            std_set: StdSet::from_iter(v),
        }
    }

    fn chk(&self) {
        assert_eq!(self.avl_set.len(), self.std_set.len());
        assert_eq!(self.avl_set.is_empty(), self.std_set.is_empty());
        assert_eq_iters(self.avl_set.iter(), self.std_set.iter());
        assert_eq_iters_back(self.avl_set.iter(), self.std_set.iter());

        let vals: Vec<T> = self.std_set.iter().cloned().collect();
        assert_eq!(self.avl_set.values(), vals.as_slice());
    }
}

fn check_ops(ops: Vec<(bool, u16)>) {
    let mut s = Sets::new(Vec::new());

    for (add, v) in ops {
        if add {
            assert_eq!(s.avl_set.insert(v), s.std_set.insert(v));
        } else {
            assert_eq!(s.avl_set.remove(&v), s.std_set.remove(&v));
        }
        assert_eq!(s.avl_set.first(), s.std_set.first());
        assert_eq!(s.avl_set.last(), s.std_set.last());
    }

    s.chk();
}

fn check_insert_then_remove(v: Vec<u16>, x: u16) {
    let mut s = Sets::new(v);
    let had = s.avl_set.contains(&x);
    let before = s.avl_set.values().to_vec();

    s.avl_set.insert(x);
    s.avl_set.remove(&x);
    if had {
        s.std_set.remove(&x);
    } else {
        assert_eq!(s.avl_set.values(), before.as_slice());
    }

    s.chk();
}

fn check_double_insert(v: Vec<u16>) {
    let once = Sets::new(v.clone());
    let mut twice = once.clone();
    twice.avl_set.insert_all(v);
    assert_eq!(once.avl_set.values(), twice.avl_set.values());
    assert!(once.avl_set == twice.avl_set);
}

fn check_contains(v: Vec<u16>, w: Vec<u16>) {
    let s = Sets::new(v);

    assert_eq!(
        s.avl_set.contains_any(&w),
        w.iter().any(|x| s.std_set.contains(x))
    );
    assert_eq!(
        s.avl_set.contains_all(&w),
        w.iter().all(|x| s.std_set.contains(x))
    );
}

fn check_pops(v: Vec<u16>) {
    let mut s = Sets::new(v);

    loop {
        let a = s.avl_set.pop_last();
        assert_eq!(a, s.std_set.pop_last());
        let b = s.avl_set.pop_first();
        assert_eq!(b, s.std_set.pop_first());
        if a.is_none() && b.is_none() {
            break;
        }
    }

    s.chk();
}

fn check_remove_all(v: Vec<u16>, w: Vec<u16>) {
    let mut s = Sets::new(v);
    s.avl_set.remove_all(w.iter());
    s.std_set.retain(|x| !w.contains(x));
    s.chk();
}

#[test]
fn test_ops_regr1() {
    check_ops(vec![(true, 3), (true, 1), (true, 2), (false, 3), (false, 9)]);
}

proptest! {
    #[test]
    fn test_new(v in small_ints()) {
        Sets::new(v).chk();
    }

    #[test]
    fn test_ops(ops in small_int_ops()) {
        check_ops(ops);
    }

    #[test]
    fn test_insert_then_remove(v in small_ints(), x in 0u16..1024) {
        check_insert_then_remove(v, x);
    }

    #[test]
    fn test_double_insert(v in small_ints()) {
        check_double_insert(v);
    }

    #[test]
    fn test_contains(v in small_ints(), w in small_ints()) {
        check_contains(v, w);
    }

    #[test]
    fn test_pops(v in small_ints()) {
        check_pops(v);
    }

    #[test]
    fn test_remove_all(v in small_ints(), w in small_ints()) {
        check_remove_all(v, w);
    }
}
