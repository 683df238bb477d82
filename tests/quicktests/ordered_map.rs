use ordered_bst::OrderedMap;

use std::collections::{HashMap, HashSet};

use crate::Op;

/// Applies a set of operations to a tree and to a count of live copies of each key.
/// This way we can ensure that after a random smattering of inserts
/// and removes the tree holds exactly the keys it should.
fn do_ops<K, V>(ops: &[Op<K, V>], bst: &mut OrderedMap<K, V>, counts: &mut HashMap<K, usize>)
where
    K: std::hash::Hash + Eq + Clone + Ord,
    V: Clone,
{
    for op in ops {
        match op {
            Op::Insert(k, v) => {
                bst.insert(k.clone(), v.clone());
                *counts.entry(k.clone()).or_insert(0) += 1;
            }
            Op::Remove(k) => {
                if bst.remove(k).is_some() {
                    if let Some(count) = counts.get_mut(k) {
                        *count -= 1;
                    }
                }
            }
        }
    }
    counts.retain(|_, count| *count > 0);
}

quickcheck::quickcheck! {
    fn fuzz_multiple_operations_i8(ops: Vec<Op<i8, i8>>) -> bool {
        let mut tree = OrderedMap::new();
        let mut counts = HashMap::new();

        do_ops(&ops, &mut tree, &mut counts);
        tree.size() == counts.values().sum::<usize>()
            && counts.keys().all(|key| tree.contains(key))
            && tree.traverse().count() == tree.size()
    }

    fn contains(xs: Vec<i8>) -> bool {
        let tree: OrderedMap<_, _> = xs.iter().map(|&x| (x, x)).collect();

        tree.size() == xs.len() && xs.iter().all(|x| tree.find(x) == Some(x))
    }

    fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
        let tree: OrderedMap<_, _> = xs.iter().map(|&x| (x, x)).collect();
        let added: HashSet<_> = xs.into_iter().collect();
        let nots: HashSet<_> = nots.into_iter().collect();
        let mut nots = nots.difference(&added);

        nots.all(|x| tree.find(x).is_none() && !tree.contains(x))
    }

    fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
        let mut tree: OrderedMap<_, _> = xs.iter().map(|&x| (x, x)).collect();
        let mut still_present = xs;
        for delete in &deletes {
            let removed = tree.remove(delete);
            // Each remove takes out exactly one copy.
            match still_present.iter().position(|x| x == delete) {
                Some(pos) => {
                    still_present.swap_remove(pos);
                    if removed != Some(*delete) {
                        return false;
                    }
                }
                None => {
                    if removed.is_some() {
                        return false;
                    }
                }
            }
        }

        tree.size() == still_present.len() && still_present.iter().all(|x| tree.contains(x))
    }

    fn clone_matches_pre_order(xs: Vec<(i8, i8)>) -> bool {
        let tree: OrderedMap<_, _> = xs.into_iter().collect();
        let cloned = tree.clone();

        tree.traverse().eq(cloned.traverse())
    }
}
