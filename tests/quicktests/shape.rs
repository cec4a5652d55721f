use bintree::{structurally_equal, Tree};
use quickcheck_macros::quickcheck;

use crate::Op;

/// Applies a set of operations to a tree and to a list holding the same values.
/// This way we can ensure that after a random smattering of inserts and deletes
/// both hold the same values. Returns `false` as soon as a delete hands back
/// something other than what the list held.
fn do_ops<V>(ops: &[Op<V>], tree: &mut Tree<V>, model: &mut Vec<V>) -> bool
where
    V: Clone + PartialEq,
{
    for op in ops {
        match op {
            Op::Insert(v) => {
                tree.insert(v.clone());
                model.push(v.clone());
            }
            Op::Delete(v) => {
                let expected = model
                    .iter()
                    .position(|x| x == v)
                    .map(|pos| model.swap_remove(pos));
                if tree.delete(v) != expected {
                    return false;
                }
            }
        }
    }
    true
}

/// Whether every level is full except possibly the last, which fills from the left.
fn is_complete<T>(tree: &Tree<T>) -> bool {
    let mut seen_gap = false;
    for id in tree.level_order().ids() {
        let node = tree.node(id).unwrap();
        for child in [node.left(), node.right()] {
            match (child, seen_gap) {
                (Some(_), true) => return false,
                (None, _) => seen_gap = true,
                _ => {}
            }
        }
    }
    true
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    let mut tree = Tree::new();
    let mut model = Vec::new();

    if !do_ops(&ops, &mut tree, &mut model) {
        return false;
    }

    let mut values: Vec<i8> = tree.level_order().copied().collect();
    values.sort_unstable();
    model.sort_unstable();
    values == model && is_complete(&tree)
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let tree: Tree<i8> = xs.iter().copied().collect();

    tree.count_nodes() == xs.len() && xs.iter().all(|x| tree.contains(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree: Tree<i8> = xs.iter().copied().collect();

    nots.iter()
        .filter(|x| !xs.contains(x))
        .all(|x| tree.search(x).is_none())
}

#[quickcheck]
fn delete_removes_exactly_one(xs: Vec<i8>, key: i8) -> bool {
    let mut xs = xs;
    xs.push(key);
    let mut tree: Tree<i8> = xs.iter().copied().collect();
    let copies = xs.iter().filter(|&&x| x == key).count();

    tree.delete(&key) == Some(key)
        && tree.count_nodes() == xs.len() - 1
        && tree.contains(&key) == (copies > 1)
}

#[quickcheck]
fn max_value_matches_slice(xs: Vec<i8>) -> bool {
    let tree: Tree<i8> = xs.iter().copied().collect();

    tree.max_value() == xs.iter().max()
}

#[quickcheck]
fn leaves_of_complete_tree(xs: Vec<u8>) -> bool {
    let tree: Tree<u8> = xs.iter().copied().collect();

    // A complete tree with n nodes has ceil(n / 2) leaves.
    tree.count_leaves() == (xs.len() + 1) / 2
}

#[quickcheck]
fn double_mirror_is_identity(xs: Vec<i8>) -> bool {
    let tree: Tree<i8> = xs.iter().copied().collect();
    let twice = tree.clone().mirror().mirror();

    twice == tree && structurally_equal(twice.as_subtree(), tree.as_subtree())
}

#[quickcheck]
fn mirror_is_recognised(xs: Vec<i8>) -> bool {
    let tree: Tree<i8> = xs.iter().copied().collect();

    tree.is_mirror_of(&tree.mirrored()) && tree.mirrored().is_mirror_of(&tree)
}
