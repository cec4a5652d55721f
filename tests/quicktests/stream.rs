use std::collections::HashSet;

use bintree::{NodeId, Order, Tree};
use quickcheck_macros::quickcheck;

use crate::Stream;

#[quickcheck]
fn round_trip(stream: Stream) -> bool {
    let tree = Tree::parse(&stream.0, '$').unwrap();

    tree.encode('$') == stream.0
}

#[quickcheck]
fn truncated_stream_is_rejected(stream: Stream) -> bool {
    let short = &stream.0[..stream.0.len() - 1];

    Tree::parse(short, '$').is_err()
}

#[quickcheck]
fn padded_stream_is_rejected(stream: Stream) -> bool {
    Tree::parse(&format!("{}$", stream.0), '$').is_err()
}

#[quickcheck]
fn height_is_one_more_than_tallest_child(stream: Stream) -> bool {
    let tree = Tree::parse(&stream.0, '$').unwrap();
    let Some(root) = tree.root() else {
        return tree.height() == -1;
    };
    let node = tree.node(root).unwrap();
    let child_height = |child: Option<NodeId>| {
        child
            .and_then(|id| tree.subtree(id))
            .map_or(-1, |subtree| subtree.height())
    };

    tree.height() == 1 + child_height(node.left()).max(child_height(node.right()))
        && tree.height() == tree.height_recursive()
}

#[quickcheck]
fn walks_agree(stream: Stream) -> bool {
    let tree = Tree::parse(&stream.0, '$').unwrap();

    tree.preorder().eq(tree.preorder_recursive())
        && tree.inorder().eq(tree.inorder_recursive())
        && tree.postorder().eq(tree.postorder_recursive())
        && tree.level_order().eq(tree.level_order_by_depth())
        && Order::ALL
            .into_iter()
            .all(|order| tree.traverse(order).count() == tree.len())
}

#[quickcheck]
fn search_finds_first_in_preorder(stream: Stream, key: char) -> bool {
    let tree = Tree::parse(&stream.0, '$').unwrap();
    let first = tree.preorder().ids().find(|&id| tree.value(id) == Some(&key));

    tree.search(&key) == first && tree.search_recursive(&key) == first
}

#[quickcheck]
fn delete_keeps_a_valid_tree(stream: Stream, pick: usize) -> bool {
    let mut tree = Tree::parse(&stream.0, '$').unwrap();
    let values: Vec<char> = tree.preorder().copied().collect();
    if values.is_empty() {
        return tree.delete(&'A').is_none();
    }
    let key = values[pick % values.len()];
    let before = tree.len();

    if tree.delete(&key) != Some(key) {
        return false;
    }

    let mut seen = HashSet::new();
    let reachable_once = tree.preorder().ids().all(|id| seen.insert(id));

    tree.len() == before - 1
        && reachable_once
        && seen.len() == tree.len()
        && tree.count_nodes() == tree.len()
}
