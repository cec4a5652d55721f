use quickcheck::{Arbitrary, Gen};

mod shape;
mod stream;

/// Things to do to a tree in a quicktest.
#[derive(Copy, Clone, Debug)]
pub(crate) enum Op<V> {
    /// Insert the V into the tree
    Insert(V),
    /// Delete the V from the tree
    Delete(V),
}

impl<V> Arbitrary for Op<V>
where
    V: Arbitrary,
{
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[0, 0, 1]).unwrap() {
            0 => Op::Insert(V::arbitrary(g)),
            1 => Op::Delete(V::arbitrary(g)),
            _ => unreachable!(),
        }
    }
}

/// An arbitrary preorder-with-sentinel stream, generated from a random shape so
/// it is always well formed. Values are drawn from `A..=Z`.
#[derive(Clone, Debug)]
pub(crate) struct Stream(pub(crate) String);

impl Arbitrary for Stream {
    fn arbitrary(g: &mut Gen) -> Self {
        fn grow(g: &mut Gen, budget: &mut usize, out: &mut String) {
            if *budget == 0 || !bool::arbitrary(g) && !out.is_empty() {
                out.push('$');
                return;
            }
            *budget -= 1;
            let letters: Vec<char> = ('A'..='Z').collect();
            out.push(*g.choose(&letters).unwrap());
            grow(g, budget, out);
            grow(g, budget, out);
        }

        let mut budget = g.size();
        let mut out = String::new();
        grow(g, &mut budget, &mut out);
        Stream(out)
    }
}
