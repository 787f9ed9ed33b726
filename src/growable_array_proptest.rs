#![cfg(test)]

// Property tests for GrowableArray kept inside the crate so they can also
// look at the owning buffer behind the public surface.

use crate::error::Error;
use crate::growable_array::GrowableArray;
use proptest::prelude::*;

// Positions are drawn as raw numbers and reduced modulo the current length
// when applied, so every generated op is valid and shrinking stays simple.
#[derive(Clone, Debug)]
enum Op {
    Push(u16),
    Insert(usize, u16),
    Erase(usize),
    Pop,
    Resize(usize),
    Reserve(usize),
    Clear,
    At(usize),
    Write(usize, u16),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => any::<u16>().prop_map(Op::Push),
        2 => (any::<usize>(), any::<u16>()).prop_map(|(p, v)| Op::Insert(p, v)),
        2 => any::<usize>().prop_map(Op::Erase),
        1 => Just(Op::Pop),
        1 => (0usize..48).prop_map(Op::Resize),
        1 => (0usize..64).prop_map(Op::Reserve),
        1 => Just(Op::Clear),
        1 => (0usize..64).prop_map(Op::At),
        1 => (any::<usize>(), any::<u16>()).prop_map(|(p, v)| Op::Write(p, v)),
    ]
}

// Property: State-machine equivalence against std::vec::Vec.
// Invariants exercised across random operation sequences:
// - Live contents always equal the model's contents, in order.
// - `len() <= capacity()` and `capacity() == 0` iff nothing is allocated.
// - Overflowing push/insert grow capacity to `max(1, 2 * capacity)`;
//   non-overflowing ones leave it alone.
// - Resize past capacity yields `2 * new_size`; reserve yields exactly the
//   request when growing and is a no-op otherwise.
// - `at(i)` is `Err(OutOfRange)` exactly when `i >= len()`.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine(ops in proptest::collection::vec(arb_op(), 1..80)) {
        let mut sut: GrowableArray<u16> = GrowableArray::new();
        let mut model: Vec<u16> = Vec::new();

        for op in ops {
            let cap_before = sut.capacity();
            match op {
                Op::Push(v) => {
                    let full = sut.len() == cap_before;
                    sut.push(v);
                    model.push(v);
                    if full {
                        prop_assert_eq!(sut.capacity(), (2 * cap_before).max(1));
                    } else {
                        prop_assert_eq!(sut.capacity(), cap_before);
                    }
                }
                Op::Insert(p, v) => {
                    let at = p % (model.len() + 1);
                    let full = sut.len() == cap_before;
                    let ret = sut.insert(at, v);
                    model.insert(at, v);
                    prop_assert_eq!(ret, at);
                    prop_assert_eq!(sut[ret], v);
                    if full {
                        prop_assert_eq!(sut.capacity(), (2 * cap_before).max(1));
                    } else {
                        prop_assert_eq!(sut.capacity(), cap_before);
                    }
                }
                Op::Erase(p) => {
                    if model.is_empty() {
                        continue;
                    }
                    let at = p % model.len();
                    let ret = sut.erase(at);
                    model.remove(at);
                    prop_assert_eq!(ret, at);
                    prop_assert_eq!(sut.capacity(), cap_before);
                }
                Op::Pop => {
                    if model.pop().is_some() {
                        sut.pop();
                    }
                    prop_assert_eq!(sut.capacity(), cap_before);
                }
                Op::Resize(n) => {
                    sut.resize(n);
                    model.resize(n, 0);
                    if n > cap_before {
                        prop_assert_eq!(sut.capacity(), 2 * n);
                    } else {
                        prop_assert_eq!(sut.capacity(), cap_before);
                    }
                }
                Op::Reserve(n) => {
                    sut.reserve(n);
                    prop_assert_eq!(sut.capacity(), n.max(cap_before));
                }
                Op::Clear => {
                    sut.clear();
                    model.clear();
                    prop_assert_eq!(sut.capacity(), cap_before);
                }
                Op::At(i) => {
                    match sut.at(i) {
                        Ok(v) => prop_assert_eq!(Some(v), model.get(i)),
                        Err(Error::OutOfRange { index, len }) => {
                            prop_assert!(i >= model.len());
                            prop_assert_eq!((index, len), (i, model.len()));
                        }
                        Err(other) => prop_assert!(false, "unexpected error: {:?}", other),
                    }
                }
                Op::Write(p, v) => {
                    if model.is_empty() {
                        continue;
                    }
                    let at = p % model.len();
                    *sut.at_mut(at).unwrap() = v;
                    model[at] = v;
                }
            }

            prop_assert_eq!(sut.as_slice(), model.as_slice());
            prop_assert_eq!(sut.len(), model.len());
            prop_assert!(sut.len() <= sut.capacity());
            prop_assert_eq!(sut.capacity() == 0, !sut.buffer().is_allocated());
        }
    }
}

// Property: Clones and `take` preserve contents and ownership rules.
// - A clone equals its source, has capacity == len, and is independent.
// - `take` moves all elements and leaves the source at size 0, capacity 0.
proptest! {
    #[test]
    fn prop_clone_and_take(values in proptest::collection::vec(any::<i32>(), 0..40), extra in 0usize..16) {
        let mut src: GrowableArray<i32> = GrowableArray::with_capacity(values.len() + extra);
        src.extend(values.iter().copied());

        let mut copy = src.clone();
        prop_assert_eq!(&copy, &src);
        prop_assert_eq!(copy.capacity(), values.len());

        copy.push(1);
        prop_assert_eq!(src.as_slice(), values.as_slice());

        let cap = src.capacity();
        let moved = src.take();
        prop_assert_eq!(moved.as_slice(), values.as_slice());
        prop_assert_eq!(moved.capacity(), cap);
        prop_assert_eq!((src.len(), src.capacity()), (0, 0));
    }
}
