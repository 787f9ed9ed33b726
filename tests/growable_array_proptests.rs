use growable_array::GrowableArray;
use proptest::prelude::*;
use std::cmp::Ordering;

fn arr(values: &[i8]) -> GrowableArray<i8> {
    GrowableArray::from_slice(values)
}

// Reference comparator: length first, then element order.
fn length_first(a: &[i8], b: &[i8]) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

// Model ordering/equality against a length-first reference comparator and
// check the algebraic relations between the derived operators.
proptest! {
    #[test]
    fn prop_ordering_matches_length_first(
        a in proptest::collection::vec(any::<i8>(), 0..6),
        b in proptest::collection::vec(any::<i8>(), 0..6),
    ) {
        let (x, y) = (arr(&a), arr(&b));
        let expected = length_first(&a, &b);

        prop_assert_eq!(x.cmp(&y), expected);
        prop_assert_eq!(x.partial_cmp(&y), Some(expected));
        prop_assert_eq!(x == y, expected == Ordering::Equal);
        prop_assert_eq!(x == y, y == x);
        prop_assert_eq!(x < y, y > x);
        prop_assert_eq!(x <= y, !(y < x));
        prop_assert_eq!(x >= y, !(x < y));
        prop_assert!(x == x.clone());
    }
}

// Insert followed by erase at the returned position restores the contents.
proptest! {
    #[test]
    fn prop_insert_erase_inverse(
        values in proptest::collection::vec(any::<i8>(), 0..32),
        raw_pos in any::<usize>(),
        value in any::<i8>(),
        slack in 0usize..4,
    ) {
        let mut v: GrowableArray<i8> = GrowableArray::with_capacity(values.len() + slack);
        v.extend(values.iter().copied());
        let original = v.clone();

        let pos = raw_pos % (values.len() + 1);
        let at = v.insert(pos, value);
        prop_assert_eq!(at, pos);
        prop_assert_eq!(v.len(), values.len() + 1);
        v.erase(at);
        prop_assert_eq!(&v, &original);
    }
}

// Pushing k values from empty yields size k and a power-of-two capacity.
proptest! {
    #[test]
    fn prop_push_sizes(k in 0usize..200) {
        let mut v = GrowableArray::new();
        for i in 0..k {
            v.push(i);
        }
        prop_assert_eq!(v.len(), k);
        let expected_cap = if k == 0 { 0 } else { k.next_power_of_two() };
        prop_assert_eq!(v.capacity(), expected_cap);
        prop_assert!(v.iter().copied().eq(0..k));
    }
}
