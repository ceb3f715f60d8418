use bitmap::bitmaps::{Bitmap, GuardedBitmap, LockFreeBitmap, PlainBitmap};
use bitmap::bits;
use proptest::prelude::*;

// Strategy for a bit length together with a sequence of writes inside it
prop_compose! {
    fn arb_writes(max_bits: usize)
        (bit_len in 1..max_bits)
        (writes in prop::collection::vec((0..bits::byte_len(bit_len) * 8, bool::arbitrary()), 0..200), bit_len in Just(bit_len))
        -> (usize, Vec<(usize, bool)>)
    {
        (bit_len, writes)
    }
}

fn apply<B: Bitmap>(bitmap: &mut B, writes: &[(usize, bool)]) -> Vec<bool> {
    writes.iter().for_each(|&(i, v)| bitmap.set(i, v));
    (0..bitmap.len()).map(|i| bitmap.get(i)).collect()
}

proptest! {
    #[test]
    fn set_then_get_returns_value(
        (bit_len, writes) in arb_writes(300),
    ) {
        let mut plain = PlainBitmap::new(bit_len);
        let mut guarded = GuardedBitmap::new(bit_len);
        let mut lock_free = LockFreeBitmap::new(bit_len);

        for &(i, v) in &writes {
            Bitmap::set(&mut plain, i, v);
            Bitmap::set(&mut guarded, i, v);
            Bitmap::set(&mut lock_free, i, v);
            prop_assert_eq!(Bitmap::get(&plain, i), v);
            prop_assert_eq!(Bitmap::get(&guarded, i), v);
            prop_assert_eq!(Bitmap::get(&lock_free, i), v);
        }
    }

    #[test]
    fn variants_agree_with_each_other(
        (bit_len, writes) in arb_writes(300),
    ) {
        let plain = apply(&mut PlainBitmap::new(bit_len), &writes);
        let guarded = apply(&mut GuardedBitmap::new(bit_len), &writes);
        let lock_free = apply(&mut LockFreeBitmap::new(bit_len), &writes);

        prop_assert_eq!(&plain, &guarded);
        prop_assert_eq!(&plain, &lock_free);
    }

    #[test]
    fn exported_bytes_agree(
        (bit_len, writes) in arb_writes(300),
    ) {
        let mut plain = PlainBitmap::new(bit_len);
        let lock_free = LockFreeBitmap::new(bit_len);
        for &(i, v) in &writes {
            plain.set(i, v);
            lock_free.set(i, v);
        }

        prop_assert_eq!(plain.data(true).into_vec(), lock_free.data(true).to_vec());
    }

    #[test]
    fn set_leaves_rest_of_word_unchanged(
        content in prop::collection::vec(any::<u8>(), 1..24),
        pick in any::<prop::sample::Index>(),
        value in any::<bool>(),
    ) {
        // Contents shorter than a word still get a whole-word window.
        let bm = LockFreeBitmap::from_bytes(&content, content.len() + 3);
        let index = pick.index(bm.len());

        let before = bm.to_bytes();
        bm.set(index, value);
        let after = bm.to_bytes();

        for i in 0..bm.len() {
            if i == index {
                prop_assert_eq!(bits::get(&after, i), value);
            } else {
                prop_assert_eq!(bits::get(&after, i), bits::get(&before, i), "bit {} changed", i);
            }
        }
    }

    #[test]
    fn length_is_requested_rounded_to_bytes(bit_len in 0usize..10_000) {
        let expected = bit_len.div_ceil(8) * 8;
        prop_assert_eq!(PlainBitmap::new(bit_len).len(), expected);
        prop_assert_eq!(GuardedBitmap::new(bit_len).len(), expected);

        let lock_free = LockFreeBitmap::new(bit_len);
        prop_assert_eq!(lock_free.len(), expected);
        prop_assert!(lock_free.capacity() >= bits::byte_len(bit_len) + 3);
    }

    #[test]
    fn small_capacity_always_rejected(
        content in prop::collection::vec(any::<u8>(), 0..4),
        capacity in 0usize..4,
    ) {
        prop_assert!(LockFreeBitmap::try_from_bytes(&content, capacity).is_err());
    }
}

#[test]
fn end_to_end_for_every_variant() {
    let mut plain = PlainBitmap::new(50);
    plain.set(30, true);
    assert!(plain.get(30));
    assert_eq!(plain.len(), 56);
    assert!(bits::get(&plain.data(true), 30));

    let guarded = GuardedBitmap::new(50);
    guarded.set(30, true);
    assert!(guarded.get(30));
    assert_eq!(guarded.len(), 56);
    assert!(guarded.data(true).read().unwrap().get(30));

    let lock_free = LockFreeBitmap::new(50);
    lock_free.set(30, true);
    assert!(lock_free.get(30));
    assert_eq!(lock_free.len(), 56);
    assert!(bits::get(&lock_free.data(true).to_vec(), 30));
}
