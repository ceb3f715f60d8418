use std::sync::atomic::{AtomicU32, Ordering};

use tracing::trace;

use crate::bits;

/// Width of one atomic word in bytes.
pub const WORD_BYTES: usize = 4;

/// Width of one atomic word in bits.
pub const WORD_BITS: usize = WORD_BYTES * 8;

/// Atomically sets bit `index` of a word-encoded bitmap to `value`.
///
/// Bit `index` lives in `words[index / 32]`, at bit `index % 32` of the
/// word's value. Only the targeted bit is changed; the other 31 bits of the
/// word are preserved even when other threads write them concurrently.
///
/// # Panics
///
/// Panics if `index / 32 >= words.len()`.
///
/// # Examples
/// ```
/// use std::sync::atomic::AtomicU32;
/// use bitmap::atomic::{get_atomic_u32, set_atomic_u32};
///
/// let words: Vec<AtomicU32> = (0..4).map(|_| AtomicU32::new(0)).collect();
/// set_atomic_u32(&words, 32, true);
/// assert!(get_atomic_u32(&words, 32));
/// assert!(!get_atomic_u32(&words, 31));
/// ```
pub fn set_atomic_u32(words: &[AtomicU32], index: usize, value: bool) {
    let in_word = index % WORD_BITS;
    store_bit(&words[index / WORD_BITS], in_word / 8, in_word % 8, value)
}

/// Reads bit `index` of a word-encoded bitmap through an atomic load of the
/// containing word.
///
/// # Panics
///
/// Panics if `index / 32 >= words.len()`.
pub fn get_atomic_u32(words: &[AtomicU32], index: usize) -> bool {
    let in_word = index % WORD_BITS;
    load_bit(&words[index / WORD_BITS], in_word / 8, in_word % 8)
}

/// Reads sub-bit `bit` of byte `byte` (in `0..4`, little-endian
/// significance) from an atomic snapshot of `word`.
#[inline]
pub(crate) fn load_bit(word: &AtomicU32, byte: usize, bit: usize) -> bool {
    let snapshot = word.load(Ordering::Acquire).to_le_bytes();
    bits::get_bit(snapshot[byte], bit)
}

/// The CAS retry loop.
///
/// Takes a snapshot of `word`, returns early if the target bit already holds
/// `value`, and otherwise tries to publish the snapshot with only that bit
/// replaced. A failed exchange hands back the word's current value, which
/// becomes the next snapshot.
///
/// Lock-free but not wait-free: some contender always succeeds, but a single
/// caller has no bound on its own retries.
pub(crate) fn store_bit(word: &AtomicU32, byte: usize, bit: usize, value: bool) {
    let mut snapshot = word.load(Ordering::Acquire);
    let mut retries = 0usize;

    loop {
        let mut bytes = snapshot.to_le_bytes();
        if bits::get_bit(bytes[byte], bit) == value {
            break;
        }

        bits::set_bit(&mut bytes[byte], bit, value);
        let updated = u32::from_le_bytes(bytes);

        match word.compare_exchange_weak(snapshot, updated, Ordering::AcqRel, Ordering::Acquire) {
            Ok(_) => break,
            Err(current) => {
                snapshot = current;
                retries += 1;
            }
        }
    }

    if retries > 0 {
        trace!(retries, byte, bit, value, "bit store contended");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn zeroed(len: usize) -> Vec<AtomicU32> {
        (0..len).map(|_| AtomicU32::new(0)).collect()
    }

    #[test]
    fn get_on_zeroed_words_is_false() {
        let words = zeroed(100);
        assert!(!get_atomic_u32(&words, 32));
        set_atomic_u32(&words, 32, true);
        assert!(get_atomic_u32(&words, 32));
    }

    #[test]
    fn bit_maps_to_word_and_position() {
        let words = zeroed(3);
        set_atomic_u32(&words, 0, true);
        set_atomic_u32(&words, 33, true);
        set_atomic_u32(&words, 95, true);

        assert_eq!(words[0].load(Ordering::Relaxed), 1);
        assert_eq!(words[1].load(Ordering::Relaxed), 1 << 1);
        assert_eq!(words[2].load(Ordering::Relaxed), 1 << 31);
    }

    #[test]
    fn store_preserves_other_31_bits() {
        let word = AtomicU32::new(0xA5A5_5A5A);
        let before = word.load(Ordering::Relaxed);

        store_bit(&word, 2, 3, true);
        let after = word.load(Ordering::Relaxed);
        assert_eq!(after, before | (1 << 19));

        store_bit(&word, 2, 3, false);
        assert_eq!(word.load(Ordering::Relaxed), before & !(1 << 19));
    }

    #[test]
    fn store_matching_value_is_a_no_op() {
        let word = AtomicU32::new(u32::MAX);
        store_bit(&word, 3, 7, true);
        assert_eq!(word.load(Ordering::Relaxed), u32::MAX);

        let word = AtomicU32::new(0);
        store_bit(&word, 0, 0, false);
        assert_eq!(word.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn load_bit_reads_little_endian_bytes() {
        let word = AtomicU32::new(0x0100_0000);
        assert!(load_bit(&word, 3, 0));
        assert!(!load_bit(&word, 0, 0));
    }

    #[test]
    fn threads_on_one_word_never_lose_updates() {
        let words = Arc::new(zeroed(1));
        let handles: Vec<_> = (0..WORD_BITS)
            .map(|bit| {
                let words = Arc::clone(&words);
                thread::spawn(move || {
                    for round in 0..200 {
                        set_atomic_u32(&words, bit, round % 2 == 0);
                    }
                    set_atomic_u32(&words, bit, bit % 3 == 0);
                })
            })
            .collect();

        for h in handles {
            h.join().unwrap();
        }

        for bit in 0..WORD_BITS {
            assert_eq!(get_atomic_u32(&words, bit), bit % 3 == 0, "bit {bit}");
        }
    }
}
