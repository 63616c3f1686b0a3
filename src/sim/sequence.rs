//! Sequence generation
//!
//! The sequence only ever grows: one uniformly drawn tile index per cleared round.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Session RNG. Seeded so a run can be replayed.
pub type SessionRng = Pcg32;

/// Create the session RNG for a seed
pub fn seeded_rng(seed: u64) -> SessionRng {
    Pcg32::seed_from_u64(seed)
}

/// Return `sequence` with one index from `[0, color_count)` appended.
///
/// An empty palette has nothing to draw from; the sequence comes back unchanged.
pub fn append_step<R: Rng + ?Sized>(
    sequence: &[usize],
    color_count: usize,
    rng: &mut R,
) -> Vec<usize> {
    let mut next = Vec::with_capacity(sequence.len() + 1);
    next.extend_from_slice(sequence);
    if color_count == 0 {
        log::warn!("append_step called with no colors");
        return next;
    }
    next.push(rng.random_range(0..color_count));
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::RngCore;

    /// Source that only ever yields zero bits
    struct Zeros;

    impl RngCore for Zeros {
        fn next_u32(&mut self) -> u32 {
            0
        }
        fn next_u64(&mut self) -> u64 {
            0
        }
        fn fill_bytes(&mut self, dst: &mut [u8]) {
            dst.fill(0);
        }
    }

    #[test]
    fn test_append_keeps_prefix() {
        let mut rng = seeded_rng(7);
        let seq = append_step(&[3, 1, 4], 8, &mut rng);
        assert_eq!(seq.len(), 4);
        assert_eq!(&seq[..3], &[3, 1, 4]);
        assert!(seq[3] < 8);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let grow = |seed| {
            let mut rng = seeded_rng(seed);
            (0..20).fold(Vec::new(), |seq, _| append_step(&seq, 8, &mut rng))
        };
        assert_eq!(grow(42), grow(42));
        assert_ne!(grow(42), grow(43));
    }

    #[test]
    fn test_injected_source() {
        let seq = append_step(&[], 8, &mut Zeros);
        assert_eq!(seq, vec![0]);
    }

    #[test]
    fn test_empty_palette() {
        let mut rng = seeded_rng(1);
        assert_eq!(append_step(&[2], 0, &mut rng), vec![2]);
    }

    proptest! {
        #[test]
        fn prop_growth_is_one_and_in_range(
            seed in any::<u64>(),
            colors in 1usize..16,
            rounds in 1usize..40,
        ) {
            let mut rng = seeded_rng(seed);
            let mut seq = Vec::new();
            for _ in 0..rounds {
                let next = append_step(&seq, colors, &mut rng);
                prop_assert_eq!(next.len(), seq.len() + 1);
                prop_assert_eq!(&next[..seq.len()], &seq[..]);
                seq = next;
            }
            prop_assert!(seq.iter().all(|&i| i < colors));
        }
    }
}
