//! Random index selection for shuffle mode

use rand::Rng;

/// Pick a uniformly random index in `0..len`, different from `current`
///
/// With fewer than two tracks there is nothing else to pick, so `current`
/// comes back unchanged. Without a current index any position is fair game.
pub fn pick_other_index<R: Rng + ?Sized>(
    rng: &mut R,
    len: usize,
    current: Option<usize>,
) -> Option<usize> {
    match (len, current) {
        (0, _) => None,
        (_, None) => Some(rng.gen_range(0..len)),
        (1, Some(index)) => Some(index),
        (_, Some(index)) => {
            // Draw from len - 1 slots and skip over the current one.
            let drawn = rng.gen_range(0..len - 1);
            Some(if drawn >= index { drawn + 1 } else { drawn })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn empty_playlist_has_no_index() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(pick_other_index(&mut rng, 0, None), None);
        assert_eq!(pick_other_index(&mut rng, 0, Some(0)), None);
    }

    #[test]
    fn single_track_returns_itself() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            assert_eq!(pick_other_index(&mut rng, 1, Some(0)), Some(0));
        }
    }

    #[test]
    fn never_repeats_current_and_reaches_every_other_index() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = HashSet::new();
        for _ in 0..500 {
            let picked = pick_other_index(&mut rng, 5, Some(2)).unwrap();
            assert_ne!(picked, 2);
            assert!(picked < 5);
            seen.insert(picked);
        }
        assert_eq!(seen, HashSet::from([0, 1, 3, 4]));
    }

    #[test]
    fn no_selection_picks_in_range() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            assert!(pick_other_index(&mut rng, 3, None).unwrap() < 3);
        }
    }
}
