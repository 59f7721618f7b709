//! Random train / test partition.

use rand::{Rng, seq::SliceRandom};

/// Shuffle `items` and cut after `floor(len · train_ratio)` elements.
pub fn random_split<T, R: Rng + ?Sized>(
    mut items: Vec<T>,
    train_ratio: f32,
    rng: &mut R,
) -> (Vec<T>, Vec<T>) {
    let ratio = train_ratio.clamp(0.0, 1.0);
    let train_len = (items.len() as f32 * ratio) as usize;
    items.shuffle(rng);
    let test = items.split_off(train_len);
    (items, test)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn sizes_follow_ratio() {
        let mut rng = StdRng::seed_from_u64(7);
        let (train, test) = random_split((0..20).collect::<Vec<_>>(), 0.8, &mut rng);
        assert_eq!((train.len(), test.len()), (16, 4));

        let (train, test) = random_split((0..7).collect::<Vec<_>>(), 0.8, &mut rng);
        assert_eq!((train.len(), test.len()), (5, 2));
    }

    #[test]
    fn partition_is_complete_and_disjoint() {
        let mut rng = StdRng::seed_from_u64(1);
        let (train, test) = random_split((0..50).collect::<Vec<_>>(), 0.8, &mut rng);
        let mut all: Vec<_> = train.iter().chain(&test).copied().collect();
        all.sort();
        assert_eq!(all, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn seed_makes_split_reproducible() {
        let a = random_split((0..30).collect::<Vec<_>>(), 0.8, &mut StdRng::seed_from_u64(3));
        let b = random_split((0..30).collect::<Vec<_>>(), 0.8, &mut StdRng::seed_from_u64(3));
        assert_eq!(a, b);
    }
}
