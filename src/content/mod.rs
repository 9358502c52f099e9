//! Content browsers: quests, songs and memories
//!
//! Each browser owns a static collection (fetched once at mount) and one
//! persistent cell. Everything here is pure state; the DOM side lives in
//! `ui`.

pub mod memories;
pub mod quests;
pub mod songs;

pub use memories::{CopyFlash, Memory, MemoryBrowser};
pub use quests::{CheckItem, Quest, QuestProgress, QuestStatus, QuestTracker};
pub use songs::{Mood, Song, SongBrowser, SongCatalog};

use rand::Rng;

/// Uniform pick from a slice
pub fn pick<'a, T, R: Rng + ?Sized>(items: &'a [T], rng: &mut R) -> Option<&'a T> {
    if items.is_empty() {
        None
    } else {
        items.get(rng.random_range(0..items.len()))
    }
}

/// Uniform pick from `pool`, or from `all` when the pool is empty
pub fn pick_with_fallback<'a, T, R: Rng + ?Sized>(
    pool: &[&'a T],
    all: &'a [T],
    rng: &mut R,
) -> Option<&'a T> {
    if pool.is_empty() {
        pick(all, rng)
    } else {
        pick(pool, rng).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn empty_pool_falls_back_to_full_collection() {
        let mut rng = Pcg32::seed_from_u64(0);
        let all = vec![1, 2, 3, 4, 5];
        for _ in 0..50 {
            let picked = pick_with_fallback(&[], &all, &mut rng);
            assert!(picked.is_some_and(|n| all.contains(n)));
        }
    }

    #[test]
    fn pick_stays_within_pool() {
        let mut rng = Pcg32::seed_from_u64(1);
        let all = vec![1, 2, 3, 4, 5];
        let pool: Vec<&i32> = all.iter().filter(|n| **n % 2 == 0).collect();
        for _ in 0..50 {
            let n = pick_with_fallback(&pool, &all, &mut rng).copied();
            assert!(matches!(n, Some(2) | Some(4)));
        }
    }

    #[test]
    fn nothing_to_pick_from() {
        let mut rng = Pcg32::seed_from_u64(2);
        let all: Vec<i32> = Vec::new();
        assert_eq!(pick_with_fallback(&[], &all, &mut rng), None);
    }
}
