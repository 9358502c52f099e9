//! Property tests for the platform-free core

use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use memory_box::consts::RECYCLE_MARGIN;
use memory_box::content::{Memory, MemoryBrowser};
use memory_box::persistence::{DurableStore, Immediate, PersistentCell, toggle_membership};
use memory_box::sim::ParticleField;

fn browser_with(memories: Vec<Memory>, seed: u64) -> MemoryBrowser {
    let cell = PersistentCell::new(DurableStore::in_memory(), Rc::new(Immediate), "saved", Vec::new());
    let mut browser = MemoryBrowser::new(cell);
    browser.set_memories(memories, &mut Pcg32::seed_from_u64(seed));
    browser
}

fn memories_strategy() -> impl Strategy<Value = Vec<Memory>> {
    prop::collection::vec(prop::collection::vec("[a-d]", 0..3), 1..12).prop_map(|tag_lists| {
        tag_lists
            .into_iter()
            .enumerate()
            .map(|(i, tags)| Memory {
                id: format!("m{}", i),
                text: format!("memory {}", i),
                tags,
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn stored_values_read_back(progress in prop::collection::btree_map("[a-z]{1,6}", prop::collection::vec(any::<bool>(), 0..8), 0..6)) {
        let store = DurableStore::in_memory();
        prop_assert!(store.write("progress", &progress));
        let read: BTreeMap<String, Vec<bool>> = store.read("progress", BTreeMap::new());
        prop_assert_eq!(read, progress);
    }

    #[test]
    fn double_toggle_restores_the_list(
        ids in prop::collection::btree_set("[a-z]{1,4}", 0..10),
        id in "[a-z]{1,4}",
    ) {
        let list: Vec<String> = ids.into_iter().collect();
        let once = toggle_membership(&list, &id);
        prop_assert_eq!(once.contains(&id), !list.contains(&id));
        prop_assert_eq!(toggle_membership(&once, &id), list);
    }

    #[test]
    fn population_never_changes(
        count in 0usize..80,
        seed in any::<u64>(),
        sizes in prop::collection::vec((1.0f32..2000.0, 1.0f32..2000.0), 1..5),
    ) {
        let mut field = ParticleField::new(count, 800.0, 600.0, seed);
        for (w, h) in sizes {
            field.resize(w, h);
            for _ in 0..50 {
                field.tick();
            }
            prop_assert_eq!(field.len(), count);
        }
    }

    #[test]
    fn nothing_stays_past_the_top(seed in any::<u64>(), width in 1.0f32..2000.0, height in 1.0f32..2000.0) {
        let mut field = ParticleField::new(40, width, height, seed);
        for _ in 0..500 {
            field.tick();
            for p in field.particles() {
                prop_assert!(p.pos.y >= -RECYCLE_MARGIN);
            }
        }
    }

    #[test]
    fn current_memory_follows_the_tag_filter(
        memories in memories_strategy(),
        tags in prop::collection::vec("[a-d]", 0..4),
        seed in any::<u64>(),
    ) {
        let mut browser = browser_with(memories, seed);
        let mut rng = Pcg32::seed_from_u64(seed ^ 1);
        for tag in &tags {
            browser.toggle_tag(tag, &mut rng);
        }

        let active: BTreeSet<String> = browser.active_tags().clone();
        let current = browser.current().cloned();
        prop_assert!(current.is_some());
        let current = current.unwrap();

        let pool = browser.filtered();
        if active.is_empty() || pool.is_empty() {
            // Falls back to the whole collection
            prop_assert!(browser.memories().iter().any(|m| m.id == current.id));
        } else {
            prop_assert!(current.has_any_tag(&active));
            prop_assert!(pool.iter().all(|m| m.has_any_tag(&active)));
        }
    }
}
