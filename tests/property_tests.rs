//! Property-based tests using proptest

use coread::{normalize, rating_similarity, ItemId, Rating, RatingVector, VisitedRegistry};
use coread_core::NodeKey;
use proptest::prelude::*;
use std::sync::Arc;

const LABELS: [&str; 5] = [
    "did not like it",
    "it was ok",
    "liked it",
    "really liked it",
    "it was amazing",
];

fn rating_vector() -> impl Strategy<Value = RatingVector> {
    prop::collection::hash_map(0u32..40, 1u8..=5, 0..25).prop_map(|entries| {
        entries
            .into_iter()
            .map(|(item, stars)| (ItemId::from(format!("item-{}", item)), Rating::new(stars).unwrap()))
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn test_unknown_labels_never_rate(label in ".{0,24}") {
        prop_assume!(!LABELS.contains(&label.as_str()));
        prop_assert_eq!(normalize(&label), None);
    }

    #[test]
    fn test_known_labels_in_range(idx in 0usize..5) {
        let rating = normalize(LABELS[idx]).unwrap();
        prop_assert_eq!(rating.value() as usize, idx + 1);
    }

    #[test]
    fn test_self_similarity_is_one(seed in rating_vector()) {
        match rating_similarity(&seed, &seed) {
            None => prop_assert!(seed.is_empty()),
            Some(sim) => {
                prop_assert_eq!(sim.score, 1.0);
                prop_assert_eq!(sim.overlap, seed.len());
            }
        }
    }

    #[test]
    fn test_similarity_bounded_and_symmetric(a in rating_vector(), b in rating_vector()) {
        let ab = rating_similarity(&a, &b);
        let ba = rating_similarity(&b, &a);
        prop_assert_eq!(ab, ba);

        let shared = a.keys().filter(|k| b.contains_key(*k)).count();
        match ab {
            None => prop_assert_eq!(shared, 0),
            Some(sim) => {
                prop_assert!(shared > 0);
                prop_assert_eq!(sim.overlap, shared);
                prop_assert!((0.0..=1.0).contains(&sim.score), "score {} out of range", sim.score);
            }
        }
    }

    #[test]
    fn test_agreeing_more_never_scores_lower(seed in rating_vector(), pick in any::<prop::sample::Index>()) {
        prop_assume!(!seed.is_empty());

        // Candidate disagrees maximally everywhere, then agrees on one item.
        let flipped: RatingVector = seed
            .iter()
            .map(|(k, r)| (k.clone(), Rating::new(if r.value() >= 3 { 1 } else { 5 }).unwrap()))
            .collect();
        let key = pick.get(&seed.keys().cloned().collect::<Vec<_>>()).clone();
        let mut closer = flipped.clone();
        closer.insert(key.clone(), seed[&key]);

        let before = rating_similarity(&seed, &flipped).unwrap().score;
        let after = rating_similarity(&seed, &closer).unwrap().score;
        prop_assert!(after >= before);
    }

    #[test]
    fn test_claims_unique_across_threads(ids in prop::collection::vec(0u64..50, 1..200)) {
        let registry = Arc::new(VisitedRegistry::new());
        let ids = Arc::new(ids);

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let registry = registry.clone();
                let ids = ids.clone();
                std::thread::spawn(move || {
                    ids.iter()
                        .filter(|id| registry.try_claim(&NodeKey::Item(ItemId::from(**id))))
                        .count()
                })
            })
            .collect();

        let wins: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        let distinct: std::collections::HashSet<_> = ids.iter().collect();
        prop_assert_eq!(wins, distinct.len());
    }
}
