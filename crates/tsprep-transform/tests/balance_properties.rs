use std::collections::BTreeMap;

use proptest::prelude::*;
use tsprep_transform::RandomOverSampler;

proptest! {
    #[test]
    fn every_class_reaches_the_majority(labels in prop::collection::vec(0u32..5, 1..200), seed in any::<u64>()) {
        let indices = RandomOverSampler::new(seed).sample_indices(&labels);

        let mut before: BTreeMap<u32, usize> = BTreeMap::new();
        for &label in &labels {
            *before.entry(label).or_default() += 1;
        }
        let majority = before.values().copied().max().unwrap();

        let mut after: BTreeMap<u32, usize> = BTreeMap::new();
        for &idx in &indices {
            *after.entry(labels[idx]).or_default() += 1;
        }

        prop_assert_eq!(indices.len(), majority * before.len());
        prop_assert!(after.values().all(|&count| count == majority));
        let expected_prefix = (0..labels.len()).collect::<Vec<_>>();
        prop_assert_eq!(&indices[..labels.len()], expected_prefix.as_slice());
    }

    #[test]
    fn sampling_is_deterministic_per_seed(labels in prop::collection::vec(0u32..3, 1..50), seed in any::<u64>()) {
        let sampler = RandomOverSampler::new(seed);
        prop_assert_eq!(sampler.sample_indices(&labels), sampler.sample_indices(&labels));
    }
}
