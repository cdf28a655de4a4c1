//! Jump consistent hashing
//!
//! Maps a key onto one of `N` buckets while only moving `1/(N+1)` of keys when a
//! bucket is added. The jump sequence is driven by a generator seeded with three
//! copies of the key.

use rand::distributions::Open01;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::selector::HashKey;

/// Build the generator that drives the jumps for a seed
///
/// # Arguments
///
/// * `seed` - The seed to repeat into our generator state
fn seeded(seed: u64) -> StdRng {
    let mut state = <StdRng as SeedableRng>::Seed::default();
    // repeat our seed three times and leave the tail zeroed
    for chunk in state.chunks_exact_mut(8).take(3) {
        chunk.copy_from_slice(&seed.to_le_bytes());
    }
    StdRng::from_seed(state)
}

/// Select a bucket in `[0, buckets)` for a key
///
/// # Arguments
///
/// * `key` - The key to hash
/// * `buckets` - The number of buckets to pick from
pub fn select(key: &HashKey, buckets: u32) -> u32 {
    // a single bucket can only ever pick itself
    if buckets <= 1 {
        return 0;
    }
    let mut rng = seeded(key.seed());
    let mut bucket: i64 = -1;
    let mut jump: i64 = 0;
    while jump < i64::from(buckets) {
        bucket = jump;
        let r: f64 = rng.sample(Open01);
        // float to int casts saturate so tiny draws just end the loop
        jump = ((bucket + 1) as f64 / r).floor() as i64;
    }
    bucket as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_bucket_always_zero() {
        assert_eq!(select(&HashKey::Int(42), 1), 0);
        for key in 0..1000 {
            assert_eq!(select(&HashKey::Int(key), 1), 0);
        }
    }

    #[test]
    fn zero_buckets_does_not_panic() {
        assert_eq!(select(&HashKey::Int(7), 0), 0);
    }

    #[test]
    fn bucket_chosen_always_within_range() {
        for buckets in 1..64 {
            for key in 0..500 {
                assert!(select(&HashKey::Int(key), buckets) < buckets);
            }
        }
    }

    #[test]
    fn deterministic() {
        for key in 0..1000 {
            let key = HashKey::Bytes(format!("key-{key}").into_bytes());
            assert_eq!(select(&key, 17), select(&key, 17));
        }
    }

    #[test]
    fn list_uses_first_element() {
        let first = HashKey::Bytes(b"orders".to_vec());
        let list = HashKey::List(vec![first.clone(), HashKey::Bytes(b"other".to_vec())]);
        for buckets in 1..32 {
            assert_eq!(select(&list, buckets), select(&first, buckets));
        }
    }

    #[test]
    fn moved_keys_only_go_to_the_new_bucket() {
        for buckets in 1..40 {
            for key in 0..2000 {
                let key = HashKey::Int(key);
                let before = select(&key, buckets);
                let after = select(&key, buckets + 1);
                if before != after {
                    assert_eq!(after, buckets, "key moved to an existing bucket");
                }
            }
        }
    }

    #[test]
    fn new_bucket_causes_minimal_reshuffling() {
        let keys = 10_000;
        for buckets in 1..=24u32 {
            let moved = (0..keys)
                .map(HashKey::Int)
                .filter(|key| select(key, buckets) != select(key, buckets + 1))
                .count();
            let observed = moved as f64 / keys as f64;
            let expected = 1.0 / f64::from(buckets + 1);
            assert!(
                (observed - expected).abs() < 0.03,
                "{buckets} -> {}: moved {observed:.4} expected {expected:.4}",
                buckets + 1
            );
        }
    }

    #[test]
    fn spreads_keys_across_buckets() {
        let buckets = 8;
        let mut counts = [0usize; 8];
        for key in 0..8000 {
            counts[select(&HashKey::Int(key), buckets) as usize] += 1;
        }
        for count in counts {
            assert!((700..=1300).contains(&count), "uneven spread {counts:?}");
        }
    }
}
