use hdrhistogram::Histogram;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::{NodeRef, RedBlackTree};

fn gen_unique_keys_int(count: usize, random: bool, key_max: u64) -> Vec<u64> {
    if random {
        let mut rng = ChaCha8Rng::seed_from_u64(123);
        rand::seq::index::sample(&mut rng, key_max as usize, count)
            .into_iter()
            .map(|a| a as u64)
            .collect()
    } else {
        (0..count as u64).collect()
    }
}

/// Records the depth of every node, the root has depth 1.
fn depths(tree: &RedBlackTree<u64>) -> Histogram<u64> {
    fn inner(node: Option<NodeRef<'_, u64>>, depth: u64, hist: &mut Histogram<u64>) {
        if let Some(node) = node {
            hist.record(depth).unwrap();
            inner(node.left(), depth + 1, hist);
            inner(node.right(), depth + 1, hist);
        }
    }

    let mut hist = Histogram::new(3).unwrap();
    inner(tree.root(), 1, &mut hist);
    hist
}

#[test]
#[ignore = "not really a test but prints some metrics about tree shape"]
fn metrics() {
    #[derive(Debug)]
    #[allow(dead_code)]
    struct StatsPrint {
        min: u64,
        p50: u64,
        p90: u64,
        max: u64,
        mean: f64,
        std: f64,
    }

    impl StatsPrint {
        fn new(stats: &Histogram<u64>) -> Self {
            Self {
                min: stats.min(),
                p50: stats.value_at_quantile(0.5),
                p90: stats.value_at_quantile(0.9),
                max: stats.max(),
                mean: stats.mean(),
                std: stats.stdev(),
            }
        }
    }

    for random in [false, true] {
        for count in [1_000, 10_000, 100_000] {
            let keys = gen_unique_keys_int(count, random, u64::MAX / 2);
            let mut tree: RedBlackTree<u64> = keys.iter().copied().collect();
            tree.validate().unwrap();

            let bound = 2.0 * ((count + 1) as f64).log2();
            println!(
                "\nrandom={random} n={count} height={} black_height={} bound={bound:.1}\n  depth={:#?}",
                tree.height(),
                tree.black_height(),
                StatsPrint::new(&depths(&tree))
            );
            assert!(tree.height() as f64 <= bound);

            for key in keys.iter().step_by(2) {
                tree.delete(key);
            }
            tree.validate().unwrap();
            println!(
                "after deleting half: height={} depth={:#?}",
                tree.height(),
                StatsPrint::new(&depths(&tree))
            );
        }
    }
}
