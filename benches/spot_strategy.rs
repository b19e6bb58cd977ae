use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use halftoner::dithering::spot::SpotTransform;

pub(crate) mod bench_utils;
use bench_utils::*;

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("spot_transform");

    macro_rules! benchmark_by_param {
        ($block_sizes:expr, $strategy:expr, $label:expr) => {
            for block_size in $block_sizes {
                let mut transform = $strategy.build(block_size);
                let (input, output) = random_channel_pair(BENCH_IMAGE_SIZE);
                let id = BenchmarkId::new($label, block_size);
                bench_transform(&mut group, id, block_size, &mut transform, input, output);
            }
        };
    }

    let block_sizes = [4, 8, 16, 32];
    benchmark_by_param!(block_sizes, SpotTransform::Seq, "seq");
    benchmark_by_param!(block_sizes, SpotTransform::Par, "par");

    group.finish();
}

criterion_group!(spot_strategy, criterion_benchmark);
criterion_main!(spot_strategy);
