use std::{fmt::Display, hint::black_box};

use criterion::{BenchmarkGroup, BenchmarkId, measurement::WallTime};
use halftoner::{
    prelude::TextureTransform,
    texture::{Texture, TextureRef},
};
use rand::Rng;

pub const BENCH_IMAGE_SIZE: usize = 300;

pub fn gen_random_channel(size: usize) -> Vec<u8> {
    let mut rng = rand::rng();
    (0..(size * size)).map(|_| rng.random::<u8>()).collect()
}

pub fn random_channel_pair(size: usize) -> (Texture<u8>, Texture<u8>) {
    let channel = gen_random_channel(size);
    (
        Texture::from_slice(size as u32, size as u32, 1, &channel),
        Texture::new(size as u32, size as u32, 1),
    )
}

pub fn bench_transform<In, Out, T: Display>(
    group: &mut BenchmarkGroup<'_, WallTime>,
    id: BenchmarkId,
    param: T,
    transform: &mut impl TextureTransform<Input = In, Output = Out>,
    input: Texture<In>,
    mut output: Texture<Out>,
) {
    group.bench_with_input(id, &param, |b, _| {
        transform.prepare(input.shape(), output.shape());
        b.iter(|| {
            let res = transform.apply(input.as_texture_slice(), output.as_texture_mut_slice());
            black_box(res);
        });
    });
}
