use rand::Rng;

use crate::texture::Texture;

pub fn gen_random_channel(width: usize, height: usize) -> Vec<u8> {
    let mut rng = rand::rng();
    (0..width * height).map(|_| rng.random::<u8>()).collect()
}

pub fn uniform_channel(width: u32, height: u32, value: u8) -> Texture<u8> {
    Texture::from_slice(
        width,
        height,
        1,
        &vec![value; (width * height) as usize],
    )
}

/// Assert that two channels match pixel by pixel
pub fn assert_channels_match(a: &[u8], b: &[u8], width: usize, label_a: &str, label_b: &str) {
    assert_eq!(a.len(), b.len(), "channel lengths don't match");
    for (idx, (a_px, b_px)) in a.iter().zip(b.iter()).enumerate() {
        assert_eq!(
            a_px,
            b_px,
            "Pixel mismatch at index {} (x={}, y={}): {}={}, {}={}",
            idx,
            idx % width,
            idx / width,
            label_a,
            a_px,
            label_b,
            b_px
        );
    }
}
