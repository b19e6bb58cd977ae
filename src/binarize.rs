use multiversion::multiversion;

use crate::{
    error::{HalftonerError, Result},
    texture::{Shape, Texture, TextureMutSlice, TextureRef, TextureSlice},
    transform::TextureTransform,
};

/// 256-bin intensity histogram of one plane of an interleaved buffer
fn histogram(buf: &[u8], planes: usize, plane: usize) -> [u32; 256] {
    let mut hist = [0u32; 256];
    buf.iter()
        .skip(plane)
        .step_by(planes)
        .for_each(|sample| hist[*sample as usize] += 1);
    hist
}

/// Global optimal threshold over a histogram: picks the cutoff that maximizes
/// between-class variance (equivalently, minimizes intra-class variance).
/// Data-driven, no tunable input.
pub fn otsu_threshold(hist: &[u32; 256]) -> u8 {
    let total: u64 = hist.iter().map(|c| *c as u64).sum();
    let sum_all: u64 = hist
        .iter()
        .enumerate()
        .map(|(level, c)| level as u64 * *c as u64)
        .sum();

    let mut weight_bg = 0u64;
    let mut sum_bg = 0u64;
    let mut best_level = 0u8;
    let mut best_variance = 0.0f64;

    for (level, count) in hist.iter().enumerate() {
        weight_bg += *count as u64;
        if weight_bg == 0 {
            continue;
        }
        let weight_fg = total - weight_bg;
        if weight_fg == 0 {
            break;
        }
        sum_bg += level as u64 * *count as u64;

        let mean_bg = sum_bg as f64 / weight_bg as f64;
        let mean_fg = (sum_all - sum_bg) as f64 / weight_fg as f64;
        let diff = mean_bg - mean_fg;
        let variance = weight_bg as f64 * weight_fg as f64 * diff * diff;

        if variance > best_variance {
            best_variance = variance;
            best_level = level as u8;
        }
    }
    best_level
}

/// Reduces every plane to a strict two-level 0/255 image by global
/// histogram thresholding.
///
/// Each plane gets its own data-driven Otsu threshold; samples strictly above
/// it map to 255, the rest to 0.
pub struct BinarizeTransform;

impl TextureTransform for BinarizeTransform {
    type Input = u8;
    type Output = u8;

    fn apply<'i, 'o>(
        &mut self,
        input: TextureSlice<'i, Self::Input>,
        mut output: TextureMutSlice<'o, Self::Output>,
    ) -> (
        TextureSlice<'i, Self::Input>,
        TextureMutSlice<'o, Self::Output>,
    ) {
        let planes = input.planes() as usize;
        let in_buf = input.as_ref();

        let thresholds: Vec<u8> = (0..planes)
            .map(|plane| otsu_threshold(&histogram(in_buf, planes, plane)))
            .collect();

        threshold_impl(in_buf, output.as_mut(), &thresholds);
        (input, output)
    }

    fn prepare(&mut self, _: Shape, _: Shape) {}
}

#[multiversion(targets("x86_64+avx512f", "x86_64+avx2", "x86_64+sse2"))]
fn threshold_impl(in_buf: &[u8], out_buf: &mut [u8], thresholds: &[u8]) {
    let planes = thresholds.len();
    out_buf
        .chunks_exact_mut(planes)
        .zip(in_buf.chunks_exact(planes))
        .for_each(|(dst_pixel, src_pixel)| {
            dst_pixel
                .iter_mut()
                .zip(src_pixel.iter().zip(thresholds.iter()))
                .for_each(|(dst, (src, threshold))| {
                    *dst = if *src > *threshold { 255 } else { 0 };
                });
        });
}

/// Binarize a texture into a fresh buffer. Works on single-plane channels
/// and on interleaved RGB alike (independent per-plane thresholds).
pub fn binarize(texture: TextureSlice<'_, u8>) -> Result<Texture<u8>> {
    crate::dithering::check_nonzero_shape(&texture)?;

    let mut out = Texture::new(texture.width(), texture.height(), texture.planes());
    BinarizeTransform.once(texture, out.as_texture_mut_slice());
    Ok(out)
}

/// Pack a bimodal single-plane texture to 1 bit per sample for persistence.
///
/// MSB-first within a byte, rows padded up to whole bytes. A bit is set for
/// samples >= 128, so the input is expected to already be two-level.
pub fn pack_1bpp(texture: TextureSlice<'_, u8>) -> Result<Vec<u8>> {
    if texture.planes() != 1 {
        return Err(HalftonerError::InvalidDimension(format!(
            "1-bpp packing expects a single-plane texture, got {} planes",
            texture.planes()
        )));
    }

    let (width, height) = texture.shape_2d();
    let pitch = width.div_ceil(8);
    let mut packed = vec![0u8; pitch * height];

    for (y, row) in texture.as_ref().chunks_exact(width).enumerate() {
        for (x, sample) in row.iter().enumerate() {
            if *sample >= 128 {
                packed[y * pitch + x / 8] |= 0x80 >> (x % 8);
            }
        }
    }
    Ok(packed)
}
