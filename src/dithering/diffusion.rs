use crate::{
    texture::{Shape, TextureMutSlice, TextureRef, TextureSlice},
    transform::TextureTransform,
};

// Classic Floyd-Steinberg kernel, error shares of the still-unprocessed
// neighbors in raster order
const RIGHT: f32 = 7.0 / 16.0;
const BELOW_LEFT: f32 = 3.0 / 16.0;
const BELOW: f32 = 5.0 / 16.0;
const BELOW_RIGHT: f32 = 1.0 / 16.0;

/// Floyd-Steinberg error diffusion over a single-plane texture.
///
/// The scan is strictly sequential: each pixel's quantization depends on the
/// error accumulated from causally earlier pixels in raster order, so this
/// transform cannot be parallelized within a channel. Independent channels
/// can run concurrently.
///
/// The last row and the first/last columns are excluded from quantization and
/// pass through unmodified apart from the final clamp, so they can keep
/// non-binary leftover values. This mirrors the upstream behavior on purpose;
/// whether those borders should instead diffuse with clamped or wrapped
/// neighbor indices is an open product question.
pub struct DiffusionTransform;

impl TextureTransform for DiffusionTransform {
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
        let (width, height) = input.shape_2d();

        // fold over raster order with a float accumulator scoped to this call
        let mut work: Vec<f32> = input.as_ref().iter().map(|v| *v as f32).collect();

        for y in 0..height.saturating_sub(1) {
            for x in 1..width.saturating_sub(1) {
                let idx = y * width + x;

                let old = work[idx];
                let new = if old < 128.0 { 0.0 } else { 255.0 };
                work[idx] = new;

                let error = old - new;
                work[idx + 1] += error * RIGHT;
                work[idx + width - 1] += error * BELOW_LEFT;
                work[idx + width] += error * BELOW;
                work[idx + width + 1] += error * BELOW_RIGHT;
            }
        }

        // clamp every sample (including the untouched border) back to 8-bit
        output
            .as_mut()
            .iter_mut()
            .zip(work.iter())
            .for_each(|(dst, acc)| *dst = acc.clamp(0.0, 255.0) as u8);

        (input, output)
    }

    fn prepare(&mut self, _: Shape, _: Shape) {}
}
