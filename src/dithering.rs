use rayon::prelude::*;

use crate::{
    error::{HalftonerError, Result},
    texture::{Shape, Texture, TextureMutSlice, TextureRef, TextureSlice},
    transform::TextureTransform,
};

pub mod diffusion;
pub mod matrix;
pub mod ordered;
pub mod spot;

use diffusion::DiffusionTransform;
use matrix::ThresholdMatrix;
use ordered::OrderedTransform;
use spot::SpotTransform;

/// Closed set of channel-quantization algorithms.
///
/// Behavior is selected by tag, never by overriding; every variant reduces a
/// continuous-tone channel to bimodal 0/255 samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HalftoneMode {
    /// Block-mean spot halftoning with filled discs
    Spot { block_size: u32 },
    /// Floyd-Steinberg error diffusion
    Diffuse,
    /// Ordered dithering against a tiled Bayer threshold matrix
    Ordered { matrix_size: u32 },
}

/// Quantizes every plane of a texture independently with one fixed
/// [HalftoneMode] configuration.
///
/// Channels share nothing: each plane gets its own freshly built algorithm
/// instance, so three identical input planes always produce three identical
/// output planes. Color fringing at quantization boundaries is the accepted
/// cost of this per-channel independence.
pub struct HalftoneTransform {
    mode: HalftoneMode,
    /// built once per transform for ordered mode, reused across planes
    /// and images
    matrix: Option<ThresholdMatrix>,
}

impl HalftoneTransform {
    /// Validate the mode parameters and build the transform.
    ///
    /// Rejection happens here, before any pixel is touched: a zero
    /// `block_size` or a non-power-of-two `matrix_size` never reaches the
    /// quantization kernels.
    pub fn new(mode: HalftoneMode) -> Result<Self> {
        let matrix = match mode {
            HalftoneMode::Spot { block_size } => {
                if block_size == 0 {
                    return Err(HalftonerError::InvalidParameter(
                        "block size must be positive".to_string(),
                    ));
                }
                None
            }
            HalftoneMode::Diffuse => None,
            HalftoneMode::Ordered { matrix_size } => Some(ThresholdMatrix::build(matrix_size)?),
        };
        Ok(Self { mode, matrix })
    }

    fn quantize_plane(&self, in_plane: &[u8], out_plane: &mut [u8], width: u32, height: u32) {
        let input = TextureSlice::new(width, height, 1, in_plane);
        let output = TextureMutSlice::new(width, height, 1, out_plane);
        let shape_hint = (width as usize, height as usize);

        match self.mode {
            HalftoneMode::Spot { block_size } => {
                SpotTransform::auto(shape_hint)
                    .build(block_size)
                    .once(input, output);
            }
            HalftoneMode::Diffuse => {
                DiffusionTransform.once(input, output);
            }
            HalftoneMode::Ordered { .. } => {
                let matrix = self
                    .matrix
                    .clone()
                    .expect("matrix is built at construction for ordered mode");
                OrderedTransform::auto(shape_hint)
                    .build(matrix)
                    .once(input, output);
            }
        }
    }
}

impl TextureTransform for HalftoneTransform {
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
        let (width, height, planes) = input.shape();
        let in_buf = input.as_ref();
        let out_buf = output.as_mut();

        // deinterleave, quantize planes concurrently, reinterleave
        let deinterleaved: Vec<Vec<u8>> = (0..planes)
            .map(|plane| in_buf.iter().skip(plane).step_by(planes).copied().collect())
            .collect();

        let quantized: Vec<Vec<u8>> = deinterleaved
            .par_iter()
            .map(|in_plane| {
                let mut out_plane = vec![0u8; width * height];
                self.quantize_plane(in_plane, &mut out_plane, width as u32, height as u32);
                out_plane
            })
            .collect();

        for (plane, out_plane) in quantized.iter().enumerate() {
            for (pixel_idx, sample) in out_plane.iter().enumerate() {
                out_buf[pixel_idx * planes + plane] = *sample;
            }
        }

        (input, output)
    }

    fn prepare(&mut self, _: Shape, _: Shape) {}
}

/// Apply one quantization mode to a single-plane channel buffer.
pub fn quantize_channel(
    mode: HalftoneMode,
    input: TextureSlice<'_, u8>,
    output: TextureMutSlice<'_, u8>,
) -> Result {
    check_paired_shapes(&input, &output)?;
    if input.planes() != 1 {
        return Err(HalftonerError::InvalidDimension(format!(
            "channel buffer must have exactly one plane, got {}",
            input.planes()
        )));
    }

    HalftoneTransform::new(mode)?.once(input, output);
    Ok(())
}

/// Split an interleaved RGB texture into channels, quantize each channel
/// independently with the identical configuration and recombine.
///
/// The output is a fresh texture; input is never aliased.
pub fn halftone_rgb(image: TextureSlice<'_, u8>, mode: HalftoneMode) -> Result<Texture<u8>> {
    check_nonzero_shape(&image)?;
    if image.planes() != 3 {
        return Err(HalftonerError::InvalidDimension(format!(
            "RGB image must have exactly three planes, got {}",
            image.planes()
        )));
    }

    let mut out = Texture::new(image.width(), image.height(), image.planes());
    HalftoneTransform::new(mode)?.once(image, out.as_texture_mut_slice());
    Ok(out)
}

pub(crate) fn check_nonzero_shape<T: TextureRef>(texture: &T) -> Result {
    if texture.width() == 0 || texture.height() == 0 || texture.planes() == 0 {
        return Err(HalftonerError::InvalidDimension(format!(
            "texture dimensions must be positive, got {}x{}x{}",
            texture.width(),
            texture.height(),
            texture.planes()
        )));
    }
    Ok(())
}

pub(crate) fn check_paired_shapes<A: TextureRef, B: TextureRef>(input: &A, output: &B) -> Result {
    check_nonzero_shape(input)?;
    if input.shape() != output.shape() {
        return Err(HalftonerError::InvalidDimension(format!(
            "paired buffers disagree: input {:?} vs output {:?}",
            input.shape(),
            output.shape()
        )));
    }
    Ok(())
}
