use multiversion::multiversion;

use crate::{
    dithering::matrix::ThresholdMatrix,
    texture::{Shape, Shape2D, TextureMutSlice, TextureRef, TextureSlice},
    transform::TextureTransform,
    utils::transform::precompute_tiled_rows,
};

/// Strategy enum for selecting the ordered-dithering implementation.
///
/// The transform is purely pixel-local, so row parallelism does not change
/// the output.
#[derive(Debug, Clone, Copy)]
pub enum OrderedTransform {
    Seq,
    Par,
}

impl OrderedTransform {
    /// Detect best-fit strategy for the given image shape
    pub fn auto(shape_hint: Shape2D) -> Self {
        let (width, height) = shape_hint;
        let count = width * height;

        if width < 450 || count < 202500 {
            return OrderedTransform::Seq;
        }
        OrderedTransform::Par
    }

    pub fn build(&self, matrix: ThresholdMatrix) -> impl TextureTransform<Input = u8, Output = u8> {
        match self {
            OrderedTransform::Seq => OrderedTransformImpl::Seq(OrderedSeq::new(matrix)),
            OrderedTransform::Par => OrderedTransformImpl::Par(OrderedPar::new(matrix)),
        }
    }
}

enum OrderedTransformImpl {
    Seq(OrderedSeq),
    Par(OrderedPar),
}

impl TextureTransform for OrderedTransformImpl {
    type Input = u8;
    type Output = u8;

    fn apply<'i, 'o>(
        &mut self,
        input: TextureSlice<'i, Self::Input>,
        output: TextureMutSlice<'o, Self::Output>,
    ) -> (
        TextureSlice<'i, Self::Input>,
        TextureMutSlice<'o, Self::Output>,
    ) {
        match self {
            OrderedTransformImpl::Seq(t) => t.apply(input, output),
            OrderedTransformImpl::Par(t) => t.apply(input, output),
        }
    }

    fn prepare(&mut self, in_shape: Shape, out_shape: Shape) {
        match self {
            OrderedTransformImpl::Seq(t) => t.prepare(in_shape, out_shape),
            OrderedTransformImpl::Par(t) => t.prepare(in_shape, out_shape),
        };
    }
}

struct OrderedSeq {
    matrix: ThresholdMatrix,
    /// threshold rows pre-expanded to image width, one per matrix row
    tiled: Vec<f32>,
}

impl OrderedSeq {
    fn new(matrix: ThresholdMatrix) -> Self {
        Self {
            matrix,
            tiled: Vec::new(),
        }
    }
}

impl TextureTransform for OrderedSeq {
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
        scalar_impl(
            input.as_ref(),
            output.as_mut(),
            input.width() as usize,
            &self.tiled,
            (self.matrix.side() - 1) as usize,
        );
        (input, output)
    }

    fn prepare(&mut self, in_shape: Shape, _: Shape) {
        let (width, _, _) = in_shape;
        let matrix = &self.matrix;
        self.tiled = precompute_tiled_rows(matrix.side() as usize, width, |x, y, _| {
            matrix.threshold(x, y)
        });
    }
}

struct OrderedPar {
    seq: OrderedSeq,
}

impl OrderedPar {
    fn new(matrix: ThresholdMatrix) -> Self {
        Self {
            seq: OrderedSeq::new(matrix),
        }
    }
}

impl TextureTransform for OrderedPar {
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
        scalar_par_impl(
            input.as_ref(),
            output.as_mut(),
            input.width() as usize,
            &self.seq.tiled,
            (self.seq.matrix.side() - 1) as usize,
        );
        (input, output)
    }

    fn prepare(&mut self, in_shape: Shape, out_shape: Shape) {
        self.seq.prepare(in_shape, out_shape);
    }
}

const INV_255: f32 = 1.0 / 255.0;

#[multiversion(targets("x86_64+avx512f", "x86_64+avx2", "x86_64+sse2"))]
fn scalar_impl(in_buf: &[u8], out_buf: &mut [u8], width: usize, tiled: &[f32], side_mask: usize) {
    out_buf
        .chunks_exact_mut(width)
        .zip(in_buf.chunks_exact(width))
        .enumerate()
        .for_each(|(y, (out_row, in_row))| {
            let tiled_start = (y & side_mask) * width;
            let tiled_row = &tiled[tiled_start..tiled_start + width];

            out_row
                .iter_mut()
                .zip(in_row.iter().zip(tiled_row.iter()))
                .for_each(|(dst, (src, threshold))| {
                    *dst = if *src as f32 * INV_255 > *threshold {
                        255
                    } else {
                        0
                    };
                });
        });
}

#[multiversion(targets("x86_64+avx512f", "x86_64+avx2", "x86_64+sse2"))]
fn scalar_par_impl(
    in_buf: &[u8],
    out_buf: &mut [u8],
    width: usize,
    tiled: &[f32],
    side_mask: usize,
) {
    use rayon::prelude::*;

    out_buf
        .par_chunks_exact_mut(width)
        .zip(in_buf.par_chunks_exact(width))
        .enumerate()
        .for_each(|(y, (out_row, in_row))| {
            let tiled_start = (y & side_mask) * width;
            let tiled_row = &tiled[tiled_start..tiled_start + width];

            out_row
                .iter_mut()
                .zip(in_row.iter().zip(tiled_row.iter()))
                .for_each(|(dst, (src, threshold))| {
                    *dst = if *src as f32 * INV_255 > *threshold {
                        255
                    } else {
                        0
                    };
                });
        });
}
