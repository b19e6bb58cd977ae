use itertools::iproduct;

use crate::{
    texture::{Shape, Shape2D, TextureMutSlice, TextureRef, TextureSlice},
    transform::TextureTransform,
};

/// Strategy enum for selecting the spot-halftoning implementation.
///
/// Tiles are independent, so the per-tile work parallelizes freely; only the
/// disc rasterization order differs between strategies and both must produce
/// identical output.
#[derive(Debug, Clone, Copy)]
pub enum SpotTransform {
    Seq,
    Par,
}

impl SpotTransform {
    /// Detect best-fit strategy for the given image shape
    pub fn auto(shape_hint: Shape2D) -> Self {
        let (width, height) = shape_hint;
        let count = width * height;

        if width < 450 || count < 202500 {
            return SpotTransform::Seq;
        }
        SpotTransform::Par
    }

    pub fn build(&self, block_size: u32) -> impl TextureTransform<Input = u8, Output = u8> {
        match self {
            SpotTransform::Seq => SpotTransformImpl::Seq(SpotSeq {
                block: block_size as usize,
            }),
            SpotTransform::Par => SpotTransformImpl::Par(SpotPar {
                block: block_size as usize,
            }),
        }
    }
}

enum SpotTransformImpl {
    Seq(SpotSeq),
    Par(SpotPar),
}

impl TextureTransform for SpotTransformImpl {
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
            SpotTransformImpl::Seq(t) => t.apply(input, output),
            SpotTransformImpl::Par(t) => t.apply(input, output),
        }
    }

    fn prepare(&mut self, in_shape: Shape, out_shape: Shape) {
        match self {
            SpotTransformImpl::Seq(t) => t.prepare(in_shape, out_shape),
            SpotTransformImpl::Par(t) => t.prepare(in_shape, out_shape),
        };
    }
}

/// Mean intensity of one tile, computed over its actual extent
/// (trailing tiles may be smaller than the nominal block).
fn tile_mean(in_buf: &[u8], width: usize, height: usize, block: usize, tx: usize, ty: usize) -> f64 {
    let x0 = tx * block;
    let y0 = ty * block;
    let x1 = (x0 + block).min(width);
    let y1 = (y0 + block).min(height);

    let mut sum = 0u64;
    for y in y0..y1 {
        for x in x0..x1 {
            sum += in_buf[y * width + x] as u64;
        }
    }
    sum as f64 / ((x1 - x0) * (y1 - y0)) as f64
}

/// Dot radius for a tile mean: darker tiles get larger dots, up to half the
/// nominal block size. A radius of 0 draws nothing.
fn dot_radius(mean: f64, block: usize) -> i64 {
    ((1.0 - mean / 255.0) * (block as f64 / 2.0)).round() as i64
}

/// Horizontal half-extent of a disc of radius `r` at vertical offset `dy`,
/// exact under integer arithmetic so every strategy rasterizes the same disc.
fn disc_span(r: i64, dy: i64) -> i64 {
    let mut dx = 0;
    while (dx + 1) * (dx + 1) + dy * dy <= r * r {
        dx += 1;
    }
    dx
}

struct SpotSeq {
    block: usize,
}

impl TextureTransform for SpotSeq {
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
        let block = self.block;
        let in_buf = input.as_ref();
        let out_buf = output.as_mut();

        // discs are rendered on an all-zero canvas; overlapping discs from
        // adjacent tiles all write 255, so draw order does not matter
        out_buf.fill(0);

        for (ty, tx) in iproduct!(0..height.div_ceil(block), 0..width.div_ceil(block)) {
            let mean = tile_mean(in_buf, width, height, block, tx, ty);
            let r = dot_radius(mean, block);
            if r == 0 {
                continue;
            }

            // nominal block geometry for placement, even on partial tiles
            let cx = (tx * block + block / 2) as i64;
            let cy = (ty * block + block / 2) as i64;
            for dy in -r..=r {
                let y = cy + dy;
                if y < 0 || y >= height as i64 {
                    continue;
                }
                let dx = disc_span(r, dy);
                // a trailing tile's nominal center can sit past the canvas
                if cx - dx > width as i64 - 1 || cx + dx < 0 {
                    continue;
                }
                let x0 = (cx - dx).max(0) as usize;
                let x1 = (cx + dx).min(width as i64 - 1) as usize;
                out_buf[y as usize * width + x0..=y as usize * width + x1].fill(255);
            }
        }

        (input, output)
    }

    fn prepare(&mut self, _: Shape, _: Shape) {}
}

struct SpotPar {
    block: usize,
}

impl TextureTransform for SpotPar {
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
        use rayon::prelude::*;

        let (width, height) = input.shape_2d();
        let block = self.block;
        let in_buf = input.as_ref();

        let tiles_x = width.div_ceil(block);
        let tiles_y = height.div_ceil(block);

        // phase 1: per-tile means and radii, independent across tiles
        let radii: Vec<i64> = (0..tiles_x * tiles_y)
            .into_par_iter()
            .map(|tile_idx| {
                let mean = tile_mean(
                    in_buf,
                    width,
                    height,
                    block,
                    tile_idx % tiles_x,
                    tile_idx / tiles_x,
                );
                dot_radius(mean, block)
            })
            .collect();

        // phase 2: render per output row; a row only intersects the few tile
        // bands whose disc extent reaches it
        let b = block as i64;
        let b2 = (block / 2) as i64;
        let r_max = (block as f64 / 2.0).round() as i64;

        output
            .as_mut()
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| {
                row.fill(0);
                let y = y as i64;

                let ty_lo = (y - b2 - r_max).div_euclid(b).max(0);
                let ty_hi = (y - b2 + r_max).div_euclid(b).min(tiles_y as i64 - 1);
                for ty in ty_lo..=ty_hi {
                    let cy = ty * b + b2;
                    let dy = y - cy;
                    for tx in 0..tiles_x {
                        let r = radii[ty as usize * tiles_x + tx];
                        if r == 0 || dy.abs() > r {
                            continue;
                        }
                        let dx = disc_span(r, dy);
                        let cx = (tx * block) as i64 + b2;
                        if cx - dx > width as i64 - 1 || cx + dx < 0 {
                            continue;
                        }
                        let x0 = (cx - dx).max(0) as usize;
                        let x1 = (cx + dx).min(width as i64 - 1) as usize;
                        row[x0..=x1].fill(255);
                    }
                }
            });

        (input, output)
    }

    fn prepare(&mut self, _: Shape, _: Shape) {}
}
