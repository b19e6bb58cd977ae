use crate::utils::buffer::uninitialized_buffer;

/// (width, height, planes)
pub type Shape = (usize, usize, usize);
/// (width, height)
pub type Shape2D = (usize, usize);

/// Trait defining ops available on Textures with
/// lendable inner buffer
pub trait TextureRef: AsRef<[Self::Inner]> {
    type Inner;

    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn planes(&self) -> u32;

    #[inline]
    fn shape(&self) -> Shape {
        (
            self.width() as usize,
            self.height() as usize,
            self.planes() as usize,
        )
    }

    #[inline]
    fn shape_2d(&self) -> Shape2D {
        (self.width() as usize, self.height() as usize)
    }
}

/// Trait defining ops available on mutable
/// Textures
pub trait TextureMut: TextureRef + AsMut<[Self::Inner]> {}

/// Texture with owned buffer. Samples are row-major,
/// planes interleaved per pixel.
#[derive(Debug, Clone)]
pub struct Texture<T> {
    width: u32,
    height: u32,
    planes: u32,
    buffer: Vec<T>,
}

impl<T> AsRef<[T]> for Texture<T> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        &self.buffer
    }
}

impl<T> AsMut<[T]> for Texture<T> {
    #[inline]
    fn as_mut(&mut self) -> &mut [T] {
        &mut self.buffer
    }
}

impl<T> TextureRef for Texture<T> {
    type Inner = T;

    #[inline]
    fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn planes(&self) -> u32 {
        self.planes
    }
}

impl<T> TextureMut for Texture<T> {}

impl<T> Texture<T> {
    /// # Safety
    ///
    /// Make sure the texture is initialized before usage.
    pub unsafe fn new_uninitialized(width: u32, height: u32, planes: u32) -> Self {
        Self {
            width,
            height,
            planes,
            buffer: unsafe { uninitialized_buffer((width * height * planes) as usize) },
        }
    }

    pub fn as_texture_slice<'s>(&'s self) -> TextureSlice<'s, T> {
        TextureSlice {
            width: self.width,
            height: self.height,
            planes: self.planes,
            buffer: &self.buffer,
        }
    }

    pub fn as_texture_mut_slice<'s>(&'s mut self) -> TextureMutSlice<'s, T> {
        TextureMutSlice {
            width: self.width,
            height: self.height,
            planes: self.planes,
            buffer: &mut self.buffer,
        }
    }
}

impl<T: Clone> Texture<T> {
    pub fn from_slice(width: u32, height: u32, planes: u32, slice: &[T]) -> Self {
        assert_eq!(
            slice.len(),
            (width * height * planes) as usize,
            "buffers don't match sizes"
        );
        Texture {
            width,
            height,
            planes,
            buffer: slice.to_owned(),
        }
    }
}

impl<T: Default + Copy> Texture<T> {
    pub fn new(width: u32, height: u32, planes: u32) -> Self {
        Self {
            width,
            height,
            planes,
            buffer: vec![T::default(); (width * height * planes) as usize],
        }
    }

    pub fn with_shape(shape: Shape) -> Self {
        Self::new(shape.0 as u32, shape.1 as u32, shape.2 as u32)
    }
}

impl<T: Copy> Texture<T> {
    /// # Panics
    /// This function will panic if the two slices have different lengths.
    pub fn copy_from_slice(&mut self, slice: &[T]) {
        self.buffer.copy_from_slice(slice);
    }

    /// Extract one plane of an interleaved texture as a
    /// standalone single-plane texture.
    ///
    /// # Panics
    /// This function will panic if `plane` is out of range.
    pub fn extract_plane(&self, plane: u32) -> Texture<T> {
        assert!(plane < self.planes, "plane index out of range");
        let planes = self.planes as usize;
        // SAFETY: every sample is written by the iterator below
        let mut out = unsafe { Texture::new_uninitialized(self.width, self.height, 1) };
        self.buffer
            .iter()
            .skip(plane as usize)
            .step_by(planes)
            .zip(out.buffer.iter_mut())
            .for_each(|(src, dst)| *dst = *src);
        out
    }

    /// Interleave single-plane textures of identical dimensions
    /// back into one multi-plane texture.
    ///
    /// # Panics
    /// This function will panic if `planes` is empty or the shapes disagree.
    pub fn from_planes(planes: &[Texture<T>]) -> Texture<T> {
        let first = planes.first().expect("at least one plane required");
        assert!(
            planes.iter().all(|p| p.planes == 1
                && p.width == first.width
                && p.height == first.height),
            "planes don't match shapes"
        );

        let n = planes.len();
        // SAFETY: every sample is written by the loop below
        let mut out =
            unsafe { Texture::new_uninitialized(first.width, first.height, n as u32) };
        for (plane_idx, plane) in planes.iter().enumerate() {
            for (pixel_idx, sample) in plane.buffer.iter().enumerate() {
                out.buffer[pixel_idx * n + plane_idx] = *sample;
            }
        }
        out
    }
}

/// Texture with borrowed internal buffer
#[derive(Debug, Copy, Clone)]
pub struct TextureSlice<'a, T> {
    width: u32,
    height: u32,
    planes: u32,
    buffer: &'a [T],
}

impl<T> AsRef<[T]> for TextureSlice<'_, T> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        self.buffer
    }
}

impl<T> TextureRef for TextureSlice<'_, T> {
    type Inner = T;

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn planes(&self) -> u32 {
        self.planes
    }
}

impl<'a, T> TextureSlice<'a, T> {
    pub fn new(width: u32, height: u32, planes: u32, buffer: &'a [T]) -> Self {
        Self {
            width,
            height,
            planes,
            buffer,
        }
    }
}

#[derive(Debug)]
pub struct TextureMutSlice<'a, T> {
    width: u32,
    height: u32,
    planes: u32,
    buffer: &'a mut [T],
}

impl<'a, T> AsRef<[T]> for TextureMutSlice<'a, T> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        self.buffer
    }
}

impl<'a, T> AsMut<[T]> for TextureMutSlice<'a, T> {
    #[inline]
    fn as_mut(&mut self) -> &mut [T] {
        self.buffer
    }
}

impl<T> TextureRef for TextureMutSlice<'_, T> {
    type Inner = T;

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn planes(&self) -> u32 {
        self.planes
    }
}

impl<T> TextureMut for TextureMutSlice<'_, T> {}

impl<'a, T> TextureMutSlice<'a, T> {
    pub fn new(width: u32, height: u32, planes: u32, buffer: &'a mut [T]) -> Self {
        Self {
            width,
            height,
            planes,
            buffer,
        }
    }
}

pub mod prelude {
    pub use super::{Texture, TextureMut, TextureMutSlice, TextureRef, TextureSlice};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_and_merge_planes_roundtrip() {
        let interleaved: Vec<u8> = vec![
            1, 2, 3, //
            4, 5, 6, //
            7, 8, 9, //
            10, 11, 12,
        ];
        let rgb = Texture::from_slice(2, 2, 3, &interleaved);

        let r = rgb.extract_plane(0);
        let g = rgb.extract_plane(1);
        let b = rgb.extract_plane(2);

        assert_eq!(r.as_ref(), &[1, 4, 7, 10]);
        assert_eq!(g.as_ref(), &[2, 5, 8, 11]);
        assert_eq!(b.as_ref(), &[3, 6, 9, 12]);

        let merged = Texture::from_planes(&[r, g, b]);
        assert_eq!(merged.shape(), (2, 2, 3));
        assert_eq!(merged.as_ref(), interleaved.as_slice());
    }
}
