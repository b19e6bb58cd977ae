use crate::{
    error::{HalftonerError, Result},
    texture::{Texture, TextureRef},
};
use image::{DynamicImage, ImageBuffer, ImageFormat, ImageReader};
use std::{fs::File, path::Path};

pub fn read_image<P: AsRef<Path>>(path: P) -> Result<DynamicImage> {
    Ok(ImageReader::open(path)?.decode()?)
}

pub fn write_image<P: AsRef<Path>>(
    image: &DynamicImage,
    path: P,
    image_format: ImageFormat,
) -> Result {
    image.write_to(&mut File::create(path)?, image_format)?;
    Ok(())
}

/// Decode into an interleaved 3-plane RGB8 texture.
pub fn dynimg_to_texture(image: &DynamicImage) -> Texture<u8> {
    let rgb = image.to_rgb8();
    Texture::from_slice(rgb.width(), rgb.height(), 3, rgb.as_raw())
}

/// Wrap a 1-plane (luma) or 3-plane (RGB) texture back into a
/// [DynamicImage] for encoding or display.
pub fn texture_to_dynimg(texture: &Texture<u8>) -> Result<DynamicImage> {
    let (width, height) = (texture.width(), texture.height());
    let raw = texture.as_ref().to_vec();
    match texture.planes() {
        1 => Ok(DynamicImage::ImageLuma8(
            ImageBuffer::from_raw(width, height, raw).expect("texture buffer matches its shape"),
        )),
        3 => Ok(DynamicImage::ImageRgb8(
            ImageBuffer::from_raw(width, height, raw).expect("texture buffer matches its shape"),
        )),
        planes => Err(HalftonerError::InvalidParameter(format!(
            "cannot encode a {}-plane texture",
            planes
        ))),
    }
}
