use image::{DynamicImage, imageops::FilterType};

use crate::{
    binarize::BinarizeTransform,
    config::ProcessConfig,
    dithering::HalftoneTransform,
    texture::{Texture, TextureRef},
    transform::prelude::*,
};

pub mod binarize;
pub mod config;
pub mod dithering;
pub mod error;
pub mod texture;
pub mod transform;
pub mod utils;


pub mod prelude {
    pub use crate::binarize::BinarizeTransform;
    pub use crate::dithering::{HalftoneMode, HalftoneTransform, halftone_rgb, quantize_channel};
    pub use crate::texture::prelude::*;
    pub use crate::transform::prelude::*;
}

/// End-to-end pipeline: decode -> per-channel halftone -> optional
/// binarize -> encode-ready image.
pub fn run(config: &ProcessConfig, original_img: DynamicImage) -> error::Result<DynamicImage> {
    let input = utils::image::dynimg_to_texture(&original_img);
    dithering::check_nonzero_shape(&input)?;

    let mut output = Texture::new(input.width(), input.height(), input.planes());
    let halftone = HalftoneTransform::new(config.mode)?;

    if config.binarize {
        halftone
            .pipe_with_shape(BinarizeTransform, input.shape())
            .once(input.as_texture_slice(), output.as_texture_mut_slice());
    } else {
        halftone.once(input.as_texture_slice(), output.as_texture_mut_slice());
    }

    let new_image = utils::image::texture_to_dynimg(&output)?;
    if config.output_scale > 1 {
        return Ok(new_image.resize(
            output.width() * config.output_scale,
            output.height() * config.output_scale,
            FilterType::Nearest,
        ));
    }
    Ok(new_image)
}
