pub(crate) mod buffer;
pub mod image;
pub(crate) mod num;
pub(crate) mod transform;
