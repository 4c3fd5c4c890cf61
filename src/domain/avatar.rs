//! Avatar image normalisation.
//!
//! The flow accepts whatever the client captured and always uploads a
//! fixed-size JPEG, so the storage collaborator never sees arbitrary
//! dimensions or formats.

use std::io::Cursor;

use image::imageops::FilterType;
use image::ImageOutputFormat;
use thiserror::Error;

/// Width and height of every stored avatar, in pixels.
pub const AVATAR_DIMENSION: u32 = 300;

/// JPEG quality used when encoding the normalised avatar.
const AVATAR_JPEG_QUALITY: u8 = 80;

/// Errors raised while normalising a submitted image.
#[derive(Debug, Error)]
pub enum AvatarError {
    /// Submitted bytes were empty.
    #[error("profile picture must not be empty")]
    Empty,
    /// Submitted bytes are not a decodable image.
    #[error("profile picture could not be decoded: {0}")]
    Decode(#[source] image::ImageError),
    /// The normalised image could not be encoded as JPEG.
    #[error("profile picture could not be encoded: {0}")]
    Encode(#[source] image::ImageError),
}

/// A normalised 300×300 JPEG ready for upload.
///
/// ## Invariants
/// - Always exactly [`AVATAR_DIMENSION`] square, regardless of the input
///   image's dimensions or format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarJpeg(Vec<u8>);

impl AvatarJpeg {
    /// Decode the submitted image, resample it to exactly
    /// [`AVATAR_DIMENSION`]×[`AVATAR_DIMENSION`], and encode it as JPEG.
    pub fn normalize(raw: &[u8]) -> Result<Self, AvatarError> {
        if raw.is_empty() {
            return Err(AvatarError::Empty);
        }
        let decoded = image::load_from_memory(raw).map_err(AvatarError::Decode)?;
        let resized = decoded.resize_exact(AVATAR_DIMENSION, AVATAR_DIMENSION, FilterType::Triangle);
        let mut encoded = Vec::new();
        resized
            .write_to(
                &mut Cursor::new(&mut encoded),
                ImageOutputFormat::Jpeg(AVATAR_JPEG_QUALITY),
            )
            .map_err(AvatarError::Encode)?;
        Ok(Self(encoded))
    }

    /// Borrow the encoded JPEG bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_slice()
    }

    /// Consume the avatar and take the encoded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, GenericImageView, RgbImage};
    use rstest::rstest;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(
            width,
            height,
            image::Rgb([120, 40, 200]),
        ));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)
            .expect("encode test image");
        bytes
    }

    #[rstest]
    #[case(1, 1)]
    #[case(640, 480)]
    #[case(300, 300)]
    #[case(17, 953)]
    fn normalises_any_input_to_fixed_square(#[case] width: u32, #[case] height: u32) {
        let avatar = AvatarJpeg::normalize(&png_bytes(width, height)).expect("normalise");
        let decoded = image::load_from_memory(avatar.as_bytes()).expect("decode output");
        assert_eq!(decoded.dimensions(), (AVATAR_DIMENSION, AVATAR_DIMENSION));
    }

    #[test]
    fn output_is_jpeg() {
        let avatar = AvatarJpeg::normalize(&png_bytes(10, 10)).expect("normalise");
        let format = image::guess_format(avatar.as_bytes()).expect("recognisable format");
        assert_eq!(format, image::ImageFormat::Jpeg);
    }

    #[test]
    fn rejects_empty_input() {
        assert!(matches!(AvatarJpeg::normalize(&[]), Err(AvatarError::Empty)));
    }

    #[test]
    fn rejects_non_image_input() {
        let result = AvatarJpeg::normalize(b"definitely not an image");
        assert!(matches!(result, Err(AvatarError::Decode(_))));
    }
}
