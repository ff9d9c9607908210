//! Image preprocessing: raw JPEG bytes into the model input tensor.

use image::imageops::FilterType;
use image::ImageFormat;
use ndarray::Array4;

use crate::error::PredictError;

/// Model input edge length in pixels.
pub const IMAGE_SIZE: u32 = 224;

/// Decode JPEG bytes into a `[1, 224, 224, 3]` f32 tensor.
///
/// Pixels are resized with nearest-neighbor interpolation and cast to float
/// without normalization; channel values stay in 0–255.
pub fn decode_to_tensor(bytes: &[u8]) -> Result<Array4<f32>, PredictError> {
    let img = image::load_from_memory_with_format(bytes, ImageFormat::Jpeg)?;
    let resized = image::imageops::resize(
        &img.to_rgb8(),
        IMAGE_SIZE,
        IMAGE_SIZE,
        FilterType::Nearest,
    );

    let size = IMAGE_SIZE as usize;
    let mut tensor = Array4::zeros((1, size, size, 3));
    for y in 0..IMAGE_SIZE {
        for x in 0..IMAGE_SIZE {
            let pixel = resized.get_pixel(x, y);
            for c in 0..3 {
                tensor[[0, y as usize, x as usize, c]] = pixel[c] as f32;
            }
        }
    }

    Ok(tensor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageOutputFormat, Rgb, RgbImage};
    use std::io::Cursor;

    fn encoded(format: ImageOutputFormat) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(32, 48, Rgb([120, 30, 200])));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, format).unwrap();
        buf.into_inner()
    }

    #[test]
    fn valid_jpeg_produces_batched_tensor() {
        let tensor = decode_to_tensor(&encoded(ImageOutputFormat::Jpeg(90))).unwrap();
        assert_eq!(tensor.shape(), &[1, 224, 224, 3]);
    }

    #[test]
    fn pixel_values_stay_in_byte_range() {
        let tensor = decode_to_tensor(&encoded(ImageOutputFormat::Jpeg(90))).unwrap();
        assert!(tensor.iter().all(|&v| (0.0..=255.0).contains(&v)));
    }

    #[test]
    fn garbage_bytes_fail_with_decode_error() {
        let err = decode_to_tensor(b"definitely not a jpeg").unwrap_err();
        assert!(matches!(err, PredictError::Decode(_)));
    }

    #[test]
    fn non_jpeg_image_data_is_rejected() {
        let err = decode_to_tensor(&encoded(ImageOutputFormat::Png)).unwrap_err();
        assert!(matches!(err, PredictError::Decode(_)));
    }
}
