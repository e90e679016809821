//! Conversion of decoded frames into normalized tensors.

use candle_core::{Device, Tensor};
use image::RgbImage;

/// Converts an RGB frame into an `f32` tensor of shape `(1, H, W, 3)`.
///
/// Channel values are scaled from `0..=255` to `[0, 1]`.
///
/// # Errors
///
/// Returns an error if tensor creation fails on `device`.
pub fn rgb_to_tensor(image: &RgbImage, device: &Device) -> candle_core::Result<Tensor> {
    let (width, height) = image.dimensions();
    let data: Vec<f32> = image.as_raw().iter().map(|&v| f32::from(v) / 255.0).collect();
    Tensor::from_vec(data, (1, height as usize, width as usize, 3), device)
}

/// Concatenates single-frame tensors along the batch dimension.
///
/// # Errors
///
/// Returns an error if `frames` is empty or the frames differ in size.
pub fn stack_frames(frames: &[Tensor]) -> candle_core::Result<Tensor> {
    Tensor::cat(frames, 0)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_rgb_to_tensor_shape_and_range() {
        let mut img = RgbImage::new(2, 1);
        img.put_pixel(0, 0, Rgb([0, 0, 0]));
        img.put_pixel(1, 0, Rgb([255, 51, 255]));

        let tensor = rgb_to_tensor(&img, &Device::Cpu).unwrap();
        assert_eq!(tensor.dims(), &[1, 1, 2, 3]);

        let values = tensor.flatten_all().unwrap().to_vec1::<f32>().unwrap();
        assert_eq!(values, vec![0.0, 0.0, 0.0, 1.0, 0.2, 1.0]);
    }

    #[test]
    fn test_stack_frames() {
        let a = rgb_to_tensor(&RgbImage::new(4, 3), &Device::Cpu).unwrap();
        let b = rgb_to_tensor(&RgbImage::new(4, 3), &Device::Cpu).unwrap();
        let batch = stack_frames(&[a, b]).unwrap();
        assert_eq!(batch.dims(), &[2, 3, 4, 3]);
    }

    #[test]
    fn test_stack_frames_rejects_mixed_sizes() {
        let a = rgb_to_tensor(&RgbImage::new(4, 3), &Device::Cpu).unwrap();
        let b = rgb_to_tensor(&RgbImage::new(3, 3), &Device::Cpu).unwrap();
        assert!(stack_frames(&[a, b]).is_err());
    }

    #[test]
    fn test_stack_frames_rejects_empty() {
        assert!(stack_frames(&[]).is_err());
    }
}
