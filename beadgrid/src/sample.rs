//! Downsamples an image to the dimensions of a bead pattern

use crate::{
	error::{check_bead_count, check_dimensions},
	PixelGrid, ValidationError,
};
use image::{imageops, RgbaImage};
use palette::Srgba;

/// The filter used when resizing the image to the pattern grid
const FILTER: imageops::FilterType = imageops::FilterType::Triangle;

/// The number of rows for a pattern `width` beads wide that keeps the aspect ratio of the source image.
///
/// This is `round(width * source_height / source_width)` with halves rounded up, but at least 1.
/// `source_width` must not be zero.
#[must_use]
pub fn sample_height(width: u32, source_width: u32, source_height: u32) -> u32 {
	debug_assert!(source_width > 0);
	let numerator = 2 * u64::from(width) * u64::from(source_height) + u64::from(source_width);
	let height = numerator / (2 * u64::from(source_width));

	// min with u32::MAX makes the cast lossless
	#[allow(clippy::cast_possible_truncation)]
	{
		height.clamp(1, u64::from(u32::MAX)) as u32
	}
}

/// Resample `image` into a [`PixelGrid`] `width` beads wide, dropping the alpha channel.
///
/// # Errors
/// Returns [`ValidationError::InvalidBeadCount`] if `width` is zero
/// or [`ValidationError::EmptyImage`] if `image` has no pixels.
pub fn sample(image: &RgbaImage, width: u32) -> Result<PixelGrid, ValidationError> {
	check_bead_count(width)?;
	check_dimensions(image.width(), image.height())?;

	let height = sample_height(width, image.width(), image.height());
	log::trace!(
		"sampling {}x{} image to {width}x{height}",
		image.width(),
		image.height()
	);

	let resized = imageops::resize(image, width, height, FILTER);
	let pixels = palette::cast::from_component_slice::<Srgba<u8>>(resized.as_raw())
		.iter()
		.map(|srgba| srgba.color)
		.collect();

	PixelGrid::new(width, height, pixels)
}

#[cfg(test)]
mod tests {
	use super::*;
	use image::Rgba;
	use palette::Srgb;

	#[test]
	fn height_keeps_aspect_ratio() {
		assert_eq!(sample_height(10, 100, 100), 10);
		assert_eq!(sample_height(10, 200, 100), 5);
		assert_eq!(sample_height(4, 3, 4), 5); // 5.33
		assert_eq!(sample_height(3, 2, 3), 5); // 4.5 rounds up
		assert_eq!(sample_height(3, 4, 3), 2); // 2.25
	}

	#[test]
	fn height_is_at_least_one() {
		assert_eq!(sample_height(1, 100, 50), 1);
		assert_eq!(sample_height(1, 1000, 1), 1);
	}

	#[test]
	fn single_bead_from_wide_image() {
		let image = RgbaImage::from_pixel(100, 50, Rgba([10, 20, 30, 255]));
		let grid = sample(&image, 1).expect("valid image");

		assert_eq!((grid.width(), grid.height()), (1, 1));
		assert_eq!(grid.pixels(), &[Srgb::new(10, 20, 30)]);
	}

	#[test]
	fn alpha_is_ignored() {
		let image = RgbaImage::from_pixel(8, 8, Rgba([200, 100, 50, 0]));
		let grid = sample(&image, 4).expect("valid image");

		assert_eq!((grid.width(), grid.height()), (4, 4));
		assert!(grid.pixels().iter().all(|&p| p == Srgb::new(200, 100, 50)));
	}

	#[test]
	fn same_size_is_unchanged() {
		let image = RgbaImage::from_fn(3, 2, |x, y| {
			#[allow(clippy::cast_possible_truncation)]
			let v = (y * 3 + x) as u8 * 40;
			Rgba([v, v, v, 255])
		});
		let grid = sample(&image, 3).expect("valid image");

		let expected = (0..6).map(|v| Srgb::new(v * 40, v * 40, v * 40)).collect::<Vec<_>>();
		assert_eq!(grid.pixels(), expected.as_slice());
	}

	#[test]
	fn invalid_inputs() {
		let image = RgbaImage::new(4, 4);
		assert_eq!(sample(&image, 0), Err(ValidationError::InvalidBeadCount(0)));

		let empty = RgbaImage::new(0, 4);
		assert_eq!(
			sample(&empty, 2),
			Err(ValidationError::EmptyImage { width: 0, height: 4 })
		);
	}
}
