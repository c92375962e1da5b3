//! Maps each pixel of a grid to its nearest palette color

use crate::{ColorKey, PatternGrid, PixelGrid};
use palette::Srgb;

/// Squared euclidean distance between two colors in RGB space
#[must_use]
pub fn squared_distance(x: Srgb<u8>, y: Srgb<u8>) -> u32 {
	let channel = |a: u8, b: u8| {
		let d = u32::from(a.abs_diff(b));
		d * d
	};
	channel(x.red, y.red) + channel(x.green, y.green) + channel(x.blue, y.blue)
}

/// Index of the palette color closest to `color`.
///
/// Ties go to the lowest index. `palette` must not be empty.
#[must_use]
pub fn nearest(color: Srgb<u8>, palette: &[Srgb<u8>]) -> usize {
	debug_assert!(!palette.is_empty());

	let mut min_dist = u32::MAX;
	let mut min_index = 0;
	for (i, &centroid) in palette.iter().enumerate() {
		let dist = squared_distance(color, centroid);
		if dist < min_dist {
			min_dist = dist;
			min_index = i;
		}
	}
	min_index
}

/// Classify every pixel of `grid`, producing a pattern of the palette's [`ColorKey`]s.
///
/// `palette` must not be empty.
#[must_use]
pub fn map_pattern(grid: &PixelGrid, palette: &[Srgb<u8>]) -> PatternGrid {
	let keys = palette.iter().copied().map(ColorKey::from).collect::<Vec<_>>();

	#[cfg(feature = "threads")]
	let cells = {
		use rayon::prelude::*;
		grid.pixels()
			.par_iter()
			.map(|&color| keys[nearest(color, palette)])
			.collect()
	};

	#[cfg(not(feature = "threads"))]
	let cells = grid
		.pixels()
		.iter()
		.map(|&color| keys[nearest(color, palette)])
		.collect();

	PatternGrid::from_cells(grid.width(), grid.height(), cells)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::kmeans::{quantize, tests::grid};

	#[test]
	fn distance_is_symmetric() {
		let x = Srgb::new(0, 100, 255);
		let y = Srgb::new(10, 90, 0);
		assert_eq!(squared_distance(x, y), 100 + 100 + 255 * 255);
		assert_eq!(squared_distance(x, y), squared_distance(y, x));
		assert_eq!(squared_distance(x, x), 0);
	}

	#[test]
	fn ties_go_to_the_lowest_index() {
		let palette = [Srgb::new(90, 90, 90), Srgb::new(110, 110, 110), Srgb::new(90, 90, 90)];
		assert_eq!(nearest(Srgb::new(100, 100, 100), &palette), 0);
		assert_eq!(nearest(Srgb::new(101, 100, 100), &palette), 1);
	}

	#[test]
	fn no_closer_palette_color_exists() {
		let pixels = (0..64u8)
			.map(|i| [i * 4, 255 - i * 3, i.wrapping_mul(37)])
			.collect::<Vec<_>>();
		let grid = grid(8, 8, &pixels);
		let palette = quantize(&grid, 5, 20, Some(3)).expect("valid k").centroids;

		let pattern = map_pattern(&grid, &palette);

		for (&pixel, &key) in grid.pixels().iter().zip(pattern.cells()) {
			assert!(palette.iter().any(|&c| ColorKey::from(c) == key));
			let dist = squared_distance(pixel, key.color());
			assert!(palette.iter().all(|&c| dist <= squared_distance(pixel, c)));
		}
	}

	#[test]
	fn same_dimensions_and_idempotent() {
		let grid = grid(3, 2, &[[0, 0, 0], [50, 50, 50], [100, 100, 100], [150, 150, 150], [200, 200, 200], [250, 250, 250]]);
		let palette = [Srgb::new(0, 0, 0), Srgb::new(255, 255, 255)];

		let first = map_pattern(&grid, &palette);
		let second = map_pattern(&grid, &palette);

		assert_eq!((first.width(), first.height()), (3, 2));
		assert_eq!(first, second);

		let black = ColorKey::from(palette[0]);
		let white = ColorKey::from(palette[1]);
		assert_eq!(first.cells(), &[black, black, black, white, white, white]);
	}
}
