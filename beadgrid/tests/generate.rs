use beadgrid::{ColorKey, PixelGrid, ValidationError};
use image::{Rgba, RgbaImage};
use palette::Srgb;
use rand::RngCore;
use std::collections::HashSet;

/// Yields the given values, then zeros. One value is used per color channel.
struct Sequence(std::vec::IntoIter<u32>);

impl RngCore for Sequence {
	fn next_u32(&mut self) -> u32 {
		self.0.next().unwrap_or(0)
	}

	fn next_u64(&mut self) -> u64 {
		u64::from(self.next_u32())
	}

	fn fill_bytes(&mut self, dest: &mut [u8]) {
		dest.fill(0);
	}

	fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
		self.fill_bytes(dest);
		Ok(())
	}
}

fn photo(width: u32, height: u32) -> RgbaImage {
	RgbaImage::from_fn(width, height, |x, y| {
		#[allow(clippy::cast_possible_truncation)]
		Rgba([
			(x * 255 / width) as u8,
			(y * 255 / height) as u8,
			((x + y) * 7 % 256) as u8,
			255,
		])
	})
}

#[test]
fn black_and_white_checker() {
	let black = Srgb::new(0, 0, 0);
	let white = Srgb::new(255, 255, 255);
	let grid = PixelGrid::new(2, 2, vec![black, white, black, white]).expect("valid grid");
	let mut rng = Sequence(vec![60, 40, 50, 170, 180, 190].into_iter());

	let kmeans = beadgrid::quantize_with_rng(&grid, 2, 20, &mut rng).expect("valid k");
	assert_eq!(kmeans.centroids, vec![black, white]);

	let pattern = beadgrid::map_pattern(&grid, &kmeans.centroids);
	let (b, w) = (ColorKey::from(black), ColorKey::from(white));
	assert_eq!(pattern.cells(), &[b, w, b, w]);
}

#[test]
fn one_color_is_the_mean() {
	let image = photo(40, 30);
	let grid = beadgrid::sample(&image, 8).expect("valid image");

	let n = grid.pixels().len() as u64;
	let mut sum = [0u64; 3];
	for p in grid.pixels() {
		sum[0] += u64::from(p.red);
		sum[1] += u64::from(p.green);
		sum[2] += u64::from(p.blue);
	}
	#[allow(clippy::cast_possible_truncation)]
	let mean = sum.map(|s| ((2 * s + n) / (2 * n)) as u8);

	let pattern = beadgrid::generate(&image, 8, 1, 20, Some(9)).expect("valid arguments");

	assert_eq!(pattern.palette(), &[Srgb::new(mean[0], mean[1], mean[2])]);
	let key = ColorKey::from(pattern.palette()[0]);
	assert!(pattern.grid.cells().iter().all(|&cell| cell == key));
	assert_eq!(pattern.legend.get(key), Some('A'));
}

#[test]
fn single_bead_grid() {
	let pattern = beadgrid::generate(&photo(100, 50), 1, 3, 20, Some(0)).expect("valid arguments");
	assert_eq!((pattern.grid.width(), pattern.grid.height()), (1, 1));
}

#[test]
fn invalid_color_counts() {
	let image = photo(10, 10);
	for count in [0, 27, u8::MAX] {
		assert_eq!(
			beadgrid::generate(&image, 5, count, 20, Some(0)),
			Err(ValidationError::InvalidColorCount(count))
		);
	}
}

#[test]
fn pattern_dimensions_follow_aspect_ratio() {
	for (width, height) in [(64, 48), (48, 64), (100, 50), (33, 97), (7, 3)] {
		let image = photo(width, height);
		for beads in [1, 2, 5, 16, 40] {
			let pattern = beadgrid::generate(&image, beads, 4, 20, Some(1)).expect("valid arguments");
			let rows = (f64::from(beads) * f64::from(height) / f64::from(width)).round().max(1.0);
			assert_eq!(pattern.grid.width(), beads);
			assert_eq!(f64::from(pattern.grid.height()), rows);
		}
	}
}

#[test]
fn every_bead_uses_the_nearest_palette_color() {
	let image = photo(120, 80);
	let grid = beadgrid::sample(&image, 24).expect("valid image");
	let pattern = beadgrid::generate(&image, 24, 7, 20, Some(11)).expect("valid arguments");
	let palette = pattern.palette();

	for (&pixel, &key) in grid.pixels().iter().zip(pattern.grid.cells()) {
		let dist = beadgrid::squared_distance(pixel, key.color());
		assert!(palette.iter().any(|&c| ColorKey::from(c) == key));
		assert!(palette.iter().all(|&c| dist <= beadgrid::squared_distance(pixel, c)));
	}
}

#[test]
fn legend_has_one_entry_per_distinct_color() {
	let image = photo(60, 60);
	for k in [1, 3, 8, 26] {
		let pattern = beadgrid::generate(&image, 20, k, 20, Some(u64::from(k))).expect("valid arguments");
		let distinct = pattern.palette().iter().map(|&c| ColorKey::from(c)).collect::<HashSet<_>>();

		assert_eq!(pattern.palette().len(), usize::from(k));
		assert!(pattern.legend.len() <= usize::from(k));
		assert_eq!(pattern.legend.len(), distinct.len());
		assert!(pattern.grid.cells().iter().all(|&cell| pattern.legend.get(cell).is_some()));
	}
}

#[test]
fn same_seed_same_pattern() {
	let image = photo(50, 40);
	let first = beadgrid::generate(&image, 15, 6, 20, Some(123)).expect("valid arguments");
	let second = beadgrid::generate(&image, 15, 6, 20, Some(123)).expect("valid arguments");
	assert_eq!(first, second);
}
