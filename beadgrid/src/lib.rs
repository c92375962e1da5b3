//! Turn an image into a bead weaving pattern.
//!
//! The image is downsampled to a grid one bead wide per column,
//! its colors are reduced to a small palette with k-means clustering in RGB space,
//! and every cell of the grid is mapped to its nearest palette color.
//! Each palette color is labeled with a letter for the pattern legend.
//!
//! # Examples
//!
//! ## Generate a pattern 30 beads wide with 6 colors.
//!
//! ```no_run
//! let image = image::open("some image").unwrap().into_rgba8();
//! let pattern = beadgrid::generate(&image, 30, 6, beadgrid::DEFAULT_MAX_ITER, Some(0)).unwrap();
//!
//! for row in pattern.grid.rows() {
//!     let labels = row.iter().filter_map(|&key| pattern.legend.get(key)).collect::<String>();
//!     println!("{labels}");
//! }
//! ```
//!
//! ## Run each step separately.
//!
//! ```no_run
//! let image = image::open("some image").unwrap().into_rgba8();
//! let grid = beadgrid::sample(&image, 30).unwrap();
//!
//! let kmeans = beadgrid::quantize(&grid, 6, 20, Some(42)).unwrap();
//! let pattern = beadgrid::map_pattern(&grid, &kmeans.centroids);
//! let legend = beadgrid::build_legend(&kmeans.centroids);
//! ```
//!
//! # Arguments
//!
//! ## Bead Count
//!
//! The number of beads in each row of the pattern, which must be at least 1.
//! The number of rows follows from the aspect ratio of the image.
//!
//! ## Color Count
//!
//! The number of palette colors to find, from 1 to 26 so that each color gets its own letter.
//!
//! k-means may place two centroids on the same color or leave a centroid with no pixels.
//! Neither is an error: the palette still has `color_count` entries,
//! but the legend and the pattern may then use fewer distinct colors.
//!
//! ## Max Iterations
//!
//! k-means stops once no centroid changes between iterations or after this many iterations.
//! [`DEFAULT_MAX_ITER`] is usually enough for the small grids of a bead pattern.
//!
//! ## Seed
//!
//! The value used to seed the random number generator which chooses the starting centroids.
//! The same image and arguments with the same seed always give the same pattern.
//! With `None`, the generator is seeded from OS entropy.

#![deny(unsafe_code)]
#![warn(clippy::pedantic, clippy::cargo)]
#![warn(clippy::use_debug, clippy::dbg_macro, clippy::todo, clippy::unimplemented)]
#![warn(clippy::unwrap_used, clippy::unwrap_in_result)]
#![warn(clippy::unneeded_field_pattern, clippy::rest_pat_in_fully_bound_structs)]
#![warn(clippy::unnecessary_self_imports)]
#![warn(clippy::str_to_string, clippy::string_to_string, clippy::string_slice)]
#![warn(missing_docs, clippy::missing_docs_in_private_items, rustdoc::all)]
#![allow(clippy::module_name_repetitions)]

use image::RgbaImage;

mod error;
mod generator;
mod grid;
mod kmeans;
mod legend;
mod pattern;
mod sample;

pub use error::ValidationError;
pub use generator::{Generator, Ticket};
pub use grid::{ColorKey, PatternGrid, PixelGrid};
pub use kmeans::{quantize, quantize_with_rng, KmeansResult};
pub use legend::{build_legend, label, Legend};
pub use pattern::{map_pattern, nearest, squared_distance};
pub use sample::{sample, sample_height};

/// The maximum number of palette colors, one for each letter of the alphabet
pub const MAX_COLORS: u8 = 26;

/// The default maximum number of k-means iterations
pub const DEFAULT_MAX_ITER: u32 = 20;

/// A generated bead pattern
#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
	/// The palette color for each bead
	pub grid: PatternGrid,
	/// The label for each palette color
	pub legend: Legend,
	/// The k-means result the pattern was mapped from
	///
	/// `kmeans.centroids` is the palette.
	pub kmeans: KmeansResult,
}

impl Pattern {
	/// Map `grid` onto the palette from `kmeans` and label the palette
	fn assemble(grid: &PixelGrid, kmeans: KmeansResult) -> Self {
		Self {
			grid: map_pattern(grid, &kmeans.centroids),
			legend: build_legend(&kmeans.centroids),
			kmeans,
		}
	}

	/// The palette colors, in k-means initialization order
	#[must_use]
	pub fn palette(&self) -> &[palette::Srgb<u8>] {
		&self.kmeans.centroids
	}

	/// The number of beads of each legend color, in legend order
	#[must_use]
	pub fn bead_counts(&self) -> Vec<usize> {
		let mut counts = vec![0; self.legend.len()];
		for key in self.grid.cells() {
			if let Some(i) = self.legend.iter().position(|(k, _)| k == *key) {
				counts[i] += 1;
			}
		}
		counts
	}
}

/// Check all generation arguments before doing any work
fn validate(image: &RgbaImage, bead_count: u32, color_count: u8) -> Result<(), ValidationError> {
	error::check_bead_count(bead_count)?;
	error::check_color_count(color_count)?;
	error::check_dimensions(image.width(), image.height())
}

/// Generate a bead pattern `bead_count` beads wide using `color_count` colors.
///
/// See the crate documentation for examples and information on each argument.
///
/// # Errors
/// Returns a [`ValidationError`] before doing any work if `bead_count` is zero,
/// `color_count` is not in `1..=26`, or `image` has no pixels.
pub fn generate(
	image: &RgbaImage,
	bead_count: u32,
	color_count: u8,
	max_iter: u32,
	seed: Option<u64>,
) -> Result<Pattern, ValidationError> {
	validate(image, bead_count, color_count)?;
	let grid = sample(image, bead_count)?;
	let kmeans = quantize(&grid, color_count, max_iter, seed)?;
	Ok(Pattern::assemble(&grid, kmeans))
}
