//! Fixed size, row-major grids of pixels and of color keys

use crate::ValidationError;
use palette::Srgb;
use std::fmt::{self, Display};

/// The canonical identifier of an sRGB color
///
/// Joins the palette, the [`PatternGrid`] cells, and the [`Legend`](crate::Legend).
/// Two keys are equal exactly when their colors have identical channels.
/// Displayed as `rgb(r,g,b)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColorKey([u8; 3]);

impl ColorKey {
	/// The red, green, and blue channels of this key
	#[must_use]
	pub const fn channels(self) -> [u8; 3] {
		self.0
	}

	/// The color this key identifies
	#[must_use]
	pub const fn color(self) -> Srgb<u8> {
		let [r, g, b] = self.0;
		Srgb::new(r, g, b)
	}
}

impl From<Srgb<u8>> for ColorKey {
	fn from(color: Srgb<u8>) -> Self {
		Self([color.red, color.green, color.blue])
	}
}

impl Display for ColorKey {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		let [r, g, b] = self.0;
		write!(f, "rgb({r},{g},{b})")
	}
}

/// The pixels of an image resampled to the dimensions of a bead pattern
#[derive(Debug, Clone, PartialEq)]
pub struct PixelGrid {
	/// Number of columns
	width: u32,
	/// Number of rows
	height: u32,
	/// Row-major pixels, `width * height` in total
	pixels: Vec<Srgb<u8>>,
}

impl PixelGrid {
	/// Create a grid from row-major pixels.
	///
	/// # Errors
	/// Returns [`ValidationError::EmptyImage`] if the grid would have no cells,
	/// or if the number of pixels does not match the dimensions.
	pub fn new(width: u32, height: u32, pixels: Vec<Srgb<u8>>) -> Result<Self, ValidationError> {
		crate::error::check_dimensions(width, height)?;
		if pixels.len() as u64 == u64::from(width) * u64::from(height) {
			Ok(Self { width, height, pixels })
		} else {
			Err(ValidationError::EmptyImage { width, height })
		}
	}

	/// Number of columns
	#[must_use]
	pub const fn width(&self) -> u32 {
		self.width
	}

	/// Number of rows
	#[must_use]
	pub const fn height(&self) -> u32 {
		self.height
	}

	/// All pixels in row-major order
	#[must_use]
	pub fn pixels(&self) -> &[Srgb<u8>] {
		&self.pixels
	}

	/// The pixel at column `x` and row `y`, if in bounds
	#[must_use]
	pub fn get(&self, x: u32, y: u32) -> Option<Srgb<u8>> {
		index(self.width, self.height, x, y).map(|i| self.pixels[i])
	}
}

/// A bead pattern: the [`ColorKey`] of the chosen palette color for each grid cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternGrid {
	/// Number of columns
	width: u32,
	/// Number of rows
	height: u32,
	/// Row-major cells, `width * height` in total
	cells: Vec<ColorKey>,
}

impl PatternGrid {
	/// Assemble a grid whose cells were computed for a grid with the given dimensions
	pub(crate) fn from_cells(width: u32, height: u32, cells: Vec<ColorKey>) -> Self {
		debug_assert_eq!(cells.len() as u64, u64::from(width) * u64::from(height));
		Self { width, height, cells }
	}

	/// Number of columns (beads per row)
	#[must_use]
	pub const fn width(&self) -> u32 {
		self.width
	}

	/// Number of rows
	#[must_use]
	pub const fn height(&self) -> u32 {
		self.height
	}

	/// All cells in row-major order
	#[must_use]
	pub fn cells(&self) -> &[ColorKey] {
		&self.cells
	}

	/// The cell at column `x` and row `y`, if in bounds
	#[must_use]
	pub fn get(&self, x: u32, y: u32) -> Option<ColorKey> {
		index(self.width, self.height, x, y).map(|i| self.cells[i])
	}

	/// Iterate over each row of cells, top to bottom
	pub fn rows(&self) -> impl ExactSizeIterator<Item = &[ColorKey]> + '_ {
		self.cells.chunks_exact(self.width as usize)
	}
}

/// Row-major index of (`x`, `y`) or `None` if out of bounds
fn index(width: u32, height: u32, x: u32, y: u32) -> Option<usize> {
	if x < width && y < height {
		Some(y as usize * width as usize + x as usize)
	} else {
		None
	}
}
