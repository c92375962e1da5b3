//! Specifies the CLI and handles arg parsing

use clap::{Parser, ValueEnum};
use std::{
	fmt::{Debug, Display},
	num::ParseIntError,
	ops::RangeBounds,
	path::PathBuf,
	str::FromStr,
};

/// Bead weaving stitches, which determine how rows line up
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Style {
	/// Odd rows are offset by half a bead
	Peyote,
	/// Beads line up in columns
	Loom,
}

impl Style {
	/// The horizontal offset of `row`, as a fraction of a bead
	#[must_use]
	pub fn row_offset(self, row: u32) -> f32 {
		match self {
			Style::Peyote if row % 2 == 1 => 0.5,
			Style::Peyote | Style::Loom => 0.0,
		}
	}
}

/// Generate a bead weaving pattern from an image.
///
/// The image is reduced to a grid with the given number of beads per row,
/// and its colors are reduced to a small palette using k-means clustering.
/// Each palette color is labeled with a letter in the printed pattern and legend.
#[allow(clippy::struct_excessive_bools)]
#[derive(Parser)]
#[command(version)]
pub struct Options {
	/// The path to the input image
	pub image: PathBuf,

	/// The number of beads in each row
	///
	/// The number of rows is chosen to keep the aspect ratio of the image.
	#[arg(short, long, default_value_t = 10, value_parser = parse_valid_bead_count)]
	pub beads: u32,

	/// The number of colors to use
	///
	/// Each color is labeled with a letter, so at most 26 colors are supported.
	/// k-means may end up giving two colors the same value,
	/// in which case the pattern uses fewer colors.
	#[arg(short = 'k', long, default_value_t = 5, value_parser = parse_valid_color_count)]
	pub colors: u8,

	/// The maximum number of k-means iterations
	///
	/// k-means stops early once the colors stop changing.
	/// You can use the --verbose option to see how many iterations were needed.
	#[arg(short = 'i', long, default_value_t = beadgrid::DEFAULT_MAX_ITER)]
	pub max_iter: u32,

	/// The seed value used for the random number generator
	///
	/// If not provided, a random seed is used, and each run may give a different palette.
	#[arg(long)]
	pub seed: Option<u64>,

	/// The stitch style to lay out the pattern in
	#[arg(short, long, default_value = "peyote")]
	pub style: Style,

	/// Save the pattern and its legend as a PNG image to this path
	#[arg(short, long)]
	pub output: Option<PathBuf>,

	/// The size of each bead in pixels in the PNG image
	#[arg(long, default_value_t = 20, value_parser = parse_valid_bead_size)]
	pub bead_size: u32,

	/// Do not print the pattern grid, only the legend
	#[arg(long)]
	pub no_grid: bool,

	/// Do not color the printed pattern and legend
	#[arg(long)]
	pub no_color: bool,

	/// The number of threads to use
	///
	/// A value of 0 uses the number of available CPUs.
	#[cfg(feature = "threads")]
	#[arg(short, long, default_value_t = 0)]
	pub threads: u8,

	/// Print additional information, such as the number of k-means iterations and how long each step took
	#[arg(long)]
	pub verbose: bool,
}

/// Parse an integer value and ensure it in the provided, valid range
fn parse_int_in_range<T>(s: &str, range: impl RangeBounds<T> + Debug) -> Result<T, String>
where
	T: FromStr<Err = ParseIntError> + Display + PartialOrd,
{
	let value: T = s.parse().map_err(|e| format!("{e}"))?;
	if range.contains(&value) {
		Ok(value)
	} else {
		Err(format!("{value} is not in {range:?}"))
	}
}

/// Parse the bead count and ensure it is >= 1
fn parse_valid_bead_count(s: &str) -> Result<u32, String> {
	parse_int_in_range(s, 1..)
}

/// Parse the color count and ensure it is in `1..=26`
fn parse_valid_color_count(s: &str) -> Result<u8, String> {
	parse_int_in_range(s, 1..=beadgrid::MAX_COLORS)
}

/// Parse the bead size and ensure beads are big enough to draw outlines on
fn parse_valid_bead_size(s: &str) -> Result<u32, String> {
	parse_int_in_range(s, 4..=1024)
}
