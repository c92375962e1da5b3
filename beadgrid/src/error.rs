//! Errors returned when the inputs to a pattern generation are invalid

use thiserror::Error;

/// An invalid argument was provided, so no work was done
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
	/// The number of beads per row was zero
	#[error("bead count must be at least 1, got {0}")]
	InvalidBeadCount(u32),
	/// The number of colors was not in `1..=26`
	#[error("color count must be in 1..={}, got {0}", crate::MAX_COLORS)]
	InvalidColorCount(u8),
	/// The image (or the grid sampled from it) has no pixels
	#[error("image has no pixels ({width}x{height})")]
	EmptyImage {
		/// Width of the offending image or grid
		width: u32,
		/// Height of the offending image or grid
		height: u32,
	},
}

/// Ensure `bead_count` is at least 1
pub(crate) fn check_bead_count(bead_count: u32) -> Result<(), ValidationError> {
	if bead_count == 0 {
		Err(ValidationError::InvalidBeadCount(bead_count))
	} else {
		Ok(())
	}
}

/// Ensure `color_count` is in `1..=MAX_COLORS`
pub(crate) fn check_color_count(color_count: u8) -> Result<(), ValidationError> {
	if (1..=crate::MAX_COLORS).contains(&color_count) {
		Ok(())
	} else {
		Err(ValidationError::InvalidColorCount(color_count))
	}
}

/// Ensure a `width` x `height` image has at least one pixel
pub(crate) fn check_dimensions(width: u32, height: u32) -> Result<(), ValidationError> {
	if width == 0 || height == 0 {
		Err(ValidationError::EmptyImage { width, height })
	} else {
		Ok(())
	}
}
