//! Runs pattern generations where each new request supersedes the ones before it

use crate::{Pattern, ValidationError};
use image::RgbaImage;
use std::sync::atomic::{AtomicU64, Ordering};

/// Tracks the most recent generation request for one output.
///
/// Starting a generation supersedes every generation started before it.
/// A superseded generation stops at its next stage boundary and returns no pattern,
/// so a caller only ever sees the result of the latest request.
#[derive(Debug, Default)]
pub struct Generator {
	/// Id of the most recently issued ticket
	latest: AtomicU64,
}

/// A claim on being the most recent generation request of a [`Generator`]
#[derive(Debug)]
pub struct Ticket<'a> {
	/// The generator that issued this ticket
	generator: &'a Generator,
	/// Id of this request
	id: u64,
}

impl Generator {
	/// Create a generator with no requests
	#[must_use]
	pub const fn new() -> Self {
		Self { latest: AtomicU64::new(0) }
	}

	/// Start a new request, superseding all previous tickets
	pub fn begin(&self) -> Ticket<'_> {
		let id = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
		Ticket { generator: self, id }
	}

	/// Start a new request and generate a pattern for it.
	///
	/// See [`crate::generate`] for the arguments.
	/// Returns `Ok(None)` if another request began before this one finished.
	///
	/// # Errors
	/// Returns a [`ValidationError`] if any argument is invalid.
	pub fn generate(
		&self,
		image: &RgbaImage,
		bead_count: u32,
		color_count: u8,
		max_iter: u32,
		seed: Option<u64>,
	) -> Result<Option<Pattern>, ValidationError> {
		self.begin().generate(image, bead_count, color_count, max_iter, seed)
	}
}

impl Ticket<'_> {
	/// Whether no newer request has begun since this ticket was issued
	#[must_use]
	pub fn is_current(&self) -> bool {
		self.generator.latest.load(Ordering::SeqCst) == self.id
	}

	/// Generate a pattern, giving up between stages once this ticket is superseded.
	///
	/// Returns `Ok(None)` if the ticket was superseded before the pattern was complete.
	///
	/// # Errors
	/// Returns a [`ValidationError`] if any argument is invalid.
	pub fn generate(
		&self,
		image: &RgbaImage,
		bead_count: u32,
		color_count: u8,
		max_iter: u32,
		seed: Option<u64>,
	) -> Result<Option<Pattern>, ValidationError> {
		self.generate_staged(image, bead_count, color_count, max_iter, seed, |_| ())
	}

	/// [`Ticket::generate`], calling `after` once each stage completes and before checking the ticket
	fn generate_staged(
		&self,
		image: &RgbaImage,
		bead_count: u32,
		color_count: u8,
		max_iter: u32,
		seed: Option<u64>,
		mut after: impl FnMut(Stage),
	) -> Result<Option<Pattern>, ValidationError> {
		crate::validate(image, bead_count, color_count)?;

		let grid = crate::sample(image, bead_count)?;
		if !self.continue_after(Stage::Sampling, &mut after) {
			return Ok(None);
		}

		let kmeans = crate::quantize(&grid, color_count, max_iter, seed)?;
		if !self.continue_after(Stage::Quantization, &mut after) {
			return Ok(None);
		}

		let pattern = Pattern::assemble(&grid, kmeans);
		Ok(self.continue_after(Stage::Mapping, &mut after).then_some(pattern))
	}

	/// Run the stage hook, then report whether this ticket is still current
	fn continue_after(&self, stage: Stage, after: &mut impl FnMut(Stage)) -> bool {
		after(stage);
		let current = self.is_current();
		if !current {
			log::debug!("request {} superseded after {stage:?}", self.id);
		}
		current
	}
}

/// The boundaries at which a superseded request stops
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
	/// The image was reduced to a pixel grid
	Sampling,
	/// The palette was found
	Quantization,
	/// Beads were mapped to palette colors and labeled
	Mapping,
}
