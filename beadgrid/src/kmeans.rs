//! Provides the implementation for k-means over the pixels of a grid

use crate::{
	error::check_color_count,
	pattern::nearest,
	PixelGrid, ValidationError,
};
use palette::Srgb;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

/// Data for each center/centroid
struct CenterData {
	/// The centroid colors, in initialization order
	centroid: Vec<Srgb<u8>>,
	/// Channel sums for all pixels assigned to this center
	sum: Vec<[u64; 3]>,
	/// Number of pixels assigned to this center
	count: Vec<u32>,
}

impl CenterData {
	/// Create a [`CenterData`] starting from the given centroids
	fn new(centroid: Vec<Srgb<u8>>) -> Self {
		let k = centroid.len();
		Self {
			centroid,
			sum: vec![[0; 3]; k],
			count: vec![0; k],
		}
	}
}

/// Result from running k-means
#[derive(Debug, Clone, PartialEq)]
pub struct KmeansResult {
	/// Final centroid colors, in the order they were initialized
	///
	/// There are always exactly `k` centroids, and some may be identical.
	pub centroids: Vec<Srgb<u8>>,
	/// Number of pixels assigned to each centroid by the last iteration
	pub counts: Vec<u32>,
	/// Number of elapsed iterations
	pub iterations: u32,
	/// Whether the centroids stopped changing before reaching the maximum number of iterations
	pub converged: bool,
}

/// Add a color to a channel sum
fn accumulate(sum: &mut [u64; 3], color: Srgb<u8>) {
	sum[0] += u64::from(color.red);
	sum[1] += u64::from(color.green);
	sum[2] += u64::from(color.blue);
}

/// The mean of `n` colors with the given channel sums, rounding halves up
fn mean(sum: [u64; 3], n: u32) -> Srgb<u8> {
	debug_assert!(n > 0);
	let n = u64::from(n);
	// each sum is at most 255 * n, so each rounded mean fits in a u8
	#[allow(clippy::cast_possible_truncation)]
	let channel = |s: u64| ((2 * s + n) / (2 * n)) as u8;
	Srgb::new(channel(sum[0]), channel(sum[1]), channel(sum[2]))
}

/// Choose `k` starting centroids with uniformly random channels
fn random_centroids(k: u8, rng: &mut impl Rng) -> Vec<Srgb<u8>> {
	(0..k).map(|_| Srgb::new(rng.gen(), rng.gen(), rng.gen())).collect()
}

/// Assign each pixel to its nearest center, recomputing the center sums and counts from scratch
#[cfg(not(feature = "threads"))]
fn update_assignments(pixels: &[Srgb<u8>], centers: &mut CenterData) {
	centers.sum.fill([0; 3]);
	centers.count.fill(0);

	for &color in pixels {
		let i = nearest(color, &centers.centroid);
		accumulate(&mut centers.sum[i], color);
		centers.count[i] += 1;
	}
}

/// Assign each pixel to its nearest center, recomputing the center sums and counts from scratch
///
/// All assignments are reduced before returning, so no centroid is updated mid-assignment.
#[cfg(feature = "threads")]
fn update_assignments(pixels: &[Srgb<u8>], centers: &mut CenterData) {
	use rayon::prelude::*;

	let k = centers.centroid.len();
	let centroids = &centers.centroid;
	let empty = || (vec![[0; 3]; k], vec![0; k]);

	let (sums, counts) = pixels
		.par_iter()
		.with_min_len(pixels.len() / rayon::current_num_threads())
		.fold(empty, |(mut sums, mut counts), &color| {
			let i = nearest(color, centroids);
			accumulate(&mut sums[i], color);
			counts[i] += 1;
			(sums, counts)
		})
		.reduce(empty, |(mut sums, mut counts): (Vec<[u64; 3]>, Vec<u32>), (other_sums, other_counts)| {
			for (sum, other) in sums.iter_mut().zip(&other_sums) {
				for (s, o) in sum.iter_mut().zip(other) {
					*s += o;
				}
			}
			for (count, other) in counts.iter_mut().zip(&other_counts) {
				*count += other;
			}
			(sums, counts)
		});

	centers.sum = sums;
	centers.count = counts;
}

/// For each center with at least one pixel, move its centroid to the mean of its pixels.
///
/// Empty centers keep their centroid. Returns the number of centroids that changed.
fn update_centroids(centers: &mut CenterData) -> usize {
	let mut moved = 0;
	for ((centroid, &n), &sum) in centers.centroid.iter_mut().zip(&centers.count).zip(&centers.sum) {
		if n > 0 {
			let new_centroid = mean(sum, n);
			if new_centroid != *centroid {
				*centroid = new_centroid;
				moved += 1;
			}
		}
	}
	moved
}

/// Run k-means from random starting centroids until no centroid changes or `max_iter` is reached
fn kmeans(pixels: &[Srgb<u8>], k: u8, max_iter: u32, rng: &mut impl Rng) -> KmeansResult {
	let mut centers = CenterData::new(random_centroids(k, rng));

	let mut iterations = 0;
	let mut converged = false;
	while iterations < max_iter && !converged {
		update_assignments(pixels, &mut centers);
		let moved = update_centroids(&mut centers);
		iterations += 1;
		converged = moved == 0;
		log::debug!("k-means iteration {iterations}: {moved} of {k} centroids moved");
	}

	if converged {
		log::debug!("k-means converged after {iterations} iterations");
	} else {
		log::debug!("k-means stopped at the maximum of {max_iter} iterations");
	}

	KmeansResult {
		centroids: centers.centroid,
		counts: centers.count,
		iterations,
		converged,
	}
}

/// Reduce the pixels of `grid` to a palette of `k` colors using k-means.
///
/// The starting centroids are random, drawn from a generator seeded with `seed`,
/// or from OS entropy if `seed` is `None`.
/// At most `max_iter` iterations are run.
///
/// # Errors
/// Returns [`ValidationError::InvalidColorCount`] if `k` is not in `1..=26`.
pub fn quantize(
	grid: &PixelGrid,
	k: u8,
	max_iter: u32,
	seed: Option<u64>,
) -> Result<KmeansResult, ValidationError> {
	let mut rng = match seed {
		Some(seed) => Xoshiro256PlusPlus::seed_from_u64(seed),
		None => Xoshiro256PlusPlus::from_entropy(),
	};

	quantize_with_rng(grid, k, max_iter, &mut rng)
}

/// Like [`quantize`], but draws the starting centroids from the provided random number generator
///
/// # Errors
/// Returns [`ValidationError::InvalidColorCount`] if `k` is not in `1..=26`
/// or [`ValidationError::EmptyImage`] if `grid` has no pixels.
pub fn quantize_with_rng(
	grid: &PixelGrid,
	k: u8,
	max_iter: u32,
	rng: &mut impl Rng,
) -> Result<KmeansResult, ValidationError> {
	check_color_count(k)?;
	if grid.pixels().is_empty() {
		return Err(ValidationError::EmptyImage {
			width: grid.width(),
			height: grid.height(),
		});
	}

	Ok(kmeans(grid.pixels(), k, max_iter, rng))
}
