use criterion::{
	black_box, criterion_group, criterion_main, measurement::WallTime, BenchmarkGroup, BenchmarkId, Criterion,
	SamplingMode,
};
use image::{Rgba, RgbaImage};
use std::time::Duration;

/// Synthetic photo-like images of increasing size
fn images() -> Vec<(String, RgbaImage)> {
	[(480, 270), (1920, 1080)]
		.into_iter()
		.map(|(width, height)| {
			let image = RgbaImage::from_fn(width, height, |x, y| {
				#[allow(clippy::cast_possible_truncation)]
				Rgba([
					(x * 255 / width) as u8,
					(y * 255 / height) as u8,
					((x ^ y) % 256) as u8,
					255,
				])
			});
			(format!("{width}x{height}"), image)
		})
		.collect()
}

fn create_group<'a>(c: &'a mut Criterion, name: &'a str) -> BenchmarkGroup<'a, WallTime> {
	let mut group = c.benchmark_group(name);
	group
		.sample_size(30)
		.noise_threshold(0.05)
		.sampling_mode(SamplingMode::Flat)
		.warm_up_time(Duration::from_millis(500));
	group
}

fn sample(c: &mut Criterion) {
	let mut group = create_group(c, "sample");

	for (name, image) in images() {
		for beads in [40, 200] {
			group.bench_with_input(BenchmarkId::new(&name, beads), &image, |b, image| {
				b.iter(|| beadgrid::sample(image, black_box(beads)));
			});
		}
	}
}

fn quantize(c: &mut Criterion) {
	let mut group = create_group(c, "quantize");

	let grids = images()
		.into_iter()
		.map(|(name, image)| (name, beadgrid::sample(&image, 200).expect("non-empty image")))
		.collect::<Vec<_>>();

	for (name, grid) in &grids {
		for k in [4, 12, 26] {
			group.bench_with_input(BenchmarkId::new(name, k), grid, |b, grid| {
				b.iter(|| beadgrid::quantize(grid, black_box(k), black_box(beadgrid::DEFAULT_MAX_ITER), Some(0)));
			});
		}
	}
}

fn generate(c: &mut Criterion) {
	let mut group = create_group(c, "generate");
	group.measurement_time(Duration::from_secs(4));

	for (name, image) in images() {
		group.bench_with_input(BenchmarkId::from_parameter(&name), &image, |b, image| {
			b.iter(|| {
				beadgrid::generate(
					image,
					black_box(60),
					black_box(8),
					black_box(beadgrid::DEFAULT_MAX_ITER),
					black_box(Some(0)),
				)
			});
		});
	}
}

criterion_group!(benches, sample, quantize, generate);
criterion_main!(benches);
