//! Rasterizes a pattern and its legend into an image

use crate::{cli::Style, font, render::contrast};
use beadgrid::Pattern;
use image::{
	error::{LimitError, LimitErrorKind},
	ImageError, Rgba, RgbaImage,
};
use std::path::Path;

/// Space around the pattern in pixels
const MARGIN: u32 = 5;
/// Width and height of each legend swatch in pixels
const SWATCH_SIZE: u32 = 20;
/// Space between a swatch and its caption in pixels
const CAPTION_GAP: u32 = 5;
/// Number of legend entries in each row
const LEGEND_COLUMNS: u32 = 5;
/// Narrowest legend column, fits a swatch and the longest caption `Z: rgb(255,255,255)`
const LEGEND_COLUMN_WIDTH: u32 = 150;
/// Vertical distance between legend rows in pixels
const LEGEND_ROW_PITCH: u32 = 25;
/// Space reserved above the legend swatches for the title in pixels
const LEGEND_HEADER: u32 = 20;
/// Heading drawn above the swatches
const LEGEND_TITLE: &str = "Color Legend:";

/// Canvas background
const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
/// Swatch border and legend text
const INK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Blend 20% black over `color`, used for bead outlines
fn outline(Rgba([r, g, b, a]): Rgba<u8>) -> Rgba<u8> {
	// v * 0.8, rounded
	#[allow(clippy::cast_possible_truncation)]
	let darken = |v: u8| ((u16::from(v) * 4 + 2) / 5) as u8;
	Rgba([darken(r), darken(g), darken(b), a])
}

/// Whether a point lies in a hexagon with a vertex pointing up
///
/// `dx` and `dy` are offsets from the hexagon center, `radius` is the distance to each vertex.
fn in_hexagon(dx: f32, dy: f32, radius: f32) -> bool {
	let (dx, dy) = (dx.abs(), dy.abs());
	dx <= radius * 3f32.sqrt() / 2.0 && dy <= radius - dx / 3f32.sqrt()
}

/// The pixel bounds of the bead grid of `pattern`, before the legend
///
/// Returns `None` if either side does not fit in a `u32`.
fn grid_size(pattern: &Pattern, style: Style, bead_size: u32) -> Option<(u32, u32)> {
	let rows = pattern.grid.height();
	let stagger = if rows > 1 { style.row_offset(1) } else { 0.0 };
	#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
	let stagger = (f64::from(stagger) * f64::from(bead_size)).ceil() as u32;
	let width = pattern.grid.width().checked_mul(bead_size)?.checked_add(stagger)?;
	let height = rows.checked_mul(bead_size)?;
	Some((width, height))
}

/// The error for a canvas too large to address
fn too_large() -> ImageError {
	ImageError::Limits(LimitError::from_kind(LimitErrorKind::DimensionError))
}

/// Draw one bead with its top left corner at (`left`, `top`)
fn draw_bead(canvas: &mut RgbaImage, style: Style, left: f32, top: f32, size: u32, color: Rgba<u8>) {
	#[allow(clippy::cast_precision_loss)]
	let size_f = size as f32;
	let radius = size_f / 2.0;
	let (cx, cy) = (left + radius, top + radius);

	#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
	let x0 = left.floor().max(0.0) as u32;
	#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
	let y0 = top.floor().max(0.0) as u32;

	for y in y0..(y0 + size + 1).min(canvas.height()) {
		for x in x0..(x0 + size + 1).min(canvas.width()) {
			#[allow(clippy::cast_precision_loss)]
			let (dx, dy) = (x as f32 + 0.5 - cx, y as f32 + 0.5 - cy);
			let (inside, interior) = match style {
				Style::Peyote => (in_hexagon(dx, dy, radius), in_hexagon(dx, dy, radius - 1.0)),
				Style::Loom => {
					let (dx, dy) = (dx.abs(), dy.abs());
					(dx < radius && dy < radius, dx < radius - 1.0 && dy < radius - 1.0)
				},
			};

			if interior {
				canvas.put_pixel(x, y, color);
			} else if inside {
				canvas.put_pixel(x, y, outline(color));
			}
		}
	}
}

/// Draw a filled square swatch with a border
fn draw_swatch(canvas: &mut RgbaImage, left: u32, top: u32, color: Rgba<u8>) {
	for y in top..(top + SWATCH_SIZE).min(canvas.height()) {
		for x in left..(left + SWATCH_SIZE).min(canvas.width()) {
			let edge = x == left || y == top || x == left + SWATCH_SIZE - 1 || y == top + SWATCH_SIZE - 1;
			canvas.put_pixel(x, y, if edge { INK } else { color });
		}
	}
}

/// Draw `label` centered on the bead with its top left corner at (`left`, `top`)
///
/// Beads too small to hold a glyph are left unlabeled.
fn draw_bead_label(canvas: &mut RgbaImage, left: f32, top: f32, size: u32, label: char, color: Rgba<u8>) {
	if size < font::GLYPH_HEIGHT + 2 {
		return;
	}
	#[allow(clippy::cast_precision_loss)]
	let radius = size as f32 / 2.0;
	#[allow(clippy::cast_precision_loss)]
	let (half_width, half_height) = (font::GLYPH_WIDTH as f32 / 2.0, font::GLYPH_HEIGHT as f32 / 2.0);
	#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
	let x = (left + radius - half_width).floor().max(0.0) as u32;
	#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
	let y = (top + radius - half_height).floor().max(0.0) as u32;
	font::draw_char(canvas, x, y, label, color);
}

/// Rasterize `pattern` with the given stitch style and bead size, followed by its legend
///
/// Each bead carries its legend letter in black or white, whichever reads better on the bead.
/// Legend entries are laid out in rows of five, in legend order, each a swatch captioned `A: rgb(r,g,b)`.
///
/// # Errors
/// Returns [`ImageError::Limits`] if the canvas dimensions overflow a `u32`.
pub fn render(pattern: &Pattern, style: Style, bead_size: u32) -> Result<RgbaImage, ImageError> {
	let (grid_width, grid_height) = grid_size(pattern, style, bead_size).ok_or_else(too_large)?;
	let legend_len = u32::try_from(pattern.legend.len()).map_err(|_| too_large())?;
	let legend_rows = (legend_len + LEGEND_COLUMNS - 1) / LEGEND_COLUMNS;

	let width = grid_width
		.checked_add(2 * MARGIN)
		.ok_or_else(too_large)?
		.max(LEGEND_COLUMNS * LEGEND_COLUMN_WIDTH);
	let legend_top = grid_height.checked_add(2 * MARGIN).ok_or_else(too_large)?;
	let height = legend_rows
		.checked_mul(LEGEND_ROW_PITCH)
		.and_then(|rows| rows.checked_add(legend_top.checked_add(LEGEND_HEADER)?))
		.ok_or_else(too_large)?;

	let mut canvas = RgbaImage::from_pixel(width, height, BACKGROUND);

	#[allow(clippy::cast_precision_loss)]
	let size_f = bead_size as f32;
	for (row, y) in pattern.grid.rows().zip(0u32..) {
		#[allow(clippy::cast_precision_loss)]
		let top = (MARGIN + y * bead_size) as f32;
		let offset = style.row_offset(y) * size_f;
		for (&key, x) in row.iter().zip(0u32..) {
			#[allow(clippy::cast_precision_loss)]
			let left = (MARGIN + x * bead_size) as f32 + offset;
			let [r, g, b] = key.channels();
			draw_bead(&mut canvas, style, left, top, bead_size, Rgba([r, g, b, 255]));

			if let Some(label) = pattern.legend.get(key) {
				let text = contrast(key.color());
				let text = Rgba([text.red, text.green, text.blue, 255]);
				draw_bead_label(&mut canvas, left, top, bead_size, label, text);
			}
		}
	}

	let title_top = legend_top + (LEGEND_HEADER - font::GLYPH_HEIGHT) / 2;
	font::draw_text(&mut canvas, MARGIN, title_top, LEGEND_TITLE, INK);

	let column_width = width / LEGEND_COLUMNS;
	for ((key, label), i) in pattern.legend.iter().zip(0u32..) {
		let left = MARGIN + (i % LEGEND_COLUMNS) * column_width;
		let top = legend_top + LEGEND_HEADER + (i / LEGEND_COLUMNS) * LEGEND_ROW_PITCH;
		let [r, g, b] = key.channels();
		draw_swatch(&mut canvas, left, top, Rgba([r, g, b, 255]));

		let caption_top = top + (SWATCH_SIZE - font::GLYPH_HEIGHT) / 2;
		font::draw_text(&mut canvas, left + SWATCH_SIZE + CAPTION_GAP, caption_top, &format!("{label}: {key}"), INK);
	}

	Ok(canvas)
}

/// Render `pattern` and save it as a PNG at `path`
pub fn save_png(pattern: &Pattern, style: Style, bead_size: u32, path: &Path) -> Result<(), ImageError> {
	render(pattern, style, bead_size)?.save_with_format(path, image::ImageFormat::Png)
}
