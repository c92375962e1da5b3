//! Prints a pattern and its legend to the terminal

use crate::cli::Style;
use beadgrid::Pattern;
use colored::Colorize;
use palette::Srgb;

/// Black or white, whichever is more readable on top of `color`
///
/// Uses the YIQ luma of the color.
pub fn contrast(color: Srgb<u8>) -> Srgb<u8> {
	let yiq = (299 * u32::from(color.red) + 587 * u32::from(color.green) + 114 * u32::from(color.blue)) / 1000;
	if yiq >= 128 {
		Srgb::new(0, 0, 0)
	} else {
		Srgb::new(255, 255, 255)
	}
}

/// Format a bead's label, optionally drawn on the bead's color
fn bead(label: char, color: Srgb<u8>, colorize: bool) -> String {
	let text = format!("{label} ");
	if colorize {
		let fg = contrast(color);
		text.truecolor(fg.red, fg.green, fg.blue)
			.on_truecolor(color.red, color.green, color.blue)
			.to_string()
	} else {
		text
	}
}

/// Each row of the pattern as a line of labels
///
/// A bead is two characters wide, so a half bead offset is one space.
pub fn pattern_lines(pattern: &Pattern, style: Style, colorize: bool) -> Vec<String> {
	pattern
		.grid
		.rows()
		.zip(0..)
		.map(|(row, y)| {
			let indent = if style.row_offset(y) > 0.0 { " " } else { "" };
			let beads = row
				.iter()
				.map(|&key| bead(pattern.legend.get(key).unwrap_or('?'), key.color(), colorize))
				.collect::<String>();
			format!("{indent}{beads}")
		})
		.collect()
}

/// One line for each legend entry: its label, color, and number of beads
pub fn legend_lines(pattern: &Pattern, colorize: bool) -> Vec<String> {
	pattern
		.legend
		.iter()
		.zip(pattern.bead_counts())
		.map(|((key, label), count)| {
			let [r, g, b] = key.channels();
			let swatch = if colorize {
				format!("{} ", "   ".on_truecolor(r, g, b))
			} else {
				String::new()
			};
			format!("{swatch}{label}: {key} x{count}")
		})
		.collect()
}

/// Print the pattern grid followed by its legend
pub fn print_pattern(pattern: &Pattern, style: Style, show_grid: bool, colorize: bool) {
	if show_grid {
		for line in pattern_lines(pattern, style, colorize) {
			println!("{line}");
		}
		println!();
	}

	println!("Color Legend:");
	for line in legend_lines(pattern, colorize) {
		println!("{line}");
	}
}
