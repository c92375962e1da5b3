//! Labels each palette color with a letter

use crate::ColorKey;
use indexmap::IndexMap;
use palette::Srgb;

/// The symbols used for labels, in assignment order
const ALPHABET: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// The label for the palette color at `index`, wrapping around after `Z`
#[must_use]
pub fn label(index: usize) -> char {
	char::from(ALPHABET[index % ALPHABET.len()])
}

/// A mapping from each distinct palette color to its label
///
/// Iterates in the order colors first appeared in the palette.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Legend(IndexMap<ColorKey, char>);

impl Legend {
	/// The label for `key`, if it is in the legend
	#[must_use]
	pub fn get(&self, key: ColorKey) -> Option<char> {
		self.0.get(&key).copied()
	}

	/// Number of distinct colors
	#[must_use]
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Whether there are no colors
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Iterate over each color and its label
	pub fn iter(&self) -> impl ExactSizeIterator<Item = (ColorKey, char)> + '_ {
		self.0.iter().map(|(&key, &label)| (key, label))
	}
}

/// Assign the label `A`, `B`, ... to each palette color in order.
///
/// If colors repeat in the palette, the label of the last occurrence wins,
/// so the legend then has fewer entries than the palette.
#[must_use]
pub fn build_legend(palette: &[Srgb<u8>]) -> Legend {
	let mut legend = IndexMap::with_capacity(palette.len());
	for (i, &color) in palette.iter().enumerate() {
		legend.insert(ColorKey::from(color), label(i));
	}
	Legend(legend)
}
