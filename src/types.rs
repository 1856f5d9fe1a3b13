//! Global type definitions.

use serde::Serialize;

pub type Count = u64;

/// 0-based index of a column within a record.
pub type ColumnIndex = usize;

/// Header label identifying the column holding EAN codes.
pub static EAN_COLUMN: &str = "ean";

/// Same label as it appears when the header field is quoted.
pub static QUOTED_EAN_COLUMN: &str = "\"ean\"";

/// Classification of a single data row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOutcome {
	Valid,
	Invalid,
	/// Blank row, counted as neither valid nor invalid.
	Empty,
}

/// Running totals, serialized as the program's final output line.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tally {
	pub valid: Count,
	pub invalid: Count,
}

impl Tally {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn record(&mut self, outcome: RowOutcome) {
		match outcome {
			RowOutcome::Valid => self.valid += 1,
			RowOutcome::Invalid => self.invalid += 1,
			RowOutcome::Empty => {}
		}
	}
}

impl FromIterator<RowOutcome> for Tally {
	fn from_iter<I: IntoIterator<Item = RowOutcome>>(iter: I) -> Self {
		let mut tally = Tally::new();
		for outcome in iter {
			tally.record(outcome);
		}
		tally
	}
}
