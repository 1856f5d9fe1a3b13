//! Header scanning and row-by-row EAN validation.

use std::io::{BufReader, Read, Write};

use anyhow::Result;
use csv::{ByteRecord, Trim};

use crate::ean;
use crate::types::{ColumnIndex, RowOutcome, Tally, EAN_COLUMN, QUOTED_EAN_COLUMN};

/// Run
///
/// Read the header and all data rows from `input` (trait bound `std::io::Read`), validate the
/// `ean` column of every row and write `<valid> <invalid>` to `output` (trait bound
/// `std::io::Write`). If the header has no `ean` column, `0 0` is written and no rows are read.
pub fn run<R: Read, W: Write>(input: &mut R, output: &mut W) -> Result<()> {
	let tally = tally_rows(input)?;
	write_tally(output, tally)
}

/// Find EAN Column
///
/// Split a raw header line on commas and return the index of the first field that is `ean` or
/// `"ean"`.
pub fn find_ean_column(header: &str) -> Option<ColumnIndex> {
	header_index(header.split(',').map(str::as_bytes))
}

/// Header Index
///
/// Index of the first header field naming the EAN column, quoted or not.
pub fn header_index<'a, I>(fields: I) -> Option<ColumnIndex>
where
	I: IntoIterator<Item = &'a [u8]>,
{
	fields
		.into_iter()
		.position(|field| field == EAN_COLUMN.as_bytes() || field == QUOTED_EAN_COLUMN.as_bytes())
}

/// Classify Row
///
/// A record whose fields are all blank is `Empty`. Otherwise the field at `column` decides
/// between `Valid` and `Invalid`; a row too short to have that field is `Invalid`.
pub fn classify_row(record: &ByteRecord, column: ColumnIndex) -> RowOutcome {
	if record.iter().all(|field| field.is_empty()) {
		log::debug!("Skipping empty row {:?}", record.position().map(|p| p.line()));
		return RowOutcome::Empty;
	}
	let field = record.get(column).unwrap_or(b"");
	if ean::validate_bytes(field) {
		RowOutcome::Valid
	} else {
		RowOutcome::Invalid
	}
}

/// Tally Rows
///
/// Quoting is disabled so that quote characters reach the validator untouched. Completely empty
/// lines never produce a record.
fn tally_rows<R: Read>(input: &mut R) -> Result<Tally> {
	let buffered = BufReader::new(input);
	let mut rdr = csv::ReaderBuilder::new()
		.quoting(false)
		.flexible(true)
		.trim(Trim::All)
		.from_reader(buffered);

	let column = match header_index(rdr.byte_headers()?.iter()) {
		Some(column) => column,
		None => {
			log::warn!("No '{}' column in header, skipping rows", EAN_COLUMN);
			return Ok(Tally::new());
		}
	};
	log::debug!("Found '{}' column at index {}", EAN_COLUMN, column);

	rdr.byte_records()
		.map(|result| -> Result<RowOutcome> { Ok(classify_row(&result?, column)) })
		.collect()
}

/// Write Tally
///
/// Write the final counts as a single space-separated line.
fn write_tally<W: Write>(wtr: &mut W, tally: Tally) -> Result<()> {
	let mut writer = csv::WriterBuilder::new()
		.delimiter(b' ')
		.has_headers(false)
		.from_writer(wtr);
	writer.serialize(tally)?;
	writer.flush()?;
	Ok(())
}

#[cfg(test)]
mod test {
	use super::*;
	use rstest::*;

	fn run_str(input: &str) -> String {
		let mut output = Vec::new();
		let result = run(&mut input.as_bytes(), &mut output);
		assert!(result.is_ok(), "{:?}", result);
		String::from_utf8(output).unwrap_or_default()
	}

	#[rstest]
	#[case("sku,ean,price", Some(1))]
	#[case("sku,price", None)]
	#[case("ean", Some(0))]
	#[case("sku,\"ean\"", Some(1))]
	#[case("sku,price,ean", Some(2))]
	#[case("ean,ean", Some(0))]
	#[case("sku,EAN,price", None)]
	#[case("sku,eans,price", None)]
	#[case("", None)]
	fn finds_ean_column(#[case] header: &str, #[case] expected: Option<ColumnIndex>) {
		assert_eq!(find_ean_column(header), expected);
	}

	#[rstest]
	#[case(&["1", "4065418448246"], RowOutcome::Valid)]
	#[case(&["1", "\"4065418448246\""], RowOutcome::Valid)]
	#[case(&["1", "4065418448247"], RowOutcome::Invalid)]
	#[case(&["1", ""], RowOutcome::Invalid)]
	#[case(&["1"], RowOutcome::Invalid)]
	#[case(&[""], RowOutcome::Empty)]
	#[case(&["", ""], RowOutcome::Empty)]
	fn classifies_rows(#[case] fields: &[&str], #[case] expected: RowOutcome) {
		let record = ByteRecord::from(fields.to_vec());
		assert_eq!(classify_row(&record, 1), expected);
	}

	#[rstest]
	fn counts_valid_and_invalid_rows() {
		let input = "sku,ean,price\nA,4065418448246,1.0\nB,4065418448247,2.0\nC,5901234123457,3.0\n";
		assert_eq!(run_str(input), "2 1\n");
	}

	#[rstest]
	fn missing_column_short_circuits() {
		let input = "sku,price\n4065418448246,1.0\n";
		assert_eq!(run_str(input), "0 0\n");
	}

	#[rstest]
	fn empty_input_writes_zero_counts() {
		assert_eq!(run_str(""), "0 0\n");
	}

	#[rstest]
	fn header_only_writes_zero_counts() {
		assert_eq!(run_str("ean\n"), "0 0\n");
	}

	#[rstest]
	fn header_is_not_validated_as_a_code() {
		assert_eq!(run_str("4065418448246,ean\nx,4065418448246\n"), "1 0\n");
	}

	#[rstest]
	fn blank_lines_are_skipped() {
		let input = "ean\n\n4065418448246\n   \n\r\n4065418448247\n";
		assert_eq!(run_str(input), "1 1\n");
	}

	#[rstest]
	fn quoted_header_and_values() {
		let input = "\"sku\",\"ean\"\n\"A\",\"4065418448246\"\n\"B\",\"4065418448246\n";
		assert_eq!(run_str(input), "1 1\n");
	}
}
