//! EAN-13 normalization and checksum validation.

/// Number of digits in a normalized code, check digit included.
pub const EAN13_LEN: usize = 13;

/// Number of payload digits preceding the check digit.
pub const PAYLOAD_LEN: usize = EAN13_LEN - 1;

const QUOTE: u8 = b'"';

/// Validate
///
/// Returns `true` if `candidate` is a well-formed EAN-13 code whose final digit matches the
/// computed check digit. Malformed input of any kind yields `false`.
pub fn validate(candidate: &str) -> bool {
	validate_bytes(candidate.as_bytes())
}

/// Validate Bytes
///
/// Byte-slice variant of [`validate`], used on raw CSV fields so that non-UTF-8 input is simply
/// an invalid code.
pub fn validate_bytes(candidate: &[u8]) -> bool {
	let digits = match normalize(candidate) {
		Some(digits) => digits,
		None => return false,
	};
	let check = digits[PAYLOAD_LEN];
	let expected = check_digit(&digits[..PAYLOAD_LEN]);
	if expected != check {
		log::debug!(
			"Rejecting '{}': check digit {} != expected {}",
			String::from_utf8_lossy(candidate),
			check,
			expected
		);
		return false;
	}
	true
}

/// Normalize
///
/// Strip a surrounding quote pair and any leading zero padding, then left-pad back to exactly
/// 13 digits. Returns the digit values, or `None` if the candidate is empty, badly quoted, too
/// long or contains anything other than ASCII digits.
pub fn normalize(candidate: &[u8]) -> Option<[u8; EAN13_LEN]> {
	let unquoted = match unquote(candidate) {
		Some(x) if !x.is_empty() => x,
		_ => {
			log::debug!("Rejecting '{}': empty or badly quoted", String::from_utf8_lossy(candidate));
			return None;
		}
	};

	let first_significant = unquoted
		.iter()
		.position(|&c| c != b'0')
		.unwrap_or(unquoted.len());
	let significant = &unquoted[first_significant..];
	if significant.len() > EAN13_LEN {
		log::debug!("Rejecting '{}': too long", String::from_utf8_lossy(candidate));
		return None;
	}

	// Remaining slots on the left stay zero, which is exactly the re-padding.
	let mut digits = [0u8; EAN13_LEN];
	let offset = EAN13_LEN - significant.len();
	for (slot, &c) in digits[offset..].iter_mut().zip(significant) {
		if !c.is_ascii_digit() {
			log::debug!("Rejecting '{}': non-digit", String::from_utf8_lossy(candidate));
			return None;
		}
		*slot = c - b'0';
	}
	Some(digits)
}

/// Check Digit
///
/// Compute the EAN-13 check digit for the payload digit values (normally [`PAYLOAD_LEN`] of
/// them). Counting from the digit nearest the check digit, weights alternate 3, 1, 3, ...
pub fn check_digit(payload: &[u8]) -> u8 {
	let checksum: u32 = payload
		.iter()
		.rev()
		.enumerate()
		.map(|(i, &d)| if i % 2 == 0 { 3 * d as u32 } else { d as u32 })
		.sum();
	let multiple_of_ten = 10 * (checksum / 10 + 1);
	// Modulo covers a checksum that is already a multiple of ten.
	((multiple_of_ten - checksum) % 10) as u8
}

/// Unquote
///
/// A leading quote is only accepted together with a matching trailing quote.
fn unquote(candidate: &[u8]) -> Option<&[u8]> {
	match candidate {
		[QUOTE, inner @ .., QUOTE] => Some(inner),
		[QUOTE, ..] => None,
		_ => Some(candidate),
	}
}
