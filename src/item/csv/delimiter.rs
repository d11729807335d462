/// Candidate delimiters, in tie-breaking order.
pub const CANDIDATE_DELIMITERS: [u8; 4] = [b',', b';', b'\t', b'|'];

/// Picks the delimiter that occurs most often in `first_line`.
///
/// Ties go to the candidate listed first in [`CANDIDATE_DELIMITERS`], so a
/// line without any candidate yields a comma.
pub fn detect_delimiter(first_line: &str) -> u8 {
    let mut best = CANDIDATE_DELIMITERS[0];
    let mut best_count = 0;

    for &delimiter in &CANDIDATE_DELIMITERS {
        let count = first_line.bytes().filter(|&b| b == delimiter).count();
        if count > best_count {
            best = delimiter;
            best_count = count;
        }
    }

    best
}
