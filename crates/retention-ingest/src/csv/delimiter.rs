//! Delimiter hypotheses and sniffing.

/// Candidates considered by auto-detection, in tie-break order.
const SNIFF_CANDIDATES: [u8; 4] = [b',', b';', b'\t', b'|'];

/// Number of non-blank lines inspected while sniffing.
const SNIFF_LINES: usize = 10;

/// Delimiter hypothesis for a CSV attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelimiterHint {
    /// Sniff the delimiter from the first lines.
    Auto,
    Fixed(u8),
}

impl DelimiterHint {
    pub const ATTEMPT_ORDER: [DelimiterHint; 5] = [
        DelimiterHint::Auto,
        DelimiterHint::Fixed(b','),
        DelimiterHint::Fixed(b';'),
        DelimiterHint::Fixed(b'\t'),
        DelimiterHint::Fixed(b'|'),
    ];

    /// Concrete delimiter for `text`.
    pub fn resolve(self, text: &str) -> u8 {
        match self {
            Self::Auto => sniff_delimiter(text).unwrap_or(b','),
            Self::Fixed(delimiter) => delimiter,
        }
    }

    #[must_use]
    pub fn label(self) -> String {
        match self {
            Self::Auto => "auto".to_string(),
            Self::Fixed(delimiter) => delimiter_label(delimiter),
        }
    }
}

/// Printable form of a delimiter byte (`\t` for tab).
pub fn delimiter_label(delimiter: u8) -> String {
    match delimiter {
        b'\t' => "\\t".to_string(),
        other => char::from(other).to_string(),
    }
}

/// Detect the most likely field delimiter by checking consistency across the first few lines.
///
/// For each candidate, count fields per line. The candidate producing the most
/// consistent field count (>1 field on the first line) wins; earlier candidates
/// win ties. Returns `None` when no candidate splits the first line.
pub fn sniff_delimiter(text: &str) -> Option<u8> {
    let sample_lines: Vec<&str> = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .take(SNIFF_LINES)
        .collect();
    if sample_lines.is_empty() {
        return None;
    }

    let mut best = None;
    let mut best_score = 0u64;
    for delimiter in SNIFF_CANDIDATES {
        let counts: Vec<usize> = sample_lines
            .iter()
            .map(|line| field_count(line, delimiter))
            .collect();

        let target = counts[0];
        if target <= 1 {
            continue;
        }
        // More consistent lines first, more columns breaks ties.
        let consistent = counts.iter().filter(|&&count| count == target).count() as u64;
        let score = consistent * target as u64;
        if score > best_score {
            best_score = score;
            best = Some(delimiter);
        }
    }
    best
}

fn field_count(line: &str, delimiter: u8) -> usize {
    csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes())
        .records()
        .next()
        .and_then(Result::ok)
        .map_or(1, |record| record.len())
}
