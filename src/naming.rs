//! Output filename convention: `<base>-<attempt>.jpeg`.
//!
//! `<base>` is the source file name up to its first `.`, so `beach.jpg`,
//! `beach.png` and `beach.raw.tiff` all share the base `beach`. `<attempt>`
//! is the 1-based attempt sequence of the shrink loop. The extension is
//! always `.jpeg` whatever the source format was.
//!
//! ```text
//! beach.png      → beach-1.jpeg, beach-2.jpeg, ...
//! 2024-trip.JPG  → 2024-trip-1.jpeg
//! ```

/// Extension of every file the shrink loop writes.
pub const OUTPUT_EXTENSION: &str = "jpeg";

/// Result of parsing an output name like `2024-trip-3.jpeg`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedOutputName {
    /// Base name of the source, dashes preserved.
    pub base: String,
    /// Attempt sequence (1-based).
    pub attempt: u32,
}

/// Base name of a source file: everything before the first `.`.
///
/// - `"beach.jpg"` → `"beach"`
/// - `"beach.raw.tiff"` → `"beach"`
/// - `"README"` → `"README"`
pub fn base_name(file_name: &str) -> &str {
    file_name.split('.').next().unwrap_or(file_name)
}

/// Output file name for a source file at a given attempt.
pub fn output_file_name(source_file_name: &str, attempt: u32) -> String {
    format!(
        "{}-{}.{}",
        base_name(source_file_name),
        attempt,
        OUTPUT_EXTENSION
    )
}

/// Parse an output file name back into base and attempt.
///
/// Returns `None` for anything that does not end in `-<digits>.jpeg`.
/// The attempt is taken from the *last* dash, so bases may contain dashes:
/// - `"beach-1.jpeg"` → base="beach", attempt=1
/// - `"2024-trip-12.jpeg"` → base="2024-trip", attempt=12
/// - `"beach.jpeg"` → `None`
/// - `"beach-x.jpeg"` → `None`
pub fn parse_output_name(name: &str) -> Option<ParsedOutputName> {
    let stem = name.strip_suffix(OUTPUT_EXTENSION)?.strip_suffix('.')?;
    let (base, attempt) = stem.rsplit_once('-')?;
    if base.is_empty() || attempt.is_empty() || !attempt.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(ParsedOutputName {
        base: base.to_string(),
        attempt: attempt.parse().ok()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_name_stops_at_first_dot() {
        assert_eq!(base_name("beach.jpg"), "beach");
        assert_eq!(base_name("beach.raw.tiff"), "beach");
        assert_eq!(base_name("README"), "README");
    }

    #[test]
    fn output_name_first_attempt() {
        assert_eq!(output_file_name("beach.png", 1), "beach-1.jpeg");
    }

    #[test]
    fn output_name_encodes_incrementing_attempt() {
        let names: Vec<String> = (1..=3).map(|n| output_file_name("IMG_0042.JPG", n)).collect();
        assert_eq!(
            names,
            vec!["IMG_0042-1.jpeg", "IMG_0042-2.jpeg", "IMG_0042-3.jpeg"]
        );
    }

    #[test]
    fn parse_simple_output_name() {
        let p = parse_output_name("beach-1.jpeg").unwrap();
        assert_eq!(p.base, "beach");
        assert_eq!(p.attempt, 1);
    }

    #[test]
    fn parse_dashed_base() {
        let p = parse_output_name("2024-trip-12.jpeg").unwrap();
        assert_eq!(p.base, "2024-trip");
        assert_eq!(p.attempt, 12);
    }

    #[test]
    fn parse_rejects_missing_attempt() {
        assert_eq!(parse_output_name("beach.jpeg"), None);
        assert_eq!(parse_output_name("beach-.jpeg"), None);
        assert_eq!(parse_output_name("-3.jpeg"), None);
    }

    #[test]
    fn parse_rejects_non_numeric_attempt() {
        assert_eq!(parse_output_name("beach-x.jpeg"), None);
        assert_eq!(parse_output_name("beach-+1.jpeg"), None);
    }

    #[test]
    fn parse_rejects_other_extensions() {
        assert_eq!(parse_output_name("beach-1.jpg"), None);
        assert_eq!(parse_output_name("beach-1"), None);
    }

    #[test]
    fn parse_keeps_hyphenated_base() {
        let p = parse_output_name("beach-house-2.jpeg").unwrap();
        assert_eq!(p.base, "beach-house");
        assert_eq!(parse_output_name("beach.jpeg"), None);
    }
}
