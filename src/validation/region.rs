//! Service-region classification for free-text addresses.
//!
//! Two independent signals are OR-ed: a keyword or phrase matched on whole
//! words, and a 5-digit postal code inside one of the configured inclusive
//! ranges. Both lists are configuration.

use std::fmt;
use std::ops::RangeInclusive;

/// Keywords used when none are configured.
pub const DEFAULT_KEYWORDS: [&str; 2] = ["san francisco", "sf"];

/// Postal ranges used when none are configured.
pub const DEFAULT_POSTAL_RANGES: &str = "94102-94134,94158";

/// Which rule placed an address inside the region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionRule {
    Keyword(String),
    PostalCode(String),
}

impl fmt::Display for RegionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keyword(k) => write!(f, "keyword '{}'", k),
            Self::PostalCode(code) => write!(f, "postal code {}", code),
        }
    }
}

/// Outcome of classifying one address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionClassification {
    pub in_region: bool,
    pub matched: Option<RegionRule>,
}

/// Classifies addresses against a single configured region.
#[derive(Debug, Clone)]
pub struct RegionMatcher {
    /// Each keyword pre-split into lowercase tokens
    keywords: Vec<(String, Vec<String>)>,
    postal_ranges: Vec<RangeInclusive<u32>>,
}

impl RegionMatcher {
    /// Create a matcher from keywords and postal ranges.
    ///
    /// Keywords that contain no letters or digits are ignored.
    pub fn new<I, S>(keywords: I, postal_ranges: Vec<RangeInclusive<u32>>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .filter_map(|k| {
                let tokens = tokenize(k.as_ref());
                (!tokens.is_empty()).then(|| (k.as_ref().trim().to_string(), tokens))
            })
            .collect();

        Self {
            keywords,
            postal_ranges,
        }
    }

    /// Classify an address.
    pub fn classify(&self, address: &str) -> RegionClassification {
        let tokens = tokenize(address);

        let keyword = self.keywords.iter().find(|(_, phrase)| {
            tokens
                .windows(phrase.len())
                .any(|window| window == phrase.as_slice())
        });
        if let Some((keyword, _)) = keyword {
            return RegionClassification {
                in_region: true,
                matched: Some(RegionRule::Keyword(keyword.clone())),
            };
        }

        let postal = tokens.iter().find(|token| {
            token.len() == 5
                && token.bytes().all(|b| b.is_ascii_digit())
                && token
                    .parse::<u32>()
                    .map(|code| self.postal_ranges.iter().any(|r| r.contains(&code)))
                    .unwrap_or(false)
        });

        RegionClassification {
            in_region: postal.is_some(),
            matched: postal.map(|code| RegionRule::PostalCode(code.clone())),
        }
    }

    /// Shorthand for `classify(address).in_region`.
    pub fn is_in_region(&self, address: &str) -> bool {
        self.classify(address).in_region
    }
}

impl Default for RegionMatcher {
    fn default() -> Self {
        let ranges = parse_postal_ranges(DEFAULT_POSTAL_RANGES).unwrap_or_default();
        Self::new(DEFAULT_KEYWORDS, ranges)
    }
}

/// Parse a comma-separated list of postal codes and inclusive ranges,
/// e.g. `"94102-94134,94158"`.
pub fn parse_postal_ranges(list: &str) -> Result<Vec<RangeInclusive<u32>>, String> {
    list.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            let (start, end) = part.split_once('-').unwrap_or((part, part));
            let start = parse_postal_code(start)?;
            let end = parse_postal_code(end)?;
            if start > end {
                return Err(format!("range start exceeds end in '{}'", part));
            }
            Ok(start..=end)
        })
        .collect()
}

fn parse_postal_code(code: &str) -> Result<u32, String> {
    let code = code.trim();
    if code.len() != 5 || !code.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("'{}' is not a 5-digit postal code", code));
    }
    code.parse::<u32>().map_err(|e| e.to_string())
}

/// Lowercase alphanumeric runs; everything else separates tokens.
fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_postal_code_in_range() {
        let matcher = RegionMatcher::default();
        let result = matcher.classify("123 Market St, 94105");
        assert!(result.in_region);
        assert_eq!(
            result.matched,
            Some(RegionRule::PostalCode("94105".to_string()))
        );
    }

    #[test]
    fn test_keyword_match() {
        let matcher = RegionMatcher::default();
        let result = matcher.classify("San Francisco");
        assert!(result.in_region);
        assert_eq!(
            result.matched,
            Some(RegionRule::Keyword("san francisco".to_string()))
        );
        assert!(matcher.is_in_region("1 Dolores St, SF"));
        assert!(matcher.is_in_region("SAN   FRANCISCO, CA"));
    }

    #[test]
    fn test_out_of_region() {
        let matcher = RegionMatcher::default();
        let result = matcher.classify("123 Broadway, Oakland, CA 94607");
        assert!(!result.in_region);
        assert_eq!(result.matched, None);
    }

    #[test]
    fn test_keywords_match_whole_words_only() {
        let matcher = RegionMatcher::default();
        // "sf" inside another word must not count
        assert!(!matcher.is_in_region("12 Transfer Rd, Oakland"));
        assert!(!matcher.is_in_region("Sfax Avenue, Berkeley"));
        assert!(!matcher.is_in_region("South San Franciscoville 94080"));
    }

    #[test]
    fn test_range_boundaries() {
        let matcher = RegionMatcher::default();
        assert!(!matcher.is_in_region("Main St 94101"));
        assert!(matcher.is_in_region("Main St 94102"));
        assert!(matcher.is_in_region("Main St 94134"));
        assert!(!matcher.is_in_region("Main St 94135"));
        assert!(matcher.is_in_region("Main St 94158"));
        assert!(!matcher.is_in_region("Main St 94159"));
    }

    #[test]
    fn test_zip_plus_four_and_long_numbers() {
        let matcher = RegionMatcher::default();
        assert!(matcher.is_in_region("Main St 94110-1234"));
        // Six digits is not a postal code
        assert!(!matcher.is_in_region("Main St 941100"));
    }

    #[test]
    fn test_custom_configuration() {
        let matcher = RegionMatcher::new(["portland", "pdx"], vec![97201..=97299]);
        assert!(matcher.is_in_region("NW 23rd Ave, PDX"));
        assert!(matcher.is_in_region("Oak St 97209"));
        assert!(!matcher.is_in_region("San Francisco 94105"));
    }

    #[test]
    fn test_parse_postal_ranges() {
        assert_eq!(
            parse_postal_ranges("94102-94134, 94158").unwrap(),
            vec![94102..=94134, 94158..=94158]
        );
        assert!(parse_postal_ranges("94134-94102").is_err());
        assert!(parse_postal_ranges("941").is_err());
        assert!(parse_postal_ranges("abcde").is_err());
        assert!(parse_postal_ranges("").unwrap().is_empty());
    }
}
