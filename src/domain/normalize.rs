use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::domain::value::{CountryCode, NormalizedNumber};

const NUMBER_PATTERN: &str = r"^\+?(0|[0-9]{3})[0-9]{9}$";
const SEPARATOR_PATTERN: &str = r"[-\s]";

static NUMBER_REGEX: OnceLock<Regex> = OnceLock::new();
static SEPARATOR_REGEX: OnceLock<Regex> = OnceLock::new();

fn number_regex() -> &'static Regex {
    NUMBER_REGEX.get_or_init(|| Regex::new(NUMBER_PATTERN).expect("valid regex pattern"))
}

fn separator_regex() -> &'static Regex {
    SEPARATOR_REGEX.get_or_init(|| Regex::new(SEPARATOR_PATTERN).expect("valid regex pattern"))
}

#[derive(Debug, Clone, Default)]
/// Validates and canonicalizes destination numbers.
///
/// Accepted shapes (after stripping hyphens and whitespace) are an optional `+`,
/// then either a trunk `0` or a three-digit country code, then nine ASCII digits.
/// A trunk `0` is replaced with the configured [`CountryCode`], a leading `+` is
/// dropped, and anything else passes through unchanged.
pub struct NumberNormalizer {
    country_code: CountryCode,
}

impl NumberNormalizer {
    pub fn new(country_code: CountryCode) -> Self {
        Self { country_code }
    }

    pub fn country_code(&self) -> &CountryCode {
        &self.country_code
    }

    /// Normalize a collection of numbers, dropping blank and invalid entries.
    ///
    /// A single number can be passed as `[number]` or `Some(number)`; `None` yields
    /// an empty set. Duplicates collapse, so the result is ordered but never
    /// reflects input order.
    pub fn normalize<I>(&self, numbers: I) -> BTreeSet<NormalizedNumber>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut seen = 0usize;
        let mut cleansed = BTreeSet::new();

        for number in numbers {
            seen += 1;
            if let Some(normalized) = self.normalize_one(number.as_ref()) {
                cleansed.insert(normalized);
            }
        }

        if seen == 0 {
            warn!("number list is empty");
        }
        cleansed
    }

    /// Normalize a single number, or `None` (logged) when it is blank or invalid.
    pub fn normalize_one(&self, number: &str) -> Option<NormalizedNumber> {
        let trimmed = number.trim();
        if trimmed.is_empty() {
            debug!(input = number, "skipping empty number");
            return None;
        }

        let cleaned = separator_regex().replace_all(trimmed, "");
        if !number_regex().is_match(&cleaned) {
            warn!(input = number, "number is not valid");
            return None;
        }

        let canonical = if let Some(local) = cleaned.strip_prefix('0') {
            format!("{}{local}", self.country_code.as_str())
        } else if let Some(international) = cleaned.strip_prefix('+') {
            international.to_owned()
        } else {
            cleaned.into_owned()
        };
        Some(NormalizedNumber::from_canonical(canonical))
    }
}
