//! Display metadata and its normalization from raw TMDB responses.
//!
//! Every field of the TMDB movie-details response is optional. Each one is
//! defaulted independently, so a response with a title but no poster still
//! produces a useful record.

use serde::Deserialize;
use serde_json::Value;
use std::fmt;

pub const POSTER_SIZE: &str = "w500";
pub const NO_IMAGE_URL: &str = "https://via.placeholder.com/500x750?text=No+Image";
pub const ERROR_IMAGE_URL: &str = "https://via.placeholder.com/500x750?text=Error";
pub const UNKNOWN_TITLE: &str = "Unknown Title";
pub const NO_OVERVIEW: &str = "No overview available.";
pub const FETCH_FAILED_OVERVIEW: &str = "Could not fetch details.";
pub const NOT_AVAILABLE: &str = "N/A";

/// Overviews longer than this many characters are truncated
pub const MAX_OVERVIEW_CHARS: usize = 190;
const ELLIPSIS: &str = "...";

// =============================================================================
// Raw provider response
// =============================================================================

/// The subset of TMDB's `GET /movie/{id}` response we read.
///
/// `vote_average` is kept as a raw JSON value so non-numeric values can be
/// passed through instead of failing the whole response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbMovie {
    pub poster_path: Option<String>,
    pub title: Option<String>,
    pub overview: Option<String>,
    pub vote_average: Option<Value>,
    pub release_date: Option<String>,
}

// =============================================================================
// Normalized record
// =============================================================================

/// Audience rating as displayed
#[derive(Debug, Clone, PartialEq)]
pub enum Rating {
    /// Vote average rounded to one decimal, 0 to 10
    Score(f64),
    /// Non-numeric value from the provider, passed through untouched
    Other(String),
    /// No rating could be fetched
    Unavailable,
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rating::Score(score) => write!(f, "{:.1}", score),
            Rating::Other(raw) => f.write_str(raw),
            Rating::Unavailable => f.write_str(NOT_AVAILABLE),
        }
    }
}

/// Normalized display metadata for one movie
#[derive(Debug, Clone, PartialEq)]
pub struct MovieDetails {
    pub poster_url: String,
    pub title: String,
    /// At most 190 characters
    pub overview: String,
    pub rating: Rating,
    /// Four-digit release year, or "N/A"
    pub year: String,
}

impl MovieDetails {
    /// Build a record from a provider response.
    ///
    /// `image_base_url` is the image CDN root; posters use the w500 size.
    pub fn from_response(movie: TmdbMovie, image_base_url: &str) -> Self {
        let poster_url = match non_empty(movie.poster_path) {
            Some(path) => format!("{}/{}{}", image_base_url, POSTER_SIZE, path),
            None => NO_IMAGE_URL.to_string(),
        };

        let title = non_empty(movie.title).unwrap_or_else(|| UNKNOWN_TITLE.to_string());
        let overview = non_empty(movie.overview).unwrap_or_else(|| NO_OVERVIEW.to_string());

        let year = match non_empty(movie.release_date) {
            Some(date) => date.split('-').next().unwrap_or_default().to_string(),
            None => NOT_AVAILABLE.to_string(),
        };

        Self {
            poster_url,
            title,
            overview: truncate_overview(overview),
            rating: normalize_rating(movie.vote_average),
            year,
        }
    }

    /// The fixed record returned whenever fetching fails
    pub fn error_sentinel() -> Self {
        Self {
            poster_url: ERROR_IMAGE_URL.to_string(),
            title: UNKNOWN_TITLE.to_string(),
            overview: FETCH_FAILED_OVERVIEW.to_string(),
            rating: Rating::Unavailable,
            year: NOT_AVAILABLE.to_string(),
        }
    }

    pub fn is_error_sentinel(&self) -> bool {
        *self == Self::error_sentinel()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// Cut to 187 characters plus "..." when longer than 190 characters
fn truncate_overview(overview: String) -> String {
    if overview.chars().count() <= MAX_OVERVIEW_CHARS {
        return overview;
    }
    let keep = MAX_OVERVIEW_CHARS - ELLIPSIS.len();
    let mut truncated: String = overview.chars().take(keep).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}

/// Missing and falsy values count as 0; `true` counts as 1
fn normalize_rating(vote_average: Option<Value>) -> Rating {
    match vote_average {
        None | Some(Value::Null) | Some(Value::Bool(false)) => Rating::Score(0.0),
        Some(Value::Bool(true)) => Rating::Score(1.0),
        Some(Value::Number(n)) => match n.as_f64() {
            Some(score) => Rating::Score(round_to_tenth(score)),
            None => Rating::Other(n.to_string()),
        },
        Some(Value::String(s)) if s.is_empty() => Rating::Score(0.0),
        Some(Value::Array(items)) if items.is_empty() => Rating::Score(0.0),
        Some(Value::Object(fields)) if fields.is_empty() => Rating::Score(0.0),
        Some(Value::String(s)) => Rating::Other(s),
        Some(other) => Rating::Other(other.to_string()),
    }
}

/// Correctly rounded to one decimal, ties to even on the stored value
fn round_to_tenth(score: f64) -> f64 {
    format!("{:.1}", score).parse().unwrap_or(score)
}
