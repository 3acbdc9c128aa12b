//! User query construction and validation.
//!
//! Raw user input (a city and some combination of price, min-price and
//! max-price) is checked here before it gets anywhere near the filter. The
//! outcome is either an immutable `UserQuery` or a `QueryError` whose
//! message says exactly what was wrong.

use std::collections::BTreeSet;
use thiserror::Error;

/// Maximum number of candidate cities listed in an "unknown city" message.
const CITY_PREVIEW_LIMIT: usize = 10;

/// Reasons user input can be rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    #[error("City cannot be empty.")]
    EmptyCity,

    #[error("City '{city}' not found in dataset. Choose from: {choices}")]
    UnknownCity { city: String, choices: String },

    #[error("Price (or max-price) is required.")]
    PriceRequired,

    #[error("Price must be a valid number.")]
    InvalidPrice,

    #[error("Price must be positive.")]
    NonPositivePrice,

    #[error("Min price must be a valid number.")]
    InvalidMinPrice,

    #[error("Min price cannot be negative.")]
    NegativeMinPrice,

    #[error("Min price cannot be greater than max price.")]
    MinAboveMax,
}

pub type Result<T> = std::result::Result<T, QueryError>;

// =============================================================================
// Prices
// =============================================================================

/// A price as the user supplied it: already numeric, or still text.
#[derive(Debug, Clone, PartialEq)]
pub enum PriceInput {
    Number(f64),
    Text(String),
}

impl From<f64> for PriceInput {
    fn from(value: f64) -> Self {
        PriceInput::Number(value)
    }
}

impl From<i32> for PriceInput {
    fn from(value: i32) -> Self {
        PriceInput::Number(f64::from(value))
    }
}

impl From<&str> for PriceInput {
    fn from(value: &str) -> Self {
        PriceInput::Text(value.to_string())
    }
}

impl From<String> for PriceInput {
    fn from(value: String) -> Self {
        PriceInput::Text(value)
    }
}

/// Parse a price into a number.
///
/// Numbers pass straight through; text is trimmed and stripped of commas.
/// Anything that is not a finite number comes back as `None`.
///
/// Unlike cost parsing there is no range handling: "-100" is a negative
/// price, not the range "up to 100".
pub fn parse_price(input: impl Into<PriceInput>) -> Option<f64> {
    let value = match input.into() {
        PriceInput::Number(n) => n,
        PriceInput::Text(text) => {
            let cleaned = text.trim().replace(',', "");
            if cleaned.is_empty() {
                return None;
            }
            cleaned.parse::<f64>().ok()?
        }
    };
    value.is_finite().then_some(value)
}

/// Validated price bounds: `(max, min)`.
fn resolve_prices(
    price: Option<&PriceInput>,
    min_price: Option<&PriceInput>,
    max_price: Option<&PriceInput>,
) -> Result<(f64, Option<f64>)> {
    // max-price wins over price when both are given
    let max_input = max_price.or(price).ok_or(QueryError::PriceRequired)?;
    let max = parse_price(max_input.clone()).ok_or(QueryError::InvalidPrice)?;
    if max <= 0.0 {
        return Err(QueryError::NonPositivePrice);
    }

    let min = match min_price {
        None => None,
        Some(input) => {
            let min = parse_price(input.clone()).ok_or(QueryError::InvalidMinPrice)?;
            if min < 0.0 {
                return Err(QueryError::NegativeMinPrice);
            }
            if min > max {
                return Err(QueryError::MinAboveMax);
            }
            Some(min)
        }
    };

    Ok((max, min))
}

/// Validate a price or price range.
///
/// The effective maximum is `max_price` if given, otherwise `price`.
pub fn validate_price(
    price: Option<&PriceInput>,
    min_price: Option<&PriceInput>,
    max_price: Option<&PriceInput>,
) -> Result<()> {
    resolve_prices(price, min_price, max_price).map(|_| ())
}

// =============================================================================
// Cities
// =============================================================================

/// Case-insensitive set of cities a query may name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowedCities {
    folded: BTreeSet<String>,
}

impl AllowedCities {
    /// Build the set from city labels. Labels are trimmed and case-folded;
    /// blank ones are skipped.
    pub fn new<I, S>(cities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let folded = cities
            .into_iter()
            .map(|c| c.as_ref().trim().to_lowercase())
            .filter(|c| !c.is_empty())
            .collect();
        Self { folded }
    }

    pub fn contains(&self, city: &str) -> bool {
        self.folded.contains(&city.trim().to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.folded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.folded.is_empty()
    }

    /// Alphabetical list of up to `limit` cities, with "..." when cut short.
    pub fn preview(&self, limit: usize) -> String {
        let shown: Vec<&str> = self.folded.iter().take(limit).map(String::as_str).collect();
        let mut preview = shown.join(", ");
        if self.folded.len() > limit {
            preview.push_str("...");
        }
        preview
    }
}

impl<S: AsRef<str>> FromIterator<S> for AllowedCities {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// Validate a city, optionally against a known set of cities.
pub fn validate_city(city: Option<&str>, allowed_cities: Option<&AllowedCities>) -> Result<()> {
    let city = city.map(str::trim).filter(|c| !c.is_empty()).ok_or(QueryError::EmptyCity)?;

    if let Some(allowed) = allowed_cities {
        if !allowed.contains(city) {
            return Err(QueryError::UnknownCity {
                city: city.to_string(),
                choices: allowed.preview(CITY_PREVIEW_LIMIT),
            });
        }
    }
    Ok(())
}

// =============================================================================
// UserQuery
// =============================================================================

/// A validated, immutable city + budget request.
///
/// Fields are private so the invariants checked in `new` hold for the
/// lifetime of the value.
#[derive(Debug, Clone, PartialEq)]
pub struct UserQuery {
    city: String,
    price_max: f64,
    price_min: Option<f64>,
}

impl UserQuery {
    /// Create a query, enforcing: non-empty city (stored trimmed), positive
    /// finite max, and a min (when present) in `0..=max`.
    pub fn new(city: &str, price_max: f64, price_min: Option<f64>) -> Result<Self> {
        let city = city.trim();
        if city.is_empty() {
            return Err(QueryError::EmptyCity);
        }
        if !price_max.is_finite() {
            return Err(QueryError::InvalidPrice);
        }
        if price_max <= 0.0 {
            return Err(QueryError::NonPositivePrice);
        }
        if let Some(min) = price_min {
            if !min.is_finite() {
                return Err(QueryError::InvalidMinPrice);
            }
            if min < 0.0 {
                return Err(QueryError::NegativeMinPrice);
            }
            if min > price_max {
                return Err(QueryError::MinAboveMax);
            }
        }

        Ok(Self {
            city: city.to_string(),
            price_max,
            price_min,
        })
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn price_max(&self) -> f64 {
        self.price_max
    }

    pub fn price_min(&self) -> Option<f64> {
        self.price_min
    }

    /// City in the form used for matching (trimmed, lowercase).
    pub fn normalized_city(&self) -> String {
        self.city.to_lowercase()
    }
}

/// Everything a caller collected for a query, before validation.
///
/// ## Usage
/// ```ignore
/// let query = QueryRequest::new("Koramangala")
///     .min_price(300)
///     .max_price(800)
///     .build()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct QueryRequest {
    pub city: Option<String>,
    pub price: Option<PriceInput>,
    pub min_price: Option<PriceInput>,
    pub max_price: Option<PriceInput>,
    pub allowed_cities: Option<AllowedCities>,
}

impl QueryRequest {
    pub fn new(city: impl Into<String>) -> Self {
        Self {
            city: Some(city.into()),
            ..Self::default()
        }
    }

    pub fn price(mut self, price: impl Into<PriceInput>) -> Self {
        self.price = Some(price.into());
        self
    }

    pub fn min_price(mut self, min_price: impl Into<PriceInput>) -> Self {
        self.min_price = Some(min_price.into());
        self
    }

    pub fn max_price(mut self, max_price: impl Into<PriceInput>) -> Self {
        self.max_price = Some(max_price.into());
        self
    }

    pub fn allowed_cities(mut self, allowed: AllowedCities) -> Self {
        self.allowed_cities = Some(allowed);
        self
    }

    /// Validate and build the query. See [`build_query`].
    pub fn build(&self) -> Result<UserQuery> {
        build_query(self)
    }
}

/// Validate city and price and return a `UserQuery`.
///
/// Checks run in order (city, then prices) and the first failure is
/// returned as-is, so the error names the specific problem.
pub fn build_query(request: &QueryRequest) -> Result<UserQuery> {
    let city = request.city.as_deref();
    validate_city(city, request.allowed_cities.as_ref())?;

    let (price_max, price_min) = resolve_prices(
        request.price.as_ref(),
        request.min_price.as_ref(),
        request.max_price.as_ref(),
    )?;

    UserQuery::new(city.unwrap_or_default(), price_max, price_min)
}
