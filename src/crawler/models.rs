use clap::ValueEnum;

use crate::error::ScrapeError;

/// The site's two search modes, matching its URL path segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PaymentType {
    Kaufen,
    Mieten,
}

impl PaymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentType::Kaufen => "kaufen",
            PaymentType::Mieten => "mieten",
        }
    }
}

/// A validated, normalized search request. Immutable once constructed.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub city: String,
    pub payment_type: PaymentType,
    pub page_limit: Option<u32>,
}

impl SearchQuery {
    /// Validates the raw city name and normalizes it into the form the site
    /// expects in its URLs: lowercase, umlauts transliterated.
    pub fn new(
        city: &str,
        payment_type: PaymentType,
        page_limit: Option<u32>,
    ) -> Result<Self, ScrapeError> {
        if city.is_empty() || !city.chars().all(char::is_alphabetic) {
            return Err(ScrapeError::validation(
                "city",
                "must only contain alphabetic characters",
            ));
        }

        Ok(Self {
            city: transliterate_city(city),
            payment_type,
            page_limit,
        })
    }

    pub fn results_url(&self, base_url: &str) -> String {
        format!(
            "{}/suche/{}/wohnungen/{}?d=true&sd=DESC&sf=TIMESTAMP",
            base_url,
            self.city,
            self.payment_type.as_str()
        )
    }

    pub fn page_url(&self, base_url: &str, page: u32) -> String {
        format!("{}&sp={}", self.results_url(base_url), page)
    }

    pub fn output_filename(&self) -> String {
        format!("immowelt_{}_{}.csv", self.city, self.payment_type.as_str())
    }
}

fn transliterate_city(city: &str) -> String {
    let mut out = String::with_capacity(city.len());
    for c in city.to_lowercase().chars() {
        match c {
            'ä' => out.push_str("ae"),
            'ü' => out.push_str("ue"),
            'ö' => out.push_str("oe"),
            'ß' => out.push_str("ss"),
            other => out.push(other),
        }
    }
    out
}

/// One extracted value, numeric for the fields the site renders as German
/// decimals and raw text for everything else.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Number(n) => write!(f, "{}", n),
        }
    }
}

/// A (field name, field value) extracted from one markup block, before any
/// schema filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldPair {
    pub name: String,
    pub value: FieldValue,
}

impl FieldPair {
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: FieldValue::Text(value.into()),
        }
    }

    pub fn number(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value: FieldValue::Number(value),
        }
    }
}
