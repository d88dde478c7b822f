// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

use crate::CatalogItem;

pub const ALL_GAMES: &str = "All Games";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum PriceBucket {
    All,
    Free,
    Under5,
    Under15,
    /// Bucket names the page does not know about. They never hide a card.
    Unrecognized(String),
}

impl PriceBucket {
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => "all",
            Self::Free => "free",
            Self::Under5 => "lt5",
            Self::Under15 => "lt15",
            Self::Unrecognized(value) => value,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "all" => Some(Self::All),
            "free" => Some(Self::Free),
            "lt5" => Some(Self::Under5),
            "lt15" => Some(Self::Under15),
            _ => None,
        }
    }

    /// Reads a pill attribute. A missing value selects `all`.
    pub fn from_attribute(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") => Self::All,
            Some(raw) => Self::parse(raw).unwrap_or_else(|| Self::Unrecognized(raw.to_owned())),
        }
    }

    pub fn admits(&self, price: f64) -> bool {
        match self {
            Self::All | Self::Unrecognized(_) => true,
            Self::Free => price == 0.0,
            Self::Under5 => price > 0.0 && price < 5.0,
            Self::Under15 => price > 0.0 && price < 15.0,
        }
    }
}

impl From<PriceBucket> for String {
    fn from(value: PriceBucket) -> Self {
        value.as_str().to_owned()
    }
}

impl From<String> for PriceBucket {
    fn from(value: String) -> Self {
        Self::from_attribute(Some(&value))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterState {
    query: String,
    category: String,
    price: PriceBucket,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            query: String::new(),
            category: ALL_GAMES.to_owned(),
            price: PriceBucket::All,
        }
    }
}

impl FilterState {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn price(&self) -> &PriceBucket {
        &self.price
    }

    /// Stores raw search box text as a trimmed, lowercased query.
    pub fn set_query(&mut self, raw: &str) {
        self.query = raw.trim().to_lowercase();
    }

    pub fn set_category(&mut self, value: Option<&str>) {
        self.category = match value.map(str::trim) {
            None | Some("") => ALL_GAMES.to_owned(),
            Some(category) => category.to_owned(),
        };
    }

    pub fn set_price(&mut self, bucket: PriceBucket) {
        self.price = bucket;
    }

    pub fn is_all_categories(&self) -> bool {
        self.category.to_lowercase() == ALL_GAMES.to_lowercase()
    }

    pub fn matches(&self, item: &CatalogItem) -> bool {
        evaluate(item, self)
    }
}

/// Decides whether one card is visible under the given filters.
pub fn evaluate(item: &CatalogItem, state: &FilterState) -> bool {
    if !state.query.is_empty() && !item.title_key().contains(&state.query) {
        return false;
    }
    if !state.is_all_categories() && state.category.to_lowercase() != item.category_key() {
        return false;
    }
    state.price.admits(item.price())
}

/// Lenient price parsing for card attributes.
///
/// Reads the longest leading decimal literal, so `"4.99 USD"` is `4.99`.
/// Anything that does not yield a finite, non-negative number is free.
pub fn parse_price(raw: &str) -> f64 {
    let value = leading_decimal(raw.trim_start())
        .and_then(|literal| literal.parse::<f64>().ok())
        .unwrap_or(0.0);
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

fn leading_decimal(input: &str) -> Option<&str> {
    let bytes = input.as_bytes();
    let digits_from = |start: usize| {
        let mut end = start;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        end
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_end = digits_from(end);
    let mut has_digits = int_end > end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        if frac_end > end + 1 || has_digits {
            has_digits = true;
            end = frac_end;
        }
    }
    if !has_digits {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_start = end + 1;
        if matches!(bytes.get(exp_start), Some(b'+' | b'-')) {
            exp_start += 1;
        }
        let exp_end = digits_from(exp_start);
        if exp_end > exp_start {
            end = exp_end;
        }
    }
    Some(&input[..end])
}
