// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::Serialize;

use crate::{CardId, FilterState, evaluate, parse_price};

/// One product card as read from the page.
///
/// Lowercased keys are computed once so the render pass does not re-fold
/// case on every keystroke.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogItem {
    title: String,
    category: String,
    price: f64,
    #[serde(skip)]
    title_key: String,
    #[serde(skip)]
    category_key: String,
}

impl CatalogItem {
    pub fn new(title: impl Into<String>, category: impl Into<String>, price: f64) -> Self {
        let title = title.into();
        let category = category.into();
        Self {
            title_key: title.to_lowercase(),
            category_key: category.trim().to_lowercase(),
            title,
            category,
            price: if price.is_finite() && price > 0.0 {
                price
            } else {
                0.0
            },
        }
    }

    /// Builds a card from its string attributes. Missing attributes read as
    /// empty strings and the price as `"0"`.
    pub fn from_attributes(
        title: Option<&str>,
        category: Option<&str>,
        price: Option<&str>,
    ) -> Self {
        Self::new(
            title.unwrap_or_default(),
            category.unwrap_or_default(),
            parse_price(price.unwrap_or("0")),
        )
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub(crate) fn title_key(&self) -> &str {
        &self.title_key
    }

    pub(crate) fn category_key(&self) -> &str {
        &self.category_key
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Shown,
    Hidden,
}

impl Visibility {
    pub const fn from_match(matches: bool) -> Self {
        if matches { Self::Shown } else { Self::Hidden }
    }

    pub const fn is_shown(self) -> bool {
        matches!(self, Self::Shown)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderPass {
    pub changed: Vec<CardId>,
    pub visible: usize,
}

impl RenderPass {
    pub fn is_noop(&self) -> bool {
        self.changed.is_empty()
    }
}

/// Applies the filters to every card and writes the resulting visibility.
///
/// Returns the cards whose visibility actually flipped, so a second call with
/// the same state reports nothing.
pub fn render_filters(
    items: &[CatalogItem],
    state: &FilterState,
    visibility: &mut [Visibility],
) -> RenderPass {
    let mut pass = RenderPass::default();
    for (index, (item, slot)) in items.iter().zip(visibility.iter_mut()).enumerate() {
        let next = Visibility::from_match(evaluate(item, state));
        if *slot != next {
            *slot = next;
            pass.changed.push(CardId::new(index));
        }
        if next.is_shown() {
            pass.visible += 1;
        }
    }
    pass
}

/// Distinct trimmed categories in first-seen order, compared case-insensitively.
pub fn distinct_categories(items: &[CatalogItem]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for item in items {
        if item.category_key.is_empty() {
            continue;
        }
        if !seen.iter().any(|known| known.to_lowercase() == item.category_key) {
            seen.push(item.category.trim().to_owned());
        }
    }
    seen
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Catalog {
    items: Vec<CatalogItem>,
    visibility: Vec<Visibility>,
}

impl Catalog {
    pub fn new(items: Vec<CatalogItem>) -> Self {
        if items.is_empty() {
            tracing::warn!("no catalog cards found; filters will be inert");
        }
        let visibility = vec![Visibility::Shown; items.len()];
        Self { items, visibility }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn get(&self, id: CardId) -> Option<&CatalogItem> {
        self.items.get(id.get())
    }

    pub fn visibility(&self, id: CardId) -> Option<Visibility> {
        self.visibility.get(id.get()).copied()
    }

    pub fn visible_ids(&self) -> Vec<CardId> {
        self.visibility
            .iter()
            .enumerate()
            .filter(|(_, visibility)| visibility.is_shown())
            .map(|(index, _)| CardId::new(index))
            .collect()
    }

    pub fn visible_items(&self) -> impl Iterator<Item = (CardId, &CatalogItem)> {
        self.items
            .iter()
            .zip(&self.visibility)
            .enumerate()
            .filter(|(_, (_, visibility))| visibility.is_shown())
            .map(|(index, (item, _))| (CardId::new(index), item))
    }

    pub fn visible_count(&self) -> usize {
        self.visibility.iter().filter(|v| v.is_shown()).count()
    }

    pub fn categories(&self) -> Vec<String> {
        distinct_categories(&self.items)
    }

    pub fn render(&mut self, state: &FilterState) -> RenderPass {
        render_filters(&self.items, state, &mut self.visibility)
    }
}
