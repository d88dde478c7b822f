// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Catalog files: a list of `[[card]]` tables whose fields are read the way
//! card attributes are, so prices stay strings until the lenient parse.

use anyhow::{Context, Result, bail};
use ludex_app::CatalogItem;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    card: Vec<CardEntry>,
}

#[derive(Debug, Deserialize)]
struct CardEntry {
    title: Option<String>,
    category: Option<String>,
    price: Option<toml::Value>,
}

pub fn load_catalog(path: &Path) -> Result<Vec<CatalogItem>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read catalog file {}", path.display()))?;
    parse_catalog(&raw).with_context(|| format!("load catalog {}", path.display()))
}

pub fn parse_catalog(raw: &str) -> Result<Vec<CatalogItem>> {
    let file: CatalogFile = toml::from_str(raw).context("parse TOML catalog")?;
    file.card
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            let price = match entry.price {
                None => None,
                Some(toml::Value::String(text)) => Some(text),
                Some(toml::Value::Integer(value)) => Some(value.to_string()),
                Some(toml::Value::Float(value)) => Some(value.to_string()),
                Some(other) => bail!(
                    "card {} has a {} price; write it as a string such as \"4.99\"",
                    index + 1,
                    other.type_str()
                ),
            };
            Ok(CatalogItem::from_attributes(
                entry.title.as_deref(),
                entry.category.as_deref(),
                price.as_deref(),
            ))
        })
        .collect()
}

/// The catalog shown with `--demo` or when no catalog file is configured.
pub fn demo_catalog() -> Vec<CatalogItem> {
    [
        ("Starfall Tactics", "Strategy", "9.99"),
        ("Pocket Golf", "Sports", "0"),
        ("Blade Rush", "Action", "4.99"),
        ("Iron Citadel", "Strategy", "24.99"),
        ("Neon Rally", "Racing", "14.99"),
        ("Moss & Mirrors", "Puzzle", "2.99"),
        ("Hollow Tides", "Adventure", "19.99"),
        ("Courtside Legends", "Sports", "5"),
        ("Cinder Vale", "RPG", "39.99"),
        ("Tiny Farmstead", "Simulation", "0"),
        ("Circuit Breakers", "Puzzle", "0.99"),
        ("Last Outpost", "Action", "12.49"),
    ]
    .into_iter()
    .map(|(title, category, price)| {
        CatalogItem::from_attributes(Some(title), Some(category), Some(price))
    })
    .collect()
}
