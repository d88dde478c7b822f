// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, bail};
use ludex_app::{
    AppSettings, AppState, CatalogItem, RecoveryService, StorefrontLayout, Viewport,
};
use std::path::PathBuf;

const CATEGORIES: [&str; 8] = [
    "Action",
    "Adventure",
    "Puzzle",
    "Racing",
    "RPG",
    "Simulation",
    "Sports",
    "Strategy",
];

const TITLE_ADJECTIVES: [&str; 14] = [
    "Crimson", "Silent", "Neon", "Hollow", "Iron", "Lost", "Frozen", "Wild", "Pixel", "Shattered",
    "Golden", "Endless", "Midnight", "Savage",
];

const TITLE_NOUNS: [&str; 14] = [
    "Frontier", "Citadel", "Odyssey", "Kingdom", "Circuit", "Harbor", "Dungeon", "Galaxy",
    "Orchard", "Arena", "Labyrinth", "Outpost", "Rally", "Tides",
];

const TITLE_SUFFIXES: [&str; 6] = ["", " II", " Remastered", " Deluxe", ": Origins", " Online"];

/// Prices as they appear on storefront cards, free titles included.
const PRICE_POINTS: [&str; 10] = [
    "0", "0.99", "2.49", "4.99", "5", "7.99", "9.99", "14.99", "19.99", "59.99",
];

const EMAIL_NAMES: [&str; 10] = [
    "avery", "jordan", "taylor", "riley", "morgan", "casey", "quinn", "parker", "rowan", "kai",
];
const EMAIL_DOMAINS: [&str; 4] = ["example.com", "example.org", "mail.test", "games.test"];

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }
}

/// Seeded generator for storefront fixtures.
#[derive(Debug, Clone)]
pub struct GameFaker {
    rng: DeterministicRng,
    seed: u64,
}

impl GameFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
            seed: normalized,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn int_n(&mut self, n: usize) -> usize {
        self.rng.int_n(n)
    }

    pub fn title(&mut self) -> String {
        format!(
            "{} {}{}",
            self.pick(&TITLE_ADJECTIVES),
            self.pick(&TITLE_NOUNS),
            self.pick(&TITLE_SUFFIXES)
        )
    }

    pub fn category(&mut self) -> &'static str {
        self.pick(&CATEGORIES)
    }

    /// A price attribute string, as a card would carry it.
    pub fn price_attribute(&mut self) -> &'static str {
        self.pick(&PRICE_POINTS)
    }

    pub fn game(&mut self) -> CatalogItem {
        let title = self.title();
        let category = self.category();
        let price = self.price_attribute();
        CatalogItem::from_attributes(Some(&title), Some(category), Some(price))
    }

    pub fn games(&mut self, count: usize) -> Vec<CatalogItem> {
        (0..count).map(|_| self.game()).collect()
    }

    pub fn email(&mut self) -> String {
        format!(
            "{}{}@{}",
            self.pick(&EMAIL_NAMES),
            self.int_n(100),
            self.pick(&EMAIL_DOMAINS)
        )
    }

    /// A numeric reset code of 4 to 6 digits.
    pub fn reset_code(&mut self) -> String {
        let digits = 4 + self.int_n(3);
        (0..digits)
            .map(|_| char::from(b'0' + self.int_n(10) as u8))
            .collect()
    }

    fn pick<T: Copy>(&mut self, items: &[T]) -> T {
        items[self.rng.int_n(items.len())]
    }
}

/// Cards sitting on every price bucket boundary, plus one unparseable price.
pub fn boundary_price_catalog() -> Vec<CatalogItem> {
    [
        ("Free Fall", "Action", "0"),
        ("Penny Drop", "Puzzle", "4.99"),
        ("Five Alive", "Puzzle", "5"),
        ("Almost Fifteen", "Strategy", "14.99"),
        ("Exactly Fifteen", "Strategy", "15"),
        ("Mystery Box", "Action", "abc"),
    ]
    .into_iter()
    .map(|(title, category, price)| {
        CatalogItem::from_attributes(Some(title), Some(category), Some(price))
    })
    .collect()
}

/// A small hand-picked catalog with mixed-case categories.
pub fn sample_catalog() -> Vec<CatalogItem> {
    vec![
        CatalogItem::new("Starfall Tactics", "Strategy", 9.99),
        CatalogItem::new("Pocket Golf", "Sports", 0.0),
        CatalogItem::new("Blade Rush", "Action", 4.99),
        CatalogItem::new("Iron Citadel", "strategy", 24.0),
        CatalogItem::new("Neon Rally", "Racing", 14.99),
    ]
}

/// An app state over `cards` with default settings at `width` pixels.
pub fn storefront(cards: Vec<CatalogItem>, width: u32) -> AppState {
    AppState::new(
        StorefrontLayout::standard(cards),
        AppSettings::default(),
        Viewport::new(width),
    )
}

/// Records every recovery call; can be told to fail either step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingRecovery {
    pub codes_sent_to: Vec<String>,
    pub resets: Vec<(String, String)>,
    pub fail_send: bool,
    pub fail_reset: bool,
}

impl RecoveryService for RecordingRecovery {
    fn send_reset_code(&mut self, email: &str) -> Result<()> {
        if self.fail_send {
            bail!("mail service unavailable -- try again in a minute");
        }
        self.codes_sent_to.push(email.to_owned());
        Ok(())
    }

    fn reset_password(&mut self, code: &str, new_password: &str) -> Result<()> {
        if self.fail_reset {
            bail!("reset code expired -- request a new code and retry");
        }
        self.resets.push((code.to_owned(), new_password.to_owned()));
        Ok(())
    }
}

pub fn temp_config_path() -> Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir().context("create temp dir")?;
    let path = dir.path().join("config.toml");
    Ok((dir, path))
}

pub fn temp_catalog_path() -> Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir().context("create temp dir")?;
    let path = dir.path().join("catalog.toml");
    Ok((dir, path))
}

pub fn categories() -> &'static [&'static str] {
    &CATEGORIES
}

pub fn price_points() -> &'static [&'static str] {
    &PRICE_POINTS
}
