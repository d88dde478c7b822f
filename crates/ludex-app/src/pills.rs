// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::Serialize;

use crate::{ALL_GAMES, PillId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PillKind {
    Category,
    Price,
}

impl PillKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Price => "price",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pill {
    pub label: String,
    /// The filter value the pill carries; `None` when it has none.
    pub value: Option<String>,
}

impl Pill {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: Some(value.into()),
        }
    }
}

/// A single-select group of pills.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PillGroup {
    kind: PillKind,
    pills: Vec<Pill>,
    active: Option<PillId>,
}

impl PillGroup {
    pub fn new(kind: PillKind, pills: Vec<Pill>) -> Self {
        let active = (!pills.is_empty()).then_some(PillId::new(0));
        Self {
            kind,
            pills,
            active,
        }
    }

    /// "All Games" followed by one pill per category.
    pub fn categories<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut pills = vec![Pill::new(ALL_GAMES, ALL_GAMES)];
        pills.extend(categories.into_iter().map(|category| {
            let category = category.into();
            Pill::new(category.clone(), category)
        }));
        Self::new(PillKind::Category, pills)
    }

    pub fn prices() -> Self {
        Self::new(
            PillKind::Price,
            vec![
                Pill::new("All", "all"),
                Pill::new("Free", "free"),
                Pill::new("Under $5", "lt5"),
                Pill::new("Under $15", "lt15"),
            ],
        )
    }

    pub const fn kind(&self) -> PillKind {
        self.kind
    }

    pub fn pills(&self) -> &[Pill] {
        &self.pills
    }

    pub fn len(&self) -> usize {
        self.pills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pills.is_empty()
    }

    pub const fn active(&self) -> Option<PillId> {
        self.active
    }

    pub fn active_pill(&self) -> Option<&Pill> {
        self.active.and_then(|id| self.pills.get(id.get()))
    }

    pub fn is_active(&self, id: PillId) -> bool {
        self.active == Some(id)
    }

    /// Activates `id` and deactivates its siblings. Returns the selected pill,
    /// or `None` when the group has no such pill.
    pub fn select(&mut self, id: PillId) -> Option<&Pill> {
        let pill = self.pills.get(id.get())?;
        self.active = Some(id);
        Some(pill)
    }

    /// The pill `delta` steps away from the active one, wrapping around.
    pub fn neighbor(&self, delta: isize) -> Option<PillId> {
        if self.pills.is_empty() {
            return None;
        }
        let len = self.pills.len() as isize;
        let current = self.active.map_or(0, |id| id.get()) as isize;
        Some(PillId::new((current + delta).rem_euclid(len) as usize))
    }
}
