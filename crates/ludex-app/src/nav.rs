// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Keeps the side nav and the bottom nav pointing at the same section.
//!
//! A selection in one list is mirrored onto the other by `section` key. When
//! no item in the other list carries that key, the item at the same position
//! is used instead. That positional fallback assumes both lists are ordered
//! alike; nothing checks it.

use serde::Serialize;

use crate::NavItemId;

pub const SECTION_HOME: &str = "home";
pub const SECTION_NOTIFICATIONS: &str = "notifications";
pub const SECTION_WISHLIST: &str = "wishlist";
pub const SECTION_LIBRARY: &str = "library";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NavSide {
    Primary,
    Secondary,
}

impl NavSide {
    pub const fn other(self) -> Self {
        match self {
            Self::Primary => Self::Secondary,
            Self::Secondary => Self::Primary,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub label: String,
    pub section: Option<String>,
    pub active: bool,
    /// `aria-pressed`, for items that carry it.
    pub pressed: Option<bool>,
}

impl NavItem {
    pub fn new(label: impl Into<String>, section: Option<&str>) -> Self {
        Self {
            label: label.into(),
            section: section.map(str::to_owned),
            active: false,
            pressed: None,
        }
    }

    pub fn with_pressed_flag(mut self) -> Self {
        self.pressed = Some(self.active);
        self
    }

    pub fn activated(mut self) -> Self {
        self.set_active(true);
        self
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
        if self.pressed.is_some() {
            self.pressed = Some(active);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct NavList {
    items: Vec<NavItem>,
}

impl NavList {
    pub fn new(items: Vec<NavItem>) -> Self {
        let mut list = Self { items };
        // Markup may mark several items active; keep the first.
        if let Some(first) = list.active() {
            list.activate(first);
        }
        list
    }

    pub fn items(&self) -> &[NavItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: NavItemId) -> Option<&NavItem> {
        self.items.get(id.get())
    }

    pub fn active(&self) -> Option<NavItemId> {
        self.items
            .iter()
            .position(|item| item.active)
            .map(NavItemId::new)
    }

    pub fn active_section(&self) -> Option<&str> {
        self.active()
            .and_then(|id| self.items[id.get()].section.as_deref())
    }

    pub fn find_section(&self, section: &str) -> Option<NavItemId> {
        self.items
            .iter()
            .position(|item| item.section.as_deref() == Some(section))
            .map(NavItemId::new)
    }

    pub fn clear(&mut self) {
        for item in &mut self.items {
            item.set_active(false);
        }
    }

    /// Marks `id` as the only active item. Out-of-range ids only clear.
    pub fn activate(&mut self, id: NavItemId) -> bool {
        self.clear();
        match self.items.get_mut(id.get()) {
            Some(item) => {
                item.set_active(true);
                true
            }
            None => false,
        }
    }

    /// The item in this list that corresponds to a selection at `position`
    /// with `section` in the other list.
    pub fn counterpart(&self, section: Option<&str>, position: NavItemId) -> Option<NavItemId> {
        section
            .and_then(|section| self.find_section(section))
            .or_else(|| (position.get() < self.items.len()).then_some(position))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavSelection {
    pub side: NavSide,
    pub item: NavItemId,
    pub section: Option<String>,
    pub mirrored: Option<NavItemId>,
    pub scroll_to_top: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct NavSync {
    primary: NavList,
    secondary: NavList,
}

impl NavSync {
    pub fn new(primary: NavList, secondary: NavList) -> Self {
        Self { primary, secondary }
    }

    pub fn list(&self, side: NavSide) -> &NavList {
        match side {
            NavSide::Primary => &self.primary,
            NavSide::Secondary => &self.secondary,
        }
    }

    fn list_mut(&mut self, side: NavSide) -> &mut NavList {
        match side {
            NavSide::Primary => &mut self.primary,
            NavSide::Secondary => &mut self.secondary,
        }
    }

    pub fn primary(&self) -> &NavList {
        &self.primary
    }

    pub fn secondary(&self) -> &NavList {
        &self.secondary
    }

    /// Selects an item and mirrors it onto the other list.
    ///
    /// Returns `None` when `item` does not exist; neither list changes then.
    pub fn select(&mut self, side: NavSide, item: NavItemId) -> Option<NavSelection> {
        let section = self.list(side).get(item)?.section.clone();
        self.list_mut(side).activate(item);

        let other = self.list_mut(side.other());
        let mirrored = other.counterpart(section.as_deref(), item);
        match mirrored {
            Some(target) => {
                other.activate(target);
            }
            None => other.clear(),
        }

        let scroll_to_top = section.as_deref() == Some(SECTION_HOME);
        Some(NavSelection {
            side,
            item,
            section,
            mirrored,
            scroll_to_top,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{NavItem, NavList, NavSide, NavSync, SECTION_HOME};
    use crate::NavItemId;

    fn sync() -> NavSync {
        NavSync::new(
            NavList::new(vec![
                NavItem::new("Home", Some("home")).with_pressed_flag(),
                NavItem::new("Notifications", Some("notifications")).with_pressed_flag(),
                NavItem::new("Wishlist", Some("wishlist")).with_pressed_flag(),
                NavItem::new("Settings", None).with_pressed_flag(),
            ]),
            NavList::new(vec![
                NavItem::new("Home", Some("home")).activated(),
                NavItem::new("Wishlist", Some("wishlist")),
                NavItem::new("Alerts", None),
                NavItem::new("Profile", None),
            ]),
        )
    }

    #[test]
    fn list_keeps_only_first_active_item() {
        let list = NavList::new(vec![
            NavItem::new("A", None).activated(),
            NavItem::new("B", None).activated(),
        ]);
        assert_eq!(list.active(), Some(NavItemId::new(0)));
        assert!(!list.items()[1].active);
    }

    #[test]
    fn select_mirrors_by_section_key() {
        let mut nav = sync();
        let selection = nav
            .select(NavSide::Primary, NavItemId::new(2))
            .expect("wishlist exists");
        assert_eq!(selection.mirrored, Some(NavItemId::new(1)));
        assert_eq!(nav.primary().active_section(), Some("wishlist"));
        assert_eq!(nav.secondary().active_section(), Some("wishlist"));
        assert!(!selection.scroll_to_top);
    }

    #[test]
    fn select_falls_back_to_same_position() {
        let mut nav = sync();
        let selection = nav
            .select(NavSide::Primary, NavItemId::new(1))
            .expect("notifications exists");
        assert_eq!(selection.mirrored, Some(NavItemId::new(1)));
        assert_eq!(nav.secondary().active(), Some(NavItemId::new(1)));

        let selection = nav
            .select(NavSide::Secondary, NavItemId::new(3))
            .expect("profile exists");
        assert_eq!(selection.mirrored, Some(NavItemId::new(3)));
        assert_eq!(nav.primary().active(), Some(NavItemId::new(3)));
    }

    #[test]
    fn select_clears_other_list_without_counterpart() {
        let mut nav = NavSync::new(
            NavList::new(vec![
                NavItem::new("Home", Some("home")),
                NavItem::new("Library", Some("library")),
            ]),
            NavList::new(vec![NavItem::new("Home", Some("home")).activated()]),
        );
        let selection = nav
            .select(NavSide::Primary, NavItemId::new(1))
            .expect("library exists");
        assert_eq!(selection.mirrored, None);
        assert_eq!(nav.secondary().active(), None);
    }

    #[test]
    fn pressed_flag_follows_active_where_present() {
        let mut nav = sync();
        nav.select(NavSide::Primary, NavItemId::new(1));
        let flags = nav
            .primary()
            .items()
            .iter()
            .map(|item| item.pressed)
            .collect::<Vec<_>>();
        assert_eq!(flags, vec![Some(false), Some(true), Some(false), Some(false)]);
        assert!(nav.secondary().items().iter().all(|item| item.pressed.is_none()));
    }

    #[test]
    fn home_requests_scroll_and_marks_secondary_home() {
        let mut nav = sync();
        nav.select(NavSide::Secondary, NavItemId::new(1));

        let selection = nav
            .select(NavSide::Primary, NavItemId::new(0))
            .expect("home exists");
        assert!(selection.scroll_to_top);
        assert_eq!(selection.section.as_deref(), Some(SECTION_HOME));
        assert_eq!(nav.secondary().active_section(), Some(SECTION_HOME));
    }

    #[test]
    fn at_most_one_active_item_per_list() {
        let mut nav = sync();
        for index in [0, 3, 1, 2, 2] {
            nav.select(NavSide::Primary, NavItemId::new(index));
            for side in [NavSide::Primary, NavSide::Secondary] {
                let active = nav.list(side).items().iter().filter(|i| i.active).count();
                assert!(active <= 1, "{side:?} has {active} active items");
            }
        }
    }

    #[test]
    fn unknown_item_changes_nothing() {
        let mut nav = sync();
        let before = nav.clone();
        assert!(nav.select(NavSide::Primary, NavItemId::new(42)).is_none());
        assert_eq!(nav, before);
    }
}
