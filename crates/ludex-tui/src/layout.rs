// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Screen regions and pointer hit-testing. Pure functions of the terminal
//! area and app state, shared by the renderer and the mouse handler.

use ludex_app::{AppState, ClickTarget, NavItemId, NavSide, PillId, PillKind};
use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub const MENU_LABEL: &str = "[≡]";
pub const CLEAR_LABEL: &str = "[x]";
pub const CART_LABEL: &str = "[cart]";
pub const DRAWER_COLUMNS: u16 = 28;

pub fn pill_label(label: &str) -> String {
    format!("[{label}]")
}

fn label_width(label: &str) -> u16 {
    u16::try_from(label.chars().count()).unwrap_or(u16::MAX)
}

fn contains(rect: Rect, column: u16, row: u16) -> bool {
    rect.width > 0
        && rect.height > 0
        && column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Regions {
    pub top_bar: Rect,
    pub menu_button: Rect,
    pub search: Rect,
    pub clear_search: Rect,
    pub cart: Rect,
    pub category_pills: Vec<Rect>,
    pub price_pills: Vec<Rect>,
    pub cards: Rect,
    pub bottom_nav: Rect,
    pub bottom_nav_items: Vec<Rect>,
    pub status: Rect,
    pub drawer: Option<Rect>,
    pub drawer_close: Option<Rect>,
    pub drawer_items: Vec<Rect>,
    pub overlay: Option<Rect>,
}

impl Regions {
    pub fn compute(area: Rect, state: &AppState) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(2),
                Constraint::Min(1),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(area);

        let top_bar = rows[0];
        let row = top_bar.y.saturating_add(1);
        let left = top_bar.x.saturating_add(1);
        let right = top_bar.x.saturating_add(top_bar.width.saturating_sub(1));

        let menu_button = Rect::new(left, row, label_width(MENU_LABEL), 1);
        let cart_width = label_width(CART_LABEL);
        let cart = Rect::new(right.saturating_sub(cart_width), row, cart_width, 1);
        let clear_width = label_width(CLEAR_LABEL);
        let clear_search = Rect::new(
            cart.x.saturating_sub(clear_width + 1),
            row,
            clear_width,
            1,
        );
        let search_x = menu_button.x + menu_button.width + 1;
        let search = Rect::new(
            search_x,
            row,
            clear_search.x.saturating_sub(search_x + 1),
            1,
        );

        let pills = rows[1];
        let category_pills = pill_row(
            pills,
            pills.y,
            state.pills(PillKind::Category).pills().iter().map(|p| p.label.as_str()),
        );
        let price_pills = pill_row(
            pills,
            pills.y.saturating_add(1),
            state.pills(PillKind::Price).pills().iter().map(|p| p.label.as_str()),
        );

        let bottom_nav = rows[3];
        let bottom_nav_items = split_evenly(
            Rect::new(
                bottom_nav.x.saturating_add(1),
                bottom_nav.y.saturating_add(1),
                bottom_nav.width.saturating_sub(2),
                1,
            ),
            state.nav().secondary().len(),
        );

        let (drawer, drawer_close, drawer_items, overlay) = if state.sidebar().is_open() {
            let width = DRAWER_COLUMNS.min(area.width);
            let drawer = Rect::new(area.x, area.y, width, area.height);
            let close = Rect::new(
                (drawer.x + drawer.width).saturating_sub(clear_width + 1),
                drawer.y,
                clear_width,
                1,
            );
            let usable = usize::from(drawer.height.saturating_sub(2));
            let items = (0..state.nav().primary().len().min(usable))
                .map(|index| {
                    Rect::new(
                        drawer.x + 1,
                        drawer.y + 1 + index as u16,
                        drawer.width.saturating_sub(2),
                        1,
                    )
                })
                .collect();
            let overlay = Rect::new(
                drawer.x + drawer.width,
                area.y,
                area.width.saturating_sub(drawer.width),
                area.height,
            );
            (Some(drawer), Some(close), items, Some(overlay))
        } else {
            (None, None, Vec::new(), None)
        };

        Self {
            top_bar,
            menu_button,
            search,
            clear_search,
            cart,
            category_pills,
            price_pills,
            cards: rows[2],
            bottom_nav,
            bottom_nav_items,
            status: rows[4],
            drawer,
            drawer_close,
            drawer_items,
            overlay,
        }
    }

    pub fn hit(&self, column: u16, row: u16) -> Hit {
        if self
            .drawer_close
            .is_some_and(|close| contains(close, column, row))
        {
            return Hit::DrawerClose;
        }
        if let Some(index) = position_of(&self.drawer_items, column, row) {
            return Hit::Nav(NavSide::Primary, NavItemId::new(index));
        }
        if self.drawer.is_some_and(|drawer| contains(drawer, column, row)) {
            return Hit::Drawer;
        }
        if self.overlay.is_some_and(|overlay| contains(overlay, column, row)) {
            return Hit::Overlay;
        }
        if contains(self.menu_button, column, row) {
            return Hit::MenuButton;
        }
        if contains(self.clear_search, column, row) {
            return Hit::ClearSearch;
        }
        if contains(self.cart, column, row) {
            return Hit::Cart;
        }
        if contains(self.search, column, row) {
            return Hit::Search;
        }
        if let Some(index) = position_of(&self.category_pills, column, row) {
            return Hit::Pill(PillKind::Category, PillId::new(index));
        }
        if let Some(index) = position_of(&self.price_pills, column, row) {
            return Hit::Pill(PillKind::Price, PillId::new(index));
        }
        if let Some(index) = position_of(&self.bottom_nav_items, column, row) {
            return Hit::Nav(NavSide::Secondary, NavItemId::new(index));
        }
        Hit::Nothing
    }
}

/// What a pointer press landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    MenuButton,
    Search,
    ClearSearch,
    Cart,
    Pill(PillKind, PillId),
    Nav(NavSide, NavItemId),
    Drawer,
    DrawerClose,
    Overlay,
    Nothing,
}

impl Hit {
    pub const fn click_target(self) -> ClickTarget {
        match self {
            Self::MenuButton => ClickTarget::MenuButton,
            Self::DrawerClose => ClickTarget::CloseButton,
            Self::Drawer | Self::Nav(NavSide::Primary, _) => ClickTarget::Sidebar,
            Self::Overlay => ClickTarget::Overlay,
            Self::Search
            | Self::ClearSearch
            | Self::Cart
            | Self::Pill(..)
            | Self::Nav(NavSide::Secondary, _)
            | Self::Nothing => ClickTarget::Outside,
        }
    }
}

fn position_of(rects: &[Rect], column: u16, row: u16) -> Option<usize> {
    rects.iter().position(|rect| contains(*rect, column, row))
}

fn pill_row<'a>(area: Rect, row: u16, labels: impl Iterator<Item = &'a str>) -> Vec<Rect> {
    let end = area.x.saturating_add(area.width);
    let mut x = area.x;
    labels
        .map(|label| {
            let width = label_width(&pill_label(label)).min(end.saturating_sub(x));
            let rect = Rect::new(x, row, width, 1);
            x = x.saturating_add(width + 1).min(end);
            rect
        })
        .collect()
}

fn split_evenly(area: Rect, count: usize) -> Vec<Rect> {
    if count == 0 {
        return Vec::new();
    }
    let count_u16 = u16::try_from(count).unwrap_or(u16::MAX);
    let width = area.width / count_u16;
    (0..count_u16)
        .map(|index| Rect::new(area.x + index * width, area.y, width, area.height))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{Hit, Regions};
    use ludex_app::{AppCommand, ClickTarget, NavItemId, NavSide, PillId, PillKind};
    use ludex_testkit::{sample_catalog, storefront};
    use ratatui::layout::Rect;

    const AREA: Rect = Rect {
        x: 0,
        y: 0,
        width: 140,
        height: 40,
    };

    #[test]
    fn top_bar_controls_do_not_overlap() {
        let state = storefront(sample_catalog(), 1120);
        let regions = Regions::compute(AREA, &state);
        assert_eq!(regions.hit(1, 1), Hit::MenuButton);
        assert_eq!(regions.hit(regions.search.x + 2, 1), Hit::Search);
        assert_eq!(regions.hit(regions.clear_search.x, 1), Hit::ClearSearch);
        assert_eq!(regions.hit(regions.cart.x + 1, 1), Hit::Cart);
        assert!(regions.search.x + regions.search.width < regions.clear_search.x);
    }

    #[test]
    fn pills_are_hit_by_row_and_offset() {
        let state = storefront(sample_catalog(), 1120);
        let regions = Regions::compute(AREA, &state);
        let second = regions.category_pills[1];
        assert_eq!(
            regions.hit(second.x, second.y),
            Hit::Pill(PillKind::Category, PillId::new(1))
        );
        let free = regions.price_pills[1];
        assert_eq!(
            regions.hit(free.x + 1, free.y),
            Hit::Pill(PillKind::Price, PillId::new(1))
        );
    }

    #[test]
    fn bottom_nav_items_split_the_row() {
        let state = storefront(sample_catalog(), 1120);
        let regions = Regions::compute(AREA, &state);
        assert_eq!(regions.bottom_nav_items.len(), 4);
        let last = regions.bottom_nav_items[3];
        assert_eq!(
            regions.hit(last.x, last.y),
            Hit::Nav(NavSide::Secondary, NavItemId::new(3))
        );
    }

    #[test]
    fn open_drawer_covers_content_with_overlay() {
        let mut state = storefront(sample_catalog(), 1120);
        state.dispatch(AppCommand::OpenSidebar);
        let regions = Regions::compute(AREA, &state);

        let close = regions.drawer_close.expect("close button");
        assert_eq!(regions.hit(close.x, close.y), Hit::DrawerClose);
        assert_eq!(
            regions.hit(2, 2),
            Hit::Nav(NavSide::Primary, NavItemId::new(1))
        );
        assert_eq!(regions.hit(2, 30), Hit::Drawer);
        assert_eq!(regions.hit(100, 1), Hit::Overlay);
        assert_eq!(regions.hit(100, 1).click_target(), ClickTarget::Overlay);
    }

    #[test]
    fn closed_drawer_has_no_overlay() {
        let state = storefront(sample_catalog(), 1120);
        let regions = Regions::compute(AREA, &state);
        assert!(regions.drawer.is_none() && regions.overlay.is_none());
        assert_eq!(regions.hit(60, 20).click_target(), ClickTarget::Outside);
    }
}
