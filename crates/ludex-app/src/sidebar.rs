// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::Serialize;

pub const DESKTOP_MIN_WIDTH: u32 = 900;

/// Viewport width in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Viewport {
    pub width: u32,
}

impl Viewport {
    pub const fn new(width: u32) -> Self {
        Self { width }
    }

    /// A terminal of `columns` cells, each `column_px` logical pixels wide.
    pub const fn from_columns(columns: u16, column_px: u32) -> Self {
        Self {
            width: (columns as u32).saturating_mul(column_px),
        }
    }

    pub const fn is_desktop(self, breakpoint: u32) -> bool {
        self.width >= breakpoint
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SidebarState {
    #[default]
    Closed,
    Open,
}

/// Where a pointer click landed, relative to the drawer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Sidebar,
    CloseButton,
    MenuButton,
    Overlay,
    Outside,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarInput {
    Open,
    Close,
    Toggle,
    MenuButton,
    Click(ClickTarget),
    Escape,
    /// The viewport already carries the new width.
    Resized,
    NavItemSelected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarOutcome {
    Opened,
    Closed,
    Unchanged,
    /// Menu pressed below the breakpoint: flash the button, keep the drawer shut.
    MenuRefused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SidebarSettings {
    pub desktop_min_width: u32,
    pub close_on_select: bool,
}

impl Default for SidebarSettings {
    fn default() -> Self {
        Self {
            desktop_min_width: DESKTOP_MIN_WIDTH,
            close_on_select: false,
        }
    }
}

/// Everything the screen shows for a given drawer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SidebarPresentation {
    pub open: bool,
    pub overlay_visible: bool,
    pub body_marked_open: bool,
    pub scroll_locked: bool,
    pub aria_hidden: bool,
}

impl SidebarState {
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }

    pub const fn presentation(self) -> SidebarPresentation {
        let open = self.is_open();
        SidebarPresentation {
            open,
            overlay_visible: open,
            body_marked_open: open,
            scroll_locked: open,
            aria_hidden: !open,
        }
    }

    pub fn transition(
        self,
        input: SidebarInput,
        viewport: Viewport,
        settings: SidebarSettings,
    ) -> (Self, SidebarOutcome) {
        let desktop = viewport.is_desktop(settings.desktop_min_width);
        let open = |state: Self| {
            if !desktop {
                (state, SidebarOutcome::Unchanged)
            } else if state.is_open() {
                (Self::Open, SidebarOutcome::Unchanged)
            } else {
                (Self::Open, SidebarOutcome::Opened)
            }
        };
        let close = |state: Self| {
            if state.is_open() {
                (Self::Closed, SidebarOutcome::Closed)
            } else {
                (Self::Closed, SidebarOutcome::Unchanged)
            }
        };

        match input {
            SidebarInput::Open => open(self),
            SidebarInput::Close => close(self),
            SidebarInput::Toggle if self.is_open() => close(self),
            SidebarInput::Toggle => open(self),
            SidebarInput::MenuButton if !desktop => (self, SidebarOutcome::MenuRefused),
            SidebarInput::MenuButton if self.is_open() => close(self),
            SidebarInput::MenuButton => open(self),
            SidebarInput::Click(ClickTarget::Overlay | ClickTarget::CloseButton) => close(self),
            SidebarInput::Click(ClickTarget::Outside) if self.is_open() => close(self),
            SidebarInput::Click(_) => (self, SidebarOutcome::Unchanged),
            SidebarInput::Escape if self.is_open() => close(self),
            SidebarInput::Resized if self.is_open() && !desktop => close(self),
            SidebarInput::NavItemSelected if settings.close_on_select && desktop => close(self),
            SidebarInput::Escape | SidebarInput::Resized | SidebarInput::NavItemSelected => {
                (self, SidebarOutcome::Unchanged)
            }
        }
    }
}
