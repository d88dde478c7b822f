// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::Serialize;
use std::time::{Duration, Instant};

use crate::{
    CardId, Catalog, CatalogItem, ClickTarget, Deadline, Debounced, FilterState, MENU_FEEDBACK,
    NavItem, NavItemId, NavList, NavSelection, NavSide, NavSync, PillGroup, PillId, PillKind,
    PriceBucket, RecoveryCompletion, RecoveryField, RecoveryService, RecoveryStep,
    RecoverySubmitted, RecoveryWizard, SEARCH_DEBOUNCE, SECTION_HOME, SECTION_LIBRARY,
    SECTION_NOTIFICATIONS, SECTION_WISHLIST, SidebarInput, SidebarOutcome, SidebarPresentation,
    SidebarSettings, SidebarState, Viewport, distinct_categories,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    Browse,
    Recovery,
}

/// Pages that live outside this app; the host decides how to reach them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExternalPage {
    Cart,
    SignIn,
}

impl ExternalPage {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Cart => "cart",
            Self::SignIn => "sign-in",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageHistory {
    stack: Vec<Page>,
}

impl PageHistory {
    pub fn new(start: Page) -> Self {
        Self { stack: vec![start] }
    }

    pub fn current(&self) -> Page {
        self.stack.last().copied().unwrap_or(Page::Browse)
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn push(&mut self, page: Page) {
        self.stack.push(page);
    }

    /// Goes back one entry if there is anything to go back to.
    pub fn back(&mut self) -> Option<Page> {
        if self.stack.len() > 1 {
            self.stack.pop();
            Some(self.current())
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppSettings {
    pub sidebar: SidebarSettings,
    pub search_debounce: Duration,
    pub menu_feedback: Duration,
    pub recovery_completion: RecoveryCompletion,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            sidebar: SidebarSettings::default(),
            search_debounce: SEARCH_DEBOUNCE,
            menu_feedback: MENU_FEEDBACK,
            recovery_completion: RecoveryCompletion::default(),
        }
    }
}

/// The page structure the controller binds to.
#[derive(Debug, Clone, PartialEq)]
pub struct StorefrontLayout {
    pub cards: Vec<CatalogItem>,
    pub category_pills: PillGroup,
    pub price_pills: PillGroup,
    pub primary_nav: NavList,
    pub secondary_nav: NavList,
}

impl StorefrontLayout {
    pub fn standard(cards: Vec<CatalogItem>) -> Self {
        let categories = distinct_categories(&cards);
        Self {
            category_pills: PillGroup::categories(categories),
            price_pills: PillGroup::prices(),
            primary_nav: NavList::new(vec![
                NavItem::new("Home", Some(SECTION_HOME))
                    .with_pressed_flag()
                    .activated(),
                NavItem::new("Notifications", Some(SECTION_NOTIFICATIONS)).with_pressed_flag(),
                NavItem::new("Wishlist", Some(SECTION_WISHLIST)).with_pressed_flag(),
                NavItem::new("Library", Some(SECTION_LIBRARY)).with_pressed_flag(),
                NavItem::new("Settings", None).with_pressed_flag(),
            ]),
            secondary_nav: NavList::new(vec![
                NavItem::new("Home", Some(SECTION_HOME)).activated(),
                NavItem::new("Notifications", Some(SECTION_NOTIFICATIONS)),
                NavItem::new("Wishlist", Some(SECTION_WISHLIST)),
                NavItem::new("Library", Some(SECTION_LIBRARY)),
            ]),
            cards,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    SearchInput { text: String, at: Instant },
    ClearSearch,
    RenderFilters,
    Tick(Instant),
    SelectPill { kind: PillKind, pill: PillId },
    PressMenu { at: Instant },
    OpenSidebar,
    CloseSidebar,
    ToggleSidebar,
    Click(ClickTarget),
    Escape,
    Resize { width: u32 },
    SelectNav { side: NavSide, item: NavItemId },
    OpenCart,
    OpenRecovery,
    Back,
    ShowRecoveryStep(RecoveryStep),
    EditRecoveryField { field: RecoveryField, value: String },
    DismissNotice,
    SetStatus(String),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    SearchScheduled,
    FiltersRendered { changed: usize, visible: usize },
    PillSelected { kind: PillKind, pill: PillId },
    SidebarChanged(SidebarState),
    MenuRefused,
    MenuFeedbackCleared,
    NavSelected(NavSelection),
    ScrollToTop,
    PageChanged(Page),
    RecoveryStepChanged(RecoveryStep),
    NoticeShown(String),
    NoticeDismissed,
    OpenExternal(ExternalPage),
    StatusUpdated(String),
    StatusCleared,
}

/// What the debug overlay and `--dump-state` print.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DebugSnapshot {
    pub page: Page,
    pub filter: FilterState,
    pub search_text: String,
    pub search_pending: bool,
    pub card_count: usize,
    pub visible_cards: Vec<CardId>,
    pub category_pill: Option<PillId>,
    pub price_pill: Option<PillId>,
    pub viewport: Viewport,
    pub sidebar: SidebarPresentation,
    pub menu_disabled: bool,
    pub nav: NavSync,
    pub recovery_step: RecoveryStep,
    pub notice: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    history: PageHistory,
    catalog: Catalog,
    filter: FilterState,
    search_text: String,
    search: Debounced<String>,
    category_pills: PillGroup,
    price_pills: PillGroup,
    sidebar: SidebarState,
    viewport: Viewport,
    menu_feedback: Deadline,
    nav: NavSync,
    pub recovery: RecoveryWizard,
    notice: Option<String>,
    pub status_line: Option<String>,
    settings: AppSettings,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(
            StorefrontLayout::standard(Vec::new()),
            AppSettings::default(),
            Viewport::new(0),
        )
    }
}

impl AppState {
    /// Binds to the layout and runs the first render pass.
    pub fn new(layout: StorefrontLayout, settings: AppSettings, viewport: Viewport) -> Self {
        if layout.category_pills.is_empty() {
            tracing::debug!("no category pills; category filter stays at its default");
        }
        if layout.price_pills.is_empty() {
            tracing::debug!("no price pills; price filter stays at its default");
        }

        let mut state = Self {
            history: PageHistory::new(Page::Browse),
            catalog: Catalog::new(layout.cards),
            filter: FilterState::default(),
            search_text: String::new(),
            search: Debounced::new(settings.search_debounce),
            category_pills: layout.category_pills,
            price_pills: layout.price_pills,
            sidebar: SidebarState::Closed,
            viewport,
            menu_feedback: Deadline::new(settings.menu_feedback),
            nav: NavSync::new(layout.primary_nav, layout.secondary_nav),
            recovery: RecoveryWizard::default(),
            notice: None,
            status_line: None,
            settings,
        };
        state.catalog.render(&state.filter);
        state
    }

    pub fn page(&self) -> Page {
        self.history.current()
    }

    pub fn history(&self) -> &PageHistory {
        &self.history
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn pills(&self, kind: PillKind) -> &PillGroup {
        match kind {
            PillKind::Category => &self.category_pills,
            PillKind::Price => &self.price_pills,
        }
    }

    pub fn sidebar(&self) -> SidebarState {
        self.sidebar
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn menu_disabled(&self) -> bool {
        self.menu_feedback.is_pending()
    }

    pub fn nav(&self) -> &NavSync {
        &self.nav
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        match command {
            AppCommand::SearchInput { text, at } => {
                self.search_text = text.clone();
                self.search.schedule(text, at);
                vec![AppEvent::SearchScheduled]
            }
            AppCommand::ClearSearch => {
                self.search_text.clear();
                self.search.cancel();
                self.filter.set_query("");
                vec![self.render()]
            }
            AppCommand::RenderFilters => vec![self.render()],
            AppCommand::Tick(now) => self.tick(now),
            AppCommand::SelectPill { kind, pill } => self.select_pill(kind, pill),
            AppCommand::PressMenu { at } => {
                let events = self.apply_sidebar(SidebarInput::MenuButton);
                if events.contains(&AppEvent::MenuRefused) {
                    self.menu_feedback.schedule(at);
                }
                events
            }
            AppCommand::OpenSidebar => self.apply_sidebar(SidebarInput::Open),
            AppCommand::CloseSidebar => self.apply_sidebar(SidebarInput::Close),
            AppCommand::ToggleSidebar => self.apply_sidebar(SidebarInput::Toggle),
            AppCommand::Click(target) => self.apply_sidebar(SidebarInput::Click(target)),
            AppCommand::Escape => self.apply_sidebar(SidebarInput::Escape),
            AppCommand::Resize { width } => {
                self.viewport = Viewport::new(width);
                self.apply_sidebar(SidebarInput::Resized)
            }
            AppCommand::SelectNav { side, item } => self.select_nav(side, item),
            AppCommand::OpenCart => vec![AppEvent::OpenExternal(ExternalPage::Cart)],
            AppCommand::OpenRecovery => {
                if self.page() != Page::Recovery {
                    self.history.push(Page::Recovery);
                }
                let mut events = vec![AppEvent::PageChanged(Page::Recovery)];
                events.extend(self.show_recovery_step(RecoveryStep::RequestCode));
                events
            }
            AppCommand::Back => match self.history.back() {
                Some(page) => vec![AppEvent::PageChanged(page)],
                None if self.page() == Page::Recovery => {
                    self.show_recovery_step(RecoveryStep::RequestCode)
                }
                None => Vec::new(),
            },
            AppCommand::ShowRecoveryStep(step) => self.show_recovery_step(step),
            AppCommand::EditRecoveryField { field, value } => {
                *self.recovery.form.field_mut(field) = value;
                Vec::new()
            }
            AppCommand::DismissNotice => match self.notice.take() {
                Some(_) => vec![AppEvent::NoticeDismissed],
                None => Vec::new(),
            },
            AppCommand::SetStatus(message) => vec![self.set_status(&message)],
            AppCommand::ClearStatus => {
                self.status_line = None;
                vec![AppEvent::StatusCleared]
            }
        }
    }

    /// Submits the recovery step on screen through the host's service.
    ///
    /// Validation and service failures surface as a blocking notice.
    pub fn submit_recovery<S>(&mut self, service: &mut S) -> Vec<AppEvent>
    where
        S: RecoveryService + ?Sized,
    {
        let before = self.recovery.step();
        match self
            .recovery
            .submit(service, self.settings.recovery_completion)
        {
            Ok(RecoverySubmitted::CodeSent { email }) => {
                tracing::info!(step = before.number(), "recovery code requested");
                let mut events = vec![self.show_notice(format!(
                    "verification code sent to {email}"
                ))];
                events.extend(self.step_events());
                events
            }
            Ok(RecoverySubmitted::PasswordChanged { completion }) => {
                tracing::info!(step = before.number(), "recovery password changed");
                let mut events = vec![self.show_notice(
                    "password changed; you can now sign in with your new password",
                )];
                events.extend(self.step_events());
                if completion == RecoveryCompletion::SignIn {
                    events.push(AppEvent::OpenExternal(ExternalPage::SignIn));
                }
                events
            }
            Err(error) => vec![self.show_notice(format!("{error:#}"))],
        }
    }

    pub fn debug_snapshot(&self) -> DebugSnapshot {
        DebugSnapshot {
            page: self.page(),
            filter: self.filter.clone(),
            search_text: self.search_text.clone(),
            search_pending: self.search.is_pending(),
            card_count: self.catalog.len(),
            visible_cards: self.catalog.visible_ids(),
            category_pill: self.category_pills.active(),
            price_pill: self.price_pills.active(),
            viewport: self.viewport,
            sidebar: self.sidebar.presentation(),
            menu_disabled: self.menu_disabled(),
            nav: self.nav.clone(),
            recovery_step: self.recovery.step(),
            notice: self.notice.clone(),
        }
    }

    fn render(&mut self) -> AppEvent {
        let pass = self.catalog.render(&self.filter);
        AppEvent::FiltersRendered {
            changed: pass.changed.len(),
            visible: pass.visible,
        }
    }

    fn tick(&mut self, now: Instant) -> Vec<AppEvent> {
        let mut events = Vec::new();
        if let Some(text) = self.search.poll(now) {
            self.filter.set_query(&text);
            events.push(self.render());
        }
        if self.menu_feedback.fire_if_due(now) {
            events.push(AppEvent::MenuFeedbackCleared);
        }
        events
    }

    fn select_pill(&mut self, kind: PillKind, pill: PillId) -> Vec<AppEvent> {
        let group = match kind {
            PillKind::Category => &mut self.category_pills,
            PillKind::Price => &mut self.price_pills,
        };
        let Some(selected) = group.select(pill) else {
            tracing::debug!(group = kind.label(), pill = pill.get(), "no such pill");
            return Vec::new();
        };
        let value = selected.value.clone();
        match kind {
            PillKind::Category => self.filter.set_category(value.as_deref()),
            PillKind::Price => self
                .filter
                .set_price(PriceBucket::from_attribute(value.as_deref())),
        }
        vec![AppEvent::PillSelected { kind, pill }, self.render()]
    }

    fn apply_sidebar(&mut self, input: SidebarInput) -> Vec<AppEvent> {
        let (next, outcome) = self
            .sidebar
            .transition(input, self.viewport, self.settings.sidebar);
        self.sidebar = next;
        match outcome {
            SidebarOutcome::Opened => vec![
                AppEvent::SidebarChanged(next),
                self.set_status("sidebar open"),
            ],
            SidebarOutcome::Closed => vec![
                AppEvent::SidebarChanged(next),
                self.set_status("sidebar closed"),
            ],
            SidebarOutcome::MenuRefused => vec![AppEvent::MenuRefused],
            SidebarOutcome::Unchanged => Vec::new(),
        }
    }

    fn select_nav(&mut self, side: NavSide, item: NavItemId) -> Vec<AppEvent> {
        let Some(selection) = self.nav.select(side, item) else {
            tracing::debug!(?side, item = item.get(), "no such nav item");
            return Vec::new();
        };
        let scroll = selection.scroll_to_top;
        let mut events = vec![AppEvent::NavSelected(selection)];
        if scroll {
            events.push(AppEvent::ScrollToTop);
        }
        if side == NavSide::Primary {
            events.extend(self.apply_sidebar(SidebarInput::NavItemSelected));
        }
        events
    }

    fn show_recovery_step(&mut self, step: RecoveryStep) -> Vec<AppEvent> {
        self.recovery.show(step);
        self.step_events()
    }

    fn step_events(&self) -> Vec<AppEvent> {
        vec![
            AppEvent::RecoveryStepChanged(self.recovery.step()),
            AppEvent::ScrollToTop,
        ]
    }

    fn show_notice(&mut self, message: impl Into<String>) -> AppEvent {
        let message = message.into();
        self.notice = Some(message.clone());
        AppEvent::NoticeShown(message)
    }

    fn set_status(&mut self, message: &str) -> AppEvent {
        self.status_line = Some(message.to_owned());
        AppEvent::StatusUpdated(message.to_owned())
    }
}
