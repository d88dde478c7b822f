// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod layout;

use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use ludex_app::{
    AppCommand, AppEvent, AppState, ExternalPage, NavItemId, NavList, NavSide, Page, PillGroup,
    PillKind, RecoveryField, RecoveryService, RecoveryStep, Viewport,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::{Duration, Instant};

use crate::layout::{CART_LABEL, CLEAR_LABEL, Hit, MENU_LABEL, Regions, pill_label};

const POLL_INTERVAL: Duration = Duration::from_millis(40);
const STATUS_CLEAR_DELAY: Duration = Duration::from_secs(4);
const MASK: char = '•';

/// Host services the storefront reaches outside the terminal.
pub trait AppRuntime: RecoveryService {
    fn open_page(&mut self, page: ExternalPage) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternalEvent {
    ClearStatus { token: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Focus {
    #[default]
    Cards,
    Search,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ViewData {
    focus: Focus,
    card_offset: usize,
    drawer_cursor: usize,
    recovery_focus: usize,
    debug_visible: bool,
    status_token: u64,
    column_px: u32,
    area: Rect,
}

impl ViewData {
    fn new(column_px: u32) -> Self {
        Self {
            focus: Focus::default(),
            card_offset: 0,
            drawer_cursor: 0,
            recovery_focus: 0,
            debug_visible: false,
            status_token: 0,
            column_px,
            area: Rect::default(),
        }
    }
}

/// Runs the storefront until ctrl+q. `column_px` converts terminal columns
/// into the logical pixel widths the sidebar breakpoint is expressed in.
///
/// The terminal is restored on every exit path, including setup failures.
pub fn run_app<R: AppRuntime>(state: &mut AppState, runtime: &mut R, column_px: u32) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    with_restore(
        || {
            execute!(io::stdout(), terminal::EnterAlternateScreen, EnableMouseCapture)
                .context("enter alternate screen")?;
            event_loop(state, runtime, column_px)
        },
        restore_terminal,
    )
}

/// Runs `body`, then `restore` whether or not `body` failed. The body's
/// error wins over a restore error.
fn with_restore<T>(
    body: impl FnOnce() -> Result<T>,
    restore: impl FnOnce() -> Result<()>,
) -> Result<T> {
    let result = body();
    let restored = restore();
    let value = result?;
    restored?;
    Ok(value)
}

fn restore_terminal() -> Result<()> {
    let raw = disable_raw_mode().context("disable raw mode");
    let screen = execute!(
        io::stdout(),
        DisableMouseCapture,
        terminal::LeaveAlternateScreen
    )
    .context("leave alternate screen");
    raw.and(screen)
}

fn event_loop<R: AppRuntime>(state: &mut AppState, runtime: &mut R, column_px: u32) -> Result<()> {
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view_data = ViewData::new(column_px);
    let (internal_tx, internal_rx) = mpsc::channel();

    let (columns, _) = terminal::size().context("read terminal size")?;
    resize(state, runtime, &mut view_data, &internal_tx, columns);

    loop {
        process_internal_events(state, &mut view_data, &internal_rx);

        let completed = terminal
            .draw(|frame| render(frame, state, &view_data))
            .context("draw frame")?;
        view_data.area = completed.area;

        if event::poll(POLL_INTERVAL).context("poll event")? {
            match event::read().context("read event")? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if handle_key_event(
                        state,
                        runtime,
                        &mut view_data,
                        &internal_tx,
                        key,
                        Instant::now(),
                    ) {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => {
                    handle_mouse_event(state, runtime, &mut view_data, &internal_tx, mouse);
                }
                Event::Resize(columns, _) => {
                    resize(state, runtime, &mut view_data, &internal_tx, columns);
                }
                _ => {}
            }
        }

        dispatch(
            state,
            runtime,
            &mut view_data,
            &internal_tx,
            AppCommand::Tick(Instant::now()),
        );
    }
}

fn process_internal_events(
    state: &mut AppState,
    view_data: &mut ViewData,
    rx: &Receiver<InternalEvent>,
) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearStatus { token } if token == view_data.status_token => {
                state.dispatch(AppCommand::ClearStatus);
            }
            InternalEvent::ClearStatus { .. } => {}
        }
    }
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(STATUS_CLEAR_DELAY);
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn emit_status<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    message: impl Into<String>,
) {
    dispatch(
        state,
        runtime,
        view_data,
        internal_tx,
        AppCommand::SetStatus(message.into()),
    );
}

fn dispatch<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    command: AppCommand,
) {
    let events = state.dispatch(command);
    apply_events(state, runtime, view_data, internal_tx, events);
}

fn apply_events<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    events: Vec<AppEvent>,
) {
    for event in events {
        match event {
            AppEvent::ScrollToTop => view_data.card_offset = 0,
            AppEvent::FiltersRendered { visible, .. } => {
                view_data.card_offset = view_data.card_offset.min(visible.saturating_sub(1));
            }
            AppEvent::PageChanged(_) => {
                view_data.focus = Focus::Cards;
                view_data.recovery_focus = 0;
            }
            AppEvent::RecoveryStepChanged(_) => view_data.recovery_focus = 0,
            AppEvent::SidebarChanged(sidebar) if sidebar.is_open() => {
                view_data.drawer_cursor = state.nav().primary().active().map_or(0, NavItemId::get);
            }
            AppEvent::OpenExternal(page) => {
                let message = match runtime.open_page(page) {
                    Ok(()) => format!("opening {}", page.label()),
                    Err(error) => {
                        tracing::warn!(
                            page = page.label(),
                            error = %error,
                            "external page failed"
                        );
                        format!("could not open {}: {error:#}", page.label())
                    }
                };
                emit_status(state, runtime, view_data, internal_tx, message);
            }
            AppEvent::StatusUpdated(_) => {
                view_data.status_token = view_data.status_token.saturating_add(1);
                schedule_status_clear(internal_tx, view_data.status_token);
            }
            _ => {}
        }
    }
}

fn resize<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    columns: u16,
) {
    let viewport = Viewport::from_columns(columns, view_data.column_px);
    dispatch(
        state,
        runtime,
        view_data,
        internal_tx,
        AppCommand::Resize {
            width: viewport.width,
        },
    );
}

fn handle_key_event<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
    now: Instant,
) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('q') {
        return true;
    }

    if state.notice().is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            dispatch(
                state,
                runtime,
                view_data,
                internal_tx,
                AppCommand::DismissNotice,
            );
        }
        return false;
    }

    if ctrl && key.code == KeyCode::Char('d') {
        view_data.debug_visible = !view_data.debug_visible;
        return false;
    }
    if view_data.debug_visible {
        if key.code == KeyCode::Esc {
            view_data.debug_visible = false;
        }
        return false;
    }

    match state.page() {
        Page::Browse => handle_browse_key(state, runtime, view_data, internal_tx, key, now),
        Page::Recovery => handle_recovery_key(state, runtime, view_data, internal_tx, key),
    }
    false
}

fn handle_browse_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
    now: Instant,
) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if view_data.focus == Focus::Search {
        let command = match key.code {
            KeyCode::Enter | KeyCode::Esc => {
                view_data.focus = Focus::Cards;
                None
            }
            KeyCode::Char('u') if ctrl => Some(AppCommand::ClearSearch),
            KeyCode::Backspace => {
                let mut text = state.search_text().to_owned();
                text.pop();
                Some(AppCommand::SearchInput { text, at: now })
            }
            KeyCode::Char(ch) if !ctrl => {
                let mut text = state.search_text().to_owned();
                text.push(ch);
                Some(AppCommand::SearchInput { text, at: now })
            }
            _ => None,
        };
        if let Some(command) = command {
            dispatch(state, runtime, view_data, internal_tx, command);
        }
        return;
    }

    let drawer_open = state.sidebar().is_open();
    let command = match (key.code, key.modifiers) {
        (KeyCode::Char('/'), _) => {
            view_data.focus = Focus::Search;
            None
        }
        (KeyCode::Char('u'), KeyModifiers::CONTROL) | (KeyCode::Backspace, _) => {
            Some(AppCommand::ClearSearch)
        }
        (KeyCode::Char('c'), KeyModifiers::NONE) => cycle_pill(state.pills(PillKind::Category), 1),
        (KeyCode::Char('C'), _) => cycle_pill(state.pills(PillKind::Category), -1),
        (KeyCode::Char('p'), KeyModifiers::NONE) => cycle_pill(state.pills(PillKind::Price), 1),
        (KeyCode::Char('P'), _) => cycle_pill(state.pills(PillKind::Price), -1),
        (KeyCode::Char('m'), KeyModifiers::NONE) => Some(AppCommand::PressMenu { at: now }),
        (KeyCode::Char('x'), KeyModifiers::NONE) => Some(AppCommand::CloseSidebar),
        (KeyCode::Esc, _) => Some(AppCommand::Escape),
        (KeyCode::Char('j') | KeyCode::Down, _) if drawer_open => {
            view_data.drawer_cursor =
                step_cursor(view_data.drawer_cursor, state.nav().primary().len(), 1);
            None
        }
        (KeyCode::Char('k') | KeyCode::Up, _) if drawer_open => {
            view_data.drawer_cursor =
                step_cursor(view_data.drawer_cursor, state.nav().primary().len(), -1);
            None
        }
        (KeyCode::Enter, _) if drawer_open => Some(AppCommand::SelectNav {
            side: NavSide::Primary,
            item: NavItemId::new(view_data.drawer_cursor),
        }),
        (KeyCode::Char('j') | KeyCode::Down, _) => {
            view_data.card_offset =
                step_cursor(view_data.card_offset, state.catalog().visible_count(), 1);
            None
        }
        (KeyCode::Char('k') | KeyCode::Up, _) => {
            view_data.card_offset =
                step_cursor(view_data.card_offset, state.catalog().visible_count(), -1);
            None
        }
        (KeyCode::Char(digit @ '1'..='9'), _) => {
            let index = (digit as usize) - ('1' as usize);
            (index < state.nav().secondary().len()).then(|| AppCommand::SelectNav {
                side: NavSide::Secondary,
                item: NavItemId::new(index),
            })
        }
        (KeyCode::Char('o'), KeyModifiers::NONE) => Some(AppCommand::OpenCart),
        (KeyCode::Char('r'), KeyModifiers::NONE) => Some(AppCommand::OpenRecovery),
        _ => None,
    };
    if let Some(command) = command {
        dispatch(state, runtime, view_data, internal_tx, command);
    }
}

fn handle_recovery_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let fields = state.recovery.step().fields();
    let focused = fields[view_data.recovery_focus.min(fields.len() - 1)];

    let command = match key.code {
        KeyCode::Tab | KeyCode::Down => {
            view_data.recovery_focus = step_cursor(view_data.recovery_focus, fields.len(), 1);
            None
        }
        KeyCode::BackTab | KeyCode::Up => {
            view_data.recovery_focus = step_cursor(view_data.recovery_focus, fields.len(), -1);
            None
        }
        KeyCode::Enter => {
            let events = state.submit_recovery(runtime);
            apply_events(state, runtime, view_data, internal_tx, events);
            None
        }
        KeyCode::Esc => Some(AppCommand::Back),
        KeyCode::Char('n') if ctrl => {
            Some(AppCommand::ShowRecoveryStep(RecoveryStep::ResetPassword))
        }
        KeyCode::Char('p') if ctrl => Some(AppCommand::ShowRecoveryStep(RecoveryStep::RequestCode)),
        KeyCode::Backspace => {
            let mut value = state.recovery.form.field(focused).to_owned();
            value.pop();
            Some(AppCommand::EditRecoveryField {
                field: focused,
                value,
            })
        }
        KeyCode::Char(ch) if !ctrl => {
            let mut value = state.recovery.form.field(focused).to_owned();
            value.push(ch);
            Some(AppCommand::EditRecoveryField {
                field: focused,
                value,
            })
        }
        _ => None,
    };
    if let Some(command) = command {
        dispatch(state, runtime, view_data, internal_tx, command);
    }
}

fn handle_mouse_event<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    mouse: MouseEvent,
) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left)
        || state.page() != Page::Browse
        || state.notice().is_some()
        || view_data.debug_visible
    {
        return;
    }

    let hit = Regions::compute(view_data.area, state).hit(mouse.column, mouse.row);
    let now = Instant::now();
    let action = match hit {
        Hit::MenuButton => Some(AppCommand::PressMenu { at: now }),
        Hit::Search => {
            view_data.focus = Focus::Search;
            None
        }
        Hit::ClearSearch => {
            view_data.focus = Focus::Search;
            Some(AppCommand::ClearSearch)
        }
        Hit::Cart => Some(AppCommand::OpenCart),
        Hit::Pill(kind, pill) => Some(AppCommand::SelectPill { kind, pill }),
        Hit::Nav(side, item) => {
            if side == NavSide::Primary {
                view_data.drawer_cursor = item.get();
            }
            Some(AppCommand::SelectNav { side, item })
        }
        Hit::Drawer | Hit::DrawerClose | Hit::Overlay | Hit::Nothing => None,
    };
    if !matches!(hit, Hit::Search | Hit::ClearSearch) && view_data.focus == Focus::Search {
        view_data.focus = Focus::Cards;
    }
    if let Some(action) = action {
        dispatch(state, runtime, view_data, internal_tx, action);
    }
    dispatch(
        state,
        runtime,
        view_data,
        internal_tx,
        AppCommand::Click(hit.click_target()),
    );
}

fn cycle_pill(group: &PillGroup, delta: isize) -> Option<AppCommand> {
    group.neighbor(delta).map(|pill| AppCommand::SelectPill {
        kind: group.kind(),
        pill,
    })
}

fn step_cursor(current: usize, len: usize, delta: isize) -> usize {
    if len == 0 {
        return 0;
    }
    let next = current as isize + delta;
    next.clamp(0, len as isize - 1) as usize
}

fn render(frame: &mut ratatui::Frame<'_>, state: &AppState, view_data: &ViewData) {
    match state.page() {
        Page::Browse => render_browse(frame, state, view_data),
        Page::Recovery => render_recovery(frame, state, view_data),
    }

    if let Some(notice) = state.notice() {
        let area = centered_rect(60, 24, frame.area());
        frame.render_widget(Clear, area);
        let modal = Paragraph::new(format!("{notice}\n\nenter to dismiss"))
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .title("notice")
                    .borders(Borders::ALL)
                    .style(Style::default().fg(Color::Yellow)),
            );
        frame.render_widget(modal, area);
    }

    if view_data.debug_visible {
        let area = centered_rect(80, 72, frame.area());
        frame.render_widget(Clear, area);
        let debug = Paragraph::new(debug_overlay_text(state))
            .block(Block::default().title("debug").borders(Borders::ALL));
        frame.render_widget(debug, area);
    }
}

fn render_browse(frame: &mut ratatui::Frame<'_>, state: &AppState, view_data: &ViewData) {
    let regions = Regions::compute(frame.area(), state);

    frame.render_widget(
        Block::default().title("ludex").borders(Borders::ALL),
        regions.top_bar,
    );
    let menu_style = if state.menu_disabled() {
        Style::default().add_modifier(Modifier::DIM)
    } else {
        Style::default().fg(Color::Cyan)
    };
    frame.render_widget(
        Paragraph::new(MENU_LABEL).style(menu_style),
        regions.menu_button,
    );
    frame.render_widget(Paragraph::new(search_line(state, view_data)), regions.search);
    frame.render_widget(Paragraph::new(CLEAR_LABEL), regions.clear_search);
    frame.render_widget(
        Paragraph::new(CART_LABEL).style(Style::default().fg(Color::Cyan)),
        regions.cart,
    );

    if let (Some(first), Some(second)) =
        (regions.category_pills.first(), regions.price_pills.first())
    {
        let width = regions.cards.width;
        frame.render_widget(
            Paragraph::new(pill_line(state.pills(PillKind::Category))),
            Rect::new(first.x, first.y, width, 1),
        );
        frame.render_widget(
            Paragraph::new(pill_line(state.pills(PillKind::Price))),
            Rect::new(second.x, second.y, width, 1),
        );
    }

    render_cards(frame, regions.cards, state, view_data);

    frame.render_widget(
        Paragraph::new(nav_line(state.nav().secondary(), &regions.bottom_nav_items))
            .block(Block::default().borders(Borders::TOP)),
        regions.bottom_nav,
    );

    frame.render_widget(
        Paragraph::new(status_text(state, view_data)).style(Style::default().fg(Color::Yellow)),
        regions.status,
    );

    if let Some(overlay) = regions.overlay {
        frame
            .buffer_mut()
            .set_style(overlay, Style::default().add_modifier(Modifier::DIM));
    }
    if let Some(drawer) = regions.drawer {
        frame.render_widget(Clear, drawer);
        frame.render_widget(
            Paragraph::new(drawer_lines(state.nav().primary(), view_data.drawer_cursor))
                .block(Block::default().title("menu").borders(Borders::ALL)),
            drawer,
        );
        if let Some(close) = regions.drawer_close {
            frame.render_widget(Paragraph::new(CLEAR_LABEL), close);
        }
    }
}

fn render_cards(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    state: &AppState,
    view_data: &ViewData,
) {
    let catalog = state.catalog();
    let title = format!("games ({}/{})", catalog.visible_count(), catalog.len());
    if catalog.visible_count() == 0 {
        let empty = Paragraph::new("no games match the current filters")
            .style(Style::default().add_modifier(Modifier::DIM))
            .block(Block::default().title(title).borders(Borders::ALL));
        frame.render_widget(empty, area);
        return;
    }

    let rows = catalog
        .visible_items()
        .skip(view_data.card_offset)
        .map(|(_, item)| {
            Row::new(vec![
                Cell::from(item.title().to_owned()),
                Cell::from(item.category().to_owned()),
                Cell::from(format_price(item.price())),
            ])
        });
    let table = Table::new(
        rows,
        [
            Constraint::Percentage(55),
            Constraint::Percentage(30),
            Constraint::Percentage(15),
        ],
    )
    .header(
        Row::new(vec!["title", "category", "price"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(table, area);
}

fn render_recovery(frame: &mut ratatui::Frame<'_>, state: &AppState, view_data: &ViewData) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let step = state.recovery.step();
    frame.render_widget(
        Paragraph::new(format!("step {} of 2: {}", step.number(), step.title()))
            .block(Block::default().title("recover password").borders(Borders::ALL)),
        layout[0],
    );
    frame.render_widget(
        Paragraph::new(recovery_lines(state, view_data))
            .block(Block::default().borders(Borders::ALL)),
        layout[1],
    );
    frame.render_widget(
        Paragraph::new(status_text(state, view_data)).style(Style::default().fg(Color::Yellow)),
        layout[2],
    );
}

fn search_line(state: &AppState, view_data: &ViewData) -> Line<'static> {
    let text = state.search_text();
    if view_data.focus == Focus::Search {
        Line::from(vec![
            Span::raw("search: "),
            Span::styled(
                format!("{text}▏"),
                Style::default().add_modifier(Modifier::UNDERLINED),
            ),
        ])
    } else if text.is_empty() {
        Line::from(Span::styled(
            "/ to search",
            Style::default().add_modifier(Modifier::DIM),
        ))
    } else {
        Line::from(format!("search: {text}"))
    }
}

fn pill_line(group: &PillGroup) -> Line<'static> {
    let mut spans = Vec::with_capacity(group.len() * 2);
    for (index, pill) in group.pills().iter().enumerate() {
        if index > 0 {
            spans.push(Span::raw(" "));
        }
        let style = if group.active().is_some_and(|active| active.get() == index) {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default()
        };
        spans.push(Span::styled(pill_label(&pill.label), style));
    }
    Line::from(spans)
}

fn nav_line(list: &NavList, slots: &[Rect]) -> Line<'static> {
    let spans = list
        .items()
        .iter()
        .zip(slots)
        .enumerate()
        .map(|(index, (item, slot))| {
            let label = format!("{} {}", index + 1, item.label);
            let width = usize::from(slot.width);
            let style = if item.active {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Span::styled(format!("{label:^width$}"), style)
        })
        .collect::<Vec<_>>();
    Line::from(spans)
}

fn drawer_lines(list: &NavList, cursor: usize) -> Vec<Line<'static>> {
    list.items()
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let marker = match item.pressed {
                Some(true) => "▸",
                _ if item.active => "▸",
                _ => " ",
            };
            let mut style = Style::default();
            if item.active {
                style = style.fg(Color::Cyan).add_modifier(Modifier::BOLD);
            }
            if index == cursor {
                style = style.add_modifier(Modifier::REVERSED);
            }
            Line::from(Span::styled(format!("{marker} {}", item.label), style))
        })
        .collect()
}

fn recovery_lines(state: &AppState, view_data: &ViewData) -> Vec<Line<'static>> {
    let fields = state.recovery.step().fields();
    let mut lines = Vec::with_capacity(fields.len() * 2);
    for (index, field) in fields.iter().enumerate() {
        let value = display_field(*field, state.recovery.form.field(*field));
        let focused = index == view_data.recovery_focus.min(fields.len() - 1);
        let style = if focused {
            Style::default().add_modifier(Modifier::UNDERLINED)
        } else {
            Style::default()
        };
        let cursor = if focused { "▏" } else { "" };
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:>18}: ", field.label()),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("{value}{cursor}"), style),
        ]));
        lines.push(Line::default());
    }
    lines
}

fn display_field(field: RecoveryField, value: &str) -> String {
    if field.is_secret() {
        std::iter::repeat_n(MASK, value.chars().count()).collect()
    } else {
        value.to_owned()
    }
}

fn format_price(price: f64) -> String {
    if price == 0.0 {
        "free".to_owned()
    } else {
        format!("${price:.2}")
    }
}

fn status_text(state: &AppState, view_data: &ViewData) -> String {
    if let Some(status) = &state.status_line {
        return status.clone();
    }
    match state.page() {
        Page::Browse if view_data.focus == Focus::Search => {
            "type to search | enter/esc done | ctrl+u clear | ctrl+q".to_owned()
        }
        Page::Browse if state.sidebar().is_open() => {
            "j/k move | enter select | x/esc close | ctrl+d debug | ctrl+q".to_owned()
        }
        Page::Browse => {
            concat!(
                "/ search | c/C category | p/P price | m menu | 1-4 nav | o cart ",
                "| r recover | ctrl+d debug | ctrl+q"
            )
            .to_owned()
        }
        Page::Recovery => {
            "tab next field | enter submit | ctrl+n/ctrl+p step | esc back | ctrl+q".to_owned()
        }
    }
}

fn debug_overlay_text(state: &AppState) -> String {
    match serde_json::to_string_pretty(&state.debug_snapshot()) {
        Ok(text) => text,
        Err(error) => format!("snapshot unavailable: {error}"),
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
