//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, drives the crossterm event loop, and
//! tears everything down cleanly on exit or panic.
//!
//! Every change to the event, display mode, note or time selection rebuilds
//! the [`Selection`] and re-renders the [`MapView`] from the owned
//! [`Dataset`]. Nothing is cached between interactions apart from the
//! rendered view itself.

use crate::{
    commands::execute_command,
    event::{self, AppEvent},
    theme::Theme,
    widgets::{
        command_bar::{BarOutcome, CommandBar, CommandBarState},
        error_banner::ErrorBanner,
        help::HelpPopup,
        map_canvas::{MapCanvas, MapCanvasState},
        marker_detail::MarkerDetail,
        mode_picker::{self, ModePicker},
        select_list::{SelectList, SelectListState},
        status_bar::StatusBar,
        time_slider::{TimeSlider, TimeSliderState},
    },
};
use battlemap_core::{Dataset, MapView, Selection, ViewMode, config::Config};
use crossterm::{
    event::{self as ct_event, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
};
use std::{io, time::Duration};

// ---------------------------------------------------------------------------
// Focus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Events,
    Mode,
    /// The note list or the time slider, whichever the mode shows.
    Selector,
    Map,
    /// Vim-style `:` command line is active.
    Command,
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub dataset: Dataset,
    pub events: SelectListState,
    pub mode: ViewMode,
    pub notes: SelectListState,
    pub times: TimeSliderState,
    /// The rendering of the current selection.
    pub view: MapView,
    pub map: MapCanvasState,
    pub focus: Focus,
    /// Focus state before entering command mode, restored on exit.
    pub prev_focus: Focus,
    pub theme: Theme,
    pub config: Config,
    pub show_help: bool,
    pub command_bar: CommandBarState,
    /// Normalization failure summary shown in the error banner.
    pub error: Option<String>,
    pub quit: bool,
}

impl AppState {
    pub fn new(dataset: Dataset, config: Config, theme: Theme) -> Self {
        let events = SelectListState::new(dataset.battle_names());
        let error = dataset.error_message();
        let show_labels = config.map.show_labels;

        let mut state = AppState {
            dataset,
            events,
            mode: ViewMode::AllNotes,
            notes: SelectListState::default(),
            times: TimeSliderState::default(),
            view: MapView::empty(),
            map: MapCanvasState {
                focused: 0,
                show_labels,
            },
            focus: Focus::Events,
            prev_focus: Focus::Events,
            theme,
            config,
            show_help: false,
            command_bar: CommandBarState::default(),
            error,
            quit: false,
        };
        state.on_event_changed();
        state
    }

    pub fn battle(&self) -> Option<&str> {
        self.events.selected_item()
    }

    /// The selection the sidebar currently describes.
    ///
    /// `None` when there is no battle, or when the mode needs a note or time
    /// and the battle has none to offer; both draw the empty map.
    pub fn selection(&self) -> Option<Selection> {
        let battle = self.battle()?;
        match self.mode {
            ViewMode::AllNotes => Some(Selection::all(battle)),
            ViewMode::SelectNote => Some(Selection::note(battle, self.notes.selected_item()?)),
            ViewMode::SelectTime => Some(Selection::time(battle, self.times.current()?)),
        }
    }

    /// Re-run filtering and rendering for the current selection.
    pub fn refresh(&mut self) {
        self.view = match self.selection() {
            Some(selection) => self.dataset.render(&selection),
            None => MapView::empty(),
        };
        self.map.reset();
        tracing::debug!(
            paths = self.view.paths.len(),
            markers = self.view.markers.len(),
            "map re-rendered"
        );
    }

    /// Reset the note and time selectors to the new battle's options.
    fn on_event_changed(&mut self) {
        let (notes, times) = match self.battle() {
            Some(battle) => (
                self.dataset.notes(battle),
                self.dataset.time_options(battle),
            ),
            None => (Vec::new(), Vec::new()),
        };
        self.notes = SelectListState::new(notes);
        self.times = TimeSliderState::new(times);
        self.refresh();
    }

    /// Select a battle by name: exact match first, then case-insensitive.
    pub fn select_event_named(&mut self, name: &str) -> bool {
        let name = name.trim();
        let found = self
            .events
            .items
            .iter()
            .find(|b| b.as_str() == name)
            .or_else(|| self.events.items.iter().find(|b| b.eq_ignore_ascii_case(name)))
            .cloned();
        match found {
            Some(battle) => {
                tracing::debug!(battle = %battle, "event selected by name");
                self.events.select_item(&battle);
                self.on_event_changed();
                true
            }
            None => false,
        }
    }

    /// Switch to time mode showing `time`, if the current battle has it.
    pub fn select_time_value(&mut self, time: &str) -> bool {
        if !self.times.select_time(time.trim()) {
            return false;
        }
        tracing::debug!(time = ?self.times.current(), "time selected by value");
        if self.mode == ViewMode::SelectTime {
            self.refresh();
        } else {
            self.set_mode(ViewMode::SelectTime);
        }
        true
    }

    pub fn set_mode(&mut self, mode: ViewMode) {
        if mode == self.mode {
            return;
        }
        self.mode = mode;
        if mode == ViewMode::AllNotes && self.focus == Focus::Selector {
            self.focus = Focus::Mode;
        }
        self.refresh();
    }

    fn focus_order(&self) -> Vec<Focus> {
        if self.mode == ViewMode::AllNotes {
            vec![Focus::Events, Focus::Mode, Focus::Map]
        } else {
            vec![Focus::Events, Focus::Mode, Focus::Selector, Focus::Map]
        }
    }

    fn cycle_focus(&mut self, forward: bool) {
        let order = self.focus_order();
        let pos = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        let len = order.len();
        let next = if forward {
            order[(pos + 1) % len]
        } else {
            order[(pos + len - 1) % len]
        };
        tracing::debug!(from = ?self.focus, to = ?next, "focus cycle");
        self.focus = next;
    }

    pub fn handle(&mut self, event: AppEvent) {
        // Help popup intercepts all events; only close keys pass through.
        if self.show_help {
            match event {
                AppEvent::Char('?') | AppEvent::Escape | AppEvent::Quit => {
                    tracing::debug!("help popup closed");
                    self.show_help = false;
                }
                _ => {}
            }
            return;
        }

        // Command mode intercepts all events.
        if self.focus == Focus::Command {
            if event == AppEvent::Quit {
                self.quit = true;
                return;
            }
            match self.command_bar.handle(&event) {
                BarOutcome::Editing => {}
                BarOutcome::Cancelled => self.focus = self.prev_focus,
                BarOutcome::Submit(cmd) => {
                    self.focus = self.prev_focus;
                    tracing::debug!(command = ?cmd, "executing command");
                    if let Err(msg) = execute_command(self, cmd) {
                        // Reopen with the error; the bar clears it on the next key
                        self.prev_focus = self.focus;
                        self.focus = Focus::Command;
                        self.command_bar.error = Some(msg);
                    }
                }
            }
            return;
        }

        match event {
            AppEvent::Char('?') => {
                tracing::debug!("help popup opened");
                self.show_help = true;
            }

            // Enter command mode with `:`
            AppEvent::Char(':') => {
                tracing::debug!(prev_focus = ?self.focus, "entering command mode");
                self.prev_focus = self.focus;
                self.command_bar.clear();
                self.focus = Focus::Command;
            }

            AppEvent::Char('t') => {
                self.map.show_labels = !self.map.show_labels;
                tracing::debug!(labels = self.map.show_labels, "labels toggled");
            }

            AppEvent::Char('m') => self.set_mode(self.mode.next()),

            AppEvent::Quit => {
                tracing::debug!("quit");
                self.quit = true;
            }

            AppEvent::FocusNext => self.cycle_focus(true),
            AppEvent::FocusPrev => self.cycle_focus(false),

            // Terminal resize is handled automatically by ratatui
            AppEvent::Resize(_, _) => {}

            other => self.dispatch_to_focused(other),
        }
    }

    /// Route an event to the control that owns the current focus.
    fn dispatch_to_focused(&mut self, event: AppEvent) {
        match self.focus {
            Focus::Events => {
                if self.events.handle(&event) {
                    self.on_event_changed();
                }
            }
            Focus::Mode => {
                if let Some(mode) = mode_picker::handle(self.mode, &event) {
                    self.set_mode(mode);
                }
            }
            Focus::Selector => {
                let changed = match self.mode {
                    ViewMode::SelectNote => self.notes.handle(&event),
                    ViewMode::SelectTime => self.times.handle(&event),
                    ViewMode::AllNotes => false,
                };
                if changed {
                    self.refresh();
                }
            }
            Focus::Map => {
                self.map.handle(&event, self.view.markers.len());
            }
            Focus::Command => {} // handled before dispatch, should not reach here
        }
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    state: AppState,
}

impl App {
    pub fn new(dataset: Dataset, config: Config, theme: Theme) -> Self {
        App {
            state: AppState::new(dataset, config, theme),
        }
    }

    /// Set up the terminal, run the event loop, and restore the terminal on exit.
    pub fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if self.state.quit {
                break;
            }

            if ct_event::poll(Duration::from_millis(50))? {
                match ct_event::read()? {
                    Event::Key(key) if key.kind == crossterm::event::KeyEventKind::Press => {
                        let raw = Event::Key(key);
                        let app_event = if self.state.focus == Focus::Command {
                            event::to_app_event_insert(raw)
                        } else {
                            event::to_app_event(raw)
                        };
                        if let Some(ev) = app_event {
                            tracing::debug!(focus = ?self.state.focus, event = ?ev, "key event");
                            self.state.handle(ev);
                        }
                    }
                    other => {
                        if let Some(ev) = event::to_app_event(other) {
                            self.state.handle(ev);
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

pub fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // Vertical: 1-line status bar | body
    let vert = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([Constraint::Length(1), Constraint::Fill(1)])
        .split(area);

    // Horizontal body split: sidebar | map column
    let pct = state.config.ui.sidebar_width_pct.clamp(10, 90);
    let horiz = Layout::default()
        .direction(LayoutDir::Horizontal)
        .constraints([Constraint::Percentage(pct), Constraint::Fill(1)])
        .split(vert[1]);

    frame.render_widget(
        StatusBar::new(
            state.battle(),
            state.mode,
            state.view.markers.len(),
            state.view.paths.len(),
            &state.theme,
        ),
        vert[0],
    );

    draw_sidebar(frame, state, horiz[0]);

    let map_col = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([Constraint::Fill(1), Constraint::Length(4)])
        .split(horiz[1]);

    frame.render_widget(
        MapCanvas::new(
            &state.view,
            &state.map,
            state.config.map.default_viewport(),
            state.focus == Focus::Map,
            &state.theme,
        ),
        map_col[0],
    );
    frame.render_widget(
        MarkerDetail::new(&state.view, state.map.focused, &state.theme),
        map_col[1],
    );

    if state.show_help {
        frame.render_widget(HelpPopup::new(&state.theme), area);
    }

    // Command bar overlays the bottom row of the screen
    if state.focus == Focus::Command {
        let cmd_area = Rect {
            y: area.bottom().saturating_sub(1),
            height: 1,
            ..area
        };
        frame.render_widget(CommandBar::new(&state.command_bar, &state.theme), cmd_area);
        let col = state.command_bar.cursor_col(cmd_area);
        frame.set_cursor_position((col, cmd_area.y));
    }
}

fn draw_sidebar(frame: &mut Frame, state: &AppState, area: Rect) {
    let mut constraints = Vec::with_capacity(4);
    if state.error.is_some() {
        constraints.push(Constraint::Length(5));
    }
    constraints.push(Constraint::Fill(1));
    constraints.push(Constraint::Length(5));
    match state.mode {
        ViewMode::SelectNote => constraints.push(Constraint::Fill(1)),
        ViewMode::SelectTime => constraints.push(Constraint::Length(5)),
        ViewMode::AllNotes => {}
    }

    let chunks = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints(constraints)
        .split(area);
    let mut slots = chunks.iter().copied();

    if let Some(ref msg) = state.error {
        if let Some(slot) = slots.next() {
            frame.render_widget(ErrorBanner::new(msg, &state.theme), slot);
        }
    }
    if let Some(slot) = slots.next() {
        frame.render_widget(
            SelectList::new("Events", &state.events, state.focus == Focus::Events, &state.theme),
            slot,
        );
    }
    if let Some(slot) = slots.next() {
        frame.render_widget(
            ModePicker::new(state.mode, state.focus == Focus::Mode, &state.theme),
            slot,
        );
    }
    if let Some(slot) = slots.next() {
        let focused = state.focus == Focus::Selector;
        match state.mode {
            ViewMode::SelectNote => frame.render_widget(
                SelectList::new("Select KeyEventNote", &state.notes, focused, &state.theme),
                slot,
            ),
            ViewMode::SelectTime => {
                frame.render_widget(TimeSlider::new(&state.times, focused, &state.theme), slot)
            }
            ViewMode::AllNotes => {}
        }
    }
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
