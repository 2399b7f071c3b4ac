use std::time::{Duration, Instant};

use color_eyre::Result;
use crossbeam_channel::Receiver;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::*;
use tracing::{info, trace};

use prevalence_core::log_stream::LogEnvelope;
use prevalence_core::{Dashboard, FilterState, ViewKind};

use crate::ui::{draw_ui, InputMode, Tab, UiState};

pub struct InspectorApp {
    terminal: Terminal<CrosstermBackend<std::io::Stdout>>,
    ui_state: UiState,
    dashboard: Dashboard,
    log_receiver: Receiver<LogEnvelope>,
}

impl InspectorApp {
    pub fn new(dashboard: Dashboard, log_receiver: Receiver<LogEnvelope>) -> Result<Self> {
        let mut stdout = std::io::stdout();
        crossterm::terminal::enable_raw_mode()?;
        crossterm::execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;
        terminal.hide_cursor()?;
        Ok(Self {
            terminal,
            ui_state: UiState::default(),
            dashboard,
            log_receiver,
        })
    }

    pub fn run(mut self) -> Result<()> {
        let outcome = self.event_loop();
        self.terminal.show_cursor()?;
        crossterm::execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        crossterm::terminal::disable_raw_mode()?;
        outcome
    }

    fn event_loop(&mut self) -> Result<()> {
        let mut last_draw: Option<Instant> = None;
        let mut dirty = true;

        loop {
            while let Ok(envelope) = self.log_receiver.try_recv() {
                self.ui_state.push_log(envelope.summary_line());
                dirty = true;
            }

            let stale = last_draw.map_or(true, |at| at.elapsed() >= Duration::from_millis(100));
            if dirty && stale {
                self.terminal
                    .draw(|frame| draw_ui(frame, &self.ui_state, &self.dashboard))?;
                last_draw = Some(Instant::now());
                dirty = false;
            }

            if event::poll(Duration::from_millis(50))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        dirty = true;
                        let keep_running = match self.ui_state.mode {
                            InputMode::EditingFilter => {
                                self.handle_filter_key(key);
                                true
                            }
                            InputMode::Normal => self.handle_key(key),
                        };
                        if !keep_running {
                            break;
                        }
                    }
                    Event::Resize(_, _) => dirty = true,
                    _ => {}
                }
            }
        }

        info!("Inspector requested shutdown");
        Ok(())
    }

    /// Returns `false` when the inspector should exit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        let filter = self.dashboard.filter().clone();
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return false,
            KeyCode::Left => {
                let year = self.dashboard.dataset().clamp_year(filter.year - 1);
                self.apply(filter.with_year(year));
            }
            KeyCode::Right => {
                let year = self.dashboard.dataset().clamp_year(filter.year + 1);
                self.apply(filter.with_year(year));
            }
            KeyCode::Up => self.apply(filter.with_disorder(filter.disorder.previous())),
            KeyCode::Down => self.apply(filter.with_disorder(filter.disorder.next())),
            KeyCode::Tab => self.ui_state.next_tab(),
            KeyCode::BackTab => self.ui_state.previous_tab(),
            code => match self.ui_state.tab {
                Tab::Countries => self.handle_countries_key(code, &filter),
                Tab::Table => self.handle_table_key(code),
                _ => {}
            },
        }
        true
    }

    fn handle_countries_key(&mut self, code: KeyCode, filter: &FilterState) {
        let total = self.dashboard.dataset().countries().len();
        match code {
            KeyCode::Char('j') => self.ui_state.move_cursor(1, total),
            KeyCode::Char('k') => self.ui_state.move_cursor(-1, total),
            KeyCode::PageDown => self.ui_state.move_cursor(10, total),
            KeyCode::PageUp => self.ui_state.move_cursor(-10, total),
            KeyCode::Char(' ') => {
                let Some(country) = self
                    .dashboard
                    .dataset()
                    .countries()
                    .get(self.ui_state.country_cursor)
                    .cloned()
                else {
                    return;
                };
                self.apply(filter.toggling(&country));
            }
            KeyCode::Char('c') => {
                self.apply(filter.with_countries(std::iter::empty::<String>()));
            }
            _ => {}
        }
    }

    fn handle_table_key(&mut self, code: KeyCode) {
        let page_count = self
            .ui_state
            .table_query
            .apply(
                &self.dashboard.views().table.rows,
                self.dashboard.config().table_page_size(),
            )
            .page_count;
        match code {
            KeyCode::Char('n') => self.ui_state.change_page(1, page_count),
            KeyCode::Char('p') => self.ui_state.change_page(-1, page_count),
            KeyCode::Char('s') => self.ui_state.cycle_sort_column(),
            KeyCode::Char('r') => self.ui_state.reverse_sort(),
            KeyCode::Char('/') => self.ui_state.begin_filter_edit(),
            _ => {}
        }
    }

    fn handle_filter_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                self.ui_state.commit_filter_edit();
                trace!(filter = ?self.ui_state.table_query.filter, "table.filter");
            }
            KeyCode::Esc => self.ui_state.cancel_filter_edit(),
            KeyCode::Backspace => {
                self.ui_state.filter_input.pop();
            }
            KeyCode::Char(ch) => self.ui_state.filter_input.push(ch),
            _ => {}
        }
    }

    fn apply(&mut self, next: FilterState) {
        let recomputed = self.dashboard.apply(next);
        if recomputed.is_empty() {
            return;
        }
        if recomputed.contains(&ViewKind::Table) {
            self.ui_state.table_query.page = 0;
        }
        let filter = self.dashboard.filter();
        info!(
            year = filter.year,
            disorder = filter.disorder.id(),
            countries = filter.countries().len(),
            views = recomputed.len(),
            "filter.applied"
        );
    }
}
