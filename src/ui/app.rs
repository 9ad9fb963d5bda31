use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use color_eyre::{Result, eyre::eyre};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use log::{error, info};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout, Margin, Rect},
    style::{Color, Modifier, Style, Stylize},
    symbols,
    text::{Line, Span},
    widgets::{
        Block, BorderType, Cell, HighlightSpacing, LineGauge, Paragraph, Row, Scrollbar,
        ScrollbarOrientation, ScrollbarState, Table, TableState, Tabs,
    },
};
use tokio::sync::mpsc::{self, error::TryRecvError};

use crate::app::CycleOutcome;
use crate::calc::{CycleReport, Ranked, rank};
use crate::config::{INFO_TEXT, ITEM_HEIGHT, PALETTE, POLL_DURATION_MS, REFRESH_INTERVAL_SECS};
use crate::data::{ChangeRecord, round2};
use crate::refresh::{RefreshLoop, RefreshTrigger};
use crate::ui::{TableColors, TopNSlider};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tab {
    Gainers,
    Losers,
}

impl Tab {
    fn index(self) -> usize {
        match self {
            Tab::Gainers => 0,
            Tab::Losers => 1,
        }
    }

    fn toggle(self) -> Self {
        match self {
            Tab::Gainers => Tab::Losers,
            Tab::Losers => Tab::Gainers,
        }
    }
}

pub struct TuiApp {
    state: TableState,
    scroll_state: ScrollbarState,
    colors: TableColors,
    tab: Tab,
    slider: TopNSlider,
    refresh: RefreshLoop,
    report: Option<CycleReport>,
    ranked: Ranked,
    last_error: Option<String>,
    last_updated: Option<DateTime<Local>>,
    requests: mpsc::UnboundedSender<RefreshTrigger>,
}

impl TuiApp {
    pub fn new(requests: mpsc::UnboundedSender<RefreshTrigger>) -> Self {
        Self {
            state: TableState::default().with_selected(0),
            scroll_state: ScrollbarState::new(0),
            colors: TableColors::new(&PALETTE),
            tab: Tab::Gainers,
            slider: TopNSlider::default(),
            refresh: RefreshLoop::new(Duration::from_secs(REFRESH_INTERVAL_SECS)),
            report: None,
            ranked: Ranked::default(),
            last_error: None,
            last_updated: None,
            requests,
        }
    }

    fn start_cycle(&mut self, trigger: RefreshTrigger) {
        if let Some(trigger) = self.refresh.request(trigger) {
            self.send_request(trigger);
        }
    }

    fn send_request(&mut self, trigger: RefreshTrigger) {
        info!("Cycle requested: {:?}", trigger);
        if self.requests.send(trigger).is_err() {
            error!("Cycle worker is gone; request {:?} dropped", trigger);
        }
    }

    fn apply_outcome(&mut self, outcome: CycleOutcome, now: Instant) {
        self.refresh.complete(now);
        match outcome {
            Ok(report) => {
                self.report = Some(report);
                self.last_error = None;
                self.last_updated = Some(Local::now());
            }
            Err(message) => {
                self.report = None;
                self.last_error = Some(message);
            }
        }
        self.rerank();
    }

    fn rerank(&mut self) {
        self.ranked = self
            .report
            .as_ref()
            .map(|report| rank(&report.records, self.slider.value()))
            .unwrap_or_default();
        self.reset_selection();
    }

    fn visible(&self) -> &[ChangeRecord] {
        match self.tab {
            Tab::Gainers => &self.ranked.gainers,
            Tab::Losers => &self.ranked.losers,
        }
    }

    fn reset_selection(&mut self) {
        let len = self.visible().len();
        let selected = self.state.selected().unwrap_or(0).min(len.saturating_sub(1));
        self.state.select(Some(selected));
        self.scroll_state = self
            .scroll_state
            .content_length(len.saturating_sub(1) * ITEM_HEIGHT)
            .position(selected * ITEM_HEIGHT);
    }

    fn next_row(&mut self) {
        let len = self.visible().len();
        let i = match self.state.selected() {
            Some(i) if i + 1 >= len => 0,
            Some(i) => i + 1,
            None => 0,
        };
        self.state.select(Some(i));
        self.scroll_state = self.scroll_state.position(i * ITEM_HEIGHT);
    }

    fn previous_row(&mut self) {
        let i = match self.state.selected() {
            Some(0) | None => 0,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
        self.scroll_state = self.scroll_state.position(i * ITEM_HEIGHT);
    }

    fn switch_tab(&mut self) {
        self.tab = self.tab.toggle();
        self.state.select(Some(0));
        self.reset_selection();
    }

    /// Returns `false` when the user asked to quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return false,
            KeyCode::Char('r') => self.start_cycle(RefreshTrigger::Manual),
            KeyCode::Char('R') => self.start_cycle(RefreshTrigger::RosterReload),
            KeyCode::Tab
            | KeyCode::BackTab
            | KeyCode::Left
            | KeyCode::Right
            | KeyCode::Char('h')
            | KeyCode::Char('l') => self.switch_tab(),
            KeyCode::Char('j') | KeyCode::Down => self.next_row(),
            KeyCode::Char('k') | KeyCode::Up => self.previous_row(),
            KeyCode::Char('+') | KeyCode::Char('=') => {
                if self.slider.increase() {
                    self.rerank();
                }
            }
            KeyCode::Char('-') | KeyCode::Char('_') => {
                if self.slider.decrease() {
                    self.rerank();
                }
            }
            _ => {}
        }
        true
    }

    pub fn run(
        mut self,
        mut terminal: DefaultTerminal,
        mut outcomes: mpsc::UnboundedReceiver<CycleOutcome>,
    ) -> Result<()> {
        self.start_cycle(RefreshTrigger::Startup);

        loop {
            loop {
                match outcomes.try_recv() {
                    Ok(outcome) => self.apply_outcome(outcome, Instant::now()),
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        return Err(eyre!("cycle worker stopped"));
                    }
                }
            }

            if let Some(trigger) = self.refresh.poll(Instant::now()) {
                self.send_request(trigger);
            }

            terminal.draw(|frame| self.draw(frame))?;

            if event::poll(Duration::from_millis(POLL_DURATION_MS))? {
                while event::poll(Duration::from_millis(0))? {
                    if let Event::Key(key) = event::read()? {
                        if key.kind == KeyEventKind::Press && !self.handle_key(key.code) {
                            return Ok(());
                        }
                    }
                }
            }
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        let [tabs_area, slider_area, table_area, status_area, footer_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(1),
            Constraint::Length(4),
        ])
        .areas(frame.area());

        self.render_tabs(frame, tabs_area);
        self.render_slider(frame, slider_area);
        self.render_table(frame, table_area);
        self.render_scrollbar(frame, table_area);
        self.render_status(frame, status_area);
        self.render_footer(frame, footer_area);
    }

    fn render_tabs(&self, frame: &mut Frame, area: Rect) {
        let tabs = Tabs::new(["Top Gainers", "Top Losers"])
            .select(self.tab.index())
            .style(Style::new().fg(self.colors.row_fg).bg(self.colors.buffer_bg))
            .highlight_style(
                Style::new()
                    .fg(self.colors.selected_row_style_fg)
                    .add_modifier(Modifier::BOLD),
            )
            .block(Block::bordered().title("S&P 500 - Top Gainers & Losers"));
        frame.render_widget(tabs, area);
    }

    fn render_slider(&self, frame: &mut Frame, area: Rect) {
        let gauge = LineGauge::default()
            .label(format!("Number of stocks to display: {:>2} ", self.slider.value()))
            .ratio(self.slider.ratio())
            .line_set(symbols::line::THICK)
            .filled_style(Style::new().fg(self.colors.selected_row_style_fg))
            .unfilled_style(Style::new().fg(self.colors.alt_row_color))
            .style(Style::new().fg(self.colors.row_fg).bg(self.colors.buffer_bg));
        frame.render_widget(gauge, area);
    }

    fn table_title(&self) -> String {
        let n = self.slider.value();
        match self.tab {
            Tab::Gainers => format!(" Top {n} Gainers in S&P 500 Today vs Yesterday "),
            Tab::Losers => format!(" Top {n} Losers in S&P 500 Today vs Yesterday "),
        }
    }

    fn render_table(&mut self, frame: &mut Frame, area: Rect) {
        let header_style = Style::default()
            .fg(self.colors.header_fg)
            .bg(self.colors.header_bg);
        let selected_row_style = Style::default()
            .add_modifier(Modifier::REVERSED)
            .fg(self.colors.selected_row_style_fg);

        let header: Row<'_> = [
            "Ticker",
            "Company",
            "Yesterday Close",
            "Today Close",
            "% Change",
        ]
        .into_iter()
        .map(Cell::from)
        .collect::<Row>()
        .style(header_style);

        let rows = self.visible().iter().enumerate().map(|(i, c)| {
            let bg = if i % 2 == 0 {
                self.colors.normal_row_color
            } else {
                self.colors.alt_row_color
            };
            let change = c.display_change();

            Row::new(vec![
                Cell::from(c.ticker.clone()),
                Cell::from(c.company.clone()),
                Cell::from(format!("{:.2}", round2(c.prior_close))),
                Cell::from(format!("{:.2}", round2(c.latest_close))),
                Cell::from(format!("{:.2}%", change))
                    .style(Style::new().fg(self.colors.change_color(change))),
            ])
            .style(Style::new().fg(self.colors.row_fg).bg(bg))
        });

        let table = Table::new(
            rows,
            [
                Constraint::Length(8),
                Constraint::Fill(2),
                Constraint::Fill(1),
                Constraint::Fill(1),
                Constraint::Fill(1),
            ],
        )
        .header(header)
        .block(Block::bordered().title(self.table_title()))
        .row_highlight_style(selected_row_style)
        .highlight_spacing(HighlightSpacing::Always)
        .bg(self.colors.buffer_bg);

        frame.render_stateful_widget(table, area, &mut self.state);
    }

    fn render_scrollbar(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_stateful_widget(
            Scrollbar::default()
                .orientation(ScrollbarOrientation::VerticalRight)
                .begin_symbol(None)
                .end_symbol(None),
            area.inner(Margin {
                vertical: 1,
                horizontal: 1,
            }),
            &mut self.scroll_state,
        );
    }

    fn status_line(&self, now: Instant) -> Line<'static> {
        let mut spans = Vec::new();

        if self.refresh.in_flight().is_some() {
            spans.push(Span::raw("Fetching data..."));
        } else if let Some(secs) = self.refresh.remaining_secs(now) {
            spans.push(Span::raw(format!(
                "Auto-refreshing in {secs} seconds... or press (r)"
            )));
        }

        if let Some(message) = &self.last_error {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(
                format!("Refresh failed: {message}"),
                Style::new().fg(Color::Red),
            ));
        } else if let Some(report) = &self.report {
            let updated = self
                .last_updated
                .map(|t| t.format("%H:%M:%S").to_string())
                .unwrap_or_default();
            spans.push(Span::raw(format!(
                " | {} vs {}: {} movers, {} skipped | updated {}",
                report.today,
                report.yesterday,
                report.records.len(),
                report.skipped.len(),
                updated
            )));
        }

        Line::from(spans)
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let status = Paragraph::new(self.status_line(Instant::now()))
            .style(Style::new().fg(self.colors.row_fg).bg(self.colors.buffer_bg));
        frame.render_widget(status, area);
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let info_footer = Paragraph::new(INFO_TEXT.join("\n"))
            .style(
                Style::new()
                    .fg(self.colors.row_fg)
                    .bg(self.colors.buffer_bg),
            )
            .centered()
            .block(
                Block::bordered()
                    .border_type(BorderType::Double)
                    .border_style(Style::new().fg(self.colors.footer_border_color)),
            );
        frame.render_widget(info_footer, area);
    }
}
