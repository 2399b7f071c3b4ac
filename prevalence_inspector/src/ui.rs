use std::collections::VecDeque;

use ratatui::layout::{Constraint, Direction, Layout, Margin};
use ratatui::prelude::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Axis, Bar, BarChart, BarGroup, Block, Borders, Cell, Chart, Dataset, GraphType, Paragraph,
    Row, Table, Tabs, Wrap,
};
use ratatui::Frame;

use prevalence_core::{
    region_of, Dashboard, Disorder, SortOrder, SummaryPanel, TableColumn, TableQuery,
    DISORDER_COUNT,
};

const SERIES_COLORS: [Color; 8] = [
    Color::Cyan,
    Color::Yellow,
    Color::Magenta,
    Color::Green,
    Color::LightRed,
    Color::LightBlue,
    Color::White,
    Color::LightGreen,
];

/// Anchor colours of the plasma scale, low to high.
const PLASMA: [(u8, u8, u8); 5] = [
    (13, 8, 135),
    (126, 3, 168),
    (204, 71, 120),
    (248, 149, 64),
    (240, 249, 33),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Overview,
    Trends,
    Comparison,
    Correlation,
    Table,
    Countries,
}

impl Tab {
    pub const ALL: [Tab; 6] = [
        Tab::Overview,
        Tab::Trends,
        Tab::Comparison,
        Tab::Correlation,
        Tab::Table,
        Tab::Countries,
    ];

    fn title(self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::Trends => "Trends",
            Tab::Comparison => "Comparison",
            Tab::Correlation => "Correlation",
            Tab::Table => "Table",
            Tab::Countries => "Countries",
        }
    }

    fn position(self) -> usize {
        Tab::ALL.iter().position(|tab| *tab == self).unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    EditingFilter,
}

pub struct UiState {
    pub tab: Tab,
    pub mode: InputMode,
    pub country_cursor: usize,
    pub table_query: TableQuery,
    pub filter_input: String,
    pub logs: VecDeque<String>,
    pub max_logs: usize,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            tab: Tab::Overview,
            mode: InputMode::Normal,
            country_cursor: 0,
            table_query: TableQuery::default(),
            filter_input: String::new(),
            logs: VecDeque::new(),
            max_logs: 4,
        }
    }
}

impl UiState {
    pub fn push_log<S: Into<String>>(&mut self, line: S) {
        let mut text: String = line.into();
        while text.ends_with('\n') || text.ends_with('\r') {
            text.pop();
        }
        if text.is_empty() {
            return;
        }
        self.logs.push_front(text);
        while self.logs.len() > self.max_logs {
            self.logs.pop_back();
        }
    }

    pub fn next_tab(&mut self) {
        self.tab = Tab::ALL[(self.tab.position() + 1) % Tab::ALL.len()];
    }

    pub fn previous_tab(&mut self) {
        self.tab = Tab::ALL[(self.tab.position() + Tab::ALL.len() - 1) % Tab::ALL.len()];
    }

    pub fn move_cursor(&mut self, delta: isize, len: usize) {
        if len == 0 {
            self.country_cursor = 0;
            return;
        }
        let max = len as isize - 1;
        self.country_cursor = (self.country_cursor as isize + delta).clamp(0, max) as usize;
    }

    pub fn cycle_sort_column(&mut self) {
        self.table_query.sort = Some(match self.table_query.sort {
            None => (TableColumn::Entity, SortOrder::Ascending),
            Some((column, order)) => (column.next(), order),
        });
        self.table_query.page = 0;
    }

    pub fn reverse_sort(&mut self) {
        if let Some((column, order)) = self.table_query.sort {
            self.table_query.sort = Some((column, order.reversed()));
        }
    }

    /// Step the table page, kept within `0..page_count`.
    pub fn change_page(&mut self, delta: isize, page_count: usize) {
        let last = page_count.saturating_sub(1) as isize;
        self.table_query.page = (self.table_query.page as isize + delta).clamp(0, last) as usize;
    }

    pub fn begin_filter_edit(&mut self) {
        self.mode = InputMode::EditingFilter;
        self.filter_input = self.table_query.filter.clone().unwrap_or_default();
    }

    pub fn commit_filter_edit(&mut self) {
        let text = self.filter_input.trim().to_string();
        self.table_query.filter = if text.is_empty() { None } else { Some(text) };
        self.table_query.page = 0;
        self.mode = InputMode::Normal;
    }

    pub fn cancel_filter_edit(&mut self) {
        self.filter_input.clear();
        self.mode = InputMode::Normal;
    }
}

pub fn draw_ui(frame: &mut Frame, state: &UiState, dashboard: &Dashboard) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(3),
            Constraint::Min(12),
            Constraint::Length(6),
            Constraint::Length(3),
        ])
        .split(frame.size());

    draw_header(frame, chunks[0], dashboard);
    draw_tabs(frame, chunks[1], state);
    match state.tab {
        Tab::Overview => draw_overview(frame, chunks[2], dashboard),
        Tab::Trends => draw_trends(frame, chunks[2], dashboard),
        Tab::Comparison => draw_comparison(frame, chunks[2], dashboard),
        Tab::Correlation => draw_correlation(frame, chunks[2], dashboard),
        Tab::Table => draw_table(frame, chunks[2], state, dashboard),
        Tab::Countries => draw_countries(frame, chunks[2], state, dashboard),
    }
    draw_logs(frame, chunks[3], state);
    draw_commands(frame, chunks[4], state);
}

fn inner(area: Rect) -> Rect {
    area.inner(&Margin {
        vertical: 1,
        horizontal: 1,
    })
}

fn draw_header(frame: &mut Frame, area: Rect, dashboard: &Dashboard) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Mental Health Prevalence Dashboard");
    let filter = dashboard.filter();
    let (first, last) = dashboard.dataset().year_range();
    let marks = dashboard
        .dataset()
        .year_marks(dashboard.config().year_mark_step())
        .iter()
        .map(|year| year.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    let countries = if filter.countries().is_empty() {
        "(none selected)".to_string()
    } else {
        filter.countries().join(", ")
    };
    let metrics = dashboard.metrics();

    let lines = vec![
        Line::from(vec![
            Span::styled(
                format!("Selected year: {}", filter.year),
                Style::default().fg(Color::Yellow),
            ),
            Span::raw(format!("  ({first}-{last}; marks {marks})")),
            Span::raw("  | disorder "),
            Span::styled(filter.disorder.label(), Style::default().fg(Color::Cyan)),
        ]),
        Line::from(vec![
            Span::raw("Countries: "),
            Span::styled(countries, Style::default().fg(Color::Magenta)),
        ]),
        Line::from(Span::styled(
            format!(
                "{} rows | {} interactions | last recompute: {} views in {} us",
                dashboard.dataset().len(),
                metrics.interactions,
                metrics.last_views,
                metrics.last_elapsed_us
            ),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(block, area);
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner(area));
}

fn draw_tabs(frame: &mut Frame, area: Rect, state: &UiState) {
    let titles: Vec<Line> = Tab::ALL.iter().map(|tab| Line::from(tab.title())).collect();
    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL))
        .select(state.tab.position())
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, area);
}

fn draw_placeholder(frame: &mut Frame, area: Rect, title: &str, message: &str) {
    let block = Block::default().borders(Borders::ALL).title(title.to_string());
    let text = Paragraph::new(Line::from(Span::styled(
        message.to_string(),
        Style::default().fg(Color::DarkGray),
    )))
    .wrap(Wrap { trim: true });
    frame.render_widget(block, area);
    frame.render_widget(text, inner(area));
}

fn draw_overview(frame: &mut Frame, area: Rect, dashboard: &Dashboard) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(area);
    draw_world_map(frame, columns[0], dashboard);
    draw_summary(frame, columns[1], dashboard);
}

fn draw_world_map(frame: &mut Frame, area: Rect, dashboard: &Dashboard) {
    let view = &dashboard.views().world_map;
    let title = format!("Prevalence of {} in {}", view.disorder.label(), view.year);
    let Some((low, high)) = view.value_range() else {
        draw_placeholder(frame, area, &title, "No mapped values for this year");
        return;
    };

    let bar_width = 20usize;
    let rows: Vec<Row> = view
        .renderable()
        .map(|entry| {
            let code = entry.code.clone().unwrap_or_default();
            let region = region_of(entry.code.as_deref()).label();
            let (value_text, bar, color) = match entry.value {
                Some(value) => {
                    let t = normalise(value, low, high);
                    let filled = (t * bar_width as f64).round() as usize;
                    (
                        format!("{value:.2}"),
                        "█".repeat(filled.max(1)),
                        plasma(t),
                    )
                }
                None => ("n/a".to_string(), String::new(), Color::DarkGray),
            };
            Row::new(vec![
                Cell::from(code),
                Cell::from(entry.country.clone()),
                Cell::from(value_text),
                Cell::from(region),
                Cell::from(bar).style(Style::default().fg(color)),
            ])
        })
        .collect();

    let header = Row::new(vec!["Code", "Country", "%", "Region", "Scale"])
        .style(Style::default().add_modifier(Modifier::BOLD));
    let table = Table::new(
        rows,
        [
            Constraint::Length(5),
            Constraint::Length(22),
            Constraint::Length(7),
            Constraint::Length(9),
            Constraint::Min(bar_width as u16),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(table, area);
}

fn draw_summary(frame: &mut Frame, area: Rect, dashboard: &Dashboard) {
    let title = "Global statistics";
    let stats = match &dashboard.views().summary {
        SummaryPanel::Ready(stats) => stats,
        SummaryPanel::NoData { message } => {
            draw_placeholder(frame, area, title, message);
            return;
        }
    };
    let lines = vec![
        Line::from(Span::styled("Global mean", Style::default().fg(Color::Cyan))),
        Line::from(Span::styled(
            format!("{:.2}%", stats.mean),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!(
            "Mean prevalence of {} in {} ({} countries)",
            stats.disorder.label(),
            stats.year,
            stats.samples
        )),
        Line::from(""),
        Line::from(Span::styled("Maximum", Style::default().fg(Color::LightRed))),
        Line::from(format!("{:.2}%  {}", stats.max.value, stats.max.country)),
        Line::from(""),
        Line::from(Span::styled("Minimum", Style::default().fg(Color::Green))),
        Line::from(format!("{:.2}%  {}", stats.min.value, stats.min.country)),
    ];
    frame.render_widget(Block::default().borders(Borders::ALL).title(title), area);
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner(area));
}

fn draw_trends(frame: &mut Frame, area: Rect, dashboard: &Dashboard) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    let views = dashboard.views();

    let country_title = format!("{} over time", views.time_series.disorder.label());
    if views.time_series.is_empty() {
        draw_placeholder(
            frame,
            rows[0],
            &country_title,
            "Select countries on the Countries tab",
        );
    } else {
        let series: Vec<(String, Vec<(f64, f64)>)> = views
            .time_series
            .series
            .iter()
            .map(|series| {
                let points: Vec<(f64, f64)> = series
                    .points
                    .iter()
                    .filter_map(|(year, value)| value.map(|v| (*year as f64, v)))
                    .collect();
                (series.country.clone(), points)
            })
            .collect();
        draw_line_chart(frame, rows[0], &country_title, "Prevalence (%)", series);
    }

    let region_title = format!(
        "Regional trends for {}",
        views.regional_trends.disorder.label()
    );
    let series: Vec<(String, Vec<(f64, f64)>)> = views
        .regional_trends
        .series
        .iter()
        .map(|series| {
            let points: Vec<(f64, f64)> = series
                .points
                .iter()
                .map(|(year, mean)| (*year as f64, *mean))
                .collect();
            (series.region.label().to_string(), points)
        })
        .collect();
    draw_line_chart(frame, rows[1], &region_title, "Mean prevalence (%)", series);
}

fn draw_line_chart(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    y_title: &str,
    series: Vec<(String, Vec<(f64, f64)>)>,
) {
    let all_points = || series.iter().flat_map(|(_, points)| points.iter());
    if all_points().next().is_none() {
        draw_placeholder(frame, area, title, "No data for the current selection");
        return;
    }
    let x_min = all_points().map(|p| p.0).fold(f64::MAX, f64::min);
    let x_max = all_points().map(|p| p.0).fold(f64::MIN, f64::max);
    let y_max = all_points().map(|p| p.1).fold(0.0, f64::max);
    let (x_min, x_max) = if x_min == x_max {
        (x_min - 1.0, x_max + 1.0)
    } else {
        (x_min, x_max)
    };
    let y_max = if y_max <= 0.0 { 1.0 } else { y_max * 1.1 };

    let datasets: Vec<Dataset> = series
        .iter()
        .enumerate()
        .map(|(index, (name, points))| {
            Dataset::default()
                .name(name.clone())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(SERIES_COLORS[index % SERIES_COLORS.len()]))
                .data(points)
        })
        .collect();

    let chart = Chart::new(datasets)
        .block(Block::default().borders(Borders::ALL).title(title.to_string()))
        .x_axis(
            Axis::default()
                .title("Year")
                .bounds([x_min, x_max])
                .labels(vec![
                    Span::raw(format!("{x_min:.0}")),
                    Span::raw(format!("{:.0}", (x_min + x_max) / 2.0)),
                    Span::raw(format!("{x_max:.0}")),
                ]),
        )
        .y_axis(
            Axis::default()
                .title(y_title.to_string())
                .bounds([0.0, y_max])
                .labels(vec![
                    Span::raw("0"),
                    Span::raw(format!("{:.1}", y_max / 2.0)),
                    Span::raw(format!("{y_max:.1}")),
                ]),
        );
    frame.render_widget(chart, area);
}

fn short_label(disorder: Disorder) -> &'static str {
    match disorder {
        Disorder::Schizophrenia => "Scz",
        Disorder::BipolarDisorder => "Bip",
        Disorder::EatingDisorders => "Eat",
        Disorder::AnxietyDisorders => "Anx",
        Disorder::DrugUseDisorders => "Drg",
        Disorder::Depression => "Dep",
        Disorder::AlcoholUseDisorders => "Alc",
    }
}

/// Bar heights are integers; values are drawn in hundredths of a percent.
fn bar_units(value: f64) -> u64 {
    (value * 100.0).round().max(0.0) as u64
}

fn draw_comparison(frame: &mut Frame, area: Rect, dashboard: &Dashboard) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);
    draw_disorder_profiles(frame, rows[0], dashboard);
    draw_top_countries(frame, rows[1], dashboard);
}

fn draw_disorder_profiles(frame: &mut Frame, area: Rect, dashboard: &Dashboard) {
    let view = &dashboard.views().comparison;
    let title = format!("Disorder comparison by country in {}", view.year);
    if view.profiles.is_empty() {
        draw_placeholder(
            frame,
            area,
            &title,
            "No selected country has data for this year",
        );
        return;
    }

    let groups: Vec<(String, Vec<Bar>)> = view
        .profiles
        .iter()
        .map(|profile| {
            let bars = view
                .axes
                .iter()
                .map(|disorder| {
                    let value = profile.values[disorder.index()];
                    Bar::default()
                        .value(value.map(bar_units).unwrap_or(0))
                        .text_value(value.map(|v| format!("{v:.1}")).unwrap_or_default())
                        .label(Line::from(short_label(*disorder)))
                        .style(
                            Style::default()
                                .fg(SERIES_COLORS[disorder.index() % SERIES_COLORS.len()]),
                        )
                })
                .collect();
            (profile.country.clone(), bars)
        })
        .collect();

    let mut chart = BarChart::default()
        .block(Block::default().borders(Borders::ALL).title(title))
        .bar_width(3)
        .bar_gap(0)
        .group_gap(2);
    if let Some(max) = view.radial_max {
        chart = chart.max(bar_units(max));
    }
    for (country, bars) in &groups {
        chart = chart.data(
            BarGroup::default()
                .label(Line::from(country.clone()))
                .bars(bars),
        );
    }
    frame.render_widget(chart, area);
}

fn draw_top_countries(frame: &mut Frame, area: Rect, dashboard: &Dashboard) {
    let view = &dashboard.views().top_countries;
    let title = format!(
        "Top {} countries for {} in {}",
        view.ranking.len(),
        view.disorder.label(),
        view.year
    );
    if view.ranking.is_empty() {
        draw_placeholder(frame, area, &title, "No values recorded for this year");
        return;
    }
    let high = view.ranking.first().map(|r| r.value).unwrap_or(0.0);
    let low = view.ranking.last().map(|r| r.value).unwrap_or(0.0);
    let bars: Vec<Bar> = view
        .ranking
        .iter()
        .map(|ranked| {
            let label = ranked
                .code
                .clone()
                .unwrap_or_else(|| ranked.country.chars().take(3).collect());
            Bar::default()
                .value(bar_units(ranked.value))
                .text_value(format!("{:.2}", ranked.value))
                .label(Line::from(label))
                .style(Style::default().fg(plasma(normalise(ranked.value, low, high))))
        })
        .collect();
    let chart = BarChart::default()
        .block(Block::default().borders(Borders::ALL).title(title))
        .bar_width(6)
        .bar_gap(1)
        .data(BarGroup::default().bars(&bars));
    frame.render_widget(chart, area);
}

fn draw_correlation(frame: &mut Frame, area: Rect, dashboard: &Dashboard) {
    let view = &dashboard.views().correlation;
    let title = format!("Correlation between disorders in {}", view.year);

    let header_cells = std::iter::once(Cell::from(""))
        .chain(view.axes.iter().map(|d| Cell::from(short_label(*d))))
        .collect::<Vec<_>>();
    let header = Row::new(header_cells).style(Style::default().add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = view
        .axes
        .iter()
        .map(|row_disorder| {
            let mut cells = vec![Cell::from(row_disorder.label())];
            for column_disorder in view.axes.iter() {
                let value = view.get(*row_disorder, *column_disorder);
                let cell = if value.is_nan() {
                    Cell::from("  n/a").style(Style::default().fg(Color::DarkGray))
                } else {
                    let background = plasma((value + 1.0) / 2.0);
                    Cell::from(format!("{value:+.2}"))
                        .style(Style::default().bg(background).fg(Color::Black))
                };
                cells.push(cell);
            }
            Row::new(cells)
        })
        .collect();

    let mut widths = vec![Constraint::Length(22)];
    widths.extend(std::iter::repeat(Constraint::Length(6)).take(DISORDER_COUNT));
    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(table, area);
}

fn draw_table(frame: &mut Frame, area: Rect, state: &UiState, dashboard: &Dashboard) {
    let view = &dashboard.views().table;
    let page = state
        .table_query
        .apply(&view.rows, dashboard.config().table_page_size());

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(1)])
        .split(area);

    let header_cells: Vec<Cell> = TableColumn::all()
        .map(|column| {
            let label = match column {
                TableColumn::Metric(disorder) => short_label(disorder).to_string(),
                other => other.title().to_string(),
            };
            let marker = match state.table_query.sort {
                Some((sorted, SortOrder::Ascending)) if sorted == column => " ▲",
                Some((sorted, SortOrder::Descending)) if sorted == column => " ▼",
                _ => "",
            };
            Cell::from(format!("{label}{marker}"))
        })
        .collect();
    let header = Row::new(header_cells).style(
        Style::default()
            .bg(Color::Gray)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = page
        .rows
        .iter()
        .map(|record| {
            let mut cells = vec![
                Cell::from(record.country_name.clone()),
                Cell::from(record.code().unwrap_or("").to_string()),
                Cell::from(record.year.to_string()),
            ];
            cells.extend(record.metrics.iter().map(|value| {
                Cell::from(value.map(|v| format!("{v:.2}")).unwrap_or_default())
            }));
            Row::new(cells)
        })
        .collect();

    let mut widths = vec![
        Constraint::Length(20),
        Constraint::Length(6),
        Constraint::Length(6),
    ];
    widths.extend(std::iter::repeat(Constraint::Length(7)).take(DISORDER_COUNT));
    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Data table ({})", view.year)),
    );
    frame.render_widget(table, sections[0]);

    let filter_text = match state.mode {
        InputMode::EditingFilter => format!("/{}_", state.filter_input),
        InputMode::Normal => state.table_query.filter.clone().unwrap_or_default(),
    };
    let footer = Line::from(vec![
        Span::styled(
            format!("Page {}/{}", page.page + 1, page.page_count),
            Style::default().fg(Color::Yellow),
        ),
        Span::raw(format!(" | {} rows | filter: ", page.total_rows)),
        Span::styled(filter_text, Style::default().fg(Color::Cyan)),
    ]);
    frame.render_widget(Paragraph::new(footer), sections[1]);
}

fn draw_countries(frame: &mut Frame, area: Rect, state: &UiState, dashboard: &Dashboard) {
    let countries = dashboard.dataset().countries();
    let filter = dashboard.filter();
    let visible = inner(area).height.max(1) as usize;
    let start = state
        .country_cursor
        .saturating_sub(visible / 2)
        .min(countries.len().saturating_sub(visible));

    let lines: Vec<Line> = countries
        .iter()
        .enumerate()
        .skip(start)
        .take(visible)
        .map(|(index, country)| {
            let mark = if filter.is_selected(country) { "[x]" } else { "[ ]" };
            let style = if index == state.country_cursor {
                Style::default().fg(Color::Black).bg(Color::Yellow)
            } else if filter.is_selected(country) {
                Style::default().fg(Color::Magenta)
            } else {
                Style::default()
            };
            Line::from(Span::styled(format!("{mark} {country}"), style))
        })
        .collect();

    let title = format!(
        "Countries ({} of {} selected)",
        filter.countries().len(),
        countries.len()
    );
    frame.render_widget(Block::default().borders(Borders::ALL).title(title), area);
    frame.render_widget(Paragraph::new(lines), inner(area));
}

fn draw_logs(frame: &mut Frame, area: Rect, state: &UiState) {
    let block = Block::default().borders(Borders::ALL).title("Logs");
    let lines: Vec<Line> = state
        .logs
        .iter()
        .map(|entry| Line::from(Span::raw(entry)))
        .collect();
    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(block, area);
    frame.render_widget(paragraph, inner(area));
}

fn draw_commands(frame: &mut Frame, area: Rect, state: &UiState) {
    let key = |text: &'static str| Span::styled(text, Style::default().fg(Color::Yellow));
    let mut spans = vec![
        key("←/→"),
        Span::raw(" year  "),
        key("↑/↓"),
        Span::raw(" disorder  "),
        key("tab"),
        Span::raw(" view  "),
    ];
    match state.tab {
        Tab::Countries => spans.extend([
            key("j/k"),
            Span::raw(" move  "),
            key("space"),
            Span::raw(" toggle  "),
            key("c"),
            Span::raw(" clear  "),
        ]),
        Tab::Table => spans.extend([
            key("n/p"),
            Span::raw(" page  "),
            key("s/r"),
            Span::raw(" sort  "),
            key("/"),
            Span::raw(" filter  "),
        ]),
        _ => {}
    }
    spans.extend([key("q"), Span::raw(" exit")]);
    let block = Block::default().borders(Borders::ALL).title("Commands");
    frame.render_widget(block, area);
    frame.render_widget(Paragraph::new(Line::from(spans)), inner(area));
}

fn normalise(value: f64, low: f64, high: f64) -> f64 {
    if high > low {
        ((value - low) / (high - low)).clamp(0.0, 1.0)
    } else {
        1.0
    }
}

/// Linear interpolation along [`PLASMA`] for `t` in `[0, 1]`.
fn plasma(t: f64) -> Color {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let scaled = t * (PLASMA.len() - 1) as f64;
    let index = (scaled.floor() as usize).min(PLASMA.len() - 2);
    let local = scaled - index as f64;
    let (r0, g0, b0) = PLASMA[index];
    let (r1, g1, b1) = PLASMA[index + 1];
    let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * local).round() as u8;
    Color::Rgb(mix(r0, r1), mix(g0, g1), mix(b0, b1))
}
