use ratatui::{
    backend::CrosstermBackend,
    widgets::{Block, Borders, Paragraph, Tabs as TabBar},
    layout::{Layout, Constraint, Direction, Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    Terminal, Frame,
};
use crossterm::{
    terminal::{enable_raw_mode, disable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    event::{self, Event, KeyCode, KeyEventKind},
    ExecutableCommand,
};
use std::io;
use std::time::Duration;

use crate::config::UiConfig;
use crate::utils::formatting::truncate_string;
use crate::visualization::tabs::Tabs;

const MAX_TAB_TITLE: usize = 16;

pub struct App {
    pub should_quit: bool,
    pub selected_tab: usize,
    pub dashboard: Tabs,
    pub title: String,
    refresh_rate: Duration,
}

impl App {
    pub fn new(dashboard: Tabs, title: impl Into<String>, ui: &UiConfig) -> App {
        let selected_tab = ui.default_tab.min(dashboard.len().saturating_sub(1));
        App {
            should_quit: false,
            selected_tab,
            dashboard,
            title: title.into(),
            refresh_rate: Duration::from_millis(ui.refresh_rate_ms.max(10)),
        }
    }

    pub fn next_tab(&mut self) {
        if !self.dashboard.is_empty() {
            self.selected_tab = (self.selected_tab + 1) % self.dashboard.len();
        }
    }

    pub fn previous_tab(&mut self) {
        if !self.dashboard.is_empty() {
            self.selected_tab = if self.selected_tab == 0 {
                self.dashboard.len() - 1
            } else {
                self.selected_tab - 1
            };
        }
    }

    /// Select by zero-based index; out-of-range indices are ignored.
    pub fn select_tab(&mut self, index: usize) {
        if index < self.dashboard.len() {
            self.selected_tab = index;
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::Right => self.next_tab(),
            KeyCode::BackTab | KeyCode::Left => self.previous_tab(),
            KeyCode::Char(c) if c.is_ascii_digit() && c != '0' => {
                self.select_tab(c as usize - '1' as usize);
            }
            _ => {}
        }
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        enable_raw_mode()?;
        io::stdout().execute(EnterAlternateScreen)?;

        let result = self.event_loop();

        // Restore the terminal even when the loop failed
        disable_raw_mode()?;
        io::stdout().execute(LeaveAlternateScreen)?;
        result
    }

    fn event_loop(&mut self) -> anyhow::Result<()> {
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        while !self.should_quit {
            terminal.draw(|f| self.draw(f))?;

            if event::poll(self.refresh_rate)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }
        Ok(())
    }

    pub fn draw(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),  // Tab bar
                Constraint::Min(0),     // Selected tab
                Constraint::Length(3),  // Footer
            ])
            .split(f.size());

        self.draw_header(f, chunks[0]);
        self.draw_tab(f, chunks[1]);
        self.draw_footer(f, chunks[2]);
    }

    fn draw_header(&self, f: &mut Frame, area: Rect) {
        let titles: Vec<Line> = self
            .dashboard
            .titles()
            .into_iter()
            .map(|title| Line::from(Span::raw(truncate_string(title, MAX_TAB_TITLE))))
            .collect();

        let tabs = TabBar::new(titles)
            .block(Block::default().borders(Borders::ALL).title(self.title.clone()))
            .select(self.selected_tab)
            .style(Style::default().fg(Color::White))
            .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));

        f.render_widget(tabs, area);
    }

    fn draw_tab(&self, f: &mut Frame, area: Rect) {
        match self.dashboard.tabs.get(self.selected_tab) {
            Some(tab) => tab.child.render(area, f),
            None => {
                let empty = Paragraph::new("No tabs to show: no matching data files were found")
                    .block(Block::default().borders(Borders::ALL))
                    .alignment(Alignment::Center);
                f.render_widget(empty, area);
            }
        }
    }

    fn draw_footer(&self, f: &mut Frame, area: Rect) {
        let help_text = format!(
            "Press 'q' to quit | Tab/Shift-Tab or 1-9 to switch tabs | {} of {}",
            (self.selected_tab + 1).min(self.dashboard.len()),
            self.dashboard.len()
        );
        let footer = Paragraph::new(help_text)
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center);

        f.render_widget(footer, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panels::tab_body;
    use crate::visualization::layouts::SizingMode;
    use ratatui::backend::TestBackend;

    fn app_with_tabs(count: usize) -> App {
        let tabs = (0..count).map(|_| tab_body(&[], &[])).collect();
        App::new(Tabs::new(tabs, SizingMode::StretchWidth), "plots", &UiConfig::default())
    }

    #[test]
    fn test_tab_navigation_wraps() {
        let mut app = app_with_tabs(3);
        app.previous_tab();
        assert_eq!(app.selected_tab, 2);
        app.next_tab();
        assert_eq!(app.selected_tab, 0);

        app.handle_key(KeyCode::Char('2'));
        assert_eq!(app.selected_tab, 1);
        app.handle_key(KeyCode::Char('9'));
        assert_eq!(app.selected_tab, 1);
        app.handle_key(KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_default_tab_is_clamped() {
        let ui = UiConfig { default_tab: 5, ..UiConfig::default() };
        let app = App::new(Tabs::default(), "plots", &ui);
        assert_eq!(app.selected_tab, 0);

        let mut empty = app;
        empty.next_tab();
        assert_eq!(empty.selected_tab, 0);
    }

    #[test]
    fn test_draw() {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        let app = app_with_tabs(2);
        terminal.draw(|f| app.draw(f)).unwrap();

        let empty = App::new(Tabs::default(), "plots", &UiConfig::default());
        terminal.draw(|f| empty.draw(f)).unwrap();
    }
}
