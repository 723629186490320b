use ratatui::widgets::TableState;
use timetally_core::{format_hms, FileTracker, Summary, TrackerError};
use uuid::Uuid;

use crate::describe;

pub enum InputMode {
    Normal,
    Adding,
}

/// What the right-hand panel shows.
pub enum Panel {
    Today,
    Report { title: String, summary: Summary },
}

pub struct App {
    pub tracker: FileTracker,
    pub state: TableState,
    pub input: String,
    pub input_mode: InputMode,
    pub cursor_position: usize,
    pub status: Option<String>,
    pub panel: Panel,
}

impl App {
    pub fn new(tracker: FileTracker) -> App {
        let mut state = TableState::default();
        if !tracker.projects().is_empty() {
            state.select(Some(0));
        }
        App {
            tracker,
            state,
            input: String::new(),
            input_mode: InputMode::Normal,
            cursor_position: 0,
            status: None,
            panel: Panel::Today,
        }
    }

    pub fn next(&mut self) {
        let len = self.tracker.projects().len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.tracker.projects().len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }

    fn selected_project(&self) -> Option<(Uuid, String)> {
        let i = self.state.selected()?;
        self.tracker
            .projects()
            .get(i)
            .map(|p| (p.id, p.name.clone()))
    }

    pub fn start_selected(&mut self) {
        let Some((_, name)) = self.selected_project() else {
            return;
        };
        let result = self.tracker.start(&name).map(|_| format!("Tracking {}", name));
        self.show(result);
    }

    pub fn stop(&mut self) {
        let result = self
            .tracker
            .stop()
            .map(|e| format!("Recorded {}", format_hms(e.duration_seconds)));
        self.show(result);
        self.panel = Panel::Today;
    }

    pub fn hotkey(&mut self, digit: char) {
        let result = self.tracker.hotkey_pressed(digit).map(|id| {
            let name = self.tracker.registry().find_by_id(&id).unwrap_or_default();
            format!("Tracking {}", name)
        });
        self.show(result);
    }

    pub fn daily_report(&mut self) {
        match self.tracker.request_daily_report(None) {
            Ok(summary) => {
                self.panel = Panel::Report {
                    title: format!(" Daily {} ", self.tracker.today()),
                    summary,
                };
                self.status = Some("Daily summary written".to_string());
            }
            Err(e) => self.status = Some(describe(&e)),
        }
    }

    pub fn monthly_report(&mut self) {
        match self.tracker.request_monthly_report(None) {
            Ok(summary) => {
                self.panel = Panel::Report {
                    title: format!(" Monthly {} ", self.tracker.today().format("%Y-%m")),
                    summary,
                };
                self.status = Some("Monthly summary written".to_string());
            }
            Err(e) => self.status = Some(describe(&e)),
        }
    }

    pub fn show_today(&mut self) {
        self.panel = Panel::Today;
    }

    pub fn delete_selected(&mut self) {
        let Some((id, name)) = self.selected_project() else {
            return;
        };
        let result = self
            .tracker
            .remove_projects(&[id])
            .map(|_| format!("Removed {}", name));
        self.show(result);

        let len = self.tracker.projects().len();
        match self.state.selected() {
            _ if len == 0 => self.state.select(None),
            Some(i) if i >= len => self.state.select(Some(len - 1)),
            _ => {}
        }
    }

    pub fn quit(&mut self) {
        if let Some(entry) = self.tracker.shutdown() {
            self.status = Some(format!("Recorded {}", format_hms(entry.duration_seconds)));
        }
    }

    pub fn enter_add_mode(&mut self) {
        self.input_mode = InputMode::Adding;
        self.input.clear();
        self.cursor_position = 0;
    }

    pub fn exit_input_mode(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn input_char(&mut self, c: char) {
        let byte_index = self.byte_index(self.cursor_position);
        self.input.insert(byte_index, c);
        self.cursor_position += 1;
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            let byte_index = self.byte_index(self.cursor_position - 1);
            self.input.remove(byte_index);
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.input.chars().count() {
            self.cursor_position += 1;
        }
    }

    /// Input is `name [digit]`; a trailing lone digit becomes the hotkey.
    pub fn submit_add(&mut self) {
        let input = std::mem::take(&mut self.input);
        self.exit_input_mode();
        if input.trim().is_empty() {
            return;
        }

        let (name, hotkey) = split_hotkey(&input);
        let result = self
            .tracker
            .add_project(name, hotkey)
            .map(|_| format!("Added {}", name.trim()));
        self.show(result);
    }

    fn byte_index(&self, chars: usize) -> usize {
        self.input.chars().take(chars).map(|c| c.len_utf8()).sum()
    }

    fn show(&mut self, result: Result<String, TrackerError>) {
        self.status = Some(match result {
            Ok(msg) => msg,
            Err(e) => describe(&e),
        });
    }
}

fn split_hotkey(input: &str) -> (&str, Option<&str>) {
    let trimmed = input.trim_end();
    match trimmed.rsplit_once(' ') {
        Some((name, last)) if last.len() == 1 && last.chars().all(|c| c.is_ascii_digit()) => {
            (name, Some(last))
        }
        _ => (trimmed, None),
    }
}
