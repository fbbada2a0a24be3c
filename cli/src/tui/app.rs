use std::fs;
use std::path::PathBuf;

use carwash_core::service::export;
use carwash_core::time::{shift_day, DATE_FORMAT};
use carwash_core::{
    format_day, parse_sale, today, AddStaff, FileStore, Lang, Labels, NewSale, SalesService,
    ServiceKey, ServiceSummary, StaffSummary,
};
use chrono::NaiveDate;
use ratatui::widgets::TableState;

use crate::report::{entry_error, roster_error};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    AddingSale,
    AddingStaff,
    ConfirmRemove(String),
    ConfirmClear,
}

pub struct App {
    pub service: SalesService<FileStore>,
    pub lang: Lang,
    pub date: String,
    pub staff_summary: Vec<StaffSummary>,
    pub service_summary: Vec<ServiceSummary>,
    pub state: TableState,
    pub input: String,
    pub input_mode: InputMode,
    pub cursor_position: usize,
    pub status: Option<String>,
}

impl App {
    pub fn new(service: SalesService<FileStore>, lang: Lang) -> App {
        let mut state = TableState::default();
        if !service.roster().is_empty() {
            state.select(Some(0));
        }
        let mut app = App {
            service,
            lang,
            date: format_day(today()),
            staff_summary: Vec::new(),
            service_summary: Vec::new(),
            state,
            input: String::new(),
            input_mode: InputMode::Normal,
            cursor_position: 0,
            status: None,
        };
        if !app.service.load_source().allows_writes() {
            app.status = Some("Stored data could not be read; changes will not be saved.".to_string());
        }
        app.refresh();
        app
    }

    pub fn labels(&self) -> &'static Labels {
        self.lang.labels()
    }

    /// Summaries are recomputed from the ledger after every change.
    fn refresh(&mut self) {
        self.staff_summary = self.service.staff_summary(&self.date);
        self.service_summary = self.service.service_summary(&self.date);

        let len = self.service.roster().len();
        match self.state.selected() {
            _ if len == 0 => self.state.select(None),
            Some(i) if i >= len => self.state.select(Some(len - 1)),
            None => self.state.select(Some(0)),
            _ => {}
        }
    }

    pub fn selected_staff(&self) -> Option<&str> {
        self.state
            .selected()
            .and_then(|i| self.service.roster().names().get(i))
            .map(String::as_str)
    }

    pub fn next(&mut self) {
        let len = self.service.roster().len();
        if len == 0 { return; }

        let i = match self.state.selected() {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.service.roster().len();
        if len == 0 { return; }

        let i = match self.state.selected() {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous_day(&mut self) {
        self.date = shift_day(&self.date, -1);
        self.refresh();
    }

    pub fn next_day(&mut self) {
        self.date = shift_day(&self.date, 1);
        self.refresh();
    }

    pub fn jump_today(&mut self) {
        self.date = format_day(today());
        self.refresh();
    }

    pub fn toggle_lang(&mut self) {
        self.lang = self.lang.toggle();
    }

    pub fn enter_sale_mode(&mut self) {
        self.enter_input(InputMode::AddingSale);
    }

    pub fn enter_staff_mode(&mut self) {
        self.enter_input(InputMode::AddingStaff);
    }

    fn enter_input(&mut self, mode: InputMode) {
        self.input_mode = mode;
        self.input.clear();
        self.cursor_position = 0;
        self.status = None;
    }

    pub fn request_remove_staff(&mut self) {
        if let Some(name) = self.selected_staff().map(str::to_string) {
            self.status = Some(self.labels().confirm_remove_staff(&name) + " (y/n)");
            self.input_mode = InputMode::ConfirmRemove(name);
        }
    }

    pub fn request_clear(&mut self) {
        self.status = Some(format!("{} (y/n)", self.labels().confirm_clear));
        self.input_mode = InputMode::ConfirmClear;
    }

    pub fn confirm(&mut self) {
        let mode = std::mem::replace(&mut self.input_mode, InputMode::Normal);
        match mode {
            InputMode::ConfirmRemove(name) => {
                let removed = self.service.remove_staff(&name);
                self.status = Some(format!("{}: {} ({})", self.labels().remove, name, removed));
            }
            InputMode::ConfirmClear => {
                let removed = self.service.clear_records();
                self.status = Some(format!("{}: {}", self.labels().clear_data, removed));
            }
            _ => {}
        }
        self.refresh();
    }

    pub fn exit_input_mode(&mut self) {
        if matches!(self.input_mode, InputMode::ConfirmRemove(_) | InputMode::ConfirmClear) {
            self.status = None;
        }
        self.input_mode = InputMode::Normal;
    }

    pub fn export(&mut self) {
        let path = PathBuf::from(export::default_file_name(&self.date));
        self.status = Some(match fs::write(&path, self.service.export_csv()) {
            Ok(()) => format!("{}: {}", self.labels().export_csv, path.display()),
            Err(e) => format!("{}: {}", self.labels().export_csv, e),
        });
    }

    pub fn input_char(&mut self, c: char) {
        let byte_index = self.input.chars().take(self.cursor_position).map(|c| c.len_utf8()).sum();
        self.input.insert(byte_index, c);
        self.cursor_position += 1;
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            let byte_index: usize = self.input.chars().take(self.cursor_position - 1).map(|c| c.len_utf8()).sum();
            self.input.remove(byte_index);
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.input.chars().count() {
            self.cursor_position += 1;
        }
    }

    pub fn submit_command(&mut self) {
        if self.input.trim().is_empty() {
            self.exit_input_mode();
            return;
        }

        match self.input_mode {
            InputMode::AddingSale => self.submit_sale(),
            InputMode::AddingStaff => self.submit_staff(),
            _ => {}
        }

        self.input.clear();
        self.cursor_position = 0;
        self.exit_input_mode();
        self.refresh();
    }

    fn submit_sale(&mut self) {
        let args: Vec<String> = self.input.split_whitespace().map(|s| s.to_string()).collect();
        // Relative dates and the default date follow the day on screen.
        let base = NaiveDate::parse_from_str(&self.date, DATE_FORMAT).unwrap_or_else(|_| today());
        let default_staff = self.selected_staff().map(str::to_string);

        let sale: NewSale = match parse_sale(&args, base, default_staff.as_deref()) {
            Ok(sale) => sale,
            Err(e) => {
                self.status = Some(e.to_string());
                return;
            }
        };

        let labels = self.labels();
        self.status = Some(match self.service.record_sale(&sale) {
            Ok(stored) => format!(
                "{}: {} | {} = {}",
                labels.add,
                stored.staff_name,
                labels.service_key(&ServiceKey::new(&stored.service_type, &stored.size)),
                stored.quantity
            ),
            Err(e) => entry_error(labels, &e),
        });
    }

    fn submit_staff(&mut self) {
        let labels = self.labels();
        match self.service.add_staff(&self.input) {
            Ok(AddStaff::Added) => {
                self.status = Some(format!("{}: {}", labels.add_staff, self.input.trim()));
                let last = self.service.roster().len().saturating_sub(1);
                self.state.select(Some(last));
            }
            Ok(AddStaff::Ignored) => {}
            Err(e) => self.status = Some(roster_error(labels, &e)),
        }
    }
}
