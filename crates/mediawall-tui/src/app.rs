use crossterm::event::KeyCode;
use mediawall_remote::ManifestFetcher;
use mediawall_schema::MediaEntry;

#[derive(Debug, PartialEq, Eq)]
pub enum AppAction {
    None,
    Quit,
    Refresh,
    /// Copy the URL to the clipboard; the event loop owns the notifier.
    Copy(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    List,
    Detail,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    /// Manifest declaration order.
    Manifest,
    Name,
    Size,
}

pub struct App {
    fetcher: ManifestFetcher,
    /// Entries in manifest order; sorting rearranges `filtered` only.
    pub entries: Vec<MediaEntry>,
    pub filtered: Vec<usize>,
    pub selected: usize,
    pub view: View,
    pub input_mode: InputMode,
    pub text_input: String,
    pub input_cursor: usize,
    pub filter: String,
    pub sort_column: SortColumn,
    pub sort_ascending: bool,
    pub status_message: String,
}

impl App {
    pub fn new(fetcher: ManifestFetcher) -> Self {
        Self {
            fetcher,
            entries: Vec::new(),
            filtered: Vec::new(),
            selected: 0,
            view: View::List,
            input_mode: InputMode::Normal,
            text_input: String::new(),
            input_cursor: 0,
            filter: String::new(),
            sort_column: SortColumn::Manifest,
            sort_ascending: true,
            status_message: String::new(),
        }
    }

    /// Re-fetch the manifest and rebuild the visible list.
    pub fn refresh(&mut self) -> Result<(), String> {
        match self.fetcher.fetch_entries() {
            Ok(entries) => {
                self.entries = entries;
                self.apply_filter();
                self.apply_sort();
                self.status_message = format!("{} media item(s)", self.entries.len());
                Ok(())
            }
            Err(e) => {
                self.status_message = format!("error: {e}");
                Err(e.to_string())
            }
        }
    }

    pub fn apply_filter(&mut self) {
        if self.filter.is_empty() {
            self.filtered = (0..self.entries.len()).collect();
        } else {
            let needle = self.filter.to_lowercase();
            self.filtered = self
                .entries
                .iter()
                .enumerate()
                .filter(|(_, e)| {
                    e.name.to_lowercase().contains(&needle)
                        || e.filename.to_lowercase().contains(&needle)
                        || e.resolution
                            .as_deref()
                            .unwrap_or("")
                            .to_lowercase()
                            .contains(&needle)
                })
                .map(|(i, _)| i)
                .collect();
        }
        if self.selected >= self.filtered.len() && !self.filtered.is_empty() {
            self.selected = self.filtered.len() - 1;
        } else if self.filtered.is_empty() {
            self.selected = 0;
        }
    }

    pub fn apply_sort(&mut self) {
        let asc = self.sort_ascending;
        let entries = &self.entries;
        match self.sort_column {
            SortColumn::Manifest => {
                self.filtered.sort_unstable();
                if !asc {
                    self.filtered.reverse();
                }
            }
            SortColumn::Name => self.filtered.sort_by(|&a, &b| {
                let ord = entries[a].name.cmp(&entries[b].name);
                if asc {
                    ord
                } else {
                    ord.reverse()
                }
            }),
            SortColumn::Size => self.filtered.sort_by(|&a, &b| {
                let ord = entries[a].size.unwrap_or(0).cmp(&entries[b].size.unwrap_or(0));
                if asc {
                    ord
                } else {
                    ord.reverse()
                }
            }),
        }
    }

    pub fn selected_entry(&self) -> Option<&MediaEntry> {
        self.filtered
            .get(self.selected)
            .and_then(|&i| self.entries.get(i))
    }

    pub fn visible_count(&self) -> usize {
        self.filtered.len()
    }

    pub fn handle_key(&mut self, key: KeyCode) -> AppAction {
        if self.input_mode == InputMode::Search {
            return self.handle_search_key(key);
        }

        match self.view {
            View::Help => match key {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.view = View::List;
                    AppAction::None
                }
                _ => AppAction::None,
            },
            View::Detail => self.handle_detail_key(key),
            View::List => self.handle_list_key(key),
        }
    }

    fn handle_detail_key(&mut self, key: KeyCode) -> AppAction {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.view = View::List;
                AppAction::None
            }
            KeyCode::Char('c') => self.copy_selected(),
            _ => AppAction::None,
        }
    }

    fn handle_list_key(&mut self, key: KeyCode) -> AppAction {
        match key {
            KeyCode::Char('q') => AppAction::Quit,
            KeyCode::Char('j') | KeyCode::Down => {
                if !self.filtered.is_empty() {
                    self.selected = (self.selected + 1).min(self.filtered.len() - 1);
                }
                AppAction::None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                AppAction::None
            }
            KeyCode::Char('g') | KeyCode::Home => {
                self.selected = 0;
                AppAction::None
            }
            KeyCode::Char('G') | KeyCode::End => {
                if !self.filtered.is_empty() {
                    self.selected = self.filtered.len() - 1;
                }
                AppAction::None
            }
            KeyCode::Enter => {
                if self.selected_entry().is_some() {
                    self.view = View::Detail;
                }
                AppAction::None
            }
            KeyCode::Char('r') => AppAction::Refresh,
            KeyCode::Char('c') => self.copy_selected(),
            KeyCode::Char('/') => {
                self.input_mode = InputMode::Search;
                self.text_input.clear();
                self.input_cursor = 0;
                "search: ".clone_into(&mut self.status_message);
                AppAction::None
            }
            KeyCode::Char('s') => {
                self.cycle_sort();
                AppAction::None
            }
            KeyCode::Char('S') => {
                self.sort_ascending = !self.sort_ascending;
                self.apply_sort();
                AppAction::None
            }
            KeyCode::Char('?') => {
                self.view = View::Help;
                AppAction::None
            }
            _ => AppAction::None,
        }
    }

    fn handle_search_key(&mut self, key: KeyCode) -> AppAction {
        match key {
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
                self.filter.clear();
                self.apply_filter();
                self.apply_sort();
                self.status_message = format!("{} media item(s)", self.entries.len());
                AppAction::None
            }
            KeyCode::Enter => {
                self.input_mode = InputMode::Normal;
                self.filter = self.text_input.clone();
                self.apply_filter();
                self.apply_sort();
                self.status_message = if self.filter.is_empty() {
                    format!("{} media item(s)", self.entries.len())
                } else {
                    format!(
                        "filter '{}': {} match(es)",
                        self.filter,
                        self.filtered.len()
                    )
                };
                AppAction::None
            }
            KeyCode::Char(c) => {
                self.text_input.insert(self.input_cursor, c);
                self.input_cursor += 1;
                self.filter = self.text_input.clone();
                self.apply_filter();
                self.apply_sort();
                self.status_message = format!("search: {}", self.text_input);
                AppAction::None
            }
            KeyCode::Backspace => {
                if self.input_cursor > 0 {
                    self.input_cursor -= 1;
                    self.text_input.remove(self.input_cursor);
                    self.filter = self.text_input.clone();
                    self.apply_filter();
                    self.apply_sort();
                }
                self.status_message = format!("search: {}", self.text_input);
                AppAction::None
            }
            _ => AppAction::None,
        }
    }

    fn copy_selected(&mut self) -> AppAction {
        match self.selected_entry() {
            Some(entry) => AppAction::Copy(entry.url.clone()),
            None => AppAction::None,
        }
    }

    fn cycle_sort(&mut self) {
        self.sort_column = match self.sort_column {
            SortColumn::Manifest => SortColumn::Name,
            SortColumn::Name => SortColumn::Size,
            SortColumn::Size => SortColumn::Manifest,
        };
        self.apply_sort();
        self.status_message = format!(
            "sort: {:?} {}",
            self.sort_column,
            if self.sort_ascending { "↑" } else { "↓" }
        );
    }
}
