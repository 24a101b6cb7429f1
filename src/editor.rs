use crate::buffer::{EncodingConfig, RopeBuffer};
use crate::config::Config;
use crate::cursor::Cursor;
use crate::dialog;
use crate::input::{handle_key_event, Command};
use crate::search::{self, MatchNavigator, MatchSpan, SearchMode, SearchQuery};
use crate::terminal::{InputEvent, Terminal};
use crate::view::{Selection, View};
use anyhow::Result;
use std::path::{Path, PathBuf};

pub struct Editor {
    buffer: RopeBuffer,
    cursor: Cursor,
    view: View,
    navigator: MatchNavigator,
    search_mode: SearchMode,
    last_pattern: String, // 搜索框預填內容
    encoding: EncodingConfig,
    should_quit: bool,
    selection: Option<Selection>,
    message: Option<String>,
    quit_times: u8, // 追蹤連續按 Ctrl+Q 的次數
    terminal_size: (u16, u16),
    debug_mode: bool,
}

impl Editor {
    pub fn new(file_path: Option<&Path>, config: &Config) -> Result<Self> {
        let buffer = match file_path {
            Some(path) => RopeBuffer::from_file(path, config.encoding.read_encoding)?,
            None => RopeBuffer::new(),
        };
        Ok(Self::with_buffer(buffer, config, Terminal::current_size()?))
    }

    /// 不接觸終端建立編輯器
    pub fn with_buffer(
        mut buffer: RopeBuffer,
        config: &Config,
        terminal_size: (u16, u16),
    ) -> Self {
        // 如果指定了存檔編碼，設置存檔編碼
        if let Some(enc) = config.encoding.save_encoding {
            buffer.set_encoding(enc);
        }

        Self {
            buffer,
            cursor: Cursor::new(),
            view: View::new(terminal_size, config.tab_width, config.line_numbers),
            navigator: MatchNavigator::new(),
            search_mode: config.default_mode,
            last_pattern: String::new(),
            encoding: config.encoding.clone(),
            should_quit: false,
            selection: None,
            message: None,
            quit_times: 0,
            terminal_size,
            debug_mode: config.debug,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        let mut terminal = Terminal::enter()?;
        let (cols, rows) = terminal.size();
        self.resize(cols, rows);

        while !self.should_quit {
            let debug_info = self.debug_mode.then(|| self.get_debug_info());
            let search_info = self.search_info();
            let message = debug_info.as_deref().or(self.message.as_deref());

            self.view.render(
                &self.buffer,
                &self.cursor,
                self.selection.as_ref(),
                message,
                &search_info,
            )?;

            match terminal.read_event()? {
                InputEvent::Key(key_event) => {
                    if let Some(command) = handle_key_event(key_event) {
                        self.handle_command(command)?;
                    }
                }
                InputEvent::Resize(cols, rows) => self.resize(cols, rows),
            }
        }

        Ok(())
    }

    fn resize(&mut self, cols: u16, rows: u16) {
        self.terminal_size = (cols, rows);
        self.view.resize(cols, rows);
    }

    fn handle_command(&mut self, command: Command) -> Result<()> {
        // 任何非 Quit 的命令都重置 quit_times
        if !matches!(command, Command::Quit) {
            self.quit_times = 0;
        }

        match command {
            Command::Insert(ch) => self.insert_char(ch),
            Command::Backspace => self.backspace(),
            Command::Delete => self.delete(),

            // 光標移動
            Command::MoveUp => self.move_cursor(|c, b| c.move_up(b)),
            Command::MoveDown => self.move_cursor(|c, b| c.move_down(b)),
            Command::MoveLeft => self.move_cursor(|c, b| c.move_left(b)),
            Command::MoveRight => self.move_cursor(|c, b| c.move_right(b)),
            Command::MoveHome => self.move_cursor(|c, _| c.move_to_line_start()),
            Command::MoveEnd => self.move_cursor(|c, b| c.move_to_line_end(b)),
            Command::PageUp => {
                let rows = self.view.screen_rows;
                self.move_cursor(|c, b| c.move_page_up(b, rows));
            }
            Command::PageDown => {
                let rows = self.view.screen_rows;
                self.move_cursor(|c, b| c.move_page_down(b, rows));
            }

            // 文件操作
            Command::Open => {
                if self.buffer.is_modified()
                    && !dialog::confirm("Discard unsaved changes?", self.terminal_size)?
                {
                    return Ok(());
                }
                if let Some(path) = dialog::prompt("Open:", "", self.terminal_size)? {
                    if !path.trim().is_empty() {
                        self.open_file(Path::new(path.trim()));
                    }
                }
            }
            Command::Save => {
                if self.buffer.file_path().is_some() {
                    self.save_file();
                } else {
                    self.prompt_save_as()?;
                }
            }
            Command::SaveAs => self.prompt_save_as()?,

            Command::Quit => {
                if self.buffer.is_modified() && self.quit_times == 0 {
                    // 第一次按 Ctrl+Q，顯示警告
                    self.quit_times = 1;
                    self.message = Some(
                        "Unsaved changes! Press Ctrl+Q again to force quit, or Ctrl+S to save"
                            .to_string(),
                    );
                } else {
                    self.should_quit = true;
                }
            }

            // 搜索
            Command::Find => {
                let label = format!("Search ({}):", self.search_mode.label());
                let initial = self.last_pattern.clone();
                if let Some(pattern) = dialog::prompt(&label, &initial, self.terminal_size)? {
                    self.start_search(&pattern);
                }
            }
            Command::FindNext => self.find_next(),
            Command::FindPrev => self.find_prev(),
            Command::ToggleRegex => self.toggle_regex(),

            Command::ToggleLineNumbers => self.view.toggle_line_numbers(),

            Command::ClearMessage => {
                self.selection = None;
                self.message = None;
            }
        }

        Ok(())
    }

    /// 以當前模式查找並選中第一個匹配
    ///
    /// 查找失敗（空查詢、正則語法錯誤）時保留之前的匹配和選中狀態。
    pub fn start_search(&mut self, pattern: &str) {
        self.last_pattern = pattern.to_string();
        let query = SearchQuery::new(pattern, self.search_mode);

        match search::search(&mut self.navigator, &self.buffer.text(), &query) {
            Ok(Some(span)) => {
                self.select_match(span);
                self.message = Some(format!(
                    "Found {} matches (F3: next, Shift+F3: prev)",
                    self.navigator.match_count()
                ));
            }
            Ok(None) => {
                self.selection = None;
                self.message = Some(format!("No matches found for '{}'", pattern));
            }
            Err(e) => {
                log::debug!("search failed: {}", e);
                self.message = Some(e.to_string());
            }
        }
    }

    pub fn find_next(&mut self) {
        let span = self.navigator.next();
        self.show_navigated(span);
    }

    pub fn find_prev(&mut self) {
        let span = self.navigator.previous();
        self.show_navigated(span);
    }

    fn show_navigated(&mut self, span: Option<MatchSpan>) {
        match (span, self.navigator.position()) {
            (Some(span), Some((idx, total))) => {
                self.select_match(span);
                self.message = Some(format!("Match {}/{}", idx, total));
            }
            _ => self.message = Some("No active search".to_string()),
        }
    }

    pub fn toggle_regex(&mut self) {
        self.search_mode = self.search_mode.toggle();
        self.message = Some(format!(
            "Use regex: {}",
            match self.search_mode {
                SearchMode::Regex => "ON",
                SearchMode::Literal => "OFF",
            }
        ));
    }

    /// 選中匹配文字，光標放在匹配末尾
    fn select_match(&mut self, span: MatchSpan) {
        self.selection = Some(Selection {
            start: span.start,
            end: span.end,
        });
        self.cursor.move_to_char(&self.buffer, span.end);
    }

    /// 文本改變後舊的匹配位置已失效
    fn invalidate_matches(&mut self) {
        self.navigator.clear();
        self.selection = None;
    }

    pub fn open_file(&mut self, path: &Path) {
        let result = self.buffer.load(path, self.encoding.read_encoding);
        // 載入會採用檔案自身編碼，存檔編碼需重新套用
        if let (Ok(()), Some(enc)) = (&result, self.encoding.save_encoding) {
            self.buffer.set_encoding(enc);
        }
        self.invalidate_matches();
        self.cursor = Cursor::new();
        self.view.offset_row = 0;

        self.message = Some(match result {
            Ok(()) => format!("Opened {}", path.display()),
            Err(e) => {
                log::warn!("open failed: {:#}", e);
                format!("Open failed: {:#}", e)
            }
        });
    }

    pub fn save_file(&mut self) {
        self.message = Some(match self.buffer.save() {
            Ok(()) => "File saved".to_string(),
            Err(e) => format!("Save failed: {:#}", e),
        });
    }

    pub fn save_file_as(&mut self, path: &Path) {
        self.message = Some(match self.buffer.save_as(path) {
            Ok(()) => format!("Saved as {}", path.display()),
            Err(e) => format!("Save failed: {:#}", e),
        });
    }

    fn prompt_save_as(&mut self) -> Result<()> {
        let initial = self
            .buffer
            .file_path()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        if let Some(path) = dialog::prompt("Save as:", &initial, self.terminal_size)? {
            if !path.trim().is_empty() {
                self.save_file_as(&PathBuf::from(path.trim()));
            }
        }
        Ok(())
    }

    fn move_cursor(&mut self, f: impl FnOnce(&mut Cursor, &RopeBuffer)) {
        f(&mut self.cursor, &self.buffer);
        self.selection = None;
    }

    fn insert_char(&mut self, ch: char) {
        // 選中的匹配被輸入內容取代
        self.delete_selection();

        let pos = self.cursor.char_position(&self.buffer);
        self.buffer.insert_char(pos, ch);
        self.cursor.move_to_char(&self.buffer, pos + 1);
        self.invalidate_matches();
    }

    fn backspace(&mut self) {
        if !self.delete_selection() {
            let pos = self.cursor.char_position(&self.buffer);
            if pos == 0 {
                return;
            }
            self.buffer.delete_char(pos - 1);
            self.cursor.move_to_char(&self.buffer, pos - 1);
        }
        self.invalidate_matches();
    }

    fn delete(&mut self) {
        if !self.delete_selection() {
            let pos = self.cursor.char_position(&self.buffer);
            if pos >= self.buffer.len_chars() {
                return;
            }
            self.buffer.delete_char(pos);
        }
        self.invalidate_matches();
    }

    /// 刪除選中文字；沒有選中時返回 false
    fn delete_selection(&mut self) -> bool {
        let Some(sel) = self.selection.take() else {
            return false;
        };
        self.buffer.delete_range(sel.start, sel.end);
        self.cursor.move_to_char(&self.buffer, sel.start);
        true
    }

    fn search_info(&self) -> String {
        match self.navigator.position() {
            Some((idx, total)) => format!("{} {}/{}", self.search_mode.label(), idx, total),
            None => self.search_mode.label().to_string(),
        }
    }

    fn get_debug_info(&self) -> String {
        format!(
            "DEBUG | L{}/{}:C{} P{}/{} M{} {:?}",
            self.cursor.row + 1,
            self.buffer.line_count(),
            self.cursor.col,
            self.cursor.char_position(&self.buffer),
            self.buffer.len_chars(),
            self.navigator.match_count(),
            self.navigator.state()
        )
    }

    pub fn buffer(&self) -> &RopeBuffer {
        &self.buffer
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn navigator(&self) -> &MatchNavigator {
        &self.navigator
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn search_mode(&self) -> SearchMode {
        self.search_mode
    }
}
