use crate::buffer::RopeBuffer;
use crate::cursor::Cursor;
use crate::utils::{char_width, truncate_to_width, visual_width};
use anyhow::Result;
use crossterm::{
    cursor, execute, queue,
    style::{self, Attribute, Color},
    terminal::{Clear, ClearType},
};
use std::io::{self, Write};

/// 選中範圍，字符位置半開區間 [start, end)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    pub fn contains(&self, pos: usize) -> bool {
        pos >= self.start && pos < self.end
    }
}

pub struct View {
    pub offset_row: usize, // 視窗頂部顯示的行號
    pub show_line_numbers: bool,
    pub screen_rows: usize,
    pub screen_cols: usize,
    tab_width: usize,
}

impl View {
    pub fn new(size: (u16, u16), tab_width: usize, show_line_numbers: bool) -> Self {
        let (cols, rows) = size;
        Self {
            offset_row: 0,
            show_line_numbers,
            screen_rows: rows.saturating_sub(1) as usize, // 減去狀態欄
            screen_cols: cols as usize,
            tab_width,
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.screen_rows = rows.saturating_sub(1) as usize;
        self.screen_cols = cols as usize;
    }

    pub fn render(
        &mut self,
        buffer: &RopeBuffer,
        cursor: &Cursor,
        selection: Option<&Selection>,
        message: Option<&str>,
        search_info: &str,
    ) -> Result<()> {
        self.scroll_if_needed(cursor);

        let mut stdout = io::stdout();
        execute!(stdout, cursor::Hide, cursor::MoveTo(0, 0))?;

        let line_num_width = self.line_number_width(buffer);
        let available_width = self.screen_cols.saturating_sub(line_num_width);

        for screen_row in 0..self.screen_rows {
            let file_row = self.offset_row + screen_row;
            queue!(stdout, cursor::MoveTo(0, screen_row as u16))?;

            if file_row < buffer.line_count() {
                if self.show_line_numbers {
                    let line_num = format!("{:>width$} ", file_row + 1, width = line_num_width - 1);
                    queue!(
                        stdout,
                        style::SetForegroundColor(Color::DarkGrey),
                        style::Print(&line_num),
                        style::ResetColor
                    )?;
                }
                self.render_line(&mut stdout, buffer, file_row, selection, available_width)?;
            } else {
                // 空行顯示波浪號
                queue!(
                    stdout,
                    style::SetForegroundColor(Color::DarkGrey),
                    style::Print("~"),
                    style::ResetColor
                )?;
            }

            queue!(stdout, Clear(ClearType::UntilNewLine))?;
        }

        self.render_status_bar(&mut stdout, buffer, cursor, message, search_info)?;

        let current_line = buffer.get_line_content(cursor.row);
        let visual_col = self.calculate_visual_column(&current_line, cursor.col);
        let cursor_x = (line_num_width + visual_col).min(self.screen_cols.saturating_sub(1));
        let cursor_y = cursor.row.saturating_sub(self.offset_row);

        execute!(
            stdout,
            cursor::MoveTo(cursor_x as u16, cursor_y as u16),
            cursor::Show
        )?;
        stdout.flush()?;
        Ok(())
    }

    fn render_line(
        &self,
        stdout: &mut io::Stdout,
        buffer: &RopeBuffer,
        row: usize,
        selection: Option<&Selection>,
        available_width: usize,
    ) -> Result<()> {
        let line = buffer.get_line_content(row);
        let line = line.trim_end_matches(['\n', '\r']);
        let line_start = buffer.line_to_char(row);

        let mut col = 0;
        let mut in_selection = false;

        for (idx, ch) in line.chars().enumerate() {
            let width = if ch == '\t' {
                self.tab_width
            } else {
                char_width(ch)
            };
            if col + width > available_width {
                break;
            }

            let selected = selection.is_some_and(|sel| sel.contains(line_start + idx));
            if selected != in_selection {
                let attr = if selected {
                    Attribute::Reverse
                } else {
                    Attribute::NoReverse
                };
                queue!(stdout, style::SetAttribute(attr))?;
                in_selection = selected;
            }

            if ch == '\t' {
                queue!(stdout, style::Print(" ".repeat(self.tab_width)))?;
            } else {
                queue!(stdout, style::Print(ch))?;
            }
            col += width;
        }

        if in_selection {
            queue!(stdout, style::SetAttribute(Attribute::NoReverse))?;
        }
        Ok(())
    }

    fn render_status_bar(
        &self,
        stdout: &mut io::Stdout,
        buffer: &RopeBuffer,
        cursor: &Cursor,
        message: Option<&str>,
        search_info: &str,
    ) -> Result<()> {
        queue!(
            stdout,
            cursor::MoveTo(0, self.screen_rows as u16),
            style::SetBackgroundColor(Color::DarkGrey),
            style::SetForegroundColor(Color::White)
        )?;

        let status = format_status(buffer, cursor, message, search_info);
        let status = truncate_to_width(&status, self.screen_cols);
        // 確保狀態欄填滿整行
        let padding = self.screen_cols.saturating_sub(visual_width(&status));

        queue!(
            stdout,
            style::Print(status),
            style::Print(" ".repeat(padding)),
            style::ResetColor
        )?;
        Ok(())
    }

    pub fn scroll_if_needed(&mut self, cursor: &Cursor) {
        if cursor.row < self.offset_row {
            self.offset_row = cursor.row;
        }
        if self.screen_rows > 0 && cursor.row >= self.offset_row + self.screen_rows {
            self.offset_row = cursor.row + 1 - self.screen_rows;
        }
    }

    fn line_number_width(&self, buffer: &RopeBuffer) -> usize {
        if self.show_line_numbers {
            buffer.line_count().to_string().len() + 1
        } else {
            0
        }
    }

    /// 計算考慮 Tab 展開和字符寬度的視覺列位置
    pub fn calculate_visual_column(&self, line: &str, buffer_col: usize) -> usize {
        line.chars()
            .take(buffer_col)
            .map(|ch| {
                if ch == '\t' {
                    self.tab_width
                } else {
                    char_width(ch)
                }
            })
            .sum()
    }

    pub fn toggle_line_numbers(&mut self) {
        self.show_line_numbers = !self.show_line_numbers;
    }
}

/// 狀態欄文字：消息優先，否則顯示行號與快捷鍵提示
fn format_status(
    buffer: &RopeBuffer,
    cursor: &Cursor,
    message: Option<&str>,
    search_info: &str,
) -> String {
    let modified = if buffer.is_modified() {
        " [modified]"
    } else {
        ""
    };
    let filename = buffer.file_name();

    match message {
        Some(msg) => format!(" {}{} [{}] - {}", filename, modified, search_info, msg),
        None => format!(
            " {}{}  Line {}/{}  [{}]  ^F:Find F3:Next ^R:Regex ^S:Save ^Q:Quit",
            filename,
            modified,
            cursor.row + 1,
            buffer.line_count(),
            search_info
        ),
    }
}
