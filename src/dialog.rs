// 對話框模組 - 用於輸入框、確認框等
// 取代圖形界面的文件選擇器與搜索框

use anyhow::Result;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{self, Color},
    terminal::{self, ClearType},
};
use std::io::{self, Write};

use crate::utils::{truncate_to_width, visual_width};

/// 顯示輸入對話框並獲取用戶輸入；Esc 取消返回 None
pub fn prompt(
    prompt_text: &str,
    initial: &str,
    terminal_size: (u16, u16),
) -> Result<Option<String>> {
    let mut input = initial.to_string();
    let (cols, rows) = terminal_size;
    let cols = cols as usize;
    let dialog_row = rows.saturating_sub(1);

    loop {
        let display = format!(" {} {}", prompt_text, input);
        draw_line(&display, cols, dialog_row, Color::DarkBlue, Color::White)?;

        // 光標放在輸入末尾
        let cursor_x = visual_width(&display).min(cols.saturating_sub(1)) as u16;
        execute!(io::stdout(), cursor::MoveTo(cursor_x, dialog_row), cursor::Show)?;
        io::stdout().flush()?;

        match edit_input(&mut input, read_key()?) {
            PromptStep::Submit => return Ok(Some(input)),
            PromptStep::Cancel => return Ok(None),
            PromptStep::Continue => {}
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum PromptStep {
    Continue,
    Submit,
    Cancel,
}

/// 把按鍵套用到輸入內容；帶 Ctrl/Alt 的字符不插入
fn edit_input(input: &mut String, key: KeyEvent) -> PromptStep {
    match (key.code, key.modifiers) {
        (KeyCode::Enter, _) => PromptStep::Submit,
        (KeyCode::Esc, _) => PromptStep::Cancel,
        (KeyCode::Char(c), KeyModifiers::NONE) | (KeyCode::Char(c), KeyModifiers::SHIFT) => {
            input.push(c);
            PromptStep::Continue
        }
        (KeyCode::Backspace, _) => {
            input.pop();
            PromptStep::Continue
        }
        _ => PromptStep::Continue,
    }
}

/// 顯示確認對話框
pub fn confirm(message: &str, terminal_size: (u16, u16)) -> Result<bool> {
    let (cols, rows) = terminal_size;
    let dialog_row = rows.saturating_sub(1);

    let display = format!(" {} (y/n)", message);
    draw_line(
        &display,
        cols as usize,
        dialog_row,
        Color::DarkYellow,
        Color::Black,
    )?;
    io::stdout().flush()?;

    loop {
        match read_key()?.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => return Ok(true),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => return Ok(false),
            _ => {}
        }
    }
}

fn draw_line(text: &str, cols: usize, row: u16, bg: Color, fg: Color) -> Result<()> {
    let mut stdout = io::stdout();
    execute!(
        stdout,
        cursor::MoveTo(0, row),
        terminal::Clear(ClearType::CurrentLine)
    )?;

    let shown = truncate_to_width(text, cols);
    // 填滿剩餘空間
    let padding = cols.saturating_sub(visual_width(&shown));

    queue!(
        stdout,
        style::SetBackgroundColor(bg),
        style::SetForegroundColor(fg),
        cursor::MoveTo(0, row),
        style::Print(&shown),
        style::Print(" ".repeat(padding)),
        style::ResetColor
    )?;
    Ok(())
}

/// 讀取按鍵，只處理 Press 和 Repeat 事件
fn read_key() -> Result<KeyEvent> {
    loop {
        if let Event::Key(key_event) = event::read()? {
            if key_event.kind == KeyEventKind::Press || key_event.kind == KeyEventKind::Repeat {
                return Ok(key_event);
            }
        }
    }
}
