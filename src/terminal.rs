use anyhow::Result;
use crossterm::{
    cursor,
    event::{self, Event, KeyEvent, KeyEventKind},
    execute,
    terminal::{self, ClearType},
};
use std::io;

/// 編輯器關心的終端事件
#[derive(Debug, Clone)]
pub enum InputEvent {
    Key(KeyEvent),
    Resize(u16, u16),
}

/// 原始模式守衛：建立時進入備用屏幕，Drop 時恢復
pub struct Terminal {
    size: (u16, u16),
}

impl Terminal {
    pub fn enter() -> Result<Self> {
        let size = Self::current_size()?;
        Self::enter_raw_mode()?;
        Self::clear_screen()?;
        Ok(Self { size })
    }

    pub fn current_size() -> Result<(u16, u16)> {
        Ok(terminal::size()?)
    }

    pub fn enter_raw_mode() -> Result<()> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), terminal::EnterAlternateScreen)?;
        Ok(())
    }

    pub fn exit_raw_mode() -> Result<()> {
        execute!(io::stdout(), terminal::LeaveAlternateScreen)?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub fn clear_screen() -> Result<()> {
        execute!(io::stdout(), terminal::Clear(ClearType::All))?;
        Ok(())
    }

    pub fn size(&self) -> (u16, u16) {
        self.size
    }

    pub fn read_event(&mut self) -> Result<InputEvent> {
        loop {
            match event::read()? {
                Event::Key(key_event) => {
                    // 只處理 Press 和 Repeat，忽略 Release 避免重複輸入
                    if key_event.kind == KeyEventKind::Press
                        || key_event.kind == KeyEventKind::Repeat
                    {
                        return Ok(InputEvent::Key(key_event));
                    }
                }
                Event::Resize(cols, rows) => {
                    self.size = (cols, rows);
                    return Ok(InputEvent::Resize(cols, rows));
                }
                _ => {
                    // 忽略其他事件（鼠標、焦點、貼上等）
                }
            }
        }
    }

    pub fn show_cursor() -> Result<()> {
        execute!(io::stdout(), cursor::Show)?;
        Ok(())
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = Self::exit_raw_mode();
        let _ = Self::show_cursor();
    }
}
