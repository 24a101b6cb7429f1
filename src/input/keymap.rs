use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::handler::Command;

pub fn handle_key_event(event: KeyEvent) -> Option<Command> {
    match (event.code, event.modifiers) {
        // 基本移動
        (KeyCode::Up, KeyModifiers::NONE) => Some(Command::MoveUp),
        (KeyCode::Down, KeyModifiers::NONE) => Some(Command::MoveDown),
        (KeyCode::Left, KeyModifiers::NONE) => Some(Command::MoveLeft),
        (KeyCode::Right, KeyModifiers::NONE) => Some(Command::MoveRight),
        (KeyCode::Home, _) => Some(Command::MoveHome),
        (KeyCode::End, _) => Some(Command::MoveEnd),
        (KeyCode::PageUp, _) => Some(Command::PageUp),
        (KeyCode::PageDown, _) => Some(Command::PageDown),

        // 字符輸入
        (KeyCode::Char(c), KeyModifiers::NONE) | (KeyCode::Char(c), KeyModifiers::SHIFT) => {
            Some(Command::Insert(c))
        }
        (KeyCode::Enter, _) => Some(Command::Insert('\n')),
        (KeyCode::Tab, KeyModifiers::NONE) => Some(Command::Insert('\t')),

        // 刪除操作
        (KeyCode::Backspace, _) => Some(Command::Backspace),
        (KeyCode::Delete, _) => Some(Command::Delete),

        // 另存新檔：Ctrl+Shift+S 在部分終端無法區分，Alt+S 作為後備
        (KeyCode::Char('s'), m) | (KeyCode::Char('S'), m)
            if m.contains(KeyModifiers::CONTROL) && m.contains(KeyModifiers::SHIFT) =>
        {
            Some(Command::SaveAs)
        }
        (KeyCode::Char('s'), KeyModifiers::ALT) => Some(Command::SaveAs),

        // Ctrl 組合鍵
        (KeyCode::Char('o'), KeyModifiers::CONTROL) => Some(Command::Open),
        (KeyCode::Char('s'), KeyModifiers::CONTROL) => Some(Command::Save),
        (KeyCode::Char('q'), KeyModifiers::CONTROL) => Some(Command::Quit),
        (KeyCode::Char('f'), KeyModifiers::CONTROL) => Some(Command::Find),
        (KeyCode::Char('n'), KeyModifiers::CONTROL) => Some(Command::FindNext),
        (KeyCode::Char('p'), KeyModifiers::CONTROL) => Some(Command::FindPrev),
        (KeyCode::Char('r'), KeyModifiers::CONTROL) => Some(Command::ToggleRegex),
        (KeyCode::Char('l'), KeyModifiers::CONTROL) => Some(Command::ToggleLineNumbers),

        // ESC 清除選擇和訊息
        (KeyCode::Esc, _) => Some(Command::ClearMessage),

        // F3 搜索導航
        (KeyCode::F(3), KeyModifiers::NONE) => Some(Command::FindNext),
        (KeyCode::F(3), KeyModifiers::SHIFT) => Some(Command::FindPrev),

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_search_keys() {
        assert_eq!(
            handle_key_event(key(KeyCode::Char('f'), KeyModifiers::CONTROL)),
            Some(Command::Find)
        );
        assert_eq!(
            handle_key_event(key(KeyCode::F(3), KeyModifiers::NONE)),
            Some(Command::FindNext)
        );
        assert_eq!(
            handle_key_event(key(KeyCode::F(3), KeyModifiers::SHIFT)),
            Some(Command::FindPrev)
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('r'), KeyModifiers::CONTROL)),
            Some(Command::ToggleRegex)
        );
    }

    #[test]
    fn test_file_keys() {
        assert_eq!(
            handle_key_event(key(KeyCode::Char('s'), KeyModifiers::CONTROL)),
            Some(Command::Save)
        );
        assert_eq!(
            handle_key_event(key(
                KeyCode::Char('S'),
                KeyModifiers::CONTROL | KeyModifiers::SHIFT
            )),
            Some(Command::SaveAs)
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('o'), KeyModifiers::CONTROL)),
            Some(Command::Open)
        );
    }

    #[test]
    fn test_text_input() {
        assert_eq!(
            handle_key_event(key(KeyCode::Char('A'), KeyModifiers::SHIFT)),
            Some(Command::Insert('A'))
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Enter, KeyModifiers::NONE)),
            Some(Command::Insert('\n'))
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('z'), KeyModifiers::CONTROL)),
            None
        );
    }
}
