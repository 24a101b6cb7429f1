use crate::buffer::RopeBuffer;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    pub row: usize,         // 邏輯行號 (0-based)
    pub col: usize,         // 邏輯列號 (0-based)
    pub desired_col: usize, // 上下移動時保持的列
}

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_up(&mut self, buffer: &RopeBuffer) {
        if self.row > 0 {
            self.row -= 1;
            self.adjust_col_to_desired(buffer);
        }
    }

    pub fn move_down(&mut self, buffer: &RopeBuffer) {
        if self.row + 1 < buffer.line_count() {
            self.row += 1;
            self.adjust_col_to_desired(buffer);
        }
    }

    pub fn move_left(&mut self, buffer: &RopeBuffer) {
        if self.col > 0 {
            self.col -= 1;
        } else if self.row > 0 {
            // 移動到上一行末尾
            self.row -= 1;
            self.col = buffer.line_len(self.row);
        }
        self.desired_col = self.col;
    }

    pub fn move_right(&mut self, buffer: &RopeBuffer) {
        if self.col < buffer.line_len(self.row) {
            self.col += 1;
        } else if self.row + 1 < buffer.line_count() {
            // 移動到下一行開頭
            self.row += 1;
            self.col = 0;
        }
        self.desired_col = self.col;
    }

    pub fn move_to_line_start(&mut self) {
        self.col = 0;
        self.desired_col = 0;
    }

    pub fn move_to_line_end(&mut self, buffer: &RopeBuffer) {
        self.col = buffer.line_len(self.row);
        self.desired_col = self.col;
    }

    pub fn move_page_up(&mut self, buffer: &RopeBuffer, page_size: usize) {
        self.row = self.row.saturating_sub(page_size);
        self.adjust_col_to_desired(buffer);
    }

    pub fn move_page_down(&mut self, buffer: &RopeBuffer, page_size: usize) {
        let max_row = buffer.line_count().saturating_sub(1);
        self.row = (self.row + page_size).min(max_row);
        self.adjust_col_to_desired(buffer);
    }

    /// 移動到絕對字符位置（搜索選中匹配時使用）
    pub fn move_to_char(&mut self, buffer: &RopeBuffer, char_idx: usize) {
        let (row, col) = buffer.char_to_position(char_idx);
        self.row = row;
        self.col = col;
        self.desired_col = col;
    }

    /// 獲取光標在文本中的絕對字符位置
    pub fn char_position(&self, buffer: &RopeBuffer) -> usize {
        buffer.line_to_char(self.row) + self.col
    }

    /// 調整列位置到期望的列，確保不超出行長度
    fn adjust_col_to_desired(&mut self, buffer: &RopeBuffer) {
        self.col = self.desired_col.min(buffer.line_len(self.row));
    }
}
