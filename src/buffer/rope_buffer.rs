use anyhow::{bail, Result};
use encoding_rs::Encoding;
use ropey::{Rope, RopeSlice};
use std::path::{Path, PathBuf};

use super::file_io;

pub struct RopeBuffer {
    rope: Rope,
    file_path: Option<PathBuf>,
    modified: bool,
    encoding: &'static Encoding, // 文件編碼
}

impl RopeBuffer {
    pub fn new() -> Self {
        Self {
            rope: Rope::new(),
            file_path: None,
            modified: false,
            encoding: encoding_rs::UTF_8,
        }
    }

    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            ..Self::new()
        }
    }

    /// 以文件建立緩衝區；文件不存在時建立綁定該路徑的空緩衝區
    pub fn from_file(path: &Path, encoding: Option<&'static Encoding>) -> Result<Self> {
        if !path.exists() {
            return Ok(Self {
                file_path: Some(path.to_path_buf()),
                modified: true,
                encoding: encoding.unwrap_or(encoding_rs::UTF_8),
                ..Self::new()
            });
        }

        let mut buffer = Self::new();
        buffer.load(path, encoding)?;
        Ok(buffer)
    }

    /// 用文件內容替換整個緩衝區
    ///
    /// 讀取失敗時緩衝區被清空並解除路徑綁定，錯誤返回給調用者。
    pub fn load(&mut self, path: &Path, encoding: Option<&'static Encoding>) -> Result<()> {
        match file_io::load(path, encoding) {
            Ok(loaded) => {
                self.rope = Rope::from_str(&loaded.text);
                self.encoding = loaded.encoding;
                self.file_path = Some(path.to_path_buf());
                self.modified = false;
                Ok(())
            }
            Err(e) => {
                self.rope = Rope::new();
                self.file_path = None;
                self.modified = false;
                Err(e)
            }
        }
    }

    pub fn save(&mut self) -> Result<()> {
        let Some(path) = self.file_path.clone() else {
            bail!("No file path set");
        };
        file_io::save(&path, &self.text(), self.encoding)?;
        self.modified = false;
        Ok(())
    }

    pub fn save_as(&mut self, path: &Path) -> Result<()> {
        file_io::save(path, &self.text(), self.encoding)?;
        self.file_path = Some(path.to_path_buf());
        self.modified = false;
        Ok(())
    }

    /// 完整文本
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// 字符範圍 [start, end) 的文本，超出部分截斷
    pub fn text_range(&self, start: usize, end: usize) -> String {
        let end = end.min(self.rope.len_chars());
        let start = start.min(end);
        self.rope.slice(start..end).to_string()
    }

    pub fn insert_char(&mut self, pos: usize, ch: char) {
        let pos = pos.min(self.rope.len_chars());
        self.rope.insert_char(pos, ch);
        self.modified = true;
    }

    pub fn insert(&mut self, pos: usize, text: &str) {
        let pos = pos.min(self.rope.len_chars());
        self.rope.insert(pos, text);
        self.modified = true;
    }

    pub fn delete_char(&mut self, pos: usize) {
        if pos < self.rope.len_chars() {
            self.rope.remove(pos..pos + 1);
            self.modified = true;
        }
    }

    pub fn delete_range(&mut self, start: usize, end: usize) {
        if start < end && start < self.rope.len_chars() {
            let end = end.min(self.rope.len_chars());
            self.rope.remove(start..end);
            self.modified = true;
        }
    }

    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    pub fn line(&self, idx: usize) -> Option<RopeSlice<'_>> {
        if idx < self.line_count() {
            Some(self.rope.line(idx))
        } else {
            None
        }
    }

    pub fn line_to_char(&self, line_idx: usize) -> usize {
        self.rope.line_to_char(line_idx.min(self.line_count()))
    }

    /// 字符位置轉 (行, 列)
    pub fn char_to_position(&self, char_idx: usize) -> (usize, usize) {
        let char_idx = char_idx.min(self.rope.len_chars());
        let row = self.rope.char_to_line(char_idx);
        (row, char_idx - self.rope.line_to_char(row))
    }

    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn get_line_content(&self, line_idx: usize) -> String {
        if let Some(line) = self.line(line_idx) {
            line.to_string()
        } else {
            String::new()
        }
    }

    /// 行長度（不含換行符）
    pub fn line_len(&self, line_idx: usize) -> usize {
        self.get_line_content(line_idx)
            .trim_end_matches(['\n', '\r'])
            .chars()
            .count()
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub fn file_name(&self) -> String {
        self.file_path
            .as_ref()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .unwrap_or("[No Name]")
            .to_string()
    }

    /// 設置文件編碼
    pub fn set_encoding(&mut self, encoding: &'static Encoding) {
        self.encoding = encoding;
        self.modified = true;
    }

    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }
}

impl Default for RopeBuffer {
    fn default() -> Self {
        Self::new()
    }
}
