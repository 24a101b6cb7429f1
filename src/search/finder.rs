use regex::Regex;

use super::query::{SearchMode, SearchQuery};
use super::SearchError;

/// 一次匹配的範圍，半開區間 [start, end)，單位為字符（非字節）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSpan {
    pub start: usize,
    pub end: usize,
}

impl MatchSpan {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, pos: usize) -> bool {
        pos >= self.start && pos < self.end
    }
}

/// 按起始位置遞增排列、互不重疊的匹配列表
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSet {
    spans: Vec<MatchSpan>,
}

impl MatchSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_spans(spans: Vec<MatchSpan>) -> Self {
        debug_assert!(spans.windows(2).all(|w| w[0].end <= w[1].start));
        Self { spans }
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<MatchSpan> {
        self.spans.get(idx).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MatchSpan> {
        self.spans.iter()
    }

    pub fn as_slice(&self) -> &[MatchSpan] {
        &self.spans
    }
}

/// 在整段文本中查找所有匹配
///
/// 兩種模式都走同一條正則路徑（字面模式先轉義），
/// 因此都是由左至右、最左優先、互不重疊的掃描。
/// 零寬度匹配（如 `^`）不選中任何文字，直接略過。
pub fn find_matches(text: &str, query: &SearchQuery) -> Result<MatchSet, SearchError> {
    if query.pattern.is_empty() {
        return Err(SearchError::EmptyQuery);
    }

    let regex = compile(query)?;

    let mut spans = Vec::new();
    // 正則返回字節位置，邊掃描邊換算成字符位置
    let mut byte_pos = 0;
    let mut char_pos = 0;

    for m in regex.find_iter(text) {
        if m.start() == m.end() {
            continue;
        }

        char_pos += text[byte_pos..m.start()].chars().count();
        let start = char_pos;
        char_pos += m.as_str().chars().count();
        byte_pos = m.end();

        spans.push(MatchSpan::new(start, char_pos));
    }

    log::debug!(
        "find_matches: {} '{}' -> {} matches",
        query.mode.label(),
        query.pattern,
        spans.len()
    );

    Ok(MatchSet { spans })
}

fn compile(query: &SearchQuery) -> Result<Regex, SearchError> {
    let source = match query.mode {
        SearchMode::Literal => regex::escape(&query.pattern),
        SearchMode::Regex => query.pattern.clone(),
    };

    Regex::new(&source).map_err(|e| SearchError::QuerySyntax {
        pattern: query.pattern.clone(),
        message: short_message(&e),
    })
}

/// regex 的語法錯誤是多行格式（含指示符號），狀態欄只取最後一行
fn short_message(err: &regex::Error) -> String {
    let full = err.to_string();
    let last = full.lines().last().unwrap_or_default().trim();
    last.strip_prefix("error: ").unwrap_or(last).to_string()
}
