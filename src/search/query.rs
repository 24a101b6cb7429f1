// 搜索查詢：模式字串 + 匹配方式

/// 查詢字串的解讀方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    /// 精確子字串
    #[default]
    Literal,
    /// 正則表達式
    Regex,
}

impl SearchMode {
    pub fn toggle(self) -> Self {
        match self {
            SearchMode::Literal => SearchMode::Regex,
            SearchMode::Regex => SearchMode::Literal,
        }
    }

    /// 狀態欄顯示用的短標籤
    pub fn label(self) -> &'static str {
        match self {
            SearchMode::Literal => "literal",
            SearchMode::Regex => "regex",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub pattern: String,
    pub mode: SearchMode,
}

impl SearchQuery {
    pub fn new(pattern: impl Into<String>, mode: SearchMode) -> Self {
        Self {
            pattern: pattern.into(),
            mode,
        }
    }

    pub fn literal(pattern: impl Into<String>) -> Self {
        Self::new(pattern, SearchMode::Literal)
    }

    pub fn regex(pattern: impl Into<String>) -> Self {
        Self::new(pattern, SearchMode::Regex)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_toggle() {
        assert_eq!(SearchMode::Literal.toggle(), SearchMode::Regex);
        assert_eq!(SearchMode::Regex.toggle(), SearchMode::Literal);
        assert_eq!(SearchMode::default(), SearchMode::Literal);
    }

    #[test]
    fn test_query_constructors() {
        let q = SearchQuery::regex("[ch]at");
        assert_eq!(q.mode, SearchMode::Regex);
        assert_eq!(q.pattern, "[ch]at");
        assert_eq!(SearchQuery::literal("a").mode, SearchMode::Literal);
    }
}
