// 搜索功能：查找匹配 + 匹配間循環導航

mod finder;
mod navigator;
mod query;

pub use finder::{find_matches, MatchSet, MatchSpan};
pub use navigator::{MatchNavigator, NavigatorState};
pub use query::{SearchMode, SearchQuery};

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// 正則模式下無法解析的模式
    #[error("Invalid regex '{pattern}': {message}")]
    QuerySyntax { pattern: String, message: String },

    #[error("Empty search query")]
    EmptyQuery,
}

/// 查找並換上新的匹配列表
///
/// 查找失敗時不動導航器，之前的匹配和游標保持不變。
pub fn search(
    navigator: &mut MatchNavigator,
    text: &str,
    query: &SearchQuery,
) -> Result<Option<MatchSpan>, SearchError> {
    let matches = find_matches(text, query)?;
    Ok(navigator.install_matches(matches))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_installs_and_selects_first() {
        let mut nav = MatchNavigator::new();
        let first = search(&mut nav, "cat hat bat", &SearchQuery::regex("[ch]at")).unwrap();
        assert_eq!(first, Some(MatchSpan::new(0, 3)));
        assert_eq!(nav.match_count(), 2);
    }

    #[test]
    fn test_invalid_regex_preserves_navigator() {
        let mut nav = MatchNavigator::new();
        search(&mut nav, "a b a b a", &SearchQuery::literal("a")).unwrap();
        nav.next();
        let before = nav.current_match();

        let err = search(&mut nav, "a b a b a", &SearchQuery::regex("[")).unwrap_err();
        assert!(matches!(err, SearchError::QuerySyntax { .. }));
        assert_eq!(nav.current_match(), before);
        assert_eq!(nav.position(), Some((2, 3)));
    }

    #[test]
    fn test_empty_query_preserves_navigator() {
        let mut nav = MatchNavigator::new();
        search(&mut nav, "xyz", &SearchQuery::literal("y")).unwrap();

        let err = search(&mut nav, "xyz", &SearchQuery::literal("")).unwrap_err();
        assert_eq!(err, SearchError::EmptyQuery);
        assert_eq!(nav.current_match(), Some(MatchSpan::new(1, 2)));
    }

    #[test]
    fn test_no_match_search_empties_navigator() {
        let mut nav = MatchNavigator::new();
        search(&mut nav, "hello", &SearchQuery::literal("l")).unwrap();
        let first = search(&mut nav, "hello", &SearchQuery::literal("xyz")).unwrap();
        assert!(first.is_none());
        assert_eq!(nav.state(), NavigatorState::Empty);
        assert!(nav.next().is_none());
        assert!(nav.previous().is_none());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(SearchError::EmptyQuery.to_string(), "Empty search query");
        let err = SearchError::QuerySyntax {
            pattern: "[".to_string(),
            message: "unclosed character class".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid regex '[': unclosed character class"
        );
    }
}
