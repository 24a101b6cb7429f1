// 匹配導航：持有當前匹配列表與游標，循環前進/後退

use super::finder::{MatchSet, MatchSpan};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigatorState {
    Empty,
    Active,
}

#[derive(Debug, Clone, Default)]
pub struct MatchNavigator {
    matches: MatchSet,
    current: Option<usize>, // 列表為空時為 None
}

impl MatchNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 換上新的匹配列表，游標重置到第一個匹配
    pub fn install_matches(&mut self, matches: MatchSet) -> Option<MatchSpan> {
        self.current = if matches.is_empty() { None } else { Some(0) };
        self.matches = matches;
        self.current_match()
    }

    pub fn clear(&mut self) {
        self.install_matches(MatchSet::new());
    }

    pub fn current_match(&self) -> Option<MatchSpan> {
        self.current.and_then(|idx| self.matches.get(idx))
    }

    pub fn next(&mut self) -> Option<MatchSpan> {
        let idx = self.current?;
        self.current = Some((idx + 1) % self.matches.len());
        self.current_match()
    }

    pub fn previous(&mut self) -> Option<MatchSpan> {
        let idx = self.current?;
        let len = self.matches.len();
        self.current = Some((idx + len - 1) % len);
        self.current_match()
    }

    /// (第幾個, 總數)，從 1 開始計，供狀態欄顯示
    pub fn position(&self) -> Option<(usize, usize)> {
        self.current.map(|idx| (idx + 1, self.matches.len()))
    }

    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    pub fn matches(&self) -> &MatchSet {
        &self.matches
    }

    pub fn state(&self) -> NavigatorState {
        match self.current {
            Some(_) => NavigatorState::Active,
            None => NavigatorState::Empty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three() -> MatchSet {
        MatchSet::from_spans(vec![
            MatchSpan::new(0, 2),
            MatchSpan::new(5, 7),
            MatchSpan::new(10, 12),
        ])
    }

    #[test]
    fn test_empty_navigator() {
        let mut nav = MatchNavigator::new();
        assert_eq!(nav.state(), NavigatorState::Empty);
        assert!(nav.current_match().is_none());
        assert!(nav.next().is_none());
        assert!(nav.previous().is_none());
        assert!(nav.position().is_none());
        assert_eq!(nav.match_count(), 0);
    }

    #[test]
    fn test_install_selects_first() {
        let mut nav = MatchNavigator::new();
        let first = nav.install_matches(three());
        assert_eq!(first, Some(MatchSpan::new(0, 2)));
        assert_eq!(nav.state(), NavigatorState::Active);
        assert_eq!(nav.position(), Some((1, 3)));
    }

    #[test]
    fn test_install_resets_cursor() {
        let mut nav = MatchNavigator::new();
        nav.install_matches(three());
        nav.next();
        nav.next();
        assert_eq!(nav.position(), Some((3, 3)));

        nav.install_matches(three());
        assert_eq!(nav.current_match(), Some(MatchSpan::new(0, 2)));
    }

    #[test]
    fn test_next_wraps_to_first() {
        let mut nav = MatchNavigator::new();
        nav.install_matches(three());

        assert_eq!(nav.next(), Some(MatchSpan::new(5, 7)));
        assert_eq!(nav.next(), Some(MatchSpan::new(10, 12)));
        assert_eq!(nav.next(), Some(MatchSpan::new(0, 2)));
        assert_eq!(nav.position(), Some((1, 3)));
    }

    #[test]
    fn test_previous_wraps_to_last() {
        let mut nav = MatchNavigator::new();
        nav.install_matches(three());

        assert_eq!(nav.previous(), Some(MatchSpan::new(10, 12)));
        assert_eq!(nav.position(), Some((3, 3)));
        assert_eq!(nav.previous(), Some(MatchSpan::new(5, 7)));
    }

    #[test]
    fn test_single_match_cycles_to_itself() {
        let mut nav = MatchNavigator::new();
        nav.install_matches(MatchSet::from_spans(vec![MatchSpan::new(3, 4)]));
        assert_eq!(nav.next(), Some(MatchSpan::new(3, 4)));
        assert_eq!(nav.previous(), Some(MatchSpan::new(3, 4)));
    }

    #[test]
    fn test_navigation_keeps_match_set() {
        let mut nav = MatchNavigator::new();
        nav.install_matches(three());
        nav.next();
        nav.previous();
        nav.previous();
        assert_eq!(nav.matches(), &three());
    }

    #[test]
    fn test_install_empty_deactivates() {
        let mut nav = MatchNavigator::new();
        nav.install_matches(three());
        assert!(nav.install_matches(MatchSet::new()).is_none());
        assert_eq!(nav.state(), NavigatorState::Empty);
        assert!(nav.next().is_none());

        nav.install_matches(three());
        nav.clear();
        assert_eq!(nav.state(), NavigatorState::Empty);
    }
}
