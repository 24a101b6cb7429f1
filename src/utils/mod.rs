mod logger;

pub use logger::init_logger;

use unicode_width::UnicodeWidthChar;

/// 計算字符串的視覺寬度（考慮寬字元）
/// 中文字元等寬字元會正確計算為 2，ASCII 字元計算為 1
pub fn visual_width(s: &str) -> usize {
    s.chars().map(char_width).sum()
}

/// 計算單個字符的視覺寬度
pub fn char_width(ch: char) -> usize {
    UnicodeWidthChar::width(ch).unwrap_or(1)
}

/// 按視覺寬度截斷字符串
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut width = 0;
    let mut result = String::new();
    for ch in s.chars() {
        let w = char_width(ch);
        if width + w > max_width {
            break;
        }
        result.push(ch);
        width += w;
    }
    result
}
