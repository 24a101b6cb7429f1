// 配置管理

use crate::buffer::EncodingConfig;
use crate::search::SearchMode;

#[derive(Debug, Clone)]
pub struct Config {
    pub tab_width: usize,
    pub line_numbers: bool,
    /// 啟動時的搜索模式，編輯中可用 Ctrl+R 切換
    pub default_mode: SearchMode,
    pub encoding: EncodingConfig,
    pub debug: bool,
}

impl Config {
    pub fn new() -> Self {
        Self {
            tab_width: 4,
            line_numbers: true,
            default_mode: SearchMode::Literal,
            encoding: EncodingConfig::default(),
            debug: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
