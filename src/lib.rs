//! quill - 極簡終端文字編輯器，支持字面與正則搜索

pub mod buffer;
pub mod config;
pub mod editor;
pub mod search;
pub mod utils;

mod cursor;
mod dialog;
mod input;
mod terminal;
mod view;

// 重新導出常用類型
pub use buffer::RopeBuffer;
pub use config::Config;
pub use cursor::Cursor;
pub use editor::Editor;
pub use search::{find_matches, MatchNavigator, MatchSet, MatchSpan, SearchMode, SearchQuery};
pub use terminal::Terminal;
pub use view::Selection;
