#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // 字符輸入
    Insert(char),

    // 刪除操作
    Delete,
    Backspace,

    // 光標移動
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    MoveHome,
    MoveEnd,
    PageUp,
    PageDown,

    // 文件操作
    Open,
    Save,
    SaveAs,
    Quit,

    // 搜索
    Find,
    FindNext,
    FindPrev,
    ToggleRegex,

    // 視圖控制
    ToggleLineNumbers,

    // 清除訊息和選擇
    ClearMessage,
}
