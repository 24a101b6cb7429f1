pub mod file_io;
mod rope_buffer;

pub use rope_buffer::RopeBuffer;

/// 命令列指定的讀寫編碼
#[derive(Debug, Clone, Default)]
pub struct EncodingConfig {
    pub read_encoding: Option<&'static encoding_rs::Encoding>,
    pub save_encoding: Option<&'static encoding_rs::Encoding>,
}

/// 由編碼標籤解析（如 "gbk"、"utf-16le"、"windows-1252"）
pub fn parse_encoding(label: &str) -> Option<&'static encoding_rs::Encoding> {
    encoding_rs::Encoding::for_label(label.trim().as_bytes())
}
