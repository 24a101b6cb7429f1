// 文件讀寫：整個文件一次讀入/寫出，處理 BOM 與編碼

use anyhow::{Context, Result};
use encoding_rs::Encoding;
use std::fs;
use std::path::Path;

/// 讀取結果
#[derive(Debug)]
pub struct LoadedText {
    pub text: String,
    pub encoding: &'static Encoding,
}

/// 檢測文件編碼，基於 BOM；返回 (編碼, BOM 長度)
pub fn detect_encoding(bytes: &[u8]) -> (&'static Encoding, usize) {
    if bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
        (encoding_rs::UTF_8, 3)
    } else if bytes.starts_with(&[0xFF, 0xFE]) {
        (encoding_rs::UTF_16LE, 2)
    } else if bytes.starts_with(&[0xFE, 0xFF]) {
        (encoding_rs::UTF_16BE, 2)
    } else {
        // 無 BOM，預設 UTF-8
        (encoding_rs::UTF_8, 0)
    }
}

/// 讀取文件並解碼為 UTF-8
///
/// 有 BOM 時以 BOM 為準；否則使用指定編碼，未指定則為 UTF-8。
pub fn load(path: &Path, encoding: Option<&'static Encoding>) -> Result<LoadedText> {
    let bytes =
        fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;

    let (bom_encoding, bom_len) = detect_encoding(&bytes);
    let encoding = if bom_len > 0 {
        bom_encoding
    } else {
        encoding.unwrap_or(encoding_rs::UTF_8)
    };

    let (decoded, had_errors) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
    if had_errors {
        log::warn!("Encoding errors detected in file: {}", path.display());
    }

    log::debug!(
        "Loaded {} ({} bytes, {})",
        path.display(),
        bytes.len(),
        encoding.name()
    );

    Ok(LoadedText {
        text: decoded.into_owned(),
        encoding,
    })
}

/// 以指定編碼寫出整段文本
pub fn save(path: &Path, text: &str, encoding: &'static Encoding) -> Result<()> {
    let bytes = encode(text, encoding);
    if bytes.had_errors {
        log::warn!(
            "Encoding errors occurred while saving file: {}",
            path.display()
        );
    }

    fs::write(path, &bytes.data)
        .with_context(|| format!("Failed to write file: {}", path.display()))?;

    log::debug!("Saved {} ({} bytes)", path.display(), bytes.data.len());
    Ok(())
}

struct Encoded {
    data: Vec<u8>,
    had_errors: bool,
}

fn encode(text: &str, encoding: &'static Encoding) -> Encoded {
    // encoding_rs 不支持輸出 UTF-16，手動編碼並寫回 BOM 以便下次讀取識別
    if encoding == encoding_rs::UTF_16LE || encoding == encoding_rs::UTF_16BE {
        let little = encoding == encoding_rs::UTF_16LE;
        let mut data = if little {
            vec![0xFF, 0xFE]
        } else {
            vec![0xFE, 0xFF]
        };
        for unit in text.encode_utf16() {
            let pair = if little {
                unit.to_le_bytes()
            } else {
                unit.to_be_bytes()
            };
            data.extend_from_slice(&pair);
        }
        return Encoded {
            data,
            had_errors: false,
        };
    }

    let (encoded, _, had_errors) = encoding.encode(text);
    Encoded {
        data: encoded.into_owned(),
        had_errors,
    }
}
