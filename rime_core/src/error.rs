use std::io;

use thiserror::Error;

/// 转换流程中的所有错误。
///
/// 策略是 fail-fast：任何一种错误都会中止整次运行，不做重试、不输出半成品。
#[derive(Debug, Error)]
pub enum ConvertError {
    /// 数据区的一行不是 `word<TAB>pinyin[<TAB>weight]` 形状
    #[error("第 {line} 行格式错误：{reason}")]
    MalformedLine { line: usize, reason: String },

    /// 逐字转换得到的音节数与字数不一致
    #[error("“{word}” 得到 {syllables} 个音节，但共有 {chars} 个字")]
    SyllableCountMismatch {
        word: String,
        chars: usize,
        syllables: usize,
    },

    /// 修正表 / 辅助码表在启动时不可读或无法解析
    #[error("无法加载{name}（{path}）：{reason}")]
    MissingResource {
        name: &'static str,
        path: String,
        reason: String,
    },

    /// 输入不是合法 UTF-8
    #[error("第 {line} 行不是合法的 UTF-8（字节偏移 {offset}）")]
    Encoding { line: usize, offset: u64 },

    /// 给单个词条的错误补上位置
    #[error("第 {line} 行（{word}）：{source}")]
    AtLine {
        line: usize,
        word: String,
        source: Box<ConvertError>,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl ConvertError {
    /// 给错误附上行号与词；已经带位置的错误保持不变。
    pub fn at_line(self, line: usize, word: &str) -> Self {
        match self {
            e @ (ConvertError::AtLine { .. }
            | ConvertError::MalformedLine { .. }
            | ConvertError::Encoding { .. }) => e,
            e => ConvertError::AtLine {
                line,
                word: word.to_string(),
                source: Box::new(e),
            },
        }
    }

    pub fn resource(name: &'static str, path: impl Into<String>, reason: impl ToString) -> Self {
        ConvertError::MissingResource {
            name,
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T, E = ConvertError> = std::result::Result<T, E>;
