//! 修正表：对默认逐字转换容易出错的词（变调、多音字）给出权威读音。
//!
//! 两类来源，都是 RIME 词典文本（带调拼音）：
//! - 词组表：`词<TAB>cí zǔ`，整词覆盖
//! - 单字表：`字<TAB>zì`，替换该字的默认读音（多个读音时取第一个）
//!
//! 重复的键一律先到先得。

use std::{collections::HashMap, fs, path::Path};

use rime_core::error::{ConvertError, Result};
use rime_core::rime_text::RimeEntries;
use tracing::{debug, info};

/// 一次加载的统计。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CorrectionStats {
    pub loaded: usize,
    pub skipped: usize,
    pub duplicates: usize,
}

#[derive(Debug, Clone, Default)]
pub struct CorrectionTable {
    phrases: HashMap<String, Vec<String>>,
    singles: HashMap<char, String>,
}

impl CorrectionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从文件加载词组修正。文件不可读或不是 UTF-8 时返回 `MissingResource`。
    pub fn load_phrases(&mut self, path: impl AsRef<Path>) -> Result<CorrectionStats> {
        let path = path.as_ref();
        let text = read_resource("词组修正表", path)?;
        let stats = self.load_phrases_str(&text);
        info!(path = %path.display(), loaded = stats.loaded, skipped = stats.skipped, duplicates = stats.duplicates, "词组修正表加载完成");
        Ok(stats)
    }

    /// 从文件加载单字读音修正。
    pub fn load_singles(&mut self, path: impl AsRef<Path>) -> Result<CorrectionStats> {
        let path = path.as_ref();
        let text = read_resource("单字修正表", path)?;
        let stats = self.load_singles_str(&text);
        info!(path = %path.display(), loaded = stats.loaded, skipped = stats.skipped, duplicates = stats.duplicates, "单字修正表加载完成");
        Ok(stats)
    }

    pub fn load_phrases_str(&mut self, text: &str) -> CorrectionStats {
        let mut stats = CorrectionStats::default();
        for (line, word, code) in RimeEntries::new(text) {
            let syllables: Vec<String> = code.split_whitespace().map(str::to_string).collect();
            if word.chars().count() <= 1 {
                stats.skipped += 1;
                continue;
            }
            match self.insert_phrase(word, syllables) {
                Ok(true) => stats.loaded += 1,
                Ok(false) => stats.duplicates += 1,
                Err(e) => {
                    debug!(line, word, "跳过词组修正：{e}");
                    stats.skipped += 1;
                }
            }
        }
        stats
    }

    pub fn load_singles_str(&mut self, text: &str) -> CorrectionStats {
        let mut stats = CorrectionStats::default();
        for (line, word, code) in RimeEntries::new(text) {
            let mut chars = word.chars();
            let (Some(ch), None) = (chars.next(), chars.next()) else {
                debug!(line, word, "跳过单字修正：不是单个字");
                stats.skipped += 1;
                continue;
            };
            let Some(first) = code.split_whitespace().next() else {
                stats.skipped += 1;
                continue;
            };
            if self.insert_single(ch, first) {
                stats.loaded += 1;
            } else {
                stats.duplicates += 1;
            }
        }
        stats
    }

    /// 插入一条词组修正；已存在时不覆盖并返回 `Ok(false)`。
    ///
    /// 音节数必须等于字数，否则返回 `SyllableCountMismatch`。
    pub fn insert_phrase(&mut self, word: &str, syllables: Vec<String>) -> Result<bool> {
        let chars = word.chars().count();
        if syllables.len() != chars {
            return Err(ConvertError::SyllableCountMismatch {
                word: word.to_string(),
                chars,
                syllables: syllables.len(),
            });
        }
        if self.phrases.contains_key(word) {
            return Ok(false);
        }
        self.phrases.insert(word.to_string(), syllables);
        Ok(true)
    }

    /// 插入单字读音；已存在时返回 `false`。
    pub fn insert_single(&mut self, ch: char, syllable: &str) -> bool {
        if self.singles.contains_key(&ch) {
            return false;
        }
        self.singles.insert(ch, syllable.to_string());
        true
    }

    pub fn phrase(&self, word: &str) -> Option<&[String]> {
        self.phrases.get(word).map(Vec::as_slice)
    }

    pub fn single(&self, ch: char) -> Option<&str> {
        self.singles.get(&ch).map(String::as_str)
    }

    pub fn phrase_count(&self) -> usize {
        self.phrases.len()
    }

    pub fn single_count(&self) -> usize {
        self.singles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty() && self.singles.is_empty()
    }
}

fn read_resource(name: &'static str, path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| ConvertError::resource(name, path.display().to_string(), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHRASES: &str = "\
---
name: 词组
version: \"2024\"
...
不能\tbù néng
不能\tbú néng
一个\tyí
行长\tháng zhǎng\t12
长\tcháng
";

    #[test]
    fn phrases_first_seen_wins_and_bad_counts_are_skipped() {
        let mut t = CorrectionTable::new();
        let stats = t.load_phrases_str(PHRASES);
        assert_eq!(
            stats,
            CorrectionStats {
                loaded: 2,
                skipped: 2,
                duplicates: 1
            }
        );
        assert_eq!(t.phrase("不能").unwrap(), ["bù", "néng"]);
        assert_eq!(t.phrase("行长").unwrap(), ["háng", "zhǎng"]);
        assert!(t.phrase("一个").is_none());
        assert!(t.phrase("长").is_none());
    }

    #[test]
    fn singles_take_first_reading() {
        let mut t = CorrectionTable::new();
        let stats = t.load_singles_str("长\tcháng zhǎng\n你好\tnǐ hǎo\n长\tzhǎng\n");
        assert_eq!(stats.loaded, 1);
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.duplicates, 1);
        assert_eq!(t.single('长'), Some("cháng"));
    }

    #[test]
    fn insert_rejects_count_mismatch() {
        let mut t = CorrectionTable::new();
        let err = t.insert_phrase("不能", vec!["bù".into()]).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::SyllableCountMismatch { chars: 2, syllables: 1, .. }
        ));
    }

    #[test]
    fn missing_file_is_a_resource_error() {
        let mut t = CorrectionTable::new();
        let err = t.load_phrases("/definitely/not/here.dict.yaml").unwrap_err();
        assert!(matches!(err, ConvertError::MissingResource { .. }));
    }
}
