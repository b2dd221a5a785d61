//! 默认的字 -> 带调拼音转换（基于 `pinyin` crate），以及带调/无调拼音的归一化。

use pinyin::{ToPinyin, ToPinyinMulti};
use rime_core::charset::is_cjk;
use rime_core::convert::ToneConverter;

use crate::correction::CorrectionTable;

/// 基于 `pinyin` crate 的转换器：每个字取其最常用读音。
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultConverter;

impl DefaultConverter {
    pub fn new() -> Self {
        Self
    }
}

impl ToneConverter for DefaultConverter {
    fn convert(&self, ch: char) -> Option<String> {
        ch.to_pinyin().map(|p| p.with_tone().to_string())
    }

    /// 多音字会有多个读音，第一个是默认读音。
    fn readings(&self, ch: char) -> Vec<String> {
        match ch.to_pinyin_multi() {
            Some(multi) => multi.into_iter().map(|p| p.with_tone().to_string()).collect(),
            None => Vec::new(),
        }
    }
}

/// 在任意转换器之上叠加单字修正：命中修正表的字直接用修正读音。
pub struct CorrectedConverter<'t, C> {
    table: &'t CorrectionTable,
    inner: C,
}

impl<'t, C: ToneConverter> CorrectedConverter<'t, C> {
    pub fn new(table: &'t CorrectionTable, inner: C) -> Self {
        Self { table, inner }
    }
}

impl<C: ToneConverter> ToneConverter for CorrectedConverter<'_, C> {
    fn convert(&self, ch: char) -> Option<String> {
        if !is_cjk(ch) {
            return None;
        }
        match self.table.single(ch) {
            Some(s) => Some(s.to_string()),
            None => self.inner.convert(ch),
        }
    }

    /// 整词交给底层转换器（保留其词内上下文），再逐位套用单字修正。
    /// 音节数不对时原样返回，由调用方报错。
    fn convert_word(&self, word: &str) -> Vec<String> {
        let mut out = self.inner.convert_word(word);
        if out.len() == word.chars().count() {
            for (slot, ch) in out.iter_mut().zip(word.chars()) {
                if let Some(s) = self.table.single(ch) {
                    *slot = s.to_string();
                }
            }
        }
        out
    }

    fn readings(&self, ch: char) -> Vec<String> {
        if !is_cjk(ch) {
            return Vec::new();
        }
        let mut out = self.inner.readings(ch);
        if let Some(s) = self.table.single(ch) {
            out.retain(|r| r != s);
            out.insert(0, s.to_string());
        }
        out
    }
}

/// 去掉声调符号：`"lǜ"` -> `"lü"`，`"néng"` -> `"neng"`。
pub fn strip_tone(syllable: &str) -> String {
    syllable.chars().map(base_vowel).collect()
}

/// 用于比较的归一化形式：去声调、小写、`ü` 写作 `v`（RIME 方案里常见的写法）。
pub fn normalize_syllable(syllable: &str) -> String {
    strip_tone(syllable)
        .chars()
        .map(|c| match c {
            'ü' | 'Ü' => 'v',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

fn base_vowel(c: char) -> char {
    match c {
        'ā' | 'á' | 'ǎ' | 'à' => 'a',
        'ē' | 'é' | 'ě' | 'è' | 'ế' | 'ề' => 'e',
        'ī' | 'í' | 'ǐ' | 'ì' => 'i',
        'ō' | 'ó' | 'ǒ' | 'ò' => 'o',
        'ū' | 'ú' | 'ǔ' | 'ù' => 'u',
        'ǖ' | 'ǘ' | 'ǚ' | 'ǜ' => 'ü',
        'ń' | 'ň' | 'ǹ' => 'n',
        'ḿ' => 'm',
        c => c,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_converter_yields_tone_marks() {
        let c = DefaultConverter::new();
        assert_eq!(c.convert('中').as_deref(), Some("zhōng"));
        assert_eq!(c.convert('a'), None);
        assert_eq!(c.convert_word("中a"), vec!["zhōng".to_string(), "a".to_string()]);
    }

    #[test]
    fn heteronym_readings_start_with_default() {
        let c = DefaultConverter::new();
        let readings = c.readings('长');
        assert!(readings.len() >= 2);
        assert_eq!(Some(&readings[0]), c.convert('长').as_ref());
        assert!(readings.iter().any(|r| r == "zhǎng"));
    }

    #[test]
    fn single_overrides_win() {
        let mut table = CorrectionTable::new();
        table.insert_single('长', "zhǎng");
        let c = CorrectedConverter::new(&table, DefaultConverter);
        assert_eq!(c.convert('长').as_deref(), Some("zhǎng"));
        assert_eq!(c.convert('1'), None);
        assert_eq!(c.readings('长')[0], "zhǎng");
    }

    #[test]
    fn tone_stripping() {
        assert_eq!(strip_tone("bù"), "bu");
        assert_eq!(strip_tone("lǜ"), "lü");
        assert_eq!(normalize_syllable("Lǜ"), "lv");
        assert_eq!(normalize_syllable("nv"), "nv");
    }
}
