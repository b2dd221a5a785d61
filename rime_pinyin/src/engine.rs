use rime_core::charset::is_cjk;
use rime_core::convert::ToneConverter;
use rime_core::error::{ConvertError, Result};

use crate::converter::{CorrectedConverter, normalize_syllable};
use crate::correction::CorrectionTable;

/// 一个词的带调拼音。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toned {
    /// 与词的字一一对应
    pub syllables: Vec<String>,
    /// 是否整词命中词组修正表
    pub corrected: bool,
}

/// 拼音引擎：词 + 无调拼音 -> 逐字带调拼音。
///
/// 查找顺序：
/// 1. 词组修正表整词命中：直接返回修正读音，忽略输入拼音
/// 2. 逐字转换（单字修正优先，其次是底层转换器）
/// 3. 若输入拼音与字数相同，用它在多音字的候选读音里挑出与之相符的那个
///
/// 非汉字（数字、标点、字母）原样作为自己的“音节”。
pub struct PinyinEngine<'t, C> {
    corrections: &'t CorrectionTable,
    converter: CorrectedConverter<'t, C>,
}

impl<'t, C: ToneConverter> PinyinEngine<'t, C> {
    pub fn new(corrections: &'t CorrectionTable, converter: C) -> Self {
        Self {
            corrections,
            converter: CorrectedConverter::new(corrections, converter),
        }
    }

    pub fn toned(&self, word: &str, romanization: &str) -> Result<Toned> {
        if let Some(syllables) = self.corrections.phrase(word) {
            return Ok(Toned {
                syllables: syllables.to_vec(),
                corrected: true,
            });
        }

        let chars: Vec<char> = word.chars().collect();
        let mut syllables = self.converter.convert_word(word);
        if syllables.len() != chars.len() {
            return Err(ConvertError::SyllableCountMismatch {
                word: word.to_string(),
                chars: chars.len(),
                syllables: syllables.len(),
            });
        }

        let hints: Vec<&str> = romanization.split_whitespace().collect();
        let hints = (hints.len() == chars.len()).then_some(hints);

        for (i, &ch) in chars.iter().enumerate() {
            if !is_cjk(ch) {
                syllables[i] = ch.to_string();
                continue;
            }
            if let Some(hints) = &hints {
                if let Some(better) = self.reading_matching(ch, &syllables[i], hints[i]) {
                    syllables[i] = better;
                }
            }
        }

        Ok(Toned {
            syllables,
            corrected: false,
        })
    }

    // 默认读音与输入拼音不符时，在候选读音里找相符的；找不到就保留默认读音。
    fn reading_matching(&self, ch: char, current: &str, hint: &str) -> Option<String> {
        let want = normalize_syllable(hint);
        if normalize_syllable(current) == want {
            return None;
        }
        self.converter
            .readings(ch)
            .into_iter()
            .find(|r| normalize_syllable(r) == want)
    }
}
