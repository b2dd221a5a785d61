//! 能力接口：core 不关心拼音/辅助码来自库、内嵌表还是测试夹具。

use std::collections::HashMap;

/// 字 -> 带调拼音（例如 `'不'` -> `"bù"`）。
///
/// 约定：
/// - 对无法识别的字返回 `None`，调用方会让该字原样作为“音节”透传
/// - `convert_word` 必须为每个字给出一个音节；默认实现逐字调用 `convert`
/// - `readings` 给出多音字的全部候选读音，第一个应与 `convert` 一致
pub trait ToneConverter: Send + Sync {
    fn convert(&self, ch: char) -> Option<String>;

    fn readings(&self, ch: char) -> Vec<String> {
        self.convert(ch).into_iter().collect()
    }

    /// 整词转换（实现可以利用词内上下文）。
    fn convert_word(&self, word: &str) -> Vec<String> {
        word.chars()
            .map(|ch| self.convert(ch).unwrap_or_else(|| ch.to_string()))
            .collect()
    }
}

impl<T: ToneConverter + ?Sized> ToneConverter for &T {
    fn convert(&self, ch: char) -> Option<String> {
        (**self).convert(ch)
    }

    fn readings(&self, ch: char) -> Vec<String> {
        (**self).readings(ch)
    }

    fn convert_word(&self, word: &str) -> Vec<String> {
        (**self).convert_word(word)
    }
}

/// 字（可选带上已选定的音节，用于多音字消歧）-> 辅助码。
pub trait AuxLookup: Send + Sync {
    fn lookup(&self, ch: char, syllable: Option<&str>) -> Option<&str>;
}

impl<T: AuxLookup + ?Sized> AuxLookup for &T {
    fn lookup(&self, ch: char, syllable: Option<&str>) -> Option<&str> {
        (**self).lookup(ch, syllable)
    }
}

/// 最简单的辅助码表：只按字查，忽略音节。
impl AuxLookup for HashMap<char, String> {
    fn lookup(&self, ch: char, _syllable: Option<&str>) -> Option<&str> {
        self.get(&ch).map(String::as_str)
    }
}

/// 不提供任何辅助码（只输出带调拼音）。
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAux;

impl AuxLookup for NoAux {
    fn lookup(&self, _ch: char, _syllable: Option<&str>) -> Option<&str> {
        None
    }
}
