use std::fmt;

/// 词典数据区的一行（借用自当前行，处理完即丢弃）。
///
/// 形状：`word<TAB>romanization[<TAB>extra]`，`extra` 通常是 RIME 的权重列，原样保留。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DictEntry<'a> {
    /// 词（原样保留，不做 trim）
    pub word: &'a str,
    /// 无调拼音，空格分隔（例如 `"bu neng"`）
    pub romanization: &'a str,
    /// 第三列及以后（不含前导制表符）
    pub extra: Option<&'a str>,
}

/// 一个音节及其辅助码。
///
/// 输出时写成 `syllable;code`；没有辅助码时只写 `syllable`，不带结尾的 `;`。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedSyllable {
    pub syllable: String,
    pub code: Option<String>,
}

impl fmt::Display for AnnotatedSyllable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.code {
            Some(code) => write!(f, "{};{}", self.syllable, code),
            None => f.write_str(&self.syllable),
        }
    }
}

/// 整个词的注音结果，与词的字数一一对应。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotation(pub Vec<AnnotatedSyllable>);

impl Annotation {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 没有辅助码的音节数（统计用）
    pub fn uncoded(&self) -> usize {
        self.0.iter().filter(|s| s.code.is_none()).count()
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, s) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{s}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn syl(s: &str, code: Option<&str>) -> AnnotatedSyllable {
        AnnotatedSyllable {
            syllable: s.to_string(),
            code: code.map(str::to_string),
        }
    }

    #[test]
    fn display_joins_with_spaces_and_omits_empty_codes() {
        let a = Annotation(vec![syl("bù", Some("kx")), syl("néng", None), syl("3", None)]);
        assert_eq!(a.to_string(), "bù;kx néng 3");
        assert_eq!(a.uncoded(), 2);
    }
}
