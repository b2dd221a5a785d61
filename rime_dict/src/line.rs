//! 单行转换：`word<TAB>无调拼音[<TAB>权重]` -> `word<TAB>音节;辅助码 …[<TAB>权重]`。

use rime_core::charset::{contains_cjk, is_cjk};
use rime_core::convert::{AuxLookup, ToneConverter};
use rime_core::error::{ConvertError, Result};
use rime_core::model::{AnnotatedSyllable, Annotation, DictEntry};
use rime_core::rime_text::{is_blank_or_comment, is_header_end, is_header_start, split_line_ending};
use rime_pinyin::PinyinEngine;

/// 一行的处理结果（统计用）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    /// 原样输出（空行、注释、不含汉字的词条）
    Passthrough,
    Transformed {
        /// 整词命中词组修正表
        corrected: bool,
        /// 没有辅助码的音节数
        uncoded: usize,
    },
}

/// 行转换器。查表对象都以只读引用/值注入，不依赖任何全局状态。
pub struct LineTransformer<'t, C, A> {
    engine: PinyinEngine<'t, C>,
    aux: A,
}

impl<'t, C, A> LineTransformer<'t, C, A>
where
    C: ToneConverter,
    A: AuxLookup,
{
    pub fn new(engine: PinyinEngine<'t, C>, aux: A) -> Self {
        Self { engine, aux }
    }

    /// 给一个词注音并配上辅助码。非汉字不查辅助码，词内空白不产生音节。
    pub fn annotate(&self, word: &str, romanization: &str) -> Result<(Annotation, bool)> {
        let toned = self.engine.toned(word, romanization)?;
        let syllables = word
            .chars()
            .zip(toned.syllables)
            .filter(|(ch, _)| !ch.is_whitespace())
            .map(|(ch, syllable)| {
                let code = if is_cjk(ch) {
                    self.aux.lookup(ch, Some(syllable.as_str())).map(str::to_string)
                } else {
                    None
                };
                AnnotatedSyllable { syllable, code }
            })
            .collect();
        Ok((Annotation(syllables), toned.corrected))
    }

    /// 转换数据区的一行（含行尾换行符），结果追加到 `out`。
    ///
    /// 空行、注释以及不含汉字的词条逐字节原样输出。
    pub fn transform_line(&self, line_no: usize, line: &str, out: &mut String) -> Result<LineOutcome> {
        let (content, nl) = split_line_ending(line);
        let Some(entry) = parse_entry(line_no, content)? else {
            out.push_str(line);
            return Ok(LineOutcome::Passthrough);
        };

        let (annotation, corrected) = self
            .annotate(entry.word.trim(), entry.romanization.trim())
            .map_err(|e| e.at_line(line_no, entry.word.trim()))?;

        out.push_str(entry.word);
        out.push('\t');
        out.push_str(&annotation.to_string());
        if let Some(extra) = entry.extra {
            out.push('\t');
            out.push_str(extra);
        }
        out.push_str(nl);

        Ok(LineOutcome::Transformed {
            corrected,
            uncoded: annotation.uncoded(),
        })
    }

    /// `transform_line` 的便捷版本。
    pub fn transform(&self, line_no: usize, line: &str) -> Result<String> {
        let mut out = String::with_capacity(line.len() * 2);
        self.transform_line(line_no, line, &mut out)?;
        Ok(out)
    }
}

/// 切分数据行（不含换行符）。需要原样透传的行返回 `None`。
///
/// 至少两列；第三列起（权重、stem 等附加列）原样保留。缺制表符或词/拼音为空算格式错误。
pub fn parse_entry(line_no: usize, content: &str) -> Result<Option<DictEntry<'_>>> {
    // 数据区里零散的 `---` / `...` 当作结构行透传
    if is_blank_or_comment(content) || is_header_start(content) || is_header_end(content) {
        return Ok(None);
    }
    let malformed = |reason: &str| ConvertError::MalformedLine {
        line: line_no,
        reason: reason.to_string(),
    };

    let mut cols = content.splitn(3, '\t');
    let word = cols.next().unwrap_or("");
    let Some(romanization) = cols.next() else {
        return Err(malformed("缺少制表符，应为 `词<TAB>拼音`"));
    };
    // 第三列起（权重、stem 等）整体原样保留
    let extra = cols.next();
    if word.trim().is_empty() {
        return Err(malformed("词为空"));
    }
    if romanization.trim().is_empty() {
        return Err(malformed("拼音列为空"));
    }
    if !contains_cjk(word) {
        return Ok(None);
    }

    Ok(Some(DictEntry {
        word,
        romanization,
        extra,
    }))
}
