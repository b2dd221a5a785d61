//! RIME `*.dict.yaml` 文本扫描。
//!
//! 文件结构：
//! - 可选的 YAML 头：以 `---` 开始，以单独一行 `...` 结束
//! - 数据区：`word<TAB>code[<TAB>weight]`，允许空行和 `#` 注释

/// 头部起始行（trim 后为 `---`）
pub fn is_header_start(line: &str) -> bool {
    line.trim() == "---"
}

/// 头部结束行（trim 后为 `...`）
pub fn is_header_end(line: &str) -> bool {
    line.trim() == "..."
}

/// 空行或 `#` 注释行。
pub fn is_blank_or_comment(line: &str) -> bool {
    let t = line.trim();
    t.is_empty() || t.starts_with('#')
}

/// 拆出行尾换行符（`\n` 或 `\r\n`），返回 `(内容, 换行符)`。
pub fn split_line_ending(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, "\n")
    } else {
        (line, "")
    }
}

/// 一条词条：`(行号, 词, 编码列)`，均已 trim。
pub type RimeEntry<'a> = (usize, &'a str, &'a str);

/// 遍历整份 RIME 词典文本中的数据区词条。
///
/// 规则：
/// - 跳过空行、`#` 注释
/// - `---` 进入头部，直到 `...` 才开始产出词条
/// - 少于两列、或词/编码为空的行被跳过
///
/// 用于加载修正表这类“读完即建表”的资源；大文件的流式转换走 `rime_dict::stream`。
pub struct RimeEntries<'a> {
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
    in_header: bool,
}

impl<'a> RimeEntries<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().enumerate(),
            in_header: false,
        }
    }
}

impl<'a> Iterator for RimeEntries<'a> {
    type Item = RimeEntry<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        for (idx, raw) in self.lines.by_ref() {
            if is_blank_or_comment(raw) {
                continue;
            }
            if is_header_start(raw) {
                self.in_header = true;
                continue;
            }
            if is_header_end(raw) {
                self.in_header = false;
                continue;
            }
            if self.in_header {
                continue;
            }
            let mut cols = raw.split('\t');
            let word = cols.next().unwrap_or("").trim();
            let Some(code) = cols.next().map(str::trim) else {
                continue;
            };
            if word.is_empty() || code.is_empty() {
                continue;
            }
            return Some((idx + 1, word, code));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "# comment\n---\nname: demo\nversion: \"1\"\n...\n\n不\tbù\t100\n能\n同\ttóng\n";

    #[test]
    fn entries_skip_header_and_short_lines() {
        let got: Vec<_> = RimeEntries::new(SAMPLE).collect();
        assert_eq!(got, vec![(7, "不", "bù"), (9, "同", "tóng")]);
    }

    #[test]
    fn headerless_text_is_all_data() {
        let got: Vec<_> = RimeEntries::new("你好\tnǐ hǎo\n").collect();
        assert_eq!(got, vec![(1, "你好", "nǐ hǎo")]);
    }

    #[test]
    fn line_endings_are_split_off() {
        assert_eq!(split_line_ending("a\tb\r\n"), ("a\tb", "\r\n"));
        assert_eq!(split_line_ending("a\tb\n"), ("a\tb", "\n"));
        assert_eq!(split_line_ending("a\tb"), ("a\tb", ""));
    }
}
