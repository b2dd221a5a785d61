//! 头部改写：输出词典改名（追加 `.pro` 之类的后缀）并刷新版本号。
//!
//! 默认不改写，头部逐字节复制。

use std::borrow::Cow;

use rime_core::rime_text::split_line_ending;

pub const DEFAULT_NAME_SUFFIX: &str = ".pro";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderRewrite {
    /// `name:` 追加的后缀；已带该后缀时不重复追加
    pub name_suffix: Option<String>,
    /// `version:` 的新值
    pub version: Option<String>,
}

impl HeaderRewrite {
    /// 改名为 `*.pro`，版本号写今天的日期。
    pub fn pro() -> Self {
        Self {
            name_suffix: Some(DEFAULT_NAME_SUFFIX.to_string()),
            version: Some(today()),
        }
    }

    pub fn is_noop(&self) -> bool {
        self.name_suffix.is_none() && self.version.is_none()
    }

    /// 改写一行头部（含行尾换行符）；不相关的行原样返回。
    pub fn rewrite<'a>(&self, line: &'a str) -> Cow<'a, str> {
        if self.is_noop() {
            return Cow::Borrowed(line);
        }
        let (content, nl) = split_line_ending(line);
        let Some(kv) = HeaderKv::parse(content) else {
            return Cow::Borrowed(line);
        };

        let (inner, quote) = unquote(kv.value);
        match (kv.key, &self.name_suffix, &self.version) {
            ("name", Some(suffix), _) => {
                let name = if inner.is_empty() || inner.ends_with(suffix.as_str()) {
                    inner.to_string()
                } else {
                    format!("{inner}{suffix}")
                };
                let q = quote.map(String::from).unwrap_or_default();
                Cow::Owned(format!("{}name: {q}{name}{q}{}{nl}", kv.indent, kv.comment))
            }
            ("version", _, Some(version)) => {
                let q = quote.unwrap_or('"');
                Cow::Owned(format!("{}version: {q}{version}{q}{}{nl}", kv.indent, kv.comment))
            }
            _ => Cow::Borrowed(line),
        }
    }
}

/// 今天的日期，形如 `2024.05.01`。
pub fn today() -> String {
    chrono::Local::now().format("%Y.%m.%d").to_string()
}

/// `  name: "foo"  # 注释` 拆成 缩进 / 键 / 值 / 注释。
struct HeaderKv<'a> {
    indent: &'a str,
    key: &'a str,
    value: &'a str,
    comment: &'a str,
}

impl<'a> HeaderKv<'a> {
    fn parse(content: &'a str) -> Option<Self> {
        let body = content.trim_start();
        let indent = &content[..content.len() - body.len()];
        let (key, rest) = body.split_once(':')?;
        if key != "name" && key != "version" {
            return None;
        }
        // 注释从第一个 `#` 起算，连同它前面的空白
        let (value, comment) = match rest.find('#') {
            Some(pos) => {
                let start = rest[..pos].trim_end().len();
                (&rest[..start], &rest[start..])
            }
            None => (rest, ""),
        };
        Some(Self {
            indent,
            key,
            value: value.trim(),
            comment,
        })
    }
}

fn unquote(value: &str) -> (&str, Option<char>) {
    let mut chars = value.chars();
    match (chars.next(), chars.next_back()) {
        (Some(a), Some(b)) if a == b && (a == '"' || a == '\'') => (&value[1..value.len() - 1], Some(a)),
        _ => (value, None),
    }
}
