//! 辅助码表：字（可选带读音）-> 形码辅助码。
//!
//! 数据文件虽然常以 `.yaml` 结尾，实际是制表符分隔的纯文本：
//!
//! ```text
//! 呵	;kk;kk;kk;oj;rr;dz;ks;kk;
//! 长	zhǎng	;vf;vf;vf;…;
//! ```
//!
//! - 两列：`字<TAB>;方案1;方案2;…;`，按字登记
//! - 三列：`字<TAB>带调拼音<TAB>;…;`，只在该读音下生效（多音字消歧）
//!
//! 编码列按 `;` 切开后第 0 段是行首分号前的空串，所以方案 N 位于下标 N。
//! 同一个键出现多次时先到先得；冲突的重复项会被计数并告警，严格模式下直接报错。

use std::{collections::HashMap, fmt, fs, path::Path, str::FromStr};

use rime_core::convert::AuxLookup;
use rime_core::error::{ConvertError, Result};
use rime_core::rime_text::is_blank_or_comment;
use tracing::{debug, info, warn};

const RESOURCE: &str = "辅助码表";

/// 辅助码方案（对应编码列中的位置）。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AuxScheme {
    /// 自然码
    Zrm,
    /// 小鹤
    Flypy,
    /// 墨奇
    #[default]
    Moqi,
    /// 汉心
    Hanxin,
    /// 首右
    Shouyou,
    /// 虎码
    Tiger,
    /// 五笔
    Wubi,
}

impl AuxScheme {
    pub const ALL: [AuxScheme; 7] = [
        AuxScheme::Zrm,
        AuxScheme::Flypy,
        AuxScheme::Moqi,
        AuxScheme::Hanxin,
        AuxScheme::Shouyou,
        AuxScheme::Tiger,
        AuxScheme::Wubi,
    ];

    /// 在 `split(';')` 结果中的下标
    pub fn column(self) -> usize {
        match self {
            AuxScheme::Zrm => 1,
            AuxScheme::Flypy => 2,
            AuxScheme::Moqi => 3,
            AuxScheme::Hanxin => 4,
            AuxScheme::Shouyou => 5,
            AuxScheme::Tiger => 6,
            AuxScheme::Wubi => 7,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AuxScheme::Zrm => "zrm",
            AuxScheme::Flypy => "flypy",
            AuxScheme::Moqi => "moqi",
            AuxScheme::Hanxin => "hanxin",
            AuxScheme::Shouyou => "shouyou",
            AuxScheme::Tiger => "tiger",
            AuxScheme::Wubi => "wubi",
        }
    }
}

impl fmt::Display for AuxScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AuxScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        AuxScheme::ALL
            .into_iter()
            .find(|scheme| scheme.name() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = AuxScheme::ALL.iter().map(|x| x.name()).collect();
                format!("未知的辅助码方案 `{s}`，可选：{}", names.join(", "))
            })
    }
}

/// 加载选项。
#[derive(Debug, Clone, Copy, Default)]
pub struct AuxLoadOptions {
    pub scheme: AuxScheme,
    /// 冲突的重复键视为数据错误
    pub strict: bool,
}

/// 加载统计。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuxStats {
    /// 按字登记的条目
    pub entries: usize,
    /// 按读音登记的条目
    pub readings: usize,
    pub skipped_empty: usize,
    pub malformed: usize,
    /// 与已有条目完全相同的重复
    pub duplicates: usize,
    /// 与已有条目不同的重复（被丢弃）
    pub conflicts: usize,
}

/// 插入结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inserted {
    New,
    Duplicate,
    /// 已有不同的码，新码被丢弃；携带已有的码
    Conflict(String),
}

#[derive(Debug, Clone, Default)]
pub struct AuxCodeTable {
    by_char: HashMap<char, String>,
    // 每个字的读音很少，线性查找即可，也省掉查询时的分配
    by_reading: HashMap<char, Vec<(String, String)>>,
}

impl AuxCodeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_path(path: impl AsRef<Path>, opts: AuxLoadOptions) -> Result<(Self, AuxStats)> {
        let path = path.as_ref();
        let origin = path.display().to_string();
        let text = fs::read_to_string(path).map_err(|e| ConvertError::resource(RESOURCE, origin.clone(), e))?;
        let (table, stats) = Self::parse(&text, opts, &origin)?;
        info!(
            path = %origin,
            scheme = %opts.scheme,
            entries = stats.entries,
            readings = stats.readings,
            skipped_empty = stats.skipped_empty,
            malformed = stats.malformed,
            duplicates = stats.duplicates,
            conflicts = stats.conflicts,
            "辅助码表加载完成"
        );
        Ok((table, stats))
    }

    pub fn from_text(text: &str, opts: AuxLoadOptions) -> Result<(Self, AuxStats)> {
        Self::parse(text, opts, "<text>")
    }

    fn parse(text: &str, opts: AuxLoadOptions, origin: &str) -> Result<(Self, AuxStats)> {
        let column = opts.scheme.column();
        let mut table = Self::new();
        let mut stats = AuxStats::default();

        for (idx, raw) in text.lines().enumerate() {
            let line_no = idx + 1;
            if is_blank_or_comment(raw) {
                continue;
            }
            let cols: Vec<&str> = raw.trim().split('\t').collect();
            let (word, reading, codes) = match cols.as_slice() {
                [word, codes] => (*word, None, *codes),
                [word, reading, codes] => (*word, Some(reading.trim()).filter(|r| !r.is_empty()), *codes),
                _ => {
                    debug!(line = line_no, "辅助码行列数不对：{:?}", truncate(raw));
                    stats.malformed += 1;
                    continue;
                }
            };

            let mut chars = word.trim().chars();
            let (Some(ch), None) = (chars.next(), chars.next()) else {
                stats.malformed += 1;
                continue;
            };

            let Some(code) = codes.split(';').nth(column) else {
                debug!(line = line_no, "辅助码列不足：{:?}", truncate(raw));
                stats.malformed += 1;
                continue;
            };
            // 多个候选码以逗号分隔时取第一个
            let code = code.split(',').next().unwrap_or("").trim();
            if code.is_empty() {
                stats.skipped_empty += 1;
                continue;
            }

            match table.insert(ch, reading, code) {
                Inserted::New if reading.is_some() => stats.readings += 1,
                Inserted::New => stats.entries += 1,
                Inserted::Duplicate => stats.duplicates += 1,
                Inserted::Conflict(kept) => {
                    stats.conflicts += 1;
                    warn!(line = line_no, %ch, kept = %kept, dropped = code, "辅助码重复且不一致，保留先出现的");
                    if opts.strict {
                        return Err(ConvertError::resource(
                            RESOURCE,
                            origin,
                            format!("第 {line_no} 行：“{ch}”的辅助码 `{code}` 与已有的 `{kept}` 冲突"),
                        ));
                    }
                }
            }
        }

        Ok((table, stats))
    }

    /// 登记一条辅助码（先到先得）。
    pub fn insert(&mut self, ch: char, reading: Option<&str>, code: &str) -> Inserted {
        let existing = match reading {
            None => self.by_char.get(&ch),
            Some(r) => self
                .by_reading
                .get(&ch)
                .and_then(|v| v.iter().find(|(k, _)| k == r))
                .map(|(_, c)| c),
        };
        match existing {
            Some(c) if c == code => return Inserted::Duplicate,
            Some(c) => return Inserted::Conflict(c.clone()),
            None => {}
        }
        match reading {
            None => {
                self.by_char.insert(ch, code.to_string());
            }
            Some(r) => self
                .by_reading
                .entry(ch)
                .or_default()
                .push((r.to_string(), code.to_string())),
        }
        Inserted::New
    }

    /// 读音专属的码优先，其次是按字登记的码。
    pub fn get(&self, ch: char, syllable: Option<&str>) -> Option<&str> {
        if let Some(s) = syllable {
            let hit = self
                .by_reading
                .get(&ch)
                .and_then(|v| v.iter().find(|(r, _)| r == s));
            if let Some((_, code)) = hit {
                return Some(code);
            }
        }
        self.by_char.get(&ch).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_char.len() + self.by_reading.values().map(Vec::len).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AuxLookup for AuxCodeTable {
    fn lookup(&self, ch: char, syllable: Option<&str>) -> Option<&str> {
        self.get(ch, syllable)
    }
}

fn truncate(s: &str) -> String {
    s.chars().take(40).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# 辅助码
呵\t;kk;kk;kk;oj;rr;dz;ks;kk;
不\t;bu;bu;kx,ky;ox;;;;;
空\t;kk;kk;;oj;;;;;
坏行
两个\t;a;b;c;
短\t;a;b
长\tzhǎng\t;vf;vf;vh;;;;;;
长\t;cf;cf;cc;;;;;;
呵\t;zz;zz;kk;;;;;;
不\t;bu;bu;zz;;;;;;
";

    #[test]
    fn parses_selected_scheme_column() {
        let (t, stats) = AuxCodeTable::from_text(SAMPLE, AuxLoadOptions::default()).unwrap();
        assert_eq!(t.get('呵', None), Some("kk"));
        assert_eq!(t.get('不', None), Some("kx"));
        assert_eq!(t.get('空', None), None);
        assert_eq!(
            stats,
            AuxStats {
                entries: 3,
                readings: 1,
                skipped_empty: 1,
                malformed: 3,
                duplicates: 1,
                conflicts: 1,
            }
        );

        let opts = AuxLoadOptions {
            scheme: AuxScheme::Zrm,
            strict: false,
        };
        let (t, _) = AuxCodeTable::from_text(SAMPLE, opts).unwrap();
        assert_eq!(t.get('不', None), Some("bu"));
    }

    #[test]
    fn reading_specific_codes_win() {
        let (t, _) = AuxCodeTable::from_text(SAMPLE, AuxLoadOptions::default()).unwrap();
        assert_eq!(t.get('长', Some("zhǎng")), Some("vh"));
        assert_eq!(t.get('长', Some("cháng")), Some("cc"));
        assert_eq!(t.get('长', None), Some("cc"));
    }

    #[test]
    fn strict_mode_rejects_conflicts() {
        let opts = AuxLoadOptions {
            scheme: AuxScheme::Moqi,
            strict: true,
        };
        let err = AuxCodeTable::from_text(SAMPLE, opts).unwrap_err();
        assert!(matches!(err, ConvertError::MissingResource { .. }));
        assert!(err.to_string().contains("不"));
    }

    #[test]
    fn scheme_names_round_trip() {
        for scheme in AuxScheme::ALL {
            assert_eq!(scheme.name().parse::<AuxScheme>().unwrap(), scheme);
        }
        assert!("cangjie".parse::<AuxScheme>().is_err());
    }

    #[test]
    fn missing_file_is_a_resource_error() {
        let err = AuxCodeTable::from_path("/no/such/aux.yaml", AuxLoadOptions::default()).unwrap_err();
        assert!(matches!(err, ConvertError::MissingResource { .. }));
    }
}
