//! 汉字判定。

/// 是否为 CJK 统一表意文字（含扩展 A-F 与兼容区）。
///
/// 只有命中这些区段的字符才会查辅助码；其余字符（数字、标点、拉丁字母）原样透传。
pub fn is_cjk(ch: char) -> bool {
    matches!(
        u32::from(ch),
        0x3400..=0x4DBF
            | 0x4E00..=0x9FFF
            | 0xF900..=0xFAFF
            | 0x20000..=0x2EBEF
            | 0x2F800..=0x2FA1F
    )
}

/// 字符串中是否至少有一个汉字。
pub fn contains_cjk(s: &str) -> bool {
    s.chars().any(is_cjk)
}
