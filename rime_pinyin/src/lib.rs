//! 拼音层：修正表 + 默认转换器 + 拼音引擎。
//!
//! - `correction`：词组/单字修正（RIME 词典文本格式）
//! - `converter`：基于 `pinyin` crate 的字 -> 带调拼音，及去声调工具
//! - `engine`：按“修正优先、逐字兜底”的顺序给整词注音

pub mod converter;
pub mod correction;
pub mod engine;

pub use converter::{CorrectedConverter, DefaultConverter, normalize_syllable, strip_tone};
pub use correction::{CorrectionStats, CorrectionTable};
pub use engine::{PinyinEngine, Toned};
