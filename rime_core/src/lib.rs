//! `rime_core`：纯逻辑层（std-only 之外只依赖 `thiserror`），不做任何文件 I/O。
//!
//! 这里放的是各 crate 共享的东西：
//! - **数据模型**：词条行、带辅助码的音节
//! - **能力接口**：字 -> 带调拼音（`ToneConverter`）、字 -> 辅助码（`AuxLookup`）
//! - **RIME 文本扫描**：`---` / `...` 头部识别、词条列切分
//! - **错误类型**：整个转换流程统一使用 `ConvertError`
pub mod charset;
pub mod convert;
pub mod error;
pub mod model;
pub mod rime_text;
