//! 词典层：辅助码表 + 行转换 + 头部改写 + 流式驱动。
//!
//! 典型用法：
//!
//! ```no_run
//! use rime_dict::{AuxCodeTable, AuxLoadOptions, LineTransformer, StreamOptions, convert_file};
//! use rime_pinyin::{CorrectionTable, DefaultConverter, PinyinEngine};
//! use std::path::Path;
//!
//! # fn main() -> rime_core::error::Result<()> {
//! let corrections = CorrectionTable::new();
//! let (aux, _) = AuxCodeTable::from_path("auxiliary_code.yaml", AuxLoadOptions::default())?;
//! let transformer = LineTransformer::new(PinyinEngine::new(&corrections, DefaultConverter), &aux);
//! convert_file(
//!     Path::new("base.dict.yaml"),
//!     Path::new("out/base.pro.dict.yaml"),
//!     &transformer,
//!     &StreamOptions::default(),
//! )?;
//! # Ok(())
//! # }
//! ```

pub mod aux_code;
pub mod header;
pub mod line;
pub mod stream;

pub use aux_code::{AuxCodeTable, AuxLoadOptions, AuxScheme, AuxStats};
pub use header::HeaderRewrite;
pub use line::{LineOutcome, LineTransformer};
pub use stream::{StreamOptions, StreamStats, convert_all, convert_file, convert_stream};
