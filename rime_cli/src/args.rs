use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use clap::Parser;
use rime_dict::header::{DEFAULT_NAME_SUFFIX, today};
use rime_dict::{AuxLoadOptions, AuxScheme, HeaderRewrite};

/// 给 RIME 词典加上带调拼音与辅助码（`音节;辅助码`）。
#[derive(Debug, Parser)]
#[command(name = "rime-pro", version)]
pub struct Args {
    /// `<输入> <输出>`；指定 `--out-dir` 时全部作为输入
    #[arg(required = true, value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// 批量模式：输出写到该目录，文件名为 `<名>.pro.dict.yaml`
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// 辅助码数据文件
    #[arg(long, env = "RIME_PRO_AUX_CODE", default_value = "auxiliary_code.yaml")]
    pub aux_code: PathBuf,

    /// 辅助码方案：zrm, flypy, moqi, hanxin, shouyou, tiger, wubi
    #[arg(long, default_value_t = AuxScheme::Moqi)]
    pub aux_scheme: AuxScheme,

    /// 不加辅助码，只输出带调拼音
    #[arg(long)]
    pub no_aux: bool,

    /// 辅助码数据里有冲突的重复条目时报错
    #[arg(long)]
    pub strict_aux: bool,

    /// 单字读音修正（RIME 词典格式）
    #[arg(long)]
    pub single_dict: Option<PathBuf>,

    /// 词组读音修正（RIME 词典格式）
    #[arg(long)]
    pub phrase_dict: Option<PathBuf>,

    /// 改写头部：`name` 追加后缀，`version` 写成日期
    #[arg(long)]
    pub rewrite_header: bool,

    /// `--rewrite-header` 时追加到 `name` 的后缀
    #[arg(long, default_value = DEFAULT_NAME_SUFFIX)]
    pub name_suffix: String,

    /// 版本日期，默认今天（`YYYY.MM.DD`）
    #[arg(long, requires = "rewrite_header")]
    pub version_date: Option<String>,

    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

impl Args {
    pub fn aux_options(&self) -> AuxLoadOptions {
        AuxLoadOptions {
            scheme: self.aux_scheme,
            strict: self.strict_aux,
        }
    }

    pub fn header(&self) -> HeaderRewrite {
        if !self.rewrite_header {
            return HeaderRewrite::default();
        }
        HeaderRewrite {
            name_suffix: Some(self.name_suffix.clone()),
            version: Some(self.version_date.clone().unwrap_or_else(today)),
        }
    }

    /// 单文件模式的 `(输入, 输出)`。
    pub fn single_job(&self) -> Result<(&Path, &Path)> {
        match self.paths.as_slice() {
            [input, output] => Ok((input.as_path(), output.as_path())),
            _ => bail!("需要恰好两个路径：<输入> <输出>（批量转换请用 --out-dir）"),
        }
    }

    /// 批量模式的 `(输入, 输出文件名)`。
    pub fn batch_jobs(&self) -> Result<Vec<(PathBuf, String)>> {
        self.paths
            .iter()
            .map(|input| Ok((input.clone(), pro_file_name(input)?)))
            .collect()
    }
}

/// `base.dict.yaml` -> `base.pro.dict.yaml`；其他文件名直接追加 `.pro`。
pub fn pro_file_name(input: &Path) -> Result<String> {
    let Some(name) = input.file_name().and_then(|n| n.to_str()) else {
        bail!("无法从 {} 得到文件名", input.display());
    };
    Ok(match name.strip_suffix(".dict.yaml") {
        Some(stem) => format!("{stem}.pro.dict.yaml"),
        None => format!("{name}.pro"),
    })
}
