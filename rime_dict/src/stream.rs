//! 流式驱动：逐行读、逐行写，内存里至多一行（外加只读查表）。
//!
//! 文件结构识别：
//! - 第一条非空、非注释的行若是 `---` 或不含制表符，则直到 `...`（含）都属于头部，
//!   原样复制（或按 `HeaderRewrite` 改写）
//! - 第一条有效行就是 `词<TAB>…` 时整份文件都是数据区
//!
//! 出错即停（fail-fast）。写文件时先写到目标目录下的临时文件，成功后再原子地改名覆盖目标；
//! 中途出错时临时文件随 drop 删除，目标文件保持原状。

use std::{
    fs::{self, File},
    io::{BufRead, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use rime_core::convert::{AuxLookup, ToneConverter};
use rime_core::error::{ConvertError, Result};
use rime_core::rime_text::{is_blank_or_comment, is_header_end, is_header_start};
use tempfile::NamedTempFile;
use tracing::{info, warn};

use crate::header::HeaderRewrite;
use crate::line::{LineOutcome, LineTransformer};

#[derive(Debug, Clone, Default)]
pub struct StreamOptions {
    pub header: HeaderRewrite,
}

/// 一次转换的统计。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamStats {
    pub lines: usize,
    /// 头部（含头部之前的空行/注释）
    pub header_lines: usize,
    pub transformed: usize,
    pub passed_through: usize,
    /// 整词命中词组修正的行
    pub corrected: usize,
    /// 没有辅助码的音节
    pub uncoded: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    /// 还没见到有效行
    Preamble,
    Header,
    Data,
}

/// 转换一个输入流到输出流。
pub fn convert_stream<R, W, C, A>(
    mut reader: R,
    mut writer: W,
    transformer: &LineTransformer<'_, C, A>,
    opts: &StreamOptions,
) -> Result<StreamStats>
where
    R: BufRead,
    W: Write,
    C: ToneConverter,
    A: AuxLookup,
{
    let mut stats = StreamStats::default();
    let mut section = Section::Preamble;
    let mut buf: Vec<u8> = Vec::new();
    let mut out = String::new();
    let mut offset: u64 = 0;

    loop {
        buf.clear();
        let n = reader.read_until(b'\n', &mut buf)?;
        if n == 0 {
            break;
        }
        stats.lines += 1;
        let line_no = stats.lines;
        let line = std::str::from_utf8(&buf).map_err(|e| ConvertError::Encoding {
            line: line_no,
            offset: offset + e.valid_up_to() as u64,
        })?;
        offset += n as u64;

        // 文件开头可能带 BOM
        let head = if line_no == 1 { line.trim_start_matches('\u{feff}') } else { line };
        if section == Section::Preamble && !is_blank_or_comment(head) {
            // 只有一个 `...` 的空头部
            if is_header_end(head) {
                stats.header_lines += 1;
                writer.write_all(line.as_bytes())?;
                section = Section::Data;
                continue;
            }
            // `---` 或不含制表符的行（`name: …`）都算头部，直到 `...`；第一条词条行开始数据区
            section = if is_header_start(head) || !head.contains('\t') {
                Section::Header
            } else {
                Section::Data
            };
        }

        match section {
            Section::Preamble => {
                stats.header_lines += 1;
                writer.write_all(line.as_bytes())?;
            }
            Section::Header => {
                stats.header_lines += 1;
                writer.write_all(opts.header.rewrite(line).as_bytes())?;
                if is_header_end(line) {
                    section = Section::Data;
                }
            }
            Section::Data => {
                out.clear();
                match transformer.transform_line(line_no, line, &mut out)? {
                    LineOutcome::Passthrough => stats.passed_through += 1,
                    LineOutcome::Transformed { corrected, uncoded } => {
                        stats.transformed += 1;
                        stats.corrected += usize::from(corrected);
                        stats.uncoded += uncoded;
                    }
                }
                writer.write_all(out.as_bytes())?;
            }
        }
    }

    if section == Section::Header {
        warn!(lines = stats.lines, "头部没有以 `...` 结束，整份文件按头部原样复制");
    }
    writer.flush()?;
    Ok(stats)
}

/// 转换一个文件。输出先写临时文件，全部成功后原子改名为 `output`。
pub fn convert_file<C, A>(
    input: &Path,
    output: &Path,
    transformer: &LineTransformer<'_, C, A>,
    opts: &StreamOptions,
) -> Result<StreamStats>
where
    C: ToneConverter,
    A: AuxLookup,
{
    let reader = BufReader::new(File::open(input)?);

    let parent = match output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let tmp = NamedTempFile::new_in(parent)?;
    // 临时文件默认只有属主可读写，改成与输入一致
    fs::set_permissions(tmp.path(), fs::metadata(input)?.permissions())?;
    let stats = {
        let mut writer = BufWriter::new(&tmp);
        let stats = convert_stream(reader, &mut writer, transformer, opts)?;
        writer.flush()?;
        stats
    };
    tmp.as_file().sync_all()?;
    tmp.persist(output).map_err(|e| ConvertError::Io(e.error))?;

    info!(
        input = %input.display(),
        output = %output.display(),
        lines = stats.lines,
        header = stats.header_lines,
        transformed = stats.transformed,
        passed = stats.passed_through,
        corrected = stats.corrected,
        uncoded = stats.uncoded,
        "转换完成"
    );
    Ok(stats)
}

/// 批量转换：`(输入路径, 输出文件名)` 逐个写到 `out_dir` 下，遇错即停。
pub fn convert_all<C, A>(
    inputs: &[(PathBuf, String)],
    out_dir: &Path,
    transformer: &LineTransformer<'_, C, A>,
    opts: &StreamOptions,
) -> Result<Vec<StreamStats>>
where
    C: ToneConverter,
    A: AuxLookup,
{
    fs::create_dir_all(out_dir)?;
    inputs
        .iter()
        .map(|(input, name)| convert_file(input, &out_dir.join(name), transformer, opts))
        .collect()
}
