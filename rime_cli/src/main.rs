use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use rime_core::error::ConvertError;
use rime_dict::{AuxCodeTable, LineTransformer, StreamOptions, convert_all, convert_file};
use rime_pinyin::{CorrectionTable, DefaultConverter, PinyinEngine};
use tracing::info;

mod args;
mod logging;

use args::Args;

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init_tracing(&args.log_level);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("[ERROR] {err:#}");
            ExitCode::from(exit_code(&err))
        }
    }
}

fn run(args: &Args) -> Result<()> {
    // 所有资源加载成功之前不碰输出
    let corrections = load_corrections(args)?;
    let aux = load_aux(args)?;

    let transformer = LineTransformer::new(PinyinEngine::new(&corrections, DefaultConverter), &aux);
    let opts = StreamOptions { header: args.header() };

    match &args.out_dir {
        Some(dir) => {
            let jobs = args.batch_jobs()?;
            let stats = convert_all(&jobs, dir, &transformer, &opts)
                .with_context(|| format!("批量转换到 {} 失败", dir.display()))?;
            info!(files = stats.len(), "全部完成");
        }
        None => {
            let (input, output) = args.single_job()?;
            convert_file(input, output, &transformer, &opts)
                .with_context(|| format!("转换 {} 失败", input.display()))?;
        }
    }
    Ok(())
}

fn load_corrections(args: &Args) -> Result<CorrectionTable> {
    let mut table = CorrectionTable::new();
    if let Some(path) = &args.single_dict {
        table.load_singles(path)?;
    }
    if let Some(path) = &args.phrase_dict {
        table.load_phrases(path)?;
    }
    Ok(table)
}

fn load_aux(args: &Args) -> Result<AuxCodeTable> {
    if args.no_aux {
        return Ok(AuxCodeTable::new());
    }
    let (table, _stats) = AuxCodeTable::from_path(&args.aux_code, args.aux_options())?;
    Ok(table)
}

/// 资源问题返回 2，转换失败返回 1。
fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<ConvertError>() {
        Some(ConvertError::MissingResource { .. }) => 2,
        _ => 1,
    }
}
