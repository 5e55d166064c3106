mod demo;
mod renderer;

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use frame_profiler_core::views::{
    build_report_tree, flat_report, nested_report, render_frame_summary, render_report_table,
};
use frame_profiler_core::{ProfilerConfig, local};
use frame_profiler_protocol::{FrameTiming, SortMode};

const USAGE: &str = "Usage: frame-profiler [--config <profiler.json>] \
                     [--print [--frames <n>] [--flat] [--self] [--json]]";

const DEFAULT_PRINT_FRAMES: u64 = 10;

struct Args {
    config: Option<PathBuf>,
    print: bool,
    frames: u64,
    flat: bool,
    sort: SortMode,
    json: bool,
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        config: None,
        print: false,
        frames: DEFAULT_PRINT_FRAMES,
        flat: false,
        sort: SortMode::TotalTime,
        json: false,
    };

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                let path = iter.next().context("--config needs a path")?;
                args.config = Some(PathBuf::from(path));
            }
            "--print" => args.print = true,
            "--frames" => {
                let n = iter.next().context("--frames needs a count")?;
                args.frames = n.parse().with_context(|| format!("bad frame count `{n}`"))?;
            }
            "--flat" => args.flat = true,
            "--self" => args.sort = SortMode::SelfTime,
            "--json" => args.json = true,
            "-h" | "--help" => {
                writeln!(std::io::stdout().lock(), "{USAGE}")?;
                std::process::exit(0);
            }
            other => bail!("unknown argument `{other}`\n{USAGE}"),
        }
    }
    Ok(args)
}

fn main() -> Result<()> {
    let args = parse_args()?;

    if let Some(path) = &args.config {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        local::configure(ProfilerConfig::from_json(&data)?);
    }

    if args.print {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .init();
        return print_report(&args);
    }

    renderer::render_tui()
}

/// Run a fixed number of frames, then dump the newest one.
fn print_report(args: &Args) -> Result<()> {
    for _ in 0..args.frames.max(1) {
        local::begin_frame()?;
        demo::simulate_frame(local::frame_number());
        local::end_frame();
    }
    local::begin_frame()?;
    log::info!("captured {} frames", args.frames.max(1));

    let output = local::with(|profiler| -> Result<String> {
        let Some(tree) = profiler.previous_tree(0) else {
            bail!("no frame was archived");
        };
        let report = build_report_tree(tree);
        let lines = if args.flat {
            flat_report(&report, args.sort)
        } else {
            nested_report(&report)
        };

        if args.json {
            return Ok(serde_json::to_string_pretty(&lines)?);
        }
        let timing = FrameTiming {
            frame_number: tree.frame_number(),
            seconds: tree.elapsed_seconds(),
        };
        Ok(format!(
            "{}\n\n{}",
            render_frame_summary(&timing),
            render_report_table(&lines)
        ))
    })?;

    writeln!(std::io::stdout().lock(), "{output}")?;
    Ok(())
}
