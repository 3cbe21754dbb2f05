//! CLI entry point for chkgate.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, logging setup and exit
//! codes. All business logic lives in the `chkgate-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use chkgate_app::{
    CheckInput, View, parse_report_json, render_view, run_check, serialize_report,
    status_exit_code,
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    name = "chkgate",
    version,
    about = "Waiver-aware PASS/FAIL evaluation for checklist findings"
)]
struct Cli {
    /// Log pipeline stages (debug level) to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate evidence against a check configuration and write the result.
    Check {
        /// Path to the check configuration TOML.
        #[arg(long)]
        config: Utf8PathBuf,

        /// Path to the evidence JSON produced by the parser.
        #[arg(long)]
        evidence: Utf8PathBuf,

        /// Where to write the JSON result.
        #[arg(long, default_value = "artifacts/chkgate/result.json")]
        report_out: Utf8PathBuf,

        /// Also write the grouped log view to this path.
        #[arg(long)]
        log_out: Option<Utf8PathBuf>,

        /// Also write the per-item report view to this path.
        #[arg(long)]
        rpt_out: Option<Utf8PathBuf>,

        /// Also write a Markdown summary to this path.
        #[arg(long)]
        markdown_out: Option<Utf8PathBuf>,
    },

    /// Render the grouped log view from an existing JSON result.
    Log(RenderArgs),

    /// Render the per-item report view from an existing JSON result.
    Rpt(RenderArgs),

    /// Render Markdown from an existing JSON result.
    Md(RenderArgs),
}

#[derive(clap::Args, Debug)]
struct RenderArgs {
    /// Path to the JSON result file.
    #[arg(long, default_value = "artifacts/chkgate/result.json")]
    report: Utf8PathBuf,

    /// Where to write the output (if not specified, prints to stdout).
    #[arg(long, short)]
    output: Option<Utf8PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.cmd {
        Commands::Check {
            config,
            evidence,
            report_out,
            log_out,
            rpt_out,
            markdown_out,
        } => cmd_check(CheckPaths {
            config,
            evidence,
            report_out,
            log_out,
            rpt_out,
            markdown_out,
        }),
        Commands::Log(args) => cmd_render(args, View::Log),
        Commands::Rpt(args) => cmd_render(args, View::Rpt),
        Commands::Md(args) => cmd_render(args, View::Markdown),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "chkgate=debug,warn"
    } else {
        "chkgate=info,warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // Ignore the error: a subscriber may already be installed.
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}

struct CheckPaths {
    config: Utf8PathBuf,
    evidence: Utf8PathBuf,
    report_out: Utf8PathBuf,
    log_out: Option<Utf8PathBuf>,
    rpt_out: Option<Utf8PathBuf>,
    markdown_out: Option<Utf8PathBuf>,
}

fn cmd_check(paths: CheckPaths) -> anyhow::Result<()> {
    let result = (|| -> anyhow::Result<i32> {
        let config_text = std::fs::read_to_string(&paths.config)
            .with_context(|| format!("read check configuration: {}", paths.config))?;
        let evidence_text = std::fs::read_to_string(&paths.evidence)
            .with_context(|| format!("read evidence: {}", paths.evidence))?;

        let output = run_check(CheckInput {
            config_text: &config_text,
            evidence_text: &evidence_text,
        })?;

        let data = serialize_report(&output.report)?;
        write_file(&paths.report_out, &data).context("write result json")?;

        let views = [
            (&paths.log_out, View::Log),
            (&paths.rpt_out, View::Rpt),
            (&paths.markdown_out, View::Markdown),
        ];
        for (path, view) in views {
            if let Some(path) = path {
                let text = render_view(&output.report, view);
                write_file(path, text.as_bytes()).with_context(|| format!("write {view:?} view"))?;
            }
        }

        Ok(status_exit_code(&output.report.result))
    })();

    match result {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Err(err) => {
            // No result artifact: a configuration problem is not a FAIL.
            eprintln!("chkgate error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn cmd_render(args: RenderArgs, view: View) -> anyhow::Result<()> {
    let report_text = std::fs::read_to_string(&args.report)
        .with_context(|| format!("read report: {}", args.report))?;
    let report = parse_report_json(&report_text)?;
    let text = render_view(&report, view);

    if let Some(out_path) = args.output {
        write_file(&out_path, text.as_bytes()).context("write rendered output")?;
    } else {
        print!("{}", text);
    }

    Ok(())
}

fn write_file(path: &Utf8Path, data: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_str().is_empty()
    {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    std::fs::write(path, data).with_context(|| format!("write file: {}", path))?;
    Ok(())
}
