#![forbid(unsafe_code)]

//! clif demo binary.
//!
//! Walks through every clif component the way a maintenance script would:
//! startup line, banner, loading bar, summary box and an error report.

mod cli;

use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use clif::core::terminal;
use clif::prelude::*;
use clif::{human_filesize, plural_form};

use cli::{Command, HELP_TEXT, Opts, VERSION};

const PHASES: [&str; 3] = ["Scanning sources", "Copying files", "Verifying checksums"];

fn main() {
    clif::core::logging::init();

    let opts = match Command::from_env() {
        Ok(Command::Run(opts)) => opts,
        Ok(Command::Help) => {
            println!("{HELP_TEXT}");
            return;
        }
        Ok(Command::Version) => {
            println!("clif-demo {VERSION}");
            return;
        }
        Err(err) => {
            eprintln!("{err}\n\n{HELP_TEXT}");
            std::process::exit(2);
        }
    };

    if let Err(err) = run(&opts) {
        report::exit_with_error(&err);
    }
}

fn run(opts: &Opts) -> Result<()> {
    let env = OutputEnv::detect();
    let formatter = if opts.no_color {
        Formatter::plain()
    } else {
        Formatter::for_env(&env)
    };
    let columns = opts.width.unwrap_or_else(|| terminal::columns_with(&env));
    tracing::info!(columns, steps = opts.steps, "demo starting");

    let mut stdout = io::stdout();
    report::motd(&mut stdout, &formatter, &opts.title)?;

    let mut boxed = BoxRenderer::new(io::stdout()).with_formatter(formatter);
    let description = [
        r#"Copies <cc format="46">staging</cc> into <cc format="bold 226">production</cc>."#
            .to_string(),
        format!(
            "Batch: {} in {}",
            plural_form("%d file/%d files/%d files", opts.steps as i64),
            PHASES.len()
        ),
        "Run with --help to see every option.".to_string(),
    ];
    report::banner(&mut boxed, columns, &opts.title, &description)?;

    if opts.confirm && !clif::confirm_stdio("Start the copy?")? {
        writeln!(stdout, "Nothing to do.")?;
        return Ok(());
    }

    let bytes = copy_files(opts, columns, env.live_redraw())?;

    let rows = [
        format!("Files:  {}", opts.steps),
        format!("Copied: {}", human_filesize(bytes, 1)),
        format!(
            r#"Status: <cc format="46">ok</cc>, {}"#,
            plural_form("%d warning/%d warnings/%d warnings", 0)
        ),
    ];
    let width = clif::measure_required_width(columns, Some("Summary"), &rows);
    boxed.init(width, columns, FormatSpec::fg(46))?;
    boxed.header(Some("Summary"), None)?;
    boxed.lines(&rows, &LineColor::Markup)?;
    boxed.divider(Some("phases"), None)?;
    boxed.lines(&PHASES, &LineColor::from(250))?;
    boxed.footer(Some(VERSION), None)?;
    boxed.flush()?;

    if opts.fail {
        let frames = [
            "run (crates/clif-demo/src/main.rs)",
            "copy_files (crates/clif-demo/src/main.rs)",
            "verify_checksum (crates/clif-demo/src/main.rs)",
        ];
        report::traceback(&mut boxed, columns, "Traceback", &frames)?;
        // A bad color code in a status line is the simulated failure.
        decode(r#"<cc format="46 blink">checksum mismatch</cc>"#, None)?;
    }
    Ok(())
}

/// Run the loading bar through every phase and return the bytes "copied".
fn copy_files(opts: &Opts, columns: usize, live: bool) -> Result<u64> {
    let mut bar = LoadingBar::new(io::stdout(), columns).live(live);
    let total = opts.steps;
    let delay = Duration::from_millis(opts.delay_ms);
    let mut bytes = 0u64;

    for step in 1..=total {
        let phase = PHASES[phase_index(step, total)];
        let finish = (step == total).then_some("Copy complete");
        bytes += 48_000 + step * 1_337;
        bar.tick(step, total, phase, finish)?;
        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }
    if total == 0 {
        bar.tick(0, 0, PHASES[0], Some("Nothing to copy"))?;
    }
    Ok(bytes)
}

fn phase_index(step: u64, total: u64) -> usize {
    let len = PHASES.len() as u64;
    (((step.saturating_sub(1)) * len) / total.max(1)).min(len - 1) as usize
}
