//! Command-line front end for `quicknote_core`.
//!
//! # Responsibility
//! - Verify core crate linkage (`ping`, version) with no arguments.
//! - Render the notes of a file-backed store as plain text:
//!   `quicknote <storage-dir> [term] [all|today|week|month]`.

use chrono::Local;
use quicknote_core::{render_views, DateBucket, FileStorage, NoteQuery, NoteStore, SystemClock};
use std::fmt::Write as _;
use std::process::ExitCode;

const EXIT_USAGE: u8 = 2;

/// Captured result of one CLI invocation.
#[derive(Debug, Default, PartialEq, Eq)]
struct Outcome {
    stdout: String,
    stderr: String,
    code: u8,
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let outcome = run(&args);
    print!("{}", outcome.stdout);
    eprint!("{}", outcome.stderr);
    ExitCode::from(outcome.code)
}

fn run(args: &[String]) -> Outcome {
    let mut outcome = Outcome::default();
    let Some(dir) = args.first() else {
        let _ = writeln!(outcome.stdout, "quicknote_core ping={}", quicknote_core::ping());
        let _ = writeln!(
            outcome.stdout,
            "quicknote_core version={}",
            quicknote_core::core_version()
        );
        return outcome;
    };

    let bucket = match args.get(2).map(|value| value.parse::<DateBucket>()) {
        Some(Ok(bucket)) => bucket,
        Some(Err(err)) => {
            let _ = writeln!(outcome.stderr, "{err}");
            outcome.code = EXIT_USAGE;
            return outcome;
        }
        None => DateBucket::All,
    };
    let query = NoteQuery::new(args.get(1).cloned().unwrap_or_default(), bucket);

    let store = NoteStore::open(FileStorage::new(dir), SystemClock);
    let views = render_views(&store.query(&query), &Local);
    if views.is_empty() {
        outcome.stdout.push_str("no notes found\n");
        return outcome;
    }

    for view in views {
        let _ = writeln!(outcome.stdout, "# {}", view.title);
        let _ = writeln!(outcome.stdout, "{}", view.content);
        if view.edited {
            let _ = writeln!(
                outcome.stdout,
                "created {} | modified {}",
                view.created_label, view.modified_label
            );
        } else {
            let _ = writeln!(outcome.stdout, "created {}", view.created_label);
        }
        outcome.stdout.push('\n');
    }
    outcome
}
