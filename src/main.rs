//! `pmdash` (pmd) - project dashboard in the terminal
//!
//! Every invocation loads a private copy of the workspace (built-in seed or
//! a JSON seed file), answers one query, and exits. Nothing is persisted.

use pmdash::run;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
