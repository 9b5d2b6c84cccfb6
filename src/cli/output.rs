//! Terminal output helpers shared by all commands.
//!
//! Status lines go to stdout, diagnostics (errors, warnings, hints) to
//! stderr. Styling is dropped when `NO_COLOR` is set.
//!
//! - green: success
//! - red: errors
//! - yellow: warnings
//! - cyan: names, paths, hints
//! - dim: secondary info

use console::{style, StyledObject};
use std::fmt::Display;
use std::io::{self, Write};

fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

/// Render `text`, styled by `f` unless colors are disabled.
fn paint<D: Display>(text: D, f: impl FnOnce(StyledObject<D>) -> StyledObject<D>) -> String {
    if colors_enabled() {
        f(style(text)).to_string()
    } else {
        text.to_string()
    }
}

/// `✓ vault for "prod" environment created`
pub fn success(msg: &str) {
    println!("{} {}", paint("✓", |s| s.green()), msg);
}

/// `✗ public key for "prod" environment not found` (stderr)
pub fn error(msg: &str) {
    eprintln!("{} {}", paint("✗", |s| s.red()), msg);
}

/// `⚠ no environment provided, using default "development"` (stderr)
pub fn warn(msg: &str) {
    eprintln!("{} {}", paint("⚠", |s| s.yellow()), msg);
}

/// `→ run: untold create-vault --env prod` (stderr)
pub fn hint(msg: &str) {
    eprintln!("{} {}", paint("→", |s| s.cyan()), paint(msg, |s| s.cyan()));
}

/// Indented label/value line, label dimmed and value bold.
pub fn kv(label: &str, value: impl Display) {
    println!("  {}  {}", paint(label, |s| s.dim()), paint(value, |s| s.bold()));
}

/// Quoted environment or secret name for inline use.
pub fn name(n: &str) -> String {
    paint(format!("{:?}", n), |s| s.cyan())
}

/// Path for inline use.
pub fn path(p: &str) -> String {
    paint(p, |s| s.cyan())
}

/// Start a `Label... ` line; finish it with [`progress_done`].
pub fn progress(label: &str) {
    print!("{}... ", paint(label, |s| s.dim()));
    let _ = io::stdout().flush();
}

/// Finish a progress line with `ok` or `failed`.
pub fn progress_done(ok: bool) {
    if ok {
        println!("{}", paint("ok", |s| s.green()));
    } else {
        println!("{}", paint("failed", |s| s.red()));
    }
}

/// Secondary line, dimmed.
pub fn dimmed(msg: &str) {
    println!("{}", paint(msg, |s| s.dim()));
}

/// Write raw secret bytes to stdout followed by a newline.
///
/// Bytes are written as-is, so non-UTF-8 values survive a pipe.
pub fn raw(bytes: &[u8]) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(bytes)?;
    stdout.write_all(b"\n")?;
    stdout.flush()
}
