//! Database commands: location, print, format, backup and restore

use std::io::Write;
use std::path::Path;

use colored::Colorize;
use similar::TextDiff;

use hosts_dom::FormatMode;

use crate::context::Context;
use crate::error::Result;

/// Run `database location`
pub fn run_location(ctx: &Context) -> Result<()> {
    println!("{}", ctx.file().resolved_path().display());
    Ok(())
}

/// Run `database print`
pub fn run_print(ctx: &mut Context) -> Result<()> {
    let document = ctx.load()?;
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&document.to_bytes(FormatMode::Keep))?;
    stdout.flush()?;
    Ok(())
}

/// Unified diff between the file as written and `formatted`.
pub fn unified_diff(original: &str, formatted: &str, path: &str) -> String {
    TextDiff::from_lines(original, formatted)
        .unified_diff()
        .context_radius(3)
        .header(path, path)
        .to_string()
}

fn print_colored_diff(diff: &str) {
    for line in diff.lines() {
        if line.starts_with("---") || line.starts_with("+++") {
            println!("{}", line.bold());
        } else if line.starts_with("@@") {
            println!("{}", line.cyan());
        } else if line.starts_with('-') {
            println!("{}", line.red());
        } else if line.starts_with('+') {
            println!("{}", line.green());
        } else {
            println!("{line}");
        }
    }
}

/// Run `database format`
pub fn run_format(ctx: &mut Context, dry_run: bool, diff: bool) -> Result<()> {
    let document = ctx.load()?;
    let original = document.render(FormatMode::Keep);
    let formatted = document.render(FormatMode::ReFormat);

    if diff {
        if original == formatted {
            println!("{} Already formatted.", "OK".green().bold());
        } else {
            print_colored_diff(&unified_diff(&original, &formatted, ctx.file().path().as_str()));
        }
        return Ok(());
    }
    if dry_run {
        print!("{formatted}");
        return Ok(());
    }

    ctx.save_as(&document, FormatMode::ReFormat)?;
    println!(
        "{} Formatted {}.",
        "OK".green().bold(),
        ctx.file().path().as_str().cyan()
    );
    Ok(())
}

/// Run `database backup`
pub fn run_backup(ctx: &Context, output: Option<&Path>, force: bool) -> Result<()> {
    let target = ctx.file().backup(output, force)?;
    println!(
        "{} Backed up to {}.",
        "OK".green().bold(),
        target.as_str().cyan()
    );
    Ok(())
}

/// Run `database restore`
pub fn run_restore(ctx: &mut Context, source: Option<&Path>) -> Result<()> {
    let source = ctx.file_mut().restore(source)?;
    println!(
        "{} Restored from {}.",
        "OK".green().bold(),
        source.as_str().cyan()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diff_shows_realigned_lines() {
        let diff = unified_diff("1.1.1.1 a\n10.0.0.1 b\n", "1.1.1.1         a\n10.0.0.1        b\n", "hosts");
        assert!(diff.starts_with("--- hosts\n+++ hosts\n"));
        assert!(diff.contains("-1.1.1.1 a\n"));
        assert!(diff.contains("+1.1.1.1         a\n"));
    }

    #[test]
    fn identical_text_has_empty_diff() {
        assert_eq!(unified_diff("a\n", "a\n", "hosts"), "");
    }
}
