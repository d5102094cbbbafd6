//! CLI console utilities

use colored::*;
use console::Term;
use iterview_core::{ChangeStatus, DiffStat};
use std::io;

/// CLI console for formatted output
pub struct CliConsole {
    verbose: bool,
}

impl CliConsole {
    /// Create a new CLI console
    pub const fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if self.verbose {
            println!("{} {}", "ℹ".blue().bold(), message);
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        println!("{} {}", "✓".green().bold(), message.green());
    }

    /// Print a warning message
    pub fn warn(&self, message: &str) {
        println!("{} {}", "⚠".yellow().bold(), message.yellow());
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red().bold(), message.red());
    }

    /// Print a header
    pub fn print_header(&self, title: &str) {
        println!();
        println!("{}", title.bold().underline());
        println!("{}", "=".repeat(title.chars().count()).dimmed());
    }

    /// Print one change line, `git status --short` style
    pub fn print_change(&self, status: ChangeStatus, location: &str) {
        let code = format!("{:#}", status);
        let code = match status {
            ChangeStatus::Modified => code.yellow().bold(),
            ChangeStatus::Added => code.green().bold(),
            ChangeStatus::Deleted => code.red().bold(),
        };
        println!("  {} {}", code, location);
    }

    /// Print insertion and deletion counts for one file
    pub fn print_stat(&self, location: &str, stat: &DiffStat) {
        println!(
            "  {} {} {}",
            location,
            format!("+{}", stat.insertions).green(),
            format!("-{}", stat.deletions).red()
        );
    }

    /// Print a unified diff with colored lines
    pub fn print_diff(&self, unified: &str) {
        for line in unified.lines() {
            if line.starts_with("+++") || line.starts_with("---") {
                println!("{}", line.bold());
            } else if line.starts_with('+') {
                println!("{}", line.green());
            } else if line.starts_with('-') {
                println!("{}", line.red());
            } else if line.starts_with("@@") {
                println!("{}", line.cyan());
            } else {
                println!("{}", line);
            }
        }
    }

    /// Ask for user confirmation
    pub fn confirm(&self, message: &str) -> io::Result<bool> {
        let term = Term::stdout();
        term.write_str(&format!("{} {} [y/N]: ", "?".yellow().bold(), message))?;
        let input = term.read_line()?;
        Ok(matches!(input.trim().to_lowercase().as_str(), "y" | "yes"))
    }
}
