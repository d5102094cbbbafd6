//! Thin wrappers around the `git` executable
//!
//! Both a blocking and an async runner are provided; they build the same
//! command line and feed stdin the same way so their output is identical.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tokio::io::AsyncWriteExt;
use tokio::process::Command as TokioCommand;
use tracing::{debug, warn};

use crate::error::{IterviewError, IterviewResult};

const GIT: &str = "git";

fn git_error(repo: &Path, message: impl Into<String>) -> IterviewError {
    IterviewError::io_with_path(message, repo)
}

fn command_failed(repo: &Path, args: &[&str], stderr: &[u8]) -> IterviewError {
    git_error(
        repo,
        format!(
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(stderr).trim()
        ),
    )
}

/// Run `git <args>` in `repo`, blocking the calling thread
pub(crate) fn run_blocking(repo: &Path, args: &[&str], stdin: Option<&[u8]>) -> IterviewResult<Vec<u8>> {
    debug!("Executing git command in {}: git {}", repo.display(), args.join(" "));

    let mut child = Command::new(GIT)
        .args(args)
        .current_dir(repo)
        .stdin(if stdin.is_some() { Stdio::piped() } else { Stdio::null() })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| git_error(repo, format!("Failed to spawn git: {}", e)))?;

    // Feed stdin from a separate thread so a full stdout pipe cannot deadlock us.
    let writer = match (stdin, child.stdin.take()) {
        (Some(input), Some(mut pipe)) => {
            let input = input.to_vec();
            Some(std::thread::spawn(move || pipe.write_all(&input)))
        }
        _ => None,
    };

    let output = child
        .wait_with_output()
        .map_err(|e| git_error(repo, format!("Failed to wait for git: {}", e)))?;

    if let Some(handle) = writer {
        match handle.join() {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                return Err(git_error(repo, format!("Failed to write git stdin: {}", e)));
            }
            Err(_) => {
                return Err(git_error(repo, "git stdin writer panicked"));
            }
        }
    }

    if !output.status.success() {
        return Err(command_failed(repo, args, &output.stderr));
    }
    Ok(output.stdout)
}

/// Run `git <args>` in `repo` without blocking the runtime
pub(crate) async fn run(repo: &Path, args: &[&str], stdin: Option<Vec<u8>>) -> IterviewResult<Vec<u8>> {
    debug!("Executing git command in {}: git {}", repo.display(), args.join(" "));

    let mut child = TokioCommand::new(GIT)
        .args(args)
        .current_dir(repo)
        .stdin(if stdin.is_some() { Stdio::piped() } else { Stdio::null() })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| git_error(repo, format!("Failed to spawn git: {}", e)))?;

    let pipe = child.stdin.take();
    let writer = async move {
        if let (Some(input), Some(mut pipe)) = (stdin, pipe) {
            pipe.write_all(&input).await?;
            pipe.shutdown().await?;
        }
        Ok::<(), std::io::Error>(())
    };

    let (written, output) = tokio::join!(writer, child.wait_with_output());
    let output = output
        .map_err(|e| git_error(repo, format!("Failed to wait for git: {}", e)))?;
    written.map_err(|e| git_error(repo, format!("Failed to write git stdin: {}", e)))?;

    if !output.status.success() {
        return Err(command_failed(repo, args, &output.stderr));
    }
    Ok(output.stdout)
}

/// Split NUL-terminated output (`-z`) into strings
///
/// Entries that are not valid UTF-8 cannot be recorded and are skipped with
/// a warning.
pub(crate) fn split_nul(output: &[u8]) -> Vec<String> {
    output
        .split(|b| *b == 0)
        .filter(|chunk| !chunk.is_empty())
        .filter_map(|chunk| match std::str::from_utf8(chunk) {
            Ok(entry) => Some(entry.to_string()),
            Err(_) => {
                warn!(
                    "Skipping non-UTF-8 path {}",
                    String::from_utf8_lossy(chunk)
                );
                None
            }
        })
        .collect()
}

/// Split newline-terminated output into trimmed, non-empty lines
pub(crate) fn split_lines(output: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(output)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Join paths into the newline-separated stdin `--stdin-paths` expects
///
/// Paths holding control characters, or starting with a quote, are written
/// C-quoted; git unquotes lines that start with `"`.
pub(crate) fn paths_to_stdin(paths: &[String]) -> Vec<u8> {
    let mut input = Vec::with_capacity(paths.iter().map(|p| p.len() + 1).sum());
    for path in paths {
        if needs_quoting(path) {
            input.extend_from_slice(c_quote(path).as_bytes());
        } else {
            input.extend_from_slice(path.as_bytes());
        }
        input.push(b'\n');
    }
    input
}

fn needs_quoting(path: &str) -> bool {
    path.starts_with('"') || path.bytes().any(|b| b.is_ascii_control())
}

/// Quote `path` the way git's `unquote_c_style` reads it back
fn c_quote(path: &str) -> String {
    let mut quoted = String::with_capacity(path.len() + 2);
    quoted.push('"');
    for c in path.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\t' => quoted.push_str("\\t"),
            '\r' => quoted.push_str("\\r"),
            c if c.is_ascii_control() => quoted.push_str(&format!("\\{:03o}", c as u32)),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

/// Top-level directory of the working tree containing `dir`, if any
pub(crate) fn show_toplevel(dir: &Path) -> IterviewResult<Option<PathBuf>> {
    let output = run_blocking(dir, &["rev-parse", "--show-toplevel"], None)?;
    Ok(split_lines(&output).into_iter().next().map(PathBuf::from))
}

/// Whether a `git` executable can be spawned
pub fn is_available() -> bool {
    Command::new(GIT)
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_nul() {
        let parsed = split_nul(b"a.txt\0dir/b.txt\0");
        assert_eq!(parsed, vec!["a.txt".to_string(), "dir/b.txt".to_string()]);
        assert!(split_nul(b"").is_empty());
    }

    #[test]
    fn test_split_nul_skips_invalid_utf8() {
        let parsed = split_nul(b"ok.txt\0bad\xff.txt\0caf\xc3\xa9.txt\0");
        assert_eq!(parsed, vec!["ok.txt".to_string(), "caf\u{e9}.txt".to_string()]);
    }

    #[test]
    fn test_split_lines() {
        let parsed = split_lines(b"abc\n\n def \n");
        assert_eq!(parsed, vec!["abc".to_string(), "def".to_string()]);
    }

    #[test]
    fn test_paths_to_stdin() {
        let input = paths_to_stdin(&["a".to_string(), "b/c".to_string()]);
        assert_eq!(input, b"a\nb/c\n".to_vec());
    }

    #[test]
    fn test_paths_to_stdin_quotes_awkward_names() {
        let paths = vec![
            "odd\nname.txt".to_string(),
            "\"quoted\".txt".to_string(),
            "back\\slash.txt".to_string(),
            "bell\u{7}.txt".to_string(),
        ];
        let input = String::from_utf8(paths_to_stdin(&paths)).unwrap();
        let lines: Vec<&str> = input.lines().collect();

        assert_eq!(
            lines,
            vec![
                r#""odd\nname.txt""#,
                r#""\"quoted\".txt""#,
                // no quote needed: git only unquotes lines starting with `"`
                r#"back\slash.txt"#,
                r#""bell\007.txt""#,
            ]
        );
    }
}
