//! Shell command capture.
//!
//! Runs a command through `sh -c`, drains stdout and stderr on reader
//! threads (a full pipe would otherwise deadlock the child), and formats
//! both streams plus the exit status into one text block. Capture never
//! fails the request: an execution error becomes the captured text.

use std::io::Read;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};

pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(30);

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Capture a command's output for embedding in the user message.
///
/// Always returns text: when the command cannot be run or times out, the
/// error description is the capture.
pub fn capture_command(command: &str, timeout: Duration) -> String {
    match run_command(command, timeout) {
        Ok(output) => output,
        Err(e) => format!("Command execution failed: {e}"),
    }
}

fn run_command(command: &str, timeout: Duration) -> Result<String> {
    let mut child = Command::new("sh")
        .arg("-c")
        .arg(command)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("failed to spawn: {command}"))?;

    let stdout = child.stdout.take().context("child stdout missing")?;
    let stderr = child.stderr.take().context("child stderr missing")?;
    let stdout_reader = thread::spawn(move || drain(stdout));
    let stderr_reader = thread::spawn(move || drain(stderr));

    let deadline = Instant::now() + timeout;
    let status = loop {
        match child.try_wait().context("failed to poll child process")? {
            Some(status) => break status,
            None if Instant::now() >= deadline => {
                let _ = child.kill();
                let _ = child.wait();
                bail!("timed out after {}s", timeout.as_secs());
            }
            None => thread::sleep(POLL_INTERVAL),
        }
    };

    let stdout_text = stdout_reader.join().unwrap_or_default();
    let stderr_text = stderr_reader.join().unwrap_or_default();

    let mut sections = Vec::new();
    if !stdout_text.is_empty() {
        sections.push(format!("STDOUT:\n{stdout_text}"));
    }
    if !stderr_text.is_empty() {
        sections.push(format!("STDERR:\n{stderr_text}"));
    }
    let mut output = if sections.is_empty() {
        "(command produced no output)".to_string()
    } else {
        sections.join("\n\n")
    };

    if !status.success() {
        let code = status.code().map(|c| c.to_string()).unwrap_or_else(|| "signal".to_string());
        output = format!("Exit code: {code}\n\n{output}");
    }

    Ok(output)
}

fn drain(mut reader: impl Read) -> String {
    let mut bytes = Vec::new();
    let _ = reader.read_to_end(&mut bytes);
    String::from_utf8_lossy(&bytes).into_owned()
}
