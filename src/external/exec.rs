//! The process-execution boundary for external checks.
//!
//! Every subprocess vetted spawns goes through [`CommandRunner`]. The real
//! implementation, [`SystemCommandRunner`], resolves executables without a
//! shell, passes arguments as a vector and enforces a timeout. Tests swap
//! in a spy to prove that rejected commands never reach this layer.

use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::{Duration, Instant};

use crate::runner::CancellationToken;

/// How often a running child is polled for exit, timeout and cancellation.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// How long output pipes may stay open once the process has ended.
const DRAIN_GRACE: Duration = Duration::from_millis(500);

/// A fully resolved command ready to spawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Absolute path of the executable.
    pub program: PathBuf,
    pub args: Vec<String>,
    pub cwd: PathBuf,
    /// Kill the process once this much time has passed.
    pub timeout: Option<Duration>,
}

/// How a spawned process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Exited normally with this code.
    Exited(i32),
    /// Terminated by a signal.
    Signaled,
    /// Killed after exceeding its timeout.
    TimedOut,
    /// Killed because the run was cancelled.
    Cancelled,
}

impl Termination {
    fn from_status(status: ExitStatus) -> Self {
        match status.code() {
            Some(code) => Termination::Exited(code),
            None => Termination::Signaled,
        }
    }
}

/// Captured result of running a process.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub termination: Termination,
    pub stdout: String,
    pub stderr: String,
    pub duration: Duration,
}

impl CommandOutput {
    /// Exit code, if the process exited normally.
    pub fn exit_code(&self) -> Option<i32> {
        match self.termination {
            Termination::Exited(code) => Some(code),
            _ => None,
        }
    }
}

/// Resolves and runs external commands.
pub trait CommandRunner: Send + Sync {
    /// Resolve a validated command name to an absolute executable path.
    fn resolve(&self, command: &str) -> Option<PathBuf>;

    /// Spawn the invocation and wait for it to finish, time out or be cancelled.
    fn run(&self, invocation: &Invocation, cancel: &CancellationToken) -> io::Result<CommandOutput>;
}

/// Runs commands as real child processes.
#[derive(Debug, Clone, Default)]
pub struct SystemCommandRunner {
    search_path: Option<Vec<PathBuf>>,
}

impl SystemCommandRunner {
    /// Runner that resolves commands on the process `PATH`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runner that resolves commands on an explicit list of directories.
    pub fn with_search_path(search_path: Vec<PathBuf>) -> Self {
        Self {
            search_path: Some(search_path),
        }
    }
}

impl CommandRunner for SystemCommandRunner {
    fn resolve(&self, command: &str) -> Option<PathBuf> {
        let path = Path::new(command);
        if path.is_absolute() {
            return (path.is_file() && is_executable(path)).then(|| path.to_path_buf());
        }
        match &self.search_path {
            Some(entries) => resolve_tool_path(command, entries),
            None => resolve_tool_path(command, &parse_system_path()),
        }
    }

    fn run(&self, invocation: &Invocation, cancel: &CancellationToken) -> io::Result<CommandOutput> {
        let start = Instant::now();

        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args)
            .current_dir(&invocation.cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        // Own process group, so a kill also reaches anything the tool spawned.
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            cmd.process_group(0);
        }

        let mut child = cmd.spawn()?;

        let stdout_pipe = child.stdout.take().map(drain);
        let stderr_pipe = child.stderr.take().map(drain);

        let termination = loop {
            if cancel.is_cancelled() {
                terminate(&mut child);
                break Termination::Cancelled;
            }
            if let Some(limit) = invocation.timeout {
                if start.elapsed() >= limit {
                    terminate(&mut child);
                    break Termination::TimedOut;
                }
            }
            match child.try_wait() {
                Ok(Some(status)) => {
                    // Background descendants would otherwise hold the pipes open.
                    kill_group(&child);
                    break Termination::from_status(status);
                }
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(e) => {
                    terminate(&mut child);
                    return Err(e);
                }
            }
        };

        let drain_deadline = Instant::now() + DRAIN_GRACE;
        let stdout = collect(stdout_pipe, drain_deadline);
        let stderr = collect(stderr_pipe, drain_deadline);

        tracing::debug!(
            program = %invocation.program.display(),
            ?termination,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "external command finished"
        );

        Ok(CommandOutput {
            termination,
            stdout,
            stderr,
            duration: start.elapsed(),
        })
    }
}

/// Read a pipe to the end on its own thread.
fn drain(mut pipe: impl Read + Send + 'static) -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = pipe.read_to_end(&mut buf);
        let _ = tx.send(String::from_utf8_lossy(&buf).into_owned());
    });
    rx
}

/// Output of a drained pipe, or nothing if it is still open at `deadline`.
fn collect(pipe: Option<Receiver<String>>, deadline: Instant) -> String {
    let Some(rx) = pipe else {
        return String::new();
    };
    let wait = deadline.saturating_duration_since(Instant::now());
    rx.recv_timeout(wait).unwrap_or_else(|_| {
        tracing::debug!("output pipe still open after process ended, discarding");
        String::new()
    })
}

fn terminate(child: &mut Child) {
    kill_group(child);
    let _ = child.kill();
    let _ = child.wait();
}

/// SIGKILL everything left in the child's process group.
fn kill_group(child: &Child) {
    #[cfg(unix)]
    {
        if let Ok(pid) = i32::try_from(child.id()) {
            // SAFETY: signalling a process group we created; no memory is touched.
            unsafe {
                libc::kill(-pid, libc::SIGKILL);
            }
        }
    }
    #[cfg(not(unix))]
    let _ = child;
}

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On Windows, executability is determined by file extension, not permission bits.
#[cfg(not(unix))]
pub fn is_executable(_path: &Path) -> bool {
    true
}

/// Resolve a tool's binary path by iterating over PATH entries.
///
/// Returns the first match that exists and is executable.
pub fn resolve_tool_path(tool: &str, path_entries: &[PathBuf]) -> Option<PathBuf> {
    for dir in path_entries {
        let candidate = dir.join(tool);
        if candidate.is_file() && is_executable(&candidate) {
            return Some(candidate);
        }
        #[cfg(windows)]
        {
            let exe = dir.join(format!("{}.exe", tool));
            if exe.is_file() {
                return Some(exe);
            }
        }
    }
    None
}

/// Parse the system PATH environment variable into a list of directories.
pub fn parse_system_path() -> Vec<PathBuf> {
    std::env::var_os("PATH")
        .map(|path| std::env::split_paths(&path).collect())
        .unwrap_or_default()
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;
        let path = dir.join(name);
        fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn sh(script: &str, cwd: &Path) -> Invocation {
        Invocation {
            program: PathBuf::from("/bin/sh"),
            args: vec!["-c".to_string(), script.to_string()],
            cwd: cwd.to_path_buf(),
            timeout: Some(Duration::from_secs(10)),
        }
    }

    #[test]
    fn resolve_tool_path_finds_executable() {
        let temp = TempDir::new().unwrap();
        let script = write_script(temp.path(), "tool", "exit 0");
        let found = resolve_tool_path("tool", &[temp.path().to_path_buf()]);
        assert_eq!(found, Some(script));
    }

    #[test]
    fn resolve_tool_path_skips_non_executable() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("tool"), "data").unwrap();
        assert!(resolve_tool_path("tool", &[temp.path().to_path_buf()]).is_none());
    }

    #[test]
    fn resolve_accepts_absolute_executables_only() {
        let temp = TempDir::new().unwrap();
        let script = write_script(temp.path(), "tool", "exit 0");
        let runner = SystemCommandRunner::with_search_path(Vec::new());
        assert_eq!(runner.resolve(script.to_str().unwrap()), Some(script.clone()));
        let missing = temp.path().join("missing");
        assert!(runner.resolve(missing.to_str().unwrap()).is_none());
    }

    #[test]
    fn resolve_uses_search_path() {
        let temp = TempDir::new().unwrap();
        let script = write_script(temp.path(), "my-check", "exit 0");
        let runner = SystemCommandRunner::with_search_path(vec![temp.path().to_path_buf()]);
        assert_eq!(runner.resolve("my-check"), Some(script));
        assert!(runner.resolve("other-check").is_none());
    }

    #[test]
    fn run_captures_output_and_exit_code() {
        let temp = TempDir::new().unwrap();
        let output = SystemCommandRunner::new()
            .run(
                &sh("echo out; echo err >&2; exit 3", temp.path()),
                &CancellationToken::new(),
            )
            .unwrap();
        assert_eq!(output.termination, Termination::Exited(3));
        assert_eq!(output.exit_code(), Some(3));
        assert_eq!(output.stdout.trim(), "out");
        assert_eq!(output.stderr.trim(), "err");
    }

    #[test]
    fn run_passes_arguments_without_a_shell() {
        let temp = TempDir::new().unwrap();
        let mut inv = sh("printf '%s' \"$1\"", temp.path());
        inv.args.push("sh".to_string());
        inv.args.push("$(whoami); echo pwned".to_string());
        let output = SystemCommandRunner::new()
            .run(&inv, &CancellationToken::new())
            .unwrap();
        assert_eq!(output.stdout, "$(whoami); echo pwned");
    }

    #[test]
    fn run_uses_working_directory() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("marker.txt"), "").unwrap();
        let output = SystemCommandRunner::new()
            .run(&sh("test -f marker.txt", temp.path()), &CancellationToken::new())
            .unwrap();
        assert_eq!(output.termination, Termination::Exited(0));
    }

    #[test]
    fn run_kills_on_timeout() {
        let temp = TempDir::new().unwrap();
        let mut inv = sh("sleep 30", temp.path());
        inv.timeout = Some(Duration::from_millis(200));
        let output = SystemCommandRunner::new()
            .run(&inv, &CancellationToken::new())
            .unwrap();
        assert_eq!(output.termination, Termination::TimedOut);
        assert!(output.duration < Duration::from_secs(10));
    }

    #[test]
    fn run_kills_on_cancellation() {
        let temp = TempDir::new().unwrap();
        let token = CancellationToken::new();
        let trigger = token.clone();
        let canceller = thread::spawn(move || {
            thread::sleep(Duration::from_millis(150));
            trigger.cancel();
        });
        let output = SystemCommandRunner::new()
            .run(&sh("sleep 30", temp.path()), &token)
            .unwrap();
        canceller.join().unwrap();
        assert_eq!(output.termination, Termination::Cancelled);
        assert!(output.duration < Duration::from_secs(10));
    }

    #[test]
    fn run_does_not_wait_for_background_descendants() {
        let temp = TempDir::new().unwrap();
        let mut inv = sh("sleep 6 & echo hi", temp.path());
        inv.timeout = Some(Duration::from_secs(1));
        let output = SystemCommandRunner::new()
            .run(&inv, &CancellationToken::new())
            .unwrap();
        assert_eq!(output.termination, Termination::Exited(0));
        assert_eq!(output.stdout.trim(), "hi");
        assert!(output.duration < Duration::from_secs(3));
    }

    #[test]
    fn run_reports_spawn_errors() {
        let temp = TempDir::new().unwrap();
        let mut inv = sh("exit 0", temp.path());
        inv.program = temp.path().join("does-not-exist");
        assert!(SystemCommandRunner::new()
            .run(&inv, &CancellationToken::new())
            .is_err());
    }
}
