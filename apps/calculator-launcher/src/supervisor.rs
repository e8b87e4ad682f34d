//! Child process supervision.
//!
//! Each child gets a monitor task that either observes its exit or, once the
//! shared cancellation token fires, stops it: SIGTERM, grace period, kill.

use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::process::{Child, Command};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::log_forwarder::{StreamKind, spawn_stream_forwarder};

/// Timeout for waiting on forwarder tasks after a child is gone
const FORWARDER_DRAIN_TIMEOUT: Duration = Duration::from_millis(100);

/// What to run.
#[derive(Debug, Clone)]
pub struct ChildSpec {
    pub name: String,
    pub binary: PathBuf,
    pub args: Vec<String>,
}

/// How a child ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildExit {
    pub name: String,
    /// Exit code, `None` if the child was killed by a signal or could not be awaited.
    pub code: Option<i32>,
    /// `true` if the launcher asked the child to stop.
    pub stopped: bool,
}

impl ChildExit {
    /// Exited on its own with a failure status.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        !self.stopped && self.code != Some(0)
    }
}

/// Send SIGTERM to a child process. Returns `false` if nothing was sent.
#[cfg(unix)]
fn send_terminate_signal(child: &Child) -> bool {
    use nix::sys::signal::{Signal, kill};
    use nix::unistd::Pid;

    let Some(pid) = child.id() else {
        return false;
    };

    let Ok(pid_i32) = i32::try_from(pid) else {
        tracing::warn!(pid, "PID exceeds i32::MAX, cannot send SIGTERM");
        return false;
    };

    kill(Pid::from_raw(pid_i32), Signal::SIGTERM).is_ok()
}

/// No graceful termination for console processes off Unix; the caller kills.
#[cfg(not(unix))]
fn send_terminate_signal(_child: &Child) -> bool {
    false
}

/// SIGTERM, wait up to `grace`, then force kill.
async fn stop_child_with_grace(child: &mut Child, name: &str, grace: Duration) -> Option<ExitStatus> {
    let pid = child.id();
    let sent = send_terminate_signal(child);
    tracing::debug!(service = %name, pid = ?pid, graceful = sent, "sent termination signal");

    let wait = if sent { grace } else { Duration::ZERO };
    match tokio::time::timeout(wait, child.wait()).await {
        Ok(Ok(status)) => {
            tracing::info!(service = %name, status = %status, "process exited gracefully");
            Some(status)
        }
        Ok(Err(e)) => {
            tracing::warn!(service = %name, error = %e, "failed to wait for process");
            None
        }
        Err(_) => {
            tracing::warn!(service = %name, grace_ms = grace.as_millis(), "grace period expired, force killing");
            if let Err(e) = child.kill().await {
                tracing::warn!(service = %name, error = %e, "failed to force kill");
            }
            None
        }
    }
}

fn report_exit(name: &str, status: &std::io::Result<ExitStatus>) {
    match status {
        Ok(status) if status.success() => {
            tracing::info!(service = %name, "process exited");
        }
        Ok(status) => {
            tracing::error!(service = %name, code = ?status.code(), "process exited with {status}");
        }
        Err(e) => {
            tracing::error!(service = %name, error = %e, "failed to wait for process");
        }
    }
}

async fn wait_forwarder(handle: Option<JoinHandle<()>>) {
    if let Some(h) = handle {
        let _ = tokio::time::timeout(FORWARDER_DRAIN_TIMEOUT, h).await;
    }
}

/// Starts children and tracks them until they exit or are stopped.
pub struct Supervisor {
    cancel: CancellationToken,
    grace: Duration,
    monitors: Vec<JoinHandle<ChildExit>>,
}

impl Supervisor {
    /// Children are stopped when `cancel` fires.
    #[must_use]
    pub fn new(cancel: CancellationToken, grace: Duration) -> Self {
        Self {
            cancel,
            grace,
            monitors: Vec::new(),
        }
    }

    /// Spawn `spec` with piped output and start monitoring it.
    ///
    /// # Errors
    /// Returns an error if the process cannot be started.
    pub fn spawn(&mut self, spec: &ChildSpec) -> Result<Option<u32>> {
        tracing::info!(service = %spec.name, binary = %spec.binary.display(), "Starting {} ...", spec.name);

        let mut child = Command::new(&spec.binary)
            .args(&spec.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("failed to spawn process: {}", spec.binary.display()))?;

        let pid = child.id();
        // Forwarders end on EOF; a separate token lets us cut them short after exit.
        let forward_cancel = CancellationToken::new();
        let stdout = child.stdout.take().map(|s| {
            spawn_stream_forwarder(s, spec.name.clone(), StreamKind::Stdout, forward_cancel.clone())
        });
        let stderr = child.stderr.take().map(|s| {
            spawn_stream_forwarder(s, spec.name.clone(), StreamKind::Stderr, forward_cancel.clone())
        });

        tracing::info!(service = %spec.name, pid = ?pid, "Spawned process with log forwarding");

        let name = spec.name.clone();
        let cancel = self.cancel.clone();
        let grace = self.grace;
        self.monitors.push(tokio::spawn(async move {
            let exited = tokio::select! {
                status = child.wait() => Some(status),
                () = cancel.cancelled() => None,
            };

            let exit = match exited {
                Some(status) => {
                    report_exit(&name, &status);
                    ChildExit {
                        name,
                        code: status.ok().and_then(|s| s.code()),
                        stopped: false,
                    }
                }
                None => {
                    let status = stop_child_with_grace(&mut child, &name, grace).await;
                    ChildExit {
                        name,
                        code: status.and_then(|s| s.code()),
                        stopped: true,
                    }
                }
            };

            wait_forwarder(stdout).await;
            wait_forwarder(stderr).await;
            forward_cancel.cancel();
            exit
        }));

        Ok(pid)
    }

    /// Wait until every child has exited or been stopped.
    pub async fn join(self) -> Vec<ChildExit> {
        futures::future::join_all(self.monitors)
            .await
            .into_iter()
            .filter_map(|r| match r {
                Ok(exit) => Some(exit),
                Err(e) => {
                    tracing::error!(error = %e, "child monitor task failed");
                    None
                }
            })
            .collect()
    }
}
