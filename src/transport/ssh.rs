use crate::errors::{Error, Result};
use std::io::{self, Read, Write};
use std::process::{Child, ChildStderr, ChildStdin, ChildStdout, Command, Stdio};

const SSH_PROGRAM: &str = "ssh";

/// A remote pack service reached through the system `ssh` client.
///
/// Reading yields the service's stdout, writing feeds its stdin.
#[derive(Debug)]
pub struct SshSession {
    child: Child,
    stdin: Option<ChildStdin>,
    stdout: ChildStdout,
    stderr: Option<ChildStderr>,
}

impl SshSession {
    /// Start `git-upload-pack` for `repo_path` on `destination` (`user@host`).
    pub fn upload_pack(destination: &str, repo_path: &str) -> Result<Self> {
        Self::start(destination, &Self::service_command("git-upload-pack", repo_path))
    }

    /// Start `git-receive-pack` for `repo_path` on `destination` (`user@host`).
    pub fn receive_pack(destination: &str, repo_path: &str) -> Result<Self> {
        Self::start(destination, &Self::service_command("git-receive-pack", repo_path))
    }

    /// Remote shell command; embedded `'` close, escape and reopen the quoting.
    fn service_command(service: &str, repo_path: &str) -> String {
        format!("{service} '{}'", repo_path.replace('\'', r"'\''"))
    }

    /// `--` keeps a destination starting with `-` from being read as an option.
    fn ssh_command(destination: &str, remote_command: &str) -> Command {
        let mut command = Command::new(SSH_PROGRAM);
        command.arg("--").arg(destination).arg(remote_command);
        command
    }

    fn start(destination: &str, remote_command: &str) -> Result<Self> {
        Self::spawn(&mut Self::ssh_command(destination, remote_command))
    }

    fn spawn(command: &mut Command) -> Result<Self> {
        tracing::debug!(?command, "starting transport session");

        let mut child = command
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| Error::Transport(format!("failed to start ssh: {e}")))?;

        let missing = |stream: &str| Error::Transport(format!("{stream} pipe unavailable"));
        let stdin = child.stdin.take().ok_or_else(|| missing("stdin"))?;
        let stdout = child.stdout.take().ok_or_else(|| missing("stdout"))?;
        let stderr = child.stderr.take().ok_or_else(|| missing("stderr"))?;

        Ok(SshSession {
            child,
            stdin: Some(stdin),
            stdout,
            stderr: Some(stderr),
        })
    }

    /// Diagnostics stream of the remote service; `None` once taken.
    pub fn stderr(&mut self) -> Option<ChildStderr> {
        self.stderr.take()
    }

    /// Signal end of input to the remote service.
    pub fn close_stdin(&mut self) {
        self.stdin.take();
    }

    /// Close stdin and wait for the session to end.
    pub fn close(mut self) -> Result<()> {
        self.close_stdin();

        let status = self
            .child
            .wait()
            .map_err(|e| Error::Transport(format!("failed to wait for ssh: {e}")))?;

        if !status.success() {
            return Err(Error::Transport(format!("ssh session ended with {status}")));
        }

        tracing::debug!("transport session closed");
        Ok(())
    }
}

impl Read for SshSession {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.stdout.read(buf)
    }
}

impl Write for SshSession {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.stdin.as_mut() {
            Some(stdin) => stdin.write(buf),
            None => Err(io::Error::new(io::ErrorKind::BrokenPipe, "stdin already closed")),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.stdin.as_mut() {
            Some(stdin) => stdin.flush(),
            None => Ok(()),
        }
    }
}
