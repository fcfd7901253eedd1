use std::ffi::OsString;
use std::io;
use std::path::PathBuf;
use std::process::Stdio;

use tokio::process::{Child, Command};

/// Environment variable set on every worker process.
///
/// Informational only: the role is chosen by the `worker` argument, but
/// scripts and process listings can still tell workers apart by it.
pub const WORKER_ENV_MARKER: &str = "SHELF_WORKER";

/// Starts one worker process.
pub trait WorkerLauncher: Send + Sync {
    fn launch(&self, index: usize) -> io::Result<Child>;
}

/// Launches workers by re-executing a program with fixed arguments plus
/// `--index <n>`.
///
/// Children inherit the parent's environment and stdio, so worker logs go
/// straight to the coordinator's terminal.
#[derive(Clone, Debug)]
pub struct ProcessLauncher {
    program: PathBuf,
    args: Vec<OsString>,
}

impl ProcessLauncher {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Launcher for the running executable.
    pub fn current_exe() -> io::Result<Self> {
        Ok(Self::new(std::env::current_exe()?))
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn command(&self, index: usize) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .arg("--index")
            .arg(index.to_string())
            .env(WORKER_ENV_MARKER, "1")
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);
        cmd
    }
}

impl WorkerLauncher for ProcessLauncher {
    fn launch(&self, index: usize) -> io::Result<Child> {
        self.command(index).spawn()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_line_ends_with_index() {
        let launcher = ProcessLauncher::new("/usr/bin/shelf").args(["worker", "--db", "x.db"]);
        let cmd = launcher.command(4);
        let std_cmd = cmd.as_std();
        let args: Vec<_> = std_cmd.get_args().map(|a| a.to_string_lossy().into_owned()).collect();
        assert_eq!(args, vec!["worker", "--db", "x.db", "--index", "4"]);
        assert_eq!(std_cmd.get_program(), "/usr/bin/shelf");
    }

    #[test]
    fn command_sets_marker() {
        let cmd = ProcessLauncher::new("shelf").command(0);
        let marker = cmd
            .as_std()
            .get_envs()
            .find(|(k, _)| *k == WORKER_ENV_MARKER)
            .and_then(|(_, v)| v);
        assert_eq!(marker, Some(std::ffi::OsStr::new("1")));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn launches_real_process() {
        let launcher = ProcessLauncher::new("sh").args(["-c", "exit 0", "sh"]);
        let mut child = launcher.launch(0).unwrap();
        assert!(child.wait().await.unwrap().success());
    }

    #[test]
    fn missing_program_fails_to_launch() {
        let rt = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
        rt.block_on(async {
            let launcher = ProcessLauncher::new("/definitely/not/a/real/binary");
            assert!(launcher.launch(0).is_err());
        });
    }
}
