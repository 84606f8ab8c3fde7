use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::time::Duration;

use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

/// Captured output of a completed tool invocation
#[derive(Debug, Clone)]
pub struct ToolOutput {
    pub stdout: String,
    pub stderr: String,
}

#[derive(Error, Debug)]
pub enum ToolError {
    #[error("failed to spawn {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} exited with {status}: {stderr}")]
    Failed {
        tool: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("{tool} timed out after {timeout_secs}s")]
    Timeout { tool: String, timeout_secs: u64 },
}

/// Adapter for the external grid-processing executable.
///
/// All three operations are thin wrappers over one command-line contract:
/// exit code 0 means success with results on stdout, anything else is a
/// failure with details on stderr.
#[async_trait::async_trait]
pub trait GridTool: Send + Sync {
    /// Skin a grid file into a renderable surface inside `out_dir`.
    /// `tag` distinguishes the source and target artifacts.
    async fn convert_to_surface(
        &self,
        grid: &Path,
        out_dir: &Path,
        tag: &str,
    ) -> Result<ToolOutput, ToolError>;

    /// Summary statistics of a grid file, human readable on stdout.
    async fn compute_statistics(&self, grid: &Path) -> Result<ToolOutput, ToolError>;

    /// Transfer the solution field from `source` onto `target`.
    async fn transfer_solution(
        &self,
        source: &Path,
        target: &Path,
    ) -> Result<ToolOutput, ToolError>;
}

/// Production adapter around the `grid2gridTransfer` executable
pub struct Grid2GridTool {
    exe: PathBuf,
    timeout: Duration,
}

impl Grid2GridTool {
    pub fn new(exe: PathBuf, timeout: Duration) -> Self {
        Self { exe, timeout }
    }

    fn tool_name(&self) -> String {
        self.exe
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.exe.display().to_string())
    }

    async fn run(&self, args: Vec<OsString>) -> Result<ToolOutput, ToolError> {
        let tool = self.tool_name();
        debug!("invoking {} {:?}", self.exe.display(), args);

        let mut cmd = Command::new(&self.exe);
        cmd.args(&args).kill_on_drop(true);

        let output = tokio::time::timeout(self.timeout, cmd.output())
            .await
            .map_err(|_| ToolError::Timeout {
                tool: tool.clone(),
                timeout_secs: self.timeout.as_secs(),
            })?
            .map_err(|e| ToolError::Spawn {
                tool: tool.clone(),
                source: e,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if output.status.success() {
            Ok(ToolOutput { stdout, stderr })
        } else {
            Err(ToolError::Failed {
                tool,
                status: output.status,
                stderr,
            })
        }
    }
}

#[async_trait::async_trait]
impl GridTool for Grid2GridTool {
    async fn convert_to_surface(
        &self,
        grid: &Path,
        out_dir: &Path,
        tag: &str,
    ) -> Result<ToolOutput, ToolError> {
        self.run(vec![
            "--cgns2stl".into(),
            grid.into(),
            out_dir.into(),
            tag.into(),
        ])
        .await
    }

    async fn compute_statistics(&self, grid: &Path) -> Result<ToolOutput, ToolError> {
        self.run(vec!["--statCGNS".into(), grid.into()]).await
    }

    async fn transfer_solution(
        &self,
        source: &Path,
        target: &Path,
    ) -> Result<ToolOutput, ToolError> {
        self.run(vec!["--transCGNS".into(), source.into(), target.into()])
            .await
    }
}
