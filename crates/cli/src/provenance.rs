use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::ffi::OsString;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

/// What produced an artifact: subcommand, optional run tag, and its parameters.
pub struct Run {
    pub command: &'static str,
    pub tag: Option<String>,
    pub params: Value,
}

#[derive(Serialize)]
struct Callsite {
    file: &'static str,
    line: u32,
}

#[derive(Serialize)]
struct Sidecar<'a> {
    code_rev: String,
    crate_version: &'static str,
    command: &'static str,
    tag: Option<&'a str>,
    callsite: Callsite,
    params: &'a Value,
    outputs: Vec<String>,
}

/// Write `<artifact stem>.provenance.json` next to `artifact`.
#[track_caller]
pub fn write_sidecar<P: AsRef<Path>>(artifact: P, run: &Run) -> Result<PathBuf> {
    let artifact = artifact.as_ref();
    let sidecar_path = sidecar_path(artifact);
    let callsite = Location::caller();
    let doc = Sidecar {
        code_rev: current_git_rev(),
        crate_version: hull2d::VERSION,
        command: run.command,
        tag: run.tag.as_deref(),
        callsite: Callsite {
            file: callsite.file(),
            line: callsite.line(),
        },
        params: &run.params,
        outputs: vec![artifact.to_string_lossy().into_owned()],
    };
    fs::write(&sidecar_path, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", sidecar_path.display()))?;
    tracing::debug!(path = %sidecar_path.display(), "provenance_written");
    Ok(sidecar_path)
}

fn sidecar_path(artifact: &Path) -> PathBuf {
    let mut name = artifact
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| OsString::from("artifact"));
    name.push(".provenance.json");
    artifact.with_file_name(name)
}

/// `GIT_COMMIT` at build or run time, else `git rev-parse HEAD`, else "unknown".
pub fn current_git_rev() -> String {
    option_env!("GIT_COMMIT")
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .or_else(|| std::env::var("GIT_COMMIT").ok().filter(|s| !s.is_empty()))
        .or_else(|| {
            let output = Command::new("git").args(["rev-parse", "HEAD"]).output().ok()?;
            if !output.status.success() {
                return None;
            }
            String::from_utf8(output.stdout)
                .ok()
                .map(|s| s.trim().to_string())
        })
        .unwrap_or_else(|| "unknown".to_string())
}
