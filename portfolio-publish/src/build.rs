//! Static frontend build.
//!
//! The frontend toolchain is treated as a black box: check the tools are
//! installed, install dependencies, write the public API URL into
//! `.env.production`, run the build, and confirm the export directory
//! appeared.

use std::path::{Path, PathBuf};
use std::process::Command;

use portfolio_core::config::NEXT_PUBLIC_PORTFOLIO_API;
use portfolio_core::Config;

use crate::error::{io_err, PublishError};

/// Export directory name inside the frontend checkout.
pub const OUT_DIR: &str = "out";
pub const ENV_PRODUCTION: &str = ".env.production";

const REQUIRED_TOOLS: [&str; 3] = ["node", "npm", "npx"];

/// Runs external commands. The live implementation is [`SystemToolchain`].
pub trait Toolchain {
    fn run(&self, program: &str, args: &[&str], cwd: &Path) -> Result<(), PublishError>;
}

/// Spawns real processes, inheriting stdio.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemToolchain;

impl Toolchain for SystemToolchain {
    fn run(&self, program: &str, args: &[&str], cwd: &Path) -> Result<(), PublishError> {
        let command = std::iter::once(program)
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ");
        tracing::info!("$ {command}");

        let status = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .status()
            .map_err(|source| PublishError::Spawn {
                program: program.to_string(),
                source,
            })?;
        if !status.success() {
            return Err(PublishError::CommandFailed {
                command,
                status: status.to_string(),
            });
        }
        Ok(())
    }
}

/// Path of the static export for `config`.
pub fn out_dir(config: &Config) -> Result<PathBuf, PublishError> {
    Ok(config.nextjs_dir()?.join(OUT_DIR))
}

/// Build the static export and return its directory.
pub fn build_static(config: &Config, toolchain: &dyn Toolchain) -> Result<PathBuf, PublishError> {
    let next_dir = config.nextjs_dir()?;
    if !next_dir.is_dir() {
        return Err(PublishError::MissingDir {
            path: next_dir,
            hint: "check NEXTJS_DIR",
        });
    }

    for tool in REQUIRED_TOOLS {
        toolchain
            .run(tool, &["-v"], &next_dir)
            .map_err(|err| PublishError::MissingTool {
                tool: tool.to_string(),
                reason: err.to_string(),
            })?;
    }

    if config.skip_npm_ci() && next_dir.join("node_modules").is_dir() {
        tracing::info!("SKIP_NPM_CI set and node_modules present; skipping npm ci");
    } else {
        toolchain.run("npm", &["ci"], &next_dir)?;
    }

    match config.public_api() {
        Some(url) => {
            let env_file = next_dir.join(ENV_PRODUCTION);
            let path = upsert_env_line(&env_file, NEXT_PUBLIC_PORTFOLIO_API, url)?;
            tracing::info!("wrote {}", path.display());
        }
        None => tracing::warn!(
            "{NEXT_PUBLIC_PORTFOLIO_API} is empty; the site may not know where to fetch tiles"
        ),
    }

    toolchain.run("npm", &["run", "build"], &next_dir)?;

    let out = next_dir.join(OUT_DIR);
    if !out.is_dir() {
        return Err(PublishError::MissingDir {
            path: out,
            hint: "build succeeded but produced no export; set `output: 'export'` in next.config.js",
        });
    }
    tracing::info!("built {}", out.display());
    Ok(out)
}

/// Ensure `path` holds exactly one `key=value` line, keeping other lines.
pub fn upsert_env_line(path: &Path, key: &str, value: &str) -> Result<PathBuf, PublishError> {
    let existing = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(io_err(path, e)),
    };

    let assignment = format!("{key}=");
    let new_line = format!("{key}={value}");
    let mut lines: Vec<&str> = existing
        .lines()
        .filter(|line| !line.starts_with(&assignment))
        .collect();
    lines.push(&new_line);

    let mut content = lines.join("\n");
    content.push('\n');
    std::fs::write(path, content).map_err(|e| io_err(path, e))?;
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn upsert_creates_file() {
        let dir = TempDir::new().expect("tmp");
        let path = dir.path().join(ENV_PRODUCTION);
        upsert_env_line(&path, "K", "v").expect("upsert");
        assert_eq!(std::fs::read_to_string(&path).expect("read"), "K=v\n");
    }

    #[test]
    fn upsert_replaces_existing_and_keeps_others() {
        let dir = TempDir::new().expect("tmp");
        let path = dir.path().join(ENV_PRODUCTION);
        std::fs::write(&path, "A=1\nK=old\nB=2").expect("write");
        upsert_env_line(&path, "K", "new").expect("upsert");
        assert_eq!(
            std::fs::read_to_string(&path).expect("read"),
            "A=1\nB=2\nK=new\n"
        );
    }

    #[test]
    fn upsert_does_not_touch_keys_sharing_a_prefix() {
        let dir = TempDir::new().expect("tmp");
        let path = dir.path().join(ENV_PRODUCTION);
        std::fs::write(&path, "K_EXTRA=1\n").expect("write");
        upsert_env_line(&path, "K", "v").expect("upsert");
        assert_eq!(
            std::fs::read_to_string(&path).expect("read"),
            "K_EXTRA=1\nK=v\n"
        );
    }
}
