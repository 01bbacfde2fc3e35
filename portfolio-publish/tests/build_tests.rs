//! Frontend build with a scripted toolchain.

use std::cell::RefCell;
use std::fs;
use std::path::Path;

use portfolio_core::config::{self, Config};
use portfolio_publish::build::{ENV_PRODUCTION, OUT_DIR};
use portfolio_publish::{build_static, PublishError, Toolchain};
use tempfile::TempDir;

/// Records every command; `npm run build` creates the export dir unless
/// `produce_out` is false. `fail` names a program that exits non-zero.
struct Scripted {
    calls: RefCell<Vec<String>>,
    produce_out: bool,
    fail: Option<&'static str>,
}

impl Scripted {
    fn new() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            produce_out: true,
            fail: None,
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl Toolchain for Scripted {
    fn run(&self, program: &str, args: &[&str], cwd: &Path) -> Result<(), PublishError> {
        let command = format!("{program} {}", args.join(" "));
        self.calls.borrow_mut().push(command.clone());
        if self.fail == Some(program) {
            return Err(PublishError::CommandFailed {
                command,
                status: "exit status: 1".to_string(),
            });
        }
        if command == "npm run build" && self.produce_out {
            fs::create_dir_all(cwd.join(OUT_DIR)).expect("mkdir out");
        }
        Ok(())
    }
}

fn config_for(dir: &Path, extra: &[(&str, &str)]) -> Config {
    let dir = dir.display().to_string();
    let mut pairs = vec![(config::NEXTJS_DIR, dir.as_str())];
    pairs.extend_from_slice(extra);
    Config::from_pairs(pairs)
}

#[test]
fn full_build_runs_preflight_install_and_build() {
    let site = TempDir::new().expect("tmp");
    let cfg = config_for(site.path(), &[(config::PORTFOLIO_API_BASE, "https://api.example.com")]);
    let toolchain = Scripted::new();

    let out = build_static(&cfg, &toolchain).expect("build");

    assert_eq!(out, site.path().join(OUT_DIR));
    assert_eq!(
        toolchain.calls(),
        vec!["node -v", "npm -v", "npx -v", "npm ci", "npm run build"]
    );
    assert_eq!(
        fs::read_to_string(site.path().join(ENV_PRODUCTION)).expect("env"),
        "NEXT_PUBLIC_PORTFOLIO_API=https://api.example.com\n"
    );
}

#[test]
fn skip_npm_ci_only_applies_when_node_modules_exist() {
    let site = TempDir::new().expect("tmp");
    let cfg = config_for(site.path(), &[(config::SKIP_NPM_CI, "true")]);

    let toolchain = Scripted::new();
    build_static(&cfg, &toolchain).expect("build");
    assert!(toolchain.calls().contains(&"npm ci".to_string()));

    fs::create_dir_all(site.path().join("node_modules")).expect("mkdir");
    let toolchain = Scripted::new();
    build_static(&cfg, &toolchain).expect("build");
    assert!(!toolchain.calls().contains(&"npm ci".to_string()));
}

#[test]
fn missing_tool_stops_before_install() {
    let site = TempDir::new().expect("tmp");
    let cfg = config_for(site.path(), &[]);
    let toolchain = Scripted {
        fail: Some("npx"),
        ..Scripted::new()
    };

    let err = build_static(&cfg, &toolchain).unwrap_err();

    assert!(
        matches!(err, PublishError::MissingTool { ref tool, .. } if tool == "npx"),
        "got: {err}"
    );
    assert_eq!(toolchain.calls(), vec!["node -v", "npm -v", "npx -v"]);
}

#[test]
fn build_without_export_dir_fails() {
    let site = TempDir::new().expect("tmp");
    let cfg = config_for(site.path(), &[]);
    let toolchain = Scripted {
        produce_out: false,
        ..Scripted::new()
    };

    let err = build_static(&cfg, &toolchain).unwrap_err();
    assert!(matches!(err, PublishError::MissingDir { .. }), "got: {err}");
    assert!(err.to_string().contains("output: 'export'"));
}

#[test]
fn missing_nextjs_dir_is_a_config_error_and_runs_nothing() {
    let toolchain = Scripted::new();
    let err = build_static(&Config::default(), &toolchain).unwrap_err();
    assert!(matches!(err, PublishError::Config(_)), "got: {err}");
    assert!(toolchain.calls().is_empty());
}
