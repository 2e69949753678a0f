// Shared helpers for integration tests.
//
// Provides a temporary dotfiles repository and home directory, populated from
// the embedded manifest, plus a fake executor so compile hooks never spawn
// real processes.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use dotdeploy_cli::commands;
use dotdeploy_cli::config::manifest;
use dotdeploy_cli::deploy::DeployOptions;
use dotdeploy_cli::exec::{ExecResult, Executor};
use dotdeploy_cli::logging::Logger;
use dotdeploy_cli::platform::Platform;

/// An isolated repository + home pair backed by a [`tempfile::TempDir`].
///
/// The directory is automatically deleted when dropped.
pub struct TestEnv {
    dir: tempfile::TempDir,
    /// Dotfiles repository root.
    pub root: PathBuf,
    /// Home directory.
    pub home: PathBuf,
}

impl TestEnv {
    /// Create an empty repository and an empty home.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let root = dir.path().join("dotfiles");
        let home = dir.path().join("home");
        std::fs::create_dir_all(root.join(".git")).expect("create repo");
        std::fs::create_dir_all(&home).expect("create home");
        Self { dir, root, home }
    }

    /// Create a repository holding every source (and compile script) the
    /// manifest lists for `platform`.
    pub fn with_sources(platform: Platform) -> Self {
        let env = Self::new();
        for entry in manifest::load(platform).expect("load manifest") {
            let source = env.write_source(&entry.source, &format!("# {}\n", entry.name));
            if let Some(script) = &entry.compile_script {
                let dir = source.parent().expect("source has a parent");
                std::fs::write(dir.join(script), "#!/bin/sh\n").expect("write compile script");
            }
        }
        env
    }

    /// Write a file into the repository, creating parent directories.
    pub fn write_source(&self, rel: impl AsRef<Path>, content: &str) -> PathBuf {
        let path = self.root.join(rel);
        std::fs::create_dir_all(path.parent().expect("source has a parent"))
            .expect("create source dir");
        std::fs::write(&path, content).expect("write source");
        path
    }

    /// Absolute path of `rel` beside the repository and home, for anything a
    /// test needs kept out of both.
    pub fn scratch_path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    /// Absolute path of `rel` inside the home directory.
    pub fn home_path(&self, rel: &str) -> PathBuf {
        self.home.join(rel)
    }

    /// Everything under the home directory, keyed by relative path.
    pub fn snapshot_home(&self) -> BTreeMap<PathBuf, String> {
        let mut out = BTreeMap::new();
        walk(&self.home, &self.home, &mut out);
        out
    }

    /// Deploy into this environment as if running on `identifier`.
    pub fn deploy(&self, identifier: &str, options: DeployOptions) -> Outcome {
        let log = Arc::new(Logger::new(None));
        let executor = Arc::new(FakeExecutor::default());
        let result = commands::deploy::run_with(
            identifier,
            &self.root,
            &self.home,
            options,
            executor.clone(),
            &log,
        );
        Outcome {
            result,
            log,
            executor,
        }
    }
}

/// Result of one [`TestEnv::deploy`] call.
pub struct Outcome {
    pub result: anyhow::Result<()>,
    pub log: Arc<Logger>,
    pub executor: Arc<FakeExecutor>,
}

fn walk(base: &Path, dir: &Path, out: &mut BTreeMap<PathBuf, String>) {
    for entry in std::fs::read_dir(dir).expect("read dir") {
        let path = entry.expect("dir entry").path();
        let rel = path.strip_prefix(base).expect("under base").to_path_buf();
        let meta = std::fs::symlink_metadata(&path).expect("metadata");
        if meta.file_type().is_symlink() {
            let target = std::fs::read_link(&path).expect("read link");
            out.insert(rel, format!("link {}", target.display()));
        } else if meta.is_dir() {
            out.insert(rel, "dir".to_string());
            walk(base, &path, out);
        } else {
            let content = std::fs::read_to_string(&path).expect("read file");
            out.insert(rel, format!("file {content}"));
        }
    }
}

/// [`Executor`] that records calls and always succeeds.
#[derive(Debug, Default)]
pub struct FakeExecutor {
    calls: Mutex<Vec<(PathBuf, PathBuf)>>,
}

impl FakeExecutor {
    /// `(dir, program)` pairs in call order.
    pub fn calls(&self) -> Vec<(PathBuf, PathBuf)> {
        self.calls.lock().expect("lock calls").clone()
    }
}

impl Executor for FakeExecutor {
    fn run_in(&self, dir: &Path, program: &Path) -> anyhow::Result<ExecResult> {
        self.calls
            .lock()
            .expect("lock calls")
            .push((dir.to_path_buf(), program.to_path_buf()));
        Ok(ExecResult {
            stdout: String::new(),
            stderr: String::new(),
            success: true,
            code: Some(0),
        })
    }
}

/// Options for a dry run.
pub fn dry_run() -> DeployOptions {
    DeployOptions {
        dry_run: true,
        ..DeployOptions::default()
    }
}
