//! Test doubles for the external collaborators: the download tool and the OS
//! process table.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use vidq_core::config::ToolConfig;
use vidq_core::job_store::KeyLayout;
use vidq_core::launcher::{CapturedOutput, Launcher};
use vidq_core::liveness::Liveness;
use vidq_core::store::MemoryStore;
use vidq_core::{JobError, JobService};

pub const PROBE_JSON: &str = r#"{
    "url": "https://example.com/v1",
    "title": "Example clip",
    "site": "Example",
    "streams": {
        "low": {"container": "mp4", "quality": "360p", "size": 100, "src": ["a"]},
        "high": {"container": "mp4", "quality": "1080p", "size": 900, "src": ["b"]}
    }
}"#;

/// Launcher that never starts a process. Pids come from a counter and are
/// registered as alive in the shared process table.
pub struct FakeLauncher {
    pub probe_output: Mutex<Result<String, String>>,
    pub fail_spawn: Mutex<bool>,
    pub probes: Mutex<Vec<Vec<String>>>,
    pub spawns: Mutex<Vec<Vec<String>>>,
    next_pid: AtomicU32,
    table: Arc<FakeProcessTable>,
}

impl FakeLauncher {
    pub fn new(table: Arc<FakeProcessTable>) -> Self {
        Self {
            probe_output: Mutex::new(Ok(PROBE_JSON.to_string())),
            fail_spawn: Mutex::new(false),
            probes: Mutex::new(Vec::new()),
            spawns: Mutex::new(Vec::new()),
            next_pid: AtomicU32::new(4000),
            table,
        }
    }

    pub fn probe_count(&self) -> usize {
        self.probes.lock().unwrap().len()
    }

    pub fn spawn_count(&self) -> usize {
        self.spawns.lock().unwrap().len()
    }
}

#[async_trait]
impl Launcher for FakeLauncher {
    async fn run_captured(
        &self,
        argv: &[String],
        _timeout: Duration,
    ) -> Result<CapturedOutput, JobError> {
        self.probes.lock().unwrap().push(argv.to_vec());
        match self.probe_output.lock().unwrap().clone() {
            Ok(stdout) => Ok(CapturedOutput {
                stdout,
                stderr: String::new(),
            }),
            Err(msg) => Err(JobError::ProbeFailed(msg)),
        }
    }

    async fn spawn_detached(&self, argv: &[String]) -> Result<u32, JobError> {
        if *self.fail_spawn.lock().unwrap() {
            return Err(JobError::LaunchFailed("no such file".to_string()));
        }
        self.spawns.lock().unwrap().push(argv.to_vec());
        let pid = self.next_pid.fetch_add(1, Ordering::SeqCst);
        self.table.start(&pid.to_string());
        Ok(pid)
    }
}

/// Stand-in for the OS process table.
#[derive(Default)]
pub struct FakeProcessTable {
    alive: Mutex<HashSet<String>>,
}

impl FakeProcessTable {
    pub fn start(&self, handle: &str) {
        self.alive.lock().unwrap().insert(handle.to_string());
    }

    pub fn exit(&self, handle: &str) {
        self.alive.lock().unwrap().remove(handle);
    }
}

impl Liveness for FakeProcessTable {
    fn is_running(&self, handle: &str) -> bool {
        self.alive.lock().unwrap().contains(handle)
    }
}

pub struct Harness {
    pub service: JobService,
    pub store: MemoryStore,
    pub launcher: Arc<FakeLauncher>,
    pub table: Arc<FakeProcessTable>,
}

pub fn harness() -> Harness {
    let store = MemoryStore::new();
    let table = Arc::new(FakeProcessTable::default());
    let launcher = Arc::new(FakeLauncher::new(Arc::clone(&table)));
    let tool = ToolConfig {
        output_dir: Some("/downloads".into()),
        ..ToolConfig::default()
    };
    let service = JobService::new(
        Arc::new(store.clone()),
        KeyLayout::default(),
        launcher.clone(),
        table.clone(),
        &tool,
    );
    Harness {
        service,
        store,
        launcher,
        table,
    }
}
