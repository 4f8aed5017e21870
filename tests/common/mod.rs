#![allow(dead_code)]

use std::sync::Mutex;

use company_employees::db::{DbPool, establish_connection_pool, run_migrations};
use company_employees::repository::DieselRepository;
use tempfile::TempDir;

/// A migrated SQLite database living in a temporary directory for the
/// duration of a test.
pub struct TestDb {
    _dir: TempDir,
    pool: DbPool,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join(name);
        let url = path.to_str().expect("temp path is not utf-8").to_string();

        let pool = establish_connection_pool(&url).expect("failed to create pool");
        run_migrations(&pool).expect("failed to run migrations");

        Self { _dir: dir, pool }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn repository(&self) -> DieselRepository {
        DieselRepository::new(self.pool())
    }
}

/// Log records emitted while tests in this binary run.
static CAPTURED: Mutex<Vec<(log::Level, String)>> = Mutex::new(Vec::new());

struct CapturingLogger;

impl log::Log for CapturingLogger {
    fn enabled(&self, _: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        CAPTURED
            .lock()
            .unwrap()
            .push((record.level(), record.args().to_string()));
    }

    fn flush(&self) {}
}

static LOGGER: CapturingLogger = CapturingLogger;

/// Routes `log` output into an in-memory buffer. Safe to call from every
/// test; only the first call installs the logger.
pub fn capture_logs() {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(log::LevelFilter::Debug);
    }
}

/// Messages logged at `level` that mention `needle`. Tests run in parallel,
/// so filter on something unique to the test.
pub fn logged(level: log::Level, needle: &str) -> Vec<String> {
    CAPTURED
        .lock()
        .unwrap()
        .iter()
        .filter(|(l, message)| *l == level && message.contains(needle))
        .map(|(_, message)| message.clone())
        .collect()
}
