//! Common test utilities: tracing setup and a write-recording element.
//!
//! # Usage
//!
//! ```rust,ignore
//! mod common;
//!
//! #[test]
//! fn my_test() {
//!     common::init_tracing();
//!     let table = common::Table::new(&[3, 1, 2]);
//!     // ... renumber table.rows_mut(), then inspect table.numbers(), table.writes()
//! }
//! ```
//!
//! # Configuration
//!
//! Environment variables:
//! - `RUST_LOG`: Filter directives (e.g., `renumber=debug,renumber::rewrite=trace`)
//! - `RENUMBER_LOG_DIR`: Log directory (default: `logs/`)
//! - `RENUMBER_LOG_CONSOLE`: Set to "0" to disable console output
//!
//! # Log Files
//!
//! Logs are appended to `logs/renumber.jsonl` as newline-delimited JSON.
//!
//! ```bash
//! # Every write of a failing property case
//! cat logs/renumber.jsonl | jq 'select(.fields.message == "write")'
//! ```

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::env;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Once;

use renumber::{Element, Number};
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

// ============================================================================
//  Tracing
// ============================================================================

/// Ensures tracing is only initialized once across all tests.
static INIT: Once = Once::new();

/// Initialize the tracing subscriber with file and console logging.
///
/// Safe to call multiple times; only the first call takes effect.
pub fn init_tracing() {
    INIT.call_once(|| {
        setup_tracing();
    });
}

/// Configuration for tracing setup.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Directory for log files.
    pub log_dir: PathBuf,
    /// Log file name.
    pub log_file: String,
    /// Enable console output.
    pub console_enabled: bool,
    /// Default log level if RUST_LOG is not set.
    pub default_level: Level,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("logs"),
            log_file: "renumber.jsonl".to_string(),
            console_enabled: true,
            default_level: Level::WARN,
        }
    }
}

impl TracingConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("RENUMBER_LOG_DIR") {
            config.log_dir = PathBuf::from(dir);
        }

        if env::var("RENUMBER_LOG_CONSOLE").is_ok_and(|v| v == "0") {
            config.console_enabled = false;
        }

        config
    }
}

fn make_filter(default_level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(format!("{default_level}")))
}

#[allow(clippy::expect_used)]
fn setup_tracing() {
    let config = TracingConfig::from_env();

    std::fs::create_dir_all(&config.log_dir).expect("Failed to create log directory");

    let log_path = config.log_dir.join(&config.log_file);

    // Append: each test binary runs in its own process.
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .expect("Failed to open log file");

    let console_layer = if config.console_enabled {
        Some(
            tracing_subscriber::fmt::layer()
                .with_test_writer()
                .with_target(true)
                .with_line_number(true)
                .with_span_events(FmtSpan::CLOSE)
                .compact()
                .with_filter(make_filter(config.default_level)),
        )
    } else {
        None
    };

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::sync::Mutex::new(file))
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::CLOSE)
        .json()
        .with_filter(make_filter(config.default_level));

    let _ = Registry::default()
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

// ============================================================================
//  Write-recording elements
// ============================================================================

/// Shared bookkeeping for every [`Record`] of one [`Table`].
#[derive(Debug, Default)]
pub struct Ledger {
    /// How many records currently hold each number.
    live: HashMap<Number, usize>,
    /// Every write in order: (record id, number written).
    writes: Vec<(usize, Number)>,
    /// Writes that made a number live on two records at once.
    collisions: Vec<(usize, Number)>,
}

/// A row standing in for a persisted record. Every write is logged in the
/// shared [`Ledger`].
#[derive(Debug)]
pub struct Record {
    id: usize,
    number: Number,
    ledger: Rc<RefCell<Ledger>>,
}

impl Element for Record {
    fn number(&self) -> Number {
        self.number
    }

    fn set_number(&mut self, number: Number) {
        let mut ledger = self.ledger.borrow_mut();

        if let Some(count) = ledger.live.get_mut(&self.number) {
            *count -= 1;
        }

        let count = ledger.live.entry(number).or_insert(0);
        *count += 1;
        if *count > 1 {
            ledger.collisions.push((self.id, number));
        }

        ledger.writes.push((self.id, number));
        self.number = number;
    }
}

/// A collection of [`Record`]s sharing one ledger.
#[derive(Debug)]
pub struct Table {
    rows: Vec<Record>,
    ledger: Rc<RefCell<Ledger>>,
}

impl Table {
    /// Build one record per number, with ids matching input positions.
    pub fn new(numbers: &[Number]) -> Self {
        let ledger = Rc::new(RefCell::new(Ledger::default()));

        {
            let mut state = ledger.borrow_mut();
            for &number in numbers {
                *state.live.entry(number).or_insert(0) += 1;
            }
        }

        let rows = numbers
            .iter()
            .enumerate()
            .map(|(id, &number)| Record {
                id,
                number,
                ledger: Rc::clone(&ledger),
            })
            .collect();

        Self { rows, ledger }
    }

    /// Mutable iterator to hand to the assigner.
    pub fn rows_mut(&mut self) -> std::slice::IterMut<'_, Record> {
        self.rows.iter_mut()
    }

    /// Current numbers in input order.
    pub fn numbers(&self) -> Vec<Number> {
        self.rows.iter().map(|r| r.number).collect()
    }

    /// Total writes recorded so far.
    pub fn writes(&self) -> usize {
        self.ledger.borrow().writes.len()
    }

    /// Writes received by record `id`.
    pub fn writes_to(&self, id: usize) -> usize {
        self.ledger
            .borrow()
            .writes
            .iter()
            .filter(|(w, _)| *w == id)
            .count()
    }

    /// Writes that duplicated a live number.
    pub fn collisions(&self) -> Vec<(usize, Number)> {
        self.ledger.borrow().collisions.clone()
    }

    /// Forget recorded writes, keeping the current numbers.
    pub fn clear_log(&self) {
        let mut ledger = self.ledger.borrow_mut();
        ledger.writes.clear();
        ledger.collisions.clear();
    }
}

/// Dense ranks of `numbers`, ties by position. Independent of the crate's
/// permutation code.
pub fn expected_ranks(numbers: &[Number]) -> Vec<Number> {
    numbers
        .iter()
        .enumerate()
        .map(|(i, &n)| {
            let below = numbers.iter().filter(|&&m| m < n).count();
            let tied_before = numbers[..i].iter().filter(|&&m| m == n).count();
            Number::try_from(below + tied_before).unwrap()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracing_init() {
        init_tracing();
        tracing::info!("Tracing initialized successfully");
        tracing::debug!(len = 3, "Debug event");
    }

    #[test]
    fn test_table_records_writes_and_collisions() {
        let mut table = Table::new(&[1, 2]);

        {
            let mut rows = table.rows_mut();
            rows.next().unwrap().set_number(2);
        }

        assert_eq!(table.numbers(), vec![2, 2]);
        assert_eq!(table.writes(), 1);
        assert_eq!(table.writes_to(0), 1);
        assert_eq!(table.collisions(), vec![(0, 2)]);
    }

    #[test]
    fn test_expected_ranks() {
        assert_eq!(expected_ranks(&[8, 7, 3, 6, 2, 1, 4]), vec![6, 5, 2, 4, 1, 0, 3]);
        assert_eq!(expected_ranks(&[5, 5, 5]), vec![0, 1, 2]);
    }
}
