//! Shared constants for Quarry.

/// Quarry version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Separator between hierarchy levels inside a label.
pub const HIERARCHY_SEPARATOR: char = '/';

/// Default minimum itemset support (fraction of transactions).
pub const DEFAULT_MIN_SUPPORT: f64 = 0.0005;

/// Default minimum rule confidence.
pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.5;

/// Default largest itemset size considered by the miner.
pub const DEFAULT_MAX_LENGTH: usize = 8;

/// Labels whose occurrences are skipped during extraction by default:
/// the uncategorised catch-all and functional locations.
pub const DEFAULT_IGNORED_LABELS: &[&str] = &["Item/Uncategorised", "FLOC"];

/// Default output directory for the transaction dump and rule report.
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Default transaction dump file name.
pub const DEFAULT_TRANSACTIONS_FILE: &str = "transactions.csv";

/// Default rule report file name.
pub const DEFAULT_RULES_FILE: &str = "rules.txt";

/// Default SQLite database path.
pub const DEFAULT_DATABASE: &str = "quarry.db";

/// Default number of retries when opening the store fails transiently.
pub const DEFAULT_CONNECT_RETRIES: u32 = 3;

/// Default initial backoff between open attempts, doubled per attempt.
pub const DEFAULT_RETRY_BACKOFF_MS: u64 = 200;

/// Rules processed between progress log lines.
pub const PROGRESS_INTERVAL: usize = 1000;
