// trace columns
pub const HASH: &str = "hash";
pub const STATUS: &str = "status";

// filenames
pub const TRACE_FILE: &str = "trace.txt";
pub const EXITCODE_FILE: &str = ".exitcode";
pub const COMMAND_PREFIX: &str = ".command";

// work directory layout
pub const LV1_LEN: usize = 2;
pub const LV2_LEN: usize = 30;

// filter sentinels
pub const ANY_STATUS: &str = "any";
pub const ANY_EXITCODE: i32 = -1;
pub const MISSING_EXITCODE: i32 = -100;

// collections
pub const ARTIFACT_KINDS: &[&str] = &[
    "none", "exitcode", "log", "out", "err", "begin", "run", "sh", "trace",
];
pub const EXITCODE_MODES: &[&str] = &["strict", "lenient"];
