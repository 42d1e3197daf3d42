pub mod files;
pub mod snapshot;

pub use files::{ensure_data_dir, init_local_dir, log_file};
pub use snapshot::{load_snapshot_or_empty, save_snapshot};
