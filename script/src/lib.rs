pub mod allowlist_file;

pub use allowlist_file::*;
