//! File system seam used by the log collector and merger

mod mock;
mod real;
mod r#trait;

pub use mock::MockFileSystem;
pub use r#trait::{DirEntry, FileSystem};
pub use real::RealFileSystem;
