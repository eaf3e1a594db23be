//! File actions module.
//!
//! This module applies a classified file's disposition:
//! - Move aside into a sibling `moved` directory (recoverable)
//! - Permanent deletion
//! - Dry-run simulation that keeps full accounting
//!
//! ```no_run
//! use foldersweep::actions::{Executor, MOVED_DIR_NAME};
//!
//! let executor = Executor::new(true);
//! assert!(executor.is_dry_run());
//! println!("moved files go to ./{}", MOVED_DIR_NAME);
//! ```

pub mod executor;

// Re-export commonly used types
pub use executor::{
    moved_dir_for, DeleteError, ExecuteStats, ExecutionError, Executor, MoveError, MOVED_DIR_NAME,
};
