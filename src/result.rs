//! Result type used throughout release-actions.
//!
//! Every fallible operation returns [`Result`], a `color-eyre` result, so
//! errors carry context as they propagate up to `main` where they are
//! rendered with colour and suggestions.
//!
//! ```rust,ignore
//! use color_eyre::eyre::Context;
//! use crate::result::Result;
//!
//! fn read_changelog(path: &Path) -> Result<String> {
//!     let content = std::fs::read_to_string(path)
//!         .wrap_err("failed to read changelog file")?;
//!     Ok(content)
//! }
//! ```

use color_eyre::eyre::Result as EyreResult;

/// Standard result type used throughout release-actions.
pub type Result<T> = EyreResult<T>;
