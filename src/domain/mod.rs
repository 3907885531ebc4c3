//! Domain models and types for PFT Extract.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Record model** ([`PftRecord`], [`Subject`], [`Visit`], [`Test`], [`Parameter`], [`Graph`])
//! - **Flat row model** ([`FlatRow`], [`FlatValue`])
//! - **Ordered map** ([`OrderedMap`]) used wherever document order matters
//! - **Error types** ([`PftError`], [`FileErrorDetail`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, PftError>`]:
//!
//! ```rust
//! use pft_extract::domain::{PftError, Result};
//!
//! fn example() -> Result<()> {
//!     let root = pft_extract::adapters::xml::parse_document("<Root/>")?;
//!     let missing = pft_extract::core::extract::extract_record(&root);
//!     assert!(matches!(missing, Err(PftError::MissingElement(_))));
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod flat_row;
pub mod ordered_map;
pub mod record;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::{FileErrorDetail, PftError};
pub use flat_row::{FlatRow, FlatValue};
pub use ordered_map::OrderedMap;
pub use record::{Graph, Parameter, PftRecord, Subject, Test, Visit};
pub use result::Result;
