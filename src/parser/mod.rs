//! Input parsing: resource identifiers and URLs embedded in chat text.
//!
//! Both parsers are pure string functions with no I/O.
//!
//! # Example
//!
//! ```
//! use freepik_dl_core::parser::{extract_resource_id, first_url};
//!
//! let url = first_url("/d https://www.freepik.com/free-photo/sunset_4021.htm").unwrap();
//! assert_eq!(extract_resource_id(url), "4021");
//! ```

mod resource_id;
mod url;

pub use resource_id::extract_resource_id;
pub use url::first_url;
