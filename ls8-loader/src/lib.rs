//! LS-8 Program Loader
//!
//! Turn LS-8 program text into a [`Program`](ls8_spec::Program) image. Each
//! line carries at most one base-2 byte; anything after `#` is a comment.
//!
//! ## Example
//!
//! ```rust
//! use ls8_loader::{parse_source, LoadMode};
//!
//! let source = r#"
//!     10000010 # LDI R0,8
//!     00000000
//!     00001000
//!     00000001 # HLT
//! "#;
//!
//! let program = parse_source(source, LoadMode::Lenient).unwrap();
//! assert_eq!(program.len(), 4);
//! ```

pub mod error;
pub mod lexer;
pub mod loader;
pub mod parser;

pub use error::{LoaderError, MalformedReason, Result};
pub use loader::{load_file, parse_source, LoadMode};
pub use parser::parse_line;
