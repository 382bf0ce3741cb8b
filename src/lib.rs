//! # Parjson
//!
//! A hand-written, concurrent JSON encoder/decoder for a fixed nested record:
//! a [`User`] owning an [`Address`] and an ordered list of [`Child`] values.
//! It exists to be measured against off-the-shelf serializers.
//!
//! ## Overview
//!
//! The encoder and decoder are mirror images of each other:
//!
//! *   **Encoder:** the address object and the child objects are rendered on a
//!     worker pool, joined, and substituted into a fixed text template.
//! *   **Decoder:** the text is parsed into a generic [`Document`] on the
//!     calling thread, the scalar fields are read directly, then the address
//!     and every child are built on the pool and joined into a [`User`].
//!
//! Each [`Encoder`] / [`Decoder`] owns a private [`TaskPool`] with one worker
//! per hardware thread by default. The pool is released by `shutdown()` or
//! when the instance is dropped.
//!
//! ## Usage
//!
//! ```rust
//! use parjson::{Address, Child, Parjson, User};
//!
//! # fn main() -> parjson::Result<()> {
//! let user = User::new("Ann", 30, Address::new("X", "Y"), vec![Child::new("Bo", 5)]);
//!
//! let encoder = Parjson::builder().workers(2).encoder()?;
//! let decoder = Parjson::builder().workers(2).decoder()?;
//!
//! let text = encoder.encode(&user)?;
//! assert_eq!(decoder.decode(&text)?, user);
//!
//! encoder.shutdown();
//! decoder.shutdown();
//! # Ok(())
//! # }
//! ```
//!
//! ## Known limits
//!
//! Strings are written and read verbatim, without escaping. A string holding
//! a double quote produces text that does not decode back. There is no
//! timeout or cancellation: a stalled task stalls the call that joins it.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]
#![warn(missing_docs)]

// --- PUBLIC API MODULES ---
pub mod api;
pub mod decoder;
pub mod document;
pub mod encoder;
pub mod error;
pub mod model;
pub mod parser;
pub mod pool;

// --- RE-EXPORTS ---

pub use api::{Parjson, ParjsonOptions};
pub use decoder::Decoder;
pub use document::{Document, Number};
pub use encoder::Encoder;
pub use error::{ParjsonError, Result};
pub use model::{Address, Child, User};
pub use pool::{TaskHandle, TaskPool};
