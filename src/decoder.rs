//! The concurrent decoder.
//!
//! Decoding runs in two phases:
//!
//! 1. **Sequential.** The whole text is parsed into a [`Document`] on the
//!    calling thread. `name` and `age` are read from the root, and the
//!    `address` object and `children` array are detached from it. Missing keys
//!    and wrong kinds are reported here, before any work is queued.
//! 2. **Parallel.** Two tasks are submitted to the pool: one builds the
//!    [`Address`], the other builds every [`Child`] in parallel, keeping array
//!    order. Both are joined before the [`User`] is assembled.
//!
//! Any failure aborts the decode; there is never a partially filled `User`.

use std::io::Read;
use std::time::Instant;

use rayon::prelude::*;
use tracing::debug;

use crate::api::ParjsonOptions;
use crate::document::{self, Document, Object};
use crate::error::{ParjsonError, Result};
use crate::model::{Address, Child, User};
use crate::parser;
use crate::pool::TaskPool;

/// Decodes text into users. Owns a private [`TaskPool`].
#[derive(Debug)]
pub struct Decoder {
    pool: TaskPool,
}

impl Decoder {
    /// Builds a decoder with a pool sized to the available parallelism.
    pub fn new() -> Result<Self> {
        Self::with_options(&ParjsonOptions::new())
    }

    /// Builds a decoder with a pool configured by `options`.
    pub fn with_options(options: &ParjsonOptions) -> Result<Self> {
        Ok(Self {
            pool: TaskPool::with_options(options)?,
        })
    }

    /// Number of pool workers.
    pub fn workers(&self) -> usize {
        self.pool.workers()
    }

    /// Decodes `text`.
    ///
    /// Fails with [`ParjsonError::Parse`] on malformed text and with
    /// [`ParjsonError::Schema`] on a missing or mistyped key. Failures inside
    /// the nested `address` / `children` values arrive wrapped in
    /// [`ParjsonError::Task`]; use [`ParjsonError::root_cause`] to inspect them.
    pub fn decode(&self, text: &str) -> Result<User> {
        let start = Instant::now();

        let mut root = parser::parse_object(text)?;
        let name = document::string_field(&root, "name")?;
        let age = document::i32_field(&root, "age")?;
        let address = document::take_object(&mut root, "address")?;
        let children = document::take_array(&mut root, "children")?;
        drop(root);

        let child_count = children.len();
        let address = self.pool.submit(move || decode_address(&address));
        let children = self.pool.submit(move || {
            // Runs on a pool worker, so the per-child work stays on this pool.
            children
                .par_iter()
                .enumerate()
                .map(|(index, entry)| decode_child(index, entry))
                .collect::<Vec<_>>()
                .into_iter()
                .collect::<Result<Vec<Child>>>()
        });

        let address = address.join()?;
        let children = children.join()?;

        debug!(
            children = child_count,
            bytes = text.len(),
            elapsed = ?start.elapsed(),
            "user decoded"
        );
        Ok(User::new(name, age, address, children))
    }

    /// Reads all of `reader` and decodes it.
    pub fn decode_from_reader<R: Read>(&self, mut reader: R) -> Result<User> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        self.decode(&text)
    }

    /// Releases the pool's worker threads.
    pub fn shutdown(self) {
        self.pool.shutdown();
    }
}

/// Builds an [`Address`] from its object.
pub fn decode_address(object: &Object) -> Result<Address> {
    let city = document::string_field(object, "city")?;
    let street = document::string_field(object, "street")?;
    Ok(Address { city, street })
}

/// Builds the [`Child`] at position `index` of the `children` array.
pub fn decode_child(index: usize, entry: &Document) -> Result<Child> {
    let object = entry.as_object().ok_or_else(|| {
        ParjsonError::Schema(format!(
            "children[{index}] must be object, found {}",
            entry.kind()
        ))
    })?;
    let at_index = |err: ParjsonError| match err {
        ParjsonError::Schema(msg) => ParjsonError::Schema(format!("children[{index}]: {msg}")),
        other => other,
    };
    let name = document::string_field(object, "name").map_err(at_index)?;
    let age = document::i32_field(object, "age").map_err(at_index)?;
    Ok(Child { name, age })
}
