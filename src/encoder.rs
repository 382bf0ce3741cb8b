//! The concurrent encoder.
//!
//! Encoding a [`User`] fans out two units of work on the instance's pool: the
//! address object, and the list of child objects (one task per child, results
//! kept in input order). Once both are joined, the final text is composed by
//! template substitution in the field order `name, age, address, children`:
//!
//! ```text
//! {
//!     "name": "Ann",
//!     "age": 30,
//!     "address": {
//!         "city": "X",
//!         "street": "Y"
//!     },
//!     "children": [{"name": "Bo", "age": 5}]
//! }
//! ```
//!
//! Strings are embedded verbatim. A string containing `"` or a control
//! character produces text the decoder cannot read back.

use std::io::Write;
use std::time::Instant;

use tracing::debug;

use crate::api::ParjsonOptions;
use crate::error::Result;
use crate::model::{Address, Child, User};
use crate::pool::TaskPool;

/// Encodes users to text. Owns a private [`TaskPool`].
#[derive(Debug)]
pub struct Encoder {
    pool: TaskPool,
}

impl Encoder {
    /// Builds an encoder with a pool sized to the available parallelism.
    pub fn new() -> Result<Self> {
        Self::with_options(&ParjsonOptions::new())
    }

    /// Builds an encoder with a pool configured by `options`.
    pub fn with_options(options: &ParjsonOptions) -> Result<Self> {
        Ok(Self {
            pool: TaskPool::with_options(options)?,
        })
    }

    /// Number of pool workers.
    pub fn workers(&self) -> usize {
        self.pool.workers()
    }

    /// Encodes `user`.
    ///
    /// Only fails if a unit of work fails; the error is returned as a
    /// [`crate::ParjsonError::Task`] or [`crate::ParjsonError::TaskPanicked`].
    pub fn encode(&self, user: &User) -> Result<String> {
        let start = Instant::now();

        let (address, children) = self.pool.join(
            || Ok(encode_address(&user.address)),
            || {
                self.pool
                    .map_ordered(&user.children, |child| Ok(encode_child(child)))
            },
        )?;

        let text = compose_user(user, &address, &children);
        debug!(
            children = user.children.len(),
            bytes = text.len(),
            elapsed = ?start.elapsed(),
            "user encoded"
        );
        Ok(text)
    }

    /// Encodes `user` and writes the text to `writer`.
    pub fn encode_to_writer<W: Write>(&self, user: &User, mut writer: W) -> Result<()> {
        let text = self.encode(user)?;
        writer.write_all(text.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    /// Releases the pool's worker threads.
    pub fn shutdown(self) {
        self.pool.shutdown();
    }
}

/// Renders an address object, indented to sit one level inside the user.
pub fn encode_address(address: &Address) -> String {
    format!(
        "{{\n        \"city\": \"{}\",\n        \"street\": \"{}\"\n    }}",
        address.city, address.street
    )
}

/// Renders a child as a single-line object.
pub fn encode_child(child: &Child) -> String {
    format!("{{\"name\": \"{}\", \"age\": {}}}", child.name, child.age)
}

fn compose_user(user: &User, address: &str, children: &[String]) -> String {
    format!(
        "{{\n    \"name\": \"{}\",\n    \"age\": {},\n    \"address\": {},\n    \"children\": [{}]\n}}",
        user.name,
        user.age,
        address,
        children.join(", ")
    )
}
