//! The record types moved through the encoder and decoder.
//!
//! A [`User`] owns its [`Address`] and its ordered list of [`Child`] values
//! exclusively. The order of `children` is significant and survives a
//! round-trip.

use serde::{Deserialize, Serialize};

/// A postal address, owned by exactly one [`User`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address {
    /// City name.
    pub city: String,
    /// Street name.
    pub street: String,
}

/// A child entry. Position in [`User::children`] is significant.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Child {
    /// Child's name.
    pub name: String,
    /// Child's age in years.
    pub age: i32,
}

/// The root aggregate.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct User {
    /// User's name.
    pub name: String,
    /// User's age in years.
    pub age: i32,
    /// Home address.
    pub address: Address,
    /// Children, in order.
    pub children: Vec<Child>,
}

impl Address {
    /// Creates an address.
    pub fn new(city: impl Into<String>, street: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            street: street.into(),
        }
    }
}

impl Child {
    /// Creates a child entry.
    pub fn new(name: impl Into<String>, age: i32) -> Self {
        Self {
            name: name.into(),
            age,
        }
    }
}

impl User {
    /// Creates a user.
    pub fn new(name: impl Into<String>, age: i32, address: Address, children: Vec<Child>) -> Self {
        Self {
            name: name.into(),
            age,
            address,
            children,
        }
    }

    /// The fixed benchmark dataset: one user with `child_count` generated
    /// children named `"Child {i}"`, aged `10 + i % 10`.
    pub fn sample(child_count: usize) -> Self {
        let children = (0..child_count)
            .map(|i| {
                // i % 10 is always < 10, so the cast cannot truncate.
                #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
                let age = 10 + (i % 10) as i32;
                Child::new(format!("Child {i}"), age)
            })
            .collect();

        Self::new(
            "Иван Иванов",
            35,
            Address::new("Москва", "Тверская"),
            children,
        )
    }
}
