//! Map and set containers that accept any value as a key or element,
//! matching by deep (structural) equality rather than identity.
//!
//! The native hash containers require keys to implement `Hash` and compare
//! by `Eq`, which rules out heterogeneous keys and makes float keys
//! awkward. [`ValueMap`] and [`ValueSet`] instead pair a coarse structural
//! hash with a pluggable deep-equality predicate, so a record key built as
//! `{a: 1, b: 2}` finds the entry stored under `{b: 2, a: 1}`, and NaN is a
//! perfectly good key.
//!
//! # Hashing
//! The hash function ([`hash::structural_hash`]) is intentionally weak: it
//! folds a value's canonical text, or for composites sums the hashes of its
//! `(field name, field text)` pairs one level deep, in the signed 32-bit
//! range. The summation makes the hash independent of field enumeration
//! order, and the shallow traversal keeps it O(shape size). Everything the
//! hash cannot distinguish is settled by a linear scan of the hash's bucket
//! with the equality predicate, so the only cost of a collision is that
//! scan.
//!
//! # Iteration order
//! Traversals ([`ValueMap::iter`], [`ValueSet::iter`] and friends) follow
//! the enumeration order of the hash→bucket index. That order is not
//! insertion order and is not otherwise specified; every traversal is a
//! fresh, finite, exact-size pass over all entries.
//!
//! # Customization
//! Each container holds an [`Equivalence`] instance — a hash/equality pair
//! — rather than sharing global behavior. The default, [`Deep`], combines
//! the structural hash with the key type's own `PartialEq`. Custom pairs
//! must preserve the one law the table relies on: equal keys hash equal.
//!
//! # Mutability
//! Keys and elements are read-only once stored. Mutating a stored key
//! through interior mutability changes its hash out from under the table
//! and makes the entry unfindable; treat stored keys as frozen.

pub mod hash;
pub mod map;
pub mod set;
pub(crate) mod table;
pub mod value;


pub use hash::{structural_hash, Deep, Equivalence, Structural};
pub use map::ValueMap;
pub use set::ValueSet;
pub use value::Value;
