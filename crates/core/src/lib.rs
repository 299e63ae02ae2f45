//! The core numeric and identity types of the delegated proof-of-stake
//! system.

#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod address;
pub mod arith;
pub mod dec;
pub mod storage;
pub mod uint;

pub use borsh;
