//! Identities of accounts and validator candidates.
//!
//! An [`Identity`] is the triple of the chain it lives on, the application
//! that controls it and its raw address bytes. Identities are totally ordered
//! by chain id, then application id, then address bytes, all compared
//! lexicographically. Every node breaks voting power ties with this order, so
//! it must never change.

use std::fmt::{Debug, Display};
use std::str::FromStr;

use borsh::{BorshDeserialize, BorshSchema, BorshSerialize};
use data_encoding::HEXUPPER;
use serde::{Deserialize, Serialize};

/// Error from decoding an identity from string
#[allow(missing_docs)]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error(
        "Expected an identity of the form `chain/app/HEX`, got {0:?}"
    )]
    Format(String),
    #[error("Invalid hex address bytes: {0}")]
    Hex(String),
}

/// Result of decoding an identity from string
pub type Result<T> = std::result::Result<T, DecodeError>;

/// The stable identity of an account or a validator candidate.
///
/// The field order matters: the derived [`Ord`] compares fields in
/// declaration order, which gives the tie-break order used when sorting
/// candidates.
#[derive(
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    BorshSerialize,
    BorshDeserialize,
    BorshSchema,
    Serialize,
    Deserialize,
)]
pub struct Identity {
    /// The chain the identity is registered on
    pub chain_id: String,
    /// The application controlling the identity
    pub app: String,
    /// Raw address bytes
    pub address: Vec<u8>,
}

impl Identity {
    /// Construct an identity from its parts.
    pub fn new(
        chain_id: impl Into<String>,
        app: impl Into<String>,
        address: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            chain_id: chain_id.into(),
            app: app.into(),
            address: address.into(),
        }
    }

    /// Encode the address bytes as upper case hex.
    pub fn address_hex(&self) -> String {
        HEXUPPER.encode(&self.address)
    }
}

impl Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.chain_id, self.app, self.address_hex())
    }
}

impl Debug for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Identity({self})")
    }
}

impl FromStr for Identity {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.splitn(3, '/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(chain_id), Some(app), Some(hex))
                if !chain_id.is_empty() && !app.is_empty() =>
            {
                let address = HEXUPPER
                    .decode(hex.to_ascii_uppercase().as_bytes())
                    .map_err(|e| DecodeError::Hex(e.to_string()))?;
                Ok(Self::new(chain_id, app, address))
            }
            _ => Err(DecodeError::Format(s.to_string())),
        }
    }
}

/// Helpers for testing with identities.
#[cfg(any(test, feature = "testing"))]
pub mod testing {
    use proptest::prelude::*;

    use super::*;

    /// Chain id used by the fixed test identities
    pub const TEST_CHAIN_ID: &str = "test-chain";

    /// Application id used by the fixed test identities
    pub const TEST_APP: &str = "stake";

    /// Derive an identity from a single byte seed. Identities from ascending
    /// seeds are in ascending order.
    pub fn identity_from_simple_seed(seed: u8) -> Identity {
        Identity::new(TEST_CHAIN_ID, TEST_APP, vec![seed; 20])
    }

    /// A fixed test identity
    pub fn established_identity_1() -> Identity {
        identity_from_simple_seed(1)
    }

    /// A fixed test identity
    pub fn established_identity_2() -> Identity {
        identity_from_simple_seed(2)
    }

    /// A fixed test identity
    pub fn established_identity_3() -> Identity {
        identity_from_simple_seed(3)
    }

    /// Generate an arbitrary identity. The chain and application ids are
    /// drawn from small sets so that every level of the ordering gets
    /// exercised.
    pub fn arb_identity() -> impl Strategy<Value = Identity> {
        (
            prop::sample::select(vec!["chain-a", "chain-b"]),
            prop::sample::select(vec!["coin", "stake"]),
            prop::collection::vec(any::<u8>(), 1..4),
        )
            .prop_map(|(chain_id, app, address)| {
                Identity::new(chain_id, app, address)
            })
    }
}
