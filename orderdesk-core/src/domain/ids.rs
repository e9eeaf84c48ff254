use serde::{Deserialize, Serialize};
use std::fmt;

pub const ORDER_ID_PREFIX: &str = "ORD";

/// Order ID, `ORD` followed by a sequence number (`ORD1`, `ORD2`, ...).
///
/// Ids read back from a sheet are kept verbatim even when they do not follow
/// the pattern; `seq()` is `None` for those.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn from_seq(seq: u64) -> Self {
        Self(format!("{ORDER_ID_PREFIX}{seq}"))
    }

    /// Sequence number encoded in the id.
    pub fn seq(&self) -> Option<u64> {
        self.0.strip_prefix(ORDER_ID_PREFIX)?.parse().ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for OrderId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}
