use serde::{Deserialize, Serialize};

/// Domain an error code belongs to, taken from its thousands digit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    General,
    Auth,
    Permission,
    Order,
    Product,
    /// Infrastructure failures, and any code outside the known ranges
    System,
}

impl ErrorCategory {
    pub fn from_code(code: u16) -> Self {
        match code / 1000 {
            0 => Self::General,
            1 => Self::Auth,
            2 => Self::Permission,
            4 => Self::Order,
            6 => Self::Product,
            _ => Self::System,
        }
    }
}
