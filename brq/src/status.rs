//! Gateway status codes.
//!
//! The gateway reports the state of a transaction as a three-digit code in
//! `BRQ_STATUSCODE`. The hundreds digit groups the codes: `1xx` success,
//! `4xx` failure, `6xx` rejection, `7xx` pending, `8xx` cancellation.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// A `BRQ_STATUSCODE` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StatusCode(u16);

impl StatusCode {
    /// Payment completed.
    pub const SUCCESS: Self = Self(190);
    /// Payment failed.
    pub const FAILED: Self = Self(490);
    /// The request did not pass validation.
    pub const VALIDATION_FAILURE: Self = Self(491);
    /// The gateway or the payment provider had a technical problem.
    pub const TECHNICAL_FAILURE: Self = Self(492);
    /// The payment provider rejected the payment.
    pub const REJECTED: Self = Self(690);
    /// Waiting for additional input from the merchant or consumer.
    pub const PENDING_INPUT: Self = Self(790);
    /// Being processed.
    pub const PENDING_PROCESSING: Self = Self(791);
    /// Waiting for the consumer to act.
    pub const AWAITING_CONSUMER: Self = Self(792);
    /// On hold, usually pending a manual check.
    pub const ON_HOLD: Self = Self(793);
    /// Cancelled by the consumer.
    pub const CANCELLED_BY_USER: Self = Self(890);
    /// Cancelled by the merchant.
    pub const CANCELLED_BY_MERCHANT: Self = Self(891);

    /// Wraps a raw code.
    #[must_use]
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Returns the raw code.
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self.0
    }

    /// Short description of a documented code.
    #[must_use]
    pub const fn description(self) -> Option<&'static str> {
        Some(match self.0 {
            190 => "success",
            490 => "failed",
            491 => "validation failure",
            492 => "technical failure",
            690 => "rejected",
            790 => "pending input",
            791 => "pending processing",
            792 => "awaiting consumer",
            793 => "on hold",
            890 => "cancelled by user",
            891 => "cancelled by merchant",
            _ => return None,
        })
    }

    /// `1xx`: the payment went through.
    #[must_use]
    pub const fn is_success(self) -> bool {
        self.0 / 100 == 1
    }

    /// `7xx`: the transaction has not reached a final state yet.
    #[must_use]
    pub const fn is_pending(self) -> bool {
        self.0 / 100 == 7
    }

    /// Any known group other than pending.
    #[must_use]
    pub const fn is_final(self) -> bool {
        matches!(self.0 / 100, 1 | 4 | 6 | 8)
    }
}

impl From<u16> for StatusCode {
    fn from(code: u16) -> Self {
        Self(code)
    }
}

impl From<StatusCode> for u16 {
    fn from(code: StatusCode) -> Self {
        code.0
    }
}

impl FromStr for StatusCode {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
