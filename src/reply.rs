//! Reply shaping: how catalog outcomes are presented to RPC callers.
//!
//! A deployment picks exactly one [`ReplyConvention`]:
//!
//! - **Status**: success returns the bare value; failure is an out-of-band
//!   [`Fault`] (`NOT_FOUND` or `INTERNAL`) carrying a message.
//! - **Envelope**: every reply is an [`Envelope`] with `success`, `message`
//!   and an optional payload; the call itself never fails.
//!
//! The [`PricePolicy`] rides along with the convention so that price
//! coercion is a named, testable choice rather than a hard-coded `floor`.

use std::fmt;

use clap::ValueEnum;
use serde::Serialize;

use crate::service::MenuError;

/// Which reply shape a deployment serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReplyConvention {
    /// Bare values, out-of-band error status (`menu.RestaurantService`).
    Status,
    /// `{success, message, payload}` replies (`menu.MenuService`).
    Envelope,
}

impl fmt::Display for ReplyConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplyConvention::Status => f.write_str("status"),
            ReplyConvention::Envelope => f.write_str("envelope"),
        }
    }
}

/// How prices are coerced on the way into and out of the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PricePolicy {
    /// Floor to a whole number on every write and read.
    Truncate,
    /// Keep the decimal value as given.
    Preserve,
}

impl PricePolicy {
    pub fn apply(self, price: f64) -> f64 {
        match self {
            PricePolicy::Truncate => price.floor(),
            PricePolicy::Preserve => price,
        }
    }
}

impl fmt::Display for PricePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricePolicy::Truncate => f.write_str("truncate"),
            PricePolicy::Preserve => f.write_str("preserve"),
        }
    }
}

/// The complete reply contract of one service instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplyPolicy {
    pub convention: ReplyConvention,
    pub prices: PricePolicy,
}

impl ReplyPolicy {
    /// `prices` falls back to the convention's customary policy: integral
    /// prices for status replies, exact prices for envelopes.
    pub fn new(convention: ReplyConvention, prices: Option<PricePolicy>) -> Self {
        let prices = prices.unwrap_or(match convention {
            ReplyConvention::Status => PricePolicy::Truncate,
            ReplyConvention::Envelope => PricePolicy::Preserve,
        });
        Self { convention, prices }
    }
}

/// Out-of-band failure class under the status convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultCode {
    NotFound,
    Internal,
}

/// An out-of-band failure: code plus human-readable message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fault {
    pub code: FaultCode,
    /// [`MenuError::kind`] of the failure.
    pub kind: &'static str,
    pub message: String,
}

impl From<&MenuError> for Fault {
    fn from(err: &MenuError) -> Self {
        let code = match err {
            MenuError::NotFound(_) => FaultCode::NotFound,
            MenuError::Validation(_) | MenuError::Store(_) => FaultCode::Internal,
        };
        Fault {
            code,
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl From<MenuError> for Fault {
    fn from(err: MenuError) -> Self {
        Fault::from(&err)
    }
}

/// In-band reply shape: callers must inspect `success`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub message: String,
    pub payload: Option<T>,
}

impl<T> Envelope<T> {
    pub fn ok(payload: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            payload: Some(payload),
        }
    }

    pub fn failed(err: &MenuError) -> Self {
        Self {
            success: false,
            message: err.to_string(),
            payload: None,
        }
    }

    /// Fold a catalog outcome into an envelope; `message` is used on success.
    pub fn from_result(result: Result<T, MenuError>, message: &str) -> Self {
        match result {
            Ok(payload) => Self::ok(payload, message),
            Err(err) => Self::failed(&err),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Envelope<U> {
        Envelope {
            success: self.success,
            message: self.message,
            payload: self.payload.map(f),
        }
    }
}
