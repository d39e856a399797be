//! UPI payment links.
//!
//! The QR code shown at checkout encodes a `upi://pay` URI. Rendering the
//! QR image is left to the page; this module only builds the URI.

use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Errors building a payment URI.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PaymentError {
    /// Nothing to pay.
    #[error("payment amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    /// The payee's virtual payment address is unusable.
    #[error("invalid UPI address: {0:?}")]
    InvalidVpa(String),
}

/// Who receives the payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpiPayee {
    /// Virtual payment address, e.g. `shop@bank`.
    pub vpa: String,
    /// Name shown in the payer's app.
    pub name: String,
}

impl UpiPayee {
    /// Default payee display name.
    pub const DEFAULT_NAME: &'static str = "QuickMetroBITES";

    /// Create a payee, checking the address has the `handle@provider` shape.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentError::InvalidVpa`] if `vpa` lacks a non-empty part
    /// on either side of a single `@`, or contains whitespace.
    pub fn new(vpa: impl Into<String>, name: impl Into<String>) -> Result<Self, PaymentError> {
        let vpa = vpa.into();
        let valid = match vpa.split_once('@') {
            Some((handle, provider)) => {
                !handle.is_empty()
                    && !provider.is_empty()
                    && !provider.contains('@')
                    && !vpa.chars().any(char::is_whitespace)
            }
            None => false,
        };
        if !valid {
            return Err(PaymentError::InvalidVpa(vpa));
        }
        Ok(Self {
            vpa,
            name: name.into(),
        })
    }

    /// Build the `upi://pay` URI for `amount` rupees.
    ///
    /// The amount is rounded half-up to paise and the payee name is
    /// percent-encoded.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentError::NonPositiveAmount`] if `amount <= 0`.
    pub fn payment_uri(&self, amount: Decimal) -> Result<String, PaymentError> {
        if amount <= Decimal::ZERO {
            return Err(PaymentError::NonPositiveAmount(amount));
        }
        Ok(format!(
            "upi://pay?pa={}&pn={}&am={:.2}&cu=INR",
            self.vpa,
            urlencoding::encode(&self.name),
            amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn payee() -> UpiPayee {
        UpiPayee::new("metro@okbank", UpiPayee::DEFAULT_NAME).unwrap()
    }

    #[test]
    fn test_payment_uri() {
        assert_eq!(
            payee().payment_uri(Decimal::from(40)).unwrap(),
            "upi://pay?pa=metro@okbank&pn=QuickMetroBITES&am=40.00&cu=INR"
        );
    }

    #[test]
    fn test_payment_uri_encodes_name_and_rounds() {
        let payee = UpiPayee::new("metro@okbank", "Metro Bites & Co").unwrap();
        assert_eq!(
            payee.payment_uri(Decimal::new(12_345, 3)).unwrap(),
            "upi://pay?pa=metro@okbank&pn=Metro%20Bites%20%26%20Co&am=12.35&cu=INR"
        );
    }

    #[test]
    fn test_zero_amount_rejected() {
        assert_eq!(
            payee().payment_uri(Decimal::ZERO),
            Err(PaymentError::NonPositiveAmount(Decimal::ZERO))
        );
    }

    #[test]
    fn test_invalid_vpa() {
        for vpa in ["", "no-at", "@bank", "shop@", "a@b@c", "sh op@bank"] {
            assert!(
                matches!(UpiPayee::new(vpa, "x"), Err(PaymentError::InvalidVpa(_))),
                "{vpa} should be rejected"
            );
        }
    }
}
