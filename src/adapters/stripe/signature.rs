//! Stripe webhook signature verification.
//!
//! The `Stripe-Signature` header looks like `t=1492774577,v1=5257a8...,v0=...`.
//! Each `v1` is a hex HMAC-SHA256 of `"{t}.{raw body}"` keyed with the
//! endpoint secret. Several `v1` entries appear while a secret is rolled.

use {
    crate::domain::error::WebhookError,
    hmac::{Hmac, Mac},
    sha2::Sha256,
    subtle::ConstantTimeEq,
};

type HmacSha256 = Hmac<Sha256>;

pub const SIGNATURE_HEADER: &str = "stripe-signature";
pub const DEFAULT_TOLERANCE_SECS: i64 = 300;

const EXPECTED_SCHEME: &str = "v1";

#[derive(Debug, PartialEq, Eq)]
pub struct SignatureHeader<'a> {
    pub timestamp: i64,
    pub signatures: Vec<&'a str>,
}

impl<'a> SignatureHeader<'a> {
    pub fn parse(header: &'a str) -> Result<Self, WebhookError> {
        let mut timestamp = None;
        let mut signatures = Vec::new();

        for item in header.split(',') {
            let Some((key, value)) = item.split_once('=') else {
                continue;
            };
            match key {
                "t" => timestamp = value.parse::<i64>().ok(),
                EXPECTED_SCHEME => signatures.push(value),
                _ => {}
            }
        }

        let Some(timestamp) = timestamp else {
            return Err(WebhookError::Signature(
                "Unable to extract timestamp and signatures from header".into(),
            ));
        };
        if signatures.is_empty() {
            return Err(WebhookError::Signature(
                "No signatures found with expected scheme".into(),
            ));
        }

        Ok(Self {
            timestamp,
            signatures,
        })
    }
}

fn mac_for(payload: &[u8], timestamp: i64, secret: &str) -> Result<HmacSha256, WebhookError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| WebhookError::Signature(format!("invalid webhook secret: {e}")))?;
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    Ok(mac)
}

/// Hex `v1` signature for `payload` signed at `timestamp`.
pub fn compute_signature(
    payload: &[u8],
    timestamp: i64,
    secret: &str,
) -> Result<String, WebhookError> {
    let mac = mac_for(payload, timestamp, secret)?;
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// A complete `Stripe-Signature` header value, for local tooling and tests.
pub fn signature_header(
    payload: &[u8],
    secret: &str,
    timestamp: i64,
) -> Result<String, WebhookError> {
    let signature = compute_signature(payload, timestamp, secret)?;
    Ok(format!("t={timestamp},{EXPECTED_SCHEME}={signature}"))
}

/// Verify `payload` against the header. A `tolerance_secs` of zero disables
/// the age check; timestamps in the future are accepted.
pub fn verify_signature(
    payload: &[u8],
    header: &str,
    secret: &str,
    tolerance_secs: i64,
    now: i64,
) -> Result<(), WebhookError> {
    let header = SignatureHeader::parse(header)?;
    let expected = mac_for(payload, header.timestamp, secret)?
        .finalize()
        .into_bytes();

    let matched = header.signatures.iter().any(|candidate| {
        hex::decode(candidate)
            .map(|bytes| {
                bytes.len() == expected.len() && bool::from(bytes.ct_eq(expected.as_slice()))
            })
            .unwrap_or(false)
    });

    if !matched {
        return Err(WebhookError::Signature(
            "No signatures found matching the expected signature for payload".into(),
        ));
    }

    if tolerance_secs > 0 && now.saturating_sub(header.timestamp) > tolerance_secs {
        return Err(WebhookError::Signature(
            "Timestamp outside the tolerance zone".into(),
        ));
    }

    Ok(())
}
