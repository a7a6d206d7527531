use std::fmt;

use phonenumber::country;

use crate::domain::validation::ValidationError;

/// Per-message `status` value Nexmo uses for an accepted message.
pub const STATUS_OK: &str = "0";

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Phone number in the international format Nexmo expects for `to` and numeric `from`
/// (E.164 digits without the leading `+`).
///
/// Invariant: parsed and normalized by the `phonenumber` crate.
pub struct Msisdn(String);

impl Msisdn {
    /// Form field name used by Nexmo (`to`).
    pub const FIELD: &'static str = "to";

    /// Parse a phone number and normalize it.
    ///
    /// `default_region` is used when the input does not contain an explicit country prefix.
    pub fn parse(
        default_region: Option<country::Id>,
        input: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let input = input.into();
        let raw = input.trim();
        if raw.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }

        let parsed = phonenumber::parse(default_region, raw).map_err(|_| {
            ValidationError::InvalidPhoneNumber {
                input: raw.to_owned(),
            }
        })?;

        let e164 = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string();

        Ok(Self(e164.trim_start_matches('+').to_owned()))
    }

    /// Borrow the normalized digits.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Msisdn {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Msisdn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Nexmo per-message status code.
///
/// This value is preserved as-is even when the code is unknown to this crate.
pub struct StatusCode(u16);

impl StatusCode {
    /// Construct a status code from its integer representation.
    pub fn new(code: u16) -> Self {
        Self(code)
    }

    /// Parse the string form Nexmo puts on the wire (`"0"`, `"4"`, ...).
    pub fn parse(value: &str) -> Option<Self> {
        value.trim().parse::<u16>().ok().map(Self)
    }

    /// Get the integer code as provided by Nexmo.
    pub fn as_u16(self) -> u16 {
        self.0
    }

    /// Map this code to a known status code variant, if one exists.
    pub fn known_kind(self) -> Option<KnownStatusCode> {
        KnownStatusCode::from_code(self.0)
    }

    /// Returns `true` for `0`, the only code meaning the message was accepted.
    pub fn is_success(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if this status code is considered retryable by the crate.
    pub fn is_retryable(self) -> bool {
        matches!(self.known_kind(), Some(kind) if kind.is_retryable())
    }

    /// Returns `true` if this status code represents an authentication/authorization error.
    pub fn is_auth_error(self) -> bool {
        matches!(self.known_kind(), Some(kind) if kind.is_auth_error())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
/// Documented Nexmo SMS API status codes.
///
/// Unknown codes are preserved as [`StatusCode`] and return `None` from [`KnownStatusCode::from_code`].
pub enum KnownStatusCode {
    Success,
    Throttled,
    MissingParams,
    InvalidParams,
    InvalidCredentials,
    InternalError,
    InvalidMessage,
    NumberBarred,
    PartnerAccountBarred,
    PartnerQuotaViolation,
    TooManyExistingBinds,
    AccountNotEnabledForHttp,
    MessageTooLong,
    InvalidSignature,
    InvalidSenderAddress,
    InvalidNetworkCode,
    InvalidCallbackUrl,
    NonWhitelistedDestination,
    SignatureAndApiSecretDisallowed,
    NumberDeactivated,
}

impl KnownStatusCode {
    /// Convert a raw Nexmo integer code into a known variant.
    pub fn from_code(code: u16) -> Option<Self> {
        Some(match code {
            0 => Self::Success,
            1 => Self::Throttled,
            2 => Self::MissingParams,
            3 => Self::InvalidParams,
            4 => Self::InvalidCredentials,
            5 => Self::InternalError,
            6 => Self::InvalidMessage,
            7 => Self::NumberBarred,
            8 => Self::PartnerAccountBarred,
            9 => Self::PartnerQuotaViolation,
            10 => Self::TooManyExistingBinds,
            11 => Self::AccountNotEnabledForHttp,
            12 => Self::MessageTooLong,
            14 => Self::InvalidSignature,
            15 => Self::InvalidSenderAddress,
            22 => Self::InvalidNetworkCode,
            23 => Self::InvalidCallbackUrl,
            29 => Self::NonWhitelistedDestination,
            32 => Self::SignatureAndApiSecretDisallowed,
            33 => Self::NumberDeactivated,
            _ => return None,
        })
    }

    /// Whether this status is likely transient and can be retried.
    pub fn is_retryable(self) -> bool {
        matches!(self, Self::Throttled | Self::InternalError)
    }

    /// Whether this status indicates invalid credentials or a disabled account.
    pub fn is_auth_error(self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials
                | Self::InvalidSignature
                | Self::SignatureAndApiSecretDisallowed
                | Self::AccountNotEnabledForHttp
        )
    }
}
