//! Unified error codes for the Tavern backend
//!
//! This module defines all error codes used across the server and clients.
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: User errors
//! - 4xxx: Reservation errors
//! - 5xxx: Billing errors
//! - 6xxx: Menu errors
//! - 7xxx: Table errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Account is disabled
    AccountDisabled = 1005,
    /// OAuth2 state parameter mismatch or expired
    OAuthStateMismatch = 1006,
    /// OAuth2 code exchange with the provider failed
    OAuthExchangeFailed = 1007,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Admin role required
    AdminRequired = 2002,

    // ==================== 3xxx: User ====================
    /// User not found
    UserNotFound = 3001,
    /// User email already in use
    EmailExists = 3002,
    /// User is already disabled
    UserAlreadyDisabled = 3003,

    // ==================== 4xxx: Reservation ====================
    /// Reservation not found
    ReservationNotFound = 4001,
    /// Reservation must be booked at least one day in advance
    ReservationTooSoon = 4002,
    /// Reservation falls outside business hours
    OutsideBusinessHours = 4003,
    /// Table is already reserved in the requested window
    TableAlreadyReserved = 4004,
    /// User already has a reservation at this time
    UserDoubleBooked = 4005,
    /// Guest email already has a reservation at this time
    GuestDoubleBooked = 4006,
    /// Reservation needs a user or complete guest contact details
    GuestContactRequired = 4007,

    // ==================== 5xxx: Billing ====================
    /// Bill not found
    BillNotFound = 5001,
    /// Reservation already has a bill
    BillExists = 5002,
    /// Transaction amount exceeds the bill's final amount
    InsufficientFunds = 5003,
    /// Transaction not found
    TransactionNotFound = 5004,
    /// Bill has recorded transactions
    BillHasTransactions = 5005,
    /// Amount is not a valid monetary value
    InvalidAmount = 5006,

    // ==================== 6xxx: Menu ====================
    /// Menu not found
    MenuNotFound = 6001,
    /// Menu name already exists
    MenuNameExists = 6002,
    /// Menu item not found
    MenuItemNotFound = 6101,

    // ==================== 7xxx: Table ====================
    /// Dining table not found
    TableNotFound = 7001,
    /// Dining table name already exists
    TableNameExists = 7002,
    /// Dining table has active reservations
    TableHasReservations = 7003,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Network error
    NetworkError = 9003,
    /// Configuration error
    ConfigError = 9004,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid email or password",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",
            ErrorCode::AccountDisabled => "Account is disabled",
            ErrorCode::OAuthStateMismatch => "OAuth2 state is invalid or expired",
            ErrorCode::OAuthExchangeFailed => "OAuth2 code exchange failed",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::AdminRequired => "Administrator role is required",

            // User
            ErrorCode::UserNotFound => "User not found",
            ErrorCode::EmailExists => "Email already in use",
            ErrorCode::UserAlreadyDisabled => "User is already disabled",

            // Reservation
            ErrorCode::ReservationNotFound => "Reservation not found",
            ErrorCode::ReservationTooSoon => {
                "Reservation time must be at least the next day"
            }
            ErrorCode::OutsideBusinessHours => "Reservation time is outside business hours",
            ErrorCode::TableAlreadyReserved => "Table is already reserved at that time",
            ErrorCode::UserDoubleBooked => "User already has a reservation at this time",
            ErrorCode::GuestDoubleBooked => {
                "Guest with this email already has a reservation at this time"
            }
            ErrorCode::GuestContactRequired => {
                "Reservation requires a user or guest name and email"
            }

            // Billing
            ErrorCode::BillNotFound => "Bill not found",
            ErrorCode::BillExists => "Reservation already has a bill",
            ErrorCode::InsufficientFunds => "Insufficient funds",
            ErrorCode::TransactionNotFound => "Transaction not found",
            ErrorCode::BillHasTransactions => "Bill has recorded transactions",
            ErrorCode::InvalidAmount => "Amount is not a valid monetary value",

            // Menu
            ErrorCode::MenuNotFound => "Menu not found",
            ErrorCode::MenuNameExists => "Menu name already exists",
            ErrorCode::MenuItemNotFound => "Menu item not found",

            // Table
            ErrorCode::TableNotFound => "Dining table not found",
            ErrorCode::TableNameExists => "Dining table name already exists",
            ErrorCode::TableHasReservations => "Dining table has active reservations",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),
            1005 => Ok(ErrorCode::AccountDisabled),
            1006 => Ok(ErrorCode::OAuthStateMismatch),
            1007 => Ok(ErrorCode::OAuthExchangeFailed),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::AdminRequired),

            // User
            3001 => Ok(ErrorCode::UserNotFound),
            3002 => Ok(ErrorCode::EmailExists),
            3003 => Ok(ErrorCode::UserAlreadyDisabled),

            // Reservation
            4001 => Ok(ErrorCode::ReservationNotFound),
            4002 => Ok(ErrorCode::ReservationTooSoon),
            4003 => Ok(ErrorCode::OutsideBusinessHours),
            4004 => Ok(ErrorCode::TableAlreadyReserved),
            4005 => Ok(ErrorCode::UserDoubleBooked),
            4006 => Ok(ErrorCode::GuestDoubleBooked),
            4007 => Ok(ErrorCode::GuestContactRequired),

            // Billing
            5001 => Ok(ErrorCode::BillNotFound),
            5002 => Ok(ErrorCode::BillExists),
            5003 => Ok(ErrorCode::InsufficientFunds),
            5004 => Ok(ErrorCode::TransactionNotFound),
            5005 => Ok(ErrorCode::BillHasTransactions),
            5006 => Ok(ErrorCode::InvalidAmount),

            // Menu
            6001 => Ok(ErrorCode::MenuNotFound),
            6002 => Ok(ErrorCode::MenuNameExists),
            6101 => Ok(ErrorCode::MenuItemNotFound),

            // Table
            7001 => Ok(ErrorCode::TableNotFound),
            7002 => Ok(ErrorCode::TableNameExists),
            7003 => Ok(ErrorCode::TableHasReservations),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::NetworkError),
            9004 => Ok(ErrorCode::ConfigError),

            other => Err(InvalidErrorCode(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_roundtrip() {
        for code in [
            ErrorCode::Success,
            ErrorCode::ValidationFailed,
            ErrorCode::InvalidCredentials,
            ErrorCode::TableAlreadyReserved,
            ErrorCode::InsufficientFunds,
            ErrorCode::MenuItemNotFound,
            ErrorCode::DatabaseError,
        ] {
            let raw: u16 = code.into();
            assert_eq!(ErrorCode::try_from(raw), Ok(code));
        }
    }

    #[test]
    fn test_invalid_code_rejected() {
        assert_eq!(ErrorCode::try_from(4242), Err(InvalidErrorCode(4242)));
    }

    #[test]
    fn test_messages_are_nonempty() {
        assert!(!ErrorCode::ReservationTooSoon.message().is_empty());
        assert_eq!(
            ErrorCode::TableAlreadyReserved.message(),
            "Table is already reserved at that time"
        );
    }
}
