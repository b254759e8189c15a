//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract. Scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Range   | Domain           | Description                              |
//! |---------|------------------|------------------------------------------|
//! | 0       | Universal        | Success                                  |
//! | 1       | Universal        | General error (unspecified)              |
//! | 2       | Universal        | CLI usage error (bad args, unknown format) |
//! | 3       | Universal        | IO error (read input, write report)      |
//! | 4-7     | data             | Sales data contract violations           |
//! | 8       | config           | Settings file errors                     |
//! | 9       | mail             | Composing or sending the report email    |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant in the appropriate range
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into the relevant command's error handling

use carsales_engine::SalesError;

// =============================================================================
// Universal (0-3)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, report format not inferable.
pub const EXIT_USAGE: u8 = 2;

/// IO error - input unreadable, report not writable.
pub const EXIT_IO: u8 = 3;

// =============================================================================
// Data (4-7)
// =============================================================================

/// Input is not valid JSON or a record has a missing/wrong-typed field.
pub const EXIT_DATA_SCHEMA: u8 = 4;

/// A price is not `$`-prefixed decimal text.
pub const EXIT_DATA_MALFORMED_PRICE: u8 = 5;

/// Input holds no records.
pub const EXIT_DATA_EMPTY: u8 = 6;

/// price × total_sales, or a model year's unit total, overflows.
pub const EXIT_DATA_OVERFLOW: u8 = 7;

// =============================================================================
// Config (8)
// =============================================================================

/// Settings file unreadable or invalid, or no recipient resolvable.
pub const EXIT_CONFIG: u8 = 8;

// =============================================================================
// Mail (9)
// =============================================================================

/// Bad address, attachment unreadable, sendmail missing or failed.
pub const EXIT_MAIL: u8 = 9;

/// Map a SalesError to its exit code.
pub fn sales_exit_code(err: &SalesError) -> u8 {
    match err {
        SalesError::Schema { .. } => EXIT_DATA_SCHEMA,
        SalesError::MalformedPrice { .. } => EXIT_DATA_MALFORMED_PRICE,
        SalesError::EmptyInput => EXIT_DATA_EMPTY,
        SalesError::RevenueOverflow { .. } | SalesError::SalesOverflow { .. } => {
            EXIT_DATA_OVERFLOW
        }
    }
}
