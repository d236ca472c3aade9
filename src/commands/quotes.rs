//! `dayflow quotes` — print the celebration encouragement pool.

use crate::controller::QUOTES;

/// Print one encouragement line per row.
///
/// # Errors
///
/// Never fails; the signature matches the other command handlers.
pub fn run() -> Result<(), String> {
    for quote in QUOTES {
        println!("{quote}");
    }
    Ok(())
}
