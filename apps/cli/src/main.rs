//! # PriceDesk Entry Point
//!
//! ## Startup Sequence
//! 1. Parse arguments
//! 2. Initialize tracing (stderr)
//! 3. Load configuration (environment, then flags)
//! 4. Run `calc` once, or start the interactive shell

use std::process::ExitCode;

fn main() -> ExitCode {
    // The actual setup is in lib.rs for testability
    pricedesk_cli::run()
}
