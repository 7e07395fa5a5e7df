//! # Option Commands
//!
//! `vat` shows the VAT setting, `vat on` / `vat off` change it. Results
//! are recomputed on the next `show`, nothing is cached.

use tracing::debug;

use crate::error::CliError;
use crate::state::{parse_switch, Session};

/// Shows or sets VAT inclusion.
pub fn set_vat(session: &mut Session, arg: Option<&str>) -> Result<String, CliError> {
    debug!(?arg, "vat command");

    if let Some(raw) = arg {
        session.options.include_vat = parse_switch(raw)
            .ok_or_else(|| CliError::usage(format!("vat expects on or off, got '{}'", raw)))?;
    }

    Ok(if session.options.include_vat {
        "VAT is on (20%)".to_string()
    } else {
        "VAT is off".to_string()
    })
}
