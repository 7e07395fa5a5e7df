//! # Upload Command
//!
//! Appends every row of a CSV sheet to the session list.
//!
//! ```text
//! upload prices.csv
//!    │
//!    ├── read + decode + resolve columns   (pricedesk-io)
//!    │      └── rejected? → list unchanged, error shown
//!    │
//!    └── list.extend(rows, EntrySource::Upload)
//! ```
//!
//! Uploaded rows skip manual-entry validation; bad cells were already
//! turned into absent fields by the parser and default at compute time.

use std::path::Path;

use pricedesk_core::EntrySource;
use pricedesk_io::import_from_path;
use tracing::{debug, info};

use crate::error::CliError;
use crate::state::Session;

/// Uploads a sheet into the session.
pub fn upload_file(session: &mut Session, path: &Path) -> Result<String, CliError> {
    debug!(path = %path.display(), "upload command");

    let products = import_from_path(path)?;
    let count = products.len();
    session.list.extend(products, EntrySource::Upload);

    info!(count, total = session.list.len(), "upload appended");
    Ok(format!(
        "Uploaded {} products from {} ({} in list)",
        count,
        path.display(),
        session.list.len()
    ))
}
