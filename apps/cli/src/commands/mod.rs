//! # Commands Module
//!
//! Every action the shell and the one-shot mode can perform.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── product.rs  ◄─── add, edit, delete, clear, show, summary
//! ├── upload.rs   ◄─── CSV upload into the session
//! ├── export.rs   ◄─── CSV export of the session
//! ├── options.rs  ◄─── vat on / off
//! └── calc.rs     ◄─── one-shot file calculation
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  shell line:  "delete 1"                                               │
//! │         │                                                               │
//! │         │ (shell::parse_line)                                           │
//! │         ▼                                                               │
//! │  ShellCommand::Delete(vec![1])                                          │
//! │         │                                                               │
//! │         │ (shell::execute)                                              │
//! │         ▼                                                               │
//! │  fn delete_products(                                                    │
//! │      session: &mut Session,   ◄── only the state it needs              │
//! │      indices: &[usize],                                                 │
//! │  ) -> Result<String, CliError>                                          │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  "Deleted row 1: Widget"   or   "error: No product at row 1 (...)"     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod calc;
pub mod export;
pub mod options;
pub mod product;
pub mod upload;
