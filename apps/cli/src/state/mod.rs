//! # State Module
//!
//! State the CLI carries between commands.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌──────────────────────────┐        ┌──────────────────────────────┐  │
//! │  │   AppConfig              │ seeds  │   Session                    │  │
//! │  │   (read-only)            │ ─────► │   (mutated by commands)      │  │
//! │  │   • VAT default          │        │   • ProductList              │  │
//! │  │   • export file          │        │   • CalculationOptions       │  │
//! │  │   • currency symbol      │        │                              │  │
//! │  └──────────────────────────┘        └──────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod session;

pub use config::{parse_switch, AppConfig};
pub use session::{example_product, Session};
