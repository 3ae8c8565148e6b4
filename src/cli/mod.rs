//! Terminal front end: one module per subcommand plus shared styling.

pub mod convert;
pub mod rates;
pub mod setup;
pub mod ui;
