//! Integer-cent currency arithmetic.
//!
//! Every other engine module depends on these primitives: conversions between
//! dollars and cents, GST math, tolerant comparison, formatting and the
//! lenient parser used for user-typed amounts.

pub mod arithmetic;
pub mod format;
pub mod parse;

#[cfg(test)]
mod props;

pub use arithmetic::{
    DEFAULT_GST_RATE, ROUNDING, add_gst, budget_used_percent, calculate_gst_component,
    cents_equal, cents_to_dollars, decimal_to_cents, dollars_to_cents, remove_gst,
};
pub use format::{FormatOptions, format_currency};
pub use parse::parse_currency_input;
