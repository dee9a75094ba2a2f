//! Miscellaneous text utilities shared by the loaders and formatters.

/// Ordinal formatting (`1st`, `2nd last`, `every`).
pub mod data_formatters;

/// Parsing of `YYYYMMDD` values and comma-separated records.
pub mod data_parsers;
