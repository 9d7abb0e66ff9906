//! Chemistry engine: element symbol → atomic number or name.
//!
//! Blank input is an unknown symbol, not a zero result.

use crate::error::Result;
use crate::result::{guarded, DomainErrorKind, MetricResult};
use crate::tables;

/// Atomic number of the element with this symbol (case-insensitive).
pub fn atomic_number(symbol: &str) -> MetricResult<u32> {
    guarded("atomic_number", || resolve(symbol))
}

/// English name of the element with this symbol (case-insensitive).
pub fn element_name(symbol: &str) -> MetricResult<String> {
    guarded("element_name", || {
        let z = resolve(symbol)?;
        tables::name_of(z)
            .map(str::to_string)
            .ok_or(DomainErrorKind::UnknownSymbol.into())
    })
}

fn resolve(symbol: &str) -> Result<u32> {
    tables::lookup_symbol(symbol).ok_or(DomainErrorKind::UnknownSymbol.into())
}
