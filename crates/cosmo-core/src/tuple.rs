//! Legacy delimited numeric tuples
//!
//! External configuration historically encodes cut parameters as a single
//! token such as `10:2` or `500,5,-100,100,1000`. Each token is a list of
//! decimal numbers separated by `:` or `,`.

use lazy_static::lazy_static;
use regex::Regex;

use crate::{CosmoError, CosmoResult};

/// Decimal number with optional sign, fraction and exponent
const NUMBER: &str = r"[+-]?(?:\d*\.)?\d+(?:[eE][-+]?\d+)?";

lazy_static! {
    static ref RE_TUPLE: Regex = Regex::new(&format!(r"^{NUMBER}(?:[:,]{NUMBER})*$"))
        .expect("numeric tuple pattern is valid");
    static ref RE_SEPARATOR: Regex = Regex::new("[:,]").expect("separator pattern is valid");
}

/// Parse `input` into exactly `arity` numbers.
///
/// `kind` names what is being built and is carried by the error together
/// with the offending token.
pub fn parse_numeric_tuple(input: &str, arity: usize, kind: &'static str) -> CosmoResult<Vec<f64>> {
    let token = input.trim();
    let failure = || CosmoError::Parse {
        kind,
        input: token.to_string(),
    };

    if !RE_TUPLE.is_match(token) {
        return Err(failure());
    }

    let values = RE_SEPARATOR
        .split(token)
        .map(|number| number.parse::<f64>().map_err(|_| failure()))
        .collect::<CosmoResult<Vec<_>>>()?;

    if values.len() != arity {
        return Err(failure());
    }
    Ok(values)
}

/// Convert a parsed number into a hit PMT count
pub fn to_pmt_count(value: f64) -> CosmoResult<u16> {
    if value.fract() == 0.0 && (0.0..=u16::MAX as f64).contains(&value) {
        Ok(value as u16)
    } else {
        Err(CosmoError::invalid("number of hit PMTs", value, ""))
    }
}
