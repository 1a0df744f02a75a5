//! Command-line argument parsing helpers

use lazy_static::lazy_static;
use regex::Regex;

use crate::haar::errors::{HaarError, HaarResult};
use crate::haar::window::Window;

lazy_static! {
    static ref WINDOW_RE: Regex =
        Regex::new(r"^\s*(\d+)\s*,\s*(\d+)\s*,\s*(\d+)\s*,\s*(\d+)\s*$").expect("valid window pattern");
}

/// Parse a window string in the format "r,c,width,height"
///
/// # Arguments
/// * `window_str` - String such as "0,0,24,24"
///
/// # Returns
/// The parsed window or an error if the format is wrong
pub fn parse_window(window_str: &str) -> HaarResult<Window> {
    let caps = WINDOW_RE.captures(window_str).ok_or_else(|| {
        HaarError::GenericError(format!(
            "Invalid window format '{}'. Expected 'r,c,width,height'", window_str
        ))
    })?;

    let field = |i: usize| -> HaarResult<usize> {
        caps[i].parse::<usize>().map_err(|_| {
            HaarError::GenericError(format!("Window value '{}' is out of range", &caps[i]))
        })
    };

    Ok(Window::new(field(1)?, field(2)?, field(3)?, field(4)?))
}

/// Split a comma separated list of feature type tokens
///
/// Tokens are trimmed and empty entries dropped; validation happens in the
/// topology registry.
pub fn parse_type_list(types_str: &str) -> Vec<String> {
    types_str
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}
