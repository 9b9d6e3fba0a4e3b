use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid region '{0}'. Expected 'TOP_LEFT:BOTTOM_RIGHT' (e.g., 'A1:C5').")]
    InvalidRegionFormat(String),

    #[error("Invalid --set format: '{0}'. Expected KEY=VALUE.")]
    InvalidKeyValue(String),

    #[error("Component '{component}' cannot be empty in '{input}'.")]
    EmptyComponent {
        component: &'static str,
        input: String,
    },
}

/// Splits a region span such as `A1:C5` into its two corner wells.
pub fn parse_region_span(input: &str) -> Result<(&str, &str), ParseError> {
    let (top_left, bottom_right) = input
        .split_once(':')
        .ok_or_else(|| ParseError::InvalidRegionFormat(input.to_string()))?;
    let (top_left, bottom_right) = (top_left.trim(), bottom_right.trim());
    if top_left.is_empty() {
        return Err(ParseError::EmptyComponent {
            component: "top-left",
            input: input.to_string(),
        });
    }
    if bottom_right.is_empty() {
        return Err(ParseError::EmptyComponent {
            component: "bottom-right",
            input: input.to_string(),
        });
    }
    if bottom_right.contains(':') {
        return Err(ParseError::InvalidRegionFormat(input.to_string()));
    }
    Ok((top_left, bottom_right))
}

/// Splits a `-S key=value` override at its first `=`.
pub fn parse_key_value(input: &str) -> Result<(&str, &str), ParseError> {
    let (key, value) = input
        .split_once('=')
        .ok_or_else(|| ParseError::InvalidKeyValue(input.to_string()))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(ParseError::EmptyComponent {
            component: "key",
            input: input.to_string(),
        });
    }
    Ok((key, value.trim()))
}
