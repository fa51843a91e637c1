//! Parser for the GDS ASCII data response format.
//!
//! A hyperslab request like `prate[3:3][100:102][200:203]` comes back as a
//! labeled block followed by the map vectors:
//!
//! ```text
//! prate, [1][3][4]
//! [0][0], 1.0E-4, 2.0E-4, 0.0, 0.0
//! [0][1], 0.0, 0.0, 0.0, 0.0
//! [0][2], 0.0, 0.0, 9.999E20, 0.0
//!
//! time, [1]
//! 739123.25
//! ...
//! ```
//!
//! Coordinate requests (`?lat`) use the same shape with a 1D header.

use gfs_common::{ViewerError, ViewerResult};

/// Extract the values of `var` from an ASCII response body.
///
/// Returns the values in the order the server sends them (row-major over
/// the requested hyperslab) and verifies the count against the dimension
/// sizes declared in the block header.
pub fn parse_block(body: &str, var: &str) -> ViewerResult<Vec<f64>> {
    let mut lines = body.lines();

    // Find the block header: "var, [d1][d2]...".
    let expected = loop {
        let Some(line) = lines.next() else {
            return Err(ViewerError::DataUnavailable(format!(
                "response contains no data block for '{}'",
                var
            )));
        };
        let line = line.trim();
        if let Some(rest) = line.strip_prefix(var) {
            if let Some(dims) = rest.trim_start().strip_prefix(',') {
                if let Some(count) = parse_dim_sizes(dims.trim()) {
                    break count;
                }
            }
        }
    };

    let mut values = Vec::with_capacity(expected);
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            // Blocks are blank-line separated; stop at the end of ours.
            break;
        }
        let data = strip_row_label(line);
        for token in data.split(',') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            let value: f64 = token.parse().map_err(|_| {
                ViewerError::DataUnavailable(format!(
                    "unparseable value '{}' in '{}' block",
                    token, var
                ))
            })?;
            values.push(value);
        }
        if values.len() >= expected {
            break;
        }
    }

    if values.len() != expected {
        return Err(ViewerError::DataUnavailable(format!(
            "short read for '{}': expected {} values, got {}",
            var,
            expected,
            values.len()
        )));
    }

    Ok(values)
}

/// Parse "[1][3][4]" into the product of the sizes.
fn parse_dim_sizes(s: &str) -> Option<usize> {
    if !s.starts_with('[') {
        return None;
    }
    let mut product = 1usize;
    for part in s.split('[').skip(1) {
        let size: usize = part.strip_suffix(']')?.trim().parse().ok()?;
        product = product.checked_mul(size)?;
    }
    Some(product)
}

/// Strip the leading "[i][j]," row label from a data line, if present.
fn strip_row_label(line: &str) -> &str {
    let mut idx = 0;
    let bytes = line.as_bytes();
    while idx < bytes.len() && bytes[idx] == b'[' {
        match line[idx..].find(']') {
            Some(close) => idx += close + 1,
            None => return line,
        }
    }
    if idx == 0 {
        return line;
    }
    let rest = line[idx..].trim_start();
    rest.strip_prefix(',').map(|r| r.trim_start()).unwrap_or(rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: &str = "prate, [1][3][4]\n\
[0][0], 1.0E-4, 2.0E-4, 0.0, 0.0\n\
[0][1], 0.0, 0.0, 0.0, 0.0\n\
[0][2], 0.0, 0.0, 9.999E20, 0.0\n\
\n\
time, [1]\n\
739123.25\n\
\n\
lat, [3]\n\
-65.0, -64.75, -64.5\n\
\n\
lon, [4]\n\
50.0, 50.25, 50.5, 50.75\n";

    #[test]
    fn test_parse_window_block() {
        let values = parse_block(WINDOW, "prate").unwrap();
        assert_eq!(values.len(), 12);
        assert!((values[0] - 1.0e-4).abs() < 1e-12);
        assert!((values[10] - 9.999e20).abs() / 9.999e20 < 1e-6);
    }

    #[test]
    fn test_parse_map_vector_from_same_body() {
        let lat = parse_block(WINDOW, "lat").unwrap();
        assert_eq!(lat, vec![-65.0, -64.75, -64.5]);
        let lon = parse_block(WINDOW, "lon").unwrap();
        assert_eq!(lon.len(), 4);
    }

    #[test]
    fn test_coordinate_request() {
        let body = "lat, [5]\n-90.0, -89.75, -89.5, -89.25, -89.0\n";
        let lat = parse_block(body, "lat").unwrap();
        assert_eq!(lat.len(), 5);
        assert_eq!(lat[0], -90.0);
        assert_eq!(lat[4], -89.0);
    }

    #[test]
    fn test_short_read_detected() {
        let body = "prate, [1][2][2]\n[0][0], 1.0, 2.0\n";
        let err = parse_block(body, "prate").unwrap_err();
        assert!(err.to_string().contains("short read"));
    }

    #[test]
    fn test_missing_block() {
        let err = parse_block("lat, [2]\n0.0, 1.0\n", "prate").unwrap_err();
        assert!(err.to_string().contains("no data block"));
    }

    #[test]
    fn test_header_not_confused_by_prefix_names() {
        // "prate, ..." must not match a request for "pr"
        let err = parse_block(WINDOW, "pr").unwrap_err();
        assert!(err.to_string().contains("no data block"));
    }
}
