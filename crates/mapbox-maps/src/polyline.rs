//! Encoded polyline algorithm.
//!
//! Coordinates are `[latitude, longitude]` pairs. Each value is scaled by
//! `10^precision`, rounded half away from zero, delta-encoded against the
//! previous point and written as 5-bit chunks offset by 63.

use mapbox_core::{Error, ParamValue};

/// Precision used by the Static Images API.
pub const DEFAULT_PRECISION: u32 = 5;

/// Encode `[lat, lng]` pairs with precision 5.
#[must_use]
pub fn encode(coordinates: &[[f64; 2]]) -> String {
    encode_with_precision(coordinates, DEFAULT_PRECISION)
}

/// Encode `[lat, lng]` pairs with the given number of decimal places.
///
/// Values outside the range of an `i64` once scaled are clamped to it.
#[must_use]
pub fn encode_with_precision(coordinates: &[[f64; 2]], precision: u32) -> String {
    let factor = 10_f64.powi(i32::try_from(precision).unwrap_or(i32::MAX));
    let mut output = String::new();
    let mut previous = [0_i64; 2];

    for pair in coordinates {
        for (axis, value) in pair.iter().enumerate() {
            let scaled = round_half_away(value * factor);
            write_signed(&mut output, scaled.saturating_sub(previous[axis]));
            previous[axis] = scaled;
        }
    }
    output
}

/// Encode loosely-typed arguments: each must be a list of two numbers.
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] for any argument that is not a `[lat, lng]`
/// pair with latitude in ±90 and longitude in ±180.
pub fn encode_args(args: &[ParamValue]) -> Result<String, Error> {
    let coordinates = args
        .iter()
        .map(|arg| match arg.as_list() {
            Some([lat, lng]) => match (lat.as_f64(), lng.as_f64()) {
                (Some(lat), Some(lng)) if in_range(lat, lng) => Ok([lat, lng]),
                _ => Err(invalid_pair(arg)),
            },
            _ => Err(invalid_pair(arg)),
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(encode(&coordinates))
}

fn in_range(lat: f64, lng: f64) -> bool {
    (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng)
}

fn invalid_pair(arg: &ParamValue) -> Error {
    Error::InvalidParameter(format!("Entered {arg}...Lat/Long coordinate pair"))
}

#[allow(clippy::cast_possible_truncation)]
fn round_half_away(value: f64) -> i64 {
    (value.abs() + 0.5).floor().copysign(value) as i64
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn write_signed(output: &mut String, value: i64) {
    let mut bits = (value << 1) as u64;
    if value < 0 {
        bits = !bits;
    }
    while bits >= 0x20 {
        output.push(char::from((0x20 | (bits & 0x1f)) as u8 + 63));
        bits >>= 5;
    }
    output.push(char::from(bits as u8 + 63));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_reference_line() {
        let line = [[38.5, -120.2], [40.7, -120.95], [43.252, -126.453]];
        assert_eq!(encode(&line), "_p~iF~ps|U_ulLnnqC_mqNvxq`@");
    }

    #[test]
    fn empty_input_encodes_to_empty_string() {
        assert_eq!(encode(&[]), "");
    }

    #[test]
    fn origin_encodes_to_question_marks() {
        assert_eq!(encode(&[[0.0, 0.0]]), "??");
    }

    #[test]
    fn precision_six() {
        assert_eq!(encode_with_precision(&[[0.000_001, 0.0]], 6), "A?");
    }

    #[test]
    fn encode_args_validates_pairs() {
        let args = vec![
            ParamValue::list([38.5, -120.2]),
            ParamValue::list([40.7, -120.95]),
            ParamValue::list([43.252, -126.453]),
        ];
        assert_eq!(encode_args(&args).unwrap(), "_p~iF~ps|U_ulLnnqC_mqNvxq`@");

        let err = encode_args(&[ParamValue::list([1.0])]).unwrap_err();
        assert_eq!(err.to_string(), "Entered 1...Lat/Long coordinate pair");
        assert!(encode_args(&[ParamValue::from("38.5,-120.2")]).is_err());
    }

    #[test]
    fn encode_args_rejects_out_of_range_coordinates() {
        let args = [ParamValue::list([1e300, 0.0]), ParamValue::list([-1e300, 0.0])];
        let err = encode_args(&args).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)));
        assert!(encode_args(&[ParamValue::list([90.5, 0.0])]).is_err());
        assert!(encode_args(&[ParamValue::list([0.0, -180.5])]).is_err());
        assert!(encode_args(&[ParamValue::list([f64::NAN, 0.0])]).is_err());
        assert_eq!(
            encode_args(&[ParamValue::list([90.0, -180.0])]).unwrap(),
            encode(&[[90.0, -180.0]])
        );
    }

    #[test]
    fn huge_values_do_not_overflow() {
        let encoded = encode(&[[1e300, 0.0], [-1e300, 0.0]]);
        assert!(encoded.ends_with('?'));
    }
}
