extern crate ndarray;

use std::io;
use std::io::Write;

use ndarray::*;

use crate::flat_index::*;
use crate::params::*;

///Formats `value` as a C-style `%.7E`: seven decimals, upper-case exponent
///marker, explicit exponent sign and at least two exponent digits.
pub fn format_grid_value(value : f64) -> String {
    let formatted = format!("{:.7E}", value);
    match formatted.find('E') {
        Some(split) => {
            let mantissa = &formatted[..split];
            let exponent : i32 = formatted[split + 1..].parse().unwrap_or(0);
            let sign = if (exponent < 0) { '-' } else { '+' };
            format!("{}E{}{:02}", mantissa, sign, exponent.abs())
        },
        None => formatted.to_uppercase()
    }
}

fn write_row<W : Write, T, F : Fn(&T) -> String>(out : &mut W, entries : &[T], format : F) -> io::Result<()> {
    for entry in entries {
        write!(out, "{} ", format(entry))?;
    }
    writeln!(out)
}

///Writes one `lhagrid1` member holding a single subgrid. `values` is a flat
///(flavour-major) vector over `flavours` x `xgrid`; the same values are
///written at every scale in `scales`.
pub fn write_member<W : Write>(out : &mut W, member : usize, xgrid : &[f64], scales : &[f64],
                               flavours : &[i32], values : ArrayView1<f64>) -> io::Result<()> {
    let layout = FlatLayout::new(flavours.len(), xgrid.len());
    if (values.len() != layout.flat_dim()) {
        return Err(io::Error::new(io::ErrorKind::InvalidInput,
                                  format!("member {} has {} values, expected {}", member, values.len(), layout.flat_dim())));
    }

    write!(out, "PdfType: replica\nFormat: {}\nFromMCReplica: {}\n{}\n", GRID_FORMAT_NAME, member, BLOCK_SEPARATOR)?;
    write_row(out, xgrid, |x| format_grid_value(*x))?;
    write_row(out, scales, |q| format_grid_value(*q))?;
    write_row(out, flavours, |f| f.to_string())?;

    for x_position in 0..xgrid.len() {
        for _ in scales {
            for channel_position in 0..flavours.len() {
                let point = values[[layout.flatten(channel_position, x_position),]];
                write!(out, "{} ", format_grid_value(point))?;
            }
            writeln!(out)?;
        }
    }
    writeln!(out, "{}", BLOCK_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_use_two_digit_signed_exponents() {
        assert_eq!(format_grid_value(0.001), "1.0000000E-03");
        assert_eq!(format_grid_value(1.0), "1.0000000E+00");
        assert_eq!(format_grid_value(1.65), "1.6500000E+00");
        assert_eq!(format_grid_value(-123456.789), "-1.2345679E+05");
        assert_eq!(format_grid_value(0.0), "0.0000000E+00");
        assert_eq!(format_grid_value(1e-120), "1.0000000E-120");
    }

    #[test]
    fn member_layout_is_x_then_scale_then_flavour() {
        let xgrid = [0.1, 1.0];
        let scales = [1.64, 1.66];
        let flavours = [21, 1];
        //flavour-major: g(0.1), g(1.0), u(0.1), u(1.0)
        let values = arr1(&[1.0, 2.0, 3.0, 4.0]);
        let mut out = Vec::new();
        write_member(&mut out, 3, &xgrid, &scales, &flavours, values.view()).unwrap();

        let expected = "PdfType: replica\n\
                        Format: lhagrid1\n\
                        FromMCReplica: 3\n\
                        ---\n\
                        1.0000000E-01 1.0000000E+00 \n\
                        1.6400000E+00 1.6600000E+00 \n\
                        21 1 \n\
                        1.0000000E+00 3.0000000E+00 \n\
                        1.0000000E+00 3.0000000E+00 \n\
                        2.0000000E+00 4.0000000E+00 \n\
                        2.0000000E+00 4.0000000E+00 \n\
                        ---\n";
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }

    #[test]
    fn wrong_value_count_is_refused() {
        let mut out = Vec::new();
        let values = arr1(&[1.0, 2.0, 3.0]);
        assert!(write_member(&mut out, 0, &[0.1, 1.0], &[1.0], &[21, 1], values.view()).is_err());
    }
}
