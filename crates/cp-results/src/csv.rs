//! Trajectory CSV export.
//!
//! One row per recorded snapshot. Time is written with three decimals, every
//! other column with the float's plain `Display` form.

use std::fmt::Write as _;
use std::path::Path;

use cp_core::Real;
use cp_sim::SimRecord;

use crate::ResultsResult;

pub const SINGLE_POLE_HEADER: &str = "time,theta";
pub const DOUBLE_POLE_HEADER: &str = "time,x,theta1,theta2";

/// `time,theta` rows for a single-pole run.
pub fn single_pole_csv<T: Real>(record: &SimRecord<T, 4>) -> String {
    let mut out = String::with_capacity(16 * (record.len() + 1));
    out.push_str(SINGLE_POLE_HEADER);
    out.push('\n');
    for (t, s) in record.t.iter().zip(&record.x) {
        // Writing into a String cannot fail.
        let _ = writeln!(out, "{t:.3},{}", s[2]);
    }
    out
}

/// `time,x,theta1,theta2` rows for a double-pole run.
pub fn double_pole_csv<T: Real>(record: &SimRecord<T, 6>) -> String {
    let mut out = String::with_capacity(32 * (record.len() + 1));
    out.push_str(DOUBLE_POLE_HEADER);
    out.push('\n');
    for (t, s) in record.t.iter().zip(&record.x) {
        let _ = writeln!(out, "{t:.3},{},{},{}", s[0], s[2], s[4]);
    }
    out
}

pub fn write_csv(path: &Path, content: &str) -> ResultsResult<()> {
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_pole_rows() {
        let record = SimRecord {
            t: vec![0.0, 1.0 / 6.0],
            x: vec![[0.0, 0.0, 1.5, 0.0], [0.1, 0.2, 1.25, 0.4]],
        };
        assert_eq!(single_pole_csv(&record), "time,theta\n0.000,1.5\n0.167,1.25\n");
    }

    #[test]
    fn double_pole_rows_skip_velocities() {
        let record = SimRecord {
            t: vec![0.25f32],
            x: vec![[0.5, 9.0, 1.0, 9.0, -2.0, 9.0]],
        };
        assert_eq!(double_pole_csv(&record), "time,x,theta1,theta2\n0.250,0.5,1,-2\n");
    }

    #[test]
    fn empty_record_is_header_only() {
        let record: SimRecord<f64, 4> = SimRecord {
            t: vec![],
            x: vec![],
        };
        assert_eq!(single_pole_csv(&record), "time,theta\n");
    }

    #[test]
    fn non_finite_values_are_written_verbatim() {
        let record = SimRecord {
            t: vec![0.0],
            x: vec![[0.0, 0.0, f64::NAN, 0.0]],
        };
        assert_eq!(single_pole_csv(&record), "time,theta\n0.000,NaN\n");
    }
}
