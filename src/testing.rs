//! Testing helpers.

use assert_float_eq::*;

use crate::ticket::TICKET_SIZE;

const RETURN_EPSILON: f64 = 1e-9;

/// Asserts that per-ticket returns match to within a relative error of [RETURN_EPSILON].
pub fn assert_returns(expected: &[f64; TICKET_SIZE], actual: &[f64; TICKET_SIZE]) {
    for (&expected, &actual) in expected.iter().zip(actual) {
        if actual != expected {
            assert_float_relative_eq!(expected, actual, RETURN_EPSILON);
        }
    }
}
