//! Common test utilities for tabula-filters.
//!
//! Dataset builders shared by the integration and property tests.

#![allow(dead_code)]

use tabula_core::{Attribute, Dataset, Record, Schema, Value};

/// Assert a value is a number within `epsilon` of `expected`.
pub fn assert_number_eq(actual: &Value<f64>, expected: f64, epsilon: f64, context: &str) {
    match actual.as_number() {
        Some(value) => assert!(
            (value - expected).abs() < epsilon,
            "{}: Expected {} but got {}",
            context,
            expected,
            value
        ),
        None => panic!("{}: Expected {} but got {:?}", context, expected, actual),
    }
}

/// Label text of a nominal value, `None` when missing.
pub fn label_of(data: &Dataset<f64>, row: usize, column: usize) -> Option<String> {
    let domain = data.schema().kind(column)?.values()?;
    let index = data.value(row, column)?.as_category()?;
    domain.get(index).cloned()
}

/// A sensor log: time step, temperature, pressure and a nominal alarm class.
///
/// Temperature is `20 + step`, pressure is `1000 - step`, and the alarm is
/// `on` on even steps.
pub fn sensor_log(rows: usize) -> Dataset<f64> {
    let schema = Schema::from_attributes(vec![
        Attribute::numeric("step"),
        Attribute::numeric("temperature"),
        Attribute::numeric("pressure"),
        Attribute::nominal("alarm", ["off", "on"]),
    ])
    .unwrap()
    .with_class_index(3)
    .unwrap();

    let records = (0..rows)
        .map(|step| {
            let s = step as f64;
            Record::from_vec(vec![
                Value::Number(s),
                Value::Number(20.0 + s),
                Value::Number(1000.0 - s),
                Value::Category(usize::from(step % 2 == 0)),
            ])
        })
        .collect();

    Dataset::from_records(schema, records).unwrap()
}

/// A single numeric column holding `values`.
pub fn numeric_column(name: &str, values: &[f64]) -> Dataset<f64> {
    let schema = Schema::from_attributes(vec![Attribute::numeric(name)]).unwrap();
    let records = values.iter().map(|&v| Record::from_numbers(&[v])).collect();
    Dataset::from_records(schema, records).unwrap()
}
