use std::error::Error;
use std::path::Path;

use csv::Reader;

use common::constants::N_AXES;

/// Column holding each accelerometer axis in a recorded trace.
#[derive(Debug, Clone, Copy)]
pub enum CsvFileColumn {
    Timestamp,
    XAccel,
    YAccel,
    ZAccel,
}

impl From<CsvFileColumn> for usize {
    fn from(value: CsvFileColumn) -> Self {
        value as usize
    }
}

/// Loads every row of a CSV file (with header) as `f64` values. A cell that
/// doesn't parse fails the whole load.
pub fn load_csv<P: AsRef<Path>>(file_path: P) -> Result<Vec<Vec<f64>>, Box<dyn Error>> {
    let mut rdr = Reader::from_path(file_path)?;
    let mut data = Vec::new();

    for (line, result) in rdr.records().enumerate() {
        let record = result?;
        let row = record
            .iter()
            .enumerate()
            .map(|(column, cell)| {
                cell.trim().parse::<f64>().map_err(|e| {
                    format!("row {} column {}: '{}' {}", line + 1, column, cell, e)
                })
            })
            .collect::<Result<Vec<f64>, String>>()?;
        data.push(row);
    }

    Ok(data)
}

/// Loads the `(x, y, z)` columns of a recorded accelerometer trace.
pub fn load_accelerometer_trace<P: AsRef<Path>>(
    file_path: P,
) -> Result<Vec<[f32; N_AXES]>, Box<dyn Error>> {
    let columns = [
        usize::from(CsvFileColumn::XAccel),
        usize::from(CsvFileColumn::YAccel),
        usize::from(CsvFileColumn::ZAccel),
    ];
    load_csv(file_path)?
        .into_iter()
        .enumerate()
        .map(|(line, row)| -> Result<[f32; N_AXES], Box<dyn Error>> {
            let mut sample = [0f32; N_AXES];
            for (axis, column) in columns.iter().enumerate() {
                let value = row
                    .get(*column)
                    .ok_or_else(|| format!("row {} has {} columns", line + 1, row.len()))?;
                sample[axis] = *value as f32;
            }
            Ok(sample)
        })
        .collect()
}
