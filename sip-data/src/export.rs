//! CSV output for built series.

use crate::series::ChartSeries;
use std::io;

/// Write series side by side as CSV: an `x` column followed by one column
/// per series label. Gaps are written as empty cells.
///
/// Series are expected to share x positions, as [`crate::series::build_series`]
/// and [`crate::aggregate::ClimatologyBand::to_series`] produce. Rows are
/// indexed by the first series; shorter series pad with empty cells.
pub fn write_series_csv<W: io::Write>(series: &[ChartSeries], writer: W) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = vec!["x".to_string()];
    header.extend(series.iter().map(|s| s.label.clone()));
    wtr.write_record(&header)?;

    let rows = series.first().map(ChartSeries::len).unwrap_or(0);
    for row in 0..rows {
        let mut record = Vec::with_capacity(series.len() + 1);
        record.push(series[0].points[row].x.to_label());
        for s in series {
            let cell = s
                .points
                .get(row)
                .and_then(|p| p.y)
                .map(|v| v.to_string())
                .unwrap_or_default();
            record.push(cell);
        }
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}
