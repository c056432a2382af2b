use super::ExportError;
use crate::paces::PaceReport;
use crate::splits::SplitMatrix;
use std::io::Write;
use std::path::Path;

/// Write a split matrix as CSV: one row per zone, one column per distance
pub fn write_split_matrix<W: Write>(matrix: &SplitMatrix, writer: W) -> Result<(), ExportError> {
    let mut csv = ::csv::Writer::from_writer(writer);

    let mut header = vec!["Zone".to_string()];
    header.extend(matrix.columns.iter().map(|c| c.label.clone()));
    csv.write_record(&header)?;

    for row in &matrix.rows {
        let mut record = vec![row.zone.name().to_string()];
        record.extend(row.splits.iter().cloned());
        csv.write_record(&record)?;
    }

    csv.flush()?;
    Ok(())
}

/// Write a pace report as `Zone,Pace_Per_Mile` rows, preceded by the VDOT
pub fn write_pace_report<W: Write>(report: &PaceReport, writer: W) -> Result<(), ExportError> {
    let mut csv = ::csv::Writer::from_writer(writer);

    csv.write_record(["Zone", "Pace_Per_Mile"])?;
    let vdot = format!("{:.1}", report.vdot);
    csv.write_record(["VDOT", vdot.as_str()])?;
    for (zone, pace) in report.entries() {
        csv.write_record([zone.name(), pace])?;
    }

    csv.flush()?;
    Ok(())
}

/// Export a split matrix to a CSV file
pub fn export_split_matrix<P: AsRef<Path>>(
    matrix: &SplitMatrix,
    output_path: P,
) -> Result<(), ExportError> {
    let file = std::fs::File::create(output_path)?;
    write_split_matrix(matrix, file)
}
