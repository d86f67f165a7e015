//! Result rows and their CSV sink.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::BenchError;
use crate::params::ParameterPoint;

/// Column layout of a result table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableSchema {
    /// `r,time`
    SizeSweep,
    /// `N,time`
    CountSweep,
    /// `N,aperture,method,time`
    Combined,
}

impl TableSchema {
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            TableSchema::SizeSweep => &["r", "time"],
            TableSchema::CountSweep => &["N", "time"],
            TableSchema::Combined => &["N", "aperture", "method", "time"],
        }
    }
}

/// One finished point: the swept values that produced it and its mean time.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    point: ParameterPoint,
    time: f64,
}

impl ResultRow {
    pub fn point(&self) -> &ParameterPoint {
        &self.point
    }

    /// Mean duration in seconds.
    pub fn time(&self) -> f64 {
        self.time
    }

    fn record(&self, schema: TableSchema) -> Vec<String> {
        let time = self.time.to_string();
        match schema {
            TableSchema::SizeSweep => {
                vec![self.point.size().unwrap_or_default().to_string(), time]
            }
            TableSchema::CountSweep => vec![self.point.count().to_string(), time],
            TableSchema::Combined => vec![
                self.point.count().to_string(),
                self.point.kind().aperture_name().to_string(),
                self.point.method().to_string(),
                time,
            ],
        }
    }
}

/// Rows in sweep order under a fixed schema.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultTable {
    schema: TableSchema,
    rows: Vec<ResultRow>,
}

impl ResultTable {
    pub fn new(schema: TableSchema) -> Self {
        Self {
            schema,
            rows: Vec::new(),
        }
    }

    pub fn schema(&self) -> TableSchema {
        self.schema
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append the result for `point`.
    ///
    /// # Errors
    ///
    /// [`BenchError::SchemaMismatch`] if the schema has an `r` column and the
    /// point carries no size.
    pub fn push(&mut self, point: ParameterPoint, time: f64) -> Result<(), BenchError> {
        if self.schema == TableSchema::SizeSweep && point.size().is_none() {
            return Err(BenchError::SchemaMismatch {
                schema: self.schema,
                column: "r",
            });
        }
        self.rows.push(ResultRow { point, time });
        Ok(())
    }

    /// Serialize header and rows as CSV into `writer`.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<(), BenchError> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(self.schema.columns())?;
        for row in &self.rows {
            wtr.write_record(row.record(self.schema))?;
        }
        wtr.flush().map_err(csv::Error::from)?;
        Ok(())
    }

    /// Write the table to `path`, replacing any previous file.
    ///
    /// Rows go to a sibling `.tmp` file that is renamed over `path` once
    /// complete, so readers never observe a partial table.
    pub fn write_csv(&self, path: &Path) -> Result<(), BenchError> {
        let temp_path = temp_path_for(path);
        let sink_error = |source| BenchError::SinkWrite {
            path: path.to_path_buf(),
            source,
        };

        let file = fs::File::create(&temp_path).map_err(sink_error)?;
        if let Err(e) = self.write_to(file) {
            let _ = fs::remove_file(&temp_path);
            return Err(e);
        }
        fs::rename(&temp_path, path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            sink_error(e)
        })?;
        Ok(())
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{ParameterSpaceBuilder, ShapeAxis, SweepAxes};
    use crate::region::ShapeKind;
    use shared::image_proc::EvaluationMethod;
    use tempfile::TempDir;

    fn points(axes: SweepAxes) -> Vec<ParameterPoint> {
        ParameterSpaceBuilder::new(axes).unwrap().points().collect()
    }

    fn count_points() -> Vec<ParameterPoint> {
        points(SweepAxes {
            counts: vec![1, 10, 50],
            sizes: None,
            methods: vec![EvaluationMethod::Exact],
            shapes: vec![ShapeAxis::fixed(ShapeKind::Circle, vec![3.0])],
        })
    }

    fn render(table: &ResultTable) -> String {
        let mut out = Vec::new();
        table.write_to(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_count_sweep_csv() {
        let mut table = ResultTable::new(TableSchema::CountSweep);
        for (point, time) in count_points().into_iter().zip([0.5, 0.25, 0.125]) {
            table.push(point, time).unwrap();
        }
        assert_eq!(render(&table), "N,time\n1,0.5\n10,0.25\n50,0.125\n");
    }

    #[test]
    fn test_combined_csv() {
        let axes = SweepAxes {
            counts: vec![10],
            sizes: None,
            methods: vec![EvaluationMethod::Subpixel { subpixels: 5 }],
            shapes: vec![ShapeAxis::fixed(
                ShapeKind::RectangularAnnulus,
                vec![3.0, 5.0, 4.0, 0.0],
            )],
        };
        let mut table = ResultTable::new(TableSchema::Combined);
        for point in points(axes) {
            table.push(point, 0.001).unwrap();
        }
        assert_eq!(
            render(&table),
            "N,aperture,method,time\n10,RectangularAnnulus,subpixel-5,0.001\n"
        );
    }

    #[test]
    fn test_small_times_are_plain_decimal() {
        let mut table = ResultTable::new(TableSchema::CountSweep);
        let point = count_points().remove(0);
        table.push(point, 0.0000012).unwrap();
        assert_eq!(render(&table), "N,time\n1,0.0000012\n");
    }

    #[test]
    fn test_size_schema_requires_size() {
        let mut table = ResultTable::new(TableSchema::SizeSweep);
        let point = count_points().remove(0);
        assert!(matches!(
            table.push(point, 1.0),
            Err(BenchError::SchemaMismatch { column: "r", .. })
        ));
        assert!(table.is_empty());
    }

    #[test]
    fn test_write_csv_overwrites_and_cleans_up() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("python_like.csv");
        fs::write(&path, "stale contents\n").unwrap();

        let mut table = ResultTable::new(TableSchema::CountSweep);
        for point in count_points() {
            table.push(point, 1.5).unwrap();
        }
        table.write_csv(&path).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.iter().collect::<Vec<_>>(), vec!["N", "time"]);
        let counts: Vec<String> = reader
            .records()
            .map(|r| r.unwrap()[0].to_string())
            .collect();
        assert_eq!(counts, vec!["1", "10", "50"]);

        assert!(!dir.path().join("python_like.csv.tmp").exists());
    }

    #[test]
    fn test_write_csv_missing_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("out.csv");
        let table = ResultTable::new(TableSchema::CountSweep);
        assert!(matches!(
            table.write_csv(&path),
            Err(BenchError::SinkWrite { .. })
        ));
    }
}
