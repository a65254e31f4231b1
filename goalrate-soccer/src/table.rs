//! A table of matches as read from the archive's CSV files: named columns over string cells.

use std::io::Read;
use std::ops::Range;

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::domain::Origin;
use crate::error::ScheduleFormatError;

const BYTE_ORDER_MARK: char = '\u{feff}';

/// The rows contributed by a single source, along with the columns that source carried.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub origin: Origin,
    pub rows: Range<usize>,
    pub headers: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct MatchTable {
    headers: Vec<String>,
    index: FxHashMap<String, usize>,
    rows: Vec<Vec<String>>,
    segments: Vec<Segment>,
}
impl MatchTable {
    /// Reads a CSV file with a header row. Rows of varying length are tolerated: short rows are
    /// padded with blank cells, surplus cells are dropped. Rows in which every cell is blank are
    /// skipped. Cells that are not valid UTF-8 are decoded lossily.
    pub fn read_csv(origin: Origin, reader: impl Read) -> Result<Self, ScheduleFormatError> {
        let mut csv = csv::ReaderBuilder::new()
            .flexible(true)
            .has_headers(true)
            .from_reader(reader);
        let to_format_error = |source| ScheduleFormatError::Csv {
            origin: origin.clone(),
            source,
        };

        let headers = csv
            .byte_headers()
            .map_err(to_format_error)?
            .iter()
            .enumerate()
            .map(|(index, header)| {
                let header = String::from_utf8_lossy(header);
                let header: &str = if index == 0 {
                    header.trim_start_matches(BYTE_ORDER_MARK)
                } else {
                    &header
                };
                header.trim().to_string()
            })
            .collect::<Vec<_>>();

        let mut rows = vec![];
        let mut skipped = 0;
        for record in csv.byte_records() {
            let record = record.map_err(to_format_error)?;
            if record.iter().all(|cell| cell.iter().all(u8::is_ascii_whitespace)) {
                skipped += 1;
                continue;
            }
            let mut row = record
                .iter()
                .take(headers.len())
                .map(|cell| String::from_utf8_lossy(cell).trim().to_string())
                .collect::<Vec<_>>();
            row.resize(headers.len(), String::new());
            rows.push(row);
        }
        debug!("read {} rows from {origin}, skipped {skipped} blank rows", rows.len());

        let segment = Segment {
            origin,
            rows: 0..rows.len(),
            headers: headers.clone(),
        };
        Ok(Self {
            index: index_headers(&headers),
            headers,
            rows,
            segments: vec![segment],
        })
    }

    /// Stacks the rows of `tables` in the given order. The resulting columns are the union of
    /// the input columns in order of first appearance; cells of columns that a table lacks are
    /// left blank.
    pub fn concat(tables: impl IntoIterator<Item = MatchTable>) -> Self {
        let mut concatenated = MatchTable::default();
        for table in tables {
            for header in &table.headers {
                if !concatenated.index.contains_key(header) {
                    concatenated.index.insert(header.clone(), concatenated.headers.len());
                    concatenated.headers.push(header.clone());
                }
            }
            let offset = concatenated.rows.len();
            let mapping = table
                .headers
                .iter()
                .map(|header| concatenated.index[header])
                .collect::<Vec<_>>();
            for row in table.rows {
                let mut mapped = vec![String::new(); concatenated.headers.len()];
                for (column, cell) in row.into_iter().enumerate() {
                    let target = mapping[column];
                    if mapped[target].is_empty() {
                        mapped[target] = cell;
                    }
                }
                concatenated.rows.push(mapped);
            }
            concatenated
                .segments
                .extend(table.segments.into_iter().map(|segment| Segment {
                    rows: segment.rows.start + offset..segment.rows.end + offset,
                    ..segment
                }));
        }

        let width = concatenated.headers.len();
        for row in &mut concatenated.rows {
            row.resize(width, String::new());
        }
        concatenated
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The index of the first column named `header`.
    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.index.get(header).copied()
    }

    /// The index of the column named `header`, provided that every source contributing to the
    /// table carried it.
    pub fn require(&self, header: &str) -> Result<usize, ScheduleFormatError> {
        let lacking = self
            .segments
            .iter()
            .find(|segment| !segment.headers.iter().any(|existing| existing == header));
        match (self.column_index(header), lacking) {
            (Some(index), None) => Ok(index),
            (_, Some(segment)) => Err(ScheduleFormatError::MissingColumn {
                column: header.to_string(),
                origin: segment.origin.clone(),
            }),
            (None, None) => Err(ScheduleFormatError::EmptyTable {
                column: header.to_string(),
            }),
        }
    }

    pub fn cell(&self, row: usize, column: usize) -> &str {
        &self.rows[row][column]
    }

    /// The source that contributed `row`.
    pub fn origin_of(&self, row: usize) -> Option<&Origin> {
        self.segments
            .iter()
            .find(|segment| segment.rows.contains(&row))
            .map(|segment| &segment.origin)
    }

    /// Appends a column, one value per row. If a column named `header` already exists, lookups by
    /// name keep resolving to the existing one.
    pub fn push_column(&mut self, header: String, values: Vec<String>) {
        assert_eq!(
            self.rows.len(),
            values.len(),
            "number of values {} does not match number of rows {}",
            values.len(),
            self.rows.len()
        );
        self.index.entry(header.clone()).or_insert(self.headers.len());
        self.headers.push(header);
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.push(value);
        }
    }
}

fn index_headers(headers: &[String]) -> FxHashMap<String, usize> {
    let mut index = FxHashMap::with_capacity_and_hasher(headers.len(), Default::default());
    for (column, header) in headers.iter().enumerate() {
        index.entry(header.clone()).or_insert(column);
    }
    index
}

#[cfg(test)]
mod tests;
