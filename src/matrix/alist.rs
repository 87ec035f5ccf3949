//! Sparse binary matrices and the alist exchange format
//!
//! A [`SparseBinaryMatrix`] keeps two mutually consistent adjacency views of
//! a 0/1 matrix: for every row the sorted column indices holding a 1, and for
//! every column the sorted row indices holding a 1. Indices are 0-based in
//! memory; the alist text format stores them 1-based.
//!
//! The alist layout read and written here is, one record per line:
//!
//! ```text
//! N M                      columns, rows
//! max_col_w max_row_w      largest column / row weight
//! w_col[0] .. w_col[N-1]   column weights
//! w_row[0] .. w_row[M-1]   row weights
//! N lines                  1-based row indices of each column, 0-padded
//! M lines                  1-based column indices of each row, 0-padded
//! ```

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;

use tracing::debug;

use crate::error::{CodeError, CodeResult};

/// A binary matrix stored as row and column adjacency lists
#[derive(Clone, PartialEq, Eq)]
pub struct SparseBinaryMatrix {
    /// Number of rows (M)
    pub n_rows: usize,

    /// Number of columns (N)
    pub n_cols: usize,

    /// Sorted column indices of the 1s in each row
    pub(crate) rows: Vec<Vec<usize>>,

    /// Sorted row indices of the 1s in each column
    pub(crate) cols: Vec<Vec<usize>>,
}

impl SparseBinaryMatrix {
    /// Creates an all-zero matrix
    pub fn zeros(n_rows: usize, n_cols: usize) -> Self {
        Self {
            n_rows,
            n_cols,
            rows: vec![Vec::new(); n_rows],
            cols: vec![Vec::new(); n_cols],
        }
    }

    /// Builds a matrix from `(row, col)` positions of its 1s
    ///
    /// Duplicate positions collapse into a single entry. Fails with a
    /// dimension error when a position falls outside `n_rows × n_cols`.
    pub fn from_entries<I>(n_rows: usize, n_cols: usize, entries: I) -> CodeResult<Self>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut matrix = Self::zeros(n_rows, n_cols);

        for (row, col) in entries {
            if row >= n_rows || col >= n_cols {
                return Err(CodeError::Dimension(format!(
                    "entry ({}, {}) outside {}×{} matrix",
                    row, col, n_rows, n_cols
                )));
            }
            matrix.rows[row].push(col);
            matrix.cols[col].push(row);
        }

        for list in matrix.rows.iter_mut().chain(matrix.cols.iter_mut()) {
            list.sort_unstable();
            list.dedup();
        }

        Ok(matrix)
    }

    /// Builds a matrix from the column lists of each row
    pub fn from_rows(n_rows: usize, n_cols: usize, rows: &[Vec<usize>]) -> CodeResult<Self> {
        if rows.len() != n_rows {
            return Err(CodeError::Dimension(format!(
                "expected {} row lists, got {}",
                n_rows,
                rows.len()
            )));
        }

        let entries = rows
            .iter()
            .enumerate()
            .flat_map(|(i, cols)| cols.iter().map(move |&j| (i, j)));

        Self::from_entries(n_rows, n_cols, entries)
    }

    /// Column indices holding a 1 in row `i`
    pub fn row(&self, i: usize) -> &[usize] {
        &self.rows[i]
    }

    /// Row indices holding a 1 in column `j`
    pub fn col(&self, j: usize) -> &[usize] {
        &self.cols[j]
    }

    /// Returns true when entry `(i, j)` is 1
    pub fn contains(&self, i: usize, j: usize) -> bool {
        i < self.n_rows && self.rows[i].binary_search(&j).is_ok()
    }

    /// Number of 1s in the matrix
    pub fn nnz(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// Number of 1s in each row
    pub fn row_weights(&self) -> Vec<usize> {
        self.rows.iter().map(Vec::len).collect()
    }

    /// Number of 1s in each column
    pub fn col_weights(&self) -> Vec<usize> {
        self.cols.iter().map(Vec::len).collect()
    }

    /// Largest row weight, 0 for an empty matrix
    pub fn max_row_weight(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Largest column weight, 0 for an empty matrix
    pub fn max_col_weight(&self) -> usize {
        self.cols.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Loads a matrix from an alist file
    pub fn load<P: AsRef<Path>>(path: P) -> CodeResult<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let matrix = Self::read(BufReader::new(file))?;

        debug!(
            path = %path.display(),
            rows = matrix.n_rows,
            cols = matrix.n_cols,
            nnz = matrix.nnz(),
            "loaded alist matrix"
        );

        Ok(matrix)
    }

    /// Writes the matrix to an alist file, replacing any existing content
    pub fn save<P: AsRef<Path>>(&self, path: P) -> CodeResult<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Parses alist text from any buffered reader
    pub fn read<R: BufRead>(reader: R) -> CodeResult<Self> {
        let mut records = Records::new(reader);

        let (line, header) = records.next_record("matrix size")?;
        let [n_cols, n_rows] = expect_fixed::<2>(line, &header, "matrix size")?;
        if n_rows == 0 || n_cols == 0 {
            return Err(CodeError::parse(line, "matrix dimensions must be positive"));
        }

        let (line, maxima) = records.next_record("maximum weights")?;
        let [max_col_w, max_row_w] = expect_fixed::<2>(line, &maxima, "maximum weights")?;

        let (line, col_weights) = records.next_record("column weights")?;
        check_weights(line, &col_weights, n_cols, max_col_w, "column")?;

        let (line, row_weights) = records.next_record("row weights")?;
        check_weights(line, &row_weights, n_rows, max_row_w, "row")?;

        let mut cols = Vec::with_capacity(n_cols);
        for (j, &weight) in col_weights.iter().enumerate() {
            let (line, values) = records.next_record("column list")?;
            let list = parse_list(line, &values, weight, n_rows, "row", j)?;
            cols.push(list);
        }

        let mut rows = Vec::with_capacity(n_rows);
        let mut row_lines = Vec::with_capacity(n_rows);
        for (i, &weight) in row_weights.iter().enumerate() {
            let (line, values) = records.next_record("row list")?;
            let list = parse_list(line, &values, weight, n_cols, "column", i)?;
            rows.push(list);
            row_lines.push(line);
        }

        records.expect_end()?;

        let matrix = Self::from_entries(
            n_rows,
            n_cols,
            cols.iter()
                .enumerate()
                .flat_map(|(j, list)| list.iter().map(move |&i| (i, j))),
        )?;

        // The row records must describe the same matrix as the column records
        for (i, list) in rows.iter().enumerate() {
            if *list != matrix.rows[i] {
                return Err(CodeError::parse(
                    row_lines[i],
                    format!("row {} disagrees with the column lists", i + 1),
                ));
            }
        }

        Ok(matrix)
    }

    /// Writes alist text; the exact inverse of [`SparseBinaryMatrix::read`]
    ///
    /// Fails with a dimension error for a matrix without rows or columns,
    /// which the format cannot represent.
    pub fn write<W: Write>(&self, writer: &mut W) -> CodeResult<()> {
        if self.n_rows == 0 || self.n_cols == 0 {
            return Err(CodeError::Dimension(format!(
                "cannot write a {}×{} matrix as alist",
                self.n_rows, self.n_cols
            )));
        }

        let max_col_w = self.max_col_weight();
        let max_row_w = self.max_row_weight();

        writeln!(writer, "{} {}", self.n_cols, self.n_rows)?;
        writeln!(writer, "{} {}", max_col_w, max_row_w)?;
        writeln!(writer, "{}", join(self.col_weights().into_iter()))?;
        writeln!(writer, "{}", join(self.row_weights().into_iter()))?;

        for list in &self.cols {
            writeln!(writer, "{}", padded(list, max_col_w))?;
        }
        for list in &self.rows {
            writeln!(writer, "{}", padded(list, max_row_w))?;
        }

        Ok(())
    }
}

impl fmt::Debug for SparseBinaryMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SparseBinaryMatrix {{")?;
        writeln!(f, "  dimensions: {} × {}", self.n_rows, self.n_cols)?;
        writeln!(f, "  nnz: {}", self.nnz())?;

        let max_rows_to_print = 5.min(self.n_rows);
        for i in 0..max_rows_to_print {
            writeln!(f, "    row {}: {:?}", i, self.rows[i])?;
        }
        if self.n_rows > max_rows_to_print {
            writeln!(f, "    ... ({} more rows)", self.n_rows - max_rows_to_print)?;
        }

        write!(f, "}}")
    }
}

/// Non-empty lines of an alist source, each split into integers
struct Records<R> {
    lines: std::io::Lines<R>,
    line_no: usize,
}

impl<R: BufRead> Records<R> {
    fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
        }
    }

    fn next_line(&mut self) -> CodeResult<Option<(usize, Vec<usize>)>> {
        for line in self.lines.by_ref() {
            let line = line.map_err(|e| match e.kind() {
                ErrorKind::InvalidData => CodeError::parse(self.line_no + 1, "invalid UTF-8"),
                _ => CodeError::Io(e),
            })?;
            self.line_no += 1;

            if line.trim().is_empty() {
                continue;
            }

            let values = line
                .split_whitespace()
                .map(|tok| {
                    tok.parse::<usize>().map_err(|_| {
                        CodeError::parse(self.line_no, format!("invalid integer '{}'", tok))
                    })
                })
                .collect::<CodeResult<Vec<_>>>()?;

            return Ok(Some((self.line_no, values)));
        }

        Ok(None)
    }

    fn next_record(&mut self, what: &str) -> CodeResult<(usize, Vec<usize>)> {
        self.next_line()?.ok_or_else(|| {
            CodeError::parse(self.line_no + 1, format!("unexpected end of input, expected {}", what))
        })
    }

    fn expect_end(&mut self) -> CodeResult<()> {
        match self.next_line()? {
            None => Ok(()),
            Some((line, _)) => Err(CodeError::parse(line, "unexpected trailing data")),
        }
    }
}

fn expect_fixed<const K: usize>(line: usize, values: &[usize], what: &str) -> CodeResult<[usize; K]> {
    values.try_into().map_err(|_| {
        CodeError::parse(
            line,
            format!("{} needs {} values, found {}", what, K, values.len()),
        )
    })
}

fn check_weights(
    line: usize,
    weights: &[usize],
    expected_len: usize,
    declared_max: usize,
    what: &str,
) -> CodeResult<()> {
    if weights.len() != expected_len {
        return Err(CodeError::parse(
            line,
            format!("expected {} {} weights, found {}", expected_len, what, weights.len()),
        ));
    }

    let actual_max = weights.iter().copied().max().unwrap_or(0);
    if actual_max != declared_max {
        return Err(CodeError::parse(
            line,
            format!(
                "largest {} weight is {} but {} was declared",
                what, actual_max, declared_max
            ),
        ));
    }

    Ok(())
}

/// Converts one 1-based, zero-padded index record into sorted 0-based indices
fn parse_list(
    line: usize,
    values: &[usize],
    weight: usize,
    bound: usize,
    what: &str,
    owner: usize,
) -> CodeResult<Vec<usize>> {
    let indices: Vec<usize> = values.iter().copied().filter(|&v| v != 0).collect();

    if indices.len() != weight {
        return Err(CodeError::parse(
            line,
            format!(
                "list {} declares weight {} but holds {} indices",
                owner + 1,
                weight,
                indices.len()
            ),
        ));
    }

    let mut list = Vec::with_capacity(weight);
    for idx in indices {
        if idx > bound {
            return Err(CodeError::parse(
                line,
                format!("{} index {} exceeds {}", what, idx, bound),
            ));
        }
        list.push(idx - 1);
    }

    list.sort_unstable();
    if list.windows(2).any(|w| w[0] == w[1]) {
        return Err(CodeError::parse(line, "duplicate index in list"));
    }

    Ok(list)
}

fn join<I: Iterator<Item = usize>>(values: I) -> String {
    values.map(|v| v.to_string()).collect::<Vec<_>>().join(" ")
}

fn padded(list: &[usize], width: usize) -> String {
    if width == 0 {
        return "0".to_string();
    }

    join(
        list.iter()
            .map(|&v| v + 1)
            .chain(std::iter::repeat(0).take(width - list.len())),
    )
}
