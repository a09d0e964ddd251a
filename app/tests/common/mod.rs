//! FILENAME: tests/common/mod.rs
//! Fixtures shared by the benchviz integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use benchviz::{BenchmarkInfo, Row, Table};

pub const GROUP: &str = "IterationBenchmark";
pub const LINUX_ENV: &str = "BenchmarkDotNet v0.13.12, Ubuntu 22.04";
pub const WINDOWS_ENV: &str = "BenchmarkDotNet v0.13.12, Windows 11";

/// Exported report of the Linux run.
pub const LINUX_REPORT: &str = "\
```
BenchmarkDotNet v0.13.12, Ubuntu 22.04
```
| Method | Job     | OS    | Categories | Mean         | Allocated |
|------- |-------- |------ |----------- |-------------:|----------:|
| Bar    | Default | Linux | Loop       | 30.00 ns     | 32 B      |
| Foo    | Default | Linux | Loop       | **10.00 ns** | 0 B       |
";

/// Exported report of the Windows run.
pub const WINDOWS_REPORT: &str = "\
```
BenchmarkDotNet v0.13.12, Windows 11
```
| Method | Job     | OS      | Categories | Mean     | Allocated |
|------- |-------- |-------- |----------- |---------:|----------:|
| Bar    | Default | Windows | Loop       | 40.00 ns | 32 B      |
| Foo    | Default | Windows | Loop       | 12.00 ns | 0 B       |
";

pub fn linux_info() -> BenchmarkInfo {
    BenchmarkInfo::from_markdown(LINUX_REPORT, "IterationBenchmark.Linux", Some(GROUP)).unwrap()
}

pub fn windows_info() -> BenchmarkInfo {
    BenchmarkInfo::from_markdown(WINDOWS_REPORT, "IterationBenchmark.Windows", Some(GROUP)).unwrap()
}

/// Writes both runs as exported report files.
pub fn write_reports(dir: &Path) -> Vec<PathBuf> {
    let files = [
        ("IterationBenchmark.Linux-report-github.md", LINUX_REPORT),
        ("IterationBenchmark.Windows-report-github.md", WINDOWS_REPORT),
    ];
    files
        .iter()
        .map(|(name, content)| {
            let path = dir.join(name);
            std::fs::write(&path, content).unwrap();
            path
        })
        .collect()
}

/// A row whose display order follows the pair order.
pub fn ordered_row(pairs: &[(&str, &str)]) -> Row {
    let mut row = Row::from_pairs(pairs.iter().copied());
    let columns: Vec<&str> = pairs.iter().map(|(column, _)| *column).collect();
    row.set_columns_order(&columns);
    row
}

/// Values of one column, `None` for dividers and missing cells.
pub fn column_texts(table: &[Option<Row>], column: &str) -> Vec<Option<String>> {
    table
        .iter()
        .map(|row| row.as_ref().and_then(|r| r.get_text(column)))
        .collect()
}

pub fn rows_only(table: Table) -> Vec<Row> {
    table.into_iter().flatten().collect()
}

pub fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}
