//! FILENAME: core/persistence/src/benchmark_info.rs
//! PURPOSE: Loads exported benchmark reports into `BenchmarkInfo` values.
//! CONTEXT: A report file holds the environment block and the results table
//! of one benchmark class. Its display name comes from the file name; files
//! loaded together share a group name taken from their common prefix.

use std::fs;
use std::path::{Path, PathBuf};

use engine::table::{self, Table};

use crate::markdown::{
    extract_environment_info, extract_markdown_table, parse_markdown_table, ParseTableDividerMode,
};
use crate::PersistenceError;

const REPORT_SUFFIX: &str = "-report";
const REPORT_EXTENSION: &str = "md";

/// One parsed benchmark report.
#[derive(Debug)]
pub struct BenchmarkInfo {
    pub display_name: String,
    pub group_name: String,
    pub environment_info: String,
    pub table: Table,
}

impl BenchmarkInfo {
    pub fn new(
        display_name: impl Into<String>,
        group_name: impl Into<String>,
        environment_info: impl Into<String>,
        table: Table,
    ) -> Self {
        BenchmarkInfo {
            display_name: display_name.into(),
            group_name: group_name.into(),
            environment_info: environment_info.into(),
            table,
        }
    }

    /// Parses an exported report. Without a group name the display name is used.
    pub fn from_markdown(
        markdown: &str,
        display_name: &str,
        group_name: Option<&str>,
    ) -> Result<Self, PersistenceError> {
        let table = parse_markdown_table(&extract_markdown_table(markdown), ParseTableDividerMode::PlaceNull)?;
        Ok(BenchmarkInfo::new(
            display_name,
            group_name.unwrap_or(display_name),
            extract_environment_info(markdown),
            table,
        ))
    }

    pub fn from_file(path: impl AsRef<Path>, group_name: Option<&str>) -> Result<Self, PersistenceError> {
        let path = path.as_ref();
        let markdown = fs::read_to_string(path)?;
        let display_name = extract_benchmark_class_name(&file_name_of(path));
        BenchmarkInfo::from_markdown(&markdown, &display_name, group_name)
    }

    /// Loads several reports. Without a group name, each file's group is the
    /// shortest prefix it shares with the files of the batch.
    pub fn from_files<P: AsRef<Path>>(
        paths: &[P],
        group_name: Option<&str>,
    ) -> Result<Vec<Self>, PersistenceError> {
        let names: Vec<String> = paths.iter().map(|p| file_name_of(p.as_ref())).collect();

        paths
            .iter()
            .zip(&names)
            .map(|(path, name)| {
                let group = match group_name {
                    Some(group) => group.to_string(),
                    None => common_group_name(name, &names),
                };
                BenchmarkInfo::from_file(path, Some(&group))
            })
            .collect()
    }

    /// Loads every `*.md` report of a directory, in file-name order.
    pub fn from_directory(
        directory: impl AsRef<Path>,
        group_name: Option<&str>,
    ) -> Result<Vec<Self>, PersistenceError> {
        let directory = directory.as_ref();
        let mut paths: Vec<PathBuf> = Vec::new();
        for entry in fs::read_dir(directory)? {
            let path = entry?.path();
            let is_report = path.is_file()
                && path.extension().and_then(|e| e.to_str()) == Some(REPORT_EXTENSION);
            if is_report {
                paths.push(path);
            }
        }

        if paths.is_empty() {
            return Err(PersistenceError::NoReportFiles(directory.display().to_string()));
        }

        paths.sort();
        BenchmarkInfo::from_files(&paths, group_name)
    }

    /// Deep copy of the table, metadata included.
    pub fn clone_table(&self) -> Table {
        table::clone_table(&self.table)
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// `Foo.BarBenchmark-report-github.md` -> `Foo.BarBenchmark`.
pub fn extract_benchmark_class_name(file_name: &str) -> String {
    let name = match file_name.rfind(REPORT_SUFFIX) {
        Some(index) if index > 0 => &file_name[..index],
        _ => file_name,
    };
    name.trim_matches(['_', '-']).to_string()
}

fn common_prefix<'a>(a: &'a str, b: &str) -> &'a str {
    let length: usize = a
        .char_indices()
        .zip(b.chars())
        .take_while(|((_, x), y)| x == y)
        .map(|((_, x), _)| x.len_utf8())
        .sum();
    &a[..length]
}

fn common_group_name(name: &str, all_names: &[String]) -> String {
    let shortest = all_names
        .iter()
        .map(|other| common_prefix(name, other))
        .filter(|prefix| !prefix.is_empty())
        .min_by_key(|prefix| prefix.len())
        .unwrap_or(name);
    extract_benchmark_class_name(shortest.trim_matches(['_', '-']))
}
