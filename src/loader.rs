//! Source loading for score sheets.
//!
//! A source string is either a shared-sheet link (fetched as a CSV export),
//! a `.csv` file or URL, or a workbook (xlsx, xls, ods) read through
//! `calamine`, either on disk or behind an HTTP URL.

use std::fs::File;
use std::io::{Cursor, ErrorKind, Read, Seek};
use std::path::{Path, PathBuf};

use calamine::{Data, Reader, Sheets, open_workbook_auto, open_workbook_auto_from_rs};
use tracing::{debug, info};

use crate::error::{GradeError, Result};
use crate::fetch::HttpClient;
use crate::table::{Cell, RawTable};

/// Host fragment that marks a link as a shared spreadsheet document.
const SHARED_SHEET_HOST: &str = "docs.google.com";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceRef {
    SharedSheet { export_url: String },
    RemoteCsv(String),
    RemoteWorkbook(String),
    CsvFile(PathBuf),
    Workbook(PathBuf),
}

impl SourceRef {
    /// Classifies a user-supplied path or link.
    pub fn parse(input: &str) -> Self {
        let input = input.trim();

        if input.contains(SHARED_SHEET_HOST) {
            return SourceRef::SharedSheet {
                export_url: export_url(input),
            };
        }

        if input.starts_with("http://") || input.starts_with("https://") {
            let path = input.split(['?', '#']).next().unwrap_or(input);
            return if has_csv_extension(Path::new(path)) {
                SourceRef::RemoteCsv(input.to_string())
            } else {
                SourceRef::RemoteWorkbook(input.to_string())
            };
        }

        let path = PathBuf::from(input);
        if has_csv_extension(&path) {
            SourceRef::CsvFile(path)
        } else {
            SourceRef::Workbook(path)
        }
    }
}

fn has_csv_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"))
}

/// Rewrites a shared-sheet editing link into its CSV export link.
///
/// Everything from `/edit` onward is replaced by `/export?format=csv`, keeping
/// the `gid` of the selected tab when the link carries one. Links without an
/// `/edit` segment are returned unchanged.
pub fn export_url(link: &str) -> String {
    let Some(pos) = link.find("/edit") else {
        return link.to_string();
    };
    let (base, rest) = link.split_at(pos);

    let mut url = format!("{}/export?format=csv", base);
    if let Some(gid) = find_gid(rest) {
        url.push_str("&gid=");
        url.push_str(gid);
    }
    url
}

fn find_gid(rest: &str) -> Option<&str> {
    rest.split(['?', '#', '&'])
        .find_map(|part| part.strip_prefix("gid="))
        .map(|value| {
            let end = value
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(value.len());
            &value[..end]
        })
        .filter(|gid| !gid.is_empty())
}

/// Loads the source named by `input` into a [`RawTable`].
///
/// # Errors
///
/// [`GradeError::SourceNotFound`] when a local path does not exist,
/// [`GradeError::SourceReadFailure`] for anything that fails while fetching
/// or parsing.
#[tracing::instrument(skip(client))]
pub async fn load_source<C: HttpClient>(client: &C, input: &str) -> Result<RawTable> {
    let table = match SourceRef::parse(input) {
        SourceRef::SharedSheet { export_url: url } | SourceRef::RemoteCsv(url) => {
            debug!(url = %url, "Fetching sheet export");
            let bytes = fetch(client, &url).await?;
            parse_csv(&url, bytes.as_slice())?
        }
        SourceRef::RemoteWorkbook(url) => {
            debug!(url = %url, "Fetching workbook");
            let bytes = fetch(client, &url).await?;
            parse_workbook_bytes(&url, bytes)?
        }
        SourceRef::CsvFile(path) => {
            let file = open_local(&path)?;
            parse_csv(&path.display().to_string(), file)?
        }
        SourceRef::Workbook(path) => {
            if !path.exists() {
                return Err(not_found(&path));
            }
            parse_workbook(&path)?
        }
    };

    info!(
        rows = table.row_count(),
        columns = table.headers.len(),
        "Source loaded"
    );
    Ok(table)
}

async fn fetch<C: HttpClient>(client: &C, url: &str) -> Result<Vec<u8>> {
    client
        .fetch(url)
        .await
        .map_err(|e| GradeError::read_failure(url, format!("{e:#}")))
}

fn not_found(path: &Path) -> GradeError {
    GradeError::SourceNotFound {
        path: path.display().to_string(),
    }
}

fn open_local(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => not_found(path),
        _ => GradeError::read_failure(&path.display().to_string(), e),
    })
}

/// Parses delimited text whose first record is the header row.
pub fn parse_csv<R: Read>(location: &str, reader: R) -> Result<RawTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()
        .map_err(|e| GradeError::read_failure(location, e))?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();

    let mut rows: Vec<Vec<Cell>> = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(|e| GradeError::read_failure(location, e))?;
        rows.push(record.iter().map(Cell::from_text).collect());
    }

    Ok(RawTable::new(headers, rows))
}

/// Reads the first worksheet of a workbook; its first row is the header row.
pub fn parse_workbook(path: &Path) -> Result<RawTable> {
    let location = path.display().to_string();

    let workbook =
        open_workbook_auto(path).map_err(|e| GradeError::read_failure(&location, e))?;
    first_sheet(&location, workbook)
}

/// Reads a workbook held in memory, such as one fetched over HTTP.
pub fn parse_workbook_bytes(location: &str, bytes: Vec<u8>) -> Result<RawTable> {
    let workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| GradeError::read_failure(location, e))?;
    first_sheet(location, workbook)
}

fn first_sheet<RS: Read + Seek>(location: &str, mut workbook: Sheets<RS>) -> Result<RawTable> {
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| GradeError::read_failure(location, "workbook has no worksheets"))?
        .map_err(|e| GradeError::read_failure(location, e))?;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .map(|header| header.iter().map(|c| cell_from_data(c).to_string()).collect())
        .unwrap_or_default();
    let rows: Vec<Vec<Cell>> = rows
        .map(|row| row.iter().map(cell_from_data).collect())
        .collect();

    Ok(RawTable::new(headers, rows))
}

fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::String(s) => Cell::from_text(s),
        other => Cell::Text(other.to_string()),
    }
}
