//! Evidence file loading
//!
//! Tabular files become one passage per row with cells joined by ` | `;
//! prose files are chunked.

use std::path::Path;

use super::FixedSizeChunker;
use crate::domain::DomainError;

const CELL_SEPARATOR: &str = " | ";

/// Supported evidence file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Json,
    Text,
}

impl SourceFormat {
    pub fn from_path(path: &Path) -> Result<Self, DomainError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "txt" | "md" | "markdown" => Ok(Self::Text),
            other => Err(DomainError::validation(format!(
                "Unsupported evidence file type '{}' for {}",
                other,
                path.display()
            ))),
        }
    }
}

/// Read a file and split it into passages
pub async fn load_passages(
    path: &Path,
    chunker: &FixedSizeChunker,
) -> Result<Vec<String>, DomainError> {
    let format = SourceFormat::from_path(path)?;
    let content = tokio::fs::read_to_string(path).await.map_err(|e| {
        DomainError::not_found(format!("Cannot read {}: {}", path.display(), e))
    })?;

    parse_passages(&content, format, chunker)
}

pub fn parse_passages(
    content: &str,
    format: SourceFormat,
    chunker: &FixedSizeChunker,
) -> Result<Vec<String>, DomainError> {
    let passages = match format {
        SourceFormat::Csv => content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| split_csv_row(line).join(CELL_SEPARATOR))
            .flat_map(|row| chunker.chunk(&row))
            .collect(),
        SourceFormat::Json => {
            let value: serde_json::Value = serde_json::from_str(content)
                .map_err(|e| DomainError::validation(format!("Invalid JSON evidence: {}", e)))?;
            json_rows(&value)
                .into_iter()
                .flat_map(|row| chunker.chunk(&row))
                .collect()
        }
        SourceFormat::Text => chunker.chunk(content),
    };

    Ok(passages)
}

/// Split one CSV line, honoring double-quoted cells and `""` escapes
fn split_csv_row(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut cell = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                cell.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                cells.push(cell.trim().to_string());
                cell.clear();
            }
            _ => cell.push(c),
        }
    }
    cells.push(cell.trim().to_string());

    cells
}

fn json_rows(value: &serde_json::Value) -> Vec<String> {
    match value {
        serde_json::Value::Array(items) => items.iter().map(json_cells).collect(),
        other => vec![json_cells(other)],
    }
}

fn json_cells(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Object(map) => map
            .iter()
            .map(|(key, v)| format!("{}: {}", key, scalar_text(v)))
            .collect::<Vec<_>>()
            .join(CELL_SEPARATOR),
        serde_json::Value::Array(items) => items
            .iter()
            .map(scalar_text)
            .collect::<Vec<_>>()
            .join(CELL_SEPARATOR),
        other => scalar_text(other),
    }
}

fn scalar_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}
