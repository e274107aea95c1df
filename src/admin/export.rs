//! Bulk movie export as CSV or JSON.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Movie;
use crate::errors::{AppError, AppResult};

/// Export file format; CSV unless asked otherwise
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv; charset=utf-8",
            ExportFormat::Json => "application/json",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// One exported movie
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MovieExportRecord {
    pub id: i32,
    pub title: String,
    pub description: String,
    #[schema(value_type = String, format = Date)]
    pub release_date: NaiveDate,
    pub created_by: i32,
    /// Genre names joined with ", "
    pub genres: String,
}

impl From<&Movie> for MovieExportRecord {
    fn from(movie: &Movie) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            description: movie.description.clone(),
            release_date: movie.release_date,
            created_by: movie.created_by,
            genres: movie.genre_list(),
        }
    }
}

/// Rendered export, ready to be sent as an attachment
#[derive(Debug, Clone)]
pub struct ExportFile {
    pub format: ExportFormat,
    pub body: Vec<u8>,
}

impl ExportFile {
    pub fn filename(&self) -> String {
        format!("movies.{}", self.format.extension())
    }
}

/// Render every movie in the requested format.
pub fn export_movies(movies: &[Movie], format: ExportFormat) -> AppResult<ExportFile> {
    let records: Vec<MovieExportRecord> = movies.iter().map(MovieExportRecord::from).collect();

    let body = match format {
        ExportFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            if records.is_empty() {
                writer
                    .write_record(["id", "title", "description", "release_date", "created_by", "genres"])
                    .map_err(|e| AppError::internal(format!("CSV export failed: {}", e)))?;
            }
            for record in &records {
                writer
                    .serialize(record)
                    .map_err(|e| AppError::internal(format!("CSV export failed: {}", e)))?;
            }
            writer
                .into_inner()
                .map_err(|e| AppError::internal(format!("CSV export failed: {}", e)))?
        }
        ExportFormat::Json => serde_json::to_vec(&records)
            .map_err(|e| AppError::internal(format!("JSON export failed: {}", e)))?,
    };

    Ok(ExportFile { format, body })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Genre;

    fn movies() -> Vec<Movie> {
        vec![Movie {
            id: 1,
            title: "Heat".into(),
            description: "Cops, robbers, coffee".into(),
            release_date: NaiveDate::from_ymd_opt(1995, 12, 15).unwrap(),
            created_by: 2,
            genres: vec![
                Genre { id: 1, name: "Crime".into() },
                Genre { id: 3, name: "Drama".into() },
            ],
        }]
    }

    #[test]
    fn test_csv_export() {
        let file = export_movies(&movies(), ExportFormat::Csv).unwrap();
        let text = String::from_utf8(file.body).unwrap();
        let mut lines = text.lines();

        assert_eq!(
            lines.next(),
            Some("id,title,description,release_date,created_by,genres")
        );
        assert_eq!(
            lines.next(),
            Some("1,Heat,\"Cops, robbers, coffee\",1995-12-15,2,\"Crime, Drama\"")
        );
        assert_eq!(file.format.content_type(), "text/csv; charset=utf-8");
    }

    #[test]
    fn test_empty_csv_keeps_header() {
        let file = export_movies(&[], ExportFormat::Csv).unwrap();
        let text = String::from_utf8(file.body).unwrap();
        assert_eq!(text.trim_end(), "id,title,description,release_date,created_by,genres");
    }

    #[test]
    fn test_json_export() {
        let file = export_movies(&movies(), ExportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&file.body).unwrap();

        assert_eq!(value[0]["genres"], "Crime, Drama");
        assert_eq!(value[0]["release_date"], "1995-12-15");
        assert_eq!(file.filename(), "movies.json");
    }
}
