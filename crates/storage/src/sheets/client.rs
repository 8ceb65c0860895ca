use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::Deserialize;
use serde_json::{Value, json};

use super::auth::{ServiceAccountAuth, ServiceAccountKey};
use crate::error::{Result, StorageError};
use crate::store::{CellValue, Table, TableStore};

#[derive(Debug, Clone)]
pub struct SheetsConfig {
    pub base_url: String,
    pub spreadsheet_id: String,
    pub credentials_path: PathBuf,
    pub timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorEnvelope {
    error: GoogleError,
}

#[derive(Debug, Deserialize)]
struct GoogleError {
    message: String,
}

/// Google Sheets API v4 client bound to a single spreadsheet.
///
/// One client is built at startup: the HTTP connection pool and the access
/// token are reused across requests.
pub struct SheetsClient {
    client: Client,
    base_url: Url,
    spreadsheet_id: String,
    auth: ServiceAccountAuth,
}

impl SheetsClient {
    pub async fn connect(config: SheetsConfig) -> Result<Self> {
        if config.spreadsheet_id.trim().is_empty() {
            return Err(StorageError::Configuration(
                "spreadsheet id must not be empty".to_string(),
            ));
        }

        let base_url = Url::parse(&config.base_url).map_err(|e| {
            StorageError::Configuration(format!("invalid Sheets API base URL: {}", e))
        })?;

        let key = ServiceAccountKey::from_file(&config.credentials_path).await?;

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("qrhunt/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let auth = ServiceAccountAuth::new(key, client.clone());
        tracing::info!(
            spreadsheet_id = %config.spreadsheet_id,
            client_email = %auth.client_email(),
            "Sheets client configured"
        );

        Ok(Self {
            client,
            base_url,
            spreadsheet_id: config.spreadsheet_id,
            auth,
        })
    }

    fn values_url(&self, range: &str) -> Result<Url> {
        values_url(&self.base_url, &self.spreadsheet_id, range)
    }

    async fn get_values(&self, range: &str, major_dimension: &str) -> Result<Vec<Vec<String>>> {
        let mut url = self.values_url(range)?;
        url.query_pairs_mut()
            .append_pair("majorDimension", major_dimension)
            .append_pair("valueRenderOption", "UNFORMATTED_VALUE");

        let token = self.auth.access_token().await?;
        let response = self.client.get(url).bearer_auth(token).send().await?;
        let response = check_status(response).await?;

        read_values(response).await
    }
}

#[async_trait]
impl TableStore for SheetsClient {
    async fn read_column(&self, table: Table, column: usize) -> Result<Vec<String>> {
        let letter = column_letter(column);
        let range = format!("'{}'!{}:{}", table.sheet_name(), letter, letter);

        let mut columns = self.get_values(&range, "COLUMNS").await?;
        if columns.is_empty() {
            return Ok(Vec::new());
        }

        Ok(columns.swap_remove(0))
    }

    async fn read_rows(&self, table: Table) -> Result<Vec<Vec<String>>> {
        let range = format!("'{}'", table.sheet_name());
        self.get_values(&range, "ROWS").await
    }

    async fn append_row(&self, table: Table, cells: Vec<CellValue>) -> Result<()> {
        let url = append_url(&self.base_url, &self.spreadsheet_id, table)?;

        let token = self.auth.access_token().await?;
        let response = self
            .client
            .post(url)
            .bearer_auth(token)
            .json(&append_body(&cells))
            .send()
            .await?;
        check_status(response).await?;

        tracing::debug!(sheet = table.sheet_name(), "Row appended");
        Ok(())
    }
}

fn values_url(base_url: &Url, spreadsheet_id: &str, range: &str) -> Result<Url> {
    let mut url = base_url.clone();
    url.path_segments_mut()
        .map_err(|_| StorageError::Configuration(format!("cannot use {} as a base URL", base_url)))?
        .pop_if_empty()
        .extend(["v4", "spreadsheets", spreadsheet_id, "values", range]);
    Ok(url)
}

fn append_url(base_url: &Url, spreadsheet_id: &str, table: Table) -> Result<Url> {
    let range = format!("'{}'!A1:append", table.sheet_name());
    let mut url = values_url(base_url, spreadsheet_id, &range)?;
    url.query_pairs_mut()
        .append_pair("valueInputOption", "RAW")
        .append_pair("insertDataOption", "INSERT_ROWS");
    Ok(url)
}

fn append_body(cells: &[CellValue]) -> Value {
    let row: Vec<Value> = cells.iter().map(CellValue::to_json).collect();
    json!({ "majorDimension": "ROWS", "values": [row] })
}

/// Cells of a `ValueRange` as text. Empty ranges come back without a `values` key.
async fn read_values(response: Response) -> Result<Vec<Vec<String>>> {
    let body = response.json::<ValueRange>().await?;
    Ok(body
        .values
        .into_iter()
        .map(|row| row.into_iter().map(cell_to_string).collect())
        .collect())
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<GoogleErrorEnvelope>(&body)
        .map(|envelope| envelope.error.message)
        .unwrap_or(body);

    Err(StorageError::Api {
        status: status.as_u16(),
        message,
    })
}

/// Unformatted numbers may arrive as `5.0`; whole values read back as `5`.
fn cell_to_string(cell: Value) -> String {
    match cell {
        Value::String(s) => s,
        Value::Number(n) if n.is_f64() => match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => (f as i64).to_string(),
            _ => n.to_string(),
        },
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Zero-based column index to A1 notation letters (0 -> A, 26 -> AA).
fn column_letter(mut index: usize) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push(b'A' + (index % 26) as u8);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_letters() {
        assert_eq!(column_letter(0), "A");
        assert_eq!(column_letter(3), "D");
        assert_eq!(column_letter(25), "Z");
        assert_eq!(column_letter(26), "AA");
        assert_eq!(column_letter(27), "AB");
        assert_eq!(column_letter(701), "ZZ");
        assert_eq!(column_letter(702), "AAA");
    }

    #[test]
    fn test_values_url_escapes_range() {
        let base = Url::parse("https://sheets.googleapis.com/").unwrap();
        let url = values_url(&base, "sheet-id", "'Student Claims'!A:A").unwrap();

        assert_eq!(
            url.as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/sheet-id/values/'Student%20Claims'!A:A"
        );
    }

    #[test]
    fn test_cells_read_as_strings() {
        assert_eq!(cell_to_string(json!("E1")), "E1");
        assert_eq!(cell_to_string(json!(5)), "5");
        assert_eq!(cell_to_string(json!(5.0)), "5");
        assert_eq!(cell_to_string(json!(2.5)), "2.5");
        assert_eq!(cell_to_string(Value::Null), "");
    }

    #[test]
    fn test_append_url() {
        let base = Url::parse("https://sheets.googleapis.com").unwrap();
        let url = append_url(&base, "sheet-id", Table::StudentClaims).unwrap();

        assert_eq!(
            url.as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/sheet-id/values/'StudentClaims'!A1:append?valueInputOption=RAW&insertDataOption=INSERT_ROWS"
        );
    }

    #[test]
    fn test_append_body_keeps_cell_types() {
        let body = append_body(&[
            CellValue::Text("E1".to_string()),
            CellValue::Text("007".to_string()),
            CellValue::Number(5),
        ]);

        assert_eq!(
            body,
            json!({ "majorDimension": "ROWS", "values": [["E1", "007", 5]] })
        );
    }

    fn response(status: u16, body: &'static str) -> Response {
        Response::from(
            http::Response::builder()
                .status(status)
                .body(body)
                .unwrap(),
        )
    }

    #[tokio::test]
    async fn test_google_error_envelope_becomes_api_error() {
        let result = check_status(response(
            404,
            r#"{"error": {"code": 404, "message": "Requested entity was not found.", "status": "NOT_FOUND"}}"#,
        ))
        .await;

        match result {
            Err(e @ StorageError::Api { .. }) => {
                assert!(e.is_not_found());
                assert!(e.to_string().contains("Requested entity was not found."));
            }
            other => panic!("expected an API error, got {:?}", other.map(|r| r.status())),
        }
    }

    #[tokio::test]
    async fn test_plain_error_body_is_kept() {
        let result = check_status(response(429, "Quota exceeded")).await;

        match result {
            Err(StorageError::Api { status, message }) => {
                assert_eq!(status, 429);
                assert_eq!(message, "Quota exceeded");
            }
            other => panic!("expected an API error, got {:?}", other.map(|r| r.status())),
        }
    }

    #[tokio::test]
    async fn test_success_passes_through() {
        let checked = check_status(response(200, "{}")).await.unwrap();
        assert_eq!(checked.status(), 200);
    }

    #[tokio::test]
    async fn test_read_column_values() {
        let values = read_values(response(
            200,
            r#"{"range": "'ValidCodes'!A1:A1000", "majorDimension": "COLUMNS", "values": [["SecretCode", "C1", 7]]}"#,
        ))
        .await
        .unwrap();

        assert_eq!(values, vec![vec!["SecretCode", "C1", "7"]]);
    }

    #[tokio::test]
    async fn test_empty_sheet_has_no_values_key() {
        let values = read_values(response(
            200,
            r#"{"range": "'ClaimTimestamps'!A1:A1000", "majorDimension": "COLUMNS"}"#,
        ))
        .await
        .unwrap();

        assert!(values.is_empty());
    }

    #[tokio::test]
    async fn test_connect_requires_spreadsheet_id() {
        let result = SheetsClient::connect(SheetsConfig {
            base_url: "https://sheets.googleapis.com".to_string(),
            spreadsheet_id: " ".to_string(),
            credentials_path: PathBuf::from("credentials.json"),
            timeout: Duration::from_secs(5),
        })
        .await;

        assert!(matches!(result, Err(StorageError::Configuration(_))));
    }

    #[tokio::test]
    #[ignore] // Needs SPREADSHEET_ID and credentials.json for a real sheet
    async fn test_read_enrollments_from_live_sheet() {
        let client = SheetsClient::connect(SheetsConfig {
            base_url: "https://sheets.googleapis.com".to_string(),
            spreadsheet_id: std::env::var("SPREADSHEET_ID").unwrap(),
            credentials_path: PathBuf::from("credentials.json"),
            timeout: Duration::from_secs(30),
        })
        .await
        .unwrap();

        let column = client.read_column(Table::ValidEnrollments, 0).await.unwrap();
        assert!(!column.is_empty());
    }
}
