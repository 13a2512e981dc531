//! Google Sheets API クライアント

use super::CellWriter;
use super::auth::{AccessToken, ServiceAccountCredentials, get_access_token};
use super::cell::CellAddress;
use anyhow::{Context, Result};
use chrono::Utc;
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

const SHEETS_API_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// 入力値をユーザー入力と同じように解釈させる
const VALUE_INPUT_OPTION: &str = "USER_ENTERED";
const MAJOR_DIMENSION: &str = "ROWS";

#[derive(Debug, Error)]
pub enum SheetsError {
    #[error("Sheets API エラー ({status}): {body}")]
    Http { status: StatusCode, body: String },
    #[error("Sheets API のURLを組み立てられません: {0}")]
    InvalidUrl(String),
}

/// Sheets APIクライアント
pub struct SheetsClient {
    credentials: ServiceAccountCredentials,
    access_token: Arc<RwLock<Option<AccessToken>>>,
    http_client: reqwest::Client,
    api_url: String,
}

impl SheetsClient {
    /// 認証ファイルからクライアントを作成
    pub fn new(credentials_file: impl AsRef<Path>) -> Result<Self> {
        let credentials = ServiceAccountCredentials::from_file(credentials_file)?;
        Ok(Self::with_credentials(credentials))
    }

    pub fn with_credentials(credentials: ServiceAccountCredentials) -> Self {
        Self {
            credentials,
            access_token: Arc::new(RwLock::new(None)),
            http_client: reqwest::Client::new(),
            api_url: SHEETS_API_URL.to_string(),
        }
    }

    /// アクセストークンを取得（期限内はキャッシュを使用）
    async fn get_token(&self) -> Result<String> {
        {
            let token = self.access_token.read().await;
            if let Some(ref t) = *token {
                if t.is_fresh(Utc::now()) {
                    debug!("キャッシュ済みのアクセストークンを使用");
                    return Ok(t.token.clone());
                }
            }
        }

        info!("アクセストークンを取得します");
        let new_token = get_access_token(&self.http_client, &self.credentials).await?;
        let token = new_token.token.clone();

        {
            let mut cached = self.access_token.write().await;
            *cached = Some(new_token);
        }

        Ok(token)
    }

    /// `values.update` のURL
    fn update_url(&self, spreadsheet_id: &str, range: &str) -> Result<Url, SheetsError> {
        let mut url =
            Url::parse(&self.api_url).map_err(|e| SheetsError::InvalidUrl(e.to_string()))?;

        url.path_segments_mut()
            .map_err(|_| SheetsError::InvalidUrl(self.api_url.clone()))?
            .extend([spreadsheet_id, "values", range]);

        url.query_pairs_mut()
            .append_pair("valueInputOption", VALUE_INPUT_OPTION)
            .append_pair("includeValuesInResponse", "false");

        Ok(url)
    }

    /// 1セルを更新
    pub async fn update_spreadsheet_cell(
        &self,
        spreadsheet_id: &str,
        cell: &CellAddress,
        value: &str,
    ) -> Result<bool> {
        let range = cell.range_notation();
        let url = self.update_url(spreadsheet_id, &range)?;

        let body = ValueRange {
            range: range.clone(),
            major_dimension: MAJOR_DIMENSION.to_string(),
            values: vec![vec![value.to_string()]],
        };

        let token = self.get_token().await?;

        info!(range = %range, "スプレッドシートのセルを更新");

        let response = self
            .http_client
            .put(url)
            .bearer_auth(&token)
            .json(&body)
            .send()
            .await
            .context("Sheets APIリクエストに失敗")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SheetsError::Http { status, body }.into());
        }

        let update: UpdateValuesResponse = response
            .json()
            .await
            .context("Sheets APIレスポンスのパースに失敗")?;

        Ok(check_update_response(spreadsheet_id, &update))
    }
}

impl CellWriter for SheetsClient {
    async fn update_cell(
        &self,
        spreadsheet_id: &str,
        cell: &CellAddress,
        value: &str,
    ) -> Result<bool> {
        self.update_spreadsheet_cell(spreadsheet_id, cell, value)
            .await
    }
}

/// 別のスプレッドシートが返ってきた場合は失敗扱い
fn check_update_response(spreadsheet_id: &str, update: &UpdateValuesResponse) -> bool {
    if update.spreadsheet_id != spreadsheet_id {
        warn!(response = ?update, "想定外のレスポンス");
        return false;
    }
    debug!(
        updated_range = ?update.updated_range,
        updated_cells = ?update.updated_cells,
        "セルを更新しました"
    );
    true
}

// Sheets API リクエスト/レスポンス構造体

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ValueRange {
    range: String,
    major_dimension: String,
    values: Vec<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateValuesResponse {
    spreadsheet_id: String,
    updated_range: Option<String>,
    updated_cells: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheets::cell::locate;
    use chrono::NaiveDate;

    fn client() -> SheetsClient {
        SheetsClient::with_credentials(ServiceAccountCredentials {
            client_email: "bot@example.com".into(),
            private_key: String::new(),
            token_uri: "https://oauth2.googleapis.com/token".into(),
        })
    }

    #[test]
    fn update_url_encodes_range() {
        let date = NaiveDate::from_ymd_opt(2023, 6, 16).unwrap();
        let cells = locate(15, None, date).unwrap();
        let url = client()
            .update_url("abc123", &cells.text.range_notation())
            .unwrap();

        assert_eq!(
            url.as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/abc123/values/\
             '2023-06-16%20Fri'!B17:B17\
             ?valueInputOption=USER_ENTERED&includeValuesInResponse=false"
        );
    }

    #[test]
    fn request_body_shape() {
        let body = ValueRange {
            range: "'s'!B3:B3".into(),
            major_dimension: MAJOR_DIMENSION.into(),
            values: vec![vec!["text".into()]],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "range": "'s'!B3:B3",
                "majorDimension": "ROWS",
                "values": [["text"]],
            })
        );
    }

    #[test]
    fn mismatched_spreadsheet_is_not_success() {
        let update: UpdateValuesResponse = serde_json::from_str(
            r#"{"spreadsheetId": "other", "updatedRange": "'s'!B3", "updatedCells": 1}"#,
        )
        .unwrap();
        assert!(!check_update_response("abc123", &update));
        assert!(check_update_response("other", &update));
    }

    #[test]
    fn response_without_spreadsheet_id_is_malformed() {
        let parsed = serde_json::from_str::<UpdateValuesResponse>(r#"{"updatedCells": 1}"#);
        assert!(parsed.is_err());
    }
}
