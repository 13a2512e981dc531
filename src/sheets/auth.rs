//! Google サービスアカウント認証処理

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Sheets API の書き込みスコープ
const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

/// JWTの有効期間（秒）
const JWT_LIFETIME_SECS: i64 = 3600;

/// 期限切れ前に再取得する余裕
const EXPIRY_MARGIN_SECS: i64 = 60;

/// サービスアカウントの認証情報
#[derive(Debug, Deserialize)]
pub struct ServiceAccountCredentials {
    pub client_email: String,
    pub private_key: String,
    pub token_uri: String,
}

impl ServiceAccountCredentials {
    /// 認証ファイル (JSON) を読み込む
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("認証ファイルの読み込みに失敗: {:?}", path))?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("認証情報のパースに失敗")
    }
}

/// JWTクレーム
#[derive(Debug, Serialize)]
struct Claims {
    iss: String,
    scope: String,
    aud: String,
    exp: i64,
    iat: i64,
}

/// アクセストークンレスポンス
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
    #[allow(dead_code)]
    token_type: String,
}

/// 有効期限付きアクセストークン
#[derive(Debug, Clone)]
pub struct AccessToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl AccessToken {
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(EXPIRY_MARGIN_SECS) < self.expires_at
    }
}

/// アクセストークンを取得
pub async fn get_access_token(
    http_client: &reqwest::Client,
    credentials: &ServiceAccountCredentials,
) -> Result<AccessToken> {
    let now = Utc::now();

    let claims = Claims {
        iss: credentials.client_email.clone(),
        scope: SHEETS_SCOPE.to_string(),
        aud: credentials.token_uri.clone(),
        exp: now.timestamp() + JWT_LIFETIME_SECS,
        iat: now.timestamp(),
    };

    // RSA秘密鍵でJWTを署名
    let key = EncodingKey::from_rsa_pem(credentials.private_key.as_bytes())
        .context("RSA秘密鍵のパースに失敗")?;

    let header = Header::new(Algorithm::RS256);
    let jwt = encode(&header, &claims, &key).context("JWTの生成に失敗")?;

    let response = http_client
        .post(&credentials.token_uri)
        .form(&[
            ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
            ("assertion", &jwt),
        ])
        .send()
        .await
        .context("トークンリクエストに失敗")?;

    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        anyhow::bail!("トークンエンドポイント エラー ({}): {}", status, error_text);
    }

    let token_response: TokenResponse = response
        .json()
        .await
        .context("トークンレスポンスのパースに失敗")?;

    Ok(AccessToken {
        token: token_response.access_token,
        expires_at: now + Duration::seconds(token_response.expires_in),
    })
}
