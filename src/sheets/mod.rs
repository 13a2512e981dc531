//! Google Sheets 連携モジュール

pub mod auth;
pub mod cell;
pub mod client;

use anyhow::Result;
use std::future::Future;

pub use cell::{CellAddress, CellError, QuestionCells, locate};
pub use client::{SheetsClient, SheetsError};

/// セル書き込み先
pub trait CellWriter {
    /// 1セルを更新し、成功したかを返す
    fn update_cell(
        &self,
        spreadsheet_id: &str,
        cell: &CellAddress,
        value: &str,
    ) -> impl Future<Output = Result<bool>> + Send;
}

impl<W: CellWriter> CellWriter for &W {
    fn update_cell(
        &self,
        spreadsheet_id: &str,
        cell: &CellAddress,
        value: &str,
    ) -> impl Future<Output = Result<bool>> + Send {
        (**self).update_cell(spreadsheet_id, cell, value)
    }
}
