//! 問題番号からセル位置を求めるモジュール

use chrono::NaiveDate;
use std::fmt;
use thiserror::Error;

/// 前半ブロックの先頭番号
const FIRST_GROUP_START: u32 = 1;
/// 後半ブロックの先頭番号
const SECOND_GROUP_START: u32 = 16;
/// 後半ブロックの終端（この番号は含まない）
const SECOND_GROUP_END: u32 = 30;

/// 前半ブロックの行オフセット（見出し行の分）
const FIRST_GROUP_ROW_OFFSET: u32 = 2;
/// 後半ブロックの行オフセット（ブロック間の空白行の分）
const SECOND_GROUP_ROW_OFFSET: u32 = 5;

/// 問題文の列
pub const TEXT_COLUMN: char = 'B';
/// 配点の列
pub const POINTS_COLUMN: char = 'D';

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CellError {
    #[error("問題番号 {0} はシートの範囲外です (1〜29)")]
    OutOfRange(u32),
}

/// スプレッドシートのセル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellAddress {
    pub sheet_name: String,
    pub column: char,
    pub row: u32,
}

impl CellAddress {
    /// A1表記の範囲 `'2023-06-16 Fri'!B17:B17`
    pub fn range_notation(&self) -> String {
        format!(
            "'{sheet}'!{col}{row}:{col}{row}",
            sheet = self.sheet_name,
            col = self.column,
            row = self.row
        )
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.column, self.row)
    }
}

/// 1問分の書き込み先
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionCells {
    pub text: CellAddress,
    /// 配点が無い場合は書き込まない
    pub points: Option<CellAddress>,
}

/// シート名 `YYYY-MM-DD Ddd`
pub fn sheet_name(date: NaiveDate) -> String {
    date.format("%Y-%m-%d %a").to_string()
}

/// 問題番号の行
pub fn row_for(number: u32) -> Result<u32, CellError> {
    if !(FIRST_GROUP_START..SECOND_GROUP_END).contains(&number) {
        return Err(CellError::OutOfRange(number));
    }

    if number < SECOND_GROUP_START {
        Ok(number + FIRST_GROUP_ROW_OFFSET)
    } else {
        Ok(number + SECOND_GROUP_ROW_OFFSET)
    }
}

/// 問題番号・配点・日付から書き込み先セルを計算
pub fn locate(
    number: u32,
    points: Option<u32>,
    reference_date: NaiveDate,
) -> Result<QuestionCells, CellError> {
    let row = row_for(number)?;
    let sheet_name = sheet_name(reference_date);

    let points = points.map(|_| CellAddress {
        sheet_name: sheet_name.clone(),
        column: POINTS_COLUMN,
        row,
    });

    Ok(QuestionCells {
        text: CellAddress {
            sheet_name,
            column: TEXT_COLUMN,
            row,
        },
        points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn friday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 6, 16).unwrap()
    }

    #[test]
    fn question_fifteen_on_friday() {
        let cells = locate(15, Some(3), friday()).unwrap();
        assert_eq!(cells.text.sheet_name, "2023-06-16 Fri");
        assert_eq!(cells.text.to_string(), "B17");
        assert_eq!(cells.points.unwrap().to_string(), "D17");
    }

    #[test]
    fn first_block_rows() {
        for number in 1..16 {
            assert_eq!(row_for(number), Ok(number + 2));
        }
    }

    #[test]
    fn second_block_rows() {
        for number in 16..30 {
            assert_eq!(row_for(number), Ok(number + 5));
        }
    }

    #[test]
    fn out_of_range_is_rejected() {
        assert_eq!(row_for(0), Err(CellError::OutOfRange(0)));
        assert_eq!(row_for(30), Err(CellError::OutOfRange(30)));
        assert!(locate(31, Some(1), friday()).is_err());
    }

    #[test]
    fn no_points_cell_without_points() {
        let cells = locate(16, None, friday()).unwrap();
        assert_eq!(cells.text.row, 21);
        assert!(cells.points.is_none());
    }

    #[test]
    fn range_notation_quotes_sheet() {
        let cells = locate(1, None, friday()).unwrap();
        assert_eq!(cells.text.range_notation(), "'2023-06-16 Fri'!B3:B3");
    }

    #[test]
    fn sheet_name_weekday() {
        let monday = NaiveDate::from_ymd_opt(2023, 10, 9).unwrap();
        assert_eq!(sheet_name(monday), "2023-10-09 Mon");
    }
}
