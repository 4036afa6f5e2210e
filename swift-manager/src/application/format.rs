// 表示ラベルの組み立て
//
// コアは構造化キー (MonthKey / NaiveDate) しか返さないので、
// フロントエンド向けの文字列はすべてここで作る。

use chrono::{Datelike, NaiveDate};
use earnings_core::calendar_group::MonthKey;

/// "June 2026" 形式の月ラベル
pub fn month_label(month: MonthKey) -> String {
    match NaiveDate::from_ymd_opt(month.year, month.month, 1) {
        Some(d) => d.format("%B %Y").to_string(),
        None => format!("{}-{:02}", month.year, month.month), // 不正なキーはそのまま出す
    }
}

/// "Fri, Jun 5" 形式の支払日ラベル
pub fn pay_date_label(date: NaiveDate) -> String {
    date.format("%a, %b %-d").to_string()
}

/// "5/18 - 5/24" 形式の勤務週ラベル
pub fn week_range_label(start: NaiveDate, end: NaiveDate) -> String {
    format!("{}/{} - {}/{}", start.month(), start.day(), end.month(), end.day())
}

/// "2026-06-05" 形式 (ISOローカル日付)
pub fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
