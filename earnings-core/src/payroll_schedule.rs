// =====================
// 支払日の導出（勤務週 -> 支払日）
// =====================

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::Serialize;

/// 給与支払いポリシー
///
/// 週の締めと支払ラグは就業規則側の定数。呼び出し側で差し替えられるように
/// 名前を付けて持つ（コード中に 12 を直書きしない）。
#[derive(Debug, Clone, Copy)]
pub struct PayrollPolicy {
    /// 勤務週の開始曜日
    pub week_start: Weekday,
    /// 締め日（週末）から支払日までの日数
    pub pay_lag_days: i64,
}

impl Default for PayrollPolicy {
    fn default() -> Self {
        // 月曜始まりの週を日曜で締め、翌々週の金曜（12日後）に支払い
        Self {
            week_start: Weekday::Mon,
            pay_lag_days: 12,
        }
    }
}

/// 支払日の導出結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayDateDetails {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub pay_date: NaiveDate,
}

/// 勤務日から、その日が属する勤務週の区切りと支払日を導出する
///
/// 既定ポリシー（月曜始まり・ラグ12日）の例:
///
///  Mo Tu We Th Fr Sa Su
///  18 19 20 21 22 23 24   <- 勤務週 (week_start=18, week_end=24)
///  25 26 27 28 29 30 31   <- 処理週
///   1  2  3  4 [5]        <- 24 + 12日 = 翌々週の金曜が支払日
///
/// 加算はすべて暦日（NaiveDate）上で行うため、DSTによる1時間のずれで
/// 日付がずれることは構造上起こらない。
pub fn project_pay_date(work_date: NaiveDate, policy: &PayrollPolicy) -> PayDateDetails {
    let offset = work_date.weekday().days_since(policy.week_start) as i64;
    let week_start = work_date - Duration::days(offset);
    let week_end = week_start + Duration::days(6);
    let pay_date = week_end + Duration::days(policy.pay_lag_days);

    PayDateDetails {
        week_start,
        week_end,
        pay_date,
    }
}

/// 支払日の状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PayStatus {
    Paid,
    Processing,
    Pending,
}

/// 「処理中」とみなす支払日までの日数
pub const PROCESSING_WINDOW_DAYS: i64 = 7;

/// 基準日から見た支払日の状態を返す
///
/// - 支払日 <= 基準日          : Paid
/// - 残り 1〜7日               : Processing
/// - それより先                : Pending
///
/// 基準日は引数で注入する（テストを決定的にするため）。
pub fn classify_pay_status(pay_date: NaiveDate, today: NaiveDate) -> PayStatus {
    if pay_date <= today {
        return PayStatus::Paid;
    }
    let days_until = (pay_date - today).num_days();
    if days_until <= PROCESSING_WINDOW_DAYS {
        PayStatus::Processing
    } else {
        PayStatus::Pending
    }
}

#[cfg(test)]
mod payroll_schedule_tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_project_pay_date_default_policy() {
        let policy = PayrollPolicy::default();

        // 2026-05-18 (月) の勤務週は 18(月) - 24(日)、支払日は 6/5(金)
        let details = project_pay_date(d(2026, 5, 18), &policy);
        assert_eq!(details.week_start, d(2026, 5, 18));
        assert_eq!(details.week_end, d(2026, 5, 24));
        assert_eq!(details.pay_date, d(2026, 6, 5));
        assert_eq!(details.pay_date.weekday(), Weekday::Fri);

        // 週末の日曜も同じ勤務週に入る
        let sunday = project_pay_date(d(2026, 5, 24), &policy);
        assert_eq!(sunday, details);
    }

    #[test]
    fn test_custom_pay_lag() {
        // ラグを5日にすると締め日曜の翌金曜が支払日になる
        let policy = PayrollPolicy {
            week_start: Weekday::Mon,
            pay_lag_days: 5,
        };
        let details = project_pay_date(d(2026, 5, 20), &policy);
        assert_eq!(details.pay_date, d(2026, 5, 29));
        assert_eq!(details.pay_date.weekday(), Weekday::Fri);
    }

    #[test]
    fn test_classify_boundaries() {
        let pay_date = d(2026, 6, 5);

        // 支払日当日・過去は Paid
        assert_eq!(classify_pay_status(pay_date, d(2026, 6, 5)), PayStatus::Paid);
        assert_eq!(classify_pay_status(pay_date, d(2026, 6, 10)), PayStatus::Paid);

        // 残りちょうど7日までは Processing
        assert_eq!(classify_pay_status(pay_date, d(2026, 5, 29)), PayStatus::Processing);
        assert_eq!(classify_pay_status(pay_date, d(2026, 6, 4)), PayStatus::Processing);

        // 残り8日以上は Pending
        assert_eq!(classify_pay_status(pay_date, d(2026, 5, 28)), PayStatus::Pending);
    }
}
