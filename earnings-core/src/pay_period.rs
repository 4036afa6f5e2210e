// =====================
// 現金主義のグルーピング（支払日ベース）
// =====================

use chrono::NaiveDate;
use serde::Serialize;

use crate::calendar_group::MonthKey;
use crate::earnings::{earnings_for_shifts, sum_earnings, Earnings};
use crate::payroll_schedule::{classify_pay_status, project_pay_date, PayStatus, PayrollPolicy};
use crate::shift_model::Shift;

/// 支払日単位のグループ（1回の給与振込に対応する）
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayPeriodGroup {
    pub pay_date: NaiveDate,
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub status: PayStatus,
    pub shifts: Vec<Shift>,
    pub earnings: Earnings,
}

/// 支払月単位のグループ
///
/// 発生主義の MonthGroup と違い、「いつ働いたか」ではなく
/// 「いつ支払われるか」の月でまとめる。
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPayGroup {
    pub month: MonthKey,
    pub pay_periods: Vec<PayPeriodGroup>,
    pub total_earnings: Earnings,
}

/// シフトを支払日ごとにまとめ、さらに支払月へロールアップする
///
/// 並び順の契約（履歴ビューの既定）:
/// - 月は新しい順
/// - 月内の支払日は新しい順
/// - 支払日内のシフトは開始日時の新しい順
pub fn group_by_pay_period(
    shifts: &[Shift],
    hourly_rate: f64,
    tax_rate: f64,
    today: NaiveDate,
    policy: &PayrollPolicy,
) -> Vec<MonthlyPayGroup> {
    // 1. 支払日ごとにシフトを振り分ける
    let mut periods: Vec<PayPeriodGroup> = Vec::new();
    for shift in shifts {
        let details = project_pay_date(shift.start_day(), policy);
        match periods.iter_mut().find(|p| p.pay_date == details.pay_date) {
            Some(period) => period.shifts.push(shift.clone()),
            None => periods.push(PayPeriodGroup {
                pay_date: details.pay_date,
                week_start: details.week_start,
                week_end: details.week_end,
                status: classify_pay_status(details.pay_date, today),
                shifts: vec![shift.clone()],
                earnings: Earnings::ZERO,
            }),
        }
    }

    // 2. 各支払期間の給与と並び順を確定する
    for period in &mut periods {
        period.earnings = earnings_for_shifts(&period.shifts, hourly_rate, tax_rate);
        period.shifts.sort_by(|a, b| b.start_date.cmp(&a.start_date));
    }

    // 3. 支払期間（シフトではない）を支払月へまとめる
    let mut months: Vec<MonthlyPayGroup> = Vec::new();
    for period in periods {
        let key = MonthKey::from_date(period.pay_date);
        match months.iter_mut().find(|m| m.month == key) {
            Some(month) => month.pay_periods.push(period),
            None => months.push(MonthlyPayGroup {
                month: key,
                pay_periods: vec![period],
                total_earnings: Earnings::ZERO,
            }),
        }
    }

    // 4. 月合計と並び順を確定する
    for month in &mut months {
        month.total_earnings = sum_earnings(month.pay_periods.iter().map(|p| &p.earnings));
        month.pay_periods.sort_by(|a, b| b.pay_date.cmp(&a.pay_date));
    }
    months.sort_by(|a, b| b.month.cmp(&a.month));

    months
}
