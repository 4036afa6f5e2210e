use chrono::Duration;
use serde::Serialize;

use earnings_core::calendar_group::{MonthGroup, WeekGroup};
use earnings_core::earnings::Earnings;
use earnings_core::pay_period::{MonthlyPayGroup, PayPeriodGroup};
use earnings_core::payroll_schedule::PayStatus;
use earnings_core::shift_model::Shift;

use crate::application::format;

/// 支払期間（1回の給与振込）の表示用DTO
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayPeriodDto {
    pub pay_date_iso: String,
    pub pay_date_label: String,  // 例: "Fri, Jun 5"
    pub work_week_label: String, // 例: "5/18 - 5/24"
    pub status: PayStatus,
    pub shifts: Vec<Shift>,
    pub earnings: Earnings,
}

impl PayPeriodDto {
    pub fn from_group(group: PayPeriodGroup) -> Self {
        Self {
            pay_date_iso: format::iso_date(group.pay_date),
            pay_date_label: format::pay_date_label(group.pay_date),
            work_week_label: format::week_range_label(group.week_start, group.week_end),
            status: group.status,
            shifts: group.shifts,
            earnings: group.earnings,
        }
    }
}

/// 支払月の表示用DTO
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPayDto {
    pub month_label: String,
    pub year: i32,
    pub month_index: u32, // 0始まり (フロントエンドの月インデックスに合わせる)
    pub pay_periods: Vec<PayPeriodDto>,
    pub total_earnings: Earnings,
}

impl MonthlyPayDto {
    pub fn from_group(group: MonthlyPayGroup) -> Self {
        Self {
            month_label: format::month_label(group.month),
            year: group.month.year,
            month_index: group.month.month - 1,
            pay_periods: group
                .pay_periods
                .into_iter()
                .map(PayPeriodDto::from_group)
                .collect(),
            total_earnings: group.total_earnings,
        }
    }
}

/// 発生主義ビューの週グループ
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekGroupDto {
    pub week_label: String,
    pub shifts: Vec<Shift>,
    pub earnings: Earnings,
}

impl WeekGroupDto {
    pub fn from_group(group: WeekGroup) -> Self {
        let week_end = group.week_start + Duration::days(6);
        Self {
            week_label: format::week_range_label(group.week_start, week_end),
            shifts: group.shifts,
            earnings: group.earnings,
        }
    }
}

/// 発生主義ビューの月グループ
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthGroupDto {
    pub month_label: String,
    pub weeks: Vec<WeekGroupDto>,
    pub earnings: Earnings,
}

impl MonthGroupDto {
    pub fn from_group(group: MonthGroup) -> Self {
        Self {
            month_label: format::month_label(group.month),
            weeks: group.weeks.into_iter().map(WeekGroupDto::from_group).collect(),
            earnings: group.earnings,
        }
    }
}

/// 予定一覧用: 月ラベルつきのシフト束
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthShiftsDto {
    pub month_label: String,
    pub shifts: Vec<Shift>,
}
