// =====================
// 勤務時間・給与の計算
// =====================

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::shift_model::Shift;

/// 給与の内訳（シフトと税率から毎回導出する。これ自体は保存しない）
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Earnings {
    pub hours: f64,
    pub gross: f64,
    pub deductions: f64,
    pub net: f64,
}

impl Earnings {
    pub const ZERO: Earnings = Earnings {
        hours: 0.0,
        gross: 0.0,
        deductions: 0.0,
        net: 0.0,
    };
}

/// 開始・終了から勤務時間（小数時間）を求める
///
/// 終了が開始以前の場合は 0 に切り詰める。
/// 壊れた区間から負の時間を作って集計に混ぜないための仕様。
pub fn duration_hours(start: NaiveDateTime, end: NaiveDateTime) -> f64 {
    let seconds = (end - start).num_seconds();
    (seconds as f64 / 3600.0).max(0.0)
}

/// 勤務時間・時給・税率から給与の内訳を計算する
///
/// tax_rate は通常 [0, 1) の割合。範囲外の値も拒否はせず、
/// そのまま計算に流す（検証は呼び出し側の責務）。
pub fn calculate_earnings(hours: f64, hourly_rate: f64, tax_rate: f64) -> Earnings {
    let gross = hours * hourly_rate;
    let deductions = gross * tax_rate;
    Earnings {
        hours,
        gross,
        deductions,
        net: gross - deductions,
    }
}

/// Earningsを成分ごとに合計する（順序に依存しない。空なら全成分0）
pub fn sum_earnings<'a, I>(list: I) -> Earnings
where
    I: IntoIterator<Item = &'a Earnings>,
{
    list.into_iter().fold(Earnings::ZERO, |acc, e| Earnings {
        hours: acc.hours + e.hours,
        gross: acc.gross + e.gross,
        deductions: acc.deductions + e.deductions,
        net: acc.net + e.net,
    })
}

/// シフト一覧の合計給与（1件ずつ計算してから合算する）
pub fn earnings_for_shifts(shifts: &[Shift], hourly_rate: f64, tax_rate: f64) -> Earnings {
    let per_shift: Vec<Earnings> = shifts
        .iter()
        .map(|s| calculate_earnings(duration_hours(s.start_date, s.end_date), hourly_rate, tax_rate))
        .collect();
    sum_earnings(per_shift.iter())
}
