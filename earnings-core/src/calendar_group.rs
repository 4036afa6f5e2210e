// =====================
// 発生主義のグルーピング（勤務日ベースの月・週）
// =====================

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::earnings::{earnings_for_shifts, Earnings};
use crate::shift_model::Shift;

/// 年・月の構造化キー
///
/// コアは文字列ラベルを持たない。"June 2026" のような表示文字列への
/// 変換は境界層（DTO / CLI）の仕事。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32, // 1-12
}

impl MonthKey {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

/// 指定日が属する「月曜始まりの週」の月曜日を返す
///
/// キーは暦日そのもの（NaiveDate）なので、時刻やDSTの影響は構造上受けない。
pub fn week_start_monday(date: NaiveDate) -> NaiveDate {
    let offset = date.weekday().num_days_from_monday() as i64;
    date - Duration::days(offset)
}

/// 週単位のグループ（キーはその週の月曜日）
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekGroup {
    pub week_start: NaiveDate,
    pub shifts: Vec<Shift>,
    pub earnings: Earnings,
}

/// 月単位のグループ（週グループ入り）
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthGroup {
    pub month: MonthKey,
    pub weeks: Vec<WeekGroup>,
    pub earnings: Earnings,
}

/// シフトを勤務開始日の属する月ごとに分ける
///
/// バケツ内の並びは渡された順のまま。月の並びも出現順
/// （並び替えが必要な呼び出し側でソートする）。
pub fn group_by_month(shifts: &[Shift]) -> Vec<(MonthKey, Vec<Shift>)> {
    let mut groups: Vec<(MonthKey, Vec<Shift>)> = Vec::new();
    for shift in shifts {
        let key = MonthKey::from_date(shift.start_day());
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, bucket)) => bucket.push(shift.clone()),
            None => groups.push((key, vec![shift.clone()])),
        }
    }
    groups
}

/// 月 -> 週 の入れ子グルーピング
///
/// 返り値の契約: 月は新しい順、月内の週も新しい順。
/// どのシフトもちょうど1つの週バケツに入る（取りこぼし・重複は不正）。
pub fn group_by_month_and_week(shifts: &[Shift], hourly_rate: f64, tax_rate: f64) -> Vec<MonthGroup> {
    let mut months = group_by_month(shifts);
    months.sort_by(|a, b| b.0.cmp(&a.0));

    months
        .into_iter()
        .map(|(month, month_shifts)| {
            // 月内を週（その週の月曜日）ごとに分ける
            let mut weeks: Vec<WeekGroup> = Vec::new();
            for shift in &month_shifts {
                let key = week_start_monday(shift.start_day());
                match weeks.iter_mut().find(|w| w.week_start == key) {
                    Some(week) => week.shifts.push(shift.clone()),
                    None => weeks.push(WeekGroup {
                        week_start: key,
                        shifts: vec![shift.clone()],
                        earnings: Earnings::ZERO,
                    }),
                }
            }
            weeks.sort_by(|a, b| b.week_start.cmp(&a.week_start));

            for week in &mut weeks {
                week.earnings = earnings_for_shifts(&week.shifts, hourly_rate, tax_rate);
            }
            let earnings = earnings_for_shifts(&month_shifts, hourly_rate, tax_rate);

            MonthGroup {
                month,
                weeks,
                earnings,
            }
        })
        .collect()
}

/// 集計対象期間（資金サマリーの絞り込みに使う）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Day,
    Week,
    Month,
    Year,
}

/// 基準日から見て「今日 / 今週 / 今月 / 今年」に開始するシフトだけを残す
pub fn filter_shifts_by_period(shifts: &[Shift], period: Period, today: NaiveDate) -> Vec<Shift> {
    shifts
        .iter()
        .filter(|s| {
            let d = s.start_day();
            match period {
                Period::Day => d == today,
                Period::Week => week_start_monday(d) == week_start_monday(today),
                Period::Month => d.year() == today.year() && d.month() == today.month(),
                Period::Year => d.year() == today.year(),
            }
        })
        .cloned()
        .collect()
}
