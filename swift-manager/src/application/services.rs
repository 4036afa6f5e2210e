use std::collections::HashSet;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use earnings_core::calendar_group::{
    filter_shifts_by_period, group_by_month, group_by_month_and_week, Period,
};
use earnings_core::earnings::{calculate_earnings, duration_hours, earnings_for_shifts, Earnings};
use earnings_core::pay_period::group_by_pay_period;
use earnings_core::payroll_schedule::PayrollPolicy;
use earnings_core::shift_model::{Shift, ShiftId, ShiftSource, ShiftStatus};

use crate::application::dto::{MonthGroupDto, MonthShiftsDto, MonthlyPayDto};
use crate::application::format;
use crate::domain::shift_lifecycle;
use crate::AppServices;

// =================================================================
// 1. Schedule Queries (予定の取得)
// =================================================================

/// 一覧の並び替え指定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    #[default]
    DateDesc,
    DateAsc,
    Earnings,
    Duration,
}

/// 一覧の絞り込み・並び替え条件
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleFilter {
    pub search_query: Option<String>,
    pub date_start: Option<NaiveDate>,
    pub date_end: Option<NaiveDate>,
    #[serde(default)]
    pub sort_by: SortOption,
}

/// 予定一覧（今後 / 過去に分割済み）
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleView {
    pub upcoming: Vec<Shift>,
    pub past: Vec<Shift>,
    pub grouped_upcoming: Vec<MonthShiftsDto>,
}

/// 自分の予定（確定済み・手入力・読み取り登録）を取得する
pub async fn get_my_schedule(services: &AppServices) -> Result<Vec<Shift>, String> {
    let all = services.schedule.list_all().await?;
    Ok(all
        .into_iter()
        .filter(|s| shift_lifecycle::is_my_schedule(s))
        .collect())
}

/// 絞り込みと並び替えを適用する
fn apply_filters_and_sort(
    mut shifts: Vec<Shift>,
    filter: &ScheduleFilter,
    hourly_rate: f64,
    tax_rate: f64,
) -> Vec<Shift> {
    if let Some(q) = &filter.search_query {
        let q = q.to_lowercase();
        if !q.is_empty() {
            shifts.retain(|s| {
                s.job_name.to_lowercase().contains(&q) || s.venue_name.to_lowercase().contains(&q)
            });
        }
    }
    if let Some(from) = filter.date_start {
        shifts.retain(|s| s.start_day() >= from);
    }
    if let Some(to) = filter.date_end {
        shifts.retain(|s| s.start_day() <= to);
    }

    let net_of = |s: &Shift| {
        calculate_earnings(duration_hours(s.start_date, s.end_date), hourly_rate, tax_rate).net
    };

    match filter.sort_by {
        SortOption::DateDesc => shifts.sort_by(|a, b| b.start_date.cmp(&a.start_date)),
        SortOption::DateAsc => shifts.sort_by(|a, b| a.start_date.cmp(&b.start_date)),
        SortOption::Earnings => shifts.sort_by(|a, b| {
            net_of(b)
                .partial_cmp(&net_of(a))
                .unwrap_or(std::cmp::Ordering::Equal)
        }),
        SortOption::Duration => shifts.sort_by(|a, b| {
            let dur_a = duration_hours(a.start_date, a.end_date);
            let dur_b = duration_hours(b.start_date, b.end_date);
            dur_b.partial_cmp(&dur_a).unwrap_or(std::cmp::Ordering::Equal)
        }),
    }
    shifts
}

/// 予定一覧ビュー
///
/// `now` は必ず呼び出し側から渡す（1リクエストにつき時計の読み取りは1回）。
pub async fn get_schedule_view(
    services: &AppServices,
    filter: &ScheduleFilter,
    now: NaiveDateTime,
) -> Result<ScheduleView, String> {
    let tax_rate = services.settings.get_tax_rate().await?;
    let hourly_rate = services.settings.get_hourly_rate().await?;

    let mine = get_my_schedule(services).await?;
    let sorted = apply_filters_and_sort(mine, filter, hourly_rate, tax_rate);

    // 終了日時で 今後 / 過去 に分ける
    let (mut upcoming, past): (Vec<Shift>, Vec<Shift>) =
        sorted.into_iter().partition(|s| s.end_date >= now);

    // 既定の新しい順のときだけ、直近の予定が先頭に来るように昇順へ戻す
    if filter.sort_by == SortOption::DateDesc {
        upcoming.reverse();
    }

    let grouped_upcoming = group_by_month(&upcoming)
        .into_iter()
        .map(|(key, shifts)| MonthShiftsDto {
            month_label: format::month_label(key),
            shifts,
        })
        .collect();

    Ok(ScheduleView {
        upcoming,
        past,
        grouped_upcoming,
    })
}

// =================================================================
// 2. Earnings Queries (給与の集計)
// =================================================================

/// 資金サマリー（今週・今月の合計）
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    pub week: Earnings,
    pub month: Earnings,
}

pub async fn get_financial_summary(
    services: &AppServices,
    today: NaiveDate,
) -> Result<FinancialSummary, String> {
    let tax_rate = services.settings.get_tax_rate().await?;
    let hourly_rate = services.settings.get_hourly_rate().await?;
    let mine = get_my_schedule(services).await?;

    let week_shifts = filter_shifts_by_period(&mine, Period::Week, today);
    let month_shifts = filter_shifts_by_period(&mine, Period::Month, today);

    Ok(FinancialSummary {
        week: earnings_for_shifts(&week_shifts, hourly_rate, tax_rate),
        month: earnings_for_shifts(&month_shifts, hourly_rate, tax_rate),
    })
}

/// 給与履歴（支払月ごとの現金主義ビュー）。終了済みのシフトが対象
pub async fn get_income_history(
    services: &AppServices,
    now: NaiveDateTime,
) -> Result<Vec<MonthlyPayDto>, String> {
    let tax_rate = services.settings.get_tax_rate().await?;
    let hourly_rate = services.settings.get_hourly_rate().await?;

    let past: Vec<Shift> = get_my_schedule(services)
        .await?
        .into_iter()
        .filter(|s| s.end_date < now)
        .collect();

    let groups = group_by_pay_period(
        &past,
        hourly_rate,
        tax_rate,
        now.date(),
        &PayrollPolicy::default(),
    );
    Ok(groups.into_iter().map(MonthlyPayDto::from_group).collect())
}

/// 発生主義の月・週グルーピング（勤務日ベース）
pub async fn get_monthly_breakdown(services: &AppServices) -> Result<Vec<MonthGroupDto>, String> {
    let tax_rate = services.settings.get_tax_rate().await?;
    let hourly_rate = services.settings.get_hourly_rate().await?;
    let mine = get_my_schedule(services).await?;

    let groups = group_by_month_and_week(&mine, hourly_rate, tax_rate);
    Ok(groups.into_iter().map(MonthGroupDto::from_group).collect())
}

// =================================================================
// 3. Marketplace (募集と受注)
// =================================================================

/// 募集中のシフト一覧
pub async fn get_available_shifts(services: &AppServices) -> Result<Vec<Shift>, String> {
    let all = services.schedule.list_all().await?;
    Ok(all
        .into_iter()
        .filter(|s| shift_lifecycle::is_available(s))
        .collect())
}

/// 雇用主が掲載したシフト一覧（状態つき）
pub async fn get_employer_shifts(services: &AppServices) -> Result<Vec<Shift>, String> {
    let all = services.schedule.list_all().await?;
    Ok(all
        .into_iter()
        .filter(|s| shift_lifecycle::is_marketplace_posting(s))
        .collect())
}

/// シフトへ応募する (AVAILABLE -> REQUESTED)
pub async fn request_shift(services: &AppServices, shift_id: &str) -> Result<(), String> {
    let mut shift = services
        .schedule
        .find_by_id(shift_id)
        .await?
        .ok_or_else(|| format!("Shift not found: {}", shift_id))?;

    shift_lifecycle::request(&mut shift)
        .map_err(|e| format!("このシフトには応募できません ({:?})", e))?;

    services.schedule.update_status(shift_id, shift.status).await
}

/// 応募を承認する (REQUESTED -> CONFIRMED)
pub async fn approve_request(services: &AppServices, shift_id: &str) -> Result<(), String> {
    let mut shift = services
        .schedule
        .find_by_id(shift_id)
        .await?
        .ok_or_else(|| format!("Shift not found: {}", shift_id))?;

    shift_lifecycle::approve(&mut shift)
        .map_err(|e| format!("承認できない状態です ({:?})", e))?;

    services.schedule.update_status(shift_id, shift.status).await
}

/// 雇用主の新規掲載データ（IDと状態はこちらで採番する）
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewShiftInput {
    #[serde(with = "earnings_core::shift_model::iso_datetime")]
    pub start_date: NaiveDateTime,
    #[serde(with = "earnings_core::shift_model::iso_datetime")]
    pub end_date: NaiveDateTime,
    pub job_name: String,
    pub venue_name: String,
    pub address: String,
}

/// マーケットプレイスへ新しい募集枠を掲載する
pub async fn post_shift(services: &AppServices, input: NewShiftInput) -> Result<ShiftId, String> {
    let shift = Shift {
        id: Uuid::new_v4().to_string(),
        start_date: input.start_date,
        end_date: input.end_date,
        job_name: input.job_name,
        venue_name: input.venue_name,
        address: input.address,
        status: ShiftStatus::Available,
        source: Some(ShiftSource::Marketplace),
    };

    services.schedule.insert(&shift).await?;
    Ok(shift.id)
}

// =================================================================
// 4. Import & Maintenance (取り込み・管理)
// =================================================================

/// 画像・テキスト読み取り結果の取り込み
///
/// 既存IDと重複しないものだけを、確定済み (CONFIRMED / OCR) として保存する。
/// 取り込んだ件数を返す。
pub async fn import_extracted_shifts(
    services: &AppServices,
    parsed: Vec<Shift>,
) -> Result<usize, String> {
    let existing: HashSet<ShiftId> = services
        .schedule
        .list_all()
        .await?
        .into_iter()
        .map(|s| s.id)
        .collect();

    let to_add: Vec<Shift> = parsed
        .into_iter()
        .filter(|s| !existing.contains(&s.id))
        .map(|mut s| {
            s.status = ShiftStatus::Confirmed;
            s.source = Some(ShiftSource::Ocr);
            s
        })
        .collect();

    services.schedule.save_all(&to_add).await?;
    Ok(to_add.len())
}

pub async fn delete_shift(services: &AppServices, shift_id: &str) -> Result<(), String> {
    services.schedule.delete(shift_id).await
}

// =================================================================
// 5. Settings (税率・時給)
// =================================================================

pub async fn get_tax_rate(services: &AppServices) -> Result<f64, String> {
    services.settings.get_tax_rate().await
}

pub async fn set_tax_rate(services: &AppServices, rate: f64) -> Result<(), String> {
    services.settings.set_tax_rate(rate).await
}

pub async fn get_hourly_rate(services: &AppServices) -> Result<f64, String> {
    services.settings.get_hourly_rate().await
}

pub async fn set_hourly_rate(services: &AppServices, rate: f64) -> Result<(), String> {
    services.settings.set_hourly_rate(rate).await
}
