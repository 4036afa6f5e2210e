// グルーピングの分配則（取りこぼし・重複なし）と並び順の契約を確認する

#[cfg(test)]
mod grouping_test {
    use std::collections::HashSet;

    use chrono::NaiveDate;
    use earnings_core::calendar_group::{group_by_month, group_by_month_and_week};
    use earnings_core::earnings::{
        calculate_earnings, duration_hours, earnings_for_shifts, sum_earnings, Earnings,
    };
    use earnings_core::pay_period::group_by_pay_period;
    use earnings_core::payroll_schedule::{PayStatus, PayrollPolicy};
    use earnings_core::shift_model::{parse_iso_datetime, Shift, ShiftStatus};

    const HOURLY_RATE: f64 = 13.50;
    const TAX_RATE: f64 = 0.2262;
    const EPS: f64 = 1e-9;

    fn shift(id: &str, start: &str, end: &str) -> Shift {
        Shift {
            id: id.to_string(),
            start_date: parse_iso_datetime(start).unwrap(),
            end_date: parse_iso_datetime(end).unwrap(),
            job_name: "Event Security".to_string(),
            venue_name: "Lucas Oil Stadium".to_string(),
            address: "500 S Capitol Ave, Indianapolis, IN".to_string(),
            status: ShiftStatus::Confirmed,
            source: None,
        }
    }

    /// 5月中旬〜6月頭に散らばったテストデータ
    /// (勤務週は 5/11週, 5/18週, 5/25週, 6/1週 の4つ)
    fn sample_shifts() -> Vec<Shift> {
        vec![
            shift("s1", "2026-05-18T17:00:00Z", "2026-05-18T23:00:00Z"), // 月曜 6h
            shift("s2", "2026-05-20T10:00:00Z", "2026-05-20T18:30:00Z"), // 同じ週 8.5h
            shift("s3", "2026-05-26T09:00:00Z", "2026-05-26T17:00:00Z"), // 翌週 8h
            shift("s4", "2026-05-11T12:00:00Z", "2026-05-11T20:00:00Z"), // 前週 8h
            shift("s5", "2026-06-01T16:00:00Z", "2026-06-01T22:00:00Z"), // 6月 6h
        ]
    }

    fn assert_earnings_eq(a: &Earnings, b: &Earnings) {
        assert!((a.hours - b.hours).abs() < EPS, "hours {} vs {}", a.hours, b.hours);
        assert!((a.gross - b.gross).abs() < EPS, "gross {} vs {}", a.gross, b.gross);
        assert!((a.deductions - b.deductions).abs() < EPS);
        assert!((a.net - b.net).abs() < EPS);
    }

    /// 具体シナリオ: 6時間 x 時給13.50 x 税率0.2262
    #[test]
    fn test_single_shift_earnings() {
        let s = shift("s1", "2026-05-18T17:00:00Z", "2026-05-18T23:00:00Z");
        let hours = duration_hours(s.start_date, s.end_date);
        assert!((hours - 6.0).abs() < EPS);

        let e = calculate_earnings(hours, HOURLY_RATE, TAX_RATE);
        assert!((e.gross - 81.00).abs() < EPS);
        assert!((e.deductions - 18.3222).abs() < EPS);
        assert!((e.net - 62.6778).abs() < EPS);
    }

    /// 合計は並び順に依存しないこと
    #[test]
    fn test_sum_is_order_independent() {
        let shifts = sample_shifts();
        let per_shift: Vec<Earnings> = shifts
            .iter()
            .map(|s| calculate_earnings(duration_hours(s.start_date, s.end_date), HOURLY_RATE, TAX_RATE))
            .collect();

        let baseline = sum_earnings(per_shift.iter());

        // 逆順
        let reversed: Vec<&Earnings> = per_shift.iter().rev().collect();
        assert_earnings_eq(&baseline, &sum_earnings(reversed));

        // 回転 (1つずらし)
        let rotated: Vec<&Earnings> = per_shift[1..].iter().chain(per_shift[..1].iter()).collect();
        assert_earnings_eq(&baseline, &sum_earnings(rotated));
    }

    /// 1件ずつの合算と一括計算が一致すること
    #[test]
    fn test_aggregation_round_trip() {
        let shifts = sample_shifts();
        let whole = earnings_for_shifts(&shifts, HOURLY_RATE, TAX_RATE);

        let per_shift: Vec<Earnings> = shifts
            .iter()
            .map(|s| calculate_earnings(duration_hours(s.start_date, s.end_date), HOURLY_RATE, TAX_RATE))
            .collect();
        assert_earnings_eq(&whole, &sum_earnings(per_shift.iter()));
    }

    /// 分配則: どのグルーピングでも全シフトがちょうど1回ずつ現れること
    #[test]
    fn test_groupings_are_partitions() {
        let shifts = sample_shifts();
        let input_ids: HashSet<&str> = shifts.iter().map(|s| s.id.as_str()).collect();

        // 発生主義 (月)
        let mut seen = Vec::new();
        for (_, bucket) in group_by_month(&shifts) {
            seen.extend(bucket.iter().map(|s| s.id.clone()));
        }
        assert_eq!(seen.len(), shifts.len(), "月グループに重複・欠落がある");
        assert_eq!(seen.iter().map(|s| s.as_str()).collect::<HashSet<_>>(), input_ids);

        // 発生主義 (月 -> 週)
        let mut seen = Vec::new();
        for month in group_by_month_and_week(&shifts, HOURLY_RATE, TAX_RATE) {
            for week in &month.weeks {
                seen.extend(week.shifts.iter().map(|s| s.id.clone()));
            }
        }
        assert_eq!(seen.len(), shifts.len(), "週グループに重複・欠落がある");
        assert_eq!(seen.iter().map(|s| s.as_str()).collect::<HashSet<_>>(), input_ids);

        // 現金主義 (支払月 -> 支払日)
        let today = NaiveDate::from_ymd_opt(2026, 5, 30).unwrap();
        let mut seen = Vec::new();
        for month in group_by_pay_period(&shifts, HOURLY_RATE, TAX_RATE, today, &PayrollPolicy::default()) {
            for period in &month.pay_periods {
                seen.extend(period.shifts.iter().map(|s| s.id.clone()));
            }
        }
        assert_eq!(seen.len(), shifts.len(), "支払期間に重複・欠落がある");
        assert_eq!(seen.iter().map(|s| s.as_str()).collect::<HashSet<_>>(), input_ids);
    }

    /// 具体シナリオ: 同月・別週の2シフトは2つの週グループになり、
    /// 週の合計は月の合計と厳密に一致する
    #[test]
    fn test_two_weeks_sum_to_month_total() {
        let shifts = vec![
            shift("a", "2026-05-18T17:00:00Z", "2026-05-18T23:00:00Z"),
            shift("b", "2026-05-26T09:00:00Z", "2026-05-26T17:00:00Z"),
        ];

        let months = group_by_month_and_week(&shifts, HOURLY_RATE, TAX_RATE);
        assert_eq!(months.len(), 1);

        let month = &months[0];
        assert_eq!((month.month.year, month.month.month), (2026, 5));
        assert_eq!(month.weeks.len(), 2);

        // 週は新しい順 (5/25週 -> 5/18週)
        assert_eq!(month.weeks[0].week_start, NaiveDate::from_ymd_opt(2026, 5, 25).unwrap());
        assert_eq!(month.weeks[1].week_start, NaiveDate::from_ymd_opt(2026, 5, 18).unwrap());

        let week_total = sum_earnings(month.weeks.iter().map(|w| &w.earnings));
        assert_earnings_eq(&week_total, &month.earnings);
    }

    /// 月・週は新しい順で返ること
    #[test]
    fn test_accrual_sort_contract() {
        let months = group_by_month_and_week(&sample_shifts(), HOURLY_RATE, TAX_RATE);

        assert_eq!(months.len(), 2);
        assert_eq!((months[0].month.year, months[0].month.month), (2026, 6));
        assert_eq!((months[1].month.year, months[1].month.month), (2026, 5));

        // 5月は3週 (5/25, 5/18, 5/11) が降順で並ぶ
        let may_weeks: Vec<NaiveDate> = months[1].weeks.iter().map(|w| w.week_start).collect();
        assert_eq!(
            may_weeks,
            vec![
                NaiveDate::from_ymd_opt(2026, 5, 25).unwrap(),
                NaiveDate::from_ymd_opt(2026, 5, 18).unwrap(),
                NaiveDate::from_ymd_opt(2026, 5, 11).unwrap(),
            ]
        );
    }

    /// 現金主義: 月 -> 支払日 -> シフト の三重降順ソートと状態分類
    #[test]
    fn test_pay_period_sort_and_status_contract() {
        let shifts = sample_shifts();
        let today = NaiveDate::from_ymd_opt(2026, 5, 30).unwrap();

        let months = group_by_pay_period(&shifts, HOURLY_RATE, TAX_RATE, today, &PayrollPolicy::default());

        // 支払月: 6月 (6/19, 6/12, 6/5) と 5月 (5/29)
        assert_eq!(months.len(), 2);
        assert_eq!((months[0].month.year, months[0].month.month), (2026, 6));
        assert_eq!((months[1].month.year, months[1].month.month), (2026, 5));

        let june = &months[0];
        let june_dates: Vec<NaiveDate> = june.pay_periods.iter().map(|p| p.pay_date).collect();
        assert_eq!(
            june_dates,
            vec![
                NaiveDate::from_ymd_opt(2026, 6, 19).unwrap(), // 6/1週 (s5)
                NaiveDate::from_ymd_opt(2026, 6, 12).unwrap(), // 5/25週 (s3)
                NaiveDate::from_ymd_opt(2026, 6, 5).unwrap(),  // 5/18週 (s1, s2)
            ]
        );

        // 5/30時点の状態: 6/19は Pending、6/5は Processing、5/29は Paid
        assert_eq!(june.pay_periods[0].status, PayStatus::Pending);
        assert_eq!(june.pay_periods[2].status, PayStatus::Processing);
        assert_eq!(months[1].pay_periods[0].status, PayStatus::Paid);

        // 支払日内のシフトは開始日時の新しい順 (s2 -> s1)
        let pay_jun5 = &june.pay_periods[2];
        let ids: Vec<&str> = pay_jun5.shifts.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["s2", "s1"]);

        // 月合計は支払期間の合計と一致する
        let june_total = sum_earnings(june.pay_periods.iter().map(|p| &p.earnings));
        assert_earnings_eq(&june_total, &june.total_earnings);
    }

    /// 逆転した区間のシフトは 0時間として集計され、グループからは消えないこと
    #[test]
    fn test_reversed_interval_stays_in_groups() {
        let shifts = vec![
            shift("ok", "2026-05-18T17:00:00Z", "2026-05-18T23:00:00Z"),
            shift("broken", "2026-05-19T23:00:00Z", "2026-05-19T17:00:00Z"),
        ];

        let months = group_by_month_and_week(&shifts, HOURLY_RATE, TAX_RATE);
        assert_eq!(months[0].weeks[0].shifts.len(), 2);

        // 合計は正常な1件分と同じ
        let expected = calculate_earnings(6.0, HOURLY_RATE, TAX_RATE);
        assert_earnings_eq(&months[0].earnings, &expected);
    }
}
