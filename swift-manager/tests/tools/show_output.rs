use swift_manager_lib::application::dto::MonthlyPayDto;

pub fn show_income_history_debug_data(months: &[MonthlyPayDto]) {
    println!("\n=======================================================");
    println!("💰 [DEBUG] 給与履歴 (計 {} か月)", months.len());
    println!("=======================================================");

    for month in months {
        println!(
            "📅 {} | paycheck {}件 | 合計 net ${:.2} ({:.1}h)",
            month.month_label,
            month.pay_periods.len(),
            month.total_earnings.net,
            month.total_earnings.hours
        );
        for period in &month.pay_periods {
            println!(
                "   ┣ {} ({}) [{:?}] : net ${:.2} / {:.1}h / シフト{}件",
                period.pay_date_label,
                period.work_week_label,
                period.status,
                period.earnings.net,
                period.earnings.hours,
                period.shifts.len()
            );
        }
    }
    println!("=======================================================\n");
}
