use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;

use chrono::{Local, NaiveDate};

use earnings_core::calendar_group::group_by_month_and_week;
use earnings_core::pay_period::group_by_pay_period;
use earnings_core::payroll_schedule::PayrollPolicy;
use earnings_core::rates;
use earnings_core::shift_model::Shift;
use swift_manager_lib::application::dto::{MonthGroupDto, MonthlyPayDto};

// 引数を構造体として定義します
#[derive(Parser)]
#[command(name = "schedule_tools")]
#[command(version = "0.1.0")]
#[command(about = "スケジュールデータ(JSON)の集計・点検をします", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 支払日ごとの給与サマリーを表示します
    PaySummary {
        /// シフトデータファイル (Shiftの配列のJSON)
        file: PathBuf,

        /// 税率 (0.0 - 1.0)。省略時はプリセットの合計
        #[arg(short, long)]
        tax_rate: Option<f64>,

        /// 時給。省略時は既定値
        #[arg(long)]
        hourly_rate: Option<f64>,

        /// 基準日 (YYYY-MM-DD)。省略時は今日
        #[arg(short, long)]
        now: Option<NaiveDate>,

        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// 勤務月・勤務週ごとの集計を表示します
    MonthSummary {
        /// シフトデータファイル (Shiftの配列のJSON)
        file: PathBuf,

        /// 税率 (0.0 - 1.0)。省略時はプリセットの合計
        #[arg(short, long)]
        tax_rate: Option<f64>,

        /// 時給。省略時は既定値
        #[arg(long)]
        hourly_rate: Option<f64>,
    },
}

/// ファイルからシフト配列を読み込む
fn load_shifts(file: &PathBuf) -> Option<Vec<Shift>> {
    match fs::read_to_string(file) {
        Ok(text) => match serde_json::from_str::<Vec<Shift>>(&text) {
            Ok(shifts) => Some(shifts),
            Err(e) => {
                eprintln!("ファイルが形式に沿っていません: {}", e);
                None
            }
        },
        Err(e) => {
            eprintln!("エラー: ファイル '{}' を読めませんでした: {}", file.display(), e);
            None
        }
    }
}

fn pay_summary(
    file: PathBuf,
    tax_rate: Option<f64>,
    hourly_rate: Option<f64>,
    now: Option<NaiveDate>,
    out: Option<PathBuf>,
) {
    let Some(shifts) = load_shifts(&file) else {
        return;
    };

    let tax_rate = tax_rate.unwrap_or_else(|| rates::TAX_RATES.total());
    let hourly_rate = hourly_rate.unwrap_or(rates::HOURLY_RATE);
    // 時計を読むのはここだけ。以降の計算には日付だけを渡す
    let today = now.unwrap_or_else(|| Local::now().date_naive());

    let months: Vec<MonthlyPayDto> =
        group_by_pay_period(&shifts, hourly_rate, tax_rate, today, &PayrollPolicy::default())
            .into_iter()
            .map(MonthlyPayDto::from_group)
            .collect();

    if let Some(path) = out {
        let json = serde_json::to_string_pretty(&months).unwrap();
        if let Err(_e) = fs::write(path, json) {
            eprintln!("ファイルの書き込みに失敗しました");
        }
        return;
    }

    for month in &months {
        println!(
            "{} | paycheck {}件 | net ${:.2} ({:.1}h)",
            month.month_label,
            month.pay_periods.len(),
            month.total_earnings.net,
            month.total_earnings.hours
        );
        for period in &month.pay_periods {
            println!(
                "  {} ({}) [{:?}] net ${:.2} / {:.1}h / シフト{}件",
                period.pay_date_label,
                period.work_week_label,
                period.status,
                period.earnings.net,
                period.earnings.hours,
                period.shifts.len()
            );
        }
    }
}

fn month_summary(file: PathBuf, tax_rate: Option<f64>, hourly_rate: Option<f64>) {
    let Some(shifts) = load_shifts(&file) else {
        return;
    };

    let tax_rate = tax_rate.unwrap_or_else(|| rates::TAX_RATES.total());
    let hourly_rate = hourly_rate.unwrap_or(rates::HOURLY_RATE);

    let months: Vec<MonthGroupDto> = group_by_month_and_week(&shifts, hourly_rate, tax_rate)
        .into_iter()
        .map(MonthGroupDto::from_group)
        .collect();

    for month in &months {
        println!(
            "{} | net ${:.2} ({:.1}h)",
            month.month_label, month.earnings.net, month.earnings.hours
        );
        for week in &month.weeks {
            println!(
                "  {} : net ${:.2} / {:.1}h / シフト{}件",
                week.week_label,
                week.earnings.net,
                week.earnings.hours,
                week.shifts.len()
            );
        }
    }
}

fn main() {
    let args = Cli::parse();

    match args.command {
        Commands::PaySummary {
            file,
            tax_rate,
            hourly_rate,
            now,
            out,
        } => {
            pay_summary(file, tax_rate, hourly_rate, now, out);
        }
        Commands::MonthSummary {
            file,
            tax_rate,
            hourly_rate,
        } => {
            month_summary(file, tax_rate, hourly_rate);
        }
    }
}
