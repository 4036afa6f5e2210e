use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};
use std::path::Path;

pub mod application;
pub mod domain;
pub mod infrastructure;

use infrastructure::settings_repo::SettingsRepository;
use infrastructure::shift_repo::ShiftRepository;

// 全てのリポジトリを保持するコンテナ
pub struct AppServices {
    pub schedule: ShiftRepository,
    pub settings: SettingsRepository,
}

impl AppServices {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            // poolは内部で参照カウントされているのでcloneしても低コスト
            schedule: ShiftRepository::new(pool.clone()),
            settings: SettingsRepository::new(pool),
        }
    }
}

/// DBファイルへ接続し、マイグレーションとシードを済ませたサービス一式を返す
pub async fn init_services(db_path: &Path) -> Result<AppServices, String> {
    // --- DB 接続設定 ---
    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true); // ファイルがなければ作る

    println!("Using DB at: {}", db_path.display());

    // --- DB 接続 ---
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .map_err(|e| e.to_string())?;

    // --- テーブル ---
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| e.to_string())?;

    let services = AppServices::new(pool);

    // 初回起動時はマーケットプレイスにシードデータを入れる
    services.schedule.seed_if_empty().await?;

    Ok(services)
}
