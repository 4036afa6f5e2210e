use sqlx::SqlitePool;

use earnings_core::rates;

/// 設定の key-value ストア
///
/// 税率・時給はここに保存されるが、計算時は必ず明示的な引数として
/// コアへ渡す（コアが設定を読みに来ることはない）。
pub struct SettingsRepository {
    pool: SqlitePool,
}

const TAX_RATE_KEY: &str = "tax_rate";
const HOURLY_RATE_KEY: &str = "hourly_rate";

impl SettingsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>, String> {
        sqlx::query_scalar("SELECT value FROM settings WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| e.to_string())
    }

    pub async fn set(&self, key: &str, value: &str) -> Result<(), String> {
        sqlx::query(
            "INSERT INTO settings (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(|e| e.to_string())?;
        Ok(())
    }

    /// 保存された税率。未設定・壊れた値のときはプリセットの合計に落とす
    pub async fn get_tax_rate(&self) -> Result<f64, String> {
        let stored = self.get(TAX_RATE_KEY).await?;
        Ok(stored
            .and_then(|v| v.parse::<f64>().ok())
            .unwrap_or_else(|| rates::TAX_RATES.total()))
    }

    pub async fn set_tax_rate(&self, rate: f64) -> Result<(), String> {
        self.set(TAX_RATE_KEY, &rate.to_string()).await
    }

    /// 保存された時給。未設定のときは既定値
    pub async fn get_hourly_rate(&self) -> Result<f64, String> {
        let stored = self.get(HOURLY_RATE_KEY).await?;
        Ok(stored
            .and_then(|v| v.parse::<f64>().ok())
            .unwrap_or(rates::HOURLY_RATE))
    }

    pub async fn set_hourly_rate(&self, rate: f64) -> Result<(), String> {
        self.set(HOURLY_RATE_KEY, &rate.to_string()).await
    }
}
