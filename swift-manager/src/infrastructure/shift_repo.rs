use sqlx::{FromRow, SqlitePool};

use earnings_core::shift_model::{parse_iso_datetime, Shift, ShiftSource, ShiftStatus};

pub struct ShiftRepository {
    pool: SqlitePool,
}

// =====================
// DB読み込み用ヘルパー構造体
// =====================

#[derive(FromRow)]
struct ShiftRow {
    id: String,
    start_date: String,
    end_date: String,
    job_name: String,
    venue_name: String,
    address: String,
    status: String,
    source: Option<String>,
}

impl ShiftRow {
    fn into_shift(self) -> Result<Shift, String> {
        Ok(Shift {
            start_date: parse_iso_datetime(&self.start_date)
                .map_err(|e| format!("broken start_date for {}: {}", self.id, e))?,
            end_date: parse_iso_datetime(&self.end_date)
                .map_err(|e| format!("broken end_date for {}: {}", self.id, e))?,
            id: self.id,
            job_name: self.job_name,
            venue_name: self.venue_name,
            address: self.address,
            status: status_from_str(&self.status),
            source: self.source.as_deref().map(source_from_str),
        })
    }
}

// --- 文字列 <-> enum の対応 (DBにはJSONと同じ表記で保存する) ---

fn status_to_str(status: ShiftStatus) -> &'static str {
    match status {
        ShiftStatus::Available => "AVAILABLE",
        ShiftStatus::Requested => "REQUESTED",
        ShiftStatus::Confirmed => "CONFIRMED",
        ShiftStatus::Completed => "COMPLETED",
    }
}

fn status_from_str(s: &str) -> ShiftStatus {
    match s {
        "AVAILABLE" => ShiftStatus::Available,
        "REQUESTED" => ShiftStatus::Requested,
        "CONFIRMED" => ShiftStatus::Confirmed,
        "COMPLETED" => ShiftStatus::Completed,
        _ => ShiftStatus::Available, // 未知の値へのフォールバック（本来はエラー処理推奨）
    }
}

fn source_to_str(source: ShiftSource) -> &'static str {
    match source {
        ShiftSource::Manual => "MANUAL",
        ShiftSource::Ocr => "OCR",
        ShiftSource::Marketplace => "MARKETPLACE",
    }
}

fn source_from_str(s: &str) -> ShiftSource {
    match s {
        "MANUAL" => ShiftSource::Manual,
        "OCR" => ShiftSource::Ocr,
        _ => ShiftSource::Marketplace,
    }
}

/// NaiveDateTime を保存形式 (ISO 8601, 末尾Z) にする
fn to_iso(dt: chrono::NaiveDateTime) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

impl ShiftRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// 全件を開始日時の昇順で取得する
    /// （予定/履歴の振り分けやグルーピングはドメイン側で行う）
    pub async fn list_all(&self) -> Result<Vec<Shift>, String> {
        let rows: Vec<ShiftRow> = sqlx::query_as(
            "SELECT id, start_date, end_date, job_name, venue_name, address, status, source
             FROM shifts ORDER BY start_date ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| e.to_string())?;

        rows.into_iter().map(|row| row.into_shift()).collect()
    }

    pub async fn find_by_id(&self, shift_id: &str) -> Result<Option<Shift>, String> {
        let row: Option<ShiftRow> = sqlx::query_as(
            "SELECT id, start_date, end_date, job_name, venue_name, address, status, source
             FROM shifts WHERE id = ?",
        )
        .bind(shift_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| e.to_string())?;

        row.map(|r| r.into_shift()).transpose()
    }

    pub async fn insert(&self, shift: &Shift) -> Result<(), String> {
        sqlx::query(
            "INSERT INTO shifts (id, start_date, end_date, job_name, venue_name, address, status, source)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )
        .bind(&shift.id)
        .bind(to_iso(shift.start_date))
        .bind(to_iso(shift.end_date))
        .bind(&shift.job_name)
        .bind(&shift.venue_name)
        .bind(&shift.address)
        .bind(status_to_str(shift.status))
        .bind(shift.source.map(source_to_str))
        .execute(&self.pool)
        .await
        .map_err(|e| e.to_string())?;
        Ok(())
    }

    /// 複数シフトの一括保存（同じIDがあれば上書き）
    pub async fn save_all(&self, shifts: &[Shift]) -> Result<(), String> {
        // 1. トランザクション開始
        let mut tx = self.pool.begin().await.map_err(|e| e.to_string())?;

        for shift in shifts {
            sqlx::query(
                "INSERT OR REPLACE INTO shifts
                    (id, start_date, end_date, job_name, venue_name, address, status, source)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            )
            .bind(&shift.id)
            .bind(to_iso(shift.start_date))
            .bind(to_iso(shift.end_date))
            .bind(&shift.job_name)
            .bind(&shift.venue_name)
            .bind(&shift.address)
            .bind(status_to_str(shift.status))
            .bind(shift.source.map(source_to_str))
            .execute(&mut *tx)
            .await
            .map_err(|e| e.to_string())?;
        }

        // 2. コミット
        tx.commit().await.map_err(|e| e.to_string())?;
        Ok(())
    }

    pub async fn update_status(&self, shift_id: &str, status: ShiftStatus) -> Result<(), String> {
        sqlx::query("UPDATE shifts SET status = ? WHERE id = ?")
            .bind(status_to_str(status))
            .bind(shift_id)
            .execute(&self.pool)
            .await
            .map_err(|e| e.to_string())?;
        Ok(())
    }

    pub async fn delete(&self, shift_id: &str) -> Result<(), String> {
        sqlx::query("DELETE FROM shifts WHERE id = ?")
            .bind(shift_id)
            .execute(&self.pool)
            .await
            .map_err(|e| e.to_string())?;
        Ok(())
    }

    pub async fn count(&self) -> Result<i64, String> {
        sqlx::query_scalar("SELECT COUNT(*) FROM shifts")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| e.to_string())
    }

    /// テーブルが空のときだけシードデータを投入する（冪等）
    pub async fn seed_if_empty(&self) -> Result<(), String> {
        if self.count().await? > 0 {
            return Ok(());
        }
        self.save_all(&seed_shifts()).await
    }

    /// 全削除してシードを入れ直す（開発・デモ用）
    pub async fn reset(&self) -> Result<(), String> {
        sqlx::query("DELETE FROM shifts")
            .execute(&self.pool)
            .await
            .map_err(|e| e.to_string())?;
        self.save_all(&seed_shifts()).await
    }
}

/// 初回起動時にマーケットプレイスへ入れておく募集枠
fn seed_shifts() -> Vec<Shift> {
    fn seed(id: &str, start: &str, end: &str, job: &str, venue: &str, address: &str) -> Shift {
        Shift {
            id: id.to_string(),
            start_date: parse_iso_datetime(start).expect("seed start date is valid"),
            end_date: parse_iso_datetime(end).expect("seed end date is valid"),
            job_name: job.to_string(),
            venue_name: venue.to_string(),
            address: address.to_string(),
            status: ShiftStatus::Available,
            source: Some(ShiftSource::Marketplace),
        }
    }

    vec![
        seed(
            "seed-1",
            "2026-05-15T16:00:00.000Z",
            "2026-05-15T23:00:00.000Z",
            "Concession Stand Lead",
            "Lucas Oil Stadium",
            "500 S Capitol Ave, Indianapolis, IN",
        ),
        seed(
            "seed-2",
            "2026-05-16T10:00:00.000Z",
            "2026-05-16T18:00:00.000Z",
            "Ticket Scanner",
            "Gainbridge Fieldhouse",
            "125 S Pennsylvania St, Indianapolis, IN",
        ),
        seed(
            "seed-3",
            "2026-05-20T17:00:00.000Z",
            "2026-05-20T22:00:00.000Z",
            "Event Security",
            "TCU Amphitheater",
            "801 W Washington St, Indianapolis, IN",
        ),
    ]
}
