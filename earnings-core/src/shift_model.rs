// =====================
// シフトのドメインモデル定義
// =====================

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

// シフトIDの型エイリアス（UUID文字列だが中身には依存しない）
pub type ShiftId = String;

/// マーケットプレイスでの受注状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShiftStatus {
    Available,
    Requested,
    Confirmed,
    Completed,
}

/// レコードの登録経路（給与計算には関与しない。表示用に保持するだけ）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShiftSource {
    Manual,
    Ocr,
    Marketplace,
}

/// シフト1件分のレコード
///
/// コアはこれを変更しない。集計結果は常に新しい値として導出する。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shift {
    pub id: ShiftId,
    #[serde(with = "iso_datetime")]
    pub start_date: NaiveDateTime,
    #[serde(with = "iso_datetime")]
    pub end_date: NaiveDateTime,
    pub job_name: String,
    pub venue_name: String,
    pub address: String,
    pub status: ShiftStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<ShiftSource>,
}

impl Shift {
    /// 勤務開始日（暦日）。週・月のグルーピングはすべてこの値を使う
    pub fn start_day(&self) -> NaiveDate {
        self.start_date.date()
    }
}

/// ISO 8601文字列を解釈する
///
/// 末尾の `Z` やオフセット付き（RFC 3339）を優先し、UTCの壁時計へ正規化する。
/// オフセットのない `YYYY-MM-DDTHH:MM:SS` 形式もそのまま受け付ける。
pub fn parse_iso_datetime(s: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    chrono::DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.naive_utc())
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f"))
}

/// serde用: ISO 8601 (末尾Z) <-> NaiveDateTime
pub mod iso_datetime {
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

    pub fn serialize<S>(dt: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&dt.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        super::parse_iso_datetime(&s).map_err(serde::de::Error::custom)
    }
}
