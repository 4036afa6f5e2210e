// --- マーケットプレイスの状態遷移ルール ---

use earnings_core::shift_model::{Shift, ShiftSource, ShiftStatus};

/// 状態遷移エラー
#[derive(Debug, PartialEq, Eq)]
pub enum ClaimErrorKind {
    /// 募集中でないシフトへの応募
    NotAvailable,
    /// 応募されていないシフトの承認
    NotRequested,
}

/// シフトへの応募 (AVAILABLE -> REQUESTED)
///
/// 募集中以外の状態からは遷移させない。すでに誰かが確保した枠を
/// 上書きしないためのチェック。
pub fn request(shift: &mut Shift) -> Result<(), ClaimErrorKind> {
    if shift.status != ShiftStatus::Available {
        return Err(ClaimErrorKind::NotAvailable);
    }
    shift.status = ShiftStatus::Requested;
    Ok(())
}

/// 雇用主による承認 (REQUESTED -> CONFIRMED)
pub fn approve(shift: &mut Shift) -> Result<(), ClaimErrorKind> {
    if shift.status != ShiftStatus::Requested {
        return Err(ClaimErrorKind::NotRequested);
    }
    shift.status = ShiftStatus::Confirmed;
    Ok(())
}

/// 自分の予定に含めるシフトか
/// （確定済み、または手入力・画像読み取りで登録されたもの）
pub fn is_my_schedule(shift: &Shift) -> bool {
    shift.status == ShiftStatus::Confirmed
        || matches!(shift.source, Some(ShiftSource::Manual) | Some(ShiftSource::Ocr))
}

/// マーケットプレイスで募集中のシフトか
pub fn is_available(shift: &Shift) -> bool {
    shift.status == ShiftStatus::Available
}

/// 雇用主ダッシュボードに出すシフトか（自分が掲載したもの）
pub fn is_marketplace_posting(shift: &Shift) -> bool {
    matches!(shift.source, Some(ShiftSource::Marketplace))
}
