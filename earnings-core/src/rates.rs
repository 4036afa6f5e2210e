// =====================
// 時給・税率のプリセット
// =====================

use serde::Serialize;

/// 既定の時給（ドル）
pub const HOURLY_RATE: f64 = 13.50;

/// 税率の内訳（2026年 Indianapolis / Marion County の概算値）
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxRates {
    pub federal: f64,
    pub social_security: f64,
    pub medicare: f64,
    pub state: f64,
    pub local: f64,
}

/// 既定プリセット
pub const TAX_RATES: TaxRates = TaxRates {
    federal: 0.10,         // 10% 税率区分の概算
    social_security: 0.062,
    medicare: 0.0145,
    state: 0.0295,         // Indiana (2026年に引き下げ後)
    local: 0.0202,         // Marion County
};

impl TaxRates {
    /// 合計税率（既定プリセットで約 0.2262）
    pub fn total(&self) -> f64 {
        self.federal + self.social_security + self.medicare + self.state + self.local
    }
}

#[cfg(test)]
mod rates_tests {
    use super::*;

    #[test]
    fn test_preset_total() {
        assert!((TAX_RATES.total() - 0.2262).abs() < 1e-9);
    }
}
