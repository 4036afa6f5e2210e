// =====================
// 給与計算コア
// =====================
//
// シフトの集合と時給・税率から、勤務時間・給与・各種グルーピングを
// 導出する純粋関数群。I/Oや時計の読み取りは一切行わず、
// 「現在時刻」は常に引数で受け取る。

pub mod shift_model;
pub mod earnings;
pub mod rates;
pub mod calendar_group;
pub mod payroll_schedule;
pub mod pay_period;
