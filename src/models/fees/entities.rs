//! 费用实体：收费标准、缴费记录与缴费流水。
//!
//! 金额使用十进制定点数，序列化为字符串，避免浮点误差。

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 缴费状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/fees.ts")]
pub enum FeeStatus {
    Pending,
    Partial,
    Paid,
    Overdue,
}

impl std::fmt::Display for FeeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            FeeStatus::Pending => "pending",
            FeeStatus::Partial => "partial",
            FeeStatus::Paid => "paid",
            FeeStatus::Overdue => "overdue",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for FeeStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(FeeStatus::Pending),
            "partial" => Ok(FeeStatus::Partial),
            "paid" => Ok(FeeStatus::Paid),
            "overdue" => Ok(FeeStatus::Overdue),
            _ => Err(format!("Invalid fee status: {s}")),
        }
    }
}

// 收费标准
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/fees.ts")]
pub struct FeeStructure {
    pub id: i64,
    pub school_id: i64,
    pub class_id: i64,
    pub fee_type: String,
    #[ts(type = "string")]
    pub amount: Decimal,
    pub academic_year: String,
    #[ts(type = "string")]
    pub late_fee_percentage: Decimal,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 缴费记录
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/fees.ts")]
pub struct FeeRecord {
    pub id: i64,
    pub school_id: i64,
    pub student_id: i64,
    pub fee_structure_id: i64,
    #[ts(type = "string")]
    pub amount: Decimal,
    #[ts(type = "string")]
    pub late_fee: Decimal,
    /// 不变式：paid_amount ≤ amount + late_fee
    #[ts(type = "string")]
    pub paid_amount: Decimal,
    pub due_date: chrono::NaiveDate,
    pub status: FeeStatus,
    pub remarks: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 缴费流水
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/fees.ts")]
pub struct FeePayment {
    pub id: i64,
    pub fee_record_id: i64,
    #[ts(type = "string")]
    pub amount: Decimal,
    pub payment_method: String,
    pub transaction_id: String,
    pub reference_number: Option<String>,
    pub payment_date: chrono::NaiveDate,
    pub received_by: i64,
    pub remarks: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl FeeRecord {
    /// 应付总额 = 应缴 + 滞纳金
    pub fn total_due(&self) -> Decimal {
        self.amount + self.late_fee
    }

    /// 未结余额 = 应付总额 − 已缴
    pub fn outstanding(&self) -> Decimal {
        self.total_due() - self.paid_amount
    }
}

/// 状态推导
///
/// 优先级：paid > partial > overdue > pending。
/// paid 当且仅当 paid_amount ≥ amount + late_fee。
pub fn derive_fee_status(
    amount: Decimal,
    late_fee: Decimal,
    paid_amount: Decimal,
    due_date: chrono::NaiveDate,
    today: chrono::NaiveDate,
) -> FeeStatus {
    let total = amount + late_fee;
    if paid_amount >= total {
        FeeStatus::Paid
    } else if paid_amount > Decimal::ZERO {
        FeeStatus::Partial
    } else if today > due_date {
        FeeStatus::Overdue
    } else {
        FeeStatus::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_status_paid_at_exact_total() {
        let status = derive_fee_status(
            dec("1000"),
            dec("50"),
            dec("1050"),
            day("2026-03-01"),
            day("2026-02-01"),
        );
        assert_eq!(status, FeeStatus::Paid);
    }

    #[test]
    fn test_status_partial_then_paid() {
        // 1000 + 50 滞纳金；两笔 600 / 450
        let after_first = derive_fee_status(
            dec("1000"),
            dec("50"),
            dec("600"),
            day("2026-03-01"),
            day("2026-02-01"),
        );
        assert_eq!(after_first, FeeStatus::Partial);

        let after_second = derive_fee_status(
            dec("1000"),
            dec("50"),
            dec("1050"),
            day("2026-03-01"),
            day("2026-02-01"),
        );
        assert_eq!(after_second, FeeStatus::Paid);
    }

    #[test]
    fn test_status_overdue_without_payment() {
        let status = derive_fee_status(
            dec("1000"),
            dec("0"),
            dec("0"),
            day("2026-03-01"),
            day("2026-03-02"),
        );
        assert_eq!(status, FeeStatus::Overdue);
    }

    #[test]
    fn test_status_pending_before_due() {
        let status = derive_fee_status(
            dec("1000"),
            dec("0"),
            dec("0"),
            day("2026-03-01"),
            day("2026-03-01"),
        );
        assert_eq!(status, FeeStatus::Pending);
    }

    #[test]
    fn test_outstanding() {
        let record = FeeRecord {
            id: 1,
            school_id: 1,
            student_id: 1,
            fee_structure_id: 1,
            amount: dec("1000"),
            late_fee: dec("50"),
            paid_amount: dec("600"),
            due_date: day("2026-03-01"),
            status: FeeStatus::Partial,
            remarks: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };
        assert_eq!(record.outstanding(), dec("450"));
        assert_eq!(record.total_due(), dec("1050"));
    }
}
