//! 费用存储操作
//!
//! 缴费是两步写（累加已缴 + 写流水），必须同一事务提交；
//! 状态由金额推导，绝不接受客户端指定。

use rust_decimal::Decimal;

use super::SeaOrmStorage;
use super::scope::fee_record_scope_condition;
use crate::entity::fee_payments::{ActiveModel as PaymentActiveModel, Entity as FeePayments};
use crate::entity::fee_records::{ActiveModel, Column, Entity as FeeRecords};
use crate::entity::fee_structures::{
    ActiveModel as StructureActiveModel, Column as StructureColumn, Entity as FeeStructures,
};
use crate::errors::{Result, SchoolLmsError};
use crate::models::{
    PaginationInfo,
    fees::{
        entities::{FeePayment, FeeRecord, FeeStatus, FeeStructure, derive_fee_status},
        requests::{
            CreateFeeRecordRequest, CreateFeeStructureRequest, FeeRecordListQuery,
            FeeStructureListQuery, MakePaymentRequest,
        },
        responses::{
            FeeRecordListItem, FeeRecordListResponse, FeeStructureListResponse,
            FeeSummaryResponse, PaymentResponse,
        },
    },
};
use crate::policy::Scope;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

fn to_list_item(record: FeeRecord, today: chrono::NaiveDate) -> FeeRecordListItem {
    let outstanding_amount = record.outstanding();
    let is_overdue = today > record.due_date && record.status != FeeStatus::Paid;
    FeeRecordListItem {
        record,
        outstanding_amount,
        is_overdue,
    }
}

impl SeaOrmStorage {
    /// 创建收费标准
    pub async fn create_fee_structure_impl(
        &self,
        req: CreateFeeStructureRequest,
    ) -> Result<FeeStructure> {
        let model = StructureActiveModel {
            school_id: Set(req.school_id),
            class_id: Set(req.class_id),
            fee_type: Set(req.fee_type),
            amount: Set(req.amount),
            academic_year: Set(req.academic_year),
            late_fee_percentage: Set(req.late_fee_percentage.unwrap_or(Decimal::ZERO)),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("创建收费标准失败: {e}")))?;

        Ok(result.into_fee_structure())
    }

    /// 分页列出收费标准
    pub async fn list_fee_structures_impl(
        &self,
        query: FeeStructureListQuery,
    ) -> Result<FeeStructureListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = FeeStructures::find();

        if let Some(school_id) = query.school_id {
            select = select.filter(StructureColumn::SchoolId.eq(school_id));
        }
        if let Some(class_id) = query.class_id {
            select = select.filter(StructureColumn::ClassId.eq(class_id));
        }
        if let Some(ref academic_year) = query.academic_year {
            select = select.filter(StructureColumn::AcademicYear.eq(academic_year.clone()));
        }

        select = select.order_by_desc(StructureColumn::CreatedAt);

        let paginator = select.paginate(&self.db, size);
        let total = paginator.num_items().await.map_err(|e| {
            SchoolLmsError::database_operation(format!("查询收费标准总数失败: {e}"))
        })?;
        let pages = paginator.num_pages().await.map_err(|e| {
            SchoolLmsError::database_operation(format!("查询收费标准页数失败: {e}"))
        })?;

        let items = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| {
                SchoolLmsError::database_operation(format!("查询收费标准列表失败: {e}"))
            })?
            .into_iter()
            .map(|m| m.into_fee_structure())
            .collect();

        Ok(FeeStructureListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 创建缴费记录
    pub async fn create_fee_record_impl(
        &self,
        school_id: i64,
        req: CreateFeeRecordRequest,
    ) -> Result<FeeRecord> {
        if req.amount <= Decimal::ZERO {
            return Err(SchoolLmsError::validation("应缴金额必须为正数"));
        }

        let now = chrono::Utc::now();
        let late_fee = req.late_fee.unwrap_or(Decimal::ZERO);
        let status = derive_fee_status(
            req.amount,
            late_fee,
            Decimal::ZERO,
            req.due_date,
            now.date_naive(),
        );

        let model = ActiveModel {
            school_id: Set(school_id),
            student_id: Set(req.student_id),
            fee_structure_id: Set(req.fee_structure_id),
            amount: Set(req.amount),
            late_fee: Set(late_fee),
            paid_amount: Set(Decimal::ZERO),
            due_date: Set(req.due_date),
            status: Set(status.to_string()),
            remarks: Set(req.remarks),
            created_at: Set(now.timestamp()),
            updated_at: Set(now.timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("创建缴费记录失败: {e}")))?;

        Ok(result.into_fee_record())
    }

    /// 通过 ID 获取缴费记录
    pub async fn get_fee_record_by_id_impl(&self, id: i64) -> Result<Option<FeeRecord>> {
        let result = FeeRecords::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询缴费记录失败: {e}")))?;

        Ok(result.map(|m| m.into_fee_record()))
    }

    /// 分页列出缴费记录（到期日升序）
    pub async fn list_fee_records_impl(
        &self,
        scope: &Scope,
        query: FeeRecordListQuery,
    ) -> Result<FeeRecordListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = FeeRecords::find().filter(fee_record_scope_condition(scope));

        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        select = select.order_by_asc(Column::DueDate);

        let paginator = select.paginate(&self.db, size);
        let total = paginator.num_items().await.map_err(|e| {
            SchoolLmsError::database_operation(format!("查询缴费记录总数失败: {e}"))
        })?;
        let pages = paginator.num_pages().await.map_err(|e| {
            SchoolLmsError::database_operation(format!("查询缴费记录页数失败: {e}"))
        })?;

        let today = chrono::Utc::now().date_naive();
        let items = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| {
                SchoolLmsError::database_operation(format!("查询缴费记录列表失败: {e}"))
            })?
            .into_iter()
            .map(|m| to_list_item(m.into_fee_record(), today))
            .collect();

        Ok(FeeRecordListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 缴费：累加已缴、推导状态、写流水，单事务提交
    ///
    /// 超出未结余额的缴费被整笔拒绝（Validation），保证
    /// paid_amount 永不超过 amount + late_fee。
    pub async fn apply_fee_payment_impl(
        &self,
        record_id: i64,
        received_by: i64,
        req: MakePaymentRequest,
    ) -> Result<PaymentResponse> {
        if req.amount <= Decimal::ZERO {
            return Err(SchoolLmsError::validation("缴费金额必须为正数"));
        }

        let now = chrono::Utc::now();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("开启事务失败: {e}")))?;

        let record_model = FeeRecords::find_by_id(record_id)
            .one(&txn)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询缴费记录失败: {e}")))?
            .ok_or_else(|| SchoolLmsError::not_found(format!("缴费记录不存在: {record_id}")))?;

        let record = record_model.clone().into_fee_record();
        let outstanding = record.outstanding();
        if req.amount > outstanding {
            return Err(SchoolLmsError::validation(format!(
                "缴费金额 {} 超出未结余额 {outstanding}",
                req.amount
            )));
        }

        let new_paid = record.paid_amount + req.amount;
        let new_status = derive_fee_status(
            record.amount,
            record.late_fee,
            new_paid,
            record.due_date,
            now.date_naive(),
        );

        let mut model: ActiveModel = record_model.into();
        model.paid_amount = Set(new_paid);
        model.status = Set(new_status.to_string());
        model.updated_at = Set(now.timestamp());
        let updated = model
            .update(&txn)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("更新缴费记录失败: {e}")))?;

        let payment_model = PaymentActiveModel {
            fee_record_id: Set(record_id),
            amount: Set(req.amount),
            payment_method: Set(req.payment_method),
            transaction_id: Set(uuid::Uuid::new_v4().to_string()),
            reference_number: Set(req.reference_number),
            payment_date: Set(req.payment_date.unwrap_or(now.date_naive())),
            received_by: Set(received_by),
            remarks: Set(req.remarks),
            created_at: Set(now.timestamp()),
            ..Default::default()
        };
        let payment = payment_model
            .insert(&txn)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("写入缴费流水失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(PaymentResponse {
            payment: payment.into_fee_payment(),
            record: to_list_item(updated.into_fee_record(), now.date_naive()),
        })
    }

    /// 费用汇总（在可见范围内聚合）
    pub async fn fee_summary_impl(&self, scope: &Scope) -> Result<FeeSummaryResponse> {
        let records: Vec<FeeRecord> = FeeRecords::find()
            .filter(fee_record_scope_condition(scope))
            .all(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询缴费记录失败: {e}")))?
            .into_iter()
            .map(|m| m.into_fee_record())
            .collect();

        let today = chrono::Utc::now().date_naive();
        let mut total_amount = Decimal::ZERO;
        let mut paid_amount = Decimal::ZERO;
        let mut late_fee = Decimal::ZERO;
        let mut outstanding_amount = Decimal::ZERO;
        let mut pending_records = 0i64;
        let mut overdue_records = 0i64;

        for record in &records {
            total_amount += record.amount;
            paid_amount += record.paid_amount;
            late_fee += record.late_fee;
            outstanding_amount += record.outstanding();
            match record.status {
                FeeStatus::Pending | FeeStatus::Partial => pending_records += 1,
                FeeStatus::Overdue => overdue_records += 1,
                FeeStatus::Paid => {}
            }
            if record.status != FeeStatus::Paid
                && record.status != FeeStatus::Overdue
                && today > record.due_date
            {
                // 状态尚未因新写入而刷新，按日期补计逾期
                overdue_records += 1;
                pending_records -= 1;
            }
        }

        Ok(FeeSummaryResponse {
            total_amount,
            paid_amount,
            late_fee,
            outstanding_amount,
            pending_records,
            overdue_records,
        })
    }

    /// 缴费记录的流水列表
    pub async fn list_payments_for_record_impl(&self, record_id: i64) -> Result<Vec<FeePayment>> {
        use crate::entity::fee_payments::Column as PaymentColumn;

        let payments = FeePayments::find()
            .filter(PaymentColumn::FeeRecordId.eq(record_id))
            .order_by_desc(PaymentColumn::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询缴费流水失败: {e}")))?;

        Ok(payments.into_iter().map(|m| m.into_fee_payment()).collect())
    }
}
