pub mod payment;
pub mod records;
pub mod structures;
pub mod summary;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::fees::requests::{
    CreateFeeRecordRequest, CreateFeeStructureRequest, FeeRecordListQuery, FeeStructureListQuery,
    MakePaymentRequest,
};
use crate::storage::Storage;

pub struct FeeService {
    storage: Option<Arc<dyn Storage>>,
}

impl FeeService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub async fn create_structure(
        &self,
        request: &HttpRequest,
        req: CreateFeeStructureRequest,
    ) -> ActixResult<HttpResponse> {
        structures::create_structure(self, request, req).await
    }
    pub async fn list_structures(
        &self,
        request: &HttpRequest,
        query: FeeStructureListQuery,
    ) -> ActixResult<HttpResponse> {
        structures::list_structures(self, request, query).await
    }

    pub async fn create_record(
        &self,
        request: &HttpRequest,
        req: CreateFeeRecordRequest,
    ) -> ActixResult<HttpResponse> {
        records::create_record(self, request, req).await
    }
    pub async fn list_records(
        &self,
        request: &HttpRequest,
        query: FeeRecordListQuery,
    ) -> ActixResult<HttpResponse> {
        records::list_records(self, request, query).await
    }
    pub async fn get_record(
        &self,
        request: &HttpRequest,
        record_id: i64,
    ) -> ActixResult<HttpResponse> {
        records::get_record(self, request, record_id).await
    }

    pub async fn make_payment(
        &self,
        request: &HttpRequest,
        record_id: i64,
        req: MakePaymentRequest,
    ) -> ActixResult<HttpResponse> {
        payment::make_payment(self, request, record_id, req).await
    }

    pub async fn fee_summary(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        summary::fee_summary(self, request).await
    }
}
