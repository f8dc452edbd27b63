pub mod bulk_mark;
pub mod class_report;
pub mod list;
pub mod statistics;
pub mod summaries;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::attendance::requests::{
    AttendanceListQuery, AttendanceStatisticsParams, BulkMarkAttendanceRequest, ClassReportParams,
    SummaryListQuery,
};
use crate::storage::Storage;

pub struct AttendanceService {
    storage: Option<Arc<dyn Storage>>,
}

impl AttendanceService {
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

    pub async fn list_records(
        &self,
        request: &HttpRequest,
        query: AttendanceListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_records(self, request, query).await
    }

    pub async fn bulk_mark(
        &self,
        request: &HttpRequest,
        req: BulkMarkAttendanceRequest,
    ) -> ActixResult<HttpResponse> {
        bulk_mark::bulk_mark(self, request, req).await
    }

    pub async fn statistics(
        &self,
        request: &HttpRequest,
        params: AttendanceStatisticsParams,
    ) -> ActixResult<HttpResponse> {
        statistics::statistics(self, request, params).await
    }

    pub async fn class_report(
        &self,
        request: &HttpRequest,
        params: ClassReportParams,
    ) -> ActixResult<HttpResponse> {
        class_report::class_report(self, request, params).await
    }

    pub async fn list_summaries(
        &self,
        request: &HttpRequest,
        query: SummaryListQuery,
    ) -> ActixResult<HttpResponse> {
        summaries::list_summaries(self, request, query).await
    }
}
