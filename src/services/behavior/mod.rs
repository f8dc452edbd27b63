pub mod categories;
pub mod logs;
pub mod points;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::behavior::requests::{
    BehaviorLogListQuery, CreateBehaviorCategoryRequest, CreateBehaviorLogRequest,
};
use crate::storage::Storage;

pub struct BehaviorService {
    storage: Option<Arc<dyn Storage>>,
}

impl BehaviorService {
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

    pub async fn list_categories(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        categories::list_categories(self, request).await
    }
    pub async fn create_category(
        &self,
        request: &HttpRequest,
        req: CreateBehaviorCategoryRequest,
    ) -> ActixResult<HttpResponse> {
        categories::create_category(self, request, req).await
    }

    pub async fn list_logs(
        &self,
        request: &HttpRequest,
        query: BehaviorLogListQuery,
    ) -> ActixResult<HttpResponse> {
        logs::list_logs(self, request, query).await
    }
    pub async fn create_log(
        &self,
        request: &HttpRequest,
        req: CreateBehaviorLogRequest,
    ) -> ActixResult<HttpResponse> {
        logs::create_log(self, request, req).await
    }

    pub async fn student_points(
        &self,
        request: &HttpRequest,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        points::student_points(self, request, student_id).await
    }
}
