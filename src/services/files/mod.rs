pub mod download;
pub mod upload;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::storage::Storage;

pub struct FileService {
    storage: Option<Arc<dyn Storage>>,
}

impl FileService {
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

    pub async fn upload(
        &self,
        request: &HttpRequest,
        payload: actix_multipart::Multipart,
    ) -> ActixResult<HttpResponse> {
        upload::upload_file(self, request, payload).await
    }

    pub async fn download(
        &self,
        request: &HttpRequest,
        token: String,
    ) -> ActixResult<HttpResponse> {
        download::download_file(self, request, token).await
    }
}
