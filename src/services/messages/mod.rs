pub mod list;
pub mod mark_read;
pub mod send;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::messages::requests::{MessageListQuery, SendMessageRequest};
use crate::storage::Storage;

pub struct MessageService {
    storage: Option<Arc<dyn Storage>>,
}

impl MessageService {
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

    pub async fn send_message(
        &self,
        request: &HttpRequest,
        req: SendMessageRequest,
    ) -> ActixResult<HttpResponse> {
        send::send_message(self, request, req).await
    }

    pub async fn list_messages(
        &self,
        request: &HttpRequest,
        query: MessageListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_messages(self, request, query).await
    }

    pub async fn mark_read(
        &self,
        request: &HttpRequest,
        message_id: i64,
    ) -> ActixResult<HttpResponse> {
        mark_read::mark_read(self, request, message_id).await
    }
}
