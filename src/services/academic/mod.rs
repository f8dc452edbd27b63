pub mod exams;
pub mod marks;
pub mod timetables;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::academic::requests::{
    CreateExamRequest, CreateTimetableSlotRequest, ExamListQuery, MarkListQuery,
    TimetableListQuery, UpdateExamRequest, UpsertMarkRequest,
};
use crate::storage::Storage;

pub struct AcademicService {
    storage: Option<Arc<dyn Storage>>,
}

impl AcademicService {
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

    // 考试
    pub async fn list_exams(
        &self,
        request: &HttpRequest,
        query: ExamListQuery,
    ) -> ActixResult<HttpResponse> {
        exams::list_exams(self, request, query).await
    }
    pub async fn create_exam(
        &self,
        request: &HttpRequest,
        req: CreateExamRequest,
    ) -> ActixResult<HttpResponse> {
        exams::create_exam(self, request, req).await
    }
    pub async fn get_exam(&self, request: &HttpRequest, exam_id: i64) -> ActixResult<HttpResponse> {
        exams::get_exam(self, request, exam_id).await
    }
    pub async fn update_exam(
        &self,
        request: &HttpRequest,
        exam_id: i64,
        req: UpdateExamRequest,
    ) -> ActixResult<HttpResponse> {
        exams::update_exam(self, request, exam_id, req).await
    }
    pub async fn delete_exam(
        &self,
        request: &HttpRequest,
        exam_id: i64,
    ) -> ActixResult<HttpResponse> {
        exams::delete_exam(self, request, exam_id).await
    }

    // 成绩
    pub async fn list_marks(
        &self,
        request: &HttpRequest,
        query: MarkListQuery,
    ) -> ActixResult<HttpResponse> {
        marks::list_marks(self, request, query).await
    }
    pub async fn upsert_mark(
        &self,
        request: &HttpRequest,
        req: UpsertMarkRequest,
    ) -> ActixResult<HttpResponse> {
        marks::upsert_mark(self, request, req).await
    }
    pub async fn student_performance(
        &self,
        request: &HttpRequest,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        marks::student_performance(self, request, student_id).await
    }

    // 课程表
    pub async fn list_timetable(
        &self,
        request: &HttpRequest,
        query: TimetableListQuery,
    ) -> ActixResult<HttpResponse> {
        timetables::list_timetable(self, request, query).await
    }
    pub async fn create_timetable_slot(
        &self,
        request: &HttpRequest,
        req: CreateTimetableSlotRequest,
    ) -> ActixResult<HttpResponse> {
        timetables::create_timetable_slot(self, request, req).await
    }
    pub async fn delete_timetable_slot(
        &self,
        request: &HttpRequest,
        slot_id: i64,
    ) -> ActixResult<HttpResponse> {
        timetables::delete_timetable_slot(self, request, slot_id).await
    }
}
