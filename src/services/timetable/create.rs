use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{TimetableService, slot_from_request, validate_slot};
use crate::models::timetable::requests::{CreateTimetableRequest, TimetableSlot};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_user;
use crate::storage::Storage;

pub async fn create_entry(
    service: &TimetableService,
    request: &HttpRequest,
    entry: CreateTimetableRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    let slot = match slot_from_request(entry) {
        Ok(slot) => slot,
        Err(missing) => {
            return Ok(ApiResponse::respond(
                ErrorCode::BadRequest,
                format!("Missing required fields: {}", missing.join(", ")),
            ));
        }
    };
    if let Err(msg) = validate_slot(&slot) {
        return Ok(ApiResponse::respond(ErrorCode::BadRequest, msg));
    }
    if let Some(resp) = check_references(&storage, user.school_id, &slot).await? {
        return Ok(resp);
    }

    // 时段冲突在存储层事务内检查，冲突时返回 409
    let created = storage.create_timetable_entry(user.school_id, slot).await?;
    info!("Timetable entry {} created by user {}", created.entry.id, user.id);

    Ok(HttpResponse::Created().json(ApiResponse::success(
        created,
        "Timetable entry created successfully",
    )))
}

/// 班级、科目、教师都必须是本校有效记录
pub(crate) async fn check_references(
    storage: &Arc<dyn Storage>,
    school_id: i64,
    slot: &TimetableSlot,
) -> ActixResult<Option<HttpResponse>> {
    if !storage
        .get_class(school_id, slot.class_id)
        .await?
        .is_some_and(|c| c.is_active)
    {
        return Ok(Some(ApiResponse::respond(
            ErrorCode::NotFound,
            "Class not found",
        )));
    }
    if !storage
        .get_subject(school_id, slot.subject_id)
        .await?
        .is_some_and(|s| s.is_active)
    {
        return Ok(Some(ApiResponse::respond(
            ErrorCode::NotFound,
            "Subject not found",
        )));
    }
    if !storage
        .is_active_teacher_user(school_id, slot.teacher_id)
        .await?
    {
        return Ok(Some(ApiResponse::respond(
            ErrorCode::NotFound,
            "Teacher not found",
        )));
    }
    Ok(None)
}
