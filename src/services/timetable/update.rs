use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{TimetableService, create::check_references, validate_slot};
use crate::models::timetable::requests::{TimetableSlot, UpdateTimetableRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_user;

pub async fn update_entry(
    service: &TimetableService,
    request: &HttpRequest,
    entry_id: i64,
    update: UpdateTimetableRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    let Some(existing) = storage
        .get_timetable_entry(user.school_id, entry_id)
        .await?
        .filter(|e| e.is_active)
    else {
        return Ok(ApiResponse::respond(
            ErrorCode::NotFound,
            "Timetable entry not found",
        ));
    };

    let current = TimetableSlot {
        class_id: existing.class_id,
        subject_id: existing.subject_id,
        teacher_id: existing.teacher_id,
        day_of_week: existing.day_of_week,
        period_number: existing.period_number,
        start_time: existing.start_time,
        end_time: existing.end_time,
        room_number: existing.room_number,
        academic_year: existing.academic_year,
    };
    let slot = current.merged(update);

    if let Err(msg) = validate_slot(&slot) {
        return Ok(ApiResponse::respond(ErrorCode::BadRequest, msg));
    }
    if let Some(resp) = check_references(&storage, user.school_id, &slot).await? {
        return Ok(resp);
    }

    // 教师、星期、节次、学年都未变化时无需重新检查教师冲突
    let check_teacher = slot.teacher_slot_changed(&current);
    let updated = storage
        .update_timetable_entry(user.school_id, entry_id, slot, check_teacher)
        .await?;
    info!("Timetable entry {} updated by user {}", entry_id, user.id);

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        updated,
        "Timetable entry updated successfully",
    )))
}
