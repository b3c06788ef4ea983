use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ComplaintService;
use crate::models::complaints::{
    entities::DEFAULT_COMPLAINT_CATEGORY,
    requests::{CreateComplaintRequest, NewComplaint},
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_scope;

pub async fn create_complaint(
    service: &ComplaintService,
    request: &HttpRequest,
    complaint: CreateComplaintRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (user, scope) = current_scope(request)?;

    let subject = complaint.subject.trim().to_string();
    let description = complaint.description.trim().to_string();
    if subject.is_empty() || description.is_empty() {
        return Ok(ApiResponse::respond(
            ErrorCode::BadRequest,
            "Subject and description are required",
        ));
    }

    let Some(student) = storage.get_student(scope, complaint.student_id).await? else {
        return Ok(ApiResponse::respond(ErrorCode::NotFound, "Student not found"));
    };

    // 投诉转给学生所在班级的班主任
    let class_teacher_id = storage
        .get_class(user.school_id, student.student.class_id)
        .await?
        .and_then(|class| class.class_teacher_id);

    let category = complaint
        .category
        .map(|c| c.trim().to_lowercase())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| DEFAULT_COMPLAINT_CATEGORY.to_string());

    let created = storage
        .create_complaint(NewComplaint {
            student_id: student.student.id,
            complainant_id: user.id,
            class_teacher_id,
            subject,
            description,
            category,
            priority: complaint.priority.unwrap_or_default(),
        })
        .await?;
    info!(
        "Complaint {} filed by user {} for student {}",
        created.complaint.id, user.id, student.student.id
    );

    Ok(HttpResponse::Created().json(ApiResponse::success(
        created,
        "Complaint submitted successfully",
    )))
}
