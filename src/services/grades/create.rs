use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::GradeService;
use crate::models::grades::{
    entities::grade_letter,
    requests::{CreateGradeRequest, NewGrade},
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_scope;
use crate::utils::metrics::round2;

pub async fn create_grade(
    service: &GradeService,
    request: &HttpRequest,
    grade: CreateGradeRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (user, scope) = current_scope(request)?;

    if let Err(msg) = check_marks(grade.marks_obtained, grade.total_marks) {
        return Ok(ApiResponse::respond(ErrorCode::BadRequest, msg));
    }
    if grade.exam_type.trim().is_empty() || grade.exam_name.trim().is_empty() {
        return Ok(ApiResponse::respond(
            ErrorCode::BadRequest,
            "Exam type and exam name are required",
        ));
    }

    if storage.get_student(scope, grade.student_id).await?.is_none() {
        return Ok(ApiResponse::respond(ErrorCode::NotFound, "Student not found"));
    }
    if storage
        .get_subject(user.school_id, grade.subject_id)
        .await?
        .is_none()
    {
        return Ok(ApiResponse::respond(ErrorCode::NotFound, "Subject not found"));
    }

    let percentage = round2(grade.marks_obtained / grade.total_marks * 100.0);
    let created = storage
        .create_grade(NewGrade {
            student_id: grade.student_id,
            subject_id: grade.subject_id,
            teacher_id: user.id,
            exam_type: grade.exam_type.trim().to_string(),
            exam_name: grade.exam_name.trim().to_string(),
            marks_obtained: grade.marks_obtained,
            total_marks: grade.total_marks,
            percentage,
            grade: grade_letter(percentage).to_string(),
            exam_date: grade.exam_date,
            remarks: grade.remarks,
        })
        .await?;

    info!(
        "Grade {} recorded for student {} by user {}",
        created.grade.id, grade.student_id, user.id
    );
    Ok(HttpResponse::Created().json(ApiResponse::success(created, "Grade recorded successfully")))
}

fn check_marks(obtained: f64, total: f64) -> Result<(), &'static str> {
    if !(total > 0.0) {
        return Err("Total marks must be greater than 0");
    }
    if !(0.0..=total).contains(&obtained) {
        return Err("Marks obtained must be between 0 and total marks");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::check_marks;

    #[test]
    fn test_check_marks() {
        assert!(check_marks(45.0, 50.0).is_ok());
        assert!(check_marks(0.0, 50.0).is_ok());
        assert!(check_marks(50.0, 50.0).is_ok());
        assert!(check_marks(51.0, 50.0).is_err());
        assert!(check_marks(-1.0, 50.0).is_err());
        assert!(check_marks(10.0, 0.0).is_err());
        assert!(check_marks(10.0, f64::NAN).is_err());
    }
}
