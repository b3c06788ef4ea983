use std::collections::HashSet;
use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;
use tracing::info;

use super::StudentService;
use crate::config::AppConfig;
use crate::models::students::{
    entities::default_admission_number,
    requests::{CreateStudentRequest, NewStudent},
    responses::CreatedStudent,
};
use crate::models::users::{entities::UserRole, requests::NewUser};
use crate::models::{AccessScope, ApiResponse, ErrorCode};
use crate::services::current_scope;
use crate::storage::Storage;
use crate::utils::password::hash_password;
use crate::utils::random_code::generate_temporary_password;
use crate::utils::validate::validate_email;

/// 校验一条学生数据并生成待写入记录及其临时密码
///
/// 出错时直接返回要给客户端的响应。
async fn prepare_student(
    storage: &Arc<dyn Storage>,
    scope: AccessScope,
    student: CreateStudentRequest,
    admission_number: String,
) -> ActixResult<Result<(NewStudent, String), HttpResponse>> {
    let email = student.email.trim().to_lowercase();
    if let Err(msg) = validate_email(&email) {
        return Ok(Err(ApiResponse::respond(ErrorCode::BadRequest, msg)));
    }
    if student.first_name.trim().is_empty() || student.roll_number.trim().is_empty() {
        return Ok(Err(ApiResponse::respond(
            ErrorCode::BadRequest,
            "First name and roll number are required",
        )));
    }
    if storage.get_user_by_email(&email).await?.is_some() {
        return Ok(Err(ApiResponse::respond(
            ErrorCode::Conflict,
            format!("User with email {email} already exists"),
        )));
    }

    // 班主任只能向自己的班级添加学生
    if storage
        .get_class_item(scope, student.class_id)
        .await?
        .is_none()
    {
        return Ok(Err(ApiResponse::respond(
            ErrorCode::NotFound,
            "Class not found",
        )));
    }

    if let Some(parent_id) = student.parent_id {
        match storage.get_school_user(scope.school_id, parent_id).await? {
            Some(parent) if parent.role == UserRole::Parent => {}
            _ => {
                return Ok(Err(ApiResponse::respond(
                    ErrorCode::BadRequest,
                    "Parent must be an existing parent user of this school",
                )));
            }
        }
    }

    let temporary_password =
        generate_temporary_password(AppConfig::get().school.temp_password_length);
    let password_hash = hash_password(&temporary_password)?;

    let new_student = NewStudent {
        user: NewUser {
            school_id: scope.school_id,
            email,
            password_hash,
            role: UserRole::Student,
            first_name: student.first_name.trim().to_string(),
            last_name: student.last_name.trim().to_string(),
            phone: student.phone,
            date_of_birth: student.date_of_birth,
            gender: student.gender,
        },
        class_id: student.class_id,
        parent_id: student.parent_id,
        roll_number: student.roll_number.trim().to_string(),
        admission_number: student.admission_number.unwrap_or(admission_number),
        admission_date: student
            .admission_date
            .unwrap_or_else(|| Utc::now().date_naive()),
        father_name: student.father_name,
        mother_name: student.mother_name,
        father_phone: student.father_phone,
        mother_phone: student.mother_phone,
        blood_group: student.blood_group,
        emergency_contact: student.emergency_contact,
    };

    Ok(Ok((new_student, temporary_password)))
}

pub async fn create_student(
    service: &StudentService,
    request: &HttpRequest,
    student: CreateStudentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (user, scope) = current_scope(request)?;

    let admission_number = default_admission_number(Utc::now());
    let (new_student, temporary_password) =
        match prepare_student(&storage, scope, student, admission_number).await? {
            Ok(prepared) => prepared,
            Err(resp) => return Ok(resp),
        };

    let created = storage.create_student(new_student).await?;
    info!("Student {} created by user {}", created.student.id, user.id);

    Ok(HttpResponse::Created().json(ApiResponse::success(
        CreatedStudent {
            student: created,
            temporary_password,
        },
        "Student created successfully",
    )))
}

pub async fn create_students_bulk(
    service: &StudentService,
    request: &HttpRequest,
    students: Vec<CreateStudentRequest>,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (user, scope) = current_scope(request)?;

    if students.is_empty() {
        return Ok(ApiResponse::respond(
            ErrorCode::BadRequest,
            "Students array is required",
        ));
    }

    // 批内邮箱不能重复
    let mut seen = HashSet::new();
    for student in &students {
        let email = student.email.trim().to_lowercase();
        if !seen.insert(email.clone()) {
            return Ok(ApiResponse::respond(
                ErrorCode::Conflict,
                format!("Duplicate email in batch: {email}"),
            ));
        }
    }

    let base = default_admission_number(Utc::now());
    let mut prepared = Vec::with_capacity(students.len());
    let mut passwords = Vec::with_capacity(students.len());
    for (index, student) in students.into_iter().enumerate() {
        let admission_number = format!("{base}{:03}", index + 1);
        match prepare_student(&storage, scope, student, admission_number).await? {
            Ok((new_student, password)) => {
                prepared.push(new_student);
                passwords.push(password);
            }
            Err(resp) => return Ok(resp),
        }
    }

    let created = storage.create_students_bulk(prepared).await?;
    info!("{} students created in bulk by user {}", created.len(), user.id);

    let result: Vec<CreatedStudent> = created
        .into_iter()
        .zip(passwords)
        .map(|(student, temporary_password)| CreatedStudent {
            student,
            temporary_password,
        })
        .collect();

    Ok(HttpResponse::Created().json(ApiResponse::success(
        result,
        "Students created successfully",
    )))
}
