use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TeacherService;
use crate::models::ApiResponse;
use crate::models::subjects::{
    entities::{Subject, SubjectBrief},
    requests::SubjectListQuery,
    responses::TeacherSubjectsResponse,
};
use crate::services::current_user;

pub async fn get_my_subjects(
    service: &TeacherService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    let taught = storage.subjects_taught_by(user.school_id, user.id).await?;
    if !taught.is_empty() {
        let subject_names = taught.iter().map(|s| s.name.clone()).collect();
        return Ok(HttpResponse::Ok().json(ApiResponse::data(TeacherSubjectsResponse {
            subjects: taught,
            subject_names,
            from_timetable: true,
        })));
    }

    // 课表中没有任课记录时，退回教师档案中登记的科目
    let subject_names = storage
        .get_teacher_by_user_id(user.id)
        .await?
        .map(|t| t.teacher.subjects)
        .unwrap_or_default();
    let catalog = storage
        .list_subjects(
            user.school_id,
            SubjectListQuery {
                is_active: Some(true),
                ..Default::default()
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::data(TeacherSubjectsResponse {
        subjects: match_subject_names(&subject_names, &catalog),
        subject_names,
        from_timetable: false,
    })))
}

/// 按名称（忽略大小写）在科目表中查找
fn match_subject_names(names: &[String], catalog: &[Subject]) -> Vec<SubjectBrief> {
    catalog
        .iter()
        .filter(|s| names.iter().any(|n| n.trim().eq_ignore_ascii_case(&s.name)))
        .map(SubjectBrief::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn subject(id: i64, name: &str, code: &str) -> Subject {
        Subject {
            id,
            school_id: 1,
            name: name.into(),
            code: code.into(),
            description: None,
            is_core: true,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_match_subject_names_ignores_case() {
        let catalog = vec![
            subject(1, "Mathematics", "MATH"),
            subject(2, "Physics", "PHY"),
            subject(3, "History", "HIS"),
        ];
        let names = vec!["mathematics".to_string(), " History ".to_string(), "Art".to_string()];

        let matched = match_subject_names(&names, &catalog);
        let codes: Vec<&str> = matched.iter().map(|s| s.code.as_str()).collect();
        assert_eq!(codes, vec!["MATH", "HIS"]);
    }
}
