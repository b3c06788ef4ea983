pub mod create;
pub mod delete;
pub mod list;
pub mod stats;
pub mod update;
pub mod weekly;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::timetable::requests::{
    AcademicYearQuery, CreateTimetableRequest, TimetableListQuery, TimetableSlot,
    UpdateTimetableRequest,
};
use crate::utils::validate::{validate_academic_year, validate_time};

super::lazy_storage_service!(TimetableService);

impl TimetableService {
    pub async fn list_timetable(
        &self,
        request: &HttpRequest,
        query: TimetableListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_timetable(self, request, query).await
    }

    // 班级周课表
    pub async fn get_class_timetable(
        &self,
        request: &HttpRequest,
        class_id: i64,
        query: AcademicYearQuery,
    ) -> ActixResult<HttpResponse> {
        weekly::get_class_timetable(self, request, class_id, query).await
    }

    // 教师周课表
    pub async fn get_teacher_timetable(
        &self,
        request: &HttpRequest,
        teacher_id: i64,
        query: AcademicYearQuery,
    ) -> ActixResult<HttpResponse> {
        weekly::get_teacher_timetable(self, request, teacher_id, query).await
    }

    pub async fn create_entry(
        &self,
        request: &HttpRequest,
        entry: CreateTimetableRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_entry(self, request, entry).await
    }

    pub async fn update_entry(
        &self,
        request: &HttpRequest,
        entry_id: i64,
        update: UpdateTimetableRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_entry(self, request, entry_id, update).await
    }

    pub async fn delete_entry(
        &self,
        request: &HttpRequest,
        entry_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_entry(self, request, entry_id).await
    }

    pub async fn get_stats(
        &self,
        request: &HttpRequest,
        query: AcademicYearQuery,
    ) -> ActixResult<HttpResponse> {
        stats::get_stats(self, request, query).await
    }
}

/// 校验课时字段，返回第一条错误
pub(crate) fn validate_slot(slot: &TimetableSlot) -> Result<(), &'static str> {
    if !(0..=6).contains(&slot.day_of_week) {
        return Err("Day of week must be between 0 (Sunday) and 6 (Saturday)");
    }
    if slot.period_number < 1 {
        return Err("Period number must be at least 1");
    }
    validate_time(&slot.start_time)?;
    validate_time(&slot.end_time)?;
    // HH:MM 定长格式可直接按字符串比较
    if slot.start_time >= slot.end_time {
        return Err("Start time must be before end time");
    }
    validate_academic_year(&slot.academic_year)?;
    Ok(())
}

/// 新建请求转换为课时，缺失的必填字段一并返回
pub(crate) fn slot_from_request(
    entry: CreateTimetableRequest,
) -> Result<TimetableSlot, Vec<&'static str>> {
    let mut missing = Vec::new();
    if entry.class_id.is_none() {
        missing.push("classId");
    }
    if entry.subject_id.is_none() {
        missing.push("subjectId");
    }
    if entry.teacher_id.is_none() {
        missing.push("teacherId");
    }
    if entry.day_of_week.is_none() {
        missing.push("dayOfWeek");
    }
    if entry.period_number.is_none() {
        missing.push("periodNumber");
    }
    if entry.start_time.is_none() {
        missing.push("startTime");
    }
    if entry.end_time.is_none() {
        missing.push("endTime");
    }
    if entry.academic_year.is_none() {
        missing.push("academicYear");
    }

    match entry {
        CreateTimetableRequest {
            class_id: Some(class_id),
            subject_id: Some(subject_id),
            teacher_id: Some(teacher_id),
            day_of_week: Some(day_of_week),
            period_number: Some(period_number),
            start_time: Some(start_time),
            end_time: Some(end_time),
            room_number,
            academic_year: Some(academic_year),
        } => Ok(TimetableSlot {
            class_id,
            subject_id,
            teacher_id,
            day_of_week,
            period_number,
            start_time,
            end_time,
            room_number,
            academic_year,
        }),
        _ => Err(missing),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateTimetableRequest {
        CreateTimetableRequest {
            class_id: Some(1),
            subject_id: Some(2),
            teacher_id: Some(3),
            day_of_week: Some(1),
            period_number: Some(1),
            start_time: Some("09:00".into()),
            end_time: Some("09:45".into()),
            room_number: None,
            academic_year: Some("2025-26".into()),
        }
    }

    #[test]
    fn test_missing_fields_are_listed() {
        let result = slot_from_request(CreateTimetableRequest {
            teacher_id: None,
            end_time: None,
            ..request()
        });
        assert_eq!(result.unwrap_err(), vec!["teacherId", "endTime"]);
    }

    #[test]
    fn test_slot_validation() {
        let slot = slot_from_request(request()).unwrap();
        assert!(validate_slot(&slot).is_ok());

        let bad_day = TimetableSlot {
            day_of_week: 7,
            ..slot.clone()
        };
        assert!(validate_slot(&bad_day).is_err());

        let reversed = TimetableSlot {
            start_time: "10:00".into(),
            end_time: "09:00".into(),
            ..slot.clone()
        };
        assert_eq!(
            validate_slot(&reversed),
            Err("Start time must be before end time")
        );

        let bad_year = TimetableSlot {
            academic_year: "2025".into(),
            ..slot
        };
        assert!(validate_slot(&bad_year).is_err());
    }
}
