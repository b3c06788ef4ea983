//! 分析数据聚合
//!
//! 输入是按访问范围取出的扁平记录，这里只做分组与计算。

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::analytics::{
    facts::{AttendanceFact, GradeFact, HomeworkFact},
    responses::{
        AttendanceTotals, ClassAttendanceStat, DailyTrend, GroupPerformance, PerformanceOverview,
        RecentActivity, StatusCount, StudentAttendanceStat, TeacherWorkload,
    },
};
use crate::models::attendance::entities::AttendanceStatus;
use crate::models::students::responses::StudentListItem;
use crate::models::teachers::responses::TeacherListItem;
use crate::models::timetable::responses::TimetableEntryView;
use crate::utils::metrics::{StatusTally, average, percentage, round2};

pub const DAILY_TREND_DAYS: usize = 30;
pub const TOP_STUDENTS: usize = 50;
pub const RECENT_ACTIVITIES: usize = 20;

pub fn attendance_totals(facts: &[AttendanceFact]) -> AttendanceTotals {
    let tally = StatusTally::from_statuses(facts.iter().map(|f| f.status));
    AttendanceTotals {
        total_records: tally.total() as i64,
        present: tally.present as i64,
        absent: tally.absent as i64,
        attendance_percentage: tally.attendance_rate(),
    }
}

pub fn status_breakdown(facts: &[AttendanceFact]) -> Vec<StatusCount> {
    let tally = StatusTally::from_statuses(facts.iter().map(|f| f.status));
    AttendanceStatus::ALL
        .iter()
        .map(|status| StatusCount {
            status: status.as_str().to_string(),
            count: tally.count(*status) as i64,
        })
        .collect()
}

/// 最近 `days` 个有记录的日期，日期倒序
pub fn daily_trends(facts: &[AttendanceFact], days: usize) -> Vec<DailyTrend> {
    let mut by_date: BTreeMap<NaiveDate, StatusTally> = BTreeMap::new();
    for fact in facts {
        by_date.entry(fact.date).or_default().add(fact.status);
    }

    by_date
        .into_iter()
        .rev()
        .take(days)
        .map(|(date, tally)| DailyTrend {
            date,
            total_records: tally.total() as i64,
            present: tally.present as i64,
            absent: tally.absent as i64,
            late: tally.late as i64,
            excused: tally.excused as i64,
            attendance_percentage: tally.attendance_rate(),
        })
        .collect()
}

/// 按班级统计，出勤率降序
pub fn class_attendance(facts: &[AttendanceFact]) -> Vec<ClassAttendanceStat> {
    let mut by_class: HashMap<i64, (&AttendanceFact, StatusTally)> = HashMap::new();
    for fact in facts {
        by_class
            .entry(fact.class_id)
            .or_insert_with(|| (fact, StatusTally::default()))
            .1
            .add(fact.status);
    }

    let mut stats: Vec<ClassAttendanceStat> = by_class
        .into_values()
        .map(|(fact, tally)| ClassAttendanceStat {
            class_id: fact.class_id,
            class_name: fact.class_name.clone(),
            section: fact.section.clone(),
            total_records: tally.total() as i64,
            present: tally.present as i64,
            absent: tally.absent as i64,
            attendance_percentage: tally.attendance_rate(),
        })
        .collect();
    stats.sort_by(|a, b| {
        b.attendance_percentage
            .total_cmp(&a.attendance_percentage)
            .then_with(|| a.class_name.cmp(&b.class_name))
            .then_with(|| a.section.cmp(&b.section))
    });
    stats
}

/// 按学生统计，出勤率降序，取前 `limit` 名
pub fn student_attendance(facts: &[AttendanceFact], limit: usize) -> Vec<StudentAttendanceStat> {
    let mut by_student: HashMap<i64, (&AttendanceFact, StatusTally)> = HashMap::new();
    for fact in facts {
        by_student
            .entry(fact.student_id)
            .or_insert_with(|| (fact, StatusTally::default()))
            .1
            .add(fact.status);
    }

    let mut stats: Vec<StudentAttendanceStat> = by_student
        .into_values()
        .map(|(fact, tally)| StudentAttendanceStat {
            student_id: fact.student_id,
            first_name: fact.first_name.clone(),
            last_name: fact.last_name.clone(),
            roll_number: fact.roll_number.clone(),
            class_name: fact.class_name.clone(),
            section: fact.section.clone(),
            total_records: tally.total() as i64,
            present: tally.present as i64,
            absent: tally.absent as i64,
            attendance_percentage: tally.attendance_rate(),
        })
        .collect();
    stats.sort_by(|a, b| {
        b.attendance_percentage
            .total_cmp(&a.attendance_percentage)
            .then_with(|| a.roll_number.cmp(&b.roll_number))
    });
    stats.truncate(limit);
    stats
}

/// 每个学生的出勤率
pub fn attendance_rate_by_student(facts: &[AttendanceFact]) -> HashMap<i64, f64> {
    let mut by_student: HashMap<i64, StatusTally> = HashMap::new();
    for fact in facts {
        by_student.entry(fact.student_id).or_default().add(fact.status);
    }
    by_student
        .into_iter()
        .map(|(id, tally)| (id, tally.attendance_rate()))
        .collect()
}

/// 每个班级的出勤率
pub fn attendance_rate_by_class(facts: &[AttendanceFact]) -> HashMap<i64, f64> {
    let mut by_class: HashMap<i64, StatusTally> = HashMap::new();
    for fact in facts {
        by_class.entry(fact.class_id).or_default().add(fact.status);
    }
    by_class
        .into_iter()
        .map(|(id, tally)| (id, tally.attendance_rate()))
        .collect()
}

fn min_max(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    (round2(min), round2(max))
}

pub fn performance_overview(grades: &[GradeFact]) -> PerformanceOverview {
    let values: Vec<f64> = grades.iter().map(|g| g.percentage).collect();
    let (min_percentage, max_percentage) = min_max(&values);
    PerformanceOverview {
        total_records: values.len() as i64,
        average_percentage: average(&values),
        min_percentage,
        max_percentage,
    }
}

/// 按任意维度分组统计成绩，平均分降序
pub fn group_performance<K>(grades: &[GradeFact], key: K) -> Vec<GroupPerformance>
where
    K: Fn(&GradeFact) -> (i64, String),
{
    let mut groups: HashMap<i64, (String, Vec<f64>)> = HashMap::new();
    for grade in grades {
        let (id, name) = key(grade);
        groups
            .entry(id)
            .or_insert_with(|| (name, Vec::new()))
            .1
            .push(grade.percentage);
    }

    let mut stats: Vec<GroupPerformance> = groups
        .into_iter()
        .map(|(id, (name, values))| {
            let (min_percentage, max_percentage) = min_max(&values);
            GroupPerformance {
                id,
                name,
                exam_count: values.len() as i64,
                average_percentage: average(&values),
                min_percentage,
                max_percentage,
            }
        })
        .collect();
    stats.sort_by(|a, b| {
        b.average_percentage
            .total_cmp(&a.average_percentage)
            .then_with(|| a.name.cmp(&b.name))
    });
    stats
}

pub fn subject_performance(grades: &[GradeFact]) -> Vec<GroupPerformance> {
    group_performance(grades, |g| (g.subject_id, g.subject_name.clone()))
}

pub fn class_performance(grades: &[GradeFact]) -> Vec<GroupPerformance> {
    group_performance(grades, |g| {
        (g.class_id, format!("{} {}", g.class_name, g.section))
    })
}

pub fn student_performance(grades: &[GradeFact], limit: usize) -> Vec<GroupPerformance> {
    let mut stats = group_performance(grades, |g| (g.student_id, g.student_name.clone()));
    stats.truncate(limit);
    stats
}

/// 每个学生的平均成绩百分比
pub fn average_grade_by_student(grades: &[GradeFact]) -> HashMap<i64, f64> {
    let mut by_student: HashMap<i64, Vec<f64>> = HashMap::new();
    for grade in grades {
        by_student
            .entry(grade.student_id)
            .or_default()
            .push(grade.percentage);
    }
    by_student
        .into_iter()
        .map(|(id, values)| (id, average(&values)))
        .collect()
}

/// 班级作业数：(总数, 已发布, 未到期)
pub fn homework_counts(facts: &[HomeworkFact], now: DateTime<Utc>) -> (i64, i64, i64) {
    let published = facts.iter().filter(|h| h.is_published).count();
    let pending = facts.iter().filter(|h| h.due_date >= now).count();
    (facts.len() as i64, published as i64, pending as i64)
}

/// 教师课表工作量
pub fn teacher_workload(entries: &[&TimetableEntryView]) -> TeacherWorkload {
    let days: HashSet<i32> = entries.iter().map(|e| e.entry.day_of_week).collect();
    let classes: HashSet<i64> = entries.iter().map(|e| e.entry.class_id).collect();
    let subjects: HashSet<i64> = entries.iter().map(|e| e.entry.subject_id).collect();
    TeacherWorkload {
        working_days: days.len() as i64,
        total_periods: entries.len() as i64,
        classes_taught: classes.len() as i64,
        subjects_taught: subjects.len() as i64,
    }
}

/// 提交数 / (已发布作业 × 班级人数)
pub fn homework_completion_rate(
    homework: &[&HomeworkFact],
    class_sizes: &HashMap<i64, i64>,
) -> f64 {
    let published: Vec<&&HomeworkFact> = homework.iter().filter(|h| h.is_published).collect();
    let expected: i64 = published
        .iter()
        .map(|h| class_sizes.get(&h.class_id).copied().unwrap_or(0))
        .sum();
    let submitted: i64 = published.iter().map(|h| h.submission_count).sum();
    percentage(submitted.max(0) as u64, expected.max(0) as u64)
}

/// 入学与教师入职记录，时间倒序
pub fn recent_activities(
    students: &[StudentListItem],
    teachers: &[TeacherListItem],
    since: DateTime<Utc>,
    limit: usize,
) -> Vec<RecentActivity> {
    let admissions = students.iter().map(|s| RecentActivity {
        activity_type: "student_admission".to_string(),
        record_id: s.student.id,
        description: format!("{} {}", s.user.first_name, s.user.last_name),
        occurred_at: s.student.created_at,
    });
    let joinings = teachers.iter().map(|t| RecentActivity {
        activity_type: "teacher_joining".to_string(),
        record_id: t.teacher.id,
        description: format!("{} {}", t.user.first_name, t.user.last_name),
        occurred_at: t.teacher.created_at,
    });

    let mut activities: Vec<RecentActivity> = admissions
        .chain(joinings)
        .filter(|a| a.occurred_at >= since)
        .collect();
    activities.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));
    activities.truncate(limit);
    activities
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
    }

    fn attendance(student_id: i64, class_id: i64, day: u32, status: AttendanceStatus) -> AttendanceFact {
        AttendanceFact {
            record_id: student_id * 100 + day as i64,
            student_id,
            class_id,
            date: d(day),
            status,
            marked_by: 7,
            class_name: format!("Grade {class_id}"),
            section: "A".into(),
            first_name: format!("S{student_id}"),
            last_name: "Doe".into(),
            roll_number: format!("{student_id:03}"),
        }
    }

    fn grade(student_id: i64, subject_id: i64, percentage: f64) -> GradeFact {
        GradeFact {
            grade_id: student_id * 10 + subject_id,
            student_id,
            class_id: 1,
            subject_id,
            teacher_id: 7,
            percentage,
            exam_date: d(10),
            exam_type: "midterm".into(),
            subject_name: format!("Subject {subject_id}"),
            class_name: "Grade 1".into(),
            section: "A".into(),
            student_name: format!("S{student_id} Doe"),
        }
    }

    fn homework(class_id: i64, published: bool, submissions: i64, due_in_days: i64) -> HomeworkFact {
        let now = Utc::now();
        HomeworkFact {
            homework_id: class_id * 10 + submissions,
            class_id,
            teacher_id: 7,
            is_published: published,
            due_date: now + Duration::days(due_in_days),
            created_at: now,
            submission_count: submissions,
            marks: Vec::new(),
        }
    }

    #[test]
    fn test_status_breakdown_lists_every_status() {
        use AttendanceStatus::*;
        let facts = vec![
            attendance(1, 1, 3, Present),
            attendance(2, 1, 3, Absent),
            attendance(1, 1, 4, Present),
        ];
        let breakdown = status_breakdown(&facts);
        assert_eq!(breakdown.len(), 4);
        assert_eq!(breakdown[0].status, "present");
        assert_eq!(breakdown[0].count, 2);
        assert_eq!(breakdown[3].count, 0);

        let totals = attendance_totals(&facts);
        assert_eq!(totals.total_records, 3);
        assert_eq!(totals.attendance_percentage, 66.67);
    }

    #[test]
    fn test_daily_trends_newest_first() {
        use AttendanceStatus::*;
        let facts: Vec<_> = (1..=5)
            .map(|day| attendance(1, 1, day, if day % 2 == 0 { Absent } else { Present }))
            .collect();
        let trends = daily_trends(&facts, 3);
        assert_eq!(trends.len(), 3);
        assert_eq!(trends[0].date, d(5));
        assert_eq!(trends[1].attendance_percentage, 0.0);
        assert_eq!(trends[2].date, d(3));
    }

    #[test]
    fn test_class_and_student_ranking() {
        use AttendanceStatus::*;
        let facts = vec![
            attendance(1, 1, 3, Absent),
            attendance(2, 2, 3, Present),
            attendance(3, 2, 3, Present),
            attendance(3, 2, 4, Late),
        ];
        let classes = class_attendance(&facts);
        assert_eq!(classes[0].class_id, 2);
        assert_eq!(classes[0].attendance_percentage, 66.67);
        assert_eq!(classes[1].attendance_percentage, 0.0);

        let students = student_attendance(&facts, 2);
        assert_eq!(students.len(), 2);
        assert_eq!(students[0].student_id, 2);
        assert_eq!(students[1].student_id, 3);

        let rates = attendance_rate_by_student(&facts);
        assert_eq!(rates[&3], 50.0);
        assert_eq!(attendance_rate_by_class(&facts)[&1], 0.0);
    }

    #[test]
    fn test_performance_groups() {
        let grades = vec![grade(1, 1, 80.0), grade(1, 2, 60.0), grade(2, 1, 91.5)];
        let overview = performance_overview(&grades);
        assert_eq!(overview.total_records, 3);
        assert_eq!(overview.average_percentage, 77.17);
        assert_eq!(overview.min_percentage, 60.0);
        assert_eq!(overview.max_percentage, 91.5);

        let subjects = subject_performance(&grades);
        assert_eq!(subjects[0].id, 1);
        assert_eq!(subjects[0].average_percentage, 85.75);
        assert_eq!(subjects[0].exam_count, 2);

        let students = student_performance(&grades, 1);
        assert_eq!(students.len(), 1);
        assert_eq!(students[0].id, 2);

        assert_eq!(average_grade_by_student(&grades)[&1], 70.0);
        assert_eq!(performance_overview(&[]), PerformanceOverview::default());
    }

    #[test]
    fn test_homework_completion_rate() {
        let facts = vec![homework(1, true, 15, 1), homework(2, true, 5, -1), homework(1, false, 0, 3)];
        let refs: Vec<&HomeworkFact> = facts.iter().collect();
        let sizes = HashMap::from([(1, 20), (2, 10)]);
        // 20 / (20 + 10)
        assert_eq!(homework_completion_rate(&refs, &sizes), 66.67);
        assert_eq!(homework_completion_rate(&[], &sizes), 0.0);

        let (total, published, pending) = homework_counts(&facts, Utc::now());
        assert_eq!((total, published, pending), (3, 2, 2));
    }
}
