use sea_orm_migration::prelude::*;

use crate::m20250301_000001_create_school_tables::{Classes, Schools, Students, Subjects, Users};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建考勤表
        manager
            .create_table(
                Table::create()
                    .table(Attendance::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Attendance::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Attendance::StudentId).big_integer().not_null())
                    .col(ColumnDef::new(Attendance::ClassId).big_integer().not_null())
                    .col(ColumnDef::new(Attendance::Date).date().not_null())
                    .col(ColumnDef::new(Attendance::Status).string().not_null())
                    .col(ColumnDef::new(Attendance::MarkedBy).big_integer().not_null())
                    .col(ColumnDef::new(Attendance::Remarks).string().null())
                    .col(
                        ColumnDef::new(Attendance::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Attendance::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Attendance::Table, Attendance::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Attendance::Table, Attendance::ClassId)
                            .to(Classes::Table, Classes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Attendance::Table, Attendance::MarkedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建作业表
        manager
            .create_table(
                Table::create()
                    .table(Homeworks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Homeworks::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Homeworks::SchoolId).big_integer().not_null())
                    .col(ColumnDef::new(Homeworks::ClassId).big_integer().not_null())
                    .col(ColumnDef::new(Homeworks::SubjectId).big_integer().not_null())
                    .col(ColumnDef::new(Homeworks::TeacherId).big_integer().not_null())
                    .col(ColumnDef::new(Homeworks::Title).string().not_null())
                    .col(ColumnDef::new(Homeworks::Description).text().null())
                    .col(ColumnDef::new(Homeworks::Instructions).text().null())
                    .col(ColumnDef::new(Homeworks::DueDate).big_integer().not_null())
                    .col(ColumnDef::new(Homeworks::MaxMarks).double().null())
                    .col(ColumnDef::new(Homeworks::IsPublished).boolean().not_null())
                    .col(ColumnDef::new(Homeworks::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Homeworks::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Homeworks::Table, Homeworks::SchoolId)
                            .to(Schools::Table, Schools::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Homeworks::Table, Homeworks::ClassId)
                            .to(Classes::Table, Classes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Homeworks::Table, Homeworks::SubjectId)
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Homeworks::Table, Homeworks::TeacherId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建作业提交表
        manager
            .create_table(
                Table::create()
                    .table(HomeworkSubmissions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(HomeworkSubmissions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(HomeworkSubmissions::HomeworkId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(HomeworkSubmissions::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(HomeworkSubmissions::Content).text().null())
                    .col(ColumnDef::new(HomeworkSubmissions::Status).string().not_null())
                    .col(ColumnDef::new(HomeworkSubmissions::Marks).double().null())
                    .col(ColumnDef::new(HomeworkSubmissions::Feedback).text().null())
                    .col(
                        ColumnDef::new(HomeworkSubmissions::SubmittedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(HomeworkSubmissions::GradedAt)
                            .big_integer()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(HomeworkSubmissions::Table, HomeworkSubmissions::HomeworkId)
                            .to(Homeworks::Table, Homeworks::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(HomeworkSubmissions::Table, HomeworkSubmissions::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建成绩表
        manager
            .create_table(
                Table::create()
                    .table(Grades::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Grades::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Grades::StudentId).big_integer().not_null())
                    .col(ColumnDef::new(Grades::SubjectId).big_integer().not_null())
                    .col(ColumnDef::new(Grades::TeacherId).big_integer().not_null())
                    .col(ColumnDef::new(Grades::ExamType).string().not_null())
                    .col(ColumnDef::new(Grades::ExamName).string().not_null())
                    .col(ColumnDef::new(Grades::MarksObtained).double().not_null())
                    .col(ColumnDef::new(Grades::TotalMarks).double().not_null())
                    .col(ColumnDef::new(Grades::Percentage).double().not_null())
                    .col(ColumnDef::new(Grades::Grade).string().not_null())
                    .col(ColumnDef::new(Grades::ExamDate).date().not_null())
                    .col(ColumnDef::new(Grades::Remarks).string().null())
                    .col(ColumnDef::new(Grades::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Grades::Table, Grades::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Grades::Table, Grades::SubjectId)
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Grades::Table, Grades::TeacherId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建通知表
        manager
            .create_table(
                Table::create()
                    .table(Notifications::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Notifications::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Notifications::SchoolId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Notifications::SenderId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Notifications::RecipientId).big_integer().null())
                    .col(
                        ColumnDef::new(Notifications::RecipientType)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Notifications::RecipientClassId)
                            .big_integer()
                            .null(),
                    )
                    .col(ColumnDef::new(Notifications::Title).string().not_null())
                    .col(ColumnDef::new(Notifications::Message).text().not_null())
                    .col(
                        ColumnDef::new(Notifications::NotificationType)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Notifications::Priority).string().not_null())
                    .col(ColumnDef::new(Notifications::IsRead).boolean().not_null())
                    .col(ColumnDef::new(Notifications::ReadAt).big_integer().null())
                    .col(
                        ColumnDef::new(Notifications::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Notifications::Table, Notifications::SchoolId)
                            .to(Schools::Table, Schools::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Notifications::Table, Notifications::SenderId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建家校问答表
        manager
            .create_table(
                Table::create()
                    .table(QaMessages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(QaMessages::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(QaMessages::ParentId).big_integer().not_null())
                    .col(
                        ColumnDef::new(QaMessages::ClassTeacherId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(QaMessages::StudentId).big_integer().not_null())
                    .col(ColumnDef::new(QaMessages::Message).text().not_null())
                    .col(ColumnDef::new(QaMessages::Reply).text().null())
                    .col(ColumnDef::new(QaMessages::Status).string().not_null())
                    .col(ColumnDef::new(QaMessages::Priority).string().not_null())
                    .col(ColumnDef::new(QaMessages::RepliedAt).big_integer().null())
                    .col(ColumnDef::new(QaMessages::ClosedAt).big_integer().null())
                    .col(ColumnDef::new(QaMessages::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(QaMessages::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(QaMessages::Table, QaMessages::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建投诉表
        manager
            .create_table(
                Table::create()
                    .table(Complaints::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Complaints::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Complaints::StudentId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Complaints::ComplainantId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Complaints::ClassTeacherId)
                            .big_integer()
                            .null(),
                    )
                    .col(ColumnDef::new(Complaints::Subject).string().not_null())
                    .col(ColumnDef::new(Complaints::Description).text().not_null())
                    .col(ColumnDef::new(Complaints::Category).string().not_null())
                    .col(ColumnDef::new(Complaints::Status).string().not_null())
                    .col(ColumnDef::new(Complaints::Priority).string().not_null())
                    .col(ColumnDef::new(Complaints::Resolution).text().null())
                    .col(ColumnDef::new(Complaints::ResolvedBy).big_integer().null())
                    .col(ColumnDef::new(Complaints::ResolvedAt).big_integer().null())
                    .col(ColumnDef::new(Complaints::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Complaints::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Complaints::Table, Complaints::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 同一学生同一天只允许一条考勤记录，拦截并发的重复提交
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_attendance_student_date")
                    .table(Attendance::Table)
                    .col(Attendance::StudentId)
                    .col(Attendance::Date)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_attendance_class_date")
                    .table(Attendance::Table)
                    .col(Attendance::ClassId)
                    .col(Attendance::Date)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_homeworks_class_id")
                    .table(Homeworks::Table)
                    .col(Homeworks::ClassId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_submissions_homework_student")
                    .table(HomeworkSubmissions::Table)
                    .col(HomeworkSubmissions::HomeworkId)
                    .col(HomeworkSubmissions::StudentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_grades_student_id")
                    .table(Grades::Table)
                    .col(Grades::StudentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_notifications_recipient")
                    .table(Notifications::Table)
                    .col(Notifications::SchoolId)
                    .col(Notifications::RecipientId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Complaints::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(QaMessages::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Notifications::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Grades::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(HomeworkSubmissions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Homeworks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Attendance::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Attendance {
    #[sea_orm(iden = "attendance")]
    Table,
    Id,
    StudentId,
    ClassId,
    Date,
    Status,
    MarkedBy,
    Remarks,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Homeworks {
    #[sea_orm(iden = "homeworks")]
    Table,
    Id,
    SchoolId,
    ClassId,
    SubjectId,
    TeacherId,
    Title,
    Description,
    Instructions,
    DueDate,
    MaxMarks,
    IsPublished,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum HomeworkSubmissions {
    #[sea_orm(iden = "homework_submissions")]
    Table,
    Id,
    HomeworkId,
    StudentId,
    Content,
    Status,
    Marks,
    Feedback,
    SubmittedAt,
    GradedAt,
}

#[derive(DeriveIden)]
enum Grades {
    #[sea_orm(iden = "grades")]
    Table,
    Id,
    StudentId,
    SubjectId,
    TeacherId,
    ExamType,
    ExamName,
    MarksObtained,
    TotalMarks,
    Percentage,
    Grade,
    ExamDate,
    Remarks,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Notifications {
    #[sea_orm(iden = "notifications")]
    Table,
    Id,
    SchoolId,
    SenderId,
    RecipientId,
    RecipientType,
    RecipientClassId,
    Title,
    Message,
    NotificationType,
    Priority,
    IsRead,
    ReadAt,
    CreatedAt,
}

#[derive(DeriveIden)]
enum QaMessages {
    #[sea_orm(iden = "qa_messages")]
    Table,
    Id,
    ParentId,
    ClassTeacherId,
    StudentId,
    Message,
    Reply,
    Status,
    Priority,
    RepliedAt,
    ClosedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Complaints {
    #[sea_orm(iden = "complaints")]
    Table,
    Id,
    StudentId,
    ComplainantId,
    ClassTeacherId,
    Subject,
    Description,
    Category,
    Status,
    Priority,
    Resolution,
    ResolvedBy,
    ResolvedAt,
    CreatedAt,
    UpdatedAt,
}
