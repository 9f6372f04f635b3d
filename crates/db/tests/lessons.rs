//! Class lesson lifecycle at the repository level.

use academy_db::models::class_group::CreateClassGroup;
use academy_db::models::class_lesson::{CreateClassLesson, UpdateClassLesson};
use academy_db::models::status::LessonStatus;
use academy_db::models::subject::CreateSubject;
use academy_db::models::teacher::CreateTeacher;
use academy_db::repositories::{ClassGroupRepo, ClassLessonRepo, SubjectRepo, TeacherRepo};
use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use sqlx::PgPool;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

async fn seed_lesson(pool: &PgPool) -> (i64, i64) {
    let subject = SubjectRepo::create(
        pool,
        &CreateSubject {
            name: "Algebra".to_string(),
            description: None,
        },
    )
    .await
    .unwrap();
    let teacher = TeacherRepo::create(
        pool,
        &CreateTeacher {
            name: "Emmy Noether".to_string(),
            email: "emmy@academy.test".to_string(),
            password_hash: "not-a-real-hash".to_string(),
        },
    )
    .await
    .unwrap();
    let group = ClassGroupRepo::create(
        pool,
        &CreateClassGroup {
            name: "Algebra I".to_string(),
            subject_id: subject.id,
            teacher_id: teacher.id,
            term_start: date(2026, 9, 1),
            term_end: date(2026, 12, 18),
            default_duration_minutes: 90,
            weekly_schedule: Vec::new(),
            hourly_rate: Decimal::from(20),
        },
    )
    .await
    .unwrap();
    let lesson = ClassLessonRepo::create(
        pool,
        &CreateClassLesson {
            class_group_id: group.id,
            lesson_date: date(2026, 9, 7),
            start_time: NaiveTime::from_hms_opt(16, 0, 0).unwrap(),
            duration_minutes: 90,
            notes: None,
        },
    )
    .await
    .unwrap();
    (group.id, lesson.id)
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn terminal_lesson_is_not_moved(pool: PgPool) {
    let (group_id, lesson_id) = seed_lesson(&pool).await;
    ClassLessonRepo::complete(&pool, lesson_id)
        .await
        .unwrap()
        .expect("scheduled lesson completes");

    let moved = UpdateClassLesson {
        lesson_date: Some(date(2026, 9, 14)),
        duration_minutes: Some(120),
        ..Default::default()
    };
    assert!(moved.reschedules());
    assert!(ClassLessonRepo::update(&pool, lesson_id, &moved)
        .await
        .unwrap()
        .is_none());

    let stored = ClassLessonRepo::find_scoped(&pool, group_id, lesson_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status_id, LessonStatus::Completed.id());
    assert_eq!(stored.lesson_date, date(2026, 9, 7));
    assert_eq!(stored.duration_minutes, 90);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn notes_stay_editable_after_cancel(pool: PgPool) {
    let (_, lesson_id) = seed_lesson(&pool).await;
    ClassLessonRepo::cancel(&pool, lesson_id)
        .await
        .unwrap()
        .expect("scheduled lesson cancels");

    let notes = UpdateClassLesson {
        notes: Some("Teacher ill".to_string()),
        ..Default::default()
    };
    assert!(!notes.reschedules());
    let updated = ClassLessonRepo::update(&pool, lesson_id, &notes)
        .await
        .unwrap()
        .expect("notes update applies");
    assert_eq!(updated.notes.as_deref(), Some("Teacher ill"));
    assert_eq!(updated.status_id, LessonStatus::Cancelled.id());
}
