//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod attendance_repo;
pub mod billing_repo;
pub mod class_enrollment_repo;
pub mod class_group_repo;
pub mod class_lesson_repo;
pub mod mentorship_attendance_repo;
pub mod mentorship_payment_repo;
pub mod mentorship_repo;
pub mod mentorship_session_repo;
pub mod student_repo;
pub mod subject_repo;
pub mod teacher_repo;

pub use attendance_repo::AttendanceRepo;
pub use billing_repo::BillingRepo;
pub use class_enrollment_repo::ClassEnrollmentRepo;
pub use class_group_repo::ClassGroupRepo;
pub use class_lesson_repo::ClassLessonRepo;
pub use mentorship_attendance_repo::MentorshipAttendanceRepo;
pub use mentorship_payment_repo::MentorshipPaymentRepo;
pub use mentorship_repo::MentorshipRepo;
pub use mentorship_session_repo::MentorshipSessionRepo;
pub use student_repo::StudentRepo;
pub use subject_repo::SubjectRepo;
pub use teacher_repo::TeacherRepo;
