pub mod m202608150001_create_users;
pub mod m202608150002_create_courses;
pub mod m202608150003_create_course_modules;
pub mod m202608150004_create_course_students;
pub mod m202608150005_create_quizzes;
pub mod m202608150006_create_quiz_questions;
pub mod m202608150007_create_enrollments;
pub mod m202608150008_create_progress;
pub mod m202608150009_create_quiz_submissions;
pub mod m202608150010_create_notifications;
