pub mod course;
pub mod course_module;
pub mod course_student;
pub mod enrollment;
pub mod notification;
pub mod progress;
pub mod quiz;
pub mod quiz_question;
pub mod quiz_submission;
pub mod user;
