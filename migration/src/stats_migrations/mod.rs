pub mod m202608160001_create_course_stats;
pub mod m202608160002_create_quiz_stats;
pub mod m202608160003_create_score_events;
