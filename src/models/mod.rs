// Catalog
pub mod achievement;
pub mod activity_type;
pub mod challenge;
pub mod leaderboard;
pub mod level;
pub mod point_type;

// Catalog links and per-user records
pub mod achievement_criteria;
pub mod leaderboard_entry;
pub mod user_achievement;
pub mod user_activity;
pub mod user_challenge;
pub mod user_level;
pub mod user_point;

// Host-owned tables
pub mod attachment;
pub mod user;
