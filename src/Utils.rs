//! different utility modules used throughout the project
/// logger setup and saving of results into csv files
pub mod logger;
/// parse task documents made of titled sections of `key: value` lines
pub mod task_parser;
