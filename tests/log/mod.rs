mod log_traversal;
mod show_log_in_medium_format;
