mod config_options;
mod remote_lifecycle;
