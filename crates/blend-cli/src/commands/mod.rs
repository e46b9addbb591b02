//! Subcommand implementations for `blendtool`. Each exits the process with
//! status 1 on error.

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            std::process::exit(1);
        })
    };
}

pub mod config_ops;
pub mod retrieve_ops;
pub mod screen_ops;
