use std::fs;

use blend_core::settings::{self, Settings};

pub fn settings_export() {
    print!("{}", settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(settings::parse_settings_toml(&content), "Error: {}");
    println!(
        "OK: screening.min_length={}, screening.min_candidate_occurrences={}, retrieval.top_k={}",
        s.screening.min_length, s.screening.min_candidate_occurrences, s.retrieval.top_k
    );
}

/// Install a custom settings file, if given, and return the active settings.
pub fn load_settings(file: Option<&str>) -> &'static Settings {
    if let Some(file) = file {
        let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
        die!(settings::init_custom(content), "Error in {file}: {}");
        eprintln!("Settings: {file}");
    }
    settings::settings()
}
