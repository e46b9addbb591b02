const SETTINGS_PATH: &str = "src/default_settings.toml";

/// Keys every section of the embedded settings must define.
const REQUIRED: &[(&str, &[&str])] = &[
    (
        "screening",
        &[
            "min_length",
            "min_candidate_occurrences",
            "min_dict_occurrences",
            "proper_noun_cutoff",
            "proper_noun_min_total",
            "compound_min_length",
            "typo_frequency_ratio",
        ],
    ),
    ("retrieval", &["top_k", "anchor_len"]),
];

fn main() {
    println!("cargo:rerun-if-changed={SETTINGS_PATH}");
    check_settings(include_str!("src/default_settings.toml"));
}

fn check_settings(content: &str) {
    let value: toml::Value = content
        .parse()
        .unwrap_or_else(|e| panic!("{SETTINGS_PATH} contains invalid TOML: {e}"));
    for (section, keys) in REQUIRED {
        let table = value
            .get(section)
            .and_then(toml::Value::as_table)
            .unwrap_or_else(|| panic!("{SETTINGS_PATH} is missing [{section}]"));
        for key in *keys {
            if !table.contains_key(*key) {
                panic!("{SETTINGS_PATH} is missing {section}.{key}");
            }
        }
    }
}
