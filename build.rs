use std::fs;

const CONFIG_PATH: &str = "src/default_config.toml";

/// Every field of the site config, by section. All of them are strings.
const FIELDS: [(&str, &[&str]); 2] = [
    ("paths", &["content", "static_dir", "template", "output"]),
    ("site", &["base_path"]),
];

fn main() {
    println!("cargo:rerun-if-changed={CONFIG_PATH}");

    let content = fs::read_to_string(CONFIG_PATH).expect("Failed to read default_config.toml");
    let table = content
        .parse::<toml::Table>()
        .unwrap_or_else(|e| panic!("Invalid default_config.toml: {e}"));

    for (section, keys) in FIELDS {
        let Some(section_table) = table.get(section).and_then(toml::Value::as_table) else {
            panic!("default_config.toml is missing the [{section}] table");
        };
        for key in keys {
            match section_table.get(*key) {
                Some(value) if value.is_str() => {}
                Some(value) => panic!(
                    "default_config.toml: {section}.{key} must be a string, found {}",
                    value.type_str()
                ),
                None => panic!("default_config.toml: {section}.{key} is missing"),
            }
        }
        for key in section_table.keys() {
            if !keys.contains(&key.as_str()) {
                panic!("default_config.toml: unknown key {section}.{key}");
            }
        }
    }
}
