use std::env;
use std::fs;
use std::path::Path;

/// Keys forwarded from `.env` into `option_env!` at compile time.
const FORWARDED_KEYS: &[&str] = &[
    "BACKEND_URL",
    "ENVIRONMENT",
    "ENABLE_LOGGING",
    "NOTIFICATION_TTL_MS",
    "SEARCH_DEBOUNCE_MS",
    "MAX_UPLOAD_MB",
];

fn main() {
    let env_file = Path::new(".env");

    if env_file.exists() {
        println!("cargo:rerun-if-changed=.env");

        if let Ok(contents) = fs::read_to_string(env_file) {
            for line in contents.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }

                let Some((key, value)) = line.split_once('=') else {
                    continue;
                };
                let key = key.trim();
                let value = value.trim().trim_matches('"');

                if !FORWARDED_KEYS.contains(&key) {
                    println!("cargo:warning=Ignoring unknown .env key {}", key);
                    continue;
                }

                // The process environment wins over the file
                if env::var(key).is_err() {
                    println!("cargo:rustc-env={}={}", key, value);
                }
            }
        }
    } else {
        println!("cargo:warning=No .env file found. Using default values. Copy .env.example to .env to point at another backend.");
    }

    for key in FORWARDED_KEYS {
        println!("cargo:rerun-if-env-changed={}", key);
    }
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=.env.example");
}
