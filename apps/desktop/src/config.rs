use std::{collections::HashMap, fs};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8000".into(),
        }
    }
}

/// Defaults, overridden by `client.toml`, overridden by env vars. A
/// `--server-url` flag on the command line wins over all of these.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("client.toml") {
        apply_file_settings(&mut settings, &raw);
    }

    if let Ok(v) = std::env::var("SERVER_URL") {
        settings.server_url = v;
    }
    if let Ok(v) = std::env::var("APP__SERVER_URL") {
        settings.server_url = v;
    }

    settings
}

fn apply_file_settings(settings: &mut Settings, raw: &str) {
    if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(raw) {
        if let Some(v) = file_cfg.get("server_url") {
            settings.server_url = v.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_local_backend() {
        assert_eq!(Settings::default().server_url, "http://127.0.0.1:8000");
    }

    #[test]
    fn file_settings_override_default() {
        let mut settings = Settings::default();
        apply_file_settings(&mut settings, "server_url = \"http://backend:9000\"\n");
        assert_eq!(settings.server_url, "http://backend:9000");
    }

    #[test]
    fn malformed_file_is_ignored() {
        let mut settings = Settings::default();
        apply_file_settings(&mut settings, "not toml at all [");
        assert_eq!(settings, Settings::default());
    }
}
