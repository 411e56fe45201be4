use std::path::PathBuf;

pub const DEFAULT_ADDR: &str = "0.0.0.0:5001";
pub const DEFAULT_MODEL: &str = "model/skin_type_model.json";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Process settings, read once at start-up.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub addr: String,
    pub model_path: PathBuf,
    /// Pipeline config JSON; built-in defaults when unset.
    pub config_path: Option<PathBuf>,
    pub max_upload_bytes: usize,
}

impl Settings {
    pub fn from_env() -> Result<Settings, String> {
        Settings::from_lookup(|key| std::env::var(key).ok())
    }

    /// `lookup` maps a variable name to its value, if set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Settings, String> {
        let max_upload_bytes = match lookup("SKIN_GATE_MAX_UPLOAD_BYTES") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|&n| n > 0)
                .ok_or_else(|| format!("SKIN_GATE_MAX_UPLOAD_BYTES: `{raw}` is not a positive byte count"))?,
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };

        Ok(Settings {
            addr: lookup("SKIN_GATE_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string()),
            model_path: lookup("SKIN_GATE_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()).into(),
            config_path: lookup("SKIN_GATE_CONFIG").filter(|p| !p.is_empty()).map(PathBuf::from),
            max_upload_bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let s = Settings::from_lookup(lookup(&[])).unwrap();
        assert_eq!(s.addr, "0.0.0.0:5001");
        assert_eq!(s.model_path, PathBuf::from("model/skin_type_model.json"));
        assert_eq!(s.config_path, None);
        assert_eq!(s.max_upload_bytes, 16 * 1024 * 1024);
    }

    #[test]
    fn overrides() {
        let s = Settings::from_lookup(lookup(&[
            ("SKIN_GATE_ADDR", "127.0.0.1:9000"),
            ("SKIN_GATE_MODEL", "/srv/m.json"),
            ("SKIN_GATE_CONFIG", "/srv/c.json"),
            ("SKIN_GATE_MAX_UPLOAD_BYTES", "1024"),
        ]))
        .unwrap();
        assert_eq!(s.addr, "127.0.0.1:9000");
        assert_eq!(s.config_path, Some(PathBuf::from("/srv/c.json")));
        assert_eq!(s.max_upload_bytes, 1024);
    }

    #[test]
    fn bad_upload_limit_is_an_error() {
        assert!(Settings::from_lookup(lookup(&[("SKIN_GATE_MAX_UPLOAD_BYTES", "lots")])).is_err());
        assert!(Settings::from_lookup(lookup(&[("SKIN_GATE_MAX_UPLOAD_BYTES", "0")])).is_err());
    }
}
