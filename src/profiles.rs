//! Device profiles: load/save a simple JSON mapping of profile name ->
//! { url, interval_ms }. Stored under the XDG config dir:
//! $XDG_CONFIG_HOME/oakmon/profiles.json (fallback ~/.config/oakmon/profiles.json)

use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fs, path::PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ProfileEntry {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval_ms: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProfilesFile {
    #[serde(default)]
    pub profiles: BTreeMap<String, ProfileEntry>,
    #[serde(default)]
    pub version: u32,
}

pub fn config_dir() -> PathBuf {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
        PathBuf::from(xdg).join("oakmon")
    } else {
        dirs_next::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("oakmon")
    }
}

pub fn profiles_path() -> PathBuf {
    config_dir().join("profiles.json")
}

pub fn load_profiles() -> ProfilesFile {
    match fs::read_to_string(profiles_path()) {
        Ok(s) => serde_json::from_str(&s).unwrap_or_default(),
        Err(_) => ProfilesFile::default(),
    }
}

pub fn save_profiles(p: &ProfilesFile) -> std::io::Result<()> {
    let path = profiles_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let data = serde_json::to_vec_pretty(p).expect("serialize profiles");
    fs::write(path, data)
}

pub enum ResolveProfile {
    /// Use the provided runtime inputs (not yet persisted).
    Direct(ProfileEntry),
    /// Loaded from an existing profile entry.
    Loaded(ProfileEntry),
    /// Should prompt the user to select among profile names.
    PromptSelect(Vec<String>),
    /// Should prompt the user to create a new profile (name).
    PromptCreate(String),
    /// No profile could be resolved (missing arguments).
    None,
}

pub struct ProfileRequest {
    pub profile_name: Option<String>,
    pub url: Option<String>,
    pub interval_ms: Option<u64>,
}

impl ProfileRequest {
    pub fn resolve(self, pf: &ProfilesFile) -> ResolveProfile {
        // Only a profile name given -> try load
        if self.url.is_none() && self.profile_name.is_some() {
            let name = self.profile_name.unwrap();
            return match pf.profiles.get(&name) {
                Some(entry) => ResolveProfile::Loaded(entry.clone()),
                None => ResolveProfile::PromptCreate(name),
            };
        }
        // A URL provided -> direct (maybe saved later by the caller)
        if let Some(url) = self.url {
            return ResolveProfile::Direct(ProfileEntry {
                url,
                interval_ms: self.interval_ms,
            });
        }
        // Nothing provided -> prompt select if any profiles exist
        if pf.profiles.is_empty() {
            ResolveProfile::None
        } else {
            ResolveProfile::PromptSelect(pf.profiles.keys().cloned().collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_with(name: &str, url: &str) -> ProfilesFile {
        let mut pf = ProfilesFile::default();
        pf.profiles.insert(
            name.into(),
            ProfileEntry {
                url: url.into(),
                interval_ms: None,
            },
        );
        pf
    }

    #[test]
    fn name_only_loads_existing_entry() {
        let pf = file_with("bench", "http://10.0.0.5");
        let req = ProfileRequest {
            profile_name: Some("bench".into()),
            url: None,
            interval_ms: None,
        };
        match req.resolve(&pf) {
            ResolveProfile::Loaded(entry) => assert_eq!(entry.url, "http://10.0.0.5"),
            _ => panic!("expected Loaded"),
        }
    }

    #[test]
    fn unknown_name_prompts_create() {
        let req = ProfileRequest {
            profile_name: Some("lab".into()),
            url: None,
            interval_ms: None,
        };
        assert!(matches!(
            req.resolve(&ProfilesFile::default()),
            ResolveProfile::PromptCreate(name) if name == "lab"
        ));
    }

    #[test]
    fn url_wins_as_direct() {
        let pf = file_with("bench", "http://10.0.0.5");
        let req = ProfileRequest {
            profile_name: None,
            url: Some("http://192.168.4.1".into()),
            interval_ms: Some(1500),
        };
        match req.resolve(&pf) {
            ResolveProfile::Direct(entry) => {
                assert_eq!(entry.url, "http://192.168.4.1");
                assert_eq!(entry.interval_ms, Some(1500));
            }
            _ => panic!("expected Direct"),
        }
    }

    #[test]
    fn bare_run_selects_or_gives_up() {
        let req = ProfileRequest {
            profile_name: None,
            url: None,
            interval_ms: None,
        };
        assert!(matches!(
            req.resolve(&ProfilesFile::default()),
            ResolveProfile::None
        ));

        let pf = file_with("bench", "http://10.0.0.5");
        let req = ProfileRequest {
            profile_name: None,
            url: None,
            interval_ms: None,
        };
        match req.resolve(&pf) {
            ResolveProfile::PromptSelect(names) => assert_eq!(names, vec!["bench".to_string()]),
            _ => panic!("expected PromptSelect"),
        }
    }
}
