//! Config - 이벤트 레지스트리 설정
//!
//! JSON 파일(`events.json`)로 저장/로드합니다.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 설정 파일명
pub const EVENTS_CONFIG_FILE: &str = "events.json";

/// 기본 listen-all 키
///
/// 이 키로 등록된 리스너는 등록 시점에 다른 리스너들이 처리하는
/// 모든 이벤트 타입을 함께 구독합니다.
pub const LISTEN_ALL_KEY: &str = "listenerEmpty.key";

fn default_listen_all_key() -> String {
    LISTEN_ALL_KEY.to_string()
}

// ============================================================================
// EventRegistryConfig
// ============================================================================

/// 이벤트 레지스트리 설정
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRegistryConfig {
    /// listen-all 집계를 트리거하는 예약 키
    #[serde(default = "default_listen_all_key")]
    pub listen_all_key: String,

    /// 디버그 모드 (모든 전달을 trace 로깅)
    #[serde(default)]
    pub debug_mode: bool,
}

impl Default for EventRegistryConfig {
    fn default() -> Self {
        Self {
            listen_all_key: default_listen_all_key(),
            debug_mode: false,
        }
    }
}

impl EventRegistryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// listen-all 키 변경
    pub fn with_listen_all_key(mut self, key: impl Into<String>) -> Self {
        self.listen_all_key = key.into();
        self
    }

    /// 디버그 모드 설정
    pub fn with_debug_mode(mut self, debug_mode: bool) -> Self {
        self.debug_mode = debug_mode;
        self
    }

    /// 설정 값 검증
    pub fn validate(&self) -> Result<()> {
        if self.listen_all_key.is_empty() {
            return Err(Error::Config(
                "listenAllKey must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    // ========================================================================
    // Load / Save
    // ========================================================================

    /// JSON 문자열에서 파싱
    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content)
            .map_err(|e| Error::Config(format!("Failed to parse event config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// 파일에서 로드
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_json_str(&content)
    }

    /// 파일이 없으면 `None`
    pub fn load_optional(path: impl AsRef<Path>) -> Result<Option<Self>> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(None);
        }
        Self::load(path).map(Some)
    }

    /// 디렉토리의 `events.json` 로드 (없으면 기본값)
    pub fn load_from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::load_optional(dir.as_ref().join(EVENTS_CONFIG_FILE))?.unwrap_or_default())
    }

    /// 파일로 저장 (상위 디렉토리 자동 생성)
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        self.validate()?;
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EventRegistryConfig::default();
        assert_eq!(config.listen_all_key, LISTEN_ALL_KEY);
        assert!(!config.debug_mode);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_json() {
        let config = EventRegistryConfig::from_json_str(r#"{ "debugMode": true }"#).unwrap();
        assert!(config.debug_mode);
        assert_eq!(config.listen_all_key, LISTEN_ALL_KEY);

        let config = EventRegistryConfig::from_json_str(r#"{ "listenAllKey": "*" }"#).unwrap();
        assert_eq!(config.listen_all_key, "*");
    }

    #[test]
    fn test_empty_listen_all_key_rejected() {
        let err = EventRegistryConfig::from_json_str(r#"{ "listenAllKey": "" }"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let config = EventRegistryConfig::new().with_listen_all_key("");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_json() {
        let err = EventRegistryConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(EVENTS_CONFIG_FILE);

        let config = EventRegistryConfig::new()
            .with_listen_all_key("all.events")
            .with_debug_mode(true);
        config.save(&path).unwrap();

        let loaded = EventRegistryConfig::load(&path).unwrap();
        assert_eq!(loaded, config);

        let from_dir = EventRegistryConfig::load_from_dir(dir.path().join("nested")).unwrap();
        assert_eq!(from_dir, config);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();

        assert!(EventRegistryConfig::load_optional(dir.path().join("missing.json"))
            .unwrap()
            .is_none());
        assert!(EventRegistryConfig::load(dir.path().join("missing.json")).is_err());
        assert_eq!(
            EventRegistryConfig::load_from_dir(dir.path()).unwrap(),
            EventRegistryConfig::default()
        );
    }
}
