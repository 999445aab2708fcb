//! Error types for the event system
//!
//! 등록 인자 검증, 리스너 처리 실패, 설정 로드 에러를 한 곳에서 관리

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// 이벤트 시스템 에러 타입
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // 등록 관련
    // ========================================================================
    /// 빈 키 또는 없는 리스너로 등록을 시도한 경우
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ========================================================================
    // 디스패치 관련
    // ========================================================================
    /// 리스너의 `handle_event` 실패 (레지스트리는 변환하지 않고 그대로 전파)
    #[error("Listener failed: {listener} - {message}")]
    Listener { listener: String, message: String },

    // ========================================================================
    // 설정 관련
    // ========================================================================
    #[error("Configuration error: {0}")]
    Config(String),

    // ========================================================================
    // 외부 에러 변환
    // ========================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// 인자 검증 에러 생성 헬퍼
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument(message.into())
    }

    /// 리스너 실패 에러 생성 헬퍼
    pub fn listener(listener: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Listener {
            listener: listener.into(),
            message: message.into(),
        }
    }

    /// 호출자의 잘못된 사용으로 발생한 에러인지 확인
    pub fn is_user_facing(&self) -> bool {
        matches!(self, Error::InvalidArgument(_) | Error::Config(_))
    }

    /// 리스너 쪽에서 발생한 에러인지 확인
    pub fn is_listener_failure(&self) -> bool {
        matches!(self, Error::Listener { .. })
    }
}
