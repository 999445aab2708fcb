//! # eventsys-foundation
//!
//! 프로세스 내 동기 이벤트 매니저:
//! - Event: 이벤트 타입 식별자 (`EventType`)와 `Event` trait
//! - Listener: 처리 타입을 선언하는 `EventListener` trait, 클로저 어댑터
//! - Registry: 키 기반 등록/교체/해제, 타입별 디스패치, listen-all 집계
//! - Config: `events.json` 설정 (listen-all 키, 디버그 모드)

pub mod config;
pub mod error;
pub mod event;

// ============================================================================
// Error
// ============================================================================
pub use error::{Error, Result};

// ============================================================================
// Config (설정)
// ============================================================================
pub use config::{EventRegistryConfig, EVENTS_CONFIG_FILE, LISTEN_ALL_KEY};

// ============================================================================
// Event (이벤트 시스템)
// ============================================================================
pub use event::{
    // Types
    Event,
    EventType,
    // Listener
    EventListener,
    FnListener,
    // Registry
    EventManager,
    EventRegistry,
    SharedEventRegistry,
};
