//! Event Registry - 키 기반 리스너 등록과 타입별 동기 디스패치
//!
//! 두 개의 인덱스로 구성됩니다.
//!
//! - 키 인덱스: 리스너 키 → 등록된 리스너 (유일성, 조회, 해제)
//! - 타입 인덱스: 이벤트 타입 → 등록 순서대로 정렬된 리스너 키 목록 (디스패치)
//!
//! 내부 잠금이 없으므로 여러 스레드에서 쓰려면 [`SharedEventRegistry`]를 사용하거나
//! 호출자가 직접 직렬화해야 합니다.

use super::listener::EventListener;
use super::types::{Event, EventType};
use crate::config::EventRegistryConfig;
use crate::{Error, Result};
use parking_lot::{Mutex, MutexGuard};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info, trace, warn};

// ============================================================================
// EventManager Trait
// ============================================================================

/// 이벤트 매니저 인터페이스
///
/// 키나 리스너, 이벤트가 "없을 수 있는" 호출 규약을 그대로 표현합니다.
/// 일반적인 사용은 [`EventRegistry`]의 `register` / `unregister` / `publish`가 더 편합니다.
pub trait EventManager {
    /// 이벤트 발행
    ///
    /// `None`이면 진단 로그만 남기고 아무 것도 하지 않습니다.
    fn publish_event(&self, event: Option<&dyn Event>) -> Result<()>;

    /// 리스너 등록
    ///
    /// 키가 비었거나 리스너가 없으면 `Error::InvalidArgument`.
    fn register_listener(
        &mut self,
        listener_key: &str,
        listener: Option<Arc<dyn EventListener>>,
    ) -> Result<()>;

    /// 리스너 해제 (없는 키는 무시)
    fn unregister_listener(&mut self, listener_key: &str);
}

// ============================================================================
// EventRegistry
// ============================================================================

/// 등록된 리스너 정보
struct RegisteredListener {
    listener: Arc<dyn EventListener>,
    /// 등록 시점에 확정된 처리 타입 (타입 인덱스와 항상 일치)
    event_types: Vec<EventType>,
    sequence: u64,
}

/// 이벤트 레지스트리
///
/// ## 사용법
///
/// ```ignore
/// use eventsys_foundation::event::{EventRegistry, EventType, FnListener};
///
/// let mut registry = EventRegistry::new();
///
/// // 리스너 등록
/// let listener = FnListener::new("audit", vec![EventType::of::<UserCreated>()], |event| {
///     tracing::info!(?event, "user created");
///     Ok(())
/// });
/// registry.register("audit.key", Arc::new(listener))?;
///
/// // 이벤트 발행
/// registry.publish(&UserCreated { id: 1 })?;
///
/// // 리스너 해제
/// registry.unregister("audit.key");
/// ```
pub struct EventRegistry {
    /// 설정
    config: EventRegistryConfig,

    /// 키 인덱스
    listeners: HashMap<String, RegisteredListener>,

    /// 타입 인덱스
    listeners_by_type: HashMap<EventType, Vec<String>>,

    /// 등록 순번 카운터
    registration_counter: u64,

    /// 발행된 이벤트 수
    event_count: AtomicU64,
}

impl EventRegistry {
    /// 기본 설정으로 레지스트리 생성
    pub fn new() -> Self {
        Self::with_config(EventRegistryConfig::default())
    }

    /// 커스텀 설정으로 레지스트리 생성
    pub fn with_config(config: EventRegistryConfig) -> Self {
        Self {
            config,
            listeners: HashMap::new(),
            listeners_by_type: HashMap::new(),
            registration_counter: 0,
            event_count: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &EventRegistryConfig {
        &self.config
    }

    // ========================================================================
    // 등록 / 해제
    // ========================================================================

    /// 리스너 등록
    ///
    /// 같은 키로 이미 등록된 리스너는 먼저 완전히 해제됩니다.
    pub fn register(
        &mut self,
        listener_key: &str,
        listener: Arc<dyn EventListener>,
    ) -> Result<()> {
        self.register_listener(listener_key, Some(listener))
    }

    /// 리스너 해제
    ///
    /// 해제된 리스너를 반환합니다. 없는 키면 `None`.
    pub fn unregister(&mut self, listener_key: &str) -> Option<Arc<dyn EventListener>> {
        let removed = self.remove_entry(listener_key)?;

        debug!(
            listener_key,
            listener_name = removed.listener.name(),
            "Unregistered event listener"
        );

        Some(removed.listener)
    }

    /// 이벤트 발행
    ///
    /// 정확히 같은 타입으로 등록된 리스너들을 등록 순서대로 동기 호출합니다.
    /// 리스너가 실패하면 남은 리스너는 호출되지 않고 에러가 그대로 반환됩니다.
    pub fn publish(&self, event: &dyn Event) -> Result<()> {
        self.publish_event(Some(event))
    }

    /// 키 인덱스에서 제거하고, 보유하던 타입 버킷에서만 키를 지움
    fn remove_entry(&mut self, listener_key: &str) -> Option<RegisteredListener> {
        let entry = self.listeners.remove(listener_key)?;

        for event_type in &entry.event_types {
            if let Some(keys) = self.listeners_by_type.get_mut(event_type) {
                keys.retain(|k| k != listener_key);
                if keys.is_empty() {
                    self.listeners_by_type.remove(event_type);
                }
            }
        }

        Some(entry)
    }

    /// listen-all 키로 등록되는 리스너의 처리 타입 계산
    ///
    /// 선언된 타입에 현재 등록된 모든 리스너의 타입을 합집합으로 더하고,
    /// 결과를 리스너에 다시 기록합니다. 등록 시점의 스냅샷이며 이후의
    /// 등록/해제는 반영되지 않습니다.
    fn listen_all_event_types(&self, listener: &dyn EventListener) -> Vec<EventType> {
        let mut event_types = listener.handled_event_types().unwrap_or_default();

        let mut registered: Vec<&RegisteredListener> = self.listeners.values().collect();
        registered.sort_by_key(|r| r.sequence);

        for entry in registered {
            event_types.extend(entry.listener.handled_event_types().unwrap_or_default());
        }

        let event_types = dedup_event_types(event_types);

        info!(
            listener_name = listener.name(),
            event_types = ?event_types,
            "Listen-all listener subscribed to currently known event types"
        );

        listener.set_handled_event_types(event_types.clone());
        event_types
    }

    // ========================================================================
    // 조회
    // ========================================================================

    /// 현재 키 → 리스너 매핑
    pub fn listeners(&self) -> HashMap<&str, &Arc<dyn EventListener>> {
        self.listeners
            .iter()
            .map(|(key, entry)| (key.as_str(), &entry.listener))
            .collect()
    }

    /// 키로 리스너 조회
    pub fn listener(&self, listener_key: &str) -> Option<&Arc<dyn EventListener>> {
        self.listeners.get(listener_key).map(|entry| &entry.listener)
    }

    pub fn contains_key(&self, listener_key: &str) -> bool {
        self.listeners.contains_key(listener_key)
    }

    /// 등록된 리스너 수
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// 키에 대해 등록 시점에 확정된 처리 타입
    pub fn resolved_event_types(&self, listener_key: &str) -> Option<&[EventType]> {
        self.listeners
            .get(listener_key)
            .map(|entry| entry.event_types.as_slice())
    }

    /// 특정 타입을 처리하는 리스너 키 (등록 순서)
    pub fn listener_keys_for(&self, event_type: EventType) -> Vec<&str> {
        self.listeners_by_type
            .get(&event_type)
            .map(|keys| keys.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// 특정 타입을 처리하는 리스너 수
    pub fn listener_count_for(&self, event_type: EventType) -> usize {
        self.listeners_by_type
            .get(&event_type)
            .map_or(0, Vec::len)
    }

    /// 리스너가 하나 이상 있는 이벤트 타입
    pub fn event_types(&self) -> Vec<EventType> {
        self.listeners_by_type.keys().copied().collect()
    }

    /// 총 발행된 이벤트 수 (없는 이벤트 제외)
    pub fn published_count(&self) -> u64 {
        self.event_count.load(Ordering::SeqCst)
    }

    /// 스레드 간 공유 핸들로 변환
    pub fn into_shared(self) -> SharedEventRegistry {
        SharedEventRegistry::new(self)
    }
}

impl EventManager for EventRegistry {
    fn publish_event(&self, event: Option<&dyn Event>) -> Result<()> {
        let Some(event) = event else {
            warn!("Null event fired?");
            return Ok(());
        };

        let event_count = self.event_count.fetch_add(1, Ordering::SeqCst) + 1;
        let event_type = event.event_type();

        if self.config.debug_mode {
            trace!(event_type = %event_type, "Publishing event #{}", event_count);
        }

        let Some(keys) = self.listeners_by_type.get(&event_type) else {
            return Ok(());
        };

        for key in keys {
            let Some(entry) = self.listeners.get(key) else {
                continue;
            };

            if self.config.debug_mode {
                trace!(
                    listener_key = %key,
                    listener_name = entry.listener.name(),
                    event_type = %event_type,
                    "Delivering event to listener"
                );
            }

            if let Err(e) = entry.listener.handle_event(event) {
                warn!(
                    listener_key = %key,
                    listener_name = entry.listener.name(),
                    event_type = %event_type,
                    error = %e,
                    "Event listener failed, remaining listeners skipped"
                );
                return Err(e);
            }
        }

        Ok(())
    }

    fn register_listener(
        &mut self,
        listener_key: &str,
        listener: Option<Arc<dyn EventListener>>,
    ) -> Result<()> {
        if listener_key.is_empty() {
            return Err(Error::invalid_argument(
                "Key for the listener must not be empty",
            ));
        }

        let listener = listener.ok_or_else(|| {
            Error::invalid_argument(format!(
                "The listener must not be absent: {}",
                listener_key
            ))
        })?;

        if let Some(previous) = self.remove_entry(listener_key) {
            debug!(
                listener_key,
                previous_listener = previous.listener.name(),
                "Replacing event listener registered under the same key"
            );
        }

        let event_types = if listener_key == self.config.listen_all_key {
            self.listen_all_event_types(listener.as_ref())
        } else {
            dedup_event_types(listener.handled_event_types().unwrap_or_default())
        };

        for event_type in &event_types {
            self.listeners_by_type
                .entry(*event_type)
                .or_default()
                .push(listener_key.to_string());
        }

        let sequence = self.registration_counter;
        self.registration_counter += 1;

        debug!(
            listener_key,
            listener_name = listener.name(),
            event_types = ?event_types,
            "Registering event listener"
        );

        self.listeners.insert(
            listener_key.to_string(),
            RegisteredListener {
                listener,
                event_types,
                sequence,
            },
        );

        Ok(())
    }

    fn unregister_listener(&mut self, listener_key: &str) {
        self.unregister(listener_key);
    }
}

impl Default for EventRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventRegistry")
            .field("config", &self.config)
            .field("listeners", &self.listeners.keys().collect::<Vec<_>>())
            .field("event_types", &self.listeners_by_type.keys().collect::<Vec<_>>())
            .field("published", &self.published_count())
            .finish()
    }
}

/// 순서를 유지하면서 중복 타입 제거
fn dedup_event_types(event_types: Vec<EventType>) -> Vec<EventType> {
    let mut seen = HashSet::with_capacity(event_types.len());
    event_types
        .into_iter()
        .filter(|event_type| seen.insert(*event_type))
        .collect()
}

// ============================================================================
// SharedEventRegistry
// ============================================================================

/// 여러 스레드에서 공유하는 레지스트리 핸들
///
/// 모든 호출은 하나의 뮤텍스로 직렬화됩니다. 디스패치 중에도 잠금을 잡고 있으므로
/// 리스너 안에서 같은 핸들을 다시 호출하면 교착 상태가 됩니다.
#[derive(Clone, Default)]
pub struct SharedEventRegistry {
    inner: Arc<Mutex<EventRegistry>>,
}

impl SharedEventRegistry {
    pub fn new(registry: EventRegistry) -> Self {
        Self {
            inner: Arc::new(Mutex::new(registry)),
        }
    }

    pub fn register(&self, listener_key: &str, listener: Arc<dyn EventListener>) -> Result<()> {
        self.inner.lock().register(listener_key, listener)
    }

    pub fn unregister(&self, listener_key: &str) -> Option<Arc<dyn EventListener>> {
        self.inner.lock().unregister(listener_key)
    }

    pub fn publish(&self, event: &dyn Event) -> Result<()> {
        self.inner.lock().publish(event)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// 여러 연산을 원자적으로 묶을 때 사용
    pub fn lock(&self) -> MutexGuard<'_, EventRegistry> {
        self.inner.lock()
    }
}

impl fmt::Debug for SharedEventRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedEventRegistry")
            .field(&*self.inner.lock())
            .finish()
    }
}

// ============================================================================
// 테스트
// ============================================================================
