//! Event Listener - 리스너 trait와 클로저 어댑터

use super::types::{Event, EventType};
use crate::Result;
use parking_lot::RwLock;
use std::fmt;

// ============================================================================
// EventListener Trait
// ============================================================================

/// 이벤트 리스너 trait
///
/// 레지스트리는 리스너를 `Arc<dyn EventListener>`로 보관하므로
/// 모든 메서드는 `&self`를 받습니다. 상태가 필요하면 내부 가변성을 사용하세요.
pub trait EventListener: Send + Sync {
    /// 리스너 이름 (디버깅용)
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// 처리하는 이벤트 타입 목록
    ///
    /// `None` 또는 빈 목록은 "지정하지 않음"을 의미합니다.
    fn handled_event_types(&self) -> Option<Vec<EventType>>;

    /// 처리 타입 목록 갱신
    ///
    /// listen-all 키로 등록될 때 레지스트리가 계산한 목록을 기록합니다.
    fn set_handled_event_types(&self, event_types: Vec<EventType>);

    /// 이벤트 처리
    ///
    /// 에러는 레지스트리가 잡지 않고 `publish` 호출자에게 그대로 전파됩니다.
    fn handle_event(&self, event: &dyn Event) -> Result<()>;
}

// ============================================================================
// FnListener
// ============================================================================

type Handler = dyn Fn(&dyn Event) -> Result<()> + Send + Sync;

/// 클로저 기반 리스너
///
/// ```ignore
/// let listener = FnListener::new("audit", vec![EventType::of::<UserCreated>()], |event| {
///     println!("{:?}", event);
///     Ok(())
/// });
/// registry.register("audit.key", Arc::new(listener))?;
/// ```
pub struct FnListener {
    name: String,
    event_types: RwLock<Option<Vec<EventType>>>,
    handler: Box<Handler>,
}

impl FnListener {
    pub fn new<F>(name: impl Into<String>, event_types: Vec<EventType>, handler: F) -> Self
    where
        F: Fn(&dyn Event) -> Result<()> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            event_types: RwLock::new(Some(event_types)),
            handler: Box::new(handler),
        }
    }

    /// 처리 타입을 지정하지 않은 리스너 (listen-all 키와 함께 사용)
    pub fn unspecified<F>(name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&dyn Event) -> Result<()> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            event_types: RwLock::new(None),
            handler: Box::new(handler),
        }
    }
}

impl EventListener for FnListener {
    fn name(&self) -> &str {
        &self.name
    }

    fn handled_event_types(&self) -> Option<Vec<EventType>> {
        self.event_types.read().clone()
    }

    fn set_handled_event_types(&self, event_types: Vec<EventType>) {
        *self.event_types.write() = Some(event_types);
    }

    fn handle_event(&self, event: &dyn Event) -> Result<()> {
        (self.handler)(event)
    }
}

impl fmt::Debug for FnListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnListener")
            .field("name", &self.name)
            .field("event_types", &*self.event_types.read())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Debug)]
    struct Ping;

    impl Event for Ping {}

    #[test]
    fn test_fn_listener_invokes_closure() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let listener = FnListener::new("ping", vec![EventType::of::<Ping>()], move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        assert_eq!(listener.name(), "ping");
        assert_eq!(
            listener.handled_event_types(),
            Some(vec![EventType::of::<Ping>()])
        );

        listener.handle_event(&Ping).unwrap();
        listener.handle_event(&Ping).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_fn_listener_propagates_error() {
        let listener = FnListener::unspecified("broken", |_| Err(Error::listener("broken", "boom")));

        let err = listener.handle_event(&Ping).unwrap_err();
        assert!(err.is_listener_failure());
    }

    #[test]
    fn test_fn_listener_set_types() {
        let listener = FnListener::unspecified("all", |_| Ok(()));
        assert_eq!(listener.handled_event_types(), None);

        listener.set_handled_event_types(vec![EventType::of::<Ping>()]);
        assert_eq!(
            listener.handled_event_types(),
            Some(vec![EventType::of::<Ping>()])
        );
    }
}
