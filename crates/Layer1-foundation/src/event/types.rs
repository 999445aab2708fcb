//! Event Types - 라우팅에 쓰이는 이벤트 타입 식별자와 Event trait
//!
//! 레지스트리는 이벤트의 내용에는 관심이 없고, 정확한 런타임 타입만 봅니다.
//! 상위/하위 타입 관계는 고려하지 않습니다.

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

// ============================================================================
// EventType
// ============================================================================

/// 이벤트 타입 식별자
///
/// `TypeId` 기반이라 같은 Rust 타입이면 항상 같은 값이 됩니다.
/// 이름은 로그 출력용이며 비교에는 쓰이지 않습니다.
#[derive(Clone, Copy)]
pub struct EventType {
    id: TypeId,
    name: &'static str,
}

impl EventType {
    /// 구체 타입 `T`의 식별자
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// 전체 타입 경로 (예: `my_app::events::UserCreated`)
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// 모듈 경로를 뺀 짧은 이름
    pub fn short_name(&self) -> &'static str {
        self.name.rsplit("::").next().unwrap_or(self.name)
    }

    /// `T` 타입인지 확인
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for EventType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for EventType {}

impl Hash for EventType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EventType({})", self.short_name())
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

// ============================================================================
// Event Trait
// ============================================================================

/// `&dyn Event`에서 구체 타입으로 내려가기 위한 헬퍼
pub trait AsAny {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// 발행 가능한 이벤트
///
/// 보통은 빈 `impl Event for MyEvent {}`로 충분합니다.
/// 기본 `event_type()`은 구현 타입 자체의 식별자를 반환합니다.
///
/// ```ignore
/// #[derive(Debug)]
/// struct UserCreated { id: u64 }
///
/// impl Event for UserCreated {}
///
/// assert_eq!(UserCreated { id: 1 }.event_type(), EventType::of::<UserCreated>());
/// ```
pub trait Event: AsAny + Send + Sync + fmt::Debug + 'static {
    /// 라우팅에 사용할 타입 식별자
    fn event_type(&self) -> EventType {
        EventType::of::<Self>()
    }
}

impl dyn Event {
    /// 구체 이벤트 타입으로 다운캐스트
    pub fn downcast_ref<T: Event>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// `T` 타입 이벤트인지 확인
    pub fn is<T: Event>(&self) -> bool {
        self.event_type().is::<T>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[derive(Debug)]
    struct Started;

    #[derive(Debug)]
    struct Stopped {
        code: i32,
    }

    impl Event for Started {}
    impl Event for Stopped {}

    #[test]
    fn test_event_type_identity() {
        assert_eq!(EventType::of::<Started>(), EventType::of::<Started>());
        assert_ne!(EventType::of::<Started>(), EventType::of::<Stopped>());

        let set: HashSet<EventType> = [
            EventType::of::<Started>(),
            EventType::of::<Stopped>(),
            EventType::of::<Started>(),
        ]
        .into_iter()
        .collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_event_type_names() {
        let ty = EventType::of::<Stopped>();
        assert_eq!(ty.short_name(), "Stopped");
        assert!(ty.name().ends_with("::Stopped"));
        assert_eq!(ty.to_string(), "Stopped");
    }

    #[test]
    fn test_dyn_event_dispatches_to_concrete_type() {
        let event: Box<dyn Event> = Box::new(Stopped { code: 3 });

        assert_eq!(event.event_type(), EventType::of::<Stopped>());
        assert!(event.is::<Stopped>());
        assert!(!event.is::<Started>());
        assert_eq!(event.downcast_ref::<Stopped>().map(|e| e.code), Some(3));
        assert!(event.downcast_ref::<Started>().is_none());
    }
}
