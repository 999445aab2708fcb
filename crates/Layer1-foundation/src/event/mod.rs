//! Event System - 프로세스 내 이벤트 발행/구독
//!
//! 리스너는 키와 함께 등록되고, 발행된 이벤트는 정확히 같은 타입을 처리한다고
//! 선언한 리스너에게만 등록 순서대로 동기 전달됩니다.
//!
//! ## 아키텍처
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      EventRegistry                           │
//! │                                                              │
//! │  register(key, listener)        publish(event)               │
//! │         │                              │                     │
//! │         ▼                              ▼                     │
//! │  ┌──────────────┐   keys   ┌────────────────────────┐        │
//! │  │  Key Index   │◀─────────│  Type Index            │        │
//! │  │ key→listener │          │  EventType → [key, ..] │        │
//! │  └──────────────┘          └────────────────────────┘        │
//! │                                        │                     │
//! │                                        ▼                     │
//! │            listener.handle_event(event)  (등록 순서)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 사용법
//!
//! ```ignore
//! use eventsys_foundation::event::{Event, EventListener, EventRegistry, EventType};
//!
//! // 1. 이벤트 정의
//! #[derive(Debug)]
//! struct UserCreated { id: u64 }
//! impl Event for UserCreated {}
//!
//! // 2. 리스너 구현
//! struct Audit;
//!
//! impl EventListener for Audit {
//!     fn handled_event_types(&self) -> Option<Vec<EventType>> {
//!         Some(vec![EventType::of::<UserCreated>()])
//!     }
//!     fn set_handled_event_types(&self, _event_types: Vec<EventType>) {}
//!     fn handle_event(&self, event: &dyn Event) -> Result<()> {
//!         println!("Received: {:?}", event);
//!         Ok(())
//!     }
//! }
//!
//! // 3. 등록 후 발행
//! let mut registry = EventRegistry::new();
//! registry.register("audit.key", Arc::new(Audit))?;
//! registry.publish(&UserCreated { id: 7 })?;
//! ```

pub mod listener;
pub mod registry;
pub mod types;

// Re-exports
pub use listener::{EventListener, FnListener};
pub use registry::{EventManager, EventRegistry, SharedEventRegistry};
pub use types::{AsAny, Event, EventType};
