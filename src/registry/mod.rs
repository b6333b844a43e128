mod memory_registry;
mod session_registry;
mod turn_timer;

pub use memory_registry::{MemoryRegistry, MAX_CODE_ATTEMPTS};
pub use session_registry::SessionRegistry;
pub use turn_timer::spawn_turn_timer;
