//! 翻译系统核心模块
//!
//! - **服务层** (`service.rs`): 纯文本与 HTML 段落两个翻译入口
//! - **协调层** (`coordinator.rs`): 每个视图的请求令牌、状态机与缓存读写
//!
//! ```text
//! MessageTranslator / DraftTranslator (coordinator.rs)
//!     ├── TranslationCache (storage/cache.rs)
//!     └── TranslationService (service.rs)
//!             ├── ConfigManager (config/manager.rs)
//!             ├── segment / apply_translations (pipeline/)
//!             └── Provider (provider/)
//! ```

pub mod coordinator;
pub mod service;

pub use coordinator::{
    DraftSink, DraftState, DraftTranslator, MessageTranslator, Phase, RequestGate,
    RequestOutcome, RequestTicket, SubjectDocument, ViewState,
};
pub use service::{TranslationResponse, TranslationService};
