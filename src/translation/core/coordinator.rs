//! 请求协调
//!
//! 每个翻译视图持有一个递增的请求令牌。发起翻译、切换文档或卸载视图都会使令牌前进，
//! 回复到达时只有令牌仍然一致且视图仍挂载，结果才会生效；否则静默丢弃。
//!
//! - `MessageTranslator`: 阅读视图，按段落翻译 HTML 并缓存结果
//! - `DraftTranslator`: 撰写视图，整段翻译纯文本，可替换草稿正文

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::translation::config::SettingsDraft;
use crate::translation::core::service::TranslationService;
use crate::translation::pipeline::extract_plain_text;
use crate::translation::storage::{content_hash, CacheEntry, TranslationCache};

const SETTINGS_NOT_SAVED: &str = "Settings could not be saved in this environment.";
const TRANSLATION_FAILED: &str = "Translation failed";

/// 请求令牌
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

/// 令牌与挂载状态
#[derive(Debug, Default)]
pub struct RequestGate {
    token: AtomicU64,
    mounted: AtomicBool,
}

impl RequestGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mount(&self) {
        self.mounted.store(true, Ordering::SeqCst);
    }

    /// 卸载视图并作废进行中的请求
    pub fn unmount(&self) {
        self.mounted.store(false, Ordering::SeqCst);
        self.invalidate();
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::SeqCst)
    }

    /// 发起新请求，之前的令牌全部失效
    pub fn issue(&self) -> RequestTicket {
        RequestTicket(self.token.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn invalidate(&self) {
        self.token.fetch_add(1, Ordering::SeqCst);
    }

    /// 回复是否仍可应用
    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.is_mounted() && self.token.load(Ordering::SeqCst) == ticket.0
    }
}

/// 视图阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Translating,
    Succeeded,
    Failed,
}

/// 请求结果是否被应用
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    Applied,
    Discarded,
}

/// 待翻译的邮件
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubjectDocument {
    /// 缓存键，没有 id 的文档不缓存
    pub id: Option<String>,
    pub body: String,
}

impl SubjectDocument {
    pub fn new(id: &str, body: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            body: body.to_string(),
        }
    }

    fn cache_key(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }
}

/// 阅读视图状态
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub phase: Phase,
    pub loading: bool,
    /// 当前展示的译文 HTML
    pub translation: Option<String>,
    pub error: Option<String>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // 状态只包含普通数据，中毒后继续使用
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// 阅读视图的翻译协调器
pub struct MessageTranslator {
    service: Arc<TranslationService>,
    cache: Arc<TranslationCache>,
    gate: RequestGate,
    document: Mutex<SubjectDocument>,
    state: Mutex<ViewState>,
}

impl MessageTranslator {
    pub fn new(service: Arc<TranslationService>, cache: Arc<TranslationCache>) -> Self {
        Self {
            service,
            cache,
            gate: RequestGate::new(),
            document: Mutex::new(SubjectDocument::default()),
            state: Mutex::new(ViewState::default()),
        }
    }

    /// 挂载视图并尝试从缓存恢复译文
    pub fn mount(&self, document: SubjectDocument) {
        self.gate.mount();
        *lock(&self.document) = document;
        self.load_cached_translation();
    }

    /// 切换到另一封邮件
    ///
    /// id 变化时作废进行中的请求并重新读取缓存
    pub fn set_document(&self, document: SubjectDocument) {
        let changed = {
            let mut current = lock(&self.document);
            let changed = current.id != document.id;
            *current = document;
            changed
        };

        if changed {
            self.gate.invalidate();
            {
                let mut state = lock(&self.state);
                state.loading = false;
                if state.phase == Phase::Translating {
                    state.phase = Phase::Idle;
                }
            }
            self.load_cached_translation();
        }
    }

    /// 翻译当前邮件
    pub async fn translate(&self) -> RequestOutcome {
        let document = lock(&self.document).clone();
        // 缓存校验值取自发出请求时的设置与正文
        let fingerprint = self.service.get_config().fingerprint();
        let body_hash = content_hash(&document.body);
        let ticket = self.gate.issue();
        {
            let mut state = lock(&self.state);
            state.phase = Phase::Translating;
            state.loading = true;
            state.error = None;
        }

        let response = self.service.translate_html_by_paragraph(&document.body).await;

        if !self.gate.is_current(ticket) {
            tracing::debug!("丢弃过期的翻译结果: {:?}", document.id);
            return RequestOutcome::Discarded;
        }

        let mut state = lock(&self.state);
        state.loading = false;
        match response.translated_html.filter(|_| response.success) {
            Some(translated_html) => {
                if let Some(key) = document.cache_key() {
                    self.cache.put(
                        key,
                        CacheEntry::new(translated_html.clone(), fingerprint, body_hash),
                    );
                }
                state.phase = Phase::Succeeded;
                state.translation = Some(translated_html);
            }
            None => {
                state.phase = Phase::Failed;
                state.error = Some(response.error.unwrap_or_else(|| TRANSLATION_FAILED.to_string()));
            }
        }

        RequestOutcome::Applied
    }

    /// 关闭译文
    pub fn close(&self) {
        let mut state = lock(&self.state);
        state.translation = None;
        state.error = None;
        if state.phase != Phase::Translating {
            state.phase = Phase::Idle;
        }
    }

    /// 保存设置；影响译文的设置发生变化时清除当前译文并作废进行中的请求
    pub fn save_settings(&self, draft: &SettingsDraft) -> bool {
        let before = self.service.get_config().fingerprint();
        let config_manager = self.service.config_manager();

        if !config_manager.save_config(draft) {
            lock(&self.state).error = Some(SETTINGS_NOT_SAVED.to_string());
            return false;
        }

        let changed = config_manager.get_config().fingerprint() != before;
        if changed {
            self.gate.invalidate();
        }

        let mut state = lock(&self.state);
        state.error = None;
        if changed {
            tracing::debug!("翻译设置已变化，清除当前译文");
            state.translation = None;
            state.loading = false;
            state.phase = Phase::Idle;
        }
        true
    }

    /// 卸载视图，进行中的请求结果将被丢弃
    pub fn unmount(&self) {
        self.gate.unmount();
    }

    pub fn state(&self) -> ViewState {
        lock(&self.state).clone()
    }

    pub fn document(&self) -> SubjectDocument {
        lock(&self.document).clone()
    }

    fn load_cached_translation(&self) {
        let document = lock(&self.document).clone();
        let cached = document.cache_key().and_then(|key| self.cache.get(key));

        let usable = cached.filter(|entry| {
            entry.matches(
                &self.service.get_config().fingerprint(),
                &content_hash(&document.body),
            )
        });

        let mut state = lock(&self.state);
        match usable {
            Some(entry) => {
                tracing::debug!("命中翻译缓存: {:?}", document.id);
                state.translation = Some(entry.translated_html);
                state.error = None;
                state.phase = Phase::Succeeded;
            }
            None => {
                if state.translation.take().is_some() && state.phase != Phase::Translating {
                    state.phase = Phase::Idle;
                }
            }
        }
    }
}

/// 草稿正文写入接口
pub trait DraftSink {
    /// 用译文替换草稿正文
    fn replace_body(&self, body: &str);
}

/// 撰写视图状态
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftState {
    pub phase: Phase,
    pub loading: bool,
    /// 纯文本译文
    pub translation: Option<String>,
    pub error: Option<String>,
    /// 是否展示替换/关闭选项
    pub show_options: bool,
}

/// 撰写视图的翻译协调器，不使用缓存
pub struct DraftTranslator {
    service: Arc<TranslationService>,
    gate: RequestGate,
    state: Mutex<DraftState>,
}

impl DraftTranslator {
    pub fn new(service: Arc<TranslationService>) -> Self {
        Self {
            service,
            gate: RequestGate::new(),
            state: Mutex::new(DraftState::default()),
        }
    }

    pub fn mount(&self) {
        self.gate.mount();
    }

    pub fn unmount(&self) {
        self.gate.unmount();
    }

    /// 提取草稿纯文本并整段翻译
    pub async fn translate(&self, draft_body: &str) -> RequestOutcome {
        let plain_text = extract_plain_text(draft_body);
        let ticket = self.gate.issue();
        {
            let mut state = lock(&self.state);
            state.phase = Phase::Translating;
            state.loading = true;
            state.error = None;
        }

        let response = self.service.translate(&plain_text).await;

        if !self.gate.is_current(ticket) {
            tracing::debug!("丢弃过期的草稿翻译结果");
            return RequestOutcome::Discarded;
        }

        let mut state = lock(&self.state);
        state.loading = false;
        match response
            .translated_text
            .filter(|text| response.success && !text.is_empty())
        {
            Some(text) => {
                state.phase = Phase::Succeeded;
                state.translation = Some(text);
                state.show_options = true;
            }
            None => {
                state.phase = Phase::Failed;
                state.error = Some(response.error.unwrap_or_else(|| TRANSLATION_FAILED.to_string()));
            }
        }

        RequestOutcome::Applied
    }

    /// 用译文替换草稿正文；没有译文时返回 `false`
    pub fn replace<S: DraftSink + ?Sized>(&self, sink: &S) -> bool {
        let mut state = lock(&self.state);
        let Some(translation) = state.translation.take() else {
            return false;
        };

        sink.replace_body(&translation);
        state.show_options = false;
        state.phase = Phase::Idle;
        true
    }

    pub fn close(&self) {
        let mut state = lock(&self.state);
        state.translation = None;
        state.error = None;
        state.show_options = false;
        if state.phase != Phase::Translating {
            state.phase = Phase::Idle;
        }
    }

    /// 保存设置；撰写视图不清除已有译文
    pub fn save_settings(&self, draft: &SettingsDraft) -> bool {
        if !self.service.config_manager().save_config(draft) {
            lock(&self.state).error = Some(SETTINGS_NOT_SAVED.to_string());
            return false;
        }

        lock(&self.state).error = None;
        true
    }

    pub fn state(&self) -> DraftState {
        lock(&self.state).clone()
    }
}
