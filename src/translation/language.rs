//! 目标语言与托管模型预设

/// 目标语言
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetLanguage {
    /// 语言代码，保存在设置中
    pub code: &'static str,
    /// 界面显示名称
    pub label: &'static str,
    /// 本地化显示名称
    pub native_label: &'static str,
    /// 写入提示词的语言名称
    pub name: &'static str,
}

pub const TARGET_LANGUAGES: &[TargetLanguage] = &[
    TargetLanguage { code: "zh-CN", label: "Chinese (Simplified)", native_label: "简体中文", name: "Simplified Chinese" },
    TargetLanguage { code: "zh-TW", label: "Chinese (Traditional)", native_label: "繁體中文", name: "Traditional Chinese" },
    TargetLanguage { code: "en", label: "English", native_label: "English", name: "English" },
    TargetLanguage { code: "ja", label: "Japanese", native_label: "日本語", name: "Japanese" },
    TargetLanguage { code: "ko", label: "Korean", native_label: "한국어", name: "Korean" },
    TargetLanguage { code: "es", label: "Spanish", native_label: "Español", name: "Spanish" },
    TargetLanguage { code: "fr", label: "French", native_label: "Français", name: "French" },
    TargetLanguage { code: "de", label: "German", native_label: "Deutsch", name: "German" },
    TargetLanguage { code: "ru", label: "Russian", native_label: "Русский", name: "Russian" },
    TargetLanguage { code: "pt", label: "Portuguese", native_label: "Português", name: "Portuguese" },
    TargetLanguage { code: "it", label: "Italian", native_label: "Italiano", name: "Italian" },
    TargetLanguage { code: "ar", label: "Arabic", native_label: "العربية", name: "Arabic" },
];

/// 托管模型预设
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelOption {
    pub value: &'static str,
    pub label: &'static str,
}

pub const MODEL_OPTIONS: &[ModelOption] = &[
    ModelOption { value: "gemini-3-pro-preview", label: "Gemini 3 Pro Preview" },
    ModelOption { value: "gemini-3-flash-preview", label: "Gemini 3 Flash Preview (fast)" },
    ModelOption { value: "gemini-2.5-pro", label: "Gemini 2.5 Pro (quality)" },
    ModelOption { value: "gemini-2.5-flash", label: "Gemini 2.5 Flash" },
    ModelOption { value: "gemini-2.5-flash-lite", label: "Gemini 2.5 Flash-Lite (fast)" },
    ModelOption {
        value: "gemini-2.5-flash-lite-preview-09-2025",
        label: "Gemini 2.5 Flash-Lite Preview (09-2025)",
    },
];

pub fn find_language(code: &str) -> Option<&'static TargetLanguage> {
    TARGET_LANGUAGES.iter().find(|language| language.code == code)
}

pub fn is_supported_language(code: &str) -> bool {
    find_language(code).is_some()
}

/// 语言代码对应的提示词名称；未知代码原样返回
pub fn language_name(code: &str) -> &str {
    match find_language(code) {
        Some(language) => language.name,
        None => code,
    }
}

pub fn is_preset_model(model: &str) -> bool {
    MODEL_OPTIONS.iter().any(|option| option.value == model)
}
