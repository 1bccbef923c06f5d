//! 翻译管道模块
//!
//! 纯文本提取、段落切分、提示词构建与译文回填

pub mod plain_text;
pub mod prompt;
pub mod reconciler;
pub mod segmenter;

// 重新导出主要类型
pub use plain_text::extract_plain_text;
pub use prompt::{paragraph_prompt, text_prompt};
pub use reconciler::{apply_translations, extract_json_payload, parse_translations, sanitize_fragment};
pub use segmenter::{segment, Segment, Segmentation};
