//! 纯文本提取
//!
//! 将 HTML 正文折叠为单行纯文本，用于整段翻译

use std::sync::OnceLock;

use regex::Regex;

/// 正则表达式缓存
struct PlainTextPatterns {
    style_block: Regex,
    script_block: Regex,
    any_tag: Regex,
    whitespace: Regex,
}

fn patterns() -> &'static PlainTextPatterns {
    static PATTERNS: OnceLock<PlainTextPatterns> = OnceLock::new();

    PATTERNS.get_or_init(|| PlainTextPatterns {
        style_block: compile(r"(?is)<style[^>]*>.*?</style>"),
        script_block: compile(r"(?is)<script[^>]*>.*?</script>"),
        any_tag: compile(r"<[^>]+>"),
        whitespace: compile(r"\s+"),
    })
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| {
        tracing::error!("无效的正则表达式 {}: {}", pattern, e);
        // 永不匹配
        Regex::new(r"[^\s\S]").unwrap_or_else(|_| unreachable!())
    })
}

/// 提取纯文本
///
/// 先移除 `<style>`/`<script>` 块，再把其余标签替换为空格，
/// 解码常见实体后折叠空白并去除首尾空白。
pub fn extract_plain_text(html: &str) -> String {
    if html.is_empty() {
        return String::new();
    }

    let patterns = patterns();
    let text = patterns.style_block.replace_all(html, "");
    let text = patterns.script_block.replace_all(&text, "");
    let text = patterns.any_tag.replace_all(&text, " ");

    // 顺序固定：&amp; 必须在 &lt;/&gt; 之后解码
    let text = text
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
        .replace("&quot;", "\"")
        .replace("&#39;", "'");

    patterns
        .whitespace
        .replace_all(&text, " ")
        .trim()
        .to_string()
}
