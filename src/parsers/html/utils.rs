/// 解析前直接移除的元素，回复片段净化时同样适用
pub const STRIPPED_TAGS: &[&str] = &["script", "style", "link", "meta"];

/// 候选块级元素
pub const BLOCK_TAGS: &[&str] = &[
    "p", "li", "blockquote", "h1", "h2", "h3", "h4", "h5", "h6", "pre", "div",
];

/// 发送给翻译后端前剔除的嵌入媒体
pub const MEDIA_TAGS: &[&str] = &[
    "img", "picture", "video", "audio", "source", "svg", "canvas", "iframe", "object", "embed",
];

/// 媒体引用属性
pub const MEDIA_ATTRS: &[&str] = &["src", "srcset", "poster"];

/// 段落标记属性
pub const SEGMENT_MARKER_ATTR: &str = "data-translation-id";

pub fn is_block_tag(tag: &str) -> bool {
    BLOCK_TAGS.contains(&tag)
}

pub fn is_media_tag(tag: &str) -> bool {
    MEDIA_TAGS.contains(&tag)
}

pub fn is_stripped_tag(tag: &str) -> bool {
    STRIPPED_TAGS.contains(&tag)
}

pub fn is_media_attr(attr_name: &str) -> bool {
    MEDIA_ATTRS.contains(&attr_name)
}

/// 检查属性名是否为事件处理器（任何以 `on` 开头的属性，不区分大小写）
pub fn attr_is_event_handler(attr_name: &str) -> bool {
    attr_name
        .get(..2)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("on"))
}

/// 折叠连续空白为单个空格并去除首尾空白
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
