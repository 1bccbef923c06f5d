//! 译文回填
//!
//! 从后端回复中提取 JSON，净化每个片段后写回带标记的段落元素

use std::collections::HashMap;

use markup5ever_rcdom::Handle;
use serde_json::Value;

use crate::parsers::html::{
    attr_is_event_handler, find_elements, get_fragment_root, get_node_attr, get_node_name,
    fragment_to_dom, is_stripped_tag, remove_elements, replace_children, serialize_children,
    set_node_attr, strip_attrs, take_children, Document, SEGMENT_MARKER_ATTR,
};
use crate::translation::error::{TranslationError, TranslationResult};

/// 从回复文本中截取 JSON 负载
///
/// 以最先出现的 `{` 或 `[` 为起点，截到同类闭合符最后一次出现的位置
pub fn extract_json_payload(text: &str) -> Option<&str> {
    let first_brace = text.find('{');
    let first_bracket = text.find('[');

    let (start, closer) = match (first_brace, first_bracket) {
        (None, None) => return None,
        (Some(brace), Some(bracket)) if brace < bracket => (brace, '}'),
        (Some(brace), None) => (brace, '}'),
        (_, Some(bracket)) => (bracket, ']'),
    };

    let end = text.rfind(closer)?;
    if end <= start {
        return None;
    }

    Some(&text[start..=end])
}

/// 净化译文片段：删除 `script/style/link/meta` 元素及所有 `on*` 属性
pub fn sanitize_fragment(html: &str) -> String {
    if html.is_empty() {
        return String::new();
    }

    let dom = fragment_to_dom(html);
    let root = get_fragment_root(&dom);

    remove_elements(&root, &|node: &Handle| {
        get_node_name(node).is_some_and(is_stripped_tag)
    });
    strip_attrs(&root, &attr_is_event_handler);

    serialize_children(&root)
}

/// 解析回复，得到 id → 净化后片段的映射
pub fn parse_translations(raw_reply: &str) -> TranslationResult<HashMap<String, String>> {
    let payload = extract_json_payload(raw_reply).ok_or_else(TranslationError::invalid_json)?;
    let parsed: Value =
        serde_json::from_str(payload).map_err(|_| TranslationError::unparsable_json())?;

    let items = match &parsed {
        Value::Array(items) => items,
        Value::Object(object) => match object.get("translations") {
            Some(Value::Array(items)) => items,
            _ => return Err(TranslationError::MissingData),
        },
        _ => return Err(TranslationError::MissingData),
    };

    let mut translations = HashMap::with_capacity(items.len());
    for item in items {
        let Some(id) = item.get("id").and_then(Value::as_str) else {
            continue;
        };
        let html = item.get("html").and_then(Value::as_str).unwrap_or_default();
        // 重复 id 以最后一项为准
        translations.insert(id.to_string(), sanitize_fragment(html));
    }

    Ok(translations)
}

/// 将回复中的译文写回文档并返回序列化结果
///
/// 回复无法解析时直接返回错误，文档保持不变。
/// 回复中缺失的段落保留原文；所有段落标记在输出前都会被移除。
pub fn apply_translations(document: &Document, raw_reply: &str) -> TranslationResult<String> {
    let translations = parse_translations(raw_reply)?;

    let marked = find_elements(document.root(), &|node: &Handle| {
        get_node_attr(node, SEGMENT_MARKER_ATTR).is_some()
    });

    let mut applied = 0;
    for element in &marked {
        let translated = get_node_attr(element, SEGMENT_MARKER_ATTR)
            .and_then(|id| translations.get(&id))
            .filter(|html| !html.is_empty());

        if let Some(html) = translated {
            let fragment = fragment_to_dom(html);
            replace_children(element, take_children(&get_fragment_root(&fragment)));
            applied += 1;
        }

        set_node_attr(element, SEGMENT_MARKER_ATTR, None);
    }

    if applied < marked.len() {
        tracing::warn!(
            "回复缺少部分段落，保留原文: {}/{} 段已翻译",
            applied,
            marked.len()
        );
    } else {
        tracing::debug!("译文回填完成: {} 段", applied);
    }

    Ok(document.to_html())
}
