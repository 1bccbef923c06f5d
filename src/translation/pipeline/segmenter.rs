//! HTML 段落切分
//!
//! 选出不含其他候选块级元素的"叶子块"，按文档顺序编号为 `seg_<n>`，
//! 并在原树上打上标记，供回复对齐时定位。

use markup5ever_rcdom::Handle;
use serde::{Deserialize, Serialize};

use crate::parsers::html::{
    find_elements, get_fragment_root, get_node_name, has_descendant, fragment_to_dom, is_block_tag,
    is_media_attr, is_media_tag, is_stripped_tag, normalize_whitespace, remove_elements,
    serialize_children, set_node_attr, strip_attrs, text_content, Document, SEGMENT_MARKER_ATTR,
};
use crate::translation::config::constants;

/// 待翻译段落
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub id: String,
    /// 段落元素的内部标记（已去除媒体）
    pub html: String,
}

/// 切分结果
#[derive(Debug)]
pub struct Segmentation {
    /// 已打标记的原文档树
    pub document: Document,
    pub segments: Vec<Segment>,
    /// 超出段落数量或字符预算；调用方必须视为失败
    pub truncated: bool,
}

fn is_candidate_block(node: &Handle) -> bool {
    get_node_name(node).is_some_and(is_block_tag)
}

/// 切分 HTML 文档
pub fn segment(html: &str) -> Segmentation {
    let document = Document::parse(html);
    let root = document.root().clone();

    remove_elements(&root, &|node: &Handle| {
        get_node_name(node).is_some_and(is_stripped_tag)
    });

    let mut segments: Vec<Segment> = Vec::new();
    let mut total_chars: usize = 0;
    let mut truncated = false;

    for element in find_elements(&root, &is_candidate_block) {
        if has_descendant(&element, &is_candidate_block) {
            continue;
        }

        let text = normalize_whitespace(&text_content(&element));
        if text.is_empty() {
            continue;
        }

        if segments.len() >= constants::MAX_SEGMENTS {
            truncated = true;
            break;
        }

        total_chars += text.chars().count();
        if total_chars > constants::MAX_TOTAL_SEGMENT_CHARS {
            truncated = true;
            break;
        }

        let id = format!("seg_{}", segments.len() + 1);
        set_node_attr(&element, SEGMENT_MARKER_ATTR, Some(id.clone()));
        segments.push(Segment {
            id,
            html: strip_media(&serialize_children(&element)),
        });
    }

    if truncated {
        tracing::warn!(
            "段落切分超出预算: 已接受 {} 段, 累计 {} 字符",
            segments.len(),
            total_chars
        );
    } else {
        tracing::debug!("段落切分完成: {} 段", segments.len());
    }

    Segmentation {
        document,
        segments,
        truncated,
    }
}

/// 去除片段中的嵌入媒体及 `src`/`srcset`/`poster` 属性
///
/// 只作用于发送给后端的副本，文档树中的媒体保持原样
fn strip_media(html: &str) -> String {
    let dom = fragment_to_dom(html);
    let root = get_fragment_root(&dom);

    remove_elements(&root, &|node: &Handle| {
        get_node_name(node).is_some_and(is_media_tag)
    });
    strip_attrs(&root, &is_media_attr);

    serialize_children(&root)
}
