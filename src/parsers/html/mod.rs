//! HTML解析和处理模块
//!
//! - `dom`: 基础DOM操作
//! - `document`: 可原地修改的文档树
//! - `serializer`: 序列化功能
//! - `utils`: 标签常量与工具函数

pub mod document;
pub mod dom;
pub mod serializer;
pub mod utils;

pub use document::Document;
pub use dom::{
    find_elements, fragment_to_dom, get_child_node_by_name, get_fragment_root, get_node_attr,
    get_node_name, has_descendant, remove_elements, replace_children, set_node_attr, strip_attrs,
    take_children, text_content,
};
pub use serializer::serialize_children;
pub use utils::{
    attr_is_event_handler, is_block_tag, is_media_attr, is_media_tag, is_stripped_tag,
    normalize_whitespace, SEGMENT_MARKER_ATTR,
};
