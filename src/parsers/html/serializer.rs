use html5ever::serialize::{serialize, SerializeOpts, TraversalScope};
use markup5ever_rcdom::{Handle, SerializableHandle};

/// 序列化节点的内部标记（对应 DOM 的 innerHTML）
pub fn serialize_children(node: &Handle) -> String {
    let mut buf: Vec<u8> = Vec::new();
    let serializable: SerializableHandle = node.clone().into();
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::ChildrenOnly(None),
        ..Default::default()
    };

    match serialize(&mut buf, &serializable, opts) {
        Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
        Err(e) => {
            tracing::error!("DOM 序列化失败: {}", e);
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::html::dom::{fragment_to_dom, get_fragment_root};

    #[test]
    fn test_serialize_children_of_fragment() {
        let dom = fragment_to_dom("<p class=\"a\">Hi &amp; <b>bye</b></p><img src=\"x.png\">");
        let root = get_fragment_root(&dom);
        assert_eq!(
            serialize_children(&root),
            "<p class=\"a\">Hi &amp; <b>bye</b></p><img src=\"x.png\">"
        );
    }

    #[test]
    fn test_body_tags_are_ignored() {
        let dom = fragment_to_dom("<body><p>x</p></body>");
        assert_eq!(serialize_children(&get_fragment_root(&dom)), "<p>x</p>");
    }

    #[test]
    fn test_leading_text_round_trips() {
        let html = " <a href=\"/x\">link</a> tail\n  <p>\n  Hello <b>world</b>\n</p>";
        let dom = fragment_to_dom(html);
        assert_eq!(serialize_children(&get_fragment_root(&dom)), html);
    }
}
