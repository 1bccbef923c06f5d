use markup5ever_rcdom::{Handle, RcDom};

use super::dom::{fragment_to_dom, get_fragment_root};
use super::serializer::serialize_children;

/// 可原地修改的 HTML 文档树
///
/// 按片段解析，根容器相当于被赋值 innerHTML 的元素；节点通过 `Rc` 共享，修改后节点身份保持不变。
pub struct Document {
    // 持有整棵树，root 只是其中的一个节点
    #[allow(dead_code)]
    dom: RcDom,
    root: Handle,
}

impl Document {
    pub fn parse(html: &str) -> Self {
        let dom = fragment_to_dom(html);
        let root = get_fragment_root(&dom);
        Self { dom, root }
    }

    /// 根容器节点
    pub fn root(&self) -> &Handle {
        &self.root
    }

    /// 序列化根容器的内部标记
    pub fn to_html(&self) -> String {
        serialize_children(&self.root)
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("html", &self.to_html())
            .finish()
    }
}
