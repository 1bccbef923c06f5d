use html5ever::tendril::TendrilSink;
use html5ever::interface::{Attribute, QualName};
use html5ever::tendril::format_tendril;
use html5ever::{local_name, namespace_url, ns, parse_fragment, LocalName};
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use std::rc::Rc;

/// 以 `<body>` 为上下文解析 HTML 片段（等同于给元素的 innerHTML 赋值）
///
/// 片段开头的空白与文本原样保留；`<html>`/`<head>`/`<body>` 标签本身被忽略
pub fn fragment_to_dom(html: &str) -> RcDom {
    parse_fragment(
        RcDom::default(),
        Default::default(),
        QualName::new(None, ns!(html), local_name!("body")),
        Vec::new(),
    )
    .one(html)
}

/// 获取片段的根容器
///
/// html5ever 把片段内容挂在一个合成的 `<html>` 元素下
pub fn get_fragment_root(dom: &RcDom) -> Handle {
    get_child_node_by_name(&dom.document, "html").unwrap_or_else(|| dom.document.clone())
}

/// 按文档顺序（先序）查找满足条件的后代元素，不包含起始节点本身
pub fn find_elements<F>(node: &Handle, predicate: &F) -> Vec<Handle>
where
    F: Fn(&Handle) -> bool,
{
    let mut found_nodes = Vec::new();

    for child_node in node.children.borrow().iter() {
        if matches!(child_node.data, NodeData::Element { .. }) && predicate(child_node) {
            found_nodes.push(child_node.clone());
        }
        found_nodes.append(&mut find_elements(child_node, predicate));
    }

    found_nodes
}

/// 检查是否存在满足条件的后代元素
pub fn has_descendant<F>(node: &Handle, predicate: &F) -> bool
where
    F: Fn(&Handle) -> bool,
{
    node.children.borrow().iter().any(|child_node| {
        (matches!(child_node.data, NodeData::Element { .. }) && predicate(child_node))
            || has_descendant(child_node, predicate)
    })
}

/// 根据名称获取子节点
pub fn get_child_node_by_name(parent: &Handle, node_name: &str) -> Option<Handle> {
    let children = parent.children.borrow();
    let matching_children = children.iter().find(|child| match child.data {
        NodeData::Element { ref name, .. } => &*name.local == node_name,
        _ => false,
    });
    matching_children.cloned()
}

/// 获取节点属性值
pub fn get_node_attr(node: &Handle, attr_name: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => {
            for attr in attrs.borrow().iter() {
                if &*attr.name.local == attr_name {
                    return Some(attr.value.to_string());
                }
            }
            None
        }
        _ => None,
    }
}

/// 获取节点名称
pub fn get_node_name(node: &Handle) -> Option<&'_ str> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.as_ref()),
        _ => None,
    }
}

/// 设置节点属性，`attr_value` 为 `None` 时删除该属性
pub fn set_node_attr(node: &Handle, attr_name: &str, attr_value: Option<String>) {
    if let NodeData::Element { attrs, .. } = &node.data {
        let attrs_mut = &mut attrs.borrow_mut();
        let mut i = 0;
        let mut found_existing_attr: bool = false;

        while i < attrs_mut.len() {
            if &attrs_mut[i].name.local == attr_name {
                found_existing_attr = true;

                if let Some(attr_value) = attr_value.clone() {
                    let _ = &attrs_mut[i].value.clear();
                    let _ = &attrs_mut[i].value.push_slice(attr_value.as_str());
                } else {
                    // Remove attr completely if attr_value is not defined
                    attrs_mut.remove(i);
                    continue;
                }
            }

            i += 1;
        }

        if !found_existing_attr {
            if let Some(attr_value) = attr_value {
                let name = LocalName::from(attr_name);

                attrs_mut.push(Attribute {
                    name: QualName::new(None, ns!(), name),
                    value: format_tendril!("{}", attr_value),
                });
            }
        }
    };
}

/// 在节点及其全部后代上删除满足条件的属性
pub fn strip_attrs<F>(node: &Handle, predicate: &F)
where
    F: Fn(&str) -> bool,
{
    if let NodeData::Element { attrs, .. } = &node.data {
        attrs
            .borrow_mut()
            .retain(|attr| !predicate(attr.name.local.as_ref()));
    }

    for child_node in node.children.borrow().iter() {
        strip_attrs(child_node, predicate);
    }
}

/// 删除满足条件的后代元素（连同其子树）
pub fn remove_elements<F>(node: &Handle, predicate: &F)
where
    F: Fn(&Handle) -> bool,
{
    let mut removed = Vec::new();
    node.children.borrow_mut().retain(|child_node| {
        let remove =
            matches!(child_node.data, NodeData::Element { .. }) && predicate(child_node);
        if remove {
            removed.push(child_node.clone());
        }
        !remove
    });

    for removed_node in removed {
        removed_node.parent.set(None);
    }

    for child_node in node.children.borrow().iter() {
        remove_elements(child_node, predicate);
    }
}

/// 拼接节点下所有文本节点的内容（对应 DOM 的 textContent）
pub fn text_content(node: &Handle) -> String {
    let mut text = String::new();
    collect_text(node, &mut text);
    text
}

fn collect_text(node: &Handle, text: &mut String) {
    if let NodeData::Text { ref contents } = node.data {
        text.push_str(&contents.borrow());
    }

    for child_node in node.children.borrow().iter() {
        collect_text(child_node, text);
    }
}

/// 取出节点的全部子节点，并解除它们与原父节点的关联
pub fn take_children(parent: &Handle) -> Vec<Handle> {
    let children = std::mem::take(&mut *parent.children.borrow_mut());
    for child_node in children.iter() {
        child_node.parent.set(None);
    }
    children
}

/// 用新的子节点列表替换节点原有的全部子节点
pub fn replace_children(parent: &Handle, children: Vec<Handle>) {
    take_children(parent);

    for child_node in children.iter() {
        child_node.parent.set(Some(Rc::downgrade(parent)));
    }
    *parent.children.borrow_mut() = children;
}
