use serde::{Deserialize, Serialize};

/// A page or section in the documentation navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationNode {
    /// Unique within the tree
    pub path: String,

    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// Presentation class applied to the icon
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_class: Option<String>,

    /// Inline-code rendering of the title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<CodeTitle>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Self>>,
}

impl NavigationNode {
    /// A leaf node.
    #[must_use]
    pub fn new(path: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            title: title.into(),
            icon: None,
            icon_class: None,
            code: None,
            children: None,
        }
    }

    /// The same node with the given children.
    #[must_use]
    pub fn with_children(mut self, children: Vec<Self>) -> Self {
        self.children = Some(children);
        self
    }

    /// The same node with the given icon.
    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    #[must_use]
    pub fn children(&self) -> &[Self] {
        self.children.as_deref().unwrap_or_default()
    }

    /// Whether the title names a function, either as written or as already rendered.
    #[must_use]
    pub fn is_function(&self) -> bool {
        self.title.contains("()") || self.code.as_ref().is_some_and(|c| c.kind == CodeKind::Function)
    }
}

/// What an inline-code title represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeKind {
    Function,
    Tag,
}

/// A title rendered as inline code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeTitle {
    /// The bare name, without call parentheses or angle brackets
    pub text: String,
    pub kind: CodeKind,
    pub html: String,
}

impl CodeTitle {
    #[must_use]
    pub fn new(text: &str, kind: CodeKind) -> Self {
        let name = escape_html(text);
        let html = match kind {
            CodeKind::Function => format!(r#"<code class="nav-code"><span class="nav-code-fn">{name}</span>()</code>"#),
            CodeKind::Tag => format!(r#"<code class="nav-code">&lt;<span class="nav-code-tag">{name}</span>&gt;</code>"#),
        };

        Self {
            text: text.to_string(),
            kind,
            html,
        }
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_title_html() {
        let function = CodeTitle::new("defineRobotsConfig", CodeKind::Function);
        assert_eq!(
            function.html,
            r#"<code class="nav-code"><span class="nav-code-fn">defineRobotsConfig</span>()</code>"#
        );

        let tag = CodeTitle::new("OgImage", CodeKind::Tag);
        assert!(tag.html.contains("&lt;<span class=\"nav-code-tag\">OgImage</span>&gt;"));
    }

    #[test]
    fn test_code_title_escapes() {
        let code = CodeTitle::new("a<b>&\"c\"", CodeKind::Function);
        assert!(code.html.contains("a&lt;b&gt;&amp;&quot;c&quot;"));
    }

    #[test]
    fn test_serialization_skips_empty_fields() {
        let node = NavigationNode::new("/docs/robots/api", "API").with_children(vec![NavigationNode::new("/docs/robots/api/config", "Config")]);
        let json = serde_json::to_value(&node).unwrap();

        assert_eq!(json["path"], "/docs/robots/api");
        assert!(json.get("icon").is_none());
        assert!(json.get("iconClass").is_none());
        assert!(json["children"][0].get("children").is_none());
    }

    #[test]
    fn test_is_function() {
        assert!(NavigationNode::new("/a", "useFoo()").is_function());
        assert!(!NavigationNode::new("/a", "Foo").is_function());

        let mut node = NavigationNode::new("/a", "useFoo");
        node.code = Some(CodeTitle::new("useFoo", CodeKind::Function));
        assert!(node.is_function());
    }
}
