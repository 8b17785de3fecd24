//! Page scripts and their evaluation.
//!
//! Every script is a self-contained IIFE returning a JSON object with a
//! `status` tag. Arguments are embedded as JSON literals.

use chromiumoxide::Page;
use serde::Deserialize;
use std::time::Duration;

/// Bound on a single evaluation; dialogs can block the JS thread.
const EVAL_TIMEOUT: Duration = Duration::from_secs(10);

/// Shared by every script that targets elements.
const VISIBILITY_JS: &str = r#"
    const isVisible = (el) => {
        if (!(el.offsetWidth || el.offsetHeight || el.getClientRects().length)) return false;
        const style = window.getComputedStyle(el);
        return style.visibility !== "hidden" && style.opacity !== "0";
    };
"#;

pub(crate) enum EvalError {
    Timeout,
    /// The execution context went away, usually because the page navigated.
    Context(String),
    Other(String),
}

/// Only the messages naming a lost context count; a bare `-32000` is any
/// server-side CDP failure.
fn is_context_error(err: &str) -> bool {
    err.contains("Cannot find context") || err.contains("Execution context was destroyed")
}

pub(crate) async fn evaluate_with_timeout(
    page: &Page,
    expression: &str,
) -> Result<serde_json::Value, EvalError> {
    let eval_result = tokio::time::timeout(EVAL_TIMEOUT, page.evaluate(expression)).await;

    match eval_result {
        Err(_) => Err(EvalError::Timeout),
        Ok(Err(e)) => {
            let err_str = e.to_string();
            if is_context_error(&err_str) {
                Err(EvalError::Context(err_str))
            } else {
                Err(EvalError::Other(err_str))
            }
        }
        Ok(Ok(remote_object)) => remote_object
            .into_value::<serde_json::Value>()
            .map_err(|e| EvalError::Other(format!("Failed to get result: {}", e))),
    }
}

fn literal(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

/// Tags the current document once and returns its tag. A navigation replaces
/// `window`, so the next document gets a different tag.
pub(crate) fn stamp(candidate_token: &str) -> String {
    format!(
        r#"(() => {{
    if (!window.__storecheckDocument) window.__storecheckDocument = {token};
    return window.__storecheckDocument;
}})()"#,
        token = literal(candidate_token)
    )
}

#[derive(Debug, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub(crate) enum QueryReply {
    Ok {
        elements: Vec<storecheck_core::ElementHandle>,
    },
    Stale,
    Invalid {
        message: String,
    },
}

pub(crate) fn query(token: &str, selector: &str) -> String {
    format!(
        r#"(() => {{
    if (window.__storecheckDocument !== {token}) return {{ status: "stale" }};
    let nodes;
    try {{
        nodes = document.querySelectorAll({selector});
    }} catch (e) {{
        return {{ status: "invalid", message: String(e) }};
    }}
    {visibility}
    return {{
        status: "ok",
        elements: Array.from(nodes).map((el, index) => ({{
            index,
            tag: el.tagName.toLowerCase(),
            text: (el.innerText ?? el.textContent ?? "").trim(),
            attributes: Object.fromEntries(Array.from(el.attributes).map((a) => [a.name, a.value])),
            visible: isVisible(el),
        }})),
    }};
}})()"#,
        token = literal(token),
        selector = literal(selector),
        visibility = VISIBILITY_JS,
    )
}

pub(crate) enum ElementAction<'a> {
    Click,
    Type(&'a str),
    Select(&'a str),
}

#[derive(Debug, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub(crate) enum ActionReply {
    Ok,
    Invalid { message: String },
    Missing,
    NoOption,
}

pub(crate) fn element_action(selector: &str, index: usize, action: &ElementAction<'_>) -> String {
    let body = match action {
        ElementAction::Click => "el.click();".to_string(),
        ElementAction::Type(text) => format!(
            r#"el.focus();
    el.value = {text};
    el.dispatchEvent(new Event("input", {{ bubbles: true }}));
    el.dispatchEvent(new Event("change", {{ bubbles: true }}));"#,
            text = literal(text)
        ),
        ElementAction::Select(value) => format!(
            r#"const value = {value};
    if (!Array.from(el.options || []).some((o) => o.value === value)) return {{ status: "no_option" }};
    el.value = value;
    el.dispatchEvent(new Event("change", {{ bubbles: true }}));"#,
            value = literal(value)
        ),
    };
    format!(
        r#"(() => {{
    let nodes;
    try {{
        nodes = document.querySelectorAll({selector});
    }} catch (e) {{
        return {{ status: "invalid", message: String(e) }};
    }}
    const el = nodes[{index}];
    if (!el) return {{ status: "missing" }};
    {body}
    return {{ status: "ok" }};
}})()"#,
        selector = literal(selector),
        index = index,
        body = body,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_is_embedded_as_json_literal() {
        let script = query("tok", r#"input[name="password"]"#);
        assert!(script.contains(r#"document.querySelectorAll("input[name=\"password\"]")"#));
        assert!(script.contains(r#"window.__storecheckDocument !== "tok""#));
    }

    #[test]
    fn test_typed_text_is_escaped() {
        let script = element_action("input", 0, &ElementAction::Type("it's \"quoted\""));
        assert!(script.contains(r#"el.value = "it's \"quoted\"";"#));
        assert!(script.contains("const el = nodes[0];"));
    }

    #[test]
    fn test_context_errors_are_recognized_by_message() {
        assert!(is_context_error("Error -32000: Execution context was destroyed."));
        assert!(is_context_error("Cannot find context with specified id"));
        assert!(!is_context_error("Error -32000: Object reference chain is too long"));
        assert!(!is_context_error("Error -32000: Node is detached from document"));
    }

    #[test]
    fn test_reply_parsing() {
        let reply: QueryReply = serde_json::from_value(serde_json::json!({
            "status": "ok",
            "elements": [{
                "index": 0,
                "tag": "img",
                "text": "",
                "attributes": { "alt": "" },
                "visible": true
            }]
        }))
        .unwrap();
        match reply {
            QueryReply::Ok { elements } => {
                assert_eq!(elements.len(), 1);
                assert_eq!(elements[0].attr("alt"), Some(""));
            }
            other => panic!("unexpected reply {:?}", other),
        }

        let stale: QueryReply = serde_json::from_value(serde_json::json!({ "status": "stale" })).unwrap();
        assert!(matches!(stale, QueryReply::Stale));

        let missing: ActionReply =
            serde_json::from_value(serde_json::json!({ "status": "no_option" })).unwrap();
        assert!(matches!(missing, ActionReply::NoOption));
    }
}
