//! Shared fixtures for the pipeline tests

#![allow(dead_code)]

pub mod fixtures;

use std::sync::atomic::{AtomicU32, Ordering};

use rosetta_llm::ResponseEntropy;

/// Deterministic ids and a frozen clock for Gemini response parsing
#[derive(Debug, Default)]
pub struct SequentialEntropy {
    next: AtomicU32,
}

impl ResponseEntropy for SequentialEntropy {
    fn call_id(&self) -> String {
        format!("call_{:09}", self.next.fetch_add(1, Ordering::Relaxed))
    }

    fn response_id(&self) -> String {
        "gen-000000000".to_owned()
    }

    fn now_millis(&self) -> u64 {
        1_717_171_717_000
    }
}

/// Anthropic request whose first message nests `levels` tool results
pub fn nested_tool_result_request(levels: usize) -> serde_json::Value {
    let mut content = serde_json::json!("leaf");
    for level in 0..levels {
        let mut block = serde_json::Map::new();
        block.insert("type".to_owned(), "tool_result".into());
        block.insert("tool_use_id".to_owned(), format!("toolu_{level}").into());
        block.insert("content".to_owned(), content);
        content = serde_json::Value::Array(vec![block.into()]);
    }

    let mut body = serde_json::json!({"model": "claude-3-haiku", "messages": [{"role": "user"}]});
    body["messages"][0]["content"] = content;
    body
}

/// Drop a value without recursing through its nesting
pub fn drop_flat(value: serde_json::Value) {
    let mut pending = vec![value];
    while let Some(mut value) = pending.pop() {
        match &mut value {
            serde_json::Value::Array(items) => pending.append(items),
            serde_json::Value::Object(map) => pending.extend(std::mem::take(map).into_iter().map(|(_, v)| v)),
            _ => {}
        }
    }
}
