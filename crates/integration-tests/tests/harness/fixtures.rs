//! Vendor payloads shaped like real traffic

use serde_json::{Value, json};

/// Anthropic request with a system prompt and a completed tool round trip
pub fn anthropic_tool_conversation() -> Value {
    json!({
        "model": "claude-3-5-sonnet-20241022",
        "max_tokens": 1024,
        "system": "You are a weather assistant.",
        "messages": [
            {"role": "user", "content": "What's the weather in Oslo?"},
            {"role": "assistant", "content": [
                {"type": "text", "text": "Let me check."},
                {"type": "tool_use", "id": "toolu_01", "name": "get_weather", "input": {"city": "Oslo"}}
            ]},
            {"role": "user", "content": [
                {"type": "tool_result", "tool_use_id": "toolu_01", "content": [{"type": "text", "text": "8C, rain"}]}
            ]}
        ],
        "tools": [{
            "name": "get_weather",
            "description": "Current weather for a city",
            "input_schema": {"type": "object", "properties": {"city": {"type": "string"}}, "required": ["city"]}
        }],
        "tool_choice": {"type": "auto"},
        "temperature": 0.4,
        "stop_sequences": ["\n\nHuman:"]
    })
}

/// Anthropic request made only of plain-text messages
pub fn anthropic_text_conversation() -> Value {
    json!({
        "model": "claude-3-haiku",
        "max_tokens": 256,
        "system": "Answer in one sentence.",
        "messages": [
            {"role": "user", "content": "Name a prime."},
            {"role": "assistant", "content": "Seven."},
            {"role": "user", "content": "Another?"}
        ]
    })
}

/// OpenRouter response carrying a tool call
pub fn openrouter_tool_call_response() -> Value {
    json!({
        "id": "gen-1717171717-abc",
        "object": "chat.completion",
        "created": 1_717_171_717,
        "model": "openai/gpt-4o",
        "choices": [{
            "index": 0,
            "finish_reason": "tool_calls",
            "message": {
                "role": "assistant",
                "content": "Checking the forecast.",
                "tool_calls": [{
                    "id": "call_abc123",
                    "type": "function",
                    "function": {"name": "get_weather", "arguments": "{\"city\":\"Oslo\"}"}
                }]
            }
        }],
        "usage": {"prompt_tokens": 52, "completion_tokens": 17, "total_tokens": 69}
    })
}

/// Gemini response with text and a function call in separate parts
pub fn gemini_function_call_response() -> Value {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [
                {"text": "Checking the forecast."},
                {"functionCall": {"name": "get_weather", "args": {"city": "Oslo"}}}
            ]},
            "finishReason": "STOP",
            "index": 0
        }],
        "usageMetadata": {"promptTokenCount": 40, "candidatesTokenCount": 12, "totalTokenCount": 52}
    })
}
