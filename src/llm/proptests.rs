//! Property-based tests for the chat-completions translation layer
//!
//! - The system prompt, when present, is always the first wire message
//! - Conversation messages keep their order, role and content
//! - Stream parsing never panics on arbitrary input

use super::openai::{parse_stream_data, ChatCompletionsService};
use super::types::{LlmMessage, LlmRequest, MessageRole};
use proptest::prelude::*;

fn arb_message() -> impl Strategy<Value = LlmMessage> {
    (
        prop_oneof![Just(MessageRole::User), Just(MessageRole::Assistant)],
        "[a-zA-Z0-9 ?.!]{1,80}",
    )
        .prop_map(|(role, content)| LlmMessage { role, content })
}

fn arb_request() -> impl Strategy<Value = LlmRequest> {
    (
        proptest::option::of("[a-zA-Z .]{1,60}"),
        proptest::collection::vec(arb_message(), 1..8),
    )
        .prop_map(|(system, messages)| LlmRequest {
            system,
            messages,
            ..LlmRequest::default()
        })
}

fn service() -> ChatCompletionsService {
    ChatCompletionsService::new("test-key", "http://localhost", "test-model")
}

proptest! {
    #[test]
    fn prop_system_prompt_leads(request in arb_request(), stream in any::<bool>()) {
        let wire = service().translate_request(&request, stream);
        let offset = usize::from(request.system.is_some());

        prop_assert_eq!(wire.messages.len(), request.messages.len() + offset);
        prop_assert_eq!(wire.stream, stream);
        if let Some(system) = &request.system {
            prop_assert_eq!(&wire.messages[0].role, "system");
            prop_assert_eq!(&wire.messages[0].content, system);
        }
    }

    #[test]
    fn prop_messages_preserved_in_order(request in arb_request()) {
        let wire = service().translate_request(&request, false);
        let offset = usize::from(request.system.is_some());

        for (i, msg) in request.messages.iter().enumerate() {
            let out = &wire.messages[i + offset];
            prop_assert_eq!(out.role.as_str(), msg.role.as_str());
            prop_assert_eq!(&out.content, &msg.content);
        }
    }

    #[test]
    fn prop_stream_parse_never_panics(data in ".{0,200}") {
        let _ = parse_stream_data(&data);
    }
}
