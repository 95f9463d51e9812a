mod chat_completions_gateway;
mod mock_model_gateway;
mod sse_decoder;

pub use chat_completions_gateway::{ChatCompletionsGateway, create_chat_completions_gateway};
pub use mock_model_gateway::MockModelGateway;
pub use sse_decoder::SseDecoder;
