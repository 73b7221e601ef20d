mod http_chat_api_test;
mod openai_embedder_test;
