mod chat_session_test;
