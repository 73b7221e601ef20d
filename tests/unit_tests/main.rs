mod client;
mod infrastructure;
mod presentation;
