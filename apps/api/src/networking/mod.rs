// Networking workflow: professional discovery, email drafting and dispatch.
// All LLM calls go through llm_client and every generation step has a
// deterministic fallback, so these operations never fail outward.

pub mod cv;
pub mod discovery;
pub mod dispatch;
pub mod drafting;
pub mod handlers;
pub mod models;
pub mod prompts;
