// Form analysis and fill — markup + résumé in, structured field schema and
// suggested answers out. All LLM calls go through llm_client.

pub mod extract;
pub mod handlers;
pub mod pipeline;
pub mod prompts;
