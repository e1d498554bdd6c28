// DPR generation: outline assembly and the end-to-end pipeline.
// All LLM calls go through llm_client via extraction; nothing here talks to the API.

pub mod assembler;
pub mod generator;
