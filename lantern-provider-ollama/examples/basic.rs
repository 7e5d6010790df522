//! Basic usage of the Ollama provider.
//!
//! Make sure Ollama is running locally and run:
//!   cargo run --example basic

use futures::StreamExt;
use lantern_provider_ollama::{ChatMessage, ChatRequest, ModelProvider, Ollama, StreamEvent};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let provider = Ollama::from_env()?;

    let models = provider.list_models(None).await?;
    println!("{} model(s) available:", models.len());
    for model in &models {
        match &model.description {
            Some(size) => println!("  {} ({size})", model.name),
            None => println!("  {}", model.name),
        }
    }

    let mut request = ChatRequest::new(vec![ChatMessage::user("Say hello in one sentence.")]);
    request.options.max_tokens = Some(128);

    let mut handle = provider.stream_chat(request);
    while let Some(event) = handle.receiver.next().await {
        match event {
            StreamEvent::Thinking { text } => println!("[thinking] {text}"),
            StreamEvent::Content { text } => println!("{text}"),
            StreamEvent::ToolStart { name, input, .. } => println!("[tool] {name} {input:?}"),
            StreamEvent::Done { usage } => {
                if let Some(usage) = usage {
                    println!(
                        "Tokens: {} in / {} out",
                        usage.input_tokens, usage.output_tokens
                    );
                }
            }
            StreamEvent::Error { message } => return Err(message.into()),
        }
    }

    Ok(())
}
